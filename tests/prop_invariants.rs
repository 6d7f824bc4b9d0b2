use proptest::prelude::*;
use rcacrab::anomaly::diff::compare_logs;
use rcacrab::anomaly::sequence::{check_sequence, SequenceStatus, EXPECTED_SEQUENCE};
use rcacrab::anomaly::spike::detect_spikes;
use rcacrab::parser::line::LogLine;
use rcacrab::parser::multiline::merge;
use rcacrab::parser::redactor::Redactor;
use std::collections::BTreeMap;

// Fragments that exercise every redaction category and their neighbours
fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
        "[a-z]{1,5}@[a-z]{1,5}\\.com",
        "user=[a-z0-9]{1,6}",
        "[0-9]{3}-[0-9]{2}-[0-9]{4}",
        "[A-Z0-9]{4}-[A-Z0-9]{4}",
        "(/[a-z0-9.]{1,5}){1,3}",
        "v?[0-9]{1,2}\\.[0-9]{1,2}(\\.[0-9])?",
        "(tool|internal)_[a-z]{1,5}",
        "2025-0[1-9]-[0-2][0-9] [0-2][0-9]:[0-5][0-9]:[0-5][0-9]",
        "[\\[\\]/:.=-]",
    ]
}

fn timestamp() -> impl Strategy<Value = String> {
    "20[0-9]{2}-[01][0-9]-[0-3][0-9][ T][0-2][0-9]:[0-5][0-9]:[0-5][0-9]"
}

fn guid() -> impl Strategy<Value = String> {
    "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
}

proptest! {
    #[test]
    fn test_redaction_is_idempotent(tokens in prop::collection::vec(token(), 0..12), glue in "[ ,;]") {
        let line = tokens.join(&glue);
        let redactor = Redactor::default();
        let once = redactor.redact_line(&line);
        prop_assert_eq!(redactor.redact_line(&once), once);
    }

    #[test]
    fn test_redaction_is_idempotent_on_any_text(line in "\\PC{0,80}") {
        let redactor = Redactor::default();
        let lines = vec![LogLine::new(line, 1)];
        let once = redactor.redact(&lines);
        prop_assert_eq!(redactor.redact(&once), once);
    }

    #[test]
    fn test_sequence_partitions_milestones(
        present in prop::collection::vec(any::<bool>(), EXPECTED_SEQUENCE.len()),
        noise in prop::collection::vec("[a-z ]{0,10}", 0..5),
    ) {
        let mut lines: Vec<String> = noise;
        for (milestone, keep) in EXPECTED_SEQUENCE.iter().zip(&present) {
            if *keep {
                lines.push(format!("2025-01-01 00:00:00 {milestone} done"));
            }
        }

        let result = check_sequence(&lines, EXPECTED_SEQUENCE);
        prop_assert_eq!(result.observed.len() + result.missing.len(), EXPECTED_SEQUENCE.len());
        for milestone in EXPECTED_SEQUENCE {
            let observed = result.observed.iter().any(|m| m == milestone);
            let missing = result.missing.iter().any(|m| m == milestone);
            prop_assert!(observed != missing, "{} must be in exactly one list", milestone);
        }
        let expected_status = if present.iter().all(|p| *p) {
            SequenceStatus::Pass
        } else {
            SequenceStatus::Fail
        };
        prop_assert_eq!(result.status, expected_status);
    }

    #[test]
    fn test_spikes_exceed_threshold(
        per_minute in prop::collection::vec(0usize..25, 1..10),
        threshold in 0usize..20,
    ) {
        let mut lines = Vec::new();
        let mut expected = BTreeMap::new();
        for (minute, count) in per_minute.iter().enumerate() {
            for second in 0..*count {
                lines.push(format!("2025-01-01 00:{minute:02}:{:02} tick", second % 60));
            }
            if *count > threshold {
                expected.insert(format!("2025-01-01 00:{minute:02}"), *count);
            }
        }
        lines.push("no timestamp here".to_string());

        let spikes = detect_spikes(&lines, threshold);
        prop_assert!(spikes.values().all(|count| *count > threshold));
        prop_assert_eq!(spikes, expected);
    }

    #[test]
    fn test_volatile_fields_never_diff(
        rows in prop::collection::vec(
            (timestamp(), timestamp(), guid(), guid(), "[a-z]{1,8}", "[a-z]{1,8}"),
            0..8,
        ),
    ) {
        let mut baseline = Vec::new();
        let mut target = Vec::new();
        for (i, (ts_a, ts_b, guid_a, guid_b, dir_a, dir_b)) in rows.iter().enumerate() {
            baseline.push(format!("{ts_a} step {i} session {guid_a} file /opt/{dir_a}/run.log"));
            target.push(format!("{ts_b} step {i} session {guid_b} file /opt/{dir_b}/run.log"));
        }
        prop_assert!(compare_logs(&baseline, &target).is_empty());
    }

    #[test]
    fn test_reassembly_keeps_every_line(
        rows in prop::collection::vec((any::<bool>(), "[a-z ]{1,20}"), 0..30),
    ) {
        let texts: Vec<String> = rows
            .iter()
            .map(|(starts, body)| {
                if *starts {
                    format!("2025-01-01 00:00:00 {body}")
                } else {
                    body.clone()
                }
            })
            .collect();
        let lines = LogLine::from_texts(texts.clone());

        let entries = merge(&lines);
        let rejoined: Vec<&str> = entries.iter().flat_map(|e| e.text.split('\n')).collect();
        prop_assert_eq!(rejoined, texts.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(entries.iter().map(|e| e.line_count).sum::<usize>(), lines.len());
        prop_assert!(entries.windows(2).all(|w| w[0].start_line < w[1].start_line));
    }
}
