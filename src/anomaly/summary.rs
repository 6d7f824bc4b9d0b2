use super::sequence::{SequenceResult, SequenceStatus};
use super::spike::SpikeResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub line_count: usize,
    pub has_diff: bool,
}

/// Sequence, spike and diff outcomes in one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnomalySummary {
    pub sequence_status: SequenceStatus,
    pub missing_steps: Vec<String>,
    pub spike_times: Vec<String>,
    pub diff_summary: DiffSummary,
}

/// Reshape the three detector outputs. Nothing is recomputed or checked.
pub fn summarize_anomalies(
    sequence: &SequenceResult,
    spikes: &SpikeResult,
    diff_lines: &[String],
) -> AnomalySummary {
    AnomalySummary {
        sequence_status: sequence.status,
        missing_steps: sequence.missing.clone(),
        spike_times: spikes.keys().cloned().collect(),
        diff_summary: DiffSummary {
            line_count: diff_lines.len(),
            has_diff: !diff_lines.is_empty(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::sequence::{check_sequence, EXPECTED_SEQUENCE};

    #[test]
    fn test_projection() {
        let sequence = check_sequence(&["Initialize"], EXPECTED_SEQUENCE);
        let mut spikes = SpikeResult::new();
        spikes.insert("2025-01-01 00:01".to_string(), 12);
        spikes.insert("2025-01-01 00:00".to_string(), 11);
        let diff = vec!["--- baseline".to_string(), "+++ target".to_string()];

        let summary = summarize_anomalies(&sequence, &spikes, &diff);
        assert_eq!(summary.sequence_status, SequenceStatus::Fail);
        assert_eq!(summary.missing_steps.len(), 4);
        assert_eq!(summary.spike_times, vec!["2025-01-01 00:00", "2025-01-01 00:01"]);
        assert_eq!(
            summary.diff_summary,
            DiffSummary {
                line_count: 2,
                has_diff: true
            }
        );
    }

    #[test]
    fn test_clean_run() {
        let sequence = check_sequence(&EXPECTED_SEQUENCE.to_vec(), EXPECTED_SEQUENCE);
        let summary = summarize_anomalies(&sequence, &SpikeResult::new(), &[]);
        assert_eq!(summary.sequence_status, SequenceStatus::Pass);
        assert!(summary.missing_steps.is_empty());
        assert!(summary.spike_times.is_empty());
        assert!(!summary.diff_summary.has_diff);
    }

    #[test]
    fn test_json_shape() {
        let sequence = check_sequence(&["Complete"], &["Complete"]);
        let summary = summarize_anomalies(&sequence, &SpikeResult::new(), &[]);
        let json = serde_json::to_value(&summary).expect("serializable");
        assert_eq!(json["sequence_status"], "PASS");
        assert_eq!(json["diff_summary"]["line_count"], 0);
    }
}
