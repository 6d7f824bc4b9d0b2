use super::bundle::{AnalysisBundle, SourceReport};
use std::fmt::Write;

const RULE: &str = "============================================================";

/// Plain-text rendering of one bundle, for reading in a terminal.
pub fn render_text(bundle: &AnalysisBundle) -> String {
    let mut out = String::new();
    let summary = &bundle.anomaly_summary;

    // Writing into a String cannot fail
    let _ = writeln!(out, "RcaCrab Report - {}", bundle.source);
    let _ = writeln!(out, "{RULE}");

    let _ = writeln!(out, "\nRCA Findings:");
    for finding in &bundle.rca_findings {
        let _ = writeln!(
            out,
            "- Line {} | Pattern: {} | Cause: {}",
            finding.line, finding.pattern, finding.rca
        );
        if let Some(exception) = &finding.exception_summary {
            let _ = writeln!(out, "  -> {exception}");
        }
        if let Some(frame) = &finding.top_frame {
            let _ = writeln!(out, "     {frame}");
        }
    }

    let _ = writeln!(out, "\nAnomaly Summary:");
    let _ = writeln!(out, "- Sequence Check: {}", summary.sequence_status);
    let _ = writeln!(out, "- Missing Steps: {}", summary.missing_steps.join(", "));
    let _ = writeln!(out, "- Spikes: {}", summary.spike_times.join(", "));
    let _ = writeln!(out, "- Diff Count: {}", summary.diff_summary.line_count);

    if !bundle.missing_events.is_empty() {
        let _ = writeln!(out, "- Missing Events: {}", bundle.missing_events.join(", "));
    }
    if !bundle.installer_errors.is_empty() {
        let _ = writeln!(out, "\nInstaller Errors:");
        for error in &bundle.installer_errors {
            let code = error.error_code.as_deref().unwrap_or("-");
            let _ = writeln!(out, "- Line {} | Code: {code} | {}", error.line, error.raw);
        }
    }

    let _ = writeln!(out, "\nUnmatched Logs: {}", bundle.unmatched_count);
    for suggestion in &bundle.suggestions {
        let _ = writeln!(
            out,
            "- Suggested template ({}x): {}",
            suggestion.occurrences, suggestion.template
        );
    }
    out
}

/// Text rendering of a batch; failed sources get a one-line entry.
pub fn render_text_batch(reports: &[SourceReport]) -> String {
    reports
        .iter()
        .map(|report| match report {
            SourceReport::Analyzed(bundle) => render_text(bundle),
            SourceReport::Failed { source, error } => {
                format!("RcaCrab Report - {source}\n{RULE}\nFailed: {error}\n")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::{summarize_anomalies, RootCauseLabel, SequenceStatus};
    use crate::anomaly::sequence::SequenceResult;
    use crate::core::bundle::RcaFinding;
    use crate::parser::SourceKind;

    fn bundle() -> AnalysisBundle {
        let sequence = SequenceResult {
            observed: vec!["Initialize".to_string()],
            missing: vec!["Complete".to_string()],
            status: SequenceStatus::Fail,
        };
        AnalysisBundle {
            source: "setup.log".to_string(),
            kind: SourceKind::Generic,
            rca_findings: vec![RcaFinding {
                line: 12,
                pattern: "null_ref".to_string(),
                rca: RootCauseLabel::CodeDefect,
                exception_summary: Some("NullReferenceException: x is null".to_string()),
                top_frame: Some("at Foo.Bar()".to_string()),
            }],
            anomaly_summary: summarize_anomalies(&sequence, &Default::default(), &[]),
            unmatched_count: 7,
            installer_errors: Vec::new(),
            missing_events: Vec::new(),
            suggestions: Vec::new(),
            unmatched: Vec::new(),
        }
    }

    #[test]
    fn test_text_report() {
        let text = render_text(&bundle());
        assert!(text.starts_with("RcaCrab Report - setup.log\n"));
        assert!(text.contains("- Line 12 | Pattern: null_ref | Cause: Code Defect"));
        assert!(text.contains("  -> NullReferenceException: x is null"));
        assert!(text.contains("- Sequence Check: FAIL"));
        assert!(text.contains("- Missing Steps: Complete"));
        assert!(text.contains("Unmatched Logs: 7"));
        assert!(!text.contains("Installer Errors"));
    }

    #[test]
    fn test_failed_source() {
        let reports = vec![SourceReport::Failed {
            source: "gone.log".to_string(),
            error: "cannot read gone.log: not found".to_string(),
        }];
        assert!(render_text_batch(&reports).contains("Failed: cannot read gone.log"));
    }
}
