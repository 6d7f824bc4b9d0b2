use crate::anomaly::{AnomalySummary, RootCauseLabel};
use crate::feedback::Suggestion;
use crate::parser::installer::InstallerError;
use crate::parser::SourceKind;
use serde::Serialize;

/// A signature hit, classified and (when it carries a trace) summarized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RcaFinding {
    /// Source line the matched entry starts on
    pub line: usize,
    pub pattern: String,
    pub rca: RootCauseLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_frame: Option<String>,
}

/// Everything one run found in one source.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisBundle {
    pub source: String,
    pub kind: SourceKind,
    pub rca_findings: Vec<RcaFinding>,
    pub anomaly_summary: AnomalySummary,
    pub unmatched_count: usize,
    pub installer_errors: Vec<InstallerError>,
    pub missing_events: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
    /// Written to the unmatched-lines file, not to the report
    #[serde(skip)]
    pub unmatched: Vec<String>,
}

/// Outcome for one source of a batch.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SourceReport {
    Analyzed(Box<AnalysisBundle>),
    Failed { source: String, error: String },
}

impl SourceReport {
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Analyzed(bundle) => &bundle.source,
            Self::Failed { source, .. } => source,
        }
    }
}
