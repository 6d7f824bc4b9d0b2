use serde::{Deserialize, Serialize};
use std::fmt;

/// Milestones a healthy run is expected to log, in order.
pub const EXPECTED_SEQUENCE: &[&str] = &[
    "Initialize",
    "Load Config",
    "Validate Settings",
    "Start Services",
    "Complete",
];

/// Events a healthy install or boot is expected to log.
pub const EXPECTED_EVENTS: &[&str] = &[
    "System Ready",
    "Driver Initialized",
    "Self-Test Passed",
    "Install Success",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SequenceStatus {
    Pass,
    Fail,
}

impl fmt::Display for SequenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceResult {
    pub observed: Vec<String>,
    pub missing: Vec<String>,
    pub status: SequenceStatus,
}

fn seen_anywhere<S: AsRef<str>>(needle: &str, lines: &[S]) -> bool {
    lines.iter().any(|line| line.as_ref().contains(needle))
}

/// Check which milestones appear in the log.
///
/// Presence only: a milestone counts as observed if any line contains it,
/// wherever that line is. Both output lists keep milestone order.
pub fn check_sequence<S, M>(lines: &[S], milestones: &[M]) -> SequenceResult
where
    S: AsRef<str>,
    M: AsRef<str>,
{
    let (observed, missing): (Vec<String>, Vec<String>) = milestones
        .iter()
        .map(|m| m.as_ref().to_string())
        .partition(|m| seen_anywhere(m, lines));

    let status = if missing.is_empty() {
        SequenceStatus::Pass
    } else {
        SequenceStatus::Fail
    };

    SequenceResult {
        observed,
        missing,
        status,
    }
}

/// Expected events not found in any line, in list order.
pub fn find_missing_events<S, E>(lines: &[S], events: &[E]) -> Vec<String>
where
    S: AsRef<str>,
    E: AsRef<str>,
{
    events
        .iter()
        .map(|event| event.as_ref())
        .filter(|event| !seen_anywhere(event, lines))
        .map(str::to_string)
        .collect()
}
