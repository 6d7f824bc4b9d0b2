use serde::Serialize;

pub const UNKNOWN_EXCEPTION: &str = "Unknown Exception";
pub const NO_FRAME: &str = "No frame detected";

/// Headline and innermost frame of a stack trace entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackSummary {
    pub summary: String,
    pub top_frame: String,
}

impl StackSummary {
    /// Whether an exception or error line was found at all.
    pub fn has_exception(&self) -> bool {
        self.summary != UNKNOWN_EXCEPTION
    }
}

/// Summarize a (usually reassembled) multi-line entry.
///
/// `summary` is the first line mentioning `Exception` or `Error`
/// (case-sensitive), `top_frame` the first line starting with `at ` once
/// trimmed. Later candidates are ignored.
pub fn summarize_stack_trace(entry: &str) -> StackSummary {
    let summary = entry
        .split('\n')
        .find(|line| line.contains("Exception") || line.contains("Error"))
        .map_or(UNKNOWN_EXCEPTION, str::trim);

    let top_frame = entry
        .split('\n')
        .map(str::trim)
        .find(|line| line.starts_with("at "))
        .unwrap_or(NO_FRAME);

    StackSummary {
        summary: summary.to_string(),
        top_frame: top_frame.to_string(),
    }
}
