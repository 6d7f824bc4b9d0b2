use crate::core::RuleSet;
use serde::Serialize;

/// A rule hit on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// 1-based position in the matched sequence
    pub line: usize,
    pub pattern: String,
    pub content: String,
}

/// Tag every line with every rule it matches.
///
/// Rules are tried in label order, so a line hit by several rules yields
/// its matches in that order. Each hit is an independent finding.
pub fn match_signatures<S: AsRef<str>>(lines: &[S], rules: &RuleSet) -> Vec<Match> {
    profiling::scope!("match_signatures");
    let mut matches = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        for label in rules.matching_labels(line) {
            matches.push(Match {
                line: idx + 1,
                pattern: label.to_string(),
                content: line.trim().to_string(),
            });
        }
    }
    matches
}
