use crate::core::RuleSet;
use serde::Serialize;

/// One rule hit from [`parse_text_log`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub pattern: String,
    pub matched: String,
}

/// Tag plain text lines with every rule they match.
///
/// Unlike the signature matcher this keeps no line numbers and leaves the
/// matched text as it was, which is what rule authors want when checking a
/// new rule file against a sample log.
pub fn parse_text_log<S: AsRef<str>>(lines: &[S], rules: &RuleSet) -> Vec<RuleHit> {
    let mut hits = Vec::new();
    for line in lines {
        let line = line.as_ref();
        for label in rules.matching_labels(line) {
            hits.push(RuleHit {
                pattern: label.to_string(),
                matched: line.to_string(),
            });
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_hits_are_reported() {
        let rules = RuleSet::new([
            ("login_failure", "Failed login for user .*"),
            ("timeout_error", r"Request timed out after \d+ ms"),
        ])
        .expect("valid rules");
        let lines = [
            "  Failed login for user [REDACTED_USERNAME]",
            "Request timed out after 300 ms",
            "ok",
        ];
        let hits = parse_text_log(&lines, &rules);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].pattern, "login_failure");
        assert_eq!(hits[0].matched, "  Failed login for user [REDACTED_USERNAME]");
        assert_eq!(hits[1].pattern, "timeout_error");
    }
}
