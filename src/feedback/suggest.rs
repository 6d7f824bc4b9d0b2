use crate::parser::mask::{MaskRule, Masker};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::LazyLock;

/// Templates seen fewer times than this are not worth a rule.
pub const DEFAULT_MIN_COUNT: usize = 3;

static TEMPLATE_MASKER: LazyLock<Masker> = LazyLock::new(|| {
    Masker::new(vec![
        MaskRule::from_literal("num", r"\b\d+\b", "<NUM>"),
        MaskRule::from_literal("hex", r"[a-fA-F0-9]{8,}", "<HEX>"),
        MaskRule::from_literal("path", r"[A-Z]:\\[^\s]+", "<PATH>"),
    ])
});

/// A candidate rule derived from unmatched lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub template: String,
    pub occurrences: usize,
    pub example: String,
}

/// Turns the unmatched-line stream into rule candidates.
pub trait PatternSuggester: Send + Sync {
    fn suggest(&self, unmatched: &[String]) -> Vec<Suggestion>;
}

/// Groups lines that are identical once numbers, hex runs and Windows paths
/// are masked.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSuggester {
    pub min_count: usize,
}

impl TemplateSuggester {
    pub const fn new(min_count: usize) -> Self {
        Self { min_count }
    }

    pub fn template_of(line: &str) -> String {
        TEMPLATE_MASKER.apply(line)
    }
}

impl Default for TemplateSuggester {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_COUNT)
    }
}

impl PatternSuggester for TemplateSuggester {
    fn suggest(&self, unmatched: &[String]) -> Vec<Suggestion> {
        profiling::scope!("suggest_templates");
        // template -> (occurrences, first example), first-seen order
        let mut groups: IndexMap<String, (usize, &str)> = IndexMap::new();
        for line in unmatched {
            let entry = groups
                .entry(Self::template_of(line))
                .or_insert((0, line.trim()));
            entry.0 += 1;
        }

        let suggestions: Vec<Suggestion> = groups
            .into_iter()
            .filter(|(_, (count, _))| *count >= self.min_count)
            .map(|(template, (occurrences, example))| Suggestion {
                template,
                occurrences,
                example: example.to_string(),
            })
            .collect();

        tracing::debug!(
            "Suggested {} templates from {} unmatched lines",
            suggestions.len(),
            unmatched.len()
        );
        suggestions
    }
}
