pub mod analyzer;
pub mod bundle;
pub mod pattern_rule;
pub mod report;

pub use analyzer::{Analyzer, NormalizedLog};
pub use bundle::{AnalysisBundle, RcaFinding, SourceReport};
pub use pattern_rule::{PatternRule, RuleSet};
