//! What the rules did not catch: unmatched lines and rule candidates.

pub mod suggest;
pub mod unmatched;

pub use suggest::{PatternSuggester, Suggestion, TemplateSuggester};
pub use unmatched::{collect_unmatched, save_unmatched};
