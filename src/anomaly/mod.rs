pub mod diff;
pub mod rca;
pub mod sequence;
pub mod signature;
pub mod spike;
pub mod stack;
pub mod summary;

pub use diff::compare_logs;
pub use rca::{classify_root_cause, RcaClassifier, RootCauseLabel};
pub use sequence::{check_sequence, find_missing_events, SequenceResult, SequenceStatus};
pub use signature::{match_signatures, Match};
pub use spike::{detect_spikes, SpikeResult};
pub use stack::{summarize_stack_trace, StackSummary};
pub use summary::{summarize_anomalies, AnomalySummary, DiffSummary};
