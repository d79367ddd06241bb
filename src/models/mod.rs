pub mod event;

pub use event::{Finding, FindingReason, LogLine, Outcome, ScanSummary};
