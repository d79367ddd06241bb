pub mod config;
pub mod detection;
pub mod input;
pub mod lookup;
pub mod models;
pub mod output;
pub mod scan;

// Re-export commonly used types
pub use config::Config;
pub use detection::{DetectionEngine, LoginHistory};
pub use input::{FetchError, LineSource, UrlParts};
pub use lookup::{LoadError, LookupSet};
pub use models::{Finding, LogLine, Outcome, ScanSummary};
pub use output::{OutputFormat, OutputHandler};
pub use scan::{build_engine, scan, ScanError};
