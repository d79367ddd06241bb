pub mod engine;
pub mod login_history;
pub mod timestamp;

pub use engine::DetectionEngine;
pub use login_history::LoginHistory;
pub use timestamp::to_seconds;
