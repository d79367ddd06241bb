//! Scan orchestration
//!
//! Drives a fetched log through the detection engine and the reporter.

use std::io::{self, BufRead};
use thiserror::Error;

use crate::config::Config;
use crate::detection::DetectionEngine;
use crate::input::LineSource;
use crate::lookup::{LoadError, LookupSet};
use crate::models::{Finding, LogLine, ScanSummary};
use crate::output::{OutputError, OutputHandler};

/// Errors that abort a scan
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Error reading log: {0}")]
    Io(#[from] io::Error),

    #[error("Error writing results: {0}")]
    Output(#[from] OutputError),
}

/// Load both lookup lists named by `config` and build an engine over them
pub fn build_engine(config: &Config) -> Result<DetectionEngine, LoadError> {
    let authorized_users = LookupSet::load(&config.lookup.authorized_users)?;
    let banned_ips = LookupSet::load(&config.lookup.banned_ips)?;
    Ok(DetectionEngine::with_config(
        authorized_users,
        banned_ips,
        &config.detection,
    ))
}

/// Classify every data line of `reader` in order, report each hacking
/// attempt, and finish with the summary line.
pub fn scan<R: BufRead>(
    reader: R,
    engine: &mut DetectionEngine,
    output: &mut OutputHandler,
) -> Result<ScanSummary, ScanError> {
    let mut summary = ScanSummary::default();

    for text in LineSource::new(reader) {
        let text = text?;
        let outcome = engine.classify(&text);
        summary.record(outcome);

        let line = LogLine::new(&text);
        log::debug!(
            "Line {}: user '{}' -> {:?}",
            summary.lines_processed,
            line.user(),
            outcome
        );

        let timestamp = engine.timestamp_of(&line);
        if let Some(finding) =
            Finding::from_outcome(outcome, summary.lines_processed, &line, timestamp)
        {
            output.write_finding(&finding)?;
        }
    }

    output.write_summary(&summary)?;
    output.flush()?;

    log::info!(
        "Processed {} lines, {} possible hacking attempts, {} user(s) flagged",
        summary.lines_processed,
        summary.hacking_attempts,
        engine.flagged_count()
    );
    Ok(summary)
}
