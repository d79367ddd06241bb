use crate::models::{Finding, FindingReason, ScanSummary};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing results
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Output handler for findings and the final summary
pub struct OutputHandler {
    format: OutputFormat,
    writer: Box<dyn Write + Send>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Console,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "jsonl" => OutputFormat::Jsonl,
            "console" => OutputFormat::Console,
            _ => OutputFormat::Console, // Default
        }
    }
}

/// Wrapper that tags the summary record in JSON output
#[derive(Serialize)]
struct SummaryRecord<'a> {
    summary: &'a ScanSummary,
}

impl OutputHandler {
    /// Create a new output handler writing to `file_path` (appending) or stdout
    pub fn new(format: OutputFormat, file_path: Option<PathBuf>) -> Result<Self, OutputError> {
        let writer: Box<dyn Write + Send> = match file_path {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        Ok(Self::with_writer(format, writer))
    }

    /// Create a handler over an arbitrary sink
    pub fn with_writer(format: OutputFormat, writer: Box<dyn Write + Send>) -> Self {
        OutputHandler { format, writer }
    }

    /// Write one hacking finding
    pub fn write_finding(&mut self, finding: &Finding) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(finding)?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(finding)?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Console => {
                let cause = match finding.reason {
                    FindingReason::BannedIp | FindingReason::AlreadyFlagged => "banned IP",
                    FindingReason::Frequency => "frequency",
                };
                writeln!(self.writer, "Hacking due to {}. Line: {}", cause, finding.line)?;
            }
        }
        Ok(())
    }

    /// Write the end-of-stream summary
    pub fn write_summary(&mut self, summary: &ScanSummary) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&SummaryRecord { summary })?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(&SummaryRecord { summary })?;
                writeln!(self.writer, "{}", json)?;
            }
            OutputFormat::Console => {
                writeln!(
                    self.writer,
                    "Processed {} lines. Found {} possible hacking attempts.",
                    summary.lines_processed, summary.hacking_attempts
                )?;
            }
        }
        Ok(())
    }

    /// Flush any buffered output
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// Cloneable in-memory sink for inspecting handler output
    #[derive(Clone, Default)]
    pub struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
