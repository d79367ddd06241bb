use serde::{Deserialize, Serialize};

/// Marker that tags sshd log lines; the user identifier sits just past it.
const SSHD_TAG: &str = "sshd";
/// Distance from the start of the tag to the user identifier.
const USER_OFFSET: usize = 5;
/// Offset used when a line carries no tag at all.
const UNTAGGED_USER_OFFSET: usize = 4;
/// Width of the user identifier.
const USER_WIDTH: usize = 5;
/// Width of the "Mon DD HH:MM:SS" prefix.
const TIMESTAMP_WIDTH: usize = 15;
/// Marker of a failed login attempt.
const FAILED_MARKER: &str = "Failed";

/// A single raw log line and the fields the detection rules read from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    text: &'a str,
}

impl<'a> LogLine<'a> {
    pub fn new(text: &'a str) -> Self {
        LogLine { text }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The five bytes that follow `"sshd"` plus the offset.
    ///
    /// Lines without the tag read from offset 4 instead. A line too short for
    /// the offset yields an empty identifier.
    pub fn user(&self) -> String {
        let start = match self.text.find(SSHD_TAG) {
            Some(pos) => pos + USER_OFFSET,
            None => UNTAGGED_USER_OFFSET,
        };
        let bytes = self.text.as_bytes();
        if start >= bytes.len() {
            return String::new();
        }
        let end = (start + USER_WIDTH).min(bytes.len());
        String::from_utf8_lossy(&bytes[start..end]).into_owned()
    }

    /// Leading timestamp field, e.g. `"Jun 10 03:32:36"`
    pub fn timestamp_field(&self) -> &'a str {
        match self.text.char_indices().nth(TIMESTAMP_WIDTH) {
            Some((end, _)) => &self.text[..end],
            None => self.text,
        }
    }

    /// True iff the line contains `"Failed"` anywhere
    pub fn is_failed(&self) -> bool {
        self.text.contains(FAILED_MARKER)
    }

    /// True iff any token of `tokens` occurs in the line as a substring
    pub fn mentions_any<'t, I>(&self, tokens: I) -> bool
    where
        I: IntoIterator<Item = &'t str>,
    {
        tokens.into_iter().any(|token| self.text.contains(token))
    }
}

/// Classification of one log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// An authorized identifier appears in the line; no other rule applies
    Authorized,
    /// A banned address token appears in the line
    BannedIp,
    /// The user was flagged by an earlier frequency breach
    AlreadyFlagged,
    /// This line completed a run of close-together failed attempts
    FrequencyBreach,
    /// Nothing suspicious
    Benign,
}

impl Outcome {
    /// Banned, already flagged and frequency outcomes count as hacking attempts
    pub fn is_hacking(&self) -> bool {
        matches!(
            self,
            Outcome::BannedIp | Outcome::AlreadyFlagged | Outcome::FrequencyBreach
        )
    }
}

/// Why a line was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingReason {
    BannedIp,
    AlreadyFlagged,
    Frequency,
}

/// A reported hacking attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// 1-based position among processed data lines
    pub line_number: usize,
    pub user: String,
    pub reason: FindingReason,
    /// Parsed timestamp of the line, seconds since the Unix epoch
    pub timestamp: i64,
    pub line: String,
}

impl Finding {
    /// Build a finding for a hacking outcome; `None` for the others
    pub fn from_outcome(
        outcome: Outcome,
        line_number: usize,
        line: &LogLine<'_>,
        timestamp: i64,
    ) -> Option<Self> {
        let reason = match outcome {
            Outcome::BannedIp => FindingReason::BannedIp,
            Outcome::AlreadyFlagged => FindingReason::AlreadyFlagged,
            Outcome::FrequencyBreach => FindingReason::Frequency,
            Outcome::Authorized | Outcome::Benign => return None,
        };
        Some(Finding {
            line_number,
            user: line.user(),
            reason,
            timestamp,
            line: line.text().to_string(),
        })
    }
}

/// Running counters for a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub lines_processed: usize,
    pub hacking_attempts: usize,
    pub authorized: usize,
    pub banned_ip: usize,
    pub already_flagged: usize,
    pub frequency: usize,
    pub benign: usize,
}

impl ScanSummary {
    /// Count one processed line with its outcome
    pub fn record(&mut self, outcome: Outcome) {
        self.lines_processed += 1;
        match outcome {
            Outcome::Authorized => self.authorized += 1,
            Outcome::BannedIp => self.banned_ip += 1,
            Outcome::AlreadyFlagged => self.already_flagged += 1,
            Outcome::FrequencyBreach => self.frequency += 1,
            Outcome::Benign => self.benign += 1,
        }
        if outcome.is_hacking() {
            self.hacking_attempts += 1;
        }
    }
}
