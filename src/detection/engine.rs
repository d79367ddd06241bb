//! Break-in detection engine
//!
//! Classifies each log line against the lookup lists, the sticky per-user
//! flags and the frequency rule. Lines must be fed in source order; the
//! engine owns all mutable state and is not meant to be shared.

use std::collections::HashSet;

use super::login_history::LoginHistory;
use super::timestamp;
use crate::config::DetectionConfig;
use crate::lookup::LookupSet;
use crate::models::{LogLine, Outcome};

/// Stateful classifier for authentication log lines
pub struct DetectionEngine {
    authorized_users: LookupSet,
    banned_ips: LookupSet,
    /// Users flagged by a frequency breach; never shrinks
    flagged_users: HashSet<String>,
    history: LoginHistory,
    reference_year: i32,
}

impl DetectionEngine {
    /// Create an engine with the default frequency rule
    pub fn new(authorized_users: LookupSet, banned_ips: LookupSet) -> Self {
        Self::with_config(authorized_users, banned_ips, &DetectionConfig::default())
    }

    /// Create an engine with a custom frequency rule
    pub fn with_config(
        authorized_users: LookupSet,
        banned_ips: LookupSet,
        config: &DetectionConfig,
    ) -> Self {
        DetectionEngine {
            authorized_users,
            banned_ips,
            flagged_users: HashSet::new(),
            history: LoginHistory::with_config(
                config.window_seconds,
                config.failed_attempt_threshold,
            ),
            reference_year: config.reference_year,
        }
    }

    /// Classify the next line of the log.
    ///
    /// Rules are tried in order and the first match wins: authorized
    /// identifier, banned address, already flagged user, frequency breach.
    /// Both lookups are plain substring searches over the whole line.
    pub fn classify(&mut self, text: &str) -> Outcome {
        let line = LogLine::new(text);

        if line.mentions_any(self.authorized_users.iter()) {
            return Outcome::Authorized;
        }
        if line.mentions_any(self.banned_ips.iter()) {
            return Outcome::BannedIp;
        }

        let user = line.user();
        if self.flagged_users.contains(&user) {
            return Outcome::AlreadyFlagged;
        }

        if self.check_frequency(&line, &user) {
            log::debug!("User '{}' breached the frequency rule", user);
            self.flagged_users.insert(user);
            return Outcome::FrequencyBreach;
        }

        Outcome::Benign
    }

    /// Record the attempt in the user's window and report a breach
    fn check_frequency(&mut self, line: &LogLine<'_>, user: &str) -> bool {
        let at = self.timestamp_of(line);
        self.history.record(user, at, line.is_failed())
    }

    /// Parsed timestamp of a line under the configured reference year
    pub fn timestamp_of(&self, line: &LogLine<'_>) -> i64 {
        timestamp::to_seconds(line.timestamp_field(), self.reference_year)
    }

    /// Whether `user` has been flagged by a frequency breach
    pub fn is_flagged(&self, user: &str) -> bool {
        self.flagged_users.contains(user)
    }

    /// Number of flagged users
    pub fn flagged_count(&self) -> usize {
        self.flagged_users.len()
    }

    /// Timestamps retained in `user`'s window, oldest first
    pub fn history_of(&self, user: &str) -> Vec<i64> {
        self.history.timestamps(user)
    }
}
