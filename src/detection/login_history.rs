//! Per-user login windows for the frequency rule
//!
//! Each user keeps the most recent contiguous run of login attempts. The run
//! is collapsed to its newest attempt whenever the current line is not a
//! failure or two neighbouring attempts are too far apart, so the newest
//! attempt always seeds the next window.

use std::collections::HashMap;

/// A recorded login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Attempt {
    at: i64,
    failed: bool,
}

/// Run of recent attempts for one user
#[derive(Debug, Clone, Default)]
struct WindowEntry {
    attempts: Vec<Attempt>,
}

impl WindowEntry {
    /// Keep only the newest attempt
    fn collapse_to_latest(&mut self) {
        if let Some(latest) = self.attempts.pop() {
            self.attempts.clear();
            self.attempts.push(latest);
        }
    }

    /// Failed attempts counted from the head of the run
    fn head_streak(&self) -> usize {
        self.attempts.first().map_or(0, |a| usize::from(a.failed))
    }

    /// Walk neighbouring pairs and report whether `threshold` close-together
    /// failures have been seen.
    fn scan(&mut self, line_failed: bool, window_seconds: i64, threshold: usize) -> bool {
        let mut streak = self.head_streak();
        let mut i = 0;
        while i + 1 < self.attempts.len() {
            let prev = self.attempts[i];
            let next = self.attempts[i + 1];
            if (next.at - prev.at).abs() < window_seconds && line_failed {
                if next.failed {
                    streak += 1;
                }
            } else {
                self.collapse_to_latest();
                streak = self.head_streak();
            }

            if streak >= threshold {
                // Slide forward so the next attempt is not flagged on stale data
                self.attempts.remove(0);
                return true;
            }
            i += 1;
        }
        false
    }
}

/// Tracks recent login attempts per user and detects frequency breaches
#[derive(Debug, Clone)]
pub struct LoginHistory {
    per_user: HashMap<String, WindowEntry>,
    /// Neighbouring attempts must be strictly closer than this (default: 20)
    window_seconds: i64,
    /// Close-together failures that constitute a breach (default: 3)
    threshold: usize,
}

impl LoginHistory {
    /// Create a history with the default 20 second window and threshold of 3
    pub fn new() -> Self {
        Self::with_config(20, 3)
    }

    /// Create with a custom window and threshold; thresholds below 2 are raised to 2
    pub fn with_config(window_seconds: i64, threshold: usize) -> Self {
        LoginHistory {
            per_user: HashMap::new(),
            window_seconds,
            threshold: threshold.max(2),
        }
    }

    /// Record an attempt by `user` at `timestamp` and report whether it
    /// completes a frequency breach.
    ///
    /// `failed` is whether the current line is a failed attempt. A first
    /// attempt, or a run shorter than the threshold, never breaches.
    pub fn record(&mut self, user: &str, timestamp: i64, failed: bool) -> bool {
        let entry = self.per_user.entry(user.to_string()).or_default();
        entry.attempts.push(Attempt {
            at: timestamp,
            failed,
        });

        if entry.attempts.len() < self.threshold {
            return false;
        }
        entry.scan(failed, self.window_seconds, self.threshold)
    }

    /// Timestamps currently retained for `user`, oldest first
    pub fn timestamps(&self, user: &str) -> Vec<i64> {
        self.per_user
            .get(user)
            .map(|e| e.attempts.iter().map(|a| a.at).collect())
            .unwrap_or_default()
    }

    /// Number of attempts currently retained for `user`
    pub fn len(&self, user: &str) -> usize {
        self.per_user.get(user).map_or(0, |e| e.attempts.len())
    }

    /// Clear all tracking data
    pub fn clear_all(&mut self) {
        self.per_user.clear();
    }
}

impl Default for LoginHistory {
    fn default() -> Self {
        Self::new()
    }
}
