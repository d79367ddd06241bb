use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a break-in scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Lookup list locations
    pub lookup: LookupConfig,
    /// Detection rules configuration
    pub detection: DetectionConfig,
    /// Output configuration
    pub output: OutputConfig,
}

/// Paths of the two lookup lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Whitespace-separated user identifiers exempt from all rules
    pub authorized_users: PathBuf,
    /// Whitespace-separated address tokens that always flag a line
    pub banned_ips: PathBuf,
}

/// Frequency rule configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Consecutive attempts must be strictly closer than this many seconds
    pub window_seconds: i64,
    /// Number of close-together failed attempts that constitutes a breach
    pub failed_attempt_threshold: usize,
    /// Year assumed for log timestamps, which carry none
    pub reference_year: i32,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "console", "json", or "jsonl"
    pub format: String,
    /// Output file path; stdout when absent
    pub file_path: Option<PathBuf>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            window_seconds: 20,
            failed_attempt_threshold: 3,
            reference_year: 2021,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lookup: LookupConfig {
                authorized_users: PathBuf::from("authorized_users.txt"),
                banned_ips: PathBuf::from("banned_ips.txt"),
            },
            detection: DetectionConfig::default(),
            output: OutputConfig {
                format: "console".to_string(),
                file_path: None,
            },
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from `path`, or fall back to defaults when the file is missing
    pub fn load_or_default(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        if path.exists() {
            Config::from_file(path)
        } else {
            log::warn!("Config file {:?} not found, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_fixed_rule() {
        let config = Config::default();
        assert_eq!(config.detection.window_seconds, 20);
        assert_eq!(config.detection.failed_attempt_threshold, 3);
        assert_eq!(config.detection.reference_year, 2021);
        assert_eq!(config.output.format, "console");
        assert!(config.output.file_path.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("breakin.toml");

        let mut config = Config::default();
        config.detection.window_seconds = 30;
        config.output.format = "jsonl".to_string();
        config.to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_parse_handwritten_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("breakin.toml");
        std::fs::write(
            &path,
            r#"
[lookup]
authorized_users = "/etc/breakin/users"
banned_ips = "/etc/breakin/ips"

[detection]
window_seconds = 10
failed_attempt_threshold = 5
reference_year = 2023

[output]
format = "json"
file_path = "out.json"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.lookup.banned_ips, PathBuf::from("/etc/breakin/ips"));
        assert_eq!(config.detection.failed_attempt_threshold, 5);
        assert_eq!(config.output.file_path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[detection\nwindow_seconds = ").unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }
}
