//! Lookup lists
//!
//! Loads the authorized-user and banned-IP lists. Both are flat files of
//! whitespace-separated tokens; every token is kept verbatim, with no
//! comment syntax and no validation as an address or identifier.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a lookup list
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Error opening file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable set of tokens used for substring matching against log lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupSet {
    entries: HashSet<String>,
}

impl LookupSet {
    /// An empty set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a set from a file of whitespace-separated tokens
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_reader(BufReader::new(file)).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded {} entries from {:?}", set.len(), path);
        Ok(set)
    }

    /// Read every whitespace-separated token from `reader`
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut entries = HashSet::new();
        for line in reader.lines() {
            entries.extend(line?.split_whitespace().map(str::to_string));
        }
        Ok(LookupSet { entries })
    }

    /// Build a set from whitespace-separated tokens already in memory
    pub fn parse(content: &str) -> Self {
        LookupSet {
            entries: content.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LookupSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        LookupSet {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_arbitrary_whitespace() {
        let set = LookupSet::parse("  1.2.3.4\t5.6.7.8\n\n9.9.9.9   1.2.3.4\r\n");
        assert_eq!(set.len(), 3);
        assert!(set.contains("1.2.3.4"));
        assert!(set.contains("9.9.9.9"));
        assert!(!set.contains("1.2.3"));
    }

    #[test]
    fn test_tokens_kept_verbatim() {
        let set = LookupSet::parse("not-an-ip # 22311");
        assert!(set.contains("not-an-ip"));
        assert!(set.contains("#"));
        assert!(set.contains("22311"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "12345 67890").unwrap();
        writeln!(file, "24680").unwrap();

        let set = LookupSet::load(file.path()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("24680"));
    }

    #[test]
    fn test_load_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let set = LookupSet::load(file.path()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banned_ips.txt");
        match LookupSet::load(&path) {
            Err(LoadError::Open { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected open error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_iterator() {
        let set: LookupSet = ["a", "b", "a"].into_iter().collect();
        assert_eq!(set.len(), 2);
        let mut tokens: Vec<&str> = set.iter().collect();
        tokens.sort();
        assert_eq!(tokens, vec!["a", "b"]);
    }
}
