use regex::Regex;
use std::fmt;

use super::http_fetcher::FetchError;

/// Port used when the URL names none
pub const DEFAULT_PORT: u16 = 80;
/// Path used when the URL names none
pub const DEFAULT_PATH: &str = "/";

/// Host, port and path of a log URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl UrlParts {
    /// Split `url` into host, port and path.
    ///
    /// The scheme is optional and ignored. Port defaults to 80 and path to
    /// `/`. A URL with no host is rejected before any connection is made.
    pub fn parse(url: &str) -> Result<Self, FetchError> {
        let pattern = Regex::new(r"^([^/:?#\s]+)(?::([^/]*))?(/\S*)?$")?;
        let caps = pattern
            .captures(strip_scheme(url.trim()))
            .ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;

        let host = caps[1].to_string();
        let port = match caps.get(2) {
            Some(port) => port
                .as_str()
                .parse::<u16>()
                .map_err(|_| FetchError::InvalidPort(port.as_str().to_string()))?,
            None => DEFAULT_PORT,
        };
        let path = caps
            .get(3)
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());

        Ok(UrlParts { host, port, path })
    }

    /// `host:port`, suitable for opening a connection
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Drop a leading `scheme://`, if any
fn strip_scheme(url: &str) -> &str {
    match url.find("://") {
        Some(end)
            if end > 0
                && url[..end]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-')) =>
        {
            &url[end + 3..]
        }
        _ => url,
    }
}

impl fmt::Display for UrlParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}:{}{}", self.host, self.port, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        let parts = UrlParts::parse("http://ceclnx01.cec.miamioh.edu:8080/~raodm/ssh_logs/full_logs.txt").unwrap();
        assert_eq!(parts.host, "ceclnx01.cec.miamioh.edu");
        assert_eq!(parts.port, 8080);
        assert_eq!(parts.path, "/~raodm/ssh_logs/full_logs.txt");
    }

    #[test]
    fn test_default_port() {
        let parts = UrlParts::parse("http://example.com/logs.txt").unwrap();
        assert_eq!(parts.port, 80);
        assert_eq!(parts.authority(), "example.com:80");
    }

    #[test]
    fn test_default_path() {
        let parts = UrlParts::parse("http://example.com").unwrap();
        assert_eq!(parts.path, "/");
        let parts = UrlParts::parse("http://example.com:81").unwrap();
        assert_eq!(parts.port, 81);
        assert_eq!(parts.path, "/");
    }

    #[test]
    fn test_scheme_is_optional() {
        let parts = UrlParts::parse("localhost:9000/a/b").unwrap();
        assert_eq!(parts.host, "localhost");
        assert_eq!(parts.port, 9000);
        assert_eq!(parts.path, "/a/b");
    }

    #[test]
    fn test_query_kept_in_path() {
        let parts = UrlParts::parse("http://example.com/logs?day=10").unwrap();
        assert_eq!(parts.path, "/logs?day=10");
    }

    #[test]
    fn test_invalid_urls() {
        assert!(matches!(UrlParts::parse(""), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(UrlParts::parse("http:///logs"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(UrlParts::parse("http://a b/logs"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(
            UrlParts::parse("http://example.com:http/logs"),
            Err(FetchError::InvalidPort(_))
        ));
        assert!(matches!(
            UrlParts::parse("http://example.com:70000/"),
            Err(FetchError::InvalidPort(_))
        ));
    }

    #[test]
    fn test_scheme_like_text_in_path_is_kept() {
        let parts = UrlParts::parse("example.com/redirect?to=http://other").unwrap();
        assert_eq!(parts.host, "example.com");
        assert_eq!(parts.path, "/redirect?to=http://other");
    }

    #[test]
    fn test_display() {
        let parts = UrlParts::parse("example.com/x").unwrap();
        assert_eq!(parts.to_string(), "http://example.com:80/x");
    }
}
