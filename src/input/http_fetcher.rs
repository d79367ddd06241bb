//! One-shot log fetch
//!
//! Issues a minimal HTTP GET over a raw TCP stream and returns the whole
//! response, status line and headers included. The header block is left for
//! [`LineSource`](super::LineSource) to skip.

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use super::url::UrlParts;

/// Errors that can occur while locating or fetching the log
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid port in URL: {0}")]
    InvalidPort(String),

    #[error("URL pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The GET request sent for `parts`
pub fn request_text(parts: &UrlParts) -> String {
    format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: Close\r\n\r\n",
        parts.path, parts.host
    )
}

/// Send the GET request on `stream` and read the raw response to end of stream
pub async fn request<S>(stream: &mut S, parts: &UrlParts) -> Result<Vec<u8>, FetchError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(request_text(parts).as_bytes()).await?;
    stream.flush().await?;

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await?;
    Ok(response)
}

/// Connect to the host named by `parts` and fetch the raw response
pub async fn fetch(parts: &UrlParts) -> Result<Vec<u8>, FetchError> {
    let address = parts.authority();
    log::info!("Fetching {}", parts);

    let mut stream = TcpStream::connect(address.as_str())
        .await
        .map_err(|source| FetchError::Connect {
            address: address.clone(),
            source,
        })?;
    let response = request(&mut stream, parts).await?;

    log::info!("Received {} bytes from {}", response.len(), address);
    Ok(response)
}
