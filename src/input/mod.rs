pub mod http_fetcher;
pub mod line_source;
pub mod url;

pub use http_fetcher::{fetch, request, FetchError};
pub use line_source::LineSource;
pub use url::UrlParts;
