//! Error taxonomy for the portal handshake.

use reqwest::StatusCode;
use url::Url;

/// Errors surfaced by [`ZacClient`](crate::ZacClient) operations.
///
/// Every variant aborts the login chain where it occurs; the caller owns any
/// retry policy.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required credential field was empty at construction.
    #[error("invalid configuration: {0} is required")]
    Config(&'static str),

    /// The base URL override could not be parsed.
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// Network-level failure issuing a request or reading its response.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The portal answered with a status other than 200 OK or 302 Found.
    #[error("unexpected status {status} from {url}")]
    Status { url: Url, status: StatusCode },

    /// A header value could not be encoded on the wire.
    #[error("invalid value for header {0}")]
    Header(&'static str),

    /// The response body could not be decoded or queried.
    #[error("malformed response body: {0}")]
    Parse(String),

    /// An expected hidden form field was absent from the page.
    #[error("{0} not found")]
    MissingToken(&'static str),

    /// Writing a response body snapshot failed.
    #[error("failed to persist response snapshot: {0}")]
    Sink(#[from] std::io::Error),
}
