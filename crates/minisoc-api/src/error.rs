use thiserror::Error;

/// Top-level error type for the `minisoc-api` crate.
///
/// Every backend call resolves to one of three outcomes the dashboard cares
/// about: the request never completed (`Network`), the server answered with
/// a non-2xx status (`HttpStatus`), or the body could not be decoded
/// (`Decode`). `minisoc-core` maps these into panel error states.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// DNS failure, refused connection, timeout, or a dropped body stream.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error while joining an endpoint onto the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    // ── HTTP ────────────────────────────────────────────────────────
    /// The server responded with a status outside 200..300.
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// The body was not JSON, or did not match the expected shape.
    #[error("Decode error: {message}")]
    Decode { message: String, body: String },
}

impl Error {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the next poll has a reasonable chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
