// ── Core error types ──
//
// Errors surfaced to panels and the UI. The `From<minisoc_api::Error>` impl
// folds transport-layer failures into the few cases a panel distinguishes.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    /// The startup probe failed. Fatal to the dashboard session.
    #[error("Cannot reach backend at {url}: {reason}")]
    BackendUnreachable { url: String, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    /// A request failed in transport or returned a non-2xx status.
    #[error("{message}")]
    Api {
        message: String,
        /// HTTP status code (if the server answered).
        status: Option<u16>,
    },

    /// The backend answered 2xx with a body we could not read.
    #[error("Unexpected response from backend: {message}")]
    Decode { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<minisoc_api::Error> for CoreError {
    fn from(err: minisoc_api::Error) -> Self {
        match err {
            minisoc_api::Error::Network(_) | minisoc_api::Error::HttpStatus { .. } => {
                CoreError::Api {
                    status: err.status(),
                    message: err.to_string(),
                }
            }
            minisoc_api::Error::Decode { message, body: _ } => CoreError::Decode { message },
            minisoc_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            minisoc_api::Error::Client(message) => CoreError::Config { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_keeps_dashboard_message() {
        let err: CoreError = minisoc_api::Error::HttpStatus {
            status: 502,
            body: "bad gateway".into(),
        }
        .into();
        assert_eq!(err.to_string(), "HTTP error! status: 502");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn decode_drops_raw_body() {
        let err: CoreError = minisoc_api::Error::Decode {
            message: "expected value at line 1".into(),
            body: "<html>".into(),
        }
        .into();
        assert_eq!(
            err,
            CoreError::Decode {
                message: "expected value at line 1".into()
            }
        );
    }
}
