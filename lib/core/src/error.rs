use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Callers match on these —
// never on the human-readable message string.

/// Stable error code constants.
pub mod error_code {
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const API_ERROR: &str = "API_ERROR";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CONFLICT: &str = "CONFLICT";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

// ── Error ───────────────────────────────────────────────────────────

/// Unified error type used across the engine crates.
///
/// The taxonomy follows the three failure classes the record screens
/// distinguish: validation (blocked before any network call), server
/// rejections (the server's message verbatim), and transport failures.
#[derive(Error, Debug)]
pub enum Error {
    /// One or more required fields are blank. Carries the field labels.
    /// Raised before any network request is issued.
    #[error("please fill all required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The server rejected the request. Message is the server's own.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never completed (connection refused, timeout, bad body).
    #[error("{0}")]
    Transport(String),

    /// An exact-match lookup found nothing.
    #[error("{0}")]
    NotFound(String),

    /// A versioned read went stale underneath a pending write.
    #[error("{0}")]
    Conflict(String),

    /// Client configuration problem (missing context, no server URL, ...).
    #[error("{0}")]
    Config(String),
}

impl Error {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation(_) => error_code::VALIDATION_FAILED,
            Error::Api { .. } => error_code::API_ERROR,
            Error::Transport(_) => error_code::TRANSPORT_ERROR,
            Error::NotFound(_) => error_code::NOT_FOUND,
            Error::Conflict(_) => error_code::CONFLICT,
            Error::Config(_) => error_code::CONFIG_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_mapping() {
        assert_eq!(Error::Validation(vec![]).error_code(), "VALIDATION_FAILED");
        assert_eq!(
            Error::Api { status: 500, message: "x".into() }.error_code(),
            "API_ERROR"
        );
        assert_eq!(Error::Transport("x".into()).error_code(), "TRANSPORT_ERROR");
        assert_eq!(Error::NotFound("x".into()).error_code(), "NOT_FOUND");
        assert_eq!(Error::Conflict("x".into()).error_code(), "CONFLICT");
        assert_eq!(Error::Config("x".into()).error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn validation_lists_labels() {
        let err = Error::Validation(vec!["Transfer Date".into(), "Batch Name".into()]);
        assert_eq!(
            err.to_string(),
            "please fill all required fields: Transfer Date, Batch Name"
        );
    }

    #[test]
    fn api_display_is_server_message() {
        let err = Error::Api { status: 400, message: "duplicate batch code".into() };
        assert_eq!(err.to_string(), "duplicate batch code");
    }
}
