use serde::{Deserialize, Serialize};

/// Unified error type for every call made against the Pinto API.
///
/// Each variant names the `operation` that failed (e.g. `"ZONE CREATE"`), so a
/// diagnostic shown to the operator always says which remote call broke.
/// Response bodies are kept verbatim for debugging.
///
/// The gateway never retries. Whatever the first attempt returns is what the
/// caller sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// The API answered with an HTTP status `>= 400`.
    Http {
        /// Operation that produced the error.
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Short description (status line).
        message: String,
        /// Drained response body.
        body: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    Network {
        /// Operation that produced the error.
        operation: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Operation that produced the error.
        operation: String,
        /// Error details.
        detail: String,
    },

    /// Fetching an OAuth access token failed.
    Authentication {
        /// Error details.
        detail: String,
        /// Response body of the token endpoint, if any.
        body: Option<String>,
    },

    /// Failed to parse the API response.
    Parse {
        /// Operation that produced the error.
        operation: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body or header.
    Serialization {
        /// Operation that produced the error.
        operation: String,
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ApiError {
    /// Operation that produced the error.
    pub fn operation(&self) -> &str {
        match self {
            Self::Http { operation, .. }
            | Self::Network { operation, .. }
            | Self::Timeout { operation, .. }
            | Self::Parse { operation, .. }
            | Self::Serialization { operation, .. } => operation,
            Self::Authentication { .. } => "TOKEN",
        }
    }

    /// Remote response body, when the remote side sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => Some(body),
            Self::Authentication { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// HTTP status code, for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error is expected behavior (bad input, missing resource, etc.), used for log levels.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Http { status, .. } if (400..500).contains(status))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                operation,
                message,
                body,
                ..
            } => {
                if body.is_empty() {
                    write!(f, "[{operation}] {message}")
                } else {
                    write!(f, "[{operation}] {message}: {body}")
                }
            }
            Self::Network { operation, detail } => {
                write!(f, "[{operation}] Network error: {detail}")
            }
            Self::Timeout { operation, detail } => {
                write!(f, "[{operation}] Request timeout: {detail}")
            }
            Self::Authentication { detail, body } => {
                if let Some(body) = body {
                    write!(f, "[TOKEN] Authentication failed: {detail}: {body}")
                } else {
                    write!(f, "[TOKEN] Authentication failed: {detail}")
                }
            }
            Self::Parse { operation, detail } => {
                write!(f, "[{operation}] Parse error: {detail}")
            }
            Self::Serialization { operation, detail } => {
                write!(f, "[{operation}] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
