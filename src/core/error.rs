//! # Error Handling Module
//!
//! All failure modes of the client, defined with `thiserror`. Each variant
//! represents a different category of error that can occur between accepting a
//! call and delivering its envelope.
//!
//! The enum derives `Clone` because a single settled failure is fanned out to
//! every caller deduplicated onto the same in-flight request; errors carry
//! message strings rather than source errors so that fan-out stays cheap.

use thiserror::Error;

/// Main result type used throughout the client
///
/// This is a type alias that makes error handling more ergonomic.
/// Instead of writing `Result<T, ClientError>` everywhere, we can use `ClientResult<T>`.
pub type ClientResult<T> = Result<T, ClientError>;

/// Comprehensive error types for the Hypixel client
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Construction-time failures: empty key pool, malformed key, bad config
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A per-call key override failed the structural format check.
    /// No upstream call is made when this is returned.
    #[error("Invalid API key format: {key}")]
    InvalidKeyFormat { key: String },

    /// The upstream rejected the presented API key (HTTP 403).
    /// Terminal; never retried automatically.
    #[error("Invalid API key provided")]
    InvalidKey,

    /// The upstream reported a failure that is neither a key rejection nor a
    /// rate limit. Carries the masked key that issued the request and the
    /// upstream-supplied cause.
    #[error("Upstream error ({key}): {cause}")]
    Upstream { key: String, cause: String },

    /// Network or body-decoding failures below the classification layer
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Accessor-level validation failures (bad username, UUID, guild id, ...)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Item-blob decoding failures (base64, gzip, unsupported layout)
    #[error("Decode error: {message}")]
    Decode { message: String },
}

impl ClientError {
    /// Create a configuration error with a custom message
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a transport error with a custom message
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an invalid argument error with a custom message
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a decode error with a custom message
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether this failure came from the upstream service rather than from
    /// validation inside the client.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::InvalidKey | Self::Upstream { .. } | Self::Transport { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_carry_context() {
        let err = ClientError::Upstream {
            key: "********-****-****-****-94021c723e06".to_string(),
            cause: "Malformed UUID".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Upstream error (********-****-****-****-94021c723e06): Malformed UUID"
        );
    }

    #[test]
    fn upstream_classification_helper() {
        assert!(ClientError::InvalidKey.is_upstream());
        assert!(ClientError::transport("boom").is_upstream());
        assert!(!ClientError::config("empty pool").is_upstream());
        assert!(!ClientError::invalid_argument("bad username").is_upstream());
    }
}
