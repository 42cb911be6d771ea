//! Error types for v4.local operations

use thiserror::Error;
use vellum_proto::ProtocolError;

/// Errors from token encryption and decryption.
///
/// Messages never include key bytes or tag values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Message is not a v4.local token (wrong version, purpose or payload
    /// shape)
    #[error("cannot decrypt message with header: {header}")]
    HeaderMismatch {
        /// Header of the rejected message
        header: String,
    },

    /// Tag did not match the recomputed tag
    #[error("bad message authentication code")]
    AuthenticationFailed,

    /// Content or footer exceeds the maximum size
    #[error("{field} too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Which part of the packet was too large
        field: &'static str,
        /// Actual size in bytes
        size: usize,
        /// Maximum allowed size
        max: usize,
    },

    /// Key material has the wrong length
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length
        expected: usize,
        /// Actual key length
        actual: usize,
    },

    /// Token string could not be parsed
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl TokenError {
    /// Returns true if this error stems from the token rather than the caller.
    ///
    /// Tampering errors mean the token is forged, corrupted or meant for a
    /// different key or context. Retrying never helps; reject the token.
    pub fn is_tampering(&self) -> bool {
        match self {
            Self::HeaderMismatch { .. } => true,
            Self::AuthenticationFailed => true,
            Self::Protocol(_) => true,

            Self::PayloadTooLarge { .. } => false,
            Self::InvalidKeyLength { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failure_is_tampering() {
        assert!(TokenError::AuthenticationFailed.is_tampering());
    }

    #[test]
    fn header_mismatch_is_tampering() {
        let err = TokenError::HeaderMismatch { header: "v4.public.".to_string() };
        assert!(err.is_tampering());
    }

    #[test]
    fn caller_errors_are_not_tampering() {
        let err = TokenError::PayloadTooLarge { field: "content", size: 10, max: 5 };
        assert!(!err.is_tampering());

        let err = TokenError::InvalidKeyLength { expected: 32, actual: 16 };
        assert!(!err.is_tampering());
    }

    #[test]
    fn error_display() {
        let err = TokenError::HeaderMismatch { header: "v4.public.".to_string() };
        assert_eq!(err.to_string(), "cannot decrypt message with header: v4.public.");

        let err = TokenError::from(ProtocolError::MalformedToken { reason: "too many sections" });
        assert_eq!(err.to_string(), "protocol error: malformed token: too many sections");
    }
}
