//! Error types for token parsing.

use thiserror::Error;

/// Result alias for wire format operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while turning a token string into a [`crate::Message`].
///
/// None of these carry token bytes beyond the header, which is public.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Header is not a version/purpose pair this crate understands
    #[error("unsupported token header: {0:?}")]
    UnsupportedHeader(String),

    /// Token structure is wrong (section count, empty sections)
    #[error("malformed token: {reason}")]
    MalformedToken {
        /// What was wrong with the structure
        reason: &'static str,
    },

    /// A section is not canonical unpadded base64url
    #[error("invalid base64 in token {section}")]
    InvalidBase64 {
        /// Which section failed to decode ("body" or "footer")
        section: &'static str,
    },

    /// Body is shorter than the fixed fields of its payload
    #[error("payload too short: expected at least {expected} bytes, got {actual}")]
    PayloadTooShort {
        /// Minimum body length for the payload variant
        expected: usize,
        /// Decoded body length
        actual: usize,
    },

    /// A decoded section exceeds [`crate::MAX_PAYLOAD_SIZE`]
    #[error("{section} too large: {size} bytes (max {max})")]
    SectionTooLarge {
        /// Which field was too large ("ciphertext", "message" or "footer")
        section: &'static str,
        /// Decoded length of the field
        size: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Token string exceeds the maximum encoded length
    #[error("token too large: {size} bytes (max {max})")]
    TokenTooLarge {
        /// Length of the rejected token string
        size: usize,
        /// Maximum allowed length
        max: usize,
    },
}
