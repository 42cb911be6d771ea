//! Wire format for Vellum v4 tokens.
//!
//! A token is a fixed ASCII header naming version and purpose, a base64url body
//! carrying the purpose-specific payload, and an optional base64url footer:
//!
//! ```text
//! v4.local.<b64(nonce || ciphertext || tag)>[.<b64(footer)>]
//! ```
//!
//! This crate only moves bytes between the structured [`Message`] and its
//! string form. It never touches key material; authenticating the payload is
//! the job of `vellum-crypto`.
//!
//! # Security
//!
//! Nothing parsed here is trusted. A structurally valid [`Message`] may still
//! carry a forged tag, and the footer stays unauthenticated until decryption
//! succeeds. Size limits are enforced before any base64 decoding so that
//! oversized input is rejected without allocation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod message;
pub mod payload;
pub mod protocol;

pub use errors::{ProtocolError, Result};
pub use message::Message;
pub use payload::{LocalPayload, Packet, Payload, PublicPayload};
pub use protocol::Protocol;

/// Maximum size of packet content, and separately of the footer (16 MB).
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Maximum length of an encoded token string.
///
/// Header, a body holding the largest content plus fixed fields, a separator,
/// and the largest footer.
pub const MAX_TOKEN_LEN: usize = Protocol::MAX_HEADER_LEN
    + encoded_len(MAX_PAYLOAD_SIZE + payload::MAX_FIXED_FIELDS_LEN)
    + 1
    + encoded_len(MAX_PAYLOAD_SIZE);

/// Length of `n` bytes in unpadded base64.
const fn encoded_len(n: usize) -> usize {
    (4 * n).div_ceil(3)
}
