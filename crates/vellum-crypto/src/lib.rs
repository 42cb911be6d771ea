//! Vellum v4.local Authenticated Encryption
//!
//! Symmetric encryption of an opaque payload under a 32-byte shared key. The
//! resulting token is confidential, tamper-evident and bound to an optional
//! implicit assertion that never travels with it.
//!
//! # Construction
//!
//! ```text
//! SymmetricKey, Nonce (32 random bytes)
//!        │
//!        ▼ keyed BLAKE2b, two domain labels
//! enc_key ║ counter_nonce        auth_key
//!        │                          │
//!        ▼ XChaCha20                │
//! ciphertext ──► PAE(header, nonce, ciphertext, footer, implicit)
//!                                   │
//!                                   ▼ keyed BLAKE2b-256
//!                                  tag
//! ```
//!
//! Decryption recomputes the tag and compares it in constant time before a
//! single byte of plaintext is produced.
//!
//! # Security
//!
//! Nonce Handling:
//! - Nonces come from an injected [`EntropySource`]; production uses
//!   [`SystemEntropy`] (OS CSPRNG)
//! - RNG failure aborts the process rather than degrading to weaker randomness
//!
//! Key Separation:
//! - Encryption and authentication subkeys use distinct derivation labels, so
//!   one master key serves both purposes
//! - Derived subkeys live for one call and are zeroized on drop
//!
//! Authenticity:
//! - The header is checked before any key derivation
//! - Tag comparison is constant-time
//! - A failed tag releases no plaintext

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod auth;
pub mod cipher;
pub mod entropy;
pub mod error;
pub mod key;
pub mod local;
pub mod pae;

pub use auth::{authenticate, constant_time_eq};
pub use entropy::{EntropySource, SystemEntropy};
pub use error::TokenError;
pub use key::{DerivedKeys, SymmetricKey};
#[cfg(any(test, feature = "test-vectors"))]
pub use local::encrypt_with_nonce;
pub use local::{decrypt, decrypt_token, encrypt, encrypt_token};
pub use pae::pae;
