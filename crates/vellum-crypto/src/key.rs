//! Master key and per-message key schedule
//!
//! # Security Properties
//!
//! - Key Separation: encryption and authentication subkeys come from keyed
//!   BLAKE2b under distinct labels
//! - Nonce Binding: every subkey depends on the per-message nonce
//! - Hygiene: master and derived keys are zeroized on drop and never printed

use std::fmt;

use blake2::{
    Blake2bMac,
    digest::{
        Mac,
        consts::{U32, U56},
    },
};
use vellum_proto::payload::NONCE_SIZE;
use zeroize::Zeroize;

use crate::{entropy::EntropySource, error::TokenError};

/// Size of the master key and of each derived subkey (32 bytes)
pub const KEY_SIZE: usize = 32;

/// Size of the XChaCha20 nonce derived alongside the encryption key
pub const COUNTER_NONCE_SIZE: usize = 24;

/// Label for the encryption key and counter nonce derivation
const ENCRYPTION_KEY_LABEL: &[u8] = b"paseto-encryption-key";

/// Label for the authentication key derivation
const AUTH_KEY_LABEL: &[u8] = b"paseto-auth-key-for-aead";

/// BLAKE2b with 448-bit output: encryption key followed by counter nonce
type Blake2bMac448 = Blake2bMac<U56>;

/// BLAKE2b with 256-bit output
type Blake2bMac256 = Blake2bMac<U32>;

/// 32-byte shared secret for v4.local tokens.
///
/// Immutable after construction and safe to share across threads by
/// reference. `Debug` output is redacted. There is deliberately no
/// `PartialEq`; compare keys with [`crate::constant_time_eq`] if you must.
pub struct SymmetricKey {
    bytes: [u8; KEY_SIZE],
}

impl SymmetricKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Copy key bytes from a slice.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength` unless `bytes` is exactly 32 bytes long
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, TokenError> {
        let Ok(bytes) = <[u8; KEY_SIZE]>::try_from(bytes) else {
            return Err(TokenError::InvalidKeyLength { expected: KEY_SIZE, actual: bytes.len() });
        };

        Ok(Self { bytes })
    }

    /// Generate a fresh key from `entropy`.
    pub fn generate(entropy: &impl EntropySource) -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        entropy.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Raw key bytes, for export to key storage.
    pub fn expose_secret(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// Derive the per-message subkeys for `nonce`.
    ///
    /// Pure function of (key, nonce): the same pair always yields the same
    /// subkeys, and the master key is not modified.
    pub fn split(&self, nonce: &[u8; NONCE_SIZE]) -> DerivedKeys {
        let Ok(mut mac) = Blake2bMac448::new_from_slice(&self.bytes) else {
            unreachable!("32 bytes is a valid BLAKE2b key length");
        };
        mac.update(ENCRYPTION_KEY_LABEL);
        mac.update(nonce);

        let mut tmp = [0u8; KEY_SIZE + COUNTER_NONCE_SIZE];
        tmp.copy_from_slice(&mac.finalize().into_bytes());

        let mut enc_key = [0u8; KEY_SIZE];
        enc_key.copy_from_slice(&tmp[..KEY_SIZE]);
        let mut counter_nonce = [0u8; COUNTER_NONCE_SIZE];
        counter_nonce.copy_from_slice(&tmp[KEY_SIZE..]);
        tmp.zeroize();

        let Ok(mut mac) = Blake2bMac256::new_from_slice(&self.bytes) else {
            unreachable!("32 bytes is a valid BLAKE2b key length");
        };
        mac.update(AUTH_KEY_LABEL);
        mac.update(nonce);

        let mut auth_key = [0u8; KEY_SIZE];
        auth_key.copy_from_slice(&mac.finalize().into_bytes());

        DerivedKeys { enc_key, auth_key, counter_nonce }
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Subkeys for a single encrypt or decrypt call.
pub struct DerivedKeys {
    /// XChaCha20 key
    enc_key: [u8; KEY_SIZE],
    /// BLAKE2b-256 MAC key
    auth_key: [u8; KEY_SIZE],
    /// XChaCha20 nonce
    counter_nonce: [u8; COUNTER_NONCE_SIZE],
}

impl DerivedKeys {
    /// Stream cipher key.
    pub fn enc_key(&self) -> &[u8; KEY_SIZE] {
        &self.enc_key
    }

    /// MAC key.
    pub fn auth_key(&self) -> &[u8; KEY_SIZE] {
        &self.auth_key
    }

    /// Stream cipher nonce.
    pub fn counter_nonce(&self) -> &[u8; COUNTER_NONCE_SIZE] {
        &self.counter_nonce
    }
}

impl Drop for DerivedKeys {
    fn drop(&mut self) {
        self.enc_key.zeroize();
        self.auth_key.zeroize();
        self.counter_nonce.zeroize();
    }
}
