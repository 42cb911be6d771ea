//! Unauthenticated XChaCha20 keystream.
//!
//! Never used on its own: the tag computed in [`crate::local`] is what makes
//! the output tamper-evident.

use chacha20::{
    XChaCha20, XNonce,
    cipher::{KeyIvInit, StreamCipher},
};

use crate::key::{COUNTER_NONCE_SIZE, KEY_SIZE};

/// XOR the XChaCha20 keystream for (`key`, `counter_nonce`) over `input`.
///
/// The same call encrypts and decrypts. Output length always equals input
/// length.
pub fn apply_keystream(
    key: &[u8; KEY_SIZE],
    counter_nonce: &[u8; COUNTER_NONCE_SIZE],
    input: &[u8],
) -> Vec<u8> {
    let mut cipher = XChaCha20::new(key.into(), XNonce::from_slice(counter_nonce));

    let mut output = input.to_vec();
    cipher.apply_keystream(&mut output);
    output
}
