//! v4.local encrypt and decrypt.
//!
//! Both operations are single-pass and keep no state between calls. Either a
//! complete result is returned or nothing is.

use vellum_proto::{
    LocalPayload, MAX_PAYLOAD_SIZE, Message, Packet, Payload, Protocol, payload::NONCE_SIZE,
};

use crate::{
    auth::{authenticate, constant_time_eq},
    cipher::apply_keystream,
    entropy::EntropySource,
    error::TokenError,
    key::SymmetricKey,
    pae::pae,
};

/// Encrypt `packet` under `key`, binding it to `implicit`.
///
/// Draws a fresh 32-byte nonce from `entropy`. The implicit assertion is
/// authenticated but not part of the returned message; the same bytes must
/// be supplied to [`decrypt`].
///
/// # Errors
///
/// - `PayloadTooLarge` if content or footer exceeds [`MAX_PAYLOAD_SIZE`]
///
/// # Panics
///
/// If the entropy source fails (see [`crate::SystemEntropy`]).
pub fn encrypt(
    packet: &Packet,
    key: &SymmetricKey,
    implicit: &[u8],
    entropy: &impl EntropySource,
) -> Result<Message, TokenError> {
    check_packet_size(packet)?;

    let mut nonce = [0u8; NONCE_SIZE];
    entropy.fill_bytes(&mut nonce);

    Ok(seal(packet, key, implicit, nonce))
}

/// Encrypt with a caller-chosen nonce, for reproducing fixed test vectors.
///
/// Only compiled for tests or with the `test-vectors` feature. Reusing a
/// nonce under one key destroys confidentiality.
///
/// # Panics
///
/// If `nonce` is not exactly 32 bytes. A wrong-length test nonce is a broken
/// test, not bad input.
#[cfg(any(test, feature = "test-vectors"))]
pub fn encrypt_with_nonce(
    packet: &Packet,
    key: &SymmetricKey,
    implicit: &[u8],
    nonce: &[u8],
) -> Result<Message, TokenError> {
    assert_eq!(nonce.len(), NONCE_SIZE, "test nonce must be exactly {NONCE_SIZE} bytes");
    check_packet_size(packet)?;

    let mut fixed = [0u8; NONCE_SIZE];
    fixed.copy_from_slice(nonce);

    Ok(seal(packet, key, implicit, fixed))
}

/// Decrypt and authenticate a v4.local `message`.
///
/// # Errors
///
/// - `HeaderMismatch` if the message is not a v4.local token; raised before
///   any key material is touched
/// - `AuthenticationFailed` if the tag does not verify under `key` and
///   `implicit` (wrong key, wrong implicit assertion, or tampering)
pub fn decrypt(
    message: &Message,
    key: &SymmetricKey,
    implicit: &[u8],
) -> Result<Packet, TokenError> {
    let header = message.header();

    // The payload variant fixes the header, so matching it is the header gate
    let payload = match &message.payload {
        Payload::V4Local(payload) => payload,
        Payload::V4Public(_) => {
            tracing::warn!(header, "rejected token: not a v4.local message");
            return Err(TokenError::HeaderMismatch { header: header.to_string() });
        },
    };

    let keys = key.split(&payload.nonce);

    let pre_auth = pae(&[
        header.as_bytes(),
        &payload.nonce,
        &payload.ciphertext,
        &message.footer,
        implicit,
    ]);
    let expected_tag = authenticate(keys.auth_key(), &pre_auth);

    if !constant_time_eq(&expected_tag, &payload.tag) {
        tracing::warn!(
            ciphertext_len = payload.ciphertext.len(),
            footer_len = message.footer.len(),
            "rejected token: bad message authentication code"
        );
        return Err(TokenError::AuthenticationFailed);
    }

    let content = apply_keystream(keys.enc_key(), keys.counter_nonce(), &payload.ciphertext);

    tracing::debug!(content_len = content.len(), "decrypted v4.local token");

    Ok(Packet { content, footer: message.footer.clone() })
}

/// [`encrypt`] followed by wire encoding.
pub fn encrypt_token(
    packet: &Packet,
    key: &SymmetricKey,
    implicit: &[u8],
    entropy: &impl EntropySource,
) -> Result<String, TokenError> {
    encrypt(packet, key, implicit, entropy).map(|message| message.to_token())
}

/// Wire decoding followed by [`decrypt`].
///
/// # Errors
///
/// - `Protocol` if the string is not a well-formed token
/// - Everything [`decrypt`] returns
pub fn decrypt_token(token: &str, key: &SymmetricKey, implicit: &[u8]) -> Result<Packet, TokenError> {
    let message = Message::from_token(token)?;
    decrypt(&message, key, implicit)
}

/// Core construction shared by the random-nonce and fixed-nonce paths.
fn seal(packet: &Packet, key: &SymmetricKey, implicit: &[u8], nonce: [u8; NONCE_SIZE]) -> Message {
    let keys = key.split(&nonce);

    let ciphertext = apply_keystream(keys.enc_key(), keys.counter_nonce(), &packet.content);

    let header = Protocol::V4Local.header();
    let pre_auth = pae(&[header.as_bytes(), &nonce, &ciphertext, &packet.footer, implicit]);
    let tag = authenticate(keys.auth_key(), &pre_auth);

    tracing::debug!(
        content_len = packet.content.len(),
        footer_len = packet.footer.len(),
        "encrypted v4.local token"
    );

    Message::new(Payload::V4Local(LocalPayload { nonce, ciphertext, tag }), packet.footer.clone())
}

fn check_packet_size(packet: &Packet) -> Result<(), TokenError> {
    for (field, size) in [("content", packet.content.len()), ("footer", packet.footer.len())] {
        if size > MAX_PAYLOAD_SIZE {
            return Err(TokenError::PayloadTooLarge { field, size, max: MAX_PAYLOAD_SIZE });
        }
    }
    Ok(())
}
