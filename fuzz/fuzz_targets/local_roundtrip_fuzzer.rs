//! Fuzz target for v4.local encrypt/decrypt
//!
//! # Invariants
//!
//! - Encrypt/decrypt roundtrip succeeds with the same key and implicit assertion
//! - Ciphertext length equals content length
//! - Same nonce and inputs produce the same message
//! - Corrupted ciphertext, tag or nonce fails authentication
//! - A different implicit assertion fails authentication

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vellum_crypto::{decrypt, encrypt_with_nonce, SymmetricKey, TokenError};
use vellum_proto::{Packet, Payload};

#[derive(Debug, Clone, Arbitrary)]
struct Scenario {
    key: [u8; 32],
    nonce: [u8; 32],
    content: Vec<u8>,
    footer: Vec<u8>,
    implicit: Vec<u8>,
    corrupt: Corruption,
}

#[derive(Debug, Clone, Arbitrary)]
enum Corruption {
    Ciphertext { index: u16, mask: u8 },
    Tag { index: u8, mask: u8 },
    Nonce { index: u8, mask: u8 },
    Implicit,
}

fuzz_target!(|scenario: Scenario| {
    let key = SymmetricKey::from_bytes(scenario.key);
    let packet = Packet::new(scenario.content, scenario.footer);

    let Ok(message) = encrypt_with_nonce(&packet, &key, &scenario.implicit, &scenario.nonce) else {
        return;
    };

    // INVARIANT 1: Roundtrip
    let decrypted = decrypt(&message, &key, &scenario.implicit);
    assert_eq!(decrypted.as_ref(), Ok(&packet), "roundtrip must succeed");

    // INVARIANT 2: Determinism under fixed nonce
    let again = encrypt_with_nonce(&packet, &key, &scenario.implicit, &scenario.nonce);
    assert_eq!(again.as_ref(), Ok(&message), "fixed nonce must be deterministic");

    let Payload::V4Local(payload) = &message.payload else {
        unreachable!("encrypt produces local payloads");
    };

    // INVARIANT 3: Length preservation
    assert_eq!(payload.ciphertext.len(), packet.content.len());

    // INVARIANT 4: Tampering is detected
    let mut corrupted = message.clone();
    let mut implicit = scenario.implicit.clone();
    let Payload::V4Local(target) = &mut corrupted.payload else {
        unreachable!("encrypt produces local payloads");
    };

    match scenario.corrupt {
        Corruption::Ciphertext { index, mask } => {
            if target.ciphertext.is_empty() || mask == 0 {
                return;
            }
            let i = index as usize % target.ciphertext.len();
            target.ciphertext[i] ^= mask;
        },
        Corruption::Tag { index, mask } => {
            if mask == 0 {
                return;
            }
            target.tag[index as usize % 32] ^= mask;
        },
        Corruption::Nonce { index, mask } => {
            if mask == 0 {
                return;
            }
            target.nonce[index as usize % 32] ^= mask;
        },
        Corruption::Implicit => implicit.push(0),
    }

    assert_eq!(
        decrypt(&corrupted, &key, &implicit),
        Err(TokenError::AuthenticationFailed),
        "tampered message must fail authentication"
    );
});
