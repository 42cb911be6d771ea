//! Purpose-specific token payloads.
//!
//! The payload variant is fixed by the header, so the body carries no tag of
//! its own. Decoding a body always happens with a known [`Protocol`].

use crate::{
    MAX_PAYLOAD_SIZE, Protocol,
    errors::{ProtocolError, Result},
};

/// Length of the random nonce in a local payload.
pub const NONCE_SIZE: usize = 32;

/// Length of the authentication tag in a local payload.
pub const TAG_SIZE: usize = 32;

/// Length of the signature in a public payload.
pub const SIGNATURE_SIZE: usize = 64;

/// Largest fixed-field overhead of any payload variant.
pub(crate) const MAX_FIXED_FIELDS_LEN: usize = NONCE_SIZE + TAG_SIZE;

/// Plaintext content and footer, before encryption or after decryption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packet {
    /// Confidential content
    pub content: Vec<u8>,
    /// Authenticated but unencrypted footer
    pub footer: Vec<u8>,
}

impl Packet {
    /// Create a packet from content and footer.
    pub fn new(content: impl Into<Vec<u8>>, footer: impl Into<Vec<u8>>) -> Self {
        Self { content: content.into(), footer: footer.into() }
    }
}

/// Encrypted body of a `v4.local.` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPayload {
    /// Per-message random nonce
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext, same length as the plaintext
    pub ciphertext: Vec<u8>,
    /// Authentication tag over header, nonce, ciphertext, footer and implicit
    /// assertion
    pub tag: [u8; TAG_SIZE],
}

/// Body of a `v4.public.` token.
///
/// Kept only so such tokens parse into a distinct variant and get rejected
/// by purpose. Nothing in this workspace signs or verifies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPayload {
    /// Signed message bytes
    pub message: Vec<u8>,
    /// Detached signature
    pub signature: [u8; SIGNATURE_SIZE],
}

/// Token payload, one variant per supported header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Symmetric encryption payload
    V4Local(LocalPayload),
    /// Public signature payload
    V4Public(PublicPayload),
}

impl Payload {
    /// Protocol identified by this variant.
    pub fn protocol(&self) -> Protocol {
        match self {
            Self::V4Local(_) => Protocol::V4Local,
            Self::V4Public(_) => Protocol::V4Public,
        }
    }

    /// Raw body bytes, before base64.
    pub fn to_body(&self) -> Vec<u8> {
        match self {
            Self::V4Local(local) => {
                let mut body = Vec::with_capacity(NONCE_SIZE + local.ciphertext.len() + TAG_SIZE);
                body.extend_from_slice(&local.nonce);
                body.extend_from_slice(&local.ciphertext);
                body.extend_from_slice(&local.tag);
                body
            },
            Self::V4Public(public) => {
                let mut body = Vec::with_capacity(public.message.len() + SIGNATURE_SIZE);
                body.extend_from_slice(&public.message);
                body.extend_from_slice(&public.signature);
                body
            },
        }
    }

    /// Split raw body bytes into the fields of `protocol`'s payload.
    pub fn from_body(protocol: Protocol, body: &[u8]) -> Result<Self> {
        match protocol {
            Protocol::V4Local => {
                let min = NONCE_SIZE + TAG_SIZE;
                if body.len() < min {
                    return Err(ProtocolError::PayloadTooShort { expected: min, actual: body.len() });
                }

                let (nonce, rest) = body.split_at(NONCE_SIZE);
                let (ciphertext, tag) = rest.split_at(rest.len() - TAG_SIZE);
                check_section_size("ciphertext", ciphertext)?;

                Ok(Self::V4Local(LocalPayload {
                    nonce: to_array(nonce),
                    ciphertext: ciphertext.to_vec(),
                    tag: to_array(tag),
                }))
            },
            Protocol::V4Public => {
                if body.len() < SIGNATURE_SIZE {
                    return Err(ProtocolError::PayloadTooShort {
                        expected: SIGNATURE_SIZE,
                        actual: body.len(),
                    });
                }

                let (message, signature) = body.split_at(body.len() - SIGNATURE_SIZE);
                check_section_size("message", message)?;

                Ok(Self::V4Public(PublicPayload {
                    message: message.to_vec(),
                    signature: to_array(signature),
                }))
            },
        }
    }
}

/// Reject a decoded field larger than [`MAX_PAYLOAD_SIZE`].
pub(crate) fn check_section_size(section: &'static str, bytes: &[u8]) -> Result<()> {
    if bytes.len() > MAX_PAYLOAD_SIZE {
        return Err(ProtocolError::SectionTooLarge {
            section,
            size: bytes.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }
    Ok(())
}

/// Copy a slice whose length was already checked into an array.
fn to_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_payload(ciphertext: &[u8]) -> Payload {
        Payload::V4Local(LocalPayload {
            nonce: [0x11; NONCE_SIZE],
            ciphertext: ciphertext.to_vec(),
            tag: [0x22; TAG_SIZE],
        })
    }

    #[test]
    fn local_body_layout() {
        let body = local_payload(b"abc").to_body();

        assert_eq!(body.len(), NONCE_SIZE + 3 + TAG_SIZE);
        assert_eq!(&body[..NONCE_SIZE], &[0x11; NONCE_SIZE]);
        assert_eq!(&body[NONCE_SIZE..NONCE_SIZE + 3], b"abc");
        assert_eq!(&body[NONCE_SIZE + 3..], &[0x22; TAG_SIZE]);
    }

    #[test]
    fn local_body_with_empty_ciphertext() {
        let payload = local_payload(b"");
        let body = payload.to_body();

        assert_eq!(body.len(), NONCE_SIZE + TAG_SIZE);
        assert_eq!(Payload::from_body(Protocol::V4Local, &body), Ok(payload));
    }

    #[test]
    fn local_body_too_short() {
        let result = Payload::from_body(Protocol::V4Local, &[0u8; 63]);
        assert_eq!(result, Err(ProtocolError::PayloadTooShort { expected: 64, actual: 63 }));
    }

    #[test]
    fn local_body_ciphertext_at_limit_accepted() {
        let body = vec![0u8; NONCE_SIZE + MAX_PAYLOAD_SIZE + TAG_SIZE];

        let Ok(Payload::V4Local(local)) = Payload::from_body(Protocol::V4Local, &body) else {
            unreachable!("expected local payload");
        };
        assert_eq!(local.ciphertext.len(), MAX_PAYLOAD_SIZE);
    }

    #[test]
    fn local_body_ciphertext_over_limit_rejected() {
        let body = vec![0u8; NONCE_SIZE + MAX_PAYLOAD_SIZE + 1 + TAG_SIZE];

        let result = Payload::from_body(Protocol::V4Local, &body);
        assert_eq!(
            result,
            Err(ProtocolError::SectionTooLarge {
                section: "ciphertext",
                size: MAX_PAYLOAD_SIZE + 1,
                max: MAX_PAYLOAD_SIZE,
            })
        );
    }

    #[test]
    fn public_body_message_over_limit_rejected() {
        let body = vec![0u8; MAX_PAYLOAD_SIZE + 1 + SIGNATURE_SIZE];

        let result = Payload::from_body(Protocol::V4Public, &body);
        assert_eq!(
            result,
            Err(ProtocolError::SectionTooLarge {
                section: "message",
                size: MAX_PAYLOAD_SIZE + 1,
                max: MAX_PAYLOAD_SIZE,
            })
        );
    }

    #[test]
    fn public_body_splits_signature_from_end() {
        let mut body = b"claims".to_vec();
        body.extend_from_slice(&[0x33; SIGNATURE_SIZE]);

        let Ok(Payload::V4Public(public)) = Payload::from_body(Protocol::V4Public, &body) else {
            unreachable!("expected public payload");
        };

        assert_eq!(public.message, b"claims");
        assert_eq!(public.signature, [0x33; SIGNATURE_SIZE]);
    }

    #[test]
    fn variant_determines_protocol() {
        assert_eq!(local_payload(b"").protocol(), Protocol::V4Local);

        let public = Payload::V4Public(PublicPayload {
            message: Vec::new(),
            signature: [0; SIGNATURE_SIZE],
        });
        assert_eq!(public.protocol(), Protocol::V4Public);
    }

    #[test]
    fn packet_new_accepts_strings_and_bytes() {
        let packet = Packet::new("test", b"kid".to_vec());
        assert_eq!(packet.content, b"test");
        assert_eq!(packet.footer, b"kid");
    }
}
