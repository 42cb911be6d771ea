//! Structured tokens and their string encoding.

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::{
    MAX_TOKEN_LEN, Payload, Protocol,
    errors::{ProtocolError, Result},
    payload::check_section_size,
};

/// A parsed or freshly produced token.
///
/// The header is not stored: it is a function of the payload variant, so a
/// message whose header disagrees with its payload cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Purpose-specific payload
    pub payload: Payload,
    /// Footer bytes, transmitted in the clear
    pub footer: Vec<u8>,
}

impl Message {
    /// Create a message from a payload and footer.
    pub fn new(payload: Payload, footer: Vec<u8>) -> Self {
        Self { payload, footer }
    }

    /// Protocol of the payload.
    pub fn protocol(&self) -> Protocol {
        self.payload.protocol()
    }

    /// Header literal, e.g. `"v4.local."`.
    pub fn header(&self) -> &'static str {
        self.protocol().header()
    }

    /// Encode as `header || b64(body) [ "." || b64(footer) ]`.
    ///
    /// The footer section is omitted entirely when the footer is empty.
    pub fn to_token(&self) -> String {
        let mut token = String::from(self.header());
        URL_SAFE_NO_PAD.encode_string(self.payload.to_body(), &mut token);

        if !self.footer.is_empty() {
            token.push('.');
            URL_SAFE_NO_PAD.encode_string(&self.footer, &mut token);
        }

        token
    }

    /// Parse a token string.
    ///
    /// # Errors
    ///
    /// - `TokenTooLarge` if the string exceeds [`MAX_TOKEN_LEN`]
    /// - `UnsupportedHeader` if no known header prefixes the string
    /// - `MalformedToken` for extra or empty sections
    /// - `InvalidBase64` if a section is not canonical unpadded base64url
    /// - `PayloadTooShort` if the body cannot hold the payload's fixed fields
    /// - `SectionTooLarge` if the ciphertext, message or footer exceeds
    ///   [`crate::MAX_PAYLOAD_SIZE`]
    pub fn from_token(token: &str) -> Result<Self> {
        let (protocol, body, footer) = split_token(token)?;

        let body = decode_section(body, "body")?;
        let payload = Payload::from_body(protocol, &body)?;
        let footer = match footer {
            Some(footer) => decode_footer(footer)?,
            None => Vec::new(),
        };

        Ok(Self { payload, footer })
    }

    /// Decode only the footer of a token, without touching the body.
    ///
    /// Useful for choosing a key by identifier before decryption. The result
    /// is attacker-controlled until the token authenticates.
    pub fn unverified_footer(token: &str) -> Result<Vec<u8>> {
        match split_token(token)? {
            (_, _, Some(footer)) => decode_footer(footer),
            (_, _, None) => Ok(Vec::new()),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s)
    }
}

/// Separate a token into protocol, body section and optional footer section.
fn split_token(token: &str) -> Result<(Protocol, &str, Option<&str>)> {
    if token.len() > MAX_TOKEN_LEN {
        return Err(ProtocolError::TokenTooLarge { size: token.len(), max: MAX_TOKEN_LEN });
    }

    let Some(protocol) = Protocol::from_token_prefix(token) else {
        return Err(ProtocolError::UnsupportedHeader(header_of(token)));
    };

    let rest = &token[protocol.header().len()..];
    let mut sections = rest.split('.');

    let body = sections.next().unwrap_or_default();
    let footer = sections.next();

    if sections.next().is_some() {
        return Err(ProtocolError::MalformedToken { reason: "too many sections" });
    }
    if body.is_empty() {
        return Err(ProtocolError::MalformedToken { reason: "empty body section" });
    }
    if footer.is_some_and(str::is_empty) {
        return Err(ProtocolError::MalformedToken { reason: "empty footer section" });
    }

    Ok((protocol, body, footer))
}

/// Leading `version.purpose.` of an unrecognized token, for error reporting.
fn header_of(token: &str) -> String {
    let mut parts = token.splitn(3, '.');
    let version = parts.next().unwrap_or_default();
    let purpose = parts.next().unwrap_or_default();

    let mut header: String = format!("{version}.{purpose}.").chars().take(32).collect();
    if header == ".." {
        header.clear();
    }
    header
}

fn decode_section(section: &str, name: &'static str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(section).map_err(|_| ProtocolError::InvalidBase64 { section: name })
}

fn decode_footer(section: &str) -> Result<Vec<u8>> {
    let footer = decode_section(section, "footer")?;
    check_section_size("footer", &footer)?;
    Ok(footer)
}
