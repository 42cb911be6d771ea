//! Version and purpose identifiers.

/// A token version/purpose pair, identified on the wire by its header.
///
/// Headers are compared byte-exact. `V4.LOCAL.` is not a v4 local header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Version 4, symmetric authenticated encryption
    V4Local,
    /// Version 4, public-key signatures (parsed, never verified here)
    V4Public,
}

impl Protocol {
    /// All protocols this crate can parse.
    pub const ALL: [Self; 2] = [Self::V4Local, Self::V4Public];

    /// Length of the longest header literal.
    pub const MAX_HEADER_LEN: usize = 10;

    /// Header literal including the trailing dot.
    pub const fn header(self) -> &'static str {
        match self {
            Self::V4Local => "v4.local.",
            Self::V4Public => "v4.public.",
        }
    }

    /// Find the protocol whose header prefixes `token`.
    pub fn from_token_prefix(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|protocol| token.starts_with(protocol.header()))
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}
