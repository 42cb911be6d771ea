//! CLI error type.

use std::io;

use thiserror::Error;
use vellum_crypto::TokenError;

/// Errors surfaced by the `vellum` binary.
#[derive(Error, Debug)]
pub enum CliError {
    /// No key source was configured
    #[error("no key provided: pass --key, --key-file or set VELLUM_KEY")]
    MissingKey,

    /// Key material could not be decoded
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Token read from stdin was not UTF-8
    #[error("token is not valid UTF-8")]
    NonUtf8Token,

    /// Encryption or decryption failed
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Reading input or key file failed
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
