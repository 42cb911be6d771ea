//! Command-line configuration.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use vellum_crypto::SymmetricKey;
use zeroize::Zeroizing;

use crate::error::CliError;

/// Vellum token tool
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(about = "Issue and open v4.local tokens")]
#[command(version)]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a new random key as hex
    Keygen,
    /// Encrypt content into a token
    Encrypt(EncryptArgs),
    /// Decrypt a token and print its content
    Decrypt(DecryptArgs),
}

/// Where to find the 32-byte key.
#[derive(ClapArgs, Debug, Default)]
pub struct KeyArgs {
    /// Key as 64 hex characters
    #[arg(long, env = "VELLUM_KEY", hide_env_values = true, conflicts_with = "key_file")]
    pub key: Option<String>,

    /// File containing the key as hex
    #[arg(long)]
    pub key_file: Option<PathBuf>,
}

impl KeyArgs {
    /// Resolve the configured key source into a key.
    pub fn load(&self) -> Result<SymmetricKey, CliError> {
        match (&self.key, &self.key_file) {
            (Some(hex_key), _) => parse_key(hex_key),
            (None, Some(path)) => {
                let contents = Zeroizing::new(std::fs::read_to_string(path)?);
                parse_key(&contents)
            },
            (None, None) => Err(CliError::MissingKey),
        }
    }
}

/// Arguments for `encrypt`.
#[derive(ClapArgs, Debug, Default)]
pub struct EncryptArgs {
    /// Key source
    #[command(flatten)]
    pub key: KeyArgs,

    /// Footer, authenticated but sent in the clear
    #[arg(long, default_value = "")]
    pub footer: String,

    /// Implicit assertion, authenticated but never sent
    #[arg(long, default_value = "")]
    pub implicit: String,

    /// Content to encrypt (stdin if omitted)
    pub content: Option<String>,
}

/// Arguments for `decrypt`.
#[derive(ClapArgs, Debug, Default)]
pub struct DecryptArgs {
    /// Key source
    #[command(flatten)]
    pub key: KeyArgs,

    /// Implicit assertion used at encryption time
    #[arg(long, default_value = "")]
    pub implicit: String,

    /// Also print the authenticated footer to stderr
    #[arg(long)]
    pub show_footer: bool,

    /// Token to decrypt (stdin if omitted)
    pub token: Option<String>,
}

/// Decode a hex key, ignoring surrounding whitespace.
pub fn parse_key(hex_key: &str) -> Result<SymmetricKey, CliError> {
    let bytes = Zeroizing::new(
        hex::decode(hex_key.trim()).map_err(|err| CliError::InvalidKey(err.to_string()))?,
    );

    SymmetricKey::try_from_slice(&bytes).map_err(|err| CliError::InvalidKey(err.to_string()))
}
