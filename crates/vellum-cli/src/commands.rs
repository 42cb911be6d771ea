//! Subcommand implementations, kept free of stdin/stdout for testing.

use vellum_crypto::{EntropySource, SymmetricKey, decrypt_token, encrypt_token};
use vellum_proto::Packet;

use crate::{
    config::{DecryptArgs, EncryptArgs},
    error::CliError,
};

/// Generate a key and render it as hex.
pub fn keygen(entropy: &impl EntropySource) -> String {
    let key = SymmetricKey::generate(entropy);
    hex::encode(key.expose_secret())
}

/// Encrypt `content` with the footer and implicit assertion from `args`.
pub fn encrypt(
    args: &EncryptArgs,
    key: &SymmetricKey,
    content: Vec<u8>,
    entropy: &impl EntropySource,
) -> Result<String, CliError> {
    let packet = Packet::new(content, args.footer.as_bytes());
    let token = encrypt_token(&packet, key, args.implicit.as_bytes(), entropy)?;

    tracing::info!(token_len = token.len(), "issued token");
    Ok(token)
}

/// Decrypt `token` with the implicit assertion from `args`.
pub fn decrypt(args: &DecryptArgs, key: &SymmetricKey, token: &str) -> Result<Packet, CliError> {
    let packet = decrypt_token(token, key, args.implicit.as_bytes()).inspect_err(|err| {
        tracing::info!(tampering = err.is_tampering(), "token rejected: {err}");
    })?;

    Ok(packet)
}
