//! Randomness abstraction for nonce and key generation.
//!
//! Encryption never reaches for a process-wide RNG. Callers hand in an
//! [`EntropySource`], which keeps the construction testable against fixed
//! vectors and lets production use the OS CSPRNG.

/// Source of cryptographically secure random bytes.
///
/// # Invariants
///
/// - Production implementations MUST be cryptographically secure
/// - `fill_bytes` either fills the whole buffer or does not return; a failing
///   source must abort instead of producing weaker output
pub trait EntropySource: Send + Sync {
    /// Fill `buffer` entirely with random bytes.
    fn fill_bytes(&self, buffer: &mut [u8]);
}

/// OS cryptographic RNG via getrandom.
///
/// # Panics
///
/// Panics if the OS RNG fails. Issuing tokens without working randomness
/// would risk nonce reuse, which breaks confidentiality of every token that
/// shares the nonce.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEntropy;

impl EntropySource for SystemEntropy {
    #[allow(clippy::expect_used)]
    fn fill_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - cannot generate nonces");
    }
}
