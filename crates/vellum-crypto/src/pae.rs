//! Pre-authentication encoding.
//!
//! Serializes an ordered list of byte strings so that no two different lists
//! share an encoding. Only ever used as MAC input.

/// Encode `parts` as `LE64(count) || (LE64(len) || bytes)*`.
///
/// Empty parts still contribute their 8-byte length prefix.
pub fn pae(parts: &[&[u8]]) -> Vec<u8> {
    let capacity = 8 + parts.iter().map(|part| 8 + part.len()).sum::<usize>();

    let mut out = Vec::with_capacity(capacity);
    out.extend_from_slice(&le64(parts.len()));

    for part in parts {
        out.extend_from_slice(&le64(part.len()));
        out.extend_from_slice(part);
    }

    out
}

fn le64(n: usize) -> [u8; 8] {
    (n as u64).to_le_bytes()
}
