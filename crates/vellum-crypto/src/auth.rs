//! Message authentication.

use blake2::{
    Blake2bMac,
    digest::{Mac, consts::U32},
};
use subtle::ConstantTimeEq;
use vellum_proto::payload::TAG_SIZE;

use crate::key::KEY_SIZE;

/// Keyed BLAKE2b-256 of `pre_auth` under `auth_key`.
pub fn authenticate(auth_key: &[u8; KEY_SIZE], pre_auth: &[u8]) -> [u8; TAG_SIZE] {
    let Ok(mut mac) = Blake2bMac::<U32>::new_from_slice(auth_key) else {
        unreachable!("32 bytes is a valid BLAKE2b key length");
    };
    mac.update(pre_auth);

    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    tag
}

/// Constant-time byte equality.
///
/// Slices of different length compare unequal; lengths are not secret.
/// For equal lengths every byte is examined regardless of where the first
/// difference is.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
