//! Constant-time equality for digests.

use std::hint::black_box;

/// Compares two byte slices without short-circuiting on the first
/// differing byte. Lengths are not secret: a length difference returns
/// `false` after still walking the longer input.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut diff = (a.len() ^ b.len()) as u64;
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= u64::from(black_box(x ^ y));
    }
    black_box(diff) == 0
}
