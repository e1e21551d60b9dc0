//! Reproducible polynomial string hash used to place keys in buckets.
//!
//! The hash is defined over unbounded integers as
//! `h = ((..((c0) * P + c1) * P + ..) * P + cn) mod 2^32` where `ci` are the
//! Unicode scalar values of the key. Reduction mod 2^32 is a ring
//! homomorphism, so the same value falls out of wrapping `u32` arithmetic
//! when each step multiplies by `P mod 2^32`.

/// Large prime, far from a power of two.
pub const HASH_PRIME: u128 = 100_000_000_000_000_000_000_000_000_000_000_003;

/// `HASH_PRIME` reduced into the `u32` ring.
pub const HASH_MULTIPLIER: u32 = (HASH_PRIME % (1u128 << 32)) as u32;

/// Hash a key with wrapping 32-bit arithmetic
#[inline]
pub fn string_hash(key: &str) -> u32 {
    key.chars().fold(0u32, |h, ch| {
        h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(ch as u32)
    })
}
