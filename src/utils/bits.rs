//! Bit-level and GF(2^8) primitives shared by the cipher engines and hashes.
//!
//! All functions are pure. Word arithmetic elsewhere in the crate is done
//! with the `wrapping_*` and `rotate_*` methods on `u32`; this module holds
//! the boolean round predicates and the field arithmetic that have no
//! standard-library counterpart.

/// Irreducible-polynomial reduction term for AES arithmetic
/// (`x^8 + x^4 + x^3 + x + 1` with the `x^8` bit dropped).
const AES_REDUCTION: u8 = 0x1b;

/// Multiplies a byte by `x` (i.e. by 2) in GF(2^8) modulo the AES polynomial.
///
/// A plain left shift when the high bit is clear, otherwise the shift is
/// reduced by xoring with `0x1b`.
///
/// # Parameters
/// - `value`: The field element to double.
///
/// # Returns
/// `2 * value` in GF(2^8).
#[inline]
pub fn gf_double(value: u8) -> u8 {
    (value << 1) ^ (AES_REDUCTION & 0u8.wrapping_sub(value >> 7))
}

/// Multiplies two bytes in GF(2^8) modulo the AES polynomial.
///
/// Shift-and-add over the bits of `b`; used by the inverse MixColumns
/// coefficients (9, 11, 13, 14).
pub fn gf_mul(a: u8, b: u8) -> u8 {
    let mut acc = 0u8;
    let mut a = a;
    let mut b = b;
    while b != 0 {
        if b & 1 != 0 {
            acc ^= a;
        }
        a = gf_double(a);
        b >>= 1;
    }
    acc
}

/// Bitwise choice: for each bit, `y` where `x` is set, else `z`.
#[inline]
pub fn choice(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

/// Bitwise majority of three words.
#[inline]
pub fn majority(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

/// Bitwise parity (xor) of three words.
#[inline]
pub fn parity(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gf_double_no_reduction() {
        assert_eq!(gf_double(0x57), 0xae);
        assert_eq!(gf_double(0x01), 0x02);
    }

    #[test]
    fn test_gf_double_with_reduction() {
        // FIPS-197 section 4.2.1: xtime(0xae) = 0x47, xtime(0x8e) = 0x07
        assert_eq!(gf_double(0xae), 0x47);
        assert_eq!(gf_double(0x8e), 0x07);
        assert_eq!(gf_double(0x80), 0x1b);
    }

    #[test]
    fn test_gf_mul_fips_example() {
        // FIPS-197 section 4.2: {57} * {13} = {fe}
        assert_eq!(gf_mul(0x57, 0x13), 0xfe);
        assert_eq!(gf_mul(0x57, 0x83), 0xc1);
    }

    #[test]
    fn test_gf_mul_identity_and_zero() {
        for x in 0..=255u8 {
            assert_eq!(gf_mul(x, 1), x);
            assert_eq!(gf_mul(x, 0), 0);
            assert_eq!(gf_mul(x, 2), gf_double(x));
        }
    }

    #[test]
    fn test_gf_mul_commutes() {
        for a in (0..=255u8).step_by(7) {
            for b in (0..=255u8).step_by(11) {
                assert_eq!(gf_mul(a, b), gf_mul(b, a), "a={:#04x} b={:#04x}", a, b);
            }
        }
    }

    #[test]
    fn test_round_predicates() {
        assert_eq!(choice(0xffff_0000, 0x1234_5678, 0x9abc_def0), 0x1234_def0);
        assert_eq!(majority(0b1100, 0b1010, 0b0110), 0b1110);
        assert_eq!(parity(0b1100, 0b1010, 0b0110), 0b0000);
    }
}
