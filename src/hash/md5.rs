//! MD5 (RFC 1321).
//!
//! Four rounds of sixteen steps; each step adds a sine-derived constant and
//! a message word selected by a per-round permutation, then rotates.

use tracing::debug;

use super::padding::{preprocess, CHUNK_WORDS};
use super::{deserialize_state, serialize_state, IteratedHash};
use crate::error::CryptoError;
use crate::utils::bits::{choice, parity};
use crate::utils::converter::Endianness;

/// Digest size in bytes.
pub const DIGEST_BYTES: usize = 16;

/// Words in the chaining state.
pub const STATE_WORDS: usize = 4;

/// RFC 1321 initial state (`A, B, C, D`).
pub const INITIAL_STATE: [u32; STATE_WORDS] = [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476];

/// `T[i] = floor(2^32 * |sin(i + 1)|)`.
#[rustfmt::skip]
const T: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Left-rotation amounts, four per round.
const SHIFTS: [[u32; 4]; 4] = [[7, 12, 17, 22], [5, 9, 14, 20], [4, 11, 16, 23], [6, 10, 15, 21]];

fn compress(state: [u32; STATE_WORDS], x: &[u32]) -> [u32; STATE_WORDS] {
    let [mut a, mut b, mut c, mut d] = state;

    for (i, &t) in T.iter().enumerate() {
        let round = i / 16;
        let (f, g) = match round {
            0 => (choice(b, c, d), i),
            1 => (choice(d, b, c), (5 * i + 1) % 16),
            2 => (parity(b, c, d), (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };
        let rotated = a
            .wrapping_add(f)
            .wrapping_add(t)
            .wrapping_add(x[g])
            .rotate_left(SHIFTS[round][i % 4]);
        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(rotated);
    }

    [
        state[0].wrapping_add(a),
        state[1].wrapping_add(b),
        state[2].wrapping_add(c),
        state[3].wrapping_add(d),
    ]
}

/// Computes MD5 of `message` starting from `digest`.
///
/// # Examples
/// ```
/// use cryptolib::hash::md5::{md5digest, INITIAL_STATE};
///
/// let state = md5digest(b"abc", 0, INITIAL_STATE);
/// assert_eq!(state[0], 0x98500190);
/// ```
pub fn md5digest(
    message: &[u8],
    prefix_length: usize,
    digest: [u32; STATE_WORDS],
) -> [u32; STATE_WORDS] {
    let buffer = preprocess(message, prefix_length, Endianness::Little);
    debug!(
        message_len = message.len(),
        prefix_length,
        chunks = buffer.len() / CHUNK_WORDS,
        "md5 digest"
    );
    buffer
        .chunks_exact(CHUNK_WORDS)
        .fold(digest, |state, chunk| compress(state, chunk))
}

/// MD5 marker type for [`IteratedHash`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5;

impl IteratedHash for Md5 {
    const NAME: &'static str = "MD5";
    const DIGEST_BYTES: usize = DIGEST_BYTES;
    const ENDIANNESS: Endianness = Endianness::Little;

    type State = [u32; STATE_WORDS];

    fn initial_state() -> Self::State {
        INITIAL_STATE
    }

    fn digest_state(message: &[u8], prefix_length: usize, state: Self::State) -> Self::State {
        md5digest(message, prefix_length, state)
    }

    fn state_to_bytes(state: &Self::State) -> Vec<u8> {
        serialize_state(state, Self::ENDIANNESS)
    }

    fn state_from_bytes(bytes: &[u8]) -> Result<Self::State, CryptoError> {
        deserialize_state(bytes, Self::ENDIANNESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc1321_vectors() {
        let cases: [(&[u8], &str); 7] = [
            (b"", "d41d8cd98f00b204e9800998ecf8427e"),
            (b"a", "0cc175b9c0f1b6a831c399e269772661"),
            (b"abc", "900150983cd24fb0d6963f7d28e17f72"),
            (b"message digest", "f96b697d7cb7938d525a2f31aaf161d0"),
            (b"abcdefghijklmnopqrstuvwxyz", "c3fcd3d76192e4007dfb496cca67e13b"),
            (
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
                "d174ab98d277d9f5a5611c2c9f419d9f",
            ),
            (
                b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
                "57edf4a22be3c955ac49da2e2107b67a",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(hex::encode(Md5::hash(input)), expected);
        }
    }

    #[test]
    fn test_extend_from_known_digest() {
        let prev = Md5::hash(b"abc");
        let extended = Md5::extend(&prev, 3, b"def").expect("valid digest length");

        let mut glued = b"abc".to_vec();
        glued.push(0x80);
        glued.resize(56, 0);
        glued.extend_from_slice(&24u64.to_le_bytes());
        glued.extend_from_slice(b"def");
        assert_eq!(extended, Md5::hash(&glued));
    }
}
