//! MD4 (RFC 1320).
//!
//! Three rounds of sixteen steps over little-endian message words. Shares
//! the Merkle–Damgård padding with the SHA family, so MD4 digests can be
//! extended the same way.

use tracing::debug;

use super::padding::{preprocess, CHUNK_WORDS};
use super::{deserialize_state, serialize_state, IteratedHash};
use crate::error::CryptoError;
use crate::utils::bits::{choice, majority, parity};
use crate::utils::converter::Endianness;

/// Digest size in bytes.
pub const DIGEST_BYTES: usize = 16;

/// Words in the chaining state.
pub const STATE_WORDS: usize = 4;

/// RFC 1320 initial state (`A, B, C, D`).
pub const INITIAL_STATE: [u32; STATE_WORDS] = [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476];

/// Round 2 constant, `sqrt(2) * 2^30`.
const ROUND2_K: u32 = 0x5A82_7999;

/// Round 3 constant, `sqrt(3) * 2^30`.
const ROUND3_K: u32 = 0x6ED9_EBA1;

#[inline]
fn step(a: u32, f: u32, x: u32, shift: u32) -> u32 {
    a.wrapping_add(f).wrapping_add(x).rotate_left(shift)
}

fn compress(state: [u32; STATE_WORDS], x: &[u32]) -> [u32; STATE_WORDS] {
    let [mut a, mut b, mut c, mut d] = state;

    for i in [0, 4, 8, 12] {
        a = step(a, choice(b, c, d), x[i], 3);
        d = step(d, choice(a, b, c), x[i + 1], 7);
        c = step(c, choice(d, a, b), x[i + 2], 11);
        b = step(b, choice(c, d, a), x[i + 3], 19);
    }

    for i in 0..4 {
        a = step(a, majority(b, c, d), x[i].wrapping_add(ROUND2_K), 3);
        d = step(d, majority(a, b, c), x[i + 4].wrapping_add(ROUND2_K), 5);
        c = step(c, majority(d, a, b), x[i + 8].wrapping_add(ROUND2_K), 9);
        b = step(b, majority(c, d, a), x[i + 12].wrapping_add(ROUND2_K), 13);
    }

    for i in [0, 2, 1, 3] {
        a = step(a, parity(b, c, d), x[i].wrapping_add(ROUND3_K), 3);
        d = step(d, parity(a, b, c), x[i + 8].wrapping_add(ROUND3_K), 9);
        c = step(c, parity(d, a, b), x[i + 4].wrapping_add(ROUND3_K), 11);
        b = step(b, parity(c, d, a), x[i + 12].wrapping_add(ROUND3_K), 15);
    }

    [
        state[0].wrapping_add(a),
        state[1].wrapping_add(b),
        state[2].wrapping_add(c),
        state[3].wrapping_add(d),
    ]
}

/// Computes MD4 of `message` starting from `digest`.
///
/// # Parameters
/// - `message`: Bytes to hash.
/// - `prefix_length`: Length of an already-hashed prefix, or 0.
/// - `digest`: Starting state, normally [`INITIAL_STATE`].
///
/// # Returns
/// The final state; serialize it little-endian for the digest bytes.
pub fn md4digest(
    message: &[u8],
    prefix_length: usize,
    digest: [u32; STATE_WORDS],
) -> [u32; STATE_WORDS] {
    let buffer = preprocess(message, prefix_length, Endianness::Little);
    debug!(
        message_len = message.len(),
        prefix_length,
        chunks = buffer.len() / CHUNK_WORDS,
        "md4 digest"
    );
    buffer
        .chunks_exact(CHUNK_WORDS)
        .fold(digest, |state, chunk| compress(state, chunk))
}

/// MD4 marker type for [`IteratedHash`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Md4;

impl IteratedHash for Md4 {
    const NAME: &'static str = "MD4";
    const DIGEST_BYTES: usize = DIGEST_BYTES;
    const ENDIANNESS: Endianness = Endianness::Little;

    type State = [u32; STATE_WORDS];

    fn initial_state() -> Self::State {
        INITIAL_STATE
    }

    fn digest_state(message: &[u8], prefix_length: usize, state: Self::State) -> Self::State {
        md4digest(message, prefix_length, state)
    }

    fn state_to_bytes(state: &Self::State) -> Vec<u8> {
        serialize_state(state, Self::ENDIANNESS)
    }

    fn state_from_bytes(bytes: &[u8]) -> Result<Self::State, CryptoError> {
        deserialize_state(bytes, Self::ENDIANNESS)
    }
}
