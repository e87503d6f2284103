//! SHA-256 as Davies–Meyer over SHACAL-2.

use super::davies_meyer::davies_meyer;
use super::{deserialize_state, serialize_state, IteratedHash};
use crate::cipher::shacal2::{Shacal2, WORDS_PER_BLOCK};
use crate::error::CryptoError;
use crate::utils::converter::Endianness;

/// Digest size in bytes.
pub const DIGEST_BYTES: usize = 32;

/// FIPS 180-4 initial hash value: the first 32 bits of the fractional parts
/// of the square roots of the first eight primes.
#[rustfmt::skip]
pub const INITIAL_STATE: [u32; WORDS_PER_BLOCK] = [
    0x6a09_e667, 0xbb67_ae85, 0x3c6e_f372, 0xa54f_f53a,
    0x510e_527f, 0x9b05_688c, 0x1f83_d9ab, 0x5be0_cd19,
];

/// Computes SHA-256 of `message` starting from `digest`.
///
/// # Parameters
/// - `message`: Bytes to hash.
/// - `prefix_length`: Length of an already-hashed prefix, or 0.
/// - `digest`: Starting state, normally [`INITIAL_STATE`].
///
/// # Returns
/// The final state; serialize it big-endian to get the usual digest bytes.
pub fn sha256digest(
    message: &[u8],
    prefix_length: usize,
    digest: [u32; WORDS_PER_BLOCK],
) -> [u32; WORDS_PER_BLOCK] {
    davies_meyer::<Shacal2, WORDS_PER_BLOCK>(message, prefix_length, digest)
}

/// SHA-256 marker type for [`IteratedHash`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256;

impl IteratedHash for Sha256 {
    const NAME: &'static str = "SHA-256";
    const DIGEST_BYTES: usize = DIGEST_BYTES;
    const ENDIANNESS: Endianness = Endianness::Big;

    type State = [u32; WORDS_PER_BLOCK];

    fn initial_state() -> Self::State {
        INITIAL_STATE
    }

    fn digest_state(message: &[u8], prefix_length: usize, state: Self::State) -> Self::State {
        sha256digest(message, prefix_length, state)
    }

    fn state_to_bytes(state: &Self::State) -> Vec<u8> {
        serialize_state(state, Self::ENDIANNESS)
    }

    fn state_from_bytes(bytes: &[u8]) -> Result<Self::State, CryptoError> {
        deserialize_state(bytes, Self::ENDIANNESS)
    }
}
