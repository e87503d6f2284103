//! Iterated hash functions.
//!
//! SHA-1 and SHA-256 are built from the SHACAL ciphers through the
//! [`davies_meyer`] driver; MD4 and MD5 use their own ARX compression
//! functions over the same Merkle–Damgård [`padding`]. MD2 stands apart with
//! its own checksum-based padding.
//!
//! Every Merkle–Damgård hash here exposes its chaining state directly. A
//! digest is that state serialized, so a digest can be loaded back and the
//! computation continued: see [`IteratedHash::extend`] and [`extension`].

pub mod davies_meyer;
pub mod extension;
pub mod md2;
pub mod md4;
pub mod md5;
pub mod padding;
pub mod sha1;
pub mod sha256;

pub use md2::md2digest;
pub use md4::{md4digest, Md4};
pub use md5::{md5digest, Md5};
pub use sha1::{sha1digest, Sha1};
pub use sha256::{sha256digest, Sha256};

use crate::error::CryptoError;
use crate::utils::converter::{bytes_to_word_array, words_to_bytes, Endianness, BYTES_PER_WORD};

/// A Merkle–Damgård hash with an exposed chaining state.
///
/// Implementors supply the state type, its initial value, the digest loop
/// and the state serialization; one-shot hashing and length extension come
/// for free.
pub trait IteratedHash {
    /// Human-readable algorithm name.
    const NAME: &'static str;
    /// Digest size in bytes.
    const DIGEST_BYTES: usize;
    /// Compression block size in bytes.
    const BLOCK_BYTES: usize = padding::CHUNK_BYTES;
    /// Byte order used for padding and for serializing the state.
    const ENDIANNESS: Endianness;

    /// The chaining value.
    type State: Copy;

    /// The standard initial value.
    fn initial_state() -> Self::State;

    /// Hashes `message` from `state`, treating `prefix_length` bytes as
    /// already absorbed (0 for a fresh hash).
    fn digest_state(message: &[u8], prefix_length: usize, state: Self::State) -> Self::State;

    /// Serializes a state into digest bytes.
    fn state_to_bytes(state: &Self::State) -> Vec<u8>;

    /// Loads a state from digest bytes.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidDigestLength`] unless `bytes` is
    /// exactly [`DIGEST_BYTES`](Self::DIGEST_BYTES) long.
    fn state_from_bytes(bytes: &[u8]) -> Result<Self::State, CryptoError>;

    /// Computes the digest of `message`.
    fn hash(message: &[u8]) -> Vec<u8> {
        Self::state_to_bytes(&Self::digest_state(message, 0, Self::initial_state()))
    }

    /// Continues a digest as if `suffix` had been appended to the padded
    /// original message.
    ///
    /// The result equals `hash(M1 ++ glue ++ suffix)` where `M1` is the
    /// `prev_len`-byte message behind `prev_hash` and `glue` is its padding.
    /// `prev_len` must be non-zero: a zero prefix length means a fresh hash.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidDigestLength`] if `prev_hash` has the
    /// wrong size.
    fn extend(prev_hash: &[u8], prev_len: usize, suffix: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let state = Self::state_from_bytes(prev_hash)?;
        Ok(Self::state_to_bytes(&Self::digest_state(suffix, prev_len, state)))
    }
}

/// Serializes a word state in the given byte order.
pub(crate) fn serialize_state<const N: usize>(state: &[u32; N], order: Endianness) -> Vec<u8> {
    words_to_bytes(state, order)
}

/// Parses a word state, reporting size mismatches as digest errors.
pub(crate) fn deserialize_state<const N: usize>(
    bytes: &[u8],
    order: Endianness,
) -> Result<[u32; N], CryptoError> {
    bytes_to_word_array(bytes, order).map_err(|_| CryptoError::InvalidDigestLength {
        expected: N * BYTES_PER_WORD,
        actual: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip_big_endian() {
        let state = [0x0102_0304u32, 0xa0b0_c0d0];
        let bytes = serialize_state(&state, Endianness::Big);
        assert_eq!(bytes, [1, 2, 3, 4, 0xa0, 0xb0, 0xc0, 0xd0]);
        assert_eq!(deserialize_state::<2>(&bytes, Endianness::Big), Ok(state));
    }

    #[test]
    fn test_deserialize_rejects_wrong_size() {
        assert_eq!(
            deserialize_state::<5>(&[0u8; 16], Endianness::Big),
            Err(CryptoError::InvalidDigestLength {
                expected: 20,
                actual: 16
            })
        );
    }

    #[test]
    fn test_block_bytes_default() {
        assert_eq!(Sha1::BLOCK_BYTES, 64);
        assert_eq!(Md5::BLOCK_BYTES, 64);
    }
}
