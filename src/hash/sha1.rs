//! SHA-1 as Davies–Meyer over SHACAL-1.

use super::davies_meyer::davies_meyer;
use super::{deserialize_state, serialize_state, IteratedHash};
use crate::cipher::shacal1::{Shacal1, WORDS_PER_BLOCK};
use crate::error::CryptoError;
use crate::utils::converter::Endianness;

/// Digest size in bytes.
pub const DIGEST_BYTES: usize = 20;

/// FIPS 180-4 initial hash value.
pub const INITIAL_STATE: [u32; WORDS_PER_BLOCK] =
    [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476, 0xC3D2_E1F0];

/// Computes SHA-1 of `message` starting from `digest`.
///
/// Use [`INITIAL_STATE`] and a `prefix_length` of 0 for a standard hash,
/// or a previous digest and the previous message length to extend it.
///
/// # Examples
/// ```
/// use cryptolib::hash::sha1::{sha1digest, INITIAL_STATE};
///
/// let digest = sha1digest(b"abc", 0, INITIAL_STATE);
/// assert_eq!(digest[0], 0xa9993e36);
/// ```
pub fn sha1digest(
    message: &[u8],
    prefix_length: usize,
    digest: [u32; WORDS_PER_BLOCK],
) -> [u32; WORDS_PER_BLOCK] {
    davies_meyer::<Shacal1, WORDS_PER_BLOCK>(message, prefix_length, digest)
}

/// SHA-1 marker type for [`IteratedHash`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha1;

impl IteratedHash for Sha1 {
    const NAME: &'static str = "SHA-1";
    const DIGEST_BYTES: usize = DIGEST_BYTES;
    const ENDIANNESS: Endianness = Endianness::Big;

    type State = [u32; WORDS_PER_BLOCK];

    fn initial_state() -> Self::State {
        INITIAL_STATE
    }

    fn digest_state(message: &[u8], prefix_length: usize, state: Self::State) -> Self::State {
        sha1digest(message, prefix_length, state)
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
    use crate::hash::padding::padding_bytes;

    #[test]
    fn test_fips_vectors() {
        assert_eq!(
            hex::encode(Sha1::hash(b"abc")),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            hex::encode(Sha1::hash(b"")),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(
            hex::encode(Sha1::hash(
                b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"
            )),
            "84983e441c3bd26ebaae4aa1f95129e5e54670f1"
        );
    }

    #[test]
    fn test_extend_matches_glued_message() {
        let prefix = b"secret-key||user=alice";
        let suffix = b";admin=true";
        let prev = Sha1::hash(prefix);

        let mut glued = prefix.to_vec();
        glued.extend_from_slice(&padding_bytes(prefix.len(), 0, Endianness::Big));
        glued.extend_from_slice(suffix);

        assert_eq!(Sha1::extend(&prev, prefix.len(), suffix), Ok(Sha1::hash(&glued)));
    }

    #[test]
    fn test_state_from_bytes_wrong_length() {
        assert!(matches!(
            Sha1::state_from_bytes(&[0u8; 19]),
            Err(CryptoError::InvalidDigestLength { expected: 20, actual: 19 })
        ));
    }
}
