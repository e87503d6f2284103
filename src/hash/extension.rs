//! Length-extension helpers.
//!
//! Given `H(M1)` and `|M1|` but not `M1` itself, any of the Merkle–Damgård
//! hashes in this crate can produce `H(M1 ++ glue ++ M2)` for a chosen
//! `M2`, where `glue` is the padding that `M1` received. This module builds
//! the glue and packages the forged message tail with its digest.

use tracing::debug;

use super::padding::padding_bytes;
use super::IteratedHash;
use crate::error::CryptoError;

/// A forged continuation of an unknown message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Bytes to append to the original message: its padding, then the suffix.
    pub tail: Vec<u8>,
    /// Digest of the original message followed by `tail`.
    pub digest: Vec<u8>,
}

/// Returns the padding `H` appends to a fresh message of `prefix_length` bytes.
///
/// # Examples
/// ```
/// use cryptolib::hash::extension::glue_padding;
/// use cryptolib::hash::Sha1;
///
/// let glue = glue_padding::<Sha1>(3);
/// assert_eq!(glue.len(), 61);
/// assert_eq!(glue[0], 0x80);
/// assert_eq!(glue[60], 24);
/// ```
pub fn glue_padding<H: IteratedHash>(prefix_length: usize) -> Vec<u8> {
    padding_bytes(prefix_length, 0, H::ENDIANNESS)
}

/// Forges `H(M1 ++ glue ++ suffix)` from `H(M1)` and `|M1|`.
///
/// # Parameters
/// - `prev_hash`: Digest of the unknown message `M1`.
/// - `prev_len`: Length of `M1` in bytes; must be non-zero.
/// - `suffix`: Attacker-chosen bytes to append.
///
/// # Returns
/// The [`Extension`] holding `glue ++ suffix` and the forged digest.
///
/// # Errors
/// Returns [`CryptoError::InvalidDigestLength`] if `prev_hash` is not a
/// digest of `H`.
pub fn forge<H: IteratedHash>(
    prev_hash: &[u8],
    prev_len: usize,
    suffix: &[u8],
) -> Result<Extension, CryptoError> {
    let digest = H::extend(prev_hash, prev_len, suffix)?;
    let mut tail = glue_padding::<H>(prev_len);
    tail.extend_from_slice(suffix);
    debug!(
        hash = H::NAME,
        prev_len,
        tail_len = tail.len(),
        "forged length extension"
    );
    Ok(Extension { tail, digest })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Md4, Md5, Sha1, Sha256};

    fn check_forgery<H: IteratedHash>() {
        let secret = b"do-not-reveal:comment=10;user=bob";
        let suffix = b";role=admin";
        let forged = forge::<H>(&H::hash(secret), secret.len(), suffix).expect("valid digest");

        let mut full = secret.to_vec();
        full.extend_from_slice(&forged.tail);
        assert_eq!(forged.digest, H::hash(&full), "{}", H::NAME);
        assert!(forged.tail.ends_with(suffix));
    }

    #[test]
    fn test_forgery_for_every_hash() {
        check_forgery::<Sha1>();
        check_forgery::<Sha256>();
        check_forgery::<Md4>();
        check_forgery::<Md5>();
    }

    #[test]
    fn test_glue_padding_byte_order() {
        let big = glue_padding::<Sha256>(10);
        let little = glue_padding::<Md5>(10);
        assert_eq!(&big[big.len() - 8..], &80u64.to_be_bytes());
        assert_eq!(&little[little.len() - 8..], &80u64.to_le_bytes());
    }

    #[test]
    fn test_forge_rejects_foreign_digest() {
        let md5 = Md5::hash(b"abc");
        assert!(matches!(
            forge::<Sha1>(&md5, 3, b"x"),
            Err(CryptoError::InvalidDigestLength { .. })
        ));
    }
}
