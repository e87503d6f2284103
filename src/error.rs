//! Error types for the cryptolib library.
//!
//! The cipher engines, the padding step and the hash drivers are total over
//! their sized inputs. Errors only arise where untyped input (slices) is
//! turned into the fixed-size keys, digests and buffers those cores consume.

use thiserror::Error;

/// Errors produced by the cryptolib library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Key material does not have one of the lengths the cipher accepts.
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Accepted length(s), rendered for the message.
        expected: &'static str,
        /// Length that was supplied.
        actual: usize,
    },
    /// A serialized digest does not match the digest size of the hash.
    #[error("Invalid digest length: expected {expected} bytes, got {actual}")]
    InvalidDigestLength {
        /// Digest size of the hash function.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
    /// Byte array length is not a multiple of the word size.
    #[error("Byte array length is not a multiple of the required value")]
    InvalidByteArrayLength,
    /// Ciphertext is empty or not a whole number of blocks.
    #[error("Ciphertext length is not a positive multiple of the block size")]
    InvalidCiphertextLength,
    /// PKCS#7 block length cannot be counted by a single pad byte.
    #[error("Invalid block length: expected 1 to 255 bytes, got {actual}")]
    InvalidBlockLength {
        /// Block length that was supplied.
        actual: usize,
    },
    /// PKCS#7 padding bytes are malformed.
    #[error("Invalid PKCS#7 padding")]
    InvalidPadding,
    /// Wrong number of generator outputs to rebuild a Mersenne Twister state.
    #[error("Invalid state length: expected {expected} values, got {actual}")]
    InvalidStateLength {
        /// Number of state words of the generator.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
}
