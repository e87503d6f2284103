//! Conversions between the byte view and the 32-bit word view of a buffer.
//!
//! Blocks and digests have two equivalent representations. The byte view is
//! authoritative: byte `i` is always byte `i`, whatever the host endianness.
//! Every conversion names its byte order explicitly instead of reinterpreting
//! memory.

use crate::error::CryptoError;

/// Number of bytes in a 32-bit word.
pub const BYTES_PER_WORD: usize = 4;

/// Byte order used when packing bytes into 32-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// First byte is the most significant byte of the word (SHA family, AES).
    Big,
    /// First byte is the least significant byte of the word (MD4, MD5).
    Little,
}

impl Endianness {
    /// Packs four bytes into a word using this byte order.
    #[inline]
    pub fn word_from_bytes(self, bytes: [u8; BYTES_PER_WORD]) -> u32 {
        match self {
            Endianness::Big => u32::from_be_bytes(bytes),
            Endianness::Little => u32::from_le_bytes(bytes),
        }
    }

    /// Unpacks a word into four bytes using this byte order.
    #[inline]
    pub fn word_to_bytes(self, word: u32) -> [u8; BYTES_PER_WORD] {
        match self {
            Endianness::Big => word.to_be_bytes(),
            Endianness::Little => word.to_le_bytes(),
        }
    }
}

/// Converts a byte slice to a `Vec<u32>` using the given byte order.
///
/// # Parameters
/// - `input`: Byte slice whose length must be a multiple of 4.
/// - `order`: How each group of four bytes maps onto a word.
///
/// # Returns
/// A `Vec<u32>` containing `input.len() / 4` elements.
///
/// # Errors
/// Returns [`CryptoError::InvalidByteArrayLength`] if `input.len() % 4 != 0`.
pub fn bytes_to_words(input: &[u8], order: Endianness) -> Result<Vec<u32>, CryptoError> {
    if !input.len().is_multiple_of(BYTES_PER_WORD) {
        return Err(CryptoError::InvalidByteArrayLength);
    }
    Ok(input
        .chunks_exact(BYTES_PER_WORD)
        .map(|chunk| {
            let mut bytes = [0u8; BYTES_PER_WORD];
            bytes.copy_from_slice(chunk);
            order.word_from_bytes(bytes)
        })
        .collect())
}

/// Converts a slice of words to a `Vec<u8>` using the given byte order.
///
/// # Returns
/// A `Vec<u8>` containing `input.len() * 4` bytes.
pub fn words_to_bytes(input: &[u32], order: Endianness) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len() * BYTES_PER_WORD);
    for &word in input {
        output.extend_from_slice(&order.word_to_bytes(word));
    }
    output
}

/// Converts exactly `4 * N` bytes into a fixed-size word array.
///
/// # Errors
/// Returns [`CryptoError::InvalidByteArrayLength`] if `input.len() != 4 * N`.
pub fn bytes_to_word_array<const N: usize>(
    input: &[u8],
    order: Endianness,
) -> Result<[u32; N], CryptoError> {
    if input.len() != N * BYTES_PER_WORD {
        return Err(CryptoError::InvalidByteArrayLength);
    }
    let mut output = [0u32; N];
    for (word, chunk) in output.iter_mut().zip(input.chunks_exact(BYTES_PER_WORD)) {
        let mut bytes = [0u8; BYTES_PER_WORD];
        bytes.copy_from_slice(chunk);
        *word = order.word_from_bytes(bytes);
    }
    Ok(output)
}
