//! Merkle–Damgård strengthening for the 512-bit-block hashes.
//!
//! A message is followed by a single `0x80` byte, zero fill, and the 64-bit
//! bit length of everything hashed so far, so that the total is a whole
//! number of 64-byte chunks. The length field accounts for an optional
//! already-hashed prefix, which is what makes length extension possible:
//! a digest can resume from the state left by a prefix of known length.

use crate::utils::converter::{Endianness, BYTES_PER_WORD};

/// Bytes per compression chunk.
pub const CHUNK_BYTES: usize = 64;

/// Words per compression chunk.
pub const CHUNK_WORDS: usize = CHUNK_BYTES / BYTES_PER_WORD;

/// Bytes reserved at the end of the final chunk for the bit length.
const LENGTH_BYTES: usize = 8;

/// Marker byte that terminates the message.
const MARKER: u8 = 0x80;

/// Returns the number of words needed to hold a padded message.
///
/// The result is the smallest word count that fits the message, the `0x80`
/// marker and the 8-byte length while being a multiple of 16 words.
///
/// # Parameters
/// - `message_length`: Length of the unpadded message in bytes.
///
/// # Returns
/// The padded length in 32-bit words.
///
/// # Examples
/// ```
/// use cryptolib::hash::padding::determine_padded_length;
///
/// assert_eq!(determine_padded_length(0), 16);
/// assert_eq!(determine_padded_length(55), 16);
/// assert_eq!(determine_padded_length(56), 32);
/// ```
pub fn determine_padded_length(message_length: usize) -> usize {
    (padded_bytes(message_length as u64) / BYTES_PER_WORD as u64) as usize
}

/// Padded byte count of a `length`-byte message, modulo 2^64.
///
/// Lengths are caller-supplied when extending a digest, so the sum wraps
/// like the 64-bit length field it feeds.
fn padded_bytes(length: u64) -> u64 {
    let with_marker = length.wrapping_add(1);
    let misalignment = (with_marker % CHUNK_BYTES as u64) as usize;
    let zero_fill = (CHUNK_BYTES - LENGTH_BYTES + CHUNK_BYTES - misalignment) % CHUNK_BYTES;
    with_marker.wrapping_add((zero_fill + LENGTH_BYTES) as u64)
}

fn prefix_bytes(prefix_length: usize) -> u64 {
    if prefix_length == 0 {
        0
    } else {
        padded_bytes(prefix_length as u64)
    }
}

/// Bytes consumed by a prefix once it has been padded.
///
/// A zero-length prefix means there is no prefix at all, not an empty
/// padded message.
pub fn padded_prefix_bytes(prefix_length: usize) -> usize {
    prefix_bytes(prefix_length) as usize
}

/// Builds the bytes that padding appends after a message.
///
/// This is the marker, the zero fill and the length field, without the
/// message itself. Its length is always between 9 and 72 bytes.
///
/// # Parameters
/// - `message_length`: Length of the message being padded.
/// - `prefix_length`: Length of an already-hashed prefix, or 0.
/// - `order`: Byte order of the length field.
pub fn padding_bytes(message_length: usize, prefix_length: usize, order: Endianness) -> Vec<u8> {
    let length = message_length as u64;
    let suffix_length = padded_bytes(length).wrapping_sub(length) as usize;
    let mut suffix = vec![0u8; suffix_length];
    suffix[0] = MARKER;

    let bit_length = length
        .wrapping_add(prefix_bytes(prefix_length))
        .wrapping_mul(8);
    let length_field = match order {
        Endianness::Big => bit_length.to_be_bytes(),
        Endianness::Little => bit_length.to_le_bytes(),
    };
    let tail = suffix.len() - LENGTH_BYTES;
    suffix[tail..].copy_from_slice(&length_field);
    suffix
}

/// Returns the padded message as bytes.
///
/// # Parameters
/// - `message`: The message to pad.
/// - `prefix_length`: Length of an already-hashed prefix, or 0.
/// - `order`: Byte order of the length field.
///
/// # Returns
/// `message` followed by [`padding_bytes`]; the length is a multiple of 64.
pub fn pad_message(message: &[u8], prefix_length: usize, order: Endianness) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(determine_padded_length(message.len()) * BYTES_PER_WORD);
    buffer.extend_from_slice(message);
    buffer.extend_from_slice(&padding_bytes(message.len(), prefix_length, order));
    buffer
}

/// Pads a message and packs it into words.
///
/// With [`Endianness::Big`] the first message byte becomes the most
/// significant byte of word 0 and the length occupies the last two words,
/// high word first. With [`Endianness::Little`] the first byte is the least
/// significant byte of word 0 and the length is stored low word first.
///
/// # Parameters
/// - `message`: The message to pad.
/// - `prefix_length`: Length of an already-hashed prefix, or 0.
/// - `order`: Byte order for packing and for the length field.
///
/// # Returns
/// A buffer of [`determine_padded_length`] words.
pub fn preprocess(message: &[u8], prefix_length: usize, order: Endianness) -> Vec<u32> {
    pad_message(message, prefix_length, order)
        .chunks_exact(BYTES_PER_WORD)
        .map(|chunk| order.word_from_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
