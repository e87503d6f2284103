//! Davies–Meyer hashing driver.
//!
//! Turns a block cipher whose key is one 512-bit chunk into a compression
//! function: each chunk keys the cipher, the running digest is encrypted,
//! and the previous digest is added back word by word. With SHACAL-1 and
//! SHACAL-2 this yields SHA-1 and SHA-256.

use tracing::{debug, trace};

use super::padding::{preprocess, CHUNK_WORDS};
use crate::cipher::BlockCipher;
use crate::utils::converter::Endianness;

/// Compresses a single 16-word chunk into the digest.
///
/// # Parameters
/// - `chunk`: One chunk of the padded message, used as the cipher key.
/// - `digest`: The chaining value before this chunk.
///
/// # Returns
/// `E(chunk, digest) + digest`, added word-wise modulo 2^32.
pub fn compress<C, const N: usize>(chunk: &[u32; CHUNK_WORDS], digest: [u32; N]) -> [u32; N]
where
    C: BlockCipher<Key = [u32; CHUNK_WORDS], Block = [u32; N]>,
{
    let schedule = C::expand_key(chunk);
    let mut next = C::encrypt(&schedule, digest);
    for (word, previous) in next.iter_mut().zip(digest) {
        *word = word.wrapping_add(previous);
    }
    next
}

/// Hashes `message` starting from `digest`.
///
/// The message is padded big-endian, with the length field counting a
/// prefix of `prefix_length` bytes that is assumed to be already folded
/// into `digest`. Pass the algorithm's initial value and 0 for a fresh
/// hash; pass an earlier digest and the earlier message's length to extend
/// it. The driver itself makes no distinction between the two.
///
/// # Parameters
/// - `message`: Bytes to hash.
/// - `prefix_length`: Length of the already-hashed prefix, or 0.
/// - `digest`: Starting chaining value.
///
/// # Returns
/// The final chaining value.
pub fn davies_meyer<C, const N: usize>(
    message: &[u8],
    prefix_length: usize,
    digest: [u32; N],
) -> [u32; N]
where
    C: BlockCipher<Key = [u32; CHUNK_WORDS], Block = [u32; N]>,
{
    let buffer = preprocess(message, prefix_length, Endianness::Big);
    let chunks = buffer.chunks_exact(CHUNK_WORDS);
    let cipher = core::any::type_name::<C>();
    debug!(
        cipher,
        message_len = message.len(),
        prefix_length,
        chunks = chunks.len(),
        "davies-meyer digest"
    );

    chunks.enumerate().fold(digest, |state, (index, words)| {
        let mut chunk = [0u32; CHUNK_WORDS];
        chunk.copy_from_slice(words);
        trace!(chunk = index, "compressing chunk");
        compress::<C, N>(&chunk, state)
    })
}
