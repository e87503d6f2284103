//! Message authentication codes over the iterated hashes.
//!
//! [`PrefixMac`] is the naive `H(key ++ message)` construction, which any
//! Merkle–Damgård hash makes forgeable by length extension.
//! [`Hmac`] is RFC 2104 and is not.

use std::marker::PhantomData;

use crate::hash::IteratedHash;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Compares two tags without an early exit on the first difference.
fn tags_equal(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Secret-prefix MAC: `tag = H(key ++ message)`.
#[derive(Clone)]
pub struct PrefixMac<H: IteratedHash> {
    key: Vec<u8>,
    _hash: PhantomData<H>,
}

impl<H: IteratedHash> PrefixMac<H> {
    /// Creates a MAC with the given key.
    pub fn new(key: &[u8]) -> Self {
        Self {
            key: key.to_vec(),
            _hash: PhantomData,
        }
    }

    /// Computes the tag of `message`.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let mut input = Vec::with_capacity(self.key.len() + message.len());
        input.extend_from_slice(&self.key);
        input.extend_from_slice(message);
        H::hash(&input)
    }

    /// Checks `tag` against the tag of `message`.
    pub fn verify(&self, message: &[u8], tag: &[u8]) -> bool {
        tags_equal(&self.sign(message), tag)
    }
}

impl<H: IteratedHash> std::fmt::Debug for PrefixMac<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixMac")
            .field("hash", &H::NAME)
            .field("key_len", &self.key.len())
            .finish()
    }
}

/// HMAC (RFC 2104) over any [`IteratedHash`].
///
/// Keys longer than [`IteratedHash::BLOCK_BYTES`] are hashed first; the
/// result is zero-padded to a full block and xored with the inner and outer
/// pads once, at construction.
///
/// # Examples
/// ```
/// use cryptolib::hash::Md5;
/// use cryptolib::mac::Hmac;
///
/// let mac = Hmac::<Md5>::new(b"Jefe");
/// let tag = mac.sign(b"what do ya want for nothing?");
/// assert_eq!(hex::encode(tag), "750c783e6ab0b503eaa86e310a5db738");
/// ```
#[derive(Clone)]
pub struct Hmac<H: IteratedHash> {
    inner_key: Vec<u8>,
    outer_key: Vec<u8>,
    _hash: PhantomData<H>,
}

impl<H: IteratedHash> Hmac<H> {
    /// Creates an HMAC with the given key.
    pub fn new(key: &[u8]) -> Self {
        let mut block = if key.len() > H::BLOCK_BYTES {
            H::hash(key)
        } else {
            key.to_vec()
        };
        block.resize(H::BLOCK_BYTES, 0);

        Self {
            inner_key: block.iter().map(|b| b ^ IPAD).collect(),
            outer_key: block.iter().map(|b| b ^ OPAD).collect(),
            _hash: PhantomData,
        }
    }

    /// Computes `H((K ^ opad) ++ H((K ^ ipad) ++ message))`.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let mut inner = Vec::with_capacity(H::BLOCK_BYTES + message.len());
        inner.extend_from_slice(&self.inner_key);
        inner.extend_from_slice(message);
        let inner_digest = H::hash(&inner);

        let mut outer = Vec::with_capacity(H::BLOCK_BYTES + inner_digest.len());
        outer.extend_from_slice(&self.outer_key);
        outer.extend_from_slice(&inner_digest);
        H::hash(&outer)
    }

    /// Checks `tag` against the tag of `message`.
    pub fn verify(&self, message: &[u8], tag: &[u8]) -> bool {
        tags_equal(&self.sign(message), tag)
    }
}

impl<H: IteratedHash> std::fmt::Debug for Hmac<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hmac").field("hash", &H::NAME).finish_non_exhaustive()
    }
}
