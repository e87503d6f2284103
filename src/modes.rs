//! ECB and CBC chaining over 128-bit block ciphers, with PKCS#7 padding.

use tracing::debug;

use crate::cipher::BlockCipher;
use crate::error::CryptoError;

/// Block size handled by the chaining modes.
pub const BLOCK_BYTES: usize = 16;

type Block = [u8; BLOCK_BYTES];

/// Pad byte count of the chaining modes' block.
const BLOCK_PAD_LEN: u8 = BLOCK_BYTES as u8;

/// Narrows a PKCS#7 block length to the pad byte range `1..=255`.
fn pad_block_len(block_len: usize) -> Result<u8, CryptoError> {
    match u8::try_from(block_len) {
        Ok(len) if len > 0 => Ok(len),
        _ => Err(CryptoError::InvalidBlockLength { actual: block_len }),
    }
}

fn pad(data: &[u8], block_len: u8) -> Vec<u8> {
    let count = block_len - (data.len() % usize::from(block_len)) as u8;
    let mut padded = Vec::with_capacity(data.len() + usize::from(count));
    padded.extend_from_slice(data);
    padded.resize(data.len() + usize::from(count), count);
    padded
}

/// Appends PKCS#7 padding so the length is a multiple of `block_len`.
///
/// A full block of padding is added when the input is already aligned.
///
/// # Errors
/// Returns [`CryptoError::InvalidBlockLength`] unless `block_len` is in
/// `1..=255`, the range a single pad byte can count.
pub fn pkcs7_pad(data: &[u8], block_len: usize) -> Result<Vec<u8>, CryptoError> {
    Ok(pad(data, pad_block_len(block_len)?))
}

/// Strips and validates PKCS#7 padding.
///
/// # Errors
/// Returns [`CryptoError::InvalidBlockLength`] unless `block_len` is in
/// `1..=255`, and [`CryptoError::InvalidPadding`] if the data is empty, not
/// block aligned, or does not end in `n` copies of a byte `n` in
/// `1..=block_len`.
pub fn pkcs7_unpad(data: &[u8], block_len: usize) -> Result<Vec<u8>, CryptoError> {
    let block_len = usize::from(pad_block_len(block_len)?);
    if data.is_empty() || !data.len().is_multiple_of(block_len) {
        return Err(CryptoError::InvalidPadding);
    }
    let pad = usize::from(data[data.len() - 1]);
    if pad == 0 || pad > block_len {
        return Err(CryptoError::InvalidPadding);
    }
    let (body, padding) = data.split_at(data.len() - pad);
    if padding.iter().any(|&b| usize::from(b) != pad) {
        return Err(CryptoError::InvalidPadding);
    }
    Ok(body.to_vec())
}

fn to_block(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_BYTES];
    block.copy_from_slice(chunk);
    block
}

fn xor_block(a: Block, b: &Block) -> Block {
    let mut out = a;
    for (x, y) in out.iter_mut().zip(b) {
        *x ^= y;
    }
    out
}

fn check_ciphertext(ciphertext: &[u8]) -> Result<(), CryptoError> {
    if ciphertext.is_empty() || !ciphertext.len().is_multiple_of(BLOCK_BYTES) {
        return Err(CryptoError::InvalidCiphertextLength);
    }
    Ok(())
}

/// Electronic codebook mode: every block is encrypted independently.
pub struct Ecb<C: BlockCipher<Block = Block>> {
    schedule: C::Schedule,
}

impl<C: BlockCipher<Block = Block>> Ecb<C> {
    /// Expands `key` once for all subsequent calls.
    pub fn new(key: &C::Key) -> Self {
        Self {
            schedule: C::expand_key(key),
        }
    }

    /// Pads and encrypts `plaintext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let padded = pad(plaintext, BLOCK_PAD_LEN);
        debug!(blocks = padded.len() / BLOCK_BYTES, "ecb encrypt");
        padded
            .chunks_exact(BLOCK_BYTES)
            .flat_map(|chunk| C::encrypt(&self.schedule, to_block(chunk)))
            .collect()
    }

    /// Decrypts `ciphertext` and strips the padding.
    ///
    /// # Errors
    /// [`CryptoError::InvalidCiphertextLength`] for empty or unaligned
    /// input, [`CryptoError::InvalidPadding`] for bad padding.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        check_ciphertext(ciphertext)?;
        let padded: Vec<u8> = ciphertext
            .chunks_exact(BLOCK_BYTES)
            .flat_map(|chunk| C::decrypt(&self.schedule, to_block(chunk)))
            .collect();
        pkcs7_unpad(&padded, BLOCK_BYTES)
    }
}

/// Cipher block chaining mode with a fixed initialization vector.
pub struct Cbc<C: BlockCipher<Block = Block>> {
    schedule: C::Schedule,
    iv: Block,
}

impl<C: BlockCipher<Block = Block>> Cbc<C> {
    /// Expands `key` and stores the IV.
    pub fn new(key: &C::Key, iv: [u8; BLOCK_BYTES]) -> Self {
        Self {
            schedule: C::expand_key(key),
            iv,
        }
    }

    /// The initialization vector.
    pub fn iv(&self) -> &[u8; BLOCK_BYTES] {
        &self.iv
    }

    /// Pads and encrypts `plaintext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let padded = pad(plaintext, BLOCK_PAD_LEN);
        debug!(blocks = padded.len() / BLOCK_BYTES, "cbc encrypt");
        let mut output = Vec::with_capacity(padded.len());
        let mut previous = self.iv;
        for chunk in padded.chunks_exact(BLOCK_BYTES) {
            previous = C::encrypt(&self.schedule, xor_block(to_block(chunk), &previous));
            output.extend_from_slice(&previous);
        }
        output
    }

    /// Decrypts `ciphertext` and strips the padding.
    ///
    /// # Errors
    /// [`CryptoError::InvalidCiphertextLength`] for empty or unaligned
    /// input, [`CryptoError::InvalidPadding`] for bad padding.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        check_ciphertext(ciphertext)?;
        let mut padded = Vec::with_capacity(ciphertext.len());
        let mut previous = self.iv;
        for chunk in ciphertext.chunks_exact(BLOCK_BYTES) {
            let block = to_block(chunk);
            padded.extend_from_slice(&xor_block(C::decrypt(&self.schedule, block), &previous));
            previous = block;
        }
        pkcs7_unpad(&padded, BLOCK_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{Aes, AesKey};
    use hex_literal::hex;

    const KEY: [u8; 16] = hex!("2b7e151628aed2a6abf7158809cf4f3c");
    const PLAINTEXT: [u8; 16] = hex!("6bc1bee22e409f96e93d7e117393172a");

    #[test]
    fn test_pkcs7_pad() {
        assert_eq!(
            pkcs7_pad(b"YELLOW SUBMARINE", 20),
            Ok(b"YELLOW SUBMARINE\x04\x04\x04\x04".to_vec())
        );
        assert_eq!(pkcs7_pad(b"", 4), Ok(vec![4u8; 4]));
        assert_eq!(pkcs7_pad(b"abcd", 4).map(|p| p.len()), Ok(8));
    }

    #[test]
    fn test_pkcs7_largest_block_len() {
        let padded = pkcs7_pad(&[1u8; 10], 255).unwrap();
        assert_eq!(padded.len(), 255);
        assert_eq!(padded[254], 245);
        assert_eq!(pkcs7_unpad(&padded, 255), Ok(vec![1u8; 10]));
    }

    #[test]
    fn test_pkcs7_rejects_block_len_out_of_range() {
        assert_eq!(
            pkcs7_pad(b"abc", 0),
            Err(CryptoError::InvalidBlockLength { actual: 0 })
        );
        assert_eq!(
            pkcs7_pad(&[1u8; 256], 256),
            Err(CryptoError::InvalidBlockLength { actual: 256 })
        );
        assert_eq!(
            pkcs7_unpad(&[1u8; 16], 0),
            Err(CryptoError::InvalidBlockLength { actual: 0 })
        );
        assert_eq!(
            pkcs7_unpad(&[1u8; 256], 256),
            Err(CryptoError::InvalidBlockLength { actual: 256 })
        );
    }

    #[test]
    fn test_pkcs7_unpad() {
        assert_eq!(pkcs7_unpad(b"ICE ICE BABY\x04\x04\x04\x04", 16), Ok(b"ICE ICE BABY".to_vec()));
        assert_eq!(
            pkcs7_unpad(b"ICE ICE BABY\x05\x05\x05\x05", 16),
            Err(CryptoError::InvalidPadding)
        );
        assert_eq!(
            pkcs7_unpad(b"ICE ICE BABY\x01\x02\x03\x04", 16),
            Err(CryptoError::InvalidPadding)
        );
        assert_eq!(pkcs7_unpad(&[0u8; 16], 16), Err(CryptoError::InvalidPadding));
        assert_eq!(pkcs7_unpad(b"", 16), Err(CryptoError::InvalidPadding));
    }

    #[test]
    fn test_ecb_sp800_38a_first_block() {
        let ecb = Ecb::<Aes>::new(&AesKey::from(KEY));
        let ciphertext = ecb.encrypt(&PLAINTEXT);
        assert_eq!(
            ciphertext,
            hex!("3ad77bb40d7a3660a89ecaf32466ef97a254be88e037ddd9d79fb6411c3f9df8")
        );
        assert_eq!(ecb.decrypt(&ciphertext), Ok(PLAINTEXT.to_vec()));
    }

    #[test]
    fn test_cbc_sp800_38a_first_block() {
        let iv = hex!("000102030405060708090a0b0c0d0e0f");
        let cbc = Cbc::<Aes>::new(&AesKey::from(KEY), iv);
        let ciphertext = cbc.encrypt(&PLAINTEXT);
        assert_eq!(
            ciphertext,
            hex!("7649abac8119b246cee98e9b12e9197d8964e0b149c10b7b682e6e39aaeb731c")
        );
        assert_eq!(cbc.decrypt(&ciphertext), Ok(PLAINTEXT.to_vec()));
        assert_eq!(cbc.iv(), &iv);
    }

    #[test]
    fn test_ecb_repeats_cbc_does_not() {
        let key = AesKey::from([7u8; 32]);
        let message = [0x41u8; 32];
        let ecb = Ecb::<Aes>::new(&key).encrypt(&message);
        let cbc = Cbc::<Aes>::new(&key, [9u8; 16]).encrypt(&message);
        assert_eq!(ecb[..16], ecb[16..32]);
        assert_ne!(cbc[..16], cbc[16..32]);
    }

    #[test]
    fn test_decrypt_rejects_bad_length() {
        let cbc = Cbc::<Aes>::new(&AesKey::from(KEY), [0u8; 16]);
        assert_eq!(cbc.decrypt(&[0u8; 15]), Err(CryptoError::InvalidCiphertextLength));
        assert_eq!(cbc.decrypt(&[]), Err(CryptoError::InvalidCiphertextLength));
        let ecb = Ecb::<Aes>::new(&AesKey::from(KEY));
        assert_eq!(ecb.decrypt(&[0u8; 17]), Err(CryptoError::InvalidCiphertextLength));
    }
}
