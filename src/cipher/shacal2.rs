//! SHACAL-2: the SHA-256 compression function run as a 256-bit block cipher.
//!
//! The 512-bit key is a message chunk expanded with the SHA-256 message
//! schedule; the plaintext is the 8-word chaining value. Each round key is
//! injected into both `A` and `E`, mirroring how `T1` feeds both words in
//! SHA-256.

use super::BlockCipher;
use crate::error::CryptoError;
use crate::utils::bits::{choice, majority};
use crate::utils::converter::{bytes_to_word_array, Endianness};

/// Words in a SHACAL-2 block.
pub const WORDS_PER_BLOCK: usize = 8;

/// Words in a SHACAL-2 key.
pub const WORDS_PER_KEY: usize = 16;

/// Bytes in a SHACAL-2 key.
pub const BYTES_PER_KEY: usize = WORDS_PER_KEY * 4;

/// Number of rounds, and of expanded key words.
pub const ROUNDS: usize = 64;

/// SHA-256 round constants (FIPS 180-4 section 4.2.2).
#[rustfmt::skip]
const K: [u32; ROUNDS] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// Eight-word SHACAL-2 block (`A..H`).
pub type Shacal2Block = [u32; WORDS_PER_BLOCK];

/// Sixteen-word SHACAL-2 key.
pub type Shacal2Key = [u32; WORDS_PER_KEY];

/// Expanded SHACAL-2 key with round constants already added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shacal2KeySchedule {
    round_keys: [u32; ROUNDS],
}

impl Shacal2KeySchedule {
    /// The 64 round words.
    pub fn round_keys(&self) -> &[u32; ROUNDS] {
        &self.round_keys
    }
}

#[inline]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Builds a key from 64 raw bytes, read as big-endian words.
///
/// # Errors
/// Returns [`CryptoError::InvalidKeyLength`] unless `bytes` is 64 bytes long.
pub fn key_from_bytes(bytes: &[u8]) -> Result<Shacal2Key, CryptoError> {
    bytes_to_word_array(bytes, Endianness::Big).map_err(|_| CryptoError::InvalidKeyLength {
        expected: "64",
        actual: bytes.len(),
    })
}

/// Expands a 16-word key to 64 round words.
///
/// `w[t] = σ1(w[t-2]) + w[t-7] + σ0(w[t-15]) + w[t-16]` for `t >= 16`; then
/// `K[t]` is added to every word.
pub fn expand_key(key: &Shacal2Key) -> Shacal2KeySchedule {
    let mut w = [0u32; ROUNDS];
    w[..WORDS_PER_KEY].copy_from_slice(key);
    for t in WORDS_PER_KEY..ROUNDS {
        w[t] = small_sigma1(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma0(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }
    for (word, k) in w.iter_mut().zip(K) {
        *word = word.wrapping_add(k);
    }
    Shacal2KeySchedule { round_keys: w }
}

/// Encrypts one block with 64 SHA-256 rounds.
pub fn encrypt(schedule: &Shacal2KeySchedule, block: Shacal2Block) -> Shacal2Block {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = block;
    for &round_key in &schedule.round_keys {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(choice(e, f, g));
        let t2 = big_sigma0(a).wrapping_add(majority(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1).wrapping_add(round_key);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2).wrapping_add(round_key);
    }
    [a, b, c, d, e, f, g, h]
}

/// Decrypts one block by running the rounds backwards.
pub fn decrypt(schedule: &Shacal2KeySchedule, block: Shacal2Block) -> Shacal2Block {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = block;
    for &round_key in schedule.round_keys.iter().rev() {
        a = a.wrapping_sub(round_key);
        e = e.wrapping_sub(round_key);
        let t2 = big_sigma0(b).wrapping_add(majority(b, c, d));
        let t1 = a.wrapping_sub(t2);
        a = b;
        b = c;
        c = d;
        d = e.wrapping_sub(t1);
        e = f;
        f = g;
        g = h;
        h = t1
            .wrapping_sub(big_sigma1(e))
            .wrapping_sub(choice(e, f, g));
    }
    [a, b, c, d, e, f, g, h]
}

/// SHACAL-2 as a [`BlockCipher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Shacal2;

impl BlockCipher for Shacal2 {
    type Key = Shacal2Key;
    type Block = Shacal2Block;
    type Schedule = Shacal2KeySchedule;

    fn expand_key(key: &Shacal2Key) -> Shacal2KeySchedule {
        expand_key(key)
    }

    fn encrypt(schedule: &Shacal2KeySchedule, block: Shacal2Block) -> Shacal2Block {
        encrypt(schedule, block)
    }

    fn decrypt(schedule: &Shacal2KeySchedule, block: Shacal2Block) -> Shacal2Block {
        decrypt(schedule, block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IV: Shacal2Block = [
        0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab,
        0x5be0cd19,
    ];

    const ABC_KEY: Shacal2Key = [
        0x61626380, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x18,
    ];

    /// SHA-256("abc") minus the IV, word by word.
    fn abc_ciphertext() -> Shacal2Block {
        let digest = [
            0xba7816bfu32, 0x8f01cfea, 0x414140de, 0x5dae2223, 0xb00361a3, 0x96177a9c, 0xb410ff61,
            0xf20015ad,
        ];
        core::array::from_fn(|i| digest[i].wrapping_sub(IV[i]))
    }

    #[test]
    fn test_encrypt_sha256_derived_vector() {
        let schedule = expand_key(&ABC_KEY);
        assert_eq!(encrypt(&schedule, IV), abc_ciphertext());
    }

    #[test]
    fn test_decrypt_sha256_derived_vector() {
        let schedule = expand_key(&ABC_KEY);
        assert_eq!(decrypt(&schedule, abc_ciphertext()), IV);
    }

    #[test]
    fn test_sigma_functions() {
        assert_eq!(small_sigma0(0x0000_0001), 0x0200_4000);
        assert_eq!(big_sigma0(0x0000_0001), 0x4008_0400);
    }

    #[test]
    fn test_schedule_first_words_carry_constants() {
        let schedule = expand_key(&[0u32; WORDS_PER_KEY]);
        assert_eq!(&schedule.round_keys()[..16], &K[..16]);
    }

    #[test]
    fn test_roundtrip_arbitrary_key() {
        let key: Shacal2Key = core::array::from_fn(|i| 0xdead_beef ^ (i as u32) << 3);
        let schedule = expand_key(&key);
        let block: Shacal2Block = core::array::from_fn(|i| i as u32 * 0x0101_0101);
        let ciphertext = encrypt(&schedule, block);
        assert_ne!(ciphertext, block);
        assert_eq!(decrypt(&schedule, ciphertext), block);
    }
}
