//! SHACAL-1: the SHA-1 compression function run as a 160-bit block cipher.
//!
//! The 512-bit key is a message chunk, expanded exactly like the SHA-1
//! message schedule; the plaintext is the 5-word chaining value. The round
//! constants are folded into the schedule so each round adds one word.

use super::BlockCipher;
use crate::error::CryptoError;
use crate::utils::bits::{choice, majority, parity};
use crate::utils::converter::{bytes_to_word_array, Endianness};

/// Words in a SHACAL-1 block.
pub const WORDS_PER_BLOCK: usize = 5;

/// Words in a SHACAL-1 key.
pub const WORDS_PER_KEY: usize = 16;

/// Bytes in a SHACAL-1 key.
pub const BYTES_PER_KEY: usize = WORDS_PER_KEY * 4;

/// Number of rounds, and of expanded key words.
pub const ROUNDS: usize = 80;

/// Rounds per band; each band has its own predicate and constant.
const BAND: usize = 20;

/// Round constants, one per band of 20 rounds.
const K: [u32; 4] = [0x5A82_7999, 0x6ED9_EBA1, 0x8F1B_BCDC, 0xCA62_C1D6];

/// Five-word SHACAL-1 block (`A..E`).
pub type Shacal1Block = [u32; WORDS_PER_BLOCK];

/// Sixteen-word SHACAL-1 key.
pub type Shacal1Key = [u32; WORDS_PER_KEY];

/// Expanded SHACAL-1 key with round constants already added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shacal1KeySchedule {
    round_keys: [u32; ROUNDS],
}

impl Shacal1KeySchedule {
    /// The 80 round words.
    pub fn round_keys(&self) -> &[u32; ROUNDS] {
        &self.round_keys
    }
}

/// Builds a key from 64 raw bytes, read as big-endian words.
///
/// # Errors
/// Returns [`CryptoError::InvalidKeyLength`] unless `bytes` is 64 bytes long.
pub fn key_from_bytes(bytes: &[u8]) -> Result<Shacal1Key, CryptoError> {
    bytes_to_word_array(bytes, Endianness::Big).map_err(|_| CryptoError::InvalidKeyLength {
        expected: "64",
        actual: bytes.len(),
    })
}

/// Expands a 16-word key to 80 round words.
///
/// `w[t] = rotl1(w[t-3] ^ w[t-8] ^ w[t-14] ^ w[t-16])` for `t >= 16`; then
/// the band constant `K[t / 20]` is added to every word.
pub fn expand_key(key: &Shacal1Key) -> Shacal1KeySchedule {
    let mut w = [0u32; ROUNDS];
    w[..WORDS_PER_KEY].copy_from_slice(key);
    for t in WORDS_PER_KEY..ROUNDS {
        w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
    }
    for (t, word) in w.iter_mut().enumerate() {
        *word = word.wrapping_add(K[t / BAND]);
    }
    Shacal1KeySchedule { round_keys: w }
}

/// Round predicate for round `t`: choice, parity, majority, parity.
#[inline]
fn round_function(t: usize, b: u32, c: u32, d: u32) -> u32 {
    match t / BAND {
        0 => choice(b, c, d),
        2 => majority(b, c, d),
        _ => parity(b, c, d),
    }
}

/// Encrypts one block with 80 SHA-1 rounds.
pub fn encrypt(schedule: &Shacal1KeySchedule, block: Shacal1Block) -> Shacal1Block {
    let [mut a, mut b, mut c, mut d, mut e] = block;
    for (t, &round_key) in schedule.round_keys.iter().enumerate() {
        let temp = a
            .rotate_left(5)
            .wrapping_add(round_function(t, b, c, d))
            .wrapping_add(e)
            .wrapping_add(round_key);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }
    [a, b, c, d, e]
}

/// Decrypts one block by running the rounds backwards.
///
/// Each step subtracts the round key from `A`, then recovers the previous
/// `E` from `A - f(B', C', D') - rotl5(A')` where the primed words are the
/// un-shifted predecessors.
pub fn decrypt(schedule: &Shacal1KeySchedule, block: Shacal1Block) -> Shacal1Block {
    let [mut a, mut b, mut c, mut d, mut e] = block;
    for (t, &round_key) in schedule.round_keys.iter().enumerate().rev() {
        let temp = a.wrapping_sub(round_key);
        let prev_a = b;
        let prev_b = c.rotate_right(30);
        let prev_c = d;
        let prev_d = e;
        let prev_e = temp
            .wrapping_sub(round_function(t, prev_b, prev_c, prev_d))
            .wrapping_sub(prev_a.rotate_left(5));
        a = prev_a;
        b = prev_b;
        c = prev_c;
        d = prev_d;
        e = prev_e;
    }
    [a, b, c, d, e]
}

/// SHACAL-1 as a [`BlockCipher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Shacal1;

impl BlockCipher for Shacal1 {
    type Key = Shacal1Key;
    type Block = Shacal1Block;
    type Schedule = Shacal1KeySchedule;

    fn expand_key(key: &Shacal1Key) -> Shacal1KeySchedule {
        expand_key(key)
    }

    fn encrypt(schedule: &Shacal1KeySchedule, block: Shacal1Block) -> Shacal1Block {
        encrypt(schedule, block)
    }

    fn decrypt(schedule: &Shacal1KeySchedule, block: Shacal1Block) -> Shacal1Block {
        decrypt(schedule, block)
    }
}
