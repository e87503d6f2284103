//! AES block cipher (FIPS-197) for 128, 192 and 256-bit keys.
//!
//! The 16-byte state is held in its byte view: byte `r + 4c` is row `r`,
//! column `c` of the 4x4 state matrix. Round keys are stored the same way
//! and can be read back as big-endian words to compare against published
//! key-expansion tables.
//!
//! The key size is chosen at construction time through [`AesKey`]; an
//! [`AesKeySchedule`] remembers its size and round count.

use tracing::debug;

use super::sbox::{rot_word, sub_word, INV_SBOX, RCON, SBOX};
use super::BlockCipher;
use crate::error::CryptoError;
use crate::utils::bits::{gf_double, gf_mul};

/// Bytes in one AES block.
pub const BLOCK_BYTES: usize = 16;

/// Words in one AES block (and in one round key).
const WORDS_PER_ROUND_KEY: usize = 4;

/// An AES block in its authoritative byte view.
pub type AesBlock = [u8; BLOCK_BYTES];

/// Supported AES key sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AesKeySize {
    /// 128-bit key, 10 rounds.
    Aes128,
    /// 192-bit key, 12 rounds.
    Aes192,
    /// 256-bit key, 14 rounds.
    Aes256,
}

impl AesKeySize {
    /// Number of 32-bit words in the initial key (`Nk`).
    pub const fn words_per_key(self) -> usize {
        match self {
            AesKeySize::Aes128 => 4,
            AesKeySize::Aes192 => 6,
            AesKeySize::Aes256 => 8,
        }
    }

    /// Number of rounds (`Nr`); the schedule holds `rounds() + 1` round keys.
    pub const fn rounds(self) -> usize {
        match self {
            AesKeySize::Aes128 => 10,
            AesKeySize::Aes192 => 12,
            AesKeySize::Aes256 => 14,
        }
    }

    /// Key length in bytes.
    pub const fn key_bytes(self) -> usize {
        self.words_per_key() * 4
    }

    /// Picks the key size matching a raw key length in bytes.
    pub fn from_key_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(AesKeySize::Aes128),
            24 => Some(AesKeySize::Aes192),
            32 => Some(AesKeySize::Aes256),
            _ => None,
        }
    }
}

/// Raw AES key material of one of the three legal sizes.
#[derive(Clone, PartialEq, Eq)]
pub enum AesKey {
    /// AES-128 key.
    Aes128([u8; 16]),
    /// AES-192 key.
    Aes192([u8; 24]),
    /// AES-256 key.
    Aes256([u8; 32]),
}

impl AesKey {
    /// Builds a key from a byte slice, selecting the size from its length.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidKeyLength`] unless the slice is 16, 24
    /// or 32 bytes long.
    ///
    /// # Examples
    ///
    /// ```
    /// use cryptolib::cipher::aes::{AesKey, AesKeySize};
    ///
    /// let key = AesKey::from_slice(&[0u8; 24]).unwrap();
    /// assert_eq!(key.size(), AesKeySize::Aes192);
    /// assert!(AesKey::from_slice(&[0u8; 20]).is_err());
    /// ```
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let invalid = || CryptoError::InvalidKeyLength {
            expected: "16, 24 or 32",
            actual: bytes.len(),
        };
        match AesKeySize::from_key_len(bytes.len()) {
            Some(AesKeySize::Aes128) => bytes.try_into().map(AesKey::Aes128).map_err(|_| invalid()),
            Some(AesKeySize::Aes192) => bytes.try_into().map(AesKey::Aes192).map_err(|_| invalid()),
            Some(AesKeySize::Aes256) => bytes.try_into().map(AesKey::Aes256).map_err(|_| invalid()),
            None => Err(invalid()),
        }
    }

    /// The size class of this key.
    pub fn size(&self) -> AesKeySize {
        match self {
            AesKey::Aes128(_) => AesKeySize::Aes128,
            AesKey::Aes192(_) => AesKeySize::Aes192,
            AesKey::Aes256(_) => AesKeySize::Aes256,
        }
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AesKey::Aes128(k) => k,
            AesKey::Aes192(k) => k,
            AesKey::Aes256(k) => k,
        }
    }
}

impl From<[u8; 16]> for AesKey {
    fn from(key: [u8; 16]) -> Self {
        AesKey::Aes128(key)
    }
}

impl From<[u8; 24]> for AesKey {
    fn from(key: [u8; 24]) -> Self {
        AesKey::Aes192(key)
    }
}

impl From<[u8; 32]> for AesKey {
    fn from(key: [u8; 32]) -> Self {
        AesKey::Aes256(key)
    }
}

impl std::fmt::Debug for AesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesKey")
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

/// Expanded AES key: `rounds + 1` round keys.
#[derive(Clone, PartialEq, Eq)]
pub struct AesKeySchedule {
    size: AesKeySize,
    round_keys: Vec<AesBlock>,
}

impl AesKeySchedule {
    /// Key size the schedule was derived from.
    pub fn size(&self) -> AesKeySize {
        self.size
    }

    /// Number of rounds (`Nr`).
    pub fn rounds(&self) -> usize {
        self.size.rounds()
    }

    /// Round key `round` in byte view, or `None` past the last round.
    pub fn round_key(&self, round: usize) -> Option<&AesBlock> {
        self.round_keys.get(round)
    }

    /// Round key `round` as four big-endian words, or `None` past the last
    /// round. This is the layout of the FIPS-197 key-expansion tables.
    pub fn round_key_words(&self, round: usize) -> Option<[u32; WORDS_PER_ROUND_KEY]> {
        self.round_key(round).map(|key| {
            let mut words = [0u32; WORDS_PER_ROUND_KEY];
            for (word, chunk) in words.iter_mut().zip(key.chunks_exact(4)) {
                *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            }
            words
        })
    }
}

impl std::fmt::Debug for AesKeySchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesKeySchedule")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Expands an AES key into its round-key schedule.
///
/// Word `i >= Nk` of the expanded key is `w[i - Nk] ^ temp`, where `temp`
/// is `SubWord(RotWord(w[i - 1])) ^ Rcon[i / Nk]` when `i % Nk == 0`,
/// `SubWord(w[i - 1])` when `Nk == 8 && i % Nk == 4`, and `w[i - 1]`
/// otherwise.
///
/// # Parameters
/// - `key`: The initial key.
///
/// # Returns
/// A schedule of `rounds + 1` round keys.
pub fn expand_key(key: &AesKey) -> AesKeySchedule {
    let size = key.size();
    let nk = size.words_per_key();
    let total_words = WORDS_PER_ROUND_KEY * (size.rounds() + 1);

    let mut words = Vec::with_capacity(total_words);
    for chunk in key.as_bytes().chunks_exact(4) {
        words.push(u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    for i in nk..total_words {
        let last = words[i - 1];
        let temp = if i % nk == 0 {
            sub_word(rot_word(last)) ^ RCON[i / nk]
        } else if size == AesKeySize::Aes256 && i % nk == 4 {
            sub_word(last)
        } else {
            last
        };
        words.push(words[i - nk] ^ temp);
    }

    let round_keys = words
        .chunks_exact(WORDS_PER_ROUND_KEY)
        .map(|chunk| {
            let mut block = [0u8; BLOCK_BYTES];
            for (dst, word) in block.chunks_exact_mut(4).zip(chunk) {
                dst.copy_from_slice(&word.to_be_bytes());
            }
            block
        })
        .collect();

    debug!(key_size = ?size, rounds = size.rounds(), "expanded AES key schedule");

    AesKeySchedule { size, round_keys }
}

/// Encrypts one block.
///
/// Round 0 is a plain key addition; rounds `1..Nr` apply SubBytes,
/// ShiftRows, MixColumns and AddRoundKey; the final round skips MixColumns.
pub fn encrypt(schedule: &AesKeySchedule, block: AesBlock) -> AesBlock {
    let rounds = schedule.rounds();
    let mut state = block;
    add_round_key(&mut state, &schedule.round_keys[0]);
    for round_key in &schedule.round_keys[1..rounds] {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_key);
    }
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &schedule.round_keys[rounds]);
    state
}

/// Decrypts one block with the FIPS-197 inverse cipher.
///
/// Uses the same schedule as [`encrypt`], applied in reverse order.
pub fn decrypt(schedule: &AesKeySchedule, block: AesBlock) -> AesBlock {
    let rounds = schedule.rounds();
    let mut state = block;
    add_round_key(&mut state, &schedule.round_keys[rounds]);
    for round_key in schedule.round_keys[1..rounds].iter().rev() {
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
        add_round_key(&mut state, round_key);
        inv_mix_columns(&mut state);
    }
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    add_round_key(&mut state, &schedule.round_keys[0]);
    state
}

/// AES as a [`BlockCipher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes;

impl BlockCipher for Aes {
    type Key = AesKey;
    type Block = AesBlock;
    type Schedule = AesKeySchedule;

    fn expand_key(key: &AesKey) -> AesKeySchedule {
        expand_key(key)
    }

    fn encrypt(schedule: &AesKeySchedule, block: AesBlock) -> AesBlock {
        encrypt(schedule, block)
    }

    fn decrypt(schedule: &AesKeySchedule, block: AesBlock) -> AesBlock {
        decrypt(schedule, block)
    }
}

// ================= Round transforms =================

fn add_round_key(state: &mut AesBlock, key: &AesBlock) {
    for (s, k) in state.iter_mut().zip(key) {
        *s ^= k;
    }
}

fn sub_bytes(state: &mut AesBlock) {
    for b in state.iter_mut() {
        *b = SBOX[*b as usize];
    }
}

fn inv_sub_bytes(state: &mut AesBlock) {
    for b in state.iter_mut() {
        *b = INV_SBOX[*b as usize];
    }
}

/// Row `r` is rotated left by `r` positions: `s'[r][c] = s[r][(c + r) % 4]`.
fn shift_rows(state: &mut AesBlock) {
    let input = *state;
    for (i, b) in state.iter_mut().enumerate() {
        let (row, col) = (i % 4, i / 4);
        *b = input[row + 4 * ((col + row) % 4)];
    }
}

fn inv_shift_rows(state: &mut AesBlock) {
    let input = *state;
    for (i, b) in state.iter_mut().enumerate() {
        let (row, col) = (i % 4, i / 4);
        *b = input[row + 4 * ((col + 4 - row) % 4)];
    }
}

/// Each column is multiplied by the circulant matrix `(2, 3, 1, 1)`.
fn mix_columns(state: &mut AesBlock) {
    for column in state.chunks_exact_mut(4) {
        let a = [column[0], column[1], column[2], column[3]];
        let d = a.map(gf_double);
        column[0] = d[0] ^ d[1] ^ a[1] ^ a[2] ^ a[3];
        column[1] = a[0] ^ d[1] ^ d[2] ^ a[2] ^ a[3];
        column[2] = a[0] ^ a[1] ^ d[2] ^ d[3] ^ a[3];
        column[3] = d[0] ^ a[0] ^ a[1] ^ a[2] ^ d[3];
    }
}

/// Each column is multiplied by the circulant matrix `(14, 11, 13, 9)`.
fn inv_mix_columns(state: &mut AesBlock) {
    for column in state.chunks_exact_mut(4) {
        let a = [column[0], column[1], column[2], column[3]];
        for (row, out) in column.iter_mut().enumerate() {
            *out = gf_mul(a[row], 14)
                ^ gf_mul(a[(row + 1) % 4], 11)
                ^ gf_mul(a[(row + 2) % 4], 13)
                ^ gf_mul(a[(row + 3) % 4], 9);
        }
    }
}
