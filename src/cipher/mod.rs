//! Block cipher engines.
//!
//! Every engine follows the same shape: a key is expanded once into a
//! schedule, and the schedule then encrypts or decrypts single blocks. The
//! free functions in each module are the primary API; [`BlockCipher`] ties
//! them together so chaining modes and the Davies–Meyer driver can be
//! written once.

pub mod aes;
pub mod shacal1;
pub mod shacal2;
pub(crate) mod sbox;

pub use aes::{Aes, AesKey, AesKeySchedule, AesKeySize};
pub use shacal1::{Shacal1, Shacal1KeySchedule};
pub use shacal2::{Shacal2, Shacal2KeySchedule};

/// A keyed permutation on fixed-size blocks.
///
/// Implementations guarantee `decrypt(s, encrypt(s, b)) == b` for every
/// schedule `s` produced by [`expand_key`](Self::expand_key) and every
/// block `b`, and that `expand_key` is a pure function of the key.
pub trait BlockCipher {
    /// Raw key material accepted by the key schedule.
    type Key;
    /// The block the cipher permutes.
    type Block: Copy;
    /// Expanded round-key material.
    type Schedule;

    /// Derives the round keys from a raw key.
    fn expand_key(key: &Self::Key) -> Self::Schedule;

    /// Encrypts one block.
    fn encrypt(schedule: &Self::Schedule, block: Self::Block) -> Self::Block;

    /// Decrypts one block.
    fn decrypt(schedule: &Self::Schedule, block: Self::Block) -> Self::Block;
}
