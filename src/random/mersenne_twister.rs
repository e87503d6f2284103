//! 32-bit Mersenne Twister PRNG (MT19937).
//!
//! The reference generator with period 2^19937 - 1. Its tempering is an
//! invertible bijection, so 624 consecutive outputs are enough to rebuild
//! the internal state and predict every later output; see
//! [`Mt19937::clone_from_outputs`].

use tracing::debug;

use crate::error::CryptoError;

/// Words in the state vector.
pub const STATE_WORDS: usize = 624;

/// Default seed of the reference implementation.
pub const DEFAULT_SEED: u32 = 5489;

const MM: usize = 397;
const MATRIX_A: u32 = 0x9908_B0DF;
const UPPER_MASK: u32 = 0x8000_0000; // most significant bit
const LOWER_MASK: u32 = 0x7FFF_FFFF; // lower 31 bits
const INIT_MULTIPLIER: u32 = 1_812_433_253;

const TEMPER_U: u32 = 11;
const TEMPER_S: u32 = 7;
const TEMPER_B: u32 = 0x9D2C_5680;
const TEMPER_T: u32 = 15;
const TEMPER_C: u32 = 0xEFC6_0000;
const TEMPER_L: u32 = 18;

/// 32-bit Mersenne Twister.
///
/// Output for a given seed matches the reference `genrand_int32`, and
/// therefore C++ `std::mt19937`.
#[derive(Clone, PartialEq, Eq)]
pub struct Mt19937 {
    mt: [u32; STATE_WORDS],
    mti: usize,
}

impl Mt19937 {
    /// Creates a generator from a 32-bit seed.
    ///
    /// # Examples
    /// ```
    /// use cryptolib::random::Mt19937;
    ///
    /// let mut rng = Mt19937::with_seed(5489);
    /// assert_eq!(rng.next_u32(), 3499211612);
    /// ```
    pub fn with_seed(seed: u32) -> Self {
        let mut mt = [0u32; STATE_WORDS];
        mt[0] = seed;
        for i in 1..STATE_WORDS {
            let prev = mt[i - 1];
            mt[i] = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { mt, mti: STATE_WORDS }
    }

    /// Creates a generator from a raw state vector.
    ///
    /// The state is twisted before the first output, so the first value
    /// returned is not a tempering of `state[0]` but of the twisted state.
    pub fn from_state(state: [u32; STATE_WORDS]) -> Self {
        Self {
            mt: state,
            mti: STATE_WORDS,
        }
    }

    /// Rebuilds a generator from 624 consecutive outputs.
    ///
    /// The outputs must be aligned on a twist boundary, i.e. the first 624
    /// outputs after seeding or any later aligned window. The returned
    /// generator continues the sequence: its first output equals the
    /// source generator's 625th.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidStateLength`] unless exactly 624
    /// outputs are supplied.
    pub fn clone_from_outputs(outputs: &[u32]) -> Result<Self, CryptoError> {
        if outputs.len() != STATE_WORDS {
            return Err(CryptoError::InvalidStateLength {
                expected: STATE_WORDS,
                actual: outputs.len(),
            });
        }
        let mut state = [0u32; STATE_WORDS];
        for (word, &output) in state.iter_mut().zip(outputs) {
            *word = untemper(output);
        }
        debug!(outputs = outputs.len(), "cloned mt19937 state");
        Ok(Self::from_state(state))
    }

    /// Regenerates the whole state vector.
    fn twist(&mut self) {
        let mag01: [u32; 2] = [0, MATRIX_A];

        for i in 0..(STATE_WORDS - MM) {
            let x = (self.mt[i] & UPPER_MASK) | (self.mt[i + 1] & LOWER_MASK);
            self.mt[i] = self.mt[i + MM] ^ (x >> 1) ^ mag01[(x & 1) as usize];
        }
        for i in (STATE_WORDS - MM)..(STATE_WORDS - 1) {
            let x = (self.mt[i] & UPPER_MASK) | (self.mt[i + 1] & LOWER_MASK);
            self.mt[i] = self.mt[i + MM - STATE_WORDS] ^ (x >> 1) ^ mag01[(x & 1) as usize];
        }
        let x = (self.mt[STATE_WORDS - 1] & UPPER_MASK) | (self.mt[0] & LOWER_MASK);
        self.mt[STATE_WORDS - 1] = self.mt[MM - 1] ^ (x >> 1) ^ mag01[(x & 1) as usize];

        self.mti = 0;
    }

    /// Generates the next 32-bit pseudorandom value.
    pub fn next_u32(&mut self) -> u32 {
        if self.mti >= STATE_WORDS {
            self.twist();
        }
        let y = self.mt[self.mti];
        self.mti += 1;
        temper(y)
    }

    /// Fills a byte slice with pseudorandom values, four bytes per output
    /// in little-endian order.
    pub fn next_bytes(&mut self, bytes: &mut [u8]) {
        for chunk in bytes.chunks_mut(4) {
            let word = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
}

impl std::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt19937")
            .field("mti", &self.mti)
            .finish_non_exhaustive()
    }
}

/// Applies the MT19937 output tempering.
pub fn temper(value: u32) -> u32 {
    let mut y = value;
    y ^= y >> TEMPER_U;
    y ^= (y << TEMPER_S) & TEMPER_B;
    y ^= (y << TEMPER_T) & TEMPER_C;
    y ^= y >> TEMPER_L;
    y
}

/// Inverts `y ^= y >> shift`.
fn undo_right_shift(value: u32, shift: u32) -> u32 {
    let mut y = value;
    for _ in 0..(32 / shift) {
        y = value ^ (y >> shift);
    }
    y
}

/// Inverts `y ^= (y << shift) & mask`.
fn undo_left_shift(value: u32, shift: u32, mask: u32) -> u32 {
    let mut y = value;
    for _ in 0..(32 / shift) {
        y = value ^ ((y << shift) & mask);
    }
    y
}

/// Recovers a state word from one generator output.
///
/// # Examples
/// ```
/// use cryptolib::random::mersenne_twister::{temper, untemper};
///
/// assert_eq!(untemper(temper(0xdead_beef)), 0xdead_beef);
/// ```
pub fn untemper(output: u32) -> u32 {
    let mut y = undo_right_shift(output, TEMPER_L);
    y = undo_left_shift(y, TEMPER_T, TEMPER_C);
    y = undo_left_shift(y, TEMPER_S, TEMPER_B);
    undo_right_shift(y, TEMPER_U)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_reference_outputs_for_default_seed() {
        let mut mt = Mt19937::with_seed(DEFAULT_SEED);
        assert_eq!(mt.next_u32(), 3_499_211_612);
        assert_eq!(mt.next_u32(), 581_869_302);
        assert_eq!(mt.next_u32(), 3_890_346_734);
    }

    #[test]
    fn test_ten_thousandth_output() {
        let mut mt = Mt19937::with_seed(DEFAULT_SEED);
        let mut last = 0;
        for _ in 0..10_000 {
            last = mt.next_u32();
        }
        assert_eq!(last, 4_123_659_995);
    }

    #[test]
    fn test_deterministic_seed() {
        let mut mt1 = Mt19937::with_seed(12345);
        let mut mt2 = Mt19937::with_seed(12345);
        for _ in 0..1000 {
            assert_eq!(mt1.next_u32(), mt2.next_u32());
        }
    }

    #[test]
    fn test_different_seeds_different_output() {
        assert_ne!(
            Mt19937::with_seed(1).next_u32(),
            Mt19937::with_seed(2).next_u32()
        );
    }

    #[test]
    fn test_untemper_inverts_temper() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let value: u32 = rng.gen();
            assert_eq!(untemper(temper(value)), value);
        }
    }

    #[test]
    fn test_clone_predicts_future_outputs() {
        let mut victim = Mt19937::with_seed(0x1234_5678);
        let observed: Vec<u32> = (0..STATE_WORDS).map(|_| victim.next_u32()).collect();
        let mut clone = Mt19937::clone_from_outputs(&observed).expect("624 outputs");
        for _ in 0..2000 {
            assert_eq!(clone.next_u32(), victim.next_u32());
        }
    }

    #[test]
    fn test_clone_requires_full_state() {
        assert_eq!(
            Mt19937::clone_from_outputs(&[0u32; 623]),
            Err(CryptoError::InvalidStateLength {
                expected: 624,
                actual: 623
            })
        );
    }

    #[test]
    fn test_next_bytes_partial_word() {
        let mut a = Mt19937::with_seed(7);
        let mut b = Mt19937::with_seed(7);
        let mut bytes = [0u8; 6];
        a.next_bytes(&mut bytes);
        let first = b.next_u32().to_le_bytes();
        let second = b.next_u32().to_le_bytes();
        assert_eq!(bytes[..4], first);
        assert_eq!(bytes[4..], second[..2]);
    }
}
