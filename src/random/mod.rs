//! Pseudorandom number generation.
//!
//! Non-cryptographic generators whose internal state can be recovered from
//! their output.

pub mod mersenne_twister;

pub use mersenne_twister::Mt19937;
