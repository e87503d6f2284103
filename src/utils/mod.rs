//! Bit primitives, byte/word conversion and diagnostic formatting.

pub mod bits;
pub mod converter;
pub mod display;
