//! Block ciphers and the hash functions built from them.
//!
//! The crate pairs three block ciphers with the constructions that turn
//! block ciphers into hashes. SHACAL-1 and SHACAL-2 are the compression
//! functions of SHA-1 and SHA-256 viewed as ciphers; feeding them through
//! the Davies–Meyer driver gives back the SHA hashes, with the chaining
//! state exposed so digests can be resumed (length extension). MD2, MD4 and
//! MD5 sit alongside for comparison.
//!
//! # Architecture
//!
//! ```text
//! utils       (GF(2^8) and boolean word primitives, byte/word conversion)
//!     ↓
//! cipher      (AES-128/192/256, SHACAL-1, SHACAL-2 behind BlockCipher)
//!     ↓                                  ↓
//! hash        (padding → Davies–Meyer    modes  (ECB / CBC + PKCS#7)
//!              → SHA-1 / SHA-256;
//!              MD2 / MD4 / MD5;
//!              length extension)
//!     ↓
//! mac         (secret-prefix MAC, HMAC)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt one AES block:
//!
//! ```
//! use cryptolib::cipher::aes::{decrypt, encrypt, expand_key};
//! use cryptolib::cipher::AesKey;
//!
//! let key = AesKey::from_slice(b"YELLOW SUBMARINE").unwrap();
//! let schedule = expand_key(&key);
//!
//! let block = *b"sixteen byte msg";
//! let ciphertext = encrypt(&schedule, block);
//! assert_ne!(ciphertext, block);
//! assert_eq!(decrypt(&schedule, ciphertext), block);
//! ```
//!
//! Hash a message, then extend the digest without knowing the message:
//!
//! ```
//! use cryptolib::hash::extension::glue_padding;
//! use cryptolib::hash::{IteratedHash, Sha256};
//!
//! let secret = b"key material";
//! let digest = Sha256::hash(secret);
//!
//! let extended = Sha256::extend(&digest, secret.len(), b"more").unwrap();
//!
//! let mut full = secret.to_vec();
//! full.extend(glue_padding::<Sha256>(secret.len()));
//! full.extend_from_slice(b"more");
//! assert_eq!(extended, Sha256::hash(&full));
//! ```

#![deny(clippy::all)]

pub mod cipher;
pub mod error;
pub mod hash;
pub mod mac;
pub mod modes;
pub mod random;
pub mod utils;

pub use cipher::BlockCipher;
pub use error::CryptoError;
pub use hash::IteratedHash;
