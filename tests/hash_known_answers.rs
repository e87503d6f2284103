//! Known-answer tests for every hash in the crate, through both the raw
//! `*digest` entry points and the `IteratedHash` interface.

use cryptolib::cipher::{shacal1, shacal2};
use cryptolib::hash::md2::md2digest;
use cryptolib::hash::md4::{self, md4digest};
use cryptolib::hash::md5::{self, md5digest};
use cryptolib::hash::padding::{preprocess, CHUNK_WORDS};
use cryptolib::hash::sha1::{self, sha1digest};
use cryptolib::hash::sha256::{self, sha256digest};
use cryptolib::hash::{IteratedHash, Md4, Md5, Sha1, Sha256};
use cryptolib::utils::converter::{words_to_bytes, Endianness};

const MILLION_A_LEN: usize = 1_000_000;

fn hex_of<H: IteratedHash>(message: &[u8]) -> String {
    hex::encode(H::hash(message))
}

// ═══════════════════════════════════════════════════════════════════════
// Raw digest entry points
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn md4_empty_message() {
    let state = md4digest(b"", 0, md4::INITIAL_STATE);
    assert_eq!(
        hex::encode(words_to_bytes(&state, Endianness::Little)),
        "31d6cfe0d16ae931b73c59d7e0c089c0"
    );
}

#[test]
fn md5_abc_first_bytes() {
    let state = md5digest(b"abc", 0, md5::INITIAL_STATE);
    let bytes = words_to_bytes(&state, Endianness::Little);
    assert_eq!(bytes[..2], [0x90u8, 0x01]);
    assert_eq!(hex::encode(bytes), "900150983cd24fb0d6963f7d28e17f72");
}

#[test]
fn sha1_abc() {
    let state = sha1digest(b"abc", 0, sha1::INITIAL_STATE);
    assert_eq!(
        hex::encode(words_to_bytes(&state, Endianness::Big)),
        "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
}

#[test]
fn sha256_empty_message() {
    let state = sha256digest(b"", 0, sha256::INITIAL_STATE);
    assert_eq!(
        hex::encode(words_to_bytes(&state, Endianness::Big)),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn md2_rfc_suite() {
    assert_eq!(hex::encode(md2digest(b"")), "8350e5a3e24c153df2275c9f80692773");
    assert_eq!(
        hex::encode(md2digest(b"message digest")),
        "ab4f496bfb2a530b219ff33031fe06b0"
    );
}

// ═══════════════════════════════════════════════════════════════════════
// SHACAL as the SHA compression function
// ═══════════════════════════════════════════════════════════════════════

/// Encrypting the IV under the padded "abc" block yields the published
/// digest minus the IV, word by word.
#[test]
fn shacal1_equals_sha1_minus_iv() {
    let words = preprocess(b"abc", 0, Endianness::Big);
    let mut key = [0u32; CHUNK_WORDS];
    key.copy_from_slice(&words);

    let schedule = shacal1::expand_key(&key);
    let ciphertext = shacal1::encrypt(&schedule, sha1::INITIAL_STATE);
    let digest = sha1digest(b"abc", 0, sha1::INITIAL_STATE);
    for i in 0..5 {
        assert_eq!(
            ciphertext[i],
            digest[i].wrapping_sub(sha1::INITIAL_STATE[i]),
            "word {}",
            i
        );
    }
    assert_eq!(shacal1::decrypt(&schedule, ciphertext), sha1::INITIAL_STATE);
}

#[test]
fn shacal2_equals_sha256_minus_iv() {
    let words = preprocess(b"abc", 0, Endianness::Big);
    let mut key = [0u32; CHUNK_WORDS];
    key.copy_from_slice(&words);

    let schedule = shacal2::expand_key(&key);
    let ciphertext = shacal2::encrypt(&schedule, sha256::INITIAL_STATE);
    let expected: Vec<u32> = [
        0xba78_16bfu32, 0x8f01_cfea, 0x4141_40de, 0x5dae_2223, 0xb003_61a3, 0x9617_7a9c,
        0xb410_ff61, 0xf200_15ad,
    ]
    .iter()
    .zip(sha256::INITIAL_STATE)
    .map(|(d, iv)| d.wrapping_sub(iv))
    .collect();
    assert_eq!(ciphertext.to_vec(), expected);
    assert_eq!(shacal2::decrypt(&schedule, ciphertext), sha256::INITIAL_STATE);
}

// ═══════════════════════════════════════════════════════════════════════
// IteratedHash — multi-block vectors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn sha1_fips_suite() {
    assert_eq!(
        hex_of::<Sha1>(b"The quick brown fox jumps over the lazy dog"),
        "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"
    );
    assert_eq!(
        hex_of::<Sha1>(
            b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu"
        ),
        "a49b2446a02c645bf419f995b67091253a04a259"
    );
}

#[test]
fn sha256_fips_suite() {
    assert_eq!(
        hex_of::<Sha256>(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        hex_of::<Sha256>(
            b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu"
        ),
        "cf5b16a778af8380036ce59e7b0492370b249b11e8f07a51afac45037afee9d1"
    );
}

#[test]
fn million_a() {
    let message = vec![b'a'; MILLION_A_LEN];
    assert_eq!(
        hex_of::<Sha1>(&message),
        "34aa973cd4c4daa4f61eeb2bdbad27316534016f"
    );
    assert_eq!(
        hex_of::<Sha256>(&message),
        "cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0"
    );
}

#[test]
fn md_family_rfc_suites() {
    assert_eq!(
        hex_of::<Md4>(b"message digest"),
        "d9130a8164549fe818874806e1c7014b"
    );
    assert_eq!(
        hex_of::<Md5>(b"message digest"),
        "f96b697d7cb7938d525a2f31aaf161d0"
    );
}

#[test]
fn digest_sizes_and_names() {
    assert_eq!(Sha1::hash(b"").len(), Sha1::DIGEST_BYTES);
    assert_eq!(Sha256::hash(b"").len(), Sha256::DIGEST_BYTES);
    assert_eq!(Md4::hash(b"").len(), Md4::DIGEST_BYTES);
    assert_eq!(Md5::hash(b"").len(), Md5::DIGEST_BYTES);
    assert_eq!(
        [Sha1::NAME, Sha256::NAME, Md4::NAME, Md5::NAME],
        ["SHA-1", "SHA-256", "MD4", "MD5"]
    );
}

#[test]
fn state_round_trips_through_bytes() {
    let state = sha256digest(b"state", 0, sha256::INITIAL_STATE);
    let bytes = Sha256::state_to_bytes(&state);
    assert_eq!(Sha256::state_from_bytes(&bytes), Ok(state));
}
