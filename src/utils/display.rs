//! Hex rendering of byte and word buffers for diagnostics.
//!
//! Not part of any cryptographic contract; used by tests and by callers
//! inspecting intermediate states.

/// Renders bytes as lowercase hex, with a space on every four-byte boundary.
///
/// ```
/// use cryptolib::utils::display::format_bytes;
///
/// assert_eq!(format_bytes(&[0x61, 0x62, 0x63, 0x80, 0x00]), "61626380 00");
/// ```
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .chunks(4)
        .map(hex::encode)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders 32-bit words as eight lowercase hex digits each, space separated.
pub fn format_words32(words: &[u32]) -> String {
    words
        .iter()
        .map(|word| format!("{:08x}", word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prints [`format_bytes`] to standard output.
pub fn print_bytes(bytes: &[u8]) {
    println!("{}", format_bytes(bytes));
}

/// Prints [`format_words32`] to standard output.
pub fn print_words32(words: &[u32]) {
    println!("{}", format_words32(words));
}
