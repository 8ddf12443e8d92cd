//! Windows-1252 conversion.
//!
//! The protocol requires the legacy single-byte "ANSI" code page. Encoding
//! never substitutes: the first unmappable character is reported back.

use encoding_rs::{EncoderResult, WINDOWS_1252};

const CHUNK_LEN: usize = 1024;

/// Encode `text` to Windows-1252, or return the first unmappable character.
pub fn encode_windows_1252(text: &str) -> Result<Vec<u8>, char> {
    let mut encoder = WINDOWS_1252.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut chunk = [0u8; CHUNK_LEN];
    let mut remaining = text;

    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(remaining, &mut chunk, true);
        out.extend_from_slice(&chunk[..written]);
        remaining = &remaining[read..];
        match result {
            EncoderResult::InputEmpty => return Ok(out),
            EncoderResult::OutputFull => continue,
            EncoderResult::Unmappable(ch) => return Err(ch),
        }
    }
}

/// Decode Windows-1252 bytes. Every byte maps to a character, so this cannot fail.
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    WINDOWS_1252
        .decode_without_bom_handling(bytes)
        .0
        .into_owned()
}
