//! Multi-encoding text decoding.
//!
//! Tried in order, first success wins:
//! 1. UTF-8 (a leading BOM is stripped);
//! 2. UTF-16 LE/BE, only when a byte-order mark is present;
//! 3. Latin-1, which maps every byte and therefore always succeeds.
//!
//! `encode_text` writes text back in a detected encoding so appends keep a
//! file readable by the same order.

use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Latin1,
}

impl TextEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Latin1 => "latin1",
        }
    }
}

/// Decoded file content with the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: TextEncoding,
}

/// Decodes raw bytes using the prioritized encoding list.
pub fn decode_text(bytes: &[u8]) -> DecodedText {
    let utf8_body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(utf8_body) {
        return DecodedText {
            text: text.to_string(),
            encoding: TextEncoding::Utf8,
        };
    }

    if let Some(body) = bytes.strip_prefix(UTF16_LE_BOM) {
        if let Some(text) = decode_utf16(body, u16::from_le_bytes) {
            return DecodedText {
                text,
                encoding: TextEncoding::Utf16Le,
            };
        }
    }
    if let Some(body) = bytes.strip_prefix(UTF16_BE_BOM) {
        if let Some(text) = decode_utf16(body, u16::from_be_bytes) {
            return DecodedText {
                text,
                encoding: TextEncoding::Utf16Be,
            };
        }
    }

    DecodedText {
        text: bytes.iter().map(|&b| char::from(b)).collect(),
        encoding: TextEncoding::Latin1,
    }
}

/// Reads and decodes a text file.
pub fn read_text_file(path: &Path) -> std::io::Result<DecodedText> {
    let bytes = std::fs::read(path)?;
    Ok(decode_text(&bytes))
}

/// Encodes `text` for appending to a file already in `encoding`.
///
/// No byte-order mark is written. Latin-1 maps characters above U+00FF to `?`.
pub fn encode_text(text: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        TextEncoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        TextEncoding::Latin1 => text
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect(),
    }
}

fn decode_utf16(body: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
    if body.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

#[cfg(test)]
mod tests {
    use super::{decode_text, encode_text, TextEncoding};

    fn utf16le_with_bom(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn utf8_is_preferred_and_bom_is_stripped() {
        let decoded = decode_text(b"\xEF\xBB\xBFCR 1 caf\xC3\xA9");
        assert_eq!(decoded.encoding, TextEncoding::Utf8);
        assert_eq!(decoded.text, "CR 1 café");
    }

    #[test]
    fn utf16_with_bom_is_decoded() {
        let decoded = decode_text(&utf16le_with_bom("CR 84492 Design\r\n"));
        assert_eq!(decoded.encoding, TextEncoding::Utf16Le);
        assert_eq!(decoded.text, "CR 84492 Design\r\n");

        let mut be = vec![0xFE, 0xFF];
        for unit in "CR 7".encode_utf16() {
            be.extend_from_slice(&unit.to_be_bytes());
        }
        let decoded = decode_text(&be);
        assert_eq!(decoded.encoding, TextEncoding::Utf16Be);
        assert_eq!(decoded.text, "CR 7");
    }

    #[test]
    fn invalid_utf8_falls_back_to_latin1() {
        let decoded = decode_text(b"CR 5 caf\xE9");
        assert_eq!(decoded.encoding, TextEncoding::Latin1);
        assert_eq!(decoded.text, "CR 5 café");
    }

    #[test]
    fn appended_utf16_units_keep_the_file_decodable() {
        let mut bytes = utf16le_with_bom("CR 1 One\r\n");
        bytes.extend(encode_text(
            "CR 2 [Found in status emails]\n",
            TextEncoding::Utf16Le,
        ));

        let decoded = decode_text(&bytes);
        assert_eq!(decoded.encoding, TextEncoding::Utf16Le);
        assert_eq!(decoded.text, "CR 1 One\r\nCR 2 [Found in status emails]\n");
    }

    #[test]
    fn latin1_encoding_replaces_unmappable_characters() {
        assert_eq!(encode_text("café ✓", TextEncoding::Latin1), b"caf\xE9 ?".to_vec());
        assert_eq!(
            encode_text("CR 7", TextEncoding::Utf16Be),
            vec![0, b'C', 0, b'R', 0, b' ', 0, b'7']
        );
    }
}
