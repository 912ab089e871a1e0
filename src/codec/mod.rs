//! Base64 encoding and decoding for the line-oriented exchange files.
//!
//! Encoding always uses the standard alphabet with `=` padding. Decoding
//! comes in two flavours:
//!
//! * [`decode`] is deliberately lenient: any character outside the base64
//!   alphabet (embedded whitespace, newlines, stray padding) is skipped
//!   rather than rejected, and a dangling trailing character that carries
//!   fewer than 8 bits is dropped. This is the one "be generous on read"
//!   policy in the tool, kept because key and ciphertext files are routinely
//!   hand-edited. Malformed input yields truncated bytes, caught downstream
//!   when fixed-size wire decoding fails.
//! * [`decode_strict`] rejects anything the standard engine would reject.

use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{alphabet, Engine};

use crate::error::Error;

/// Engine for the lenient path: padding already stripped by the caller,
/// nonzero trailing bits tolerated.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes `data` as standard base64 with `=` padding.
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes `text`, silently skipping every character outside the base64
/// alphabet. Infallible; garbage in, truncated bytes out.
pub fn decode(text: &str) -> Vec<u8> {
    let mut filtered: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '+' || *c == '/')
        .collect();
    // A lone trailing character contributes only 6 bits, never a full byte.
    if filtered.len() % 4 == 1 {
        filtered.pop();
    }
    LENIENT.decode(&filtered).unwrap_or_default()
}

/// Strict decode: rejects non-alphabet characters and malformed padding.
pub fn decode_strict(text: &str) -> Result<Vec<u8>, Error> {
    STANDARD
        .decode(text)
        .map_err(|e| Error::ParseError(format!("malformed base64: {}", e)))
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip() {
        let cases: Vec<Vec<u8>> = vec![
            vec![],
            vec![0u8],
            vec![0xff],
            b"f".to_vec(),
            b"fo".to_vec(),
            b"foo".to_vec(),
            b"foob".to_vec(),
            (0u8..=255).collect(),
        ];
        for bytes in cases {
            assert_eq!(decode(&encode(&bytes)), bytes);
        }
    }

    #[test]
    fn encode_pads_with_equals() {
        assert_eq!(encode(b"f"), "Zg==");
        assert_eq!(encode(b"fo"), "Zm8=");
        assert_eq!(encode(b"foo"), "Zm9v");
    }

    #[test]
    fn lenient_decode_skips_whitespace_and_noise() {
        assert_eq!(decode("Zm 9v\n"), b"foo");
        assert_eq!(decode("Z\tm9v\r\n"), b"foo");
        // '=' padding is outside the filter alphabet and simply skipped.
        assert_eq!(decode("Zg=="), vec![b'f']);
        assert_eq!(decode("!!!"), Vec::<u8>::new());
    }

    #[test]
    fn lenient_decode_drops_dangling_character() {
        // Five alphabet characters: the fifth carries <8 bits and is dropped.
        assert_eq!(decode("Zm9vZ"), b"foo");
    }

    #[test]
    fn strict_decode_rejects_noise() {
        assert!(decode_strict("Zm 9v").is_err());
        assert_eq!(decode_strict("Zm9v").unwrap(), b"foo");
    }
}
