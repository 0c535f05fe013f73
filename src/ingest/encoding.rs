//! Character-encoding detection for archive files.
//!
//! A byte-order mark wins when present; otherwise `chardetng` guesses from the
//! full buffer. Decoding is done by `encoding_rs`, which replaces malformed
//! sequences instead of failing.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Result of decoding a raw byte buffer.
#[derive(Debug, Clone)]
pub struct DecodedText {
    /// Decoded text
    pub text: String,
    /// WHATWG name of the encoding that was used (e.g. "UTF-8", "windows-1252")
    pub encoding: &'static str,
    /// Whether malformed byte sequences were replaced during decoding
    pub had_errors: bool,
}

/// Guess the encoding of `bytes`.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Detect the encoding of `bytes` and decode them.
///
/// A leading BOM is stripped from the output.
pub fn decode_bytes(bytes: &[u8]) -> DecodedText {
    let encoding = detect_encoding(bytes);
    let (text, used, had_errors) = encoding.decode(bytes);

    DecodedText {
        text: text.into_owned(),
        encoding: used.name(),
        had_errors,
    }
}
