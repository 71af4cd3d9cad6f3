//! Byte-level charset detection for response bodies.
//!
//! The heater's firmware serves German text (umlauts, the degree sign) with
//! an absent or wrong `Content-Type` charset, so decoding goes through a
//! statistical sniff of the raw bytes rather than the HTTP header.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Guess the encoding of `bytes` from their content alone.
///
/// Total function: empty and very short inputs fall back to the detector's
/// default (UTF-8 for ASCII-only or empty input).
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decode `bytes` with the sniffed encoding, replacing malformed sequences.
pub fn decode_body(bytes: &[u8]) -> String {
    let encoding = detect_encoding(bytes);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}
