//! Standard alphabets and preset constructors for the common transforms.

use crate::decode::{BaseNDecoder, DecoderOptions};
use crate::encode::{BaseNEncoder, EncoderOptions};
use crate::error::CodecError;
use crate::filter::Sink;

/// RFC 4648 Base64 alphabet.
pub const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// RFC 4648 URL-safe Base64 alphabet.
pub const BASE64_URL: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// RFC 4648 Base32 alphabet.
pub const BASE32: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Upper-case hexadecimal alphabet.
pub const BASE16: &[u8; 16] = b"0123456789ABCDEF";

/// Padding character shared by Base64 and Base32.
pub const PAD: u8 = b'=';

/// Base64 encoder with `=` padding.
pub fn base64_encoder<S: Sink>(sink: S) -> Result<BaseNEncoder<S>, CodecError> {
    BaseNEncoder::new(EncoderOptions::with_padding(BASE64, 6, PAD), sink)
}

/// Base64 decoder; skips whitespace and padding.
pub fn base64_decoder<S: Sink>(sink: S) -> Result<BaseNDecoder<S>, CodecError> {
    BaseNDecoder::new(DecoderOptions::from_alphabet(BASE64, 6, false), sink)
}

/// URL-safe Base64 encoder, unpadded as is conventional for that variant.
pub fn base64_url_encoder<S: Sink>(sink: S) -> Result<BaseNEncoder<S>, CodecError> {
    BaseNEncoder::new(EncoderOptions::new(BASE64_URL, 6), sink)
}

/// URL-safe Base64 decoder.
pub fn base64_url_decoder<S: Sink>(sink: S) -> Result<BaseNDecoder<S>, CodecError> {
    BaseNDecoder::new(DecoderOptions::from_alphabet(BASE64_URL, 6, false), sink)
}

/// Base32 encoder with `=` padding.
pub fn base32_encoder<S: Sink>(sink: S) -> Result<BaseNEncoder<S>, CodecError> {
    BaseNEncoder::new(EncoderOptions::with_padding(BASE32, 5, PAD), sink)
}

/// Case-insensitive Base32 decoder.
pub fn base32_decoder<S: Sink>(sink: S) -> Result<BaseNDecoder<S>, CodecError> {
    BaseNDecoder::new(DecoderOptions::from_alphabet(BASE32, 5, true), sink)
}

/// Hexadecimal encoder, upper case.
pub fn hex_encoder<S: Sink>(sink: S) -> Result<BaseNEncoder<S>, CodecError> {
    BaseNEncoder::new(EncoderOptions::new(BASE16, 4), sink)
}

/// Case-insensitive hexadecimal decoder.
pub fn hex_decoder<S: Sink>(sink: S) -> Result<BaseNDecoder<S>, CodecError> {
    BaseNDecoder::new(DecoderOptions::from_alphabet(BASE16, 4, true), sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_presets_round_trip() {
        let mut encoder = base64_encoder(Vec::new()).expect("valid preset");
        encoder.put(b"Many hands make light work.", true);
        let encoded = encoder.into_inner();
        assert_eq!(encoded, b"TWFueSBoYW5kcyBtYWtlIGxpZ2h0IHdvcmsu");

        let mut decoder = base64_decoder(Vec::new()).expect("valid preset");
        decoder.put(&encoded, true);
        assert_eq!(decoder.into_inner(), b"Many hands make light work.");
    }

    #[test]
    fn base64_url_uses_safe_characters() {
        let mut encoder = base64_url_encoder(Vec::new()).expect("valid preset");
        encoder.put(&[0xfb, 0xff, 0xfe], true);
        let encoded = encoder.into_inner();
        assert_eq!(encoded, b"-__-");

        let mut decoder = base64_url_decoder(Vec::new()).expect("valid preset");
        decoder.put(&encoded, true);
        assert_eq!(decoder.into_inner(), vec![0xfb, 0xff, 0xfe]);
    }

    #[test]
    fn base32_presets_round_trip() {
        let mut encoder = base32_encoder(Vec::new()).expect("valid preset");
        encoder.put(b"Hello world", true);
        let encoded = encoder.into_inner();
        assert_eq!(encoded, b"JBSWY3DPEBLW64TMMQ======");

        let mut decoder = base32_decoder(Vec::new()).expect("valid preset");
        decoder.put(&encoded, true);
        assert_eq!(decoder.into_inner(), b"Hello world");
    }

    #[test]
    fn hex_presets_round_trip() {
        let mut encoder = hex_encoder(Vec::new()).expect("valid preset");
        encoder.put(&[0xde, 0xad, 0xbe, 0xef], true);
        let encoded = encoder.into_inner();
        assert_eq!(encoded, b"DEADBEEF");

        let mut decoder = hex_decoder(Vec::new()).expect("valid preset");
        decoder.put(b"deadBEEF", true);
        assert_eq!(decoder.into_inner(), vec![0xde, 0xad, 0xbe, 0xef]);
    }
}
