//! Streaming base-N codec core.
//!
//! This crate provides:
//! - A general bit-packing encoder and decoder parameterized by an
//!   alphabet and a power-of-two base (2, 4, 8, 16, 32, 64, 128).
//! - A grouper inserting separators between fixed-size output groups and
//!   a terminator at message end.
//! - Preset constructors for the common Base64/Base32/Hex transforms.
//!
//! Components stream: they accept input incrementally, push output into a
//! downstream [`Sink`], and survive backpressure by reporting unconsumed
//! input and resuming on the next call.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod alphabet;
mod decode;
mod encode;
mod error;
mod filter;
mod group;

pub use crate::decode::{decoding_lookup, BaseNDecoder, DecoderOptions, IGNORE};
pub use crate::encode::{BaseNEncoder, EncoderOptions};
pub use crate::error::CodecError;
pub use crate::filter::{Channel, Sink};
pub use crate::group::{Grouper, GrouperOptions};

#[cfg(test)]
mod tests {
    use crate::alphabet::BASE64;
    use crate::{BaseNEncoder, EncoderOptions, Grouper, GrouperOptions};

    #[test]
    fn encoder_chains_into_grouper() {
        let grouper = Grouper::new(
            GrouperOptions {
                group_size: 4,
                separator: Some(b" "),
                terminator: b"\n",
            },
            Vec::new(),
        )
        .expect("valid options");
        let mut encoder = BaseNEncoder::new(EncoderOptions::with_padding(BASE64, 6, b'='), grouper)
            .expect("valid options");

        assert_eq!(encoder.put(b"ManMan", true), 0);
        assert_eq!(encoder.into_inner().into_inner(), b"TWFu TWFu\n");
    }
}
