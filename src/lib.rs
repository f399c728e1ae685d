//! Facade over the `rijncode` workspace.
//!
//! Re-exports the Rijndael block cipher core and the streaming base-N
//! codec so applications can depend on a single crate.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub use basen_stream::{
    alphabet, decoding_lookup, BaseNDecoder, BaseNEncoder, Channel, CodecError, DecoderOptions,
    EncoderOptions, Grouper, GrouperOptions, Sink, IGNORE,
};
pub use rijndael_core::{
    xor_in_place, Block, BlockFlags, CipherError, Direction, Rijndael, BLOCK_SIZE,
};
