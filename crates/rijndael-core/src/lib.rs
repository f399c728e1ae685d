//! Rijndael/AES block cipher core.
//!
//! This crate provides:
//! - Key schedule for 128/192/256-bit keys, zeroized on drop and re-key.
//! - Single-block encryption and decryption over precomputed tables, with
//!   the cache-line preload countermeasure against timing attacks.
//! - Bulk multi-block processing with xor-stream and counter-mode support.
//!
//! Higher-level chaining modes and authenticated encryption live outside
//! this crate; it exposes only the block-level contract those modes build
//! on.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod bulk;
mod cipher;
mod error;
mod key;
mod sbox;
mod tables;

pub use crate::block::{xor_in_place, Block};
pub use crate::bulk::BlockFlags;
pub use crate::cipher::{Rijndael, BLOCK_SIZE};
pub use crate::error::CipherError;
pub use crate::key::Direction;
