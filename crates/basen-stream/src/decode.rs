//! Streaming base-N decoder.

use crate::encode::MAX_BLOCK;
use crate::error::CodecError;
use crate::filter::{Channel, Sink};

/// Lookup entry meaning "not part of the alphabet, skip it".
pub const IGNORE: i16 = -1;

/// Builds the 256-entry decoding table for `alphabet`.
///
/// Every entry starts at [`IGNORE`]; alphabet bytes map to their symbol
/// value, and when `case_insensitive` is set both letter cases register.
/// Supplying an alphabet whose entries collide is a programming error,
/// asserted in debug builds.
pub fn decoding_lookup(alphabet: &[u8], case_insensitive: bool) -> [i16; 256] {
    let mut lookup = [IGNORE; 256];
    for (value, &ch) in alphabet.iter().enumerate() {
        if case_insensitive && ch.is_ascii_alphabetic() {
            for variant in [ch.to_ascii_uppercase(), ch.to_ascii_lowercase()] {
                debug_assert_eq!(lookup[variant as usize], IGNORE, "duplicate alphabet entry");
                lookup[variant as usize] = value as i16;
            }
        } else {
            debug_assert_eq!(lookup[ch as usize], IGNORE, "duplicate alphabet entry");
            lookup[ch as usize] = value as i16;
        }
    }
    lookup
}

/// Configuration for [`BaseNDecoder`].
#[derive(Clone, Copy)]
pub struct DecoderOptions {
    /// Character-to-value table; negative entries are skipped.
    pub lookup: [i16; 256],
    /// Bits carried per input symbol, between 1 and 7 inclusive.
    pub log2_base: usize,
}

impl DecoderOptions {
    /// Options decoding `alphabet`, optionally case-insensitively.
    pub fn from_alphabet(alphabet: &[u8], log2_base: usize, case_insensitive: bool) -> Self {
        Self {
            lookup: decoding_lookup(alphabet, case_insensitive),
            log2_base,
        }
    }
}

#[derive(Clone, Copy)]
struct PendingWrite {
    channel: Channel,
    start: usize,
    end: usize,
}

/// Recovers symbol values through a 256-entry lookup and packs their bits
/// back into bytes. Characters outside the alphabet never alter state.
pub struct BaseNDecoder<S> {
    sink: S,
    lookup: [i16; 256],
    log2_base: usize,
    block_size: usize,
    out_buf: [u8; MAX_BLOCK],
    byte_pos: usize,
    bit_pos: usize,
    pending: Option<PendingWrite>,
}

impl<S: Sink> BaseNDecoder<S> {
    /// Builds a decoder writing into `sink`.
    pub fn new(options: DecoderOptions, sink: S) -> Result<Self, CodecError> {
        if !(1..=7).contains(&options.log2_base) {
            return Err(CodecError::InvalidArgument(
                "Log2Base must be between 1 and 7 inclusive",
            ));
        }

        // Smallest number of symbols filling a whole number of bytes.
        let mut bits = options.log2_base;
        while bits % 8 != 0 {
            bits += options.log2_base;
        }

        Ok(Self {
            sink,
            lookup: options.lookup,
            log2_base: options.log2_base,
            block_size: bits / 8,
            out_buf: [0; MAX_BLOCK],
            byte_pos: 0,
            bit_pos: 0,
            pending: None,
        })
    }

    /// Feeds input characters, flushing completed bytes downstream. At
    /// `message_end` any partial trailing bits are discarded, mirroring
    /// the encoder's zero-padding. Returns unconsumed input length; call
    /// again later to resume after backpressure.
    pub fn put(&mut self, input: &[u8], message_end: bool) -> usize {
        if !self.flush_pending() {
            return input.len();
        }

        let mut pos = 0;
        while pos < input.len() {
            let value = self.lookup[input[pos] as usize];
            pos += 1;
            if value < 0 {
                continue;
            }
            let value = value as u32;

            if self.byte_pos == 0 && self.bit_pos == 0 {
                self.out_buf = [0; MAX_BLOCK];
            }

            let new_bit_pos = self.bit_pos + self.log2_base;
            if new_bit_pos <= 8 {
                self.out_buf[self.byte_pos] |= (value << (8 - new_bit_pos)) as u8;
            } else {
                self.out_buf[self.byte_pos] |= (value >> (new_bit_pos - 8)) as u8;
                self.out_buf[self.byte_pos + 1] |= (value << (16 - new_bit_pos)) as u8;
            }

            self.bit_pos = new_bit_pos;
            while self.bit_pos >= 8 {
                self.bit_pos -= 8;
                self.byte_pos += 1;
            }

            if self.byte_pos == self.block_size {
                let len = self.block_size;
                self.byte_pos = 0;
                self.bit_pos = 0;
                if !self.emit(Channel::Body, len) {
                    return input.len() - pos;
                }
            }
        }

        if message_end {
            let len = self.byte_pos;
            self.byte_pos = 0;
            self.bit_pos = 0;
            self.emit(Channel::Final, len);
        }
        0
    }

    /// True while a blocked downstream write is still held.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Borrows the downstream sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the decoder and returns the downstream sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn emit(&mut self, channel: Channel, len: usize) -> bool {
        let consumed = self.sink.accept(channel, &self.out_buf[..len]);
        if consumed < len {
            self.pending = Some(PendingWrite {
                channel,
                start: consumed,
                end: len,
            });
            false
        } else {
            true
        }
    }

    fn flush_pending(&mut self) -> bool {
        if let Some(pending) = &mut self.pending {
            pending.start += self
                .sink
                .accept(pending.channel, &self.out_buf[pending.start..pending.end]);
            if pending.start < pending.end {
                return false;
            }
            self.pending = None;
        }
        true
    }
}
