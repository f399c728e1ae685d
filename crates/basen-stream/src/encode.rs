//! Streaming base-N encoder.

use crate::error::CodecError;
use crate::filter::{Channel, Sink};

/// Largest working buffer any base needs: eight output symbols.
pub(crate) const MAX_BLOCK: usize = 8;

/// Largest supported alphabet: 2^7 symbols.
const MAX_BASE: usize = 128;

/// Configuration for [`BaseNEncoder`].
#[derive(Clone, Copy, Debug)]
pub struct EncoderOptions<'a> {
    /// Output alphabet; its length must equal `1 << log2_base`.
    pub alphabet: &'a [u8],
    /// Bits consumed per output symbol, between 1 and 7 inclusive.
    pub log2_base: usize,
    /// Byte used to pad a partial final block.
    pub padding_byte: Option<u8>,
    /// Overrides whether padding is applied. Defaults to on exactly when
    /// a padding byte is supplied.
    pub pad: Option<bool>,
}

impl<'a> EncoderOptions<'a> {
    /// Options with no padding.
    pub fn new(alphabet: &'a [u8], log2_base: usize) -> Self {
        Self {
            alphabet,
            log2_base,
            padding_byte: None,
            pad: None,
        }
    }

    /// Options padding partial final blocks with `padding_byte`.
    pub fn with_padding(alphabet: &'a [u8], log2_base: usize, padding_byte: u8) -> Self {
        Self {
            alphabet,
            log2_base,
            padding_byte: Some(padding_byte),
            pad: None,
        }
    }
}

#[derive(Clone, Copy)]
struct PendingWrite {
    channel: Channel,
    start: usize,
    end: usize,
}

/// Packs input bytes into output symbols of `log2_base` bits each,
/// MSB-first, translating through the alphabet one full block at a time.
pub struct BaseNEncoder<S> {
    sink: S,
    alphabet: [u8; MAX_BASE],
    log2_base: usize,
    padding: Option<u8>,
    block_size: usize,
    out_buf: [u8; MAX_BLOCK],
    byte_pos: usize,
    bit_pos: usize,
    pending: Option<PendingWrite>,
}

impl<S: Sink> BaseNEncoder<S> {
    /// Builds an encoder writing into `sink`.
    pub fn new(options: EncoderOptions<'_>, sink: S) -> Result<Self, CodecError> {
        if !(1..=7).contains(&options.log2_base) {
            return Err(CodecError::InvalidArgument(
                "Log2Base must be between 1 and 7 inclusive",
            ));
        }
        let base = 1usize << options.log2_base;
        if options.alphabet.len() != base {
            return Err(CodecError::InvalidArgument(
                "alphabet length must equal 2^Log2Base",
            ));
        }
        let mut alphabet = [0u8; MAX_BASE];
        alphabet[..base].copy_from_slice(options.alphabet);

        // Smallest number of symbols covering a whole number of bytes.
        let mut bits = 8;
        while bits % options.log2_base != 0 {
            bits += 8;
        }

        Ok(Self {
            sink,
            alphabet,
            log2_base: options.log2_base,
            padding: options.padding_byte.filter(|_| options.pad.unwrap_or(true)),
            block_size: bits / options.log2_base,
            out_buf: [0; MAX_BLOCK],
            byte_pos: 0,
            bit_pos: 0,
            pending: None,
        })
    }

    /// Feeds input bytes, flushing the final (possibly padded) block when
    /// `message_end` is set. Returns the number of input bytes not yet
    /// consumed; call again later (with the unconsumed tail, or empty) to
    /// resume after backpressure.
    pub fn put(&mut self, input: &[u8], message_end: bool) -> usize {
        if !self.flush_pending() {
            return input.len();
        }

        let mut pos = 0;
        while pos < input.len() {
            if self.byte_pos == 0 {
                self.out_buf = [0; MAX_BLOCK];
            }

            let mut b = input[pos] as u32;
            pos += 1;
            let mut bits_left_in_source = 8usize;
            loop {
                debug_assert!(self.bit_pos < self.log2_base);
                let bits_left_in_target = self.log2_base - self.bit_pos;
                self.out_buf[self.byte_pos] |= (b >> (8 - bits_left_in_target)) as u8;
                if bits_left_in_source >= bits_left_in_target {
                    self.bit_pos = 0;
                    self.byte_pos += 1;
                    bits_left_in_source -= bits_left_in_target;
                    if bits_left_in_source == 0 {
                        break;
                    }
                    b = (b << bits_left_in_target) & 0xff;
                } else {
                    self.bit_pos += bits_left_in_source;
                    break;
                }
            }

            debug_assert!(self.byte_pos <= self.block_size);
            if self.byte_pos == self.block_size {
                self.translate(self.block_size);
                let len = self.block_size;
                self.byte_pos = 0;
                self.bit_pos = 0;
                if !self.emit(Channel::Body, len) {
                    return input.len() - pos;
                }
            }
        }

        if message_end {
            if self.bit_pos > 0 {
                // The partial symbol is complete as-is: its low bits are zero.
                self.byte_pos += 1;
            }
            self.translate(self.byte_pos);
            let mut len = self.byte_pos;
            if let Some(pad) = self.padding {
                if len > 0 {
                    for slot in self.out_buf[len..self.block_size].iter_mut() {
                        *slot = pad;
                    }
                    len = self.block_size;
                }
            }
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

    /// Consumes the encoder and returns the downstream sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn translate(&mut self, len: usize) {
        for symbol in self.out_buf[..len].iter_mut() {
            debug_assert!((*symbol as usize) < (1 << self.log2_base));
            *symbol = self.alphabet[*symbol as usize];
        }
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
