//! Multi-block processing: flag-controlled pointer stepping and the
//! counter-mode partial-round cache.

use bitflags::bitflags;

use crate::block::{load_words, xor_in_place, Block};
use crate::cipher::{enc_final, enc_round, Rijndael, BLOCK_SIZE};
use crate::key::Direction;
use crate::tables::{cache_line_size, enc_table, RoundTable};

bitflags! {
    /// Flags accepted by [`Rijndael::advanced_process_blocks`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct BlockFlags: u32 {
        /// The input is one 16-byte counter; block `i` processes the
        /// counter advanced by `i`, and the xor stream (when present)
        /// applies to the output.
        const IN_BLOCK_IS_COUNTER = 1;
        /// Input and output offsets stay fixed; every block reads and
        /// overwrites the same addresses. The xor stream still advances.
        const DONT_INCREMENT_IN_OUT_POINTERS = 2;
        /// XOR the xor stream into the input before the cipher rather
        /// than into the output after it.
        const XOR_INPUT = 4;
    }
}

/// Advances a big-endian counter by one, carrying across the whole block.
fn increment_counter(counter: &mut [u8]) {
    for byte in counter.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

/// First- and second-round state shared by every block whose counter
/// differs only in the low byte. Depends on nothing but the round keys and
/// the counter prefix, both already known to the caller, so caching it
/// leaks nothing.
struct CounterCache {
    /// Round-1 word 0 minus its low-counter-byte term.
    t0_partial: u32,
    /// Round-2 words minus their round-1-word-0 terms.
    s_partial: [u32; 4],
}

impl CounterCache {
    fn build(te: &RoundTable, rk: &[u32], counter: &Block, preload: u32) -> Self {
        let mut s = load_words(counter);
        for (word, key) in s.iter_mut().zip(rk) {
            *word ^= key;
            *word |= preload;
        }

        // Round 1. The low byte of s[3] is the only input that varies
        // between adjacent counters, and only t[0] consumes it.
        let t0_partial = rk[4]
            ^ te.at(0, (s[0] >> 24) as u8)
            ^ te.at(1, (s[1] >> 16) as u8)
            ^ te.at(2, (s[2] >> 8) as u8);
        let mut t = [0u32; 4];
        for j in 1..4 {
            t[j] = rk[4 + j]
                ^ te.at(0, (s[j] >> 24) as u8)
                ^ te.at(1, (s[(j + 1) % 4] >> 16) as u8)
                ^ te.at(2, (s[(j + 2) % 4] >> 8) as u8)
                ^ te.at(3, s[(j + 3) % 4] as u8);
        }

        // Round 2 with every t[0] term left out.
        let s_partial = [
            rk[8]
                ^ te.at(1, (t[1] >> 16) as u8)
                ^ te.at(2, (t[2] >> 8) as u8)
                ^ te.at(3, t[3] as u8),
            rk[9]
                ^ te.at(0, (t[1] >> 24) as u8)
                ^ te.at(1, (t[2] >> 16) as u8)
                ^ te.at(2, (t[3] >> 8) as u8),
            rk[10]
                ^ te.at(0, (t[2] >> 24) as u8)
                ^ te.at(1, (t[3] >> 16) as u8)
                ^ te.at(3, t[1] as u8),
            rk[11]
                ^ te.at(0, (t[3] >> 24) as u8)
                ^ te.at(2, (t[1] >> 8) as u8)
                ^ te.at(3, t[2] as u8),
        ];

        Self {
            t0_partial,
            s_partial,
        }
    }

    /// Completes rounds 1 and 2 for a block whose keyed low counter byte
    /// is `keyed_low`.
    fn finish(&self, te: &RoundTable, keyed_low: u8) -> [u32; 4] {
        let t0 = self.t0_partial ^ te.at(3, keyed_low);
        [
            self.s_partial[0] ^ te.at(0, (t0 >> 24) as u8),
            self.s_partial[1] ^ te.at(3, t0 as u8),
            self.s_partial[2] ^ te.at(2, (t0 >> 8) as u8),
            self.s_partial[3] ^ te.at(1, (t0 >> 16) as u8),
        ]
    }
}

impl Rijndael {
    /// Processes `length / 16` blocks and returns the count of trailing
    /// bytes (`length % 16`, or all of `length` below one block) left for
    /// the caller to buffer.
    ///
    /// Blocks are processed in strict input order. With
    /// [`BlockFlags::IN_BLOCK_IS_COUNTER`] the advanced counter is not
    /// written back; callers derive it from the processed count.
    pub fn advanced_process_blocks(
        &self,
        in_blocks: &[u8],
        xor_blocks: Option<&[u8]>,
        out_blocks: &mut [u8],
        length: usize,
        flags: BlockFlags,
    ) -> usize {
        if length < BLOCK_SIZE {
            return length;
        }
        let blocks = length / BLOCK_SIZE;

        if flags.contains(BlockFlags::IN_BLOCK_IS_COUNTER)
            && self.direction() == Direction::Encryption
        {
            self.process_counter_blocks(in_blocks, xor_blocks, out_blocks, blocks, flags);
        } else {
            self.process_block_run(in_blocks, xor_blocks, out_blocks, blocks, flags);
        }
        length % BLOCK_SIZE
    }

    /// The generic stride: one call to the single-block engine per block.
    fn process_block_run(
        &self,
        in_blocks: &[u8],
        xor_blocks: Option<&[u8]>,
        out_blocks: &mut [u8],
        blocks: usize,
        flags: BlockFlags,
    ) {
        let fixed = flags.contains(BlockFlags::DONT_INCREMENT_IN_OUT_POINTERS);
        let counter_mode = flags.contains(BlockFlags::IN_BLOCK_IS_COUNTER);
        let in_inc = if fixed || counter_mode { 0 } else { BLOCK_SIZE };
        let out_inc = if fixed { 0 } else { BLOCK_SIZE };
        let xor_inc = if xor_blocks.is_some() { BLOCK_SIZE } else { 0 };
        let xor_first = flags.contains(BlockFlags::XOR_INPUT) && !counter_mode;

        let mut counter: Block = [0; BLOCK_SIZE];
        if counter_mode {
            counter.copy_from_slice(&in_blocks[..BLOCK_SIZE]);
        }

        let (mut in_off, mut out_off, mut xor_off) = (0usize, 0usize, 0usize);
        for _ in 0..blocks {
            let mut input: Block = if counter_mode {
                counter
            } else {
                in_blocks[in_off..in_off + BLOCK_SIZE]
                    .try_into()
                    .expect("block length is sixteen")
            };
            let xor_block: Option<Block> = xor_blocks.map(|xor| {
                xor[xor_off..xor_off + BLOCK_SIZE]
                    .try_into()
                    .expect("block length is sixteen")
            });

            if xor_first {
                if let Some(xor) = &xor_block {
                    xor_in_place(&mut input, xor);
                }
            }
            let mut out = [0u8; BLOCK_SIZE];
            self.process_and_xor_block(
                &input,
                if xor_first { None } else { xor_block.as_ref() },
                &mut out,
            );
            out_blocks[out_off..out_off + BLOCK_SIZE].copy_from_slice(&out);

            if counter_mode {
                increment_counter(&mut counter);
            }
            in_off += in_inc;
            out_off += out_inc;
            xor_off += xor_inc;
        }
    }

    /// Counter stride: rounds 1 and 2 are mostly shared between adjacent
    /// counter values, so they are cached and only the low-byte terms are
    /// recomputed per block. The cache is rebuilt when the low byte wraps
    /// and the carry changes the prefix.
    fn process_counter_blocks(
        &self,
        in_blocks: &[u8],
        xor_blocks: Option<&[u8]>,
        out_blocks: &mut [u8],
        blocks: usize,
        flags: BlockFlags,
    ) {
        let te = enc_table();
        let rk = self.schedule();
        let rounds = self.rounds();

        let preload = te.preload(cache_line_size());
        let mut counter: Block = in_blocks[..BLOCK_SIZE]
            .try_into()
            .expect("block length is sixteen");
        let out_inc = if flags.contains(BlockFlags::DONT_INCREMENT_IN_OUT_POINTERS) {
            0
        } else {
            BLOCK_SIZE
        };
        let xor_inc = if xor_blocks.is_some() { BLOCK_SIZE } else { 0 };
        let key_low = rk[3] as u8;

        let mut cache = CounterCache::build(te, rk, &counter, preload);
        let (mut out_off, mut xor_off) = (0usize, 0usize);
        for _ in 0..blocks {
            let mut s = cache.finish(te, counter[15] ^ key_low);
            for r in 3..rounds {
                s = enc_round(te, &s, &rk[4 * r..4 * r + 4]);
            }
            let mut out = enc_final(te, &s, &rk[4 * rounds..4 * rounds + 4]);

            if let Some(xor) = xor_blocks {
                let xor_block: Block = xor[xor_off..xor_off + BLOCK_SIZE]
                    .try_into()
                    .expect("block length is sixteen");
                xor_in_place(&mut out, &xor_block);
            }
            out_blocks[out_off..out_off + BLOCK_SIZE].copy_from_slice(&out);

            counter[15] = counter[15].wrapping_add(1);
            if counter[15] == 0 {
                increment_counter(&mut counter[..15]);
                cache = CounterCache::build(te, rk, &counter, preload);
            }
            out_off += out_inc;
            xor_off += xor_inc;
        }
    }
}
