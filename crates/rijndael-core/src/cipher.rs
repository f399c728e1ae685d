//! Key schedule and single-block encryption/decryption.

use zeroize::Zeroize;

use crate::block::{load_words, xor_in_place, Block};
use crate::error::CipherError;
use crate::key::{Direction, RoundKeys, MAX_SCHEDULE_WORDS};
use crate::sbox::{sbox, RCON, SD};
use crate::tables::{cache_line_size, dec_table, enc_table, preload_inv_sbox, RoundTable};

/// Width of one cipher block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// A keyed Rijndael instance.
///
/// One instance serves one direction; the decryption schedule is stored
/// reversed with inverse MixColumns folded into the interior round keys so
/// both directions run the same round shape. Instances are single-owner:
/// share across threads by cloning, not by aliasing.
#[derive(Clone)]
pub struct Rijndael {
    keys: RoundKeys,
    rounds: usize,
    direction: Direction,
}

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    let b0 = sbox((word >> 24) as u8) as u32;
    let b1 = sbox((word >> 16) as u8) as u32;
    let b2 = sbox((word >> 8) as u8) as u32;
    let b3 = sbox(word as u8) as u32;
    (b0 << 24) | (b1 << 16) | (b2 << 8) | b3
}

/// Inverse MixColumns on a single schedule word, via the decryption table.
fn inv_mix_column(td: &RoundTable, word: u32) -> u32 {
    td.at(0, sbox((word >> 24) as u8))
        ^ td.at(1, sbox((word >> 16) as u8))
        ^ td.at(2, sbox((word >> 8) as u8))
        ^ td.at(3, sbox(word as u8))
}

impl Rijndael {
    /// Creates an instance keyed for `direction`.
    ///
    /// Fails with [`CipherError::InvalidKeyLength`] unless the key is 16,
    /// 24, or 32 bytes.
    pub fn new(key: &[u8], direction: Direction) -> Result<Self, CipherError> {
        let mut cipher = Self {
            keys: RoundKeys::empty(),
            rounds: 0,
            direction,
        };
        cipher.set_key(key, direction)?;
        Ok(cipher)
    }

    /// Re-keys the instance, zeroizing the previous schedule.
    pub fn set_key(&mut self, key: &[u8], direction: Direction) -> Result<(), CipherError> {
        let nk = match key.len() {
            16 | 24 | 32 => key.len() / 4,
            other => return Err(CipherError::InvalidKeyLength(other)),
        };
        let rounds = nk + 6;
        let schedule_len = 4 * (rounds + 1);

        let mut w = [0u32; MAX_SCHEDULE_WORDS];
        for (word, chunk) in w.iter_mut().zip(key.chunks_exact(4)) {
            *word = u32::from_be_bytes(chunk.try_into().expect("chunk length is four"));
        }
        for i in nk..schedule_len {
            let mut temp = w[i - 1];
            if i % nk == 0 {
                temp = sub_word(rot_word(temp)) ^ RCON[i / nk - 1];
            } else if nk == 8 && i % nk == 4 {
                temp = sub_word(temp);
            }
            w[i] = w[i - nk] ^ temp;
        }

        if direction == Direction::Decryption {
            let td = dec_table();
            // Reverse the schedule in 16-byte chunks, then fold inverse
            // MixColumns into every chunk but the first and the last.
            let (mut i, mut j) = (0, 4 * rounds);
            while i < j {
                for k in 0..4 {
                    w.swap(i + k, j + k);
                }
                i += 4;
                j -= 4;
            }
            for word in w[4..4 * rounds].iter_mut() {
                *word = inv_mix_column(td, *word);
            }
        }

        self.keys.replace(&w[..schedule_len]);
        self.rounds = rounds;
        self.direction = direction;
        w.zeroize();
        Ok(())
    }

    /// Block width in bytes, always 16.
    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Number of rounds for the installed key (10, 12, or 14).
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Length of the expanded schedule in 32-bit words.
    pub fn key_schedule_len(&self) -> usize {
        4 * (self.rounds + 1)
    }

    /// Direction the instance was keyed for.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub(crate) fn schedule(&self) -> &[u32] {
        self.keys.words()
    }

    /// Applies the keyed transformation to `input`, XORs `xor` into the
    /// result when present, and stores it in `out`.
    pub fn process_and_xor_block(&self, input: &Block, xor: Option<&Block>, out: &mut Block) {
        let mut block = match self.direction {
            Direction::Encryption => self.encrypt_block(input),
            Direction::Decryption => self.decrypt_block(input),
        };
        if let Some(xor) = xor {
            xor_in_place(&mut block, xor);
        }
        *out = block;
    }

    /// In-place form of [`Self::process_and_xor_block`] without an xor term.
    pub fn process_block(&self, block: &mut Block) {
        let input = *block;
        self.process_and_xor_block(&input, None, block);
    }

    fn encrypt_block(&self, input: &Block) -> Block {
        let te = enc_table();
        let rk = self.keys.words();

        let mut s = load_words(input);
        for (word, key) in s.iter_mut().zip(rk) {
            *word ^= key;
        }

        // Force the whole table resident before any key-dependent index.
        let u = te.preload(cache_line_size());
        for word in s.iter_mut() {
            *word |= u;
        }

        for r in 1..self.rounds {
            s = enc_round(te, &s, &rk[4 * r..4 * r + 4]);
        }
        enc_final(te, &s, &rk[4 * self.rounds..4 * self.rounds + 4])
    }

    fn decrypt_block(&self, input: &Block) -> Block {
        let td = dec_table();
        let rk = self.keys.words();

        let mut s = load_words(input);
        for (word, key) in s.iter_mut().zip(rk) {
            *word ^= key;
        }

        let u = td.preload(cache_line_size());
        for word in s.iter_mut() {
            *word |= u;
        }

        for r in 1..self.rounds {
            s = dec_round(td, &s, &rk[4 * r..4 * r + 4]);
        }

        // The final round leaves the word table for the inverse S-box;
        // make its lines resident too.
        let u = preload_inv_sbox(cache_line_size());
        for word in s.iter_mut() {
            *word |= u;
        }

        dec_final(&s, &rk[4 * self.rounds..4 * self.rounds + 4])
    }
}

/// One full encryption round over the four state words.
#[inline]
pub(crate) fn enc_round(te: &RoundTable, s: &[u32; 4], rk: &[u32]) -> [u32; 4] {
    let mut t = [0u32; 4];
    for j in 0..4 {
        t[j] = rk[j]
            ^ te.at(0, (s[j] >> 24) as u8)
            ^ te.at(1, (s[(j + 1) % 4] >> 16) as u8)
            ^ te.at(2, (s[(j + 2) % 4] >> 8) as u8)
            ^ te.at(3, s[(j + 3) % 4] as u8);
    }
    t
}

/// Final encryption round: raw S-box values pulled from byte 1 of the
/// table entries, so no unloaded memory is touched.
#[inline]
pub(crate) fn enc_final(te: &RoundTable, s: &[u32; 4], rk: &[u32]) -> Block {
    let mut out = [0u8; BLOCK_SIZE];
    for j in 0..4 {
        let word = rk[j]
            ^ (te.sbox_byte((s[j] >> 24) as u8) << 24)
            ^ (te.sbox_byte((s[(j + 1) % 4] >> 16) as u8) << 16)
            ^ (te.sbox_byte((s[(j + 2) % 4] >> 8) as u8) << 8)
            ^ te.sbox_byte(s[(j + 3) % 4] as u8);
        out[4 * j..4 * j + 4].copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// One full decryption round; byte selection rotates the opposite way.
#[inline]
fn dec_round(td: &RoundTable, s: &[u32; 4], rk: &[u32]) -> [u32; 4] {
    let mut t = [0u32; 4];
    for j in 0..4 {
        t[j] = rk[j]
            ^ td.at(0, (s[j] >> 24) as u8)
            ^ td.at(1, (s[(j + 3) % 4] >> 16) as u8)
            ^ td.at(2, (s[(j + 2) % 4] >> 8) as u8)
            ^ td.at(3, s[(j + 1) % 4] as u8);
    }
    t
}

#[inline]
fn dec_final(s: &[u32; 4], rk: &[u32]) -> Block {
    let mut out = [0u8; BLOCK_SIZE];
    for j in 0..4 {
        let word = rk[j]
            ^ ((SD[(s[j] >> 24) as usize] as u32) << 24)
            ^ ((SD[(s[(j + 3) % 4] >> 16) as usize & 0xff] as u32) << 16)
            ^ ((SD[(s[(j + 2) % 4] >> 8) as usize & 0xff] as u32) << 8)
            ^ SD[s[(j + 1) % 4] as usize & 0xff] as u32;
        out[4 * j..4 * j + 4].copy_from_slice(&word.to_be_bytes());
    }
    out
}
