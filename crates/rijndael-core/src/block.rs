//! Block representation helpers.

/// Cipher block of 16 bytes.
pub type Block = [u8; 16];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Loads a block as four big-endian 32-bit words.
#[inline]
pub(crate) fn load_words(block: &Block) -> [u32; 4] {
    let mut s = [0u32; 4];
    for (word, chunk) in s.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes(chunk.try_into().expect("chunk length is four"));
    }
    s
}
