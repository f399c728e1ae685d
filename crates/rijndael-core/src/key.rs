//! Key direction and round-key storage.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Words in the largest schedule (AES-256, 14 rounds).
pub(crate) const MAX_SCHEDULE_WORDS: usize = 60;

/// Whether a keyed instance runs the forward or the inverse transformation.
///
/// The choice is fixed at key setup: decryption reverses the schedule and
/// pre-applies inverse MixColumns to the interior round keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Forward transformation.
    Encryption,
    /// Inverse transformation.
    Decryption,
}

/// Expanded round keys, overwritten with zeros on drop and on re-key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct RoundKeys {
    words: [u32; MAX_SCHEDULE_WORDS],
    len: usize,
}

impl RoundKeys {
    pub(crate) fn empty() -> Self {
        Self {
            words: [0; MAX_SCHEDULE_WORDS],
            len: 0,
        }
    }

    /// Installs a fresh schedule, zeroizing whatever was there before.
    pub(crate) fn replace(&mut self, schedule: &[u32]) {
        self.words.zeroize();
        self.words[..schedule.len()].copy_from_slice(schedule);
        self.len = schedule.len();
    }

    #[inline]
    pub(crate) fn words(&self) -> &[u32] {
        &self.words[..self.len]
    }
}
