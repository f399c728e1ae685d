//! Error type for cipher setup.

use std::error::Error;
use std::fmt;

/// Errors reported while keying a cipher instance.
///
/// Block processing itself never fails; all validation happens up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// The supplied key is not 16, 24, or 32 bytes long.
    InvalidKeyLength(usize),
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherError::InvalidKeyLength(len) => {
                write!(f, "invalid key length: {len} bytes (expected 16, 24, or 32)")
            }
        }
    }
}

impl Error for CipherError {}
