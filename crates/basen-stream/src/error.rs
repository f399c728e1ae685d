//! Error type for codec initialization.

use std::error::Error;
use std::fmt;

/// Errors reported while configuring a codec component.
///
/// Streaming itself never fails: unknown input characters are skipped by
/// design and backpressure is reported through unconsumed byte counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// A supplied option is out of range or inconsistent.
    InvalidArgument(&'static str),
    /// An option required by the chosen configuration was not supplied.
    MissingRequiredParameter(&'static str),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            CodecError::MissingRequiredParameter(msg) => {
                write!(f, "missing required parameter: {msg}")
            }
        }
    }
}

impl Error for CodecError {}
