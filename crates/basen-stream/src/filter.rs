//! The streaming contract shared by the codec components.
//!
//! Components push bytes downstream through a [`Sink`] and accept bytes
//! through a `put(input, message_end) -> unconsumed` method. A sink that
//! cannot take a whole write consumes a prefix and the component keeps the
//! remainder, re-offering it at the start of its next `put`. Feeding
//! `put(&[], true)` drains anything still held after the caller runs out
//! of input.

/// Identifies the kind of write a component hands downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// A mid-stream block of output.
    Body,
    /// The final write of a message. May be empty; it still signals
    /// end-of-message to the receiver.
    Final,
}

impl Channel {
    /// Numeric channel id: 1 for mid-stream writes, 2 for the final write.
    pub fn id(self) -> u8 {
        match self {
            Channel::Body => 1,
            Channel::Final => 2,
        }
    }
}

/// A downstream receiver of codec output.
pub trait Sink {
    /// Offers `buf` on `channel` and returns how many bytes were taken.
    ///
    /// Returning less than `buf.len()` signals backpressure; the caller
    /// holds the remainder and offers it again later. Receivers must not
    /// assume a `Final` write arrives in one piece, but once its last byte
    /// is consumed the message is over.
    fn accept(&mut self, channel: Channel, buf: &[u8]) -> usize;
}

impl Sink for Vec<u8> {
    fn accept(&mut self, _channel: Channel, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}
