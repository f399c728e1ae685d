//! Output grouper: separators between fixed-size groups, a terminator at
//! message end.

use crate::error::CodecError;
use crate::filter::{Channel, Sink};

/// Configuration for [`Grouper`].
#[derive(Clone, Copy, Debug)]
pub struct GrouperOptions<'a> {
    /// Bytes per group; 0 disables grouping and passes data through.
    pub group_size: usize,
    /// Inserted between groups. Required when `group_size` is nonzero.
    pub separator: Option<&'a [u8]>,
    /// Appended once at message end.
    pub terminator: &'a [u8],
}

impl Default for GrouperOptions<'static> {
    fn default() -> Self {
        Self {
            group_size: 0,
            separator: None,
            terminator: b"",
        }
    }
}

/// Forwards bytes downstream, inserting the separator after every
/// `group_size` forwarded bytes (between groups only, never at either
/// edge) and the terminator at message end.
pub struct Grouper<S> {
    sink: S,
    group_size: usize,
    separator: Vec<u8>,
    terminator: Vec<u8>,
    counter: usize,
    sep_pos: usize,
    term_pos: usize,
    end_pending: bool,
}

impl<S: Sink> Grouper<S> {
    /// Builds a grouper writing into `sink`.
    pub fn new(options: GrouperOptions<'_>, sink: S) -> Result<Self, CodecError> {
        let separator = match (options.group_size, options.separator) {
            (0, _) => Vec::new(),
            (_, Some(separator)) => separator.to_vec(),
            (_, None) => {
                return Err(CodecError::MissingRequiredParameter(
                    "Separator is required when GroupSize is nonzero",
                ))
            }
        };
        Ok(Self {
            sink,
            group_size: options.group_size,
            separator,
            terminator: options.terminator.to_vec(),
            counter: 0,
            sep_pos: 0,
            term_pos: 0,
            end_pending: false,
        })
    }

    /// Feeds bytes through the grouper; `message_end` emits the
    /// terminator and resets the group counter. Returns unconsumed input
    /// length; call again later to resume after backpressure.
    pub fn put(&mut self, input: &[u8], message_end: bool) -> usize {
        let mut message_end = message_end;
        if self.end_pending {
            if !self.emit_terminator() {
                return input.len();
            }
            // This call resumed a blocked message end; its own flag refers
            // to the same message and is already satisfied.
            message_end = false;
        }

        let mut pos = 0;
        if self.group_size == 0 {
            while pos < input.len() {
                let consumed = self.sink.accept(Channel::Body, &input[pos..]);
                pos += consumed;
                if consumed == 0 {
                    return input.len() - pos;
                }
            }
        } else {
            while pos < input.len() {
                if self.counter == self.group_size {
                    self.sep_pos += self
                        .sink
                        .accept(Channel::Body, &self.separator[self.sep_pos..]);
                    if self.sep_pos < self.separator.len() {
                        return input.len() - pos;
                    }
                    self.sep_pos = 0;
                    self.counter = 0;
                }
                let group_left = self.group_size - self.counter;
                let len = (input.len() - pos).min(group_left);
                let consumed = self.sink.accept(Channel::Body, &input[pos..pos + len]);
                pos += consumed;
                self.counter += consumed;
                if consumed < len {
                    return input.len() - pos;
                }
            }
        }

        if message_end && !self.emit_terminator() {
            self.end_pending = true;
        }
        0
    }

    /// True while the terminator is still owed downstream.
    pub fn has_pending(&self) -> bool {
        self.end_pending
    }

    /// Consumes the grouper and returns the downstream sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn emit_terminator(&mut self) -> bool {
        self.term_pos += self
            .sink
            .accept(Channel::Final, &self.terminator[self.term_pos..]);
        if self.term_pos < self.terminator.len() {
            return false;
        }
        self.term_pos = 0;
        self.counter = 0;
        self.end_pending = false;
        true
    }
}

/// Lets a grouper sit downstream of an encoder or decoder: mid-stream
/// writes pass through `put`, and the final write carries the message end.
impl<S: Sink> Sink for Grouper<S> {
    fn accept(&mut self, channel: Channel, buf: &[u8]) -> usize {
        let unconsumed = self.put(buf, channel == Channel::Final);
        buf.len() - unconsumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped(options: GrouperOptions<'_>, input: &[u8]) -> Vec<u8> {
        let mut grouper = Grouper::new(options, Vec::new()).expect("valid options");
        assert_eq!(grouper.put(input, true), 0);
        grouper.into_inner()
    }

    #[test]
    fn separates_groups_and_terminates() {
        let options = GrouperOptions {
            group_size: 4,
            separator: Some(b" "),
            terminator: b"\n",
        };
        assert_eq!(grouped(options, b"TWFuTWFu"), b"TWFu TWFu\n");
    }

    #[test]
    fn no_separator_at_either_edge() {
        let options = GrouperOptions {
            group_size: 3,
            separator: Some(b"-"),
            terminator: b"",
        };
        assert_eq!(grouped(options, b"abcdefgh"), b"abc-def-gh");
        assert_eq!(grouped(options, b"abc"), b"abc");
    }

    #[test]
    fn zero_group_size_passes_through() {
        let options = GrouperOptions {
            terminator: b"!",
            ..GrouperOptions::default()
        };
        assert_eq!(grouped(options, b"hello"), b"hello!");
    }

    #[test]
    fn counter_survives_split_input() {
        let options = GrouperOptions {
            group_size: 4,
            separator: Some(b" "),
            terminator: b"\n",
        };
        let mut grouper = Grouper::new(options, Vec::new()).expect("valid options");
        assert_eq!(grouper.put(b"TW", false), 0);
        assert_eq!(grouper.put(b"FuTW", false), 0);
        assert_eq!(grouper.put(b"Fu", true), 0);
        assert_eq!(grouper.into_inner(), b"TWFu TWFu\n");
    }

    #[test]
    fn counter_resets_between_messages() {
        let options = GrouperOptions {
            group_size: 2,
            separator: Some(b"."),
            terminator: b";",
        };
        let mut grouper = Grouper::new(options, Vec::new()).expect("valid options");
        assert_eq!(grouper.put(b"abc", true), 0);
        assert_eq!(grouper.put(b"de", true), 0);
        assert_eq!(grouper.into_inner(), b"ab.c;de;");
    }

    #[test]
    fn requires_separator_with_group_size() {
        let options = GrouperOptions {
            group_size: 4,
            separator: None,
            terminator: b"",
        };
        let result = Grouper::new(options, Vec::new());
        assert!(matches!(
            result.err(),
            Some(CodecError::MissingRequiredParameter(_))
        ));
    }

    /// Sink taking at most one byte per offer.
    struct TrickleSink(Vec<u8>);

    impl Sink for TrickleSink {
        fn accept(&mut self, _channel: Channel, buf: &[u8]) -> usize {
            let take = buf.len().min(1);
            self.0.extend_from_slice(&buf[..take]);
            take
        }
    }

    #[test]
    fn resumes_after_backpressure_without_duplication() {
        let options = GrouperOptions {
            group_size: 4,
            separator: Some(b", "),
            terminator: b".\n",
        };
        let mut grouper = Grouper::new(options, TrickleSink(Vec::new())).expect("valid options");

        let mut remaining: &[u8] = b"TWFuTWFuTWFu";
        loop {
            let left = grouper.put(remaining, true);
            remaining = &remaining[remaining.len() - left..];
            if left == 0 && !grouper.has_pending() {
                break;
            }
        }
        assert_eq!(grouper.into_inner().0, b"TWFu, TWFu, TWFu.\n");
    }
}
