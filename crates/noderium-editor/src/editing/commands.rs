use std::ops::Range;

use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    InsertText { at: usize, text: String },
    DeleteRange { range: Range<usize> },
    ReplaceRange { range: Range<usize>, text: String },
}

impl Cmd {
    /// The command that replaces `range` with `text`, picking the narrowest
    /// variant.
    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        let text = text.into();
        if range.is_empty() {
            Cmd::InsertText {
                at: range.start,
                text,
            }
        } else if text.is_empty() {
            Cmd::DeleteRange { range }
        } else {
            Cmd::ReplaceRange { range, text }
        }
    }
}

/// Compile a command into a delta over a buffer of `len` bytes.
///
/// Ranges are clamped to the buffer so a stale command cannot make the
/// builder panic.
pub(crate) fn compile_command(len: usize, cmd: &Cmd) -> Delta<RopeInfo> {
    let clamp = |range: &Range<usize>| {
        let start = range.start.min(len);
        start..range.end.clamp(start, len)
    };

    let mut builder = Builder::new(len);
    match cmd {
        Cmd::InsertText { at, text } => {
            let at = (*at).min(len);
            builder.replace(at..at, Rope::from(text.as_str()));
        }
        Cmd::DeleteRange { range } => {
            builder.delete(clamp(range));
        }
        Cmd::ReplaceRange { range, text } => {
            builder.replace(clamp(range), Rope::from(text.as_str()));
        }
    }
    builder.build()
}
