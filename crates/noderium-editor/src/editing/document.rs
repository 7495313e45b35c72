use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use noderium_syntax::{SyntaxNode, parse};
use xi_rope::Rope;
use xi_rope::delta::DeltaElement;

use crate::editing::commands::compile_command;
use crate::editing::{Cmd, Patch};

/// One line of the document.
///
/// `to` excludes the line break, whether `\n` or `\r\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub from: usize,
    pub to: usize,
    /// 1-indexed line number
    pub number: usize,
    pub text: String,
}

impl Line {
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Whether `pos` lies on this line, counting the position just before
    /// the line break.
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.from && pos <= self.to
    }
}

/// The text buffer and its syntax tree.
///
/// The buffer is a single `xi_rope::Rope` and is the source of truth: saving
/// writes its bytes back verbatim. The tree is rebuilt from the buffer after
/// every applied command, so it always describes the current text.
///
/// ```rust
/// # use noderium_editor::editing::{Cmd, Document};
/// let mut doc = Document::from_bytes(b"# Hello\n\n- Item 1").unwrap();
/// let patch = doc.apply(Cmd::InsertText { at: 7, text: " world".into() });
///
/// assert_eq!(patch.version, 1);
/// assert_eq!(doc.line(1).text, "# Hello world");
/// ```
pub struct Document {
    buffer: Rope,
    tree: SyntaxNode,
    /// Incremented on each applied command
    version: u64,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            tree: parse(text),
            version: 0,
        }
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.text().into_bytes()
    }

    /// Apply a command, re-parse, and report what changed.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let delta = compile_command(self.buffer.len(), &cmd);

        // Changed ranges in new-document coordinates. A deletion shows up as
        // a gap between copied regions and is reported as an empty range.
        let mut changed: Vec<Range<usize>> = Vec::new();
        let mut old_cursor = 0;
        let mut new_cursor = 0;
        for el in delta.els.iter() {
            match el {
                DeltaElement::Copy(from, to) => {
                    if *from > old_cursor && changed.last().is_none_or(|r| r.end != new_cursor) {
                        changed.push(new_cursor..new_cursor);
                    }
                    new_cursor += to - from;
                    old_cursor = *to;
                }
                DeltaElement::Insert(inserted) => {
                    let start = new_cursor;
                    new_cursor += inserted.len();
                    changed.push(start..new_cursor);
                }
            }
        }
        if old_cursor < delta.base_len && changed.last().is_none_or(|r| r.end != new_cursor) {
            changed.push(new_cursor..new_cursor);
        }

        self.buffer = delta.apply(&self.buffer);
        self.tree = parse(&self.text());
        self.version += 1;

        Patch {
            changed,
            version: self.version,
        }
    }

    /// Get the current version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Root of the current syntax tree
    pub fn tree(&self) -> &SyntaxNode {
        &self.tree
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Number of lines. An empty document has one empty line, and a trailing
    /// line break opens a final empty line.
    pub fn lines(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }

    /// The line containing `offset`, clamped to the document.
    pub fn line_at(&self, offset: usize) -> Line {
        let offset = self.floor_char_boundary(offset);
        self.line(self.buffer.line_of_offset(offset) + 1)
    }

    /// Line by 1-indexed number, clamped to `1..=lines()`.
    pub fn line(&self, number: usize) -> Line {
        let number = number.clamp(1, self.lines());
        let from = self.buffer.offset_of_line(number - 1);
        let next = if number < self.lines() {
            self.buffer.offset_of_line(number)
        } else {
            self.buffer.len()
        };

        let raw = self.buffer.slice_to_cow(from..next);
        let text = raw
            .strip_suffix('\n')
            .map(|t| t.strip_suffix('\r').unwrap_or(t))
            .unwrap_or(&*raw)
            .to_string();

        Line {
            from,
            to: from + text.len(),
            number,
            text,
        }
    }

    /// Text between two offsets, clamped to the document. Offsets inside a
    /// multibyte character move back to its start.
    pub fn slice(&self, from: usize, to: usize) -> Cow<'_, str> {
        let start = self.floor_char_boundary(from);
        let end = self.floor_char_boundary(to).max(start);
        self.buffer.slice_to_cow(start..end)
    }

    /// Largest char boundary at or before `offset`, clamped to the document.
    pub fn floor_char_boundary(&self, offset: usize) -> usize {
        let offset = offset.min(self.buffer.len());
        self.buffer
            .at_or_prev_codepoint_boundary(offset)
            .unwrap_or(0)
    }
}

impl Clone for Document {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            tree: self.tree.clone(),
            version: self.version,
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.len())
            .field("lines", &self.lines())
            .field("version", &self.version)
            .finish()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        // Trees are derived from the buffer
        self.buffer.to_string() == other.buffer.to_string() && self.version == other.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noderium_syntax::SyntaxKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // ============ Basic document tests ============

    #[test]
    fn test_document_from_bytes_valid_utf8() {
        let text = "# Hello World\n\nThis is a test document.";
        let doc = Document::from_bytes(text.as_bytes()).expect("Should create document");

        assert_eq!(doc.to_bytes(), text.as_bytes());
        assert_eq!(doc.version(), 0);
        assert_eq!(doc.tree().kind(), SyntaxKind::ROOT);
    }

    #[test]
    fn test_document_from_bytes_invalid_utf8() {
        let invalid_bytes = vec![0xFF, 0xFE, 0xFD];
        assert!(Document::from_bytes(&invalid_bytes).is_err());
    }

    #[rstest]
    #[case::unicode("Hello 世界! 🦀\n\nRust is great! 🎉")]
    #[case::windows_line_endings("Line 1\r\nLine 2\r\nLine 3")]
    #[case::mixed_line_endings("Unix line\nWindows line\r\nAnother Unix\n")]
    fn test_document_round_trips_bytes(#[case] text: &str) {
        let doc = Document::from_bytes(text.as_bytes()).expect("Should create document");
        assert_eq!(doc.to_bytes(), text.as_bytes());
        assert_eq!(doc.tree().text().to_string(), text);
    }

    // ============ Line addressing ============

    #[rstest]
    #[case("", 1)]
    #[case("one", 1)]
    #[case("one\n", 2)]
    #[case("one\ntwo\nthree", 3)]
    fn test_lines(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(Document::new(text).lines(), expected);
    }

    #[test]
    fn test_line_excludes_line_break() {
        let doc = Document::new("# Title\r\nbody\nlast");
        assert_eq!(
            doc.line(1),
            Line {
                from: 0,
                to: 7,
                number: 1,
                text: "# Title".into()
            }
        );
        assert_eq!(
            doc.line(2),
            Line {
                from: 9,
                to: 13,
                number: 2,
                text: "body".into()
            }
        );
        assert_eq!(doc.line(3).text, "last");
    }

    #[test]
    fn test_line_number_is_clamped() {
        let doc = Document::new("a\nb");
        assert_eq!(doc.line(0).number, 1);
        assert_eq!(doc.line(99).number, 2);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(3, 1)]
    #[case(4, 2)]
    #[case(8, 2)]
    #[case(100, 2)]
    fn test_line_at(#[case] offset: usize, #[case] expected: usize) {
        let doc = Document::new("abc\ndefg");
        assert_eq!(doc.line_at(offset).number, expected);
    }

    #[test]
    fn test_slice_is_clamped() {
        let doc = Document::new("hello");
        assert_eq!(doc.slice(1, 3), "el");
        assert_eq!(doc.slice(3, 100), "lo");
        assert_eq!(doc.slice(4, 2), "");
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 1)]
    #[case(3, 3)]
    #[case(99, 4)]
    fn test_floor_char_boundary(#[case] offset: usize, #[case] expected: usize) {
        let doc = Document::new(">é\n");
        assert_eq!(doc.floor_char_boundary(offset), expected);
    }

    #[test]
    fn test_slice_inside_multibyte_char() {
        let doc = Document::new(">é\nx");
        assert_eq!(doc.slice(1, 2), "");
        assert_eq!(doc.slice(2, 5), "é\nx");
        assert_eq!(doc.line_at(2).number, 1);
    }

    // ============ Applying commands ============

    #[test]
    fn test_apply_reparses_and_bumps_version() {
        let mut doc = Document::new("hello");
        let patch = doc.apply(Cmd::InsertText {
            at: 0,
            text: "# ".into(),
        });

        assert_eq!(patch.version, 1);
        assert_eq!(patch.changed, vec![0..2]);
        assert_eq!(doc.text(), "# hello");
        let heading = doc.tree().first_child().expect("heading node");
        assert_eq!(heading.kind(), SyntaxKind::ATX_HEADING_1);
    }

    #[test]
    fn test_apply_reports_deletion_as_empty_range() {
        let mut doc = Document::new("one two three");
        let patch = doc.apply(Cmd::DeleteRange { range: 3..7 });
        assert_eq!(doc.text(), "one three");
        assert_eq!(patch.changed, vec![3..3]);
    }

    #[test]
    fn test_apply_reports_trailing_deletion() {
        let mut doc = Document::new("one two");
        let patch = doc.apply(Cmd::DeleteRange { range: 3..7 });
        assert_eq!(doc.text(), "one");
        assert_eq!(patch.changed, vec![3..3]);
    }

    #[test]
    fn test_no_panic_on_stale_ranges() {
        let text = "# Header\n\n- Bullet 1\n- Bullet 2\n\nSome content after bullets.";
        let mut doc = Document::new(text);

        doc.apply(Cmd::InsertText {
            text: "\n\nNew paragraph inserted here.\n\n".to_string(),
            at: 20,
        });
        doc.apply(Cmd::DeleteRange { range: 10..25 });
        doc.apply(Cmd::DeleteRange { range: 0..10_000 });

        assert_eq!(doc.version(), 3);
        assert!(doc.is_empty());
        assert_eq!(doc.lines(), 1);
    }
}
