//! Visible-range expansion.

use crate::editing::Document;

/// Lines added above and below the viewport before decorating.
pub const VIEWPORT_MARGIN: usize = 2;

/// A byte range of the document that the host is rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub from: usize,
    pub to: usize,
}

impl Viewport {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// The whole of `doc`.
    pub fn whole(doc: &Document) -> Self {
        Self::new(0, doc.len())
    }

    /// Clamp both ends to `len`, keeping `from <= to`.
    pub fn clamp(self, len: usize) -> Self {
        let from = self.from.min(len);
        Self::new(from, self.to.clamp(from, len))
    }

    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.from && pos <= self.to
    }
}

/// Expand `viewport` by `margin` whole lines on each side, clamped to the
/// document.
pub fn compute_visible_range(doc: &Document, viewport: Viewport, margin: usize) -> Viewport {
    let from_line = doc
        .line_at(viewport.from)
        .number
        .saturating_sub(margin)
        .max(1);
    let to_line = (doc.line_at(viewport.to).number + margin).min(doc.lines());

    Viewport::new(doc.line(from_line).from, doc.line(to_line).to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn doc_of_lines(n: usize) -> Document {
        let text: Vec<String> = (1..=n).map(|i| format!("line{i:02}")).collect();
        Document::new(&text.join("\n"))
    }

    #[rstest]
    // Each line is 6 bytes plus a newline
    #[case::middle(Viewport::new(35, 41), 2, Viewport::new(21, 55))]
    #[case::clamped_at_start(Viewport::new(0, 6), 2, Viewport::new(0, 20))]
    #[case::clamped_at_end(Viewport::new(63, 69), 2, Viewport::new(49, 69))]
    #[case::no_margin(Viewport::new(8, 9), 0, Viewport::new(7, 13))]
    fn test_compute_visible_range(
        #[case] viewport: Viewport,
        #[case] margin: usize,
        #[case] expected: Viewport,
    ) {
        let doc = doc_of_lines(10);
        assert_eq!(compute_visible_range(&doc, viewport, margin), expected);
    }

    #[test]
    fn test_compute_visible_range_on_empty_doc() {
        let doc = Document::new("");
        assert_eq!(
            compute_visible_range(&doc, Viewport::new(0, 0), VIEWPORT_MARGIN),
            Viewport::new(0, 0)
        );
    }

    #[test]
    fn test_clamp() {
        assert_eq!(Viewport::new(5, 50).clamp(10), Viewport::new(5, 10));
        assert_eq!(Viewport::new(20, 50).clamp(10), Viewport::new(10, 10));
    }
}
