//! Older hiding mode: replaces syntax outright instead of tagging it.
//!
//! Covers more marker kinds than [`HideMarkers`](super::HideMarkers),
//! including list and task markers, link punctuation and `[[wiki]]`
//! brackets. Works on the raw viewport and rebuilds on any selection change.

use std::ops::Range;
use std::sync::OnceLock;

use noderium_syntax::{SyntaxKind, Visit, element_range, walk};
use regex::Regex;

use crate::decorations::{
    DecorationPass, DecorationSet, DecorationSetBuilder, DecorationSpec, ViewUpdate, commit,
};
use crate::error::DecorationError;

/// Spaces a concealed marker may swallow after it, by kind.
fn trailing_spaces(kind: SyntaxKind) -> Option<usize> {
    match kind {
        SyntaxKind::HEADER_MARK
        | SyntaxKind::LIST_MARK
        | SyntaxKind::TASK_MARKER
        | SyntaxKind::QUOTE_MARK => Some(1),
        SyntaxKind::EMPHASIS_MARK
        | SyntaxKind::STRIKETHROUGH_MARK
        | SyntaxKind::LINK_MARK
        | SyntaxKind::URL
        | SyntaxKind::CODE_MARK => Some(0),
        _ => None,
    }
}

/// Sort, then merge ranges that overlap or touch. Empty ranges are dropped.
pub fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged.retain(|r| r.start < r.end);
    merged
}

#[derive(Debug, Default)]
pub struct ConcealMarkers {
    decorations: DecorationSet,
}

impl ConcealMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    fn build(&self, update: &ViewUpdate<'_>) -> Result<DecorationSet, DecorationError> {
        static BACKLINK: OnceLock<Regex> = OnceLock::new();
        let backlink =
            BACKLINK.get_or_init(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("Invalid backlink regex"));

        let doc = update.state.doc();
        let viewport = update.viewport.clamp(doc.len());
        let line = update.state.cursor_line();
        let within_line = |r: &Range<usize>| r.start >= line.from && r.end <= line.to;

        let mut hidden: Vec<Range<usize>> = Vec::new();
        let mut backlinks: Vec<Range<usize>> = Vec::new();

        let from = doc.floor_char_boundary(viewport.from);
        let to = doc.floor_char_boundary(viewport.to);
        let source = doc.slice(from, to);
        for found in backlink.find_iter(&source) {
            let range = from + found.start()..from + found.end();
            backlinks.push(range.clone());
            if within_line(&range) {
                continue;
            }
            hidden.push(range.start..range.start + 2);
            hidden.push(range.end - 2..range.end);
        }

        let mut next_backlink = 0;
        walk(doc.tree(), from, to, |element| {
            let kind = element.kind();
            let Some(spaces) = trailing_spaces(kind) else {
                return Visit::Continue;
            };
            let range = element_range(element);
            if within_line(&range) {
                return Visit::Continue;
            }

            while backlinks
                .get(next_backlink)
                .is_some_and(|b| b.end <= range.start)
            {
                next_backlink += 1;
            }
            let in_backlink = backlinks
                .get(next_backlink)
                .is_some_and(|b| range.start >= b.start && range.end <= b.end);
            if in_backlink && matches!(kind, SyntaxKind::LINK_MARK | SyntaxKind::URL) {
                return Visit::Continue;
            }

            let end = if spaces > 0 && doc.slice(range.end, range.end + spaces) == " ".repeat(spaces) {
                range.end + spaces
            } else {
                range.end
            };
            hidden.push(range.start..end);
            Visit::Continue
        });

        let mut builder = DecorationSetBuilder::new();
        for range in merge_ranges(hidden) {
            builder.add(range.start, range.end, DecorationSpec::replace(None))?;
        }
        Ok(builder.finish())
    }
}

impl DecorationPass for ConcealMarkers {
    fn name(&self) -> &'static str {
        "conceal-markers"
    }

    fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    fn update(&mut self, update: &ViewUpdate<'_>) {
        if !(update.doc_changed || update.selection_set || update.viewport_changed) {
            return;
        }
        let built = self.build(update);
        commit(self.name(), built, &mut self.decorations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{initial, moved, owned, run, state_at, summarize};
    use crate::viewport::Viewport;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::disjoint(vec![5..6, 0..2], vec![0..2, 5..6])]
    #[case::touching(vec![0..2, 2..4], vec![0..4])]
    #[case::overlapping(vec![0..3, 1..2, 2..6], vec![0..6])]
    #[case::empty_dropped(vec![3..3, 5..7], vec![5..7])]
    fn test_merge_ranges(#[case] input: Vec<Range<usize>>, #[case] expected: Vec<Range<usize>>) {
        assert_eq!(merge_ranges(input), expected);
    }

    #[rstest]
    #[case::heading_and_task("# Title\n- [ ] task\nx", 19, &[(0, 2, "replace"), (8, 14, "replace")])]
    #[case::link_punctuation("[a](u)\nx", 7, &[(0, 1, "replace"), (2, 6, "replace")])]
    #[case::backlink("see [[Page]] now\nx", 17, &[(4, 6, "replace"), (10, 12, "replace")])]
    #[case::backlink_on_cursor_line("see [[Page]] now\nx", 1, &[])]
    #[case::emphasis_on_cursor_line("**b**", 0, &[])]
    #[case::no_space_to_absorb("#\nx", 2, &[(0, 1, "replace")])]
    #[case::quote_before_multibyte(">é\n\nx", 5, &[(0, 1, "replace")])]
    fn test_conceal(
        #[case] text: &str,
        #[case] cursor: usize,
        #[case] expected: &[(usize, usize, &str)],
    ) {
        assert_eq!(run(ConcealMarkers::new(), text, cursor), owned(expected));
    }

    #[test]
    fn test_viewport_edge_inside_multibyte_char() {
        let state = state_at("é [[P]] x\n\nz", 13);
        let mut pass = ConcealMarkers::new();
        pass.update(&ViewUpdate {
            viewport: Viewport::new(1, state.doc().len()),
            ..initial(&state)
        });
        assert_eq!(
            summarize(pass.decorations()),
            owned(&[(3, 5, "replace"), (6, 8, "replace")])
        );
    }

    #[test]
    fn test_rebuilds_on_every_selection_change() {
        let state = state_at("**b**\n\nx", 8);
        let mut pass = ConcealMarkers::new();
        pass.update(&initial(&state));
        let before = pass.decorations().clone();
        pass.update(&moved(&state));
        assert!(!pass.decorations().ptr_eq(&before));
        assert_eq!(pass.decorations().len(), 2);
    }
}
