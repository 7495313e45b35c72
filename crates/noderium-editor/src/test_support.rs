//! Builders shared by the pass tests.

use crate::decorations::{DecorationPass, DecorationSet, DecorationSpec, ViewUpdate};
use crate::editing::{Document, EditorState, Selection};
use crate::viewport::Viewport;

pub(crate) fn state_at(text: &str, cursor: usize) -> EditorState {
    EditorState::new(Document::new(text)).with_selection(Selection::cursor(cursor))
}

/// The first update a pass sees: document changed, whole document visible.
pub(crate) fn initial(state: &EditorState) -> ViewUpdate<'_> {
    ViewUpdate {
        state,
        viewport: Viewport::whole(state.doc()),
        doc_changed: true,
        viewport_changed: true,
        selection_set: false,
    }
}

/// A selection-only update over the whole document.
pub(crate) fn moved(state: &EditorState) -> ViewUpdate<'_> {
    ViewUpdate {
        state,
        viewport: Viewport::whole(state.doc()),
        doc_changed: false,
        viewport_changed: false,
        selection_set: true,
    }
}

/// `(from, to, label)` where the label is the class, or `replace` /
/// `widget:<text>` for replace decorations.
pub(crate) fn summarize(set: &DecorationSet) -> Vec<(usize, usize, String)> {
    set.iter()
        .map(|d| {
            let label = match &d.spec {
                DecorationSpec::Mark { class } | DecorationSpec::Line { class, .. } => {
                    class.to_string()
                }
                DecorationSpec::Replace { widget: None } => "replace".to_string(),
                DecorationSpec::Replace { widget: Some(w) } => format!("widget:{}", w.text),
            };
            (d.from, d.to, label)
        })
        .collect()
}

/// Run `pass` once over `text` with the cursor at `cursor`.
pub(crate) fn run<P: DecorationPass>(mut pass: P, text: &str, cursor: usize) -> Vec<(usize, usize, String)> {
    let state = state_at(text, cursor);
    pass.update(&initial(&state));
    summarize(pass.decorations())
}

pub(crate) fn owned(expected: &[(usize, usize, &str)]) -> Vec<(usize, usize, String)> {
    expected
        .iter()
        .map(|(from, to, label)| (*from, *to, label.to_string()))
        .collect()
}
