//! Formatting shortcuts that wrap the selection in inline markup.

use crate::editing::{Change, Selection, Transaction};
use crate::keymap::KeyBinding;
use crate::view::EditorView;

pub const SHORTCUTS_KEYMAP: &[KeyBinding] = &[
    KeyBinding {
        key: "Mod-b",
        run: toggle_bold,
    },
    KeyBinding {
        key: "Mod-i",
        run: toggle_italic,
    },
    KeyBinding {
        key: "Mod-e",
        run: toggle_inline_code,
    },
];

/// Surround the selection with `prefix` and `suffix`.
///
/// An empty selection leaves the cursor between the two; otherwise the
/// wrapped text stays selected. Declines in a read-only editor.
pub fn wrap_selection(view: &mut EditorView, prefix: &str, suffix: &str) -> bool {
    let state = view.state();
    if state.is_read_only() {
        return false;
    }

    let selection = state.selection();
    let (from, to) = (selection.from(), selection.to());
    let text = state.doc().slice(from, to);
    let insert = format!("{prefix}{text}{suffix}");

    let selection = if from == to {
        Selection::cursor(from + prefix.len())
    } else {
        Selection::range(from + prefix.len(), to + prefix.len())
    };
    view.dispatch(Transaction::change(Change::new(from, to, insert)).with_selection(selection));
    true
}

pub fn toggle_bold(view: &mut EditorView) -> bool {
    wrap_selection(view, "**", "**")
}

pub fn toggle_italic(view: &mut EditorView) -> bool {
    wrap_selection(view, "*", "*")
}

pub fn toggle_inline_code(view: &mut EditorView) -> bool {
    wrap_selection(view, "`", "`")
}
