//! Enter on an empty list item ends the list.

use noderium_syntax::{SyntaxKind, Visit, element_range, walk};

use crate::editing::{Change, EditorState, Line, Selection, Transaction};
use crate::keymap::KeyBinding;
use crate::view::EditorView;

pub const LIST_KEYMAP: &[KeyBinding] = &[KeyBinding {
    key: "Enter",
    run: handle_enter_in_list,
}];

fn is_list_container(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::LIST_ITEM | SyntaxKind::BULLET_LIST | SyntaxKind::ORDERED_LIST | SyntaxKind::ROOT
    )
}

/// A line holding a list marker and nothing else but whitespace.
pub fn is_empty_list_item(state: &EditorState, line: &Line) -> bool {
    let doc = state.doc();
    let mut has_list_mark = false;
    let mut has_content = false;

    walk(doc.tree(), line.from, line.to, |element| {
        let kind = element.kind();
        if kind == SyntaxKind::LIST_MARK {
            has_list_mark = true;
            return Visit::Continue;
        }
        if is_list_container(kind) {
            return Visit::Continue;
        }

        let range = element_range(element);
        let within_line = range.start >= line.from && range.end <= line.to;
        if within_line && !doc.slice(range.start, range.end).trim().is_empty() {
            has_content = true;
        }
        Visit::Continue
    });

    has_list_mark && !has_content
}

pub(crate) fn leading_whitespace(text: &str) -> &str {
    &text[..text.len() - text.trim_start().len()]
}

/// Replace an empty list item with its indentation, ending the list.
pub fn handle_enter_in_list(view: &mut EditorView) -> bool {
    let state = view.state();
    let line = state.cursor_line();
    if !is_empty_list_item(state, &line) {
        return false;
    }

    let indent = leading_whitespace(&line.text).to_string();
    let cursor = line.from + indent.len();
    view.dispatch(
        Transaction::change(Change::new(line.from, line.to, indent)).with_selection(Selection::cursor(cursor)),
    );
    true
}
