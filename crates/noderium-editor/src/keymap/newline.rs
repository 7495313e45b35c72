//! Enter that carries list and quote markup onto the new line.

use noderium_syntax::{SyntaxKind, Visit, element_range, walk};

use crate::editing::{Change, EditorState, Line, Selection, Transaction};
use crate::keymap::KeyBinding;
use crate::keymap::list::leading_whitespace;
use crate::view::EditorView;

pub const DEFAULT_KEYMAP: &[KeyBinding] = &[KeyBinding {
    key: "Enter",
    run: insert_newline_continue_markup,
}];

/// Next marker in the same list: ordinals count up, bullets repeat.
fn next_list_mark(mark: &str) -> String {
    let Some(delimiter) = mark.chars().last().filter(|c| matches!(c, '.' | ')')) else {
        return mark.to_string();
    };
    match mark[..mark.len() - 1].parse::<u64>() {
        Ok(n) => format!("{}{delimiter}", n + 1),
        Err(_) => mark.to_string(),
    }
}

/// The prefix to open the next line with, and where the line's own markup
/// ends. `None` when the line carries no markup worth continuing.
fn continuation(state: &EditorState, line: &Line) -> Option<(String, usize)> {
    let doc = state.doc();
    let mut marks = Vec::new();

    walk(doc.tree(), line.from, line.to, |element| {
        let kind = element.kind();
        if matches!(
            kind,
            SyntaxKind::QUOTE_MARK | SyntaxKind::LIST_MARK | SyntaxKind::TASK_MARKER
        ) {
            let range = element_range(element);
            if range.start >= line.from && range.end <= line.to {
                marks.push((kind, range));
            }
        }
        Visit::Continue
    });

    let markup_end = marks.last()?.1.end;
    let rest = &line.text[markup_end - line.from..];
    if rest.trim().is_empty() {
        return None;
    }

    let mut prefix = String::new();
    let mut at = line.from;
    for (kind, range) in &marks {
        prefix.push_str(&doc.slice(at, range.start));
        let mark = doc.slice(range.start, range.end);
        match kind {
            SyntaxKind::LIST_MARK => prefix.push_str(&next_list_mark(&mark)),
            SyntaxKind::TASK_MARKER => prefix.push_str("[ ]"),
            _ => prefix.push_str(&mark),
        }
        at = range.end;
    }
    prefix.push_str(leading_whitespace(rest));

    Some((prefix, markup_end))
}

/// Replace the selection with a newline, repeating the current line's list
/// or quote markers when the cursor sits past them.
pub fn insert_newline_continue_markup(view: &mut EditorView) -> bool {
    let state = view.state();
    if state.is_read_only() {
        return false;
    }

    let selection = state.selection();
    let (from, to) = (selection.from(), selection.to());
    let line = state.doc().line_at(from);

    let mut insert = String::from("\n");
    if let Some((prefix, markup_end)) = continuation(state, &line) {
        if from >= markup_end {
            insert.push_str(&prefix);
        }
    }

    let cursor = from + insert.len();
    view.dispatch(Transaction::change(Change::new(from, to, insert)).with_selection(Selection::cursor(cursor)));
    true
}
