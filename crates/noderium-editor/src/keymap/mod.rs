//! Key bindings run by [`EditorView::handle_key`](crate::view::EditorView::handle_key).
//!
//! Keys are named the way hosts report them: `Enter`, `Mod-b` (Ctrl or Cmd
//! plus `b`). Keymaps are consulted in order and the first binding whose
//! command returns `true` consumes the key.

pub mod list;
pub mod newline;
pub mod shortcuts;

use crate::view::EditorView;

/// An editor command. Returns whether it handled the key.
pub type Command = fn(&mut EditorView) -> bool;

#[derive(Clone, Copy)]
pub struct KeyBinding {
    pub key: &'static str,
    pub run: Command,
}

impl std::fmt::Debug for KeyBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyBinding").field("key", &self.key).finish()
    }
}

pub use list::{LIST_KEYMAP, handle_enter_in_list, is_empty_list_item};
pub use newline::{DEFAULT_KEYMAP, insert_newline_continue_markup};
pub use shortcuts::{
    SHORTCUTS_KEYMAP, toggle_bold, toggle_inline_code, toggle_italic, wrap_selection,
};
