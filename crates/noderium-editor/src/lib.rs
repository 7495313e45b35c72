pub mod component;
pub mod decorations;
pub mod editing;
pub mod error;
pub mod keymap;
pub mod opener;
pub mod theme;
pub mod view;
pub mod viewport;

#[cfg(test)]
mod test_support;

// Re-export key types for easier usage
pub use component::{DEFAULT_CONTENT, EditorConfig, EditorOptions, HideMode, MarkdownEditor};
pub use decorations::{
    Decoration, DecorationPass, DecorationSet, DecorationSpec, LinkWidget, MarkerReveal,
    ViewUpdate,
};
pub use editing::{Change, Cmd, Document, EditorState, Line, Patch, Selection, Transaction};
pub use error::{DecorationError, OpenError};
pub use opener::{LinkOpener, UrlOpener};
pub use view::{ClickOutcome, EditorView};
pub use viewport::{VIEWPORT_MARGIN, Viewport, compute_visible_range};
