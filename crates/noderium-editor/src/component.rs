//! Mounting an editor: the pass and keymap set a host gets, plus the value
//! contract between the host and the document.

use serde::{Deserialize, Serialize};

use crate::decorations::{
    CodeBlocks, ConcealMarkers, DecorationPass, HideMarkers, LinkDecorations, MarkerReveal,
    SemanticStyles,
};
use crate::editing::{Change, Document, EditorState, Patch, Selection, Transaction};
use crate::keymap::{DEFAULT_KEYMAP, LIST_KEYMAP, SHORTCUTS_KEYMAP};
use crate::opener::LinkOpener;
use crate::view::{ClickOutcome, EditorView};
use crate::viewport::{VIEWPORT_MARGIN, Viewport};

pub const DEFAULT_CONTENT: &str = "# Welcome to Noderium";

/// Which pass hides syntax away from the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HideMode {
    /// [`HideMarkers`]: tag markers with classes
    #[default]
    Classes,
    /// [`ConcealMarkers`]: replace markers outright
    Conceal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    pub viewport_margin: usize,
    pub marker_reveal: MarkerReveal,
    pub hide_mode: HideMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport_margin: VIEWPORT_MARGIN,
            marker_reveal: MarkerReveal::default(),
            hide_mode: HideMode::default(),
        }
    }
}

pub type ChangeCallback = Box<dyn FnMut(&str)>;
pub type ReadyCallback = Box<dyn FnOnce(&EditorView)>;

#[derive(Default)]
pub struct EditorOptions {
    /// Host-controlled value. Wins over `initial_content`.
    pub value: Option<String>,
    pub initial_content: Option<String>,
    pub config: EditorConfig,
    pub on_change: Option<ChangeCallback>,
    pub on_ready: Option<ReadyCallback>,
    pub opener: Option<LinkOpener>,
}

fn passes(config: &EditorConfig) -> Vec<Box<dyn DecorationPass>> {
    let margin = config.viewport_margin;
    let hiding: Box<dyn DecorationPass> = match config.hide_mode {
        HideMode::Classes => Box::new(HideMarkers::new(config.marker_reveal, margin)),
        HideMode::Conceal => Box::new(ConcealMarkers::new()),
    };
    vec![
        Box::new(CodeBlocks::new(margin)),
        Box::new(SemanticStyles::new(margin)),
        Box::new(LinkDecorations::new(margin)),
        hiding,
    ]
}

/// A mounted editor. Reports user edits through `on_change`.
pub struct MarkdownEditor {
    view: EditorView,
    on_change: Option<ChangeCallback>,
    last_version: u64,
    last_text: String,
}

impl MarkdownEditor {
    pub fn mount(options: EditorOptions) -> Self {
        let EditorOptions {
            value,
            initial_content,
            config,
            on_change,
            on_ready,
            opener,
        } = options;

        let content = value
            .or(initial_content)
            .unwrap_or_else(|| DEFAULT_CONTENT.to_string());
        let state = EditorState::new(Document::new(&content));
        let mut view = EditorView::new(
            state,
            passes(&config),
            vec![LIST_KEYMAP, SHORTCUTS_KEYMAP, DEFAULT_KEYMAP],
        );
        if let Some(opener) = opener {
            view = view.with_opener(opener);
        }
        log::debug!(
            "mounted editor: {} bytes, {:?} hiding",
            content.len(),
            config.hide_mode
        );

        if let Some(on_ready) = on_ready {
            on_ready(&view);
        }

        Self {
            last_version: view.state().doc().version(),
            view,
            on_change,
            last_text: content,
        }
    }

    pub fn view(&self) -> &EditorView {
        &self.view
    }

    pub fn value(&self) -> String {
        self.view.state().doc().text()
    }

    /// Replace the whole document with a host value, keeping the cursor
    /// where it was as far as the new text allows. Does not call `on_change`.
    pub fn set_value(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            return;
        };
        let doc = self.view.state().doc();
        if doc.text() == value {
            return;
        }

        let mut head = self.view.state().selection().head.min(value.len());
        while !value.is_char_boundary(head) {
            head -= 1;
        }
        let change = Change::new(0, doc.len(), value);
        self.view
            .dispatch(Transaction::change(change).with_selection(Selection::cursor(head)));
        self.last_version = self.view.state().doc().version();
        self.last_text = value.to_string();
    }

    pub fn dispatch(&mut self, tx: Transaction) -> Option<Patch> {
        let patch = self.view.dispatch(tx);
        self.emit_change();
        patch
    }

    pub fn handle_key(&mut self, key: &str) -> bool {
        let handled = self.view.handle_key(key);
        self.emit_change();
        handled
    }

    pub fn click(&mut self, pos: usize) -> ClickOutcome {
        let outcome = self.view.click(pos);
        self.emit_change();
        outcome
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        self.view.set_viewport(viewport)
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.view.set_read_only(read_only);
    }

    pub fn destroy(self) {}

    fn emit_change(&mut self) {
        let version = self.view.state().doc().version();
        if version == self.last_version {
            return;
        }
        self.last_version = version;

        let text = self.view.state().doc().text();
        if text == self.last_text {
            return;
        }
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&text);
        }
        self.last_text = text;
    }
}

impl Drop for MarkdownEditor {
    fn drop(&mut self) {
        log::debug!(
            "destroying editor at version {}",
            self.view.state().doc().version()
        );
    }
}

impl std::fmt::Debug for MarkdownEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownEditor")
            .field("view", &self.view)
            .field("last_version", &self.last_version)
            .finish_non_exhaustive()
    }
}
