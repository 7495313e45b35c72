//! The view: editor state and viewport, the decoration passes fed from them,
//! and the keymaps that turn keys into transactions.

use std::thread::JoinHandle;

use crate::decorations::links::EventOutcome;
use crate::decorations::{DecorationPass, DecorationSet, DecorationSpec, LinkWidget, ViewUpdate};
use crate::editing::{EditorState, Patch, Selection, Transaction};
use crate::keymap::KeyBinding;
use crate::opener::LinkOpener;
use crate::viewport::Viewport;

/// Result of [`EditorView::click`].
#[derive(Debug)]
pub enum ClickOutcome {
    /// A link widget took the click. `handle` is the detached open.
    Widget {
        widget: LinkWidget,
        outcome: EventOutcome,
        handle: JoinHandle<()>,
    },
    /// The cursor moved to this offset.
    Cursor(usize),
}

pub struct EditorView {
    state: EditorState,
    viewport: Viewport,
    passes: Vec<Box<dyn DecorationPass>>,
    keymaps: Vec<&'static [KeyBinding]>,
    opener: LinkOpener,
}

impl EditorView {
    /// A view over the whole document. Every pass gets an initial update.
    pub fn new(
        state: EditorState,
        passes: Vec<Box<dyn DecorationPass>>,
        keymaps: Vec<&'static [KeyBinding]>,
    ) -> Self {
        let viewport = Viewport::whole(state.doc());
        let mut view = Self {
            state,
            viewport,
            passes,
            keymaps,
            opener: LinkOpener::default(),
        };
        view.notify(true, true, false);
        view
    }

    pub fn with_opener(mut self, opener: LinkOpener) -> Self {
        self.opener = opener;
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.state.set_read_only(read_only);
    }

    /// Apply `tx` and update every pass. Returns the patch when the document
    /// changed.
    ///
    /// A viewport spanning the whole document keeps doing so as it grows or
    /// shrinks; any other viewport is clamped.
    pub fn dispatch(&mut self, tx: Transaction) -> Option<Patch> {
        let follows_doc = self.viewport == Viewport::whole(self.state.doc());
        let selection_set = tx.selection.is_some();

        let patch = self.state.apply(tx);

        let len = self.state.doc().len();
        let viewport = if follows_doc {
            Viewport::new(0, len)
        } else {
            self.viewport.clamp(len)
        };
        let viewport_changed = viewport != self.viewport;
        self.viewport = viewport;

        self.notify(patch.is_some(), viewport_changed, selection_set);
        patch
    }

    /// Scroll to `viewport`. Returns false, without updating the passes, if
    /// the clamped viewport is the current one.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        let viewport = viewport.clamp(self.state.doc().len());
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.notify(false, true, false);
        true
    }

    /// Run the keymaps in order until a command handles `key`.
    pub fn handle_key(&mut self, key: &str) -> bool {
        let keymaps = self.keymaps.clone();
        for binding in keymaps.iter().flat_map(|keymap| keymap.iter()) {
            if binding.key == key && (binding.run)(self) {
                log::debug!("key {key} handled");
                return true;
            }
        }
        false
    }

    /// The link widget drawn over `pos`, if any.
    pub fn widget_at(&self, pos: usize) -> Option<&LinkWidget> {
        self.passes
            .iter()
            .flat_map(|pass| pass.decorations().iter())
            .find_map(|decoration| match &decoration.spec {
                DecorationSpec::Replace { widget: Some(widget) }
                    if decoration.from <= pos && pos < decoration.to =>
                {
                    Some(widget)
                }
                _ => None,
            })
    }

    /// Send a mousedown to the widget at `pos`, or put the cursor there.
    pub fn click(&mut self, pos: usize) -> ClickOutcome {
        if let Some(widget) = self.widget_at(pos).cloned() {
            let (outcome, handle) = widget.mousedown(&self.opener);
            return ClickOutcome::Widget {
                widget,
                outcome,
                handle,
            };
        }

        let pos = self.state.doc().floor_char_boundary(pos);
        self.dispatch(Transaction::select(Selection::cursor(pos)));
        ClickOutcome::Cursor(pos)
    }

    /// Each pass's current set, in pass order.
    pub fn decorations(&self) -> impl Iterator<Item = (&'static str, &DecorationSet)> {
        self.passes
            .iter()
            .map(|pass| (pass.name(), pass.decorations()))
    }

    pub fn pass_decorations(&self, name: &str) -> Option<&DecorationSet> {
        self.decorations()
            .find(|(pass, _)| *pass == name)
            .map(|(_, set)| set)
    }

    fn notify(&mut self, doc_changed: bool, viewport_changed: bool, selection_set: bool) {
        let update = ViewUpdate {
            state: &self.state,
            viewport: self.viewport,
            doc_changed,
            viewport_changed,
            selection_set,
        };
        for pass in &mut self.passes {
            pass.update(&update);
        }
    }
}

impl std::fmt::Debug for EditorView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorView")
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .field(
                "passes",
                &self.passes.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("keymaps", &self.keymaps)
            .finish_non_exhaustive()
    }
}
