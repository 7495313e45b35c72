use crate::editing::{Change, Cmd, Document, Line, Patch, Selection};

/// Document plus selection, the state every decoration pass reads.
#[derive(Debug, Clone)]
pub struct EditorState {
    doc: Document,
    selection: Selection,
    read_only: bool,
}

impl EditorState {
    /// State with the cursor at the start of `doc`.
    pub fn new(doc: Document) -> Self {
        Self {
            doc,
            selection: Selection::cursor(0),
            read_only: false,
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection.clamp(self.doc.len());
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// The line holding the cursor (the selection head).
    pub fn cursor_line(&self) -> Line {
        self.doc.line_at(self.selection.head)
    }

    /// Apply `tx`, returning the patch when the document changed.
    ///
    /// Without an explicit selection the current one is mapped through the
    /// change. The resulting selection is clamped to the new document.
    pub(crate) fn apply(&mut self, tx: Transaction) -> Option<Patch> {
        let patch = tx.change.map(|change| {
            let from = change.from.min(self.doc.len());
            let to = change.to.clamp(from, self.doc.len());
            let change = Change::new(from, to, change.insert);

            let patch = self.doc.apply(Cmd::replace(from..to, change.insert.clone()));
            if tx.selection.is_none() {
                self.selection = self.selection.map(&change);
            }
            patch
        });

        if let Some(selection) = tx.selection {
            self.selection = selection;
        }
        self.selection = self.selection.clamp(self.doc.len());
        patch
    }
}

/// A document change and/or a new selection, applied atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub change: Option<Change>,
    pub selection: Option<Selection>,
}

impl Transaction {
    pub fn change(change: Change) -> Self {
        Self {
            change: Some(change),
            selection: None,
        }
    }

    pub fn select(selection: Selection) -> Self {
        Self {
            change: None,
            selection: Some(selection),
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn changes_doc(&self) -> bool {
        self.change.is_some()
    }
}
