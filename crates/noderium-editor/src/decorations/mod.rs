//! # Decoration passes
//!
//! Each pass turns the syntax tree and the current view into an immutable
//! [`DecorationSet`]: spans to hide, restyle or replace with a widget. Passes
//! only look at the visible range (the viewport plus a margin) and keep their
//! previous set, by identity, when nothing they depend on has changed.
//!
//! | Pass | Recomputes on |
//! |---|---|
//! | [`HideMarkers`] | document, cursor line, viewport |
//! | [`CodeBlocks`] | document, viewport |
//! | [`SemanticStyles`] | document, viewport |
//! | [`LinkDecorations`] | document, cursor line, viewport |
//! | [`ConcealMarkers`] | document, selection, viewport |

pub mod code_blocks;
pub mod conceal;
pub mod fence;
pub mod gate;
pub mod hide_markers;
pub mod links;
pub mod semantic;

use std::borrow::Cow;
use std::sync::Arc;

use crate::editing::EditorState;
use crate::error::DecorationError;
use crate::viewport::Viewport;

pub use code_blocks::CodeBlocks;
pub use conceal::ConcealMarkers;
pub use gate::{ViewportState, next_viewport_state, should_recompute};
pub use hide_markers::{HideMarkers, MarkerReveal};
pub use links::{LinkDecorations, LinkWidget};
pub use semantic::SemanticStyles;

/// What a decoration does to its range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecorationSpec {
    /// Attach a class to the covered text
    Mark { class: Cow<'static, str> },
    /// Attach a class and attributes to the whole line starting at `from`
    Line {
        class: Cow<'static, str>,
        attributes: Vec<(&'static str, String)>,
    },
    /// Hide the covered text, optionally drawing a widget in its place
    Replace { widget: Option<LinkWidget> },
}

impl DecorationSpec {
    pub fn mark(class: impl Into<Cow<'static, str>>) -> Self {
        Self::Mark {
            class: class.into(),
        }
    }

    pub fn line(class: impl Into<Cow<'static, str>>) -> Self {
        Self::Line {
            class: class.into(),
            attributes: Vec::new(),
        }
    }

    pub fn line_with(
        class: impl Into<Cow<'static, str>>,
        attributes: Vec<(&'static str, String)>,
    ) -> Self {
        Self::Line {
            class: class.into(),
            attributes,
        }
    }

    pub fn replace(widget: Option<LinkWidget>) -> Self {
        Self::Replace { widget }
    }

    /// The class of a mark or line decoration.
    pub fn class(&self) -> Option<&str> {
        match self {
            Self::Mark { class } | Self::Line { class, .. } => Some(&**class),
            Self::Replace { .. } => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::Line { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    pub fn widget(&self) -> Option<&LinkWidget> {
        match self {
            Self::Replace { widget } => widget.as_ref(),
            _ => None,
        }
    }
}

/// A decoration over `from..to`. Line decorations have `from == to` at the
/// line start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub from: usize,
    pub to: usize,
    pub spec: DecorationSpec,
}

impl Decoration {
    pub fn class(&self) -> Option<&str> {
        self.spec.class()
    }
}

/// Immutable, ordered decorations produced by one pass.
///
/// Cloning shares the storage, and [`DecorationSet::ptr_eq`] tells whether
/// two sets are the same computation.
#[derive(Debug, Clone)]
pub struct DecorationSet(Arc<[Decoration]>);

impl DecorationSet {
    pub fn none() -> Self {
        Self(Arc::from(Vec::new()))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Decoration] {
        &self.0
    }
}

impl Default for DecorationSet {
    fn default() -> Self {
        Self::none()
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects decorations in non-decreasing start order.
#[derive(Debug, Default)]
pub struct DecorationSetBuilder {
    decorations: Vec<Decoration>,
}

impl DecorationSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, from: usize, to: usize, spec: DecorationSpec) -> Result<(), DecorationError> {
        if from > to {
            return Err(DecorationError::InvertedRange { from, to });
        }
        if let Some(last) = self.decorations.last() {
            if from < last.from {
                return Err(DecorationError::OutOfOrder {
                    from,
                    last_from: last.from,
                });
            }
        }
        self.decorations.push(Decoration { from, to, spec });
        Ok(())
    }

    pub fn finish(self) -> DecorationSet {
        DecorationSet(Arc::from(self.decorations))
    }
}

/// What changed since the previous update, plus the state after the change.
#[derive(Debug, Clone, Copy)]
pub struct ViewUpdate<'a> {
    pub state: &'a EditorState,
    /// Raw viewport supplied by the host
    pub viewport: Viewport,
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub selection_set: bool,
}

/// A decoration pass hosted by [`EditorView`](crate::view::EditorView).
pub trait DecorationPass {
    fn name(&self) -> &'static str;

    /// The current set. Unchanged by identity when an update was skipped.
    fn decorations(&self) -> &DecorationSet;

    fn update(&mut self, update: &ViewUpdate<'_>);
}

/// Replace `current` with a freshly built set, or log and keep it when the
/// build failed.
pub(crate) fn commit(
    pass: &str,
    built: Result<DecorationSet, DecorationError>,
    current: &mut DecorationSet,
) {
    match built {
        Ok(set) => {
            log::debug!("{pass}: recomputed {} decorations", set.len());
            *current = set;
        }
        Err(err) => log::error!("{pass}: {err}; keeping previous decorations"),
    }
}
