//! Hide Markdown syntax everywhere except on the cursor line.

use noderium_syntax::{SyntaxKind, Visit, element_range, walk};
use serde::{Deserialize, Serialize};

use crate::decorations::fence::parse_fence_line;
use crate::decorations::gate::{ViewportState, next_viewport_state};
use crate::decorations::{
    DecorationPass, DecorationSet, DecorationSetBuilder, DecorationSpec, ViewUpdate, commit,
};
use crate::editing::{Document, Line};
use crate::error::DecorationError;
use crate::theme;
use crate::viewport::compute_visible_range;

/// How markers on the cursor line are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerReveal {
    /// Tagged with the marker class so the host can dim them
    #[default]
    Styled,
    /// Left undecorated
    Plain,
}

fn is_marker(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CODE_MARK
            | SyntaxKind::EMPHASIS_MARK
            | SyntaxKind::HEADER_MARK
            | SyntaxKind::QUOTE_MARK
    )
}

/// Markers whose hidden range swallows one following space.
fn absorbs_space(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::HEADER_MARK | SyntaxKind::QUOTE_MARK)
}

#[derive(Debug)]
pub struct HideMarkers {
    reveal: MarkerReveal,
    margin: usize,
    viewport_state: ViewportState,
    decorations: DecorationSet,
}

impl HideMarkers {
    pub fn new(reveal: MarkerReveal, margin: usize) -> Self {
        Self {
            reveal,
            margin,
            viewport_state: ViewportState::default(),
            decorations: DecorationSet::none(),
        }
    }

    fn build(&self, update: &ViewUpdate<'_>, line: &Line) -> Result<DecorationSet, DecorationError> {
        let doc = update.state.doc();
        let visible = compute_visible_range(doc, update.viewport, self.margin);
        let mut builder = DecorationSetBuilder::new();
        let mut result = Ok(());

        walk(doc.tree(), visible.from, visible.to, |element| {
            let kind = element.kind();
            if !is_marker(kind) {
                return Visit::Continue;
            }
            let range = element_range(element);
            if let Err(err) = self.decorate(&mut builder, doc, line, kind, range.start, range.end) {
                result = Err(err);
                return Visit::Stop;
            }
            Visit::Continue
        });

        result.map(|()| builder.finish())
    }

    fn decorate(
        &self,
        builder: &mut DecorationSetBuilder,
        doc: &Document,
        line: &Line,
        kind: SyntaxKind,
        from: usize,
        to: usize,
    ) -> Result<(), DecorationError> {
        let on_current_line = from >= line.from && from < line.to;

        if on_current_line {
            return match self.reveal {
                MarkerReveal::Styled => builder.add(from, to, DecorationSpec::mark(theme::MARKER)),
                MarkerReveal::Plain => Ok(()),
            };
        }

        if kind == SyntaxKind::CODE_MARK && parse_fence_line(doc.line_at(from).text.trim()).is_some() {
            return builder.add(from, to, DecorationSpec::mark(theme::HIDE_MARKDOWN_FENCE));
        }

        let end = if absorbs_space(kind) && doc.slice(to, to + 1) == " " {
            to + 1
        } else {
            to
        };
        builder.add(from, end, DecorationSpec::mark(theme::HIDE_MARKDOWN))
    }
}

impl Default for HideMarkers {
    fn default() -> Self {
        Self::new(MarkerReveal::default(), crate::viewport::VIEWPORT_MARGIN)
    }
}

impl DecorationPass for HideMarkers {
    fn name(&self) -> &'static str {
        "hide-markers"
    }

    fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    fn update(&mut self, update: &ViewUpdate<'_>) {
        let line = update.state.cursor_line();
        let Some(next) = next_viewport_state(update, &self.viewport_state, line.number, true) else {
            return;
        };
        self.viewport_state = next;

        let built = self.build(update, &line);
        commit(self.name(), built, &mut self.decorations);
    }
}
