//! Heading, emphasis and inline-code classes by node kind.

use std::ops::Range;

use noderium_syntax::{SyntaxElement, SyntaxKind, Visit, element_range, walk};

use crate::decorations::gate::{ViewportState, next_viewport_state};
use crate::decorations::{
    DecorationPass, DecorationSet, DecorationSetBuilder, DecorationSpec, ViewUpdate, commit,
};
use crate::editing::Document;
use crate::error::DecorationError;
use crate::theme;
use crate::viewport::{VIEWPORT_MARGIN, compute_visible_range};

/// A direct child of an inline code node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeMarkPosition {
    pub kind: SyntaxKind,
    pub from: usize,
    pub to: usize,
}

/// The content range of an inline code node: its span minus the opening
/// and closing backtick runs. `None` when nothing lies between them.
pub fn compute_inline_code_range(
    from: usize,
    to: usize,
    children: &[CodeMarkPosition],
) -> Option<Range<usize>> {
    let mut start = from;
    let mut end = to;
    for child in children {
        if child.kind != SyntaxKind::CODE_MARK {
            continue;
        }
        if child.from == from {
            start = child.to;
        } else {
            end = child.from;
        }
    }
    (start < end).then_some(start..end)
}

#[derive(Debug)]
pub struct SemanticStyles {
    margin: usize,
    viewport_state: ViewportState,
    decorations: DecorationSet,
}

impl SemanticStyles {
    pub fn new(margin: usize) -> Self {
        Self {
            margin,
            viewport_state: ViewportState::default(),
            decorations: DecorationSet::none(),
        }
    }

    fn build(&self, update: &ViewUpdate<'_>) -> Result<DecorationSet, DecorationError> {
        let doc = update.state.doc();
        let visible = compute_visible_range(doc, update.viewport, self.margin);
        let mut builder = DecorationSetBuilder::new();
        let mut result = Ok(());

        walk(doc.tree(), visible.from, visible.to, |element| {
            match decorate(&mut builder, doc, element) {
                Ok(visit) => visit,
                Err(err) => {
                    result = Err(err);
                    Visit::Stop
                }
            }
        });

        result.map(|()| builder.finish())
    }
}

fn decorate(
    builder: &mut DecorationSetBuilder,
    doc: &Document,
    element: &SyntaxElement,
) -> Result<Visit, DecorationError> {
    let kind = element.kind();
    let range = element_range(element);

    if kind == SyntaxKind::FENCED_CODE {
        return Ok(Visit::SkipChildren);
    }

    if let Some(level) = kind.heading_level() {
        let line_start = doc.line_at(range.start).from;
        builder.add(line_start, line_start, DecorationSpec::line(theme::heading_class(level)))?;
        return Ok(Visit::Continue);
    }

    match kind {
        SyntaxKind::STRONG_EMPHASIS => {
            builder.add(range.start, range.end, DecorationSpec::mark(theme::STRONG))?;
        }
        SyntaxKind::EMPHASIS => {
            builder.add(range.start, range.end, DecorationSpec::mark(theme::EMPHASIS))?;
        }
        SyntaxKind::INLINE_CODE => {
            let children: Vec<CodeMarkPosition> = element
                .as_node()
                .into_iter()
                .flat_map(|node| node.children_with_tokens())
                .map(|child| {
                    let child_range = element_range(&child);
                    CodeMarkPosition {
                        kind: child.kind(),
                        from: child_range.start,
                        to: child_range.end,
                    }
                })
                .collect();
            if let Some(content) = compute_inline_code_range(range.start, range.end, &children) {
                builder.add(content.start, content.end, DecorationSpec::mark(theme::INLINE_CODE))?;
            }
            return Ok(Visit::SkipChildren);
        }
        _ => {}
    }
    Ok(Visit::Continue)
}

impl Default for SemanticStyles {
    fn default() -> Self {
        Self::new(VIEWPORT_MARGIN)
    }
}

impl DecorationPass for SemanticStyles {
    fn name(&self) -> &'static str {
        "semantic-styles"
    }

    fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    fn update(&mut self, update: &ViewUpdate<'_>) {
        let line = update.state.cursor_line().number;
        let Some(next) = next_viewport_state(update, &self.viewport_state, line, false) else {
            return;
        };
        self.viewport_state = next;

        let built = self.build(update);
        commit(self.name(), built, &mut self.decorations);
    }
}
