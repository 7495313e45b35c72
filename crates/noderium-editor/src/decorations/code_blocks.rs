//! Line numbers and language tags for fenced code blocks.
//!
//! Fence state at a line depends on every line above it. To avoid rescanning
//! from the top on each scroll, the pass keeps one checkpoint: the state
//! before the first line it last decorated. A later viewport at or below the
//! checkpoint resumes from it; anything above starts again from line 1.
//! Document changes drop the checkpoint.

use crate::decorations::fence::{FenceMarker, normalize_language, parse_fence_line};
use crate::decorations::gate::{ViewportState, should_recompute};
use crate::decorations::{
    DecorationPass, DecorationSet, DecorationSetBuilder, DecorationSpec, ViewUpdate, commit,
};
use crate::editing::{Document, Line};
use crate::error::DecorationError;
use crate::theme;
use crate::viewport::{VIEWPORT_MARGIN, compute_visible_range};

/// Fence tracking carried from line to line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceState {
    pub in_fence: bool,
    pub active_marker: Option<FenceMarker>,
    /// Trimmed text after the opening fence
    pub language: String,
    /// Number of the last content line emitted in the current fence
    pub code_line: usize,
}

/// The fence state holding before `start_line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub start_line: usize,
    pub state: FenceState,
}

#[derive(Debug)]
pub struct CodeBlocks {
    margin: usize,
    viewport_state: ViewportState,
    checkpoint: Option<Checkpoint>,
    last_replay_lines: usize,
    decorations: DecorationSet,
}

impl CodeBlocks {
    pub fn new(margin: usize) -> Self {
        Self {
            margin,
            viewport_state: ViewportState::default(),
            checkpoint: None,
            last_replay_lines: 0,
            decorations: DecorationSet::none(),
        }
    }

    /// Lines replayed without decorating during the last recompute.
    pub fn last_replay_lines(&self) -> usize {
        self.last_replay_lines
    }

    pub fn checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoint.as_ref()
    }

    fn build(&mut self, doc: &Document, update: &ViewUpdate<'_>) -> Result<DecorationSet, DecorationError> {
        let visible = compute_visible_range(doc, update.viewport, self.margin);
        let from_line = doc.line_at(visible.from).number;
        let to_line = doc.line_at(visible.to).number;

        let initial = self.state_before_line(doc, from_line)?;
        let mut state = initial.clone();
        let mut builder = DecorationSetBuilder::new();
        for number in from_line..=to_line {
            state = process_line(&doc.line(number), state, Some(&mut builder))?;
        }

        self.checkpoint = Some(Checkpoint {
            start_line: from_line,
            state: initial,
        });
        Ok(builder.finish())
    }

    /// Rebuild the fence state holding before `target`.
    fn state_before_line(&mut self, doc: &Document, target: usize) -> Result<FenceState, DecorationError> {
        let (mut state, start_line) = match &self.checkpoint {
            Some(checkpoint) if checkpoint.start_line <= target => {
                (checkpoint.state.clone(), checkpoint.start_line)
            }
            _ => (FenceState::default(), 1),
        };

        for number in start_line..target {
            state = process_line(&doc.line(number), state, None)?;
        }

        self.last_replay_lines = target - start_line;
        log::trace!(
            "code-blocks: replayed {} lines from line {start_line}",
            self.last_replay_lines
        );
        Ok(state)
    }
}

impl Default for CodeBlocks {
    fn default() -> Self {
        Self::new(VIEWPORT_MARGIN)
    }
}

/// Advance `state` over one line, decorating it when a builder is given.
pub fn process_line(
    line: &Line,
    state: FenceState,
    builder: Option<&mut DecorationSetBuilder>,
) -> Result<FenceState, DecorationError> {
    if let Some(fence) = parse_fence_line(&line.text) {
        if let Some(builder) = builder {
            builder.add(line.from, line.from, DecorationSpec::line(theme::CODEBLOCK_FENCE))?;
            builder.add(line.from, line.to, DecorationSpec::mark(theme::CODEBLOCK_FENCE_TEXT))?;
        }

        if !state.in_fence {
            return Ok(FenceState {
                in_fence: true,
                active_marker: Some(fence.marker),
                language: fence.language.trim().to_string(),
                code_line: 0,
            });
        }
        if state.active_marker == Some(fence.marker) {
            return Ok(FenceState::default());
        }
        return Ok(state);
    }

    if !state.in_fence {
        return Ok(state);
    }

    let code_line = state.code_line + 1;
    if let Some(builder) = builder {
        let language = normalize_language(&state.language);
        builder.add(
            line.from,
            line.from,
            DecorationSpec::line_with(
                theme::codeblock_line_class(&language),
                vec![
                    (theme::DATA_CODE_LINE, code_line.to_string()),
                    (theme::DATA_CODE_LANG, language),
                ],
            ),
        )?;
    }

    Ok(FenceState { code_line, ..state })
}

impl DecorationPass for CodeBlocks {
    fn name(&self) -> &'static str {
        "code-blocks"
    }

    fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    fn update(&mut self, update: &ViewUpdate<'_>) {
        if update.doc_changed {
            self.checkpoint = None;
        }
        // The cursor line plays no part here
        let prev = self.viewport_state;
        if !should_recompute(update, &prev, prev.line) {
            return;
        }
        self.viewport_state = ViewportState {
            line: prev.line,
            from: update.viewport.from,
            to: update.viewport.to,
        };

        let doc = update.state.doc();
        let built = self.build(doc, update);
        commit(self.name(), built, &mut self.decorations);
    }
}
