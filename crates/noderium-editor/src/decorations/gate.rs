//! Change detection shared by the passes.

use crate::decorations::ViewUpdate;

/// What a pass last computed for. `line` is `None` until the first compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportState {
    pub line: Option<usize>,
    pub from: usize,
    pub to: usize,
}

/// Whether a pass must rebuild its decorations for `update`.
pub fn should_recompute(
    update: &ViewUpdate<'_>,
    prev: &ViewportState,
    current_line: Option<usize>,
) -> bool {
    update.doc_changed
        || prev.line != current_line
        || update.viewport.from != prev.from
        || update.viewport.to != prev.to
}

/// The state to store after recomputing, or `None` to keep the previous
/// decorations.
///
/// With `track_line` off the cursor line is ignored, so only document and
/// viewport changes trigger a recompute.
pub fn next_viewport_state(
    update: &ViewUpdate<'_>,
    prev: &ViewportState,
    line: usize,
    track_line: bool,
) -> Option<ViewportState> {
    let effective = if track_line { Some(line) } else { prev.line };
    if !should_recompute(update, prev, effective) {
        return None;
    }

    Some(ViewportState {
        line: if track_line { Some(line) } else { prev.line },
        from: update.viewport.from,
        to: update.viewport.to,
    })
}
