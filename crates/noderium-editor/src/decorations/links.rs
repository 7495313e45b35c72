//! Inline links: a clickable widget off the cursor line, the raw syntax with
//! a highlighted URL on it.

use std::sync::OnceLock;
use std::thread::JoinHandle;

use noderium_syntax::{SyntaxKind, Visit, element_range, walk};
use regex::Regex;

use crate::decorations::gate::{ViewportState, next_viewport_state};
use crate::decorations::{
    Decoration, DecorationPass, DecorationSet, DecorationSetBuilder, DecorationSpec, ViewUpdate,
    commit,
};
use crate::editing::Document;
use crate::error::DecorationError;
use crate::opener::LinkOpener;
use crate::theme;
use crate::viewport::{VIEWPORT_MARGIN, compute_visible_range};

/// Offsets and text of an inline link, recovered from its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    pub from: usize,
    pub to: usize,
    pub text_from: usize,
    pub text_to: usize,
    pub url_from: usize,
    pub url_to: usize,
    pub text: String,
    pub url: String,
}

/// Match `[text](url)` against the whole of `from..to`.
pub fn extract_link_info(doc: &Document, from: usize, to: usize) -> Option<LinkInfo> {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = LINK_REGEX
        .get_or_init(|| Regex::new(r"^\[([^\]]*)\]\(([^)]*)\)$").expect("Invalid link regex"));

    let source = doc.slice(from, to);
    let captures = regex.captures(&source)?;
    let text = captures.get(1)?.as_str();
    let url = captures.get(2)?.as_str();

    let text_from = from + 1;
    let text_to = text_from + text.len();
    let url_from = text_to + 2;
    let url_to = url_from + url.len();

    Some(LinkInfo {
        from,
        to,
        text_from,
        text_to,
        url_from,
        url_to,
        text: text.to_string(),
        url: url.to_string(),
    })
}

/// What the host should do with the event after a widget handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventOutcome {
    pub fn handled() -> Self {
        Self {
            prevent_default: true,
            stop_propagation: true,
        }
    }
}

/// Link text drawn in place of `[text](url)`. Equal widgets are
/// interchangeable, so hosts may keep the rendered one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkWidget {
    pub text: String,
    pub url: String,
}

impl LinkWidget {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn class(&self) -> &'static str {
        theme::LINK_WIDGET
    }

    pub fn attributes(&self) -> [(&'static str, &str); 1] {
        [(theme::DATA_URL, self.url.as_str())]
    }

    /// Swallow the event and open the URL off the calling thread.
    pub fn mousedown(&self, opener: &LinkOpener) -> (EventOutcome, JoinHandle<()>) {
        let handle = opener.open_detached(self.url.clone());
        (EventOutcome::handled(), handle)
    }
}

#[derive(Debug)]
pub struct LinkDecorations {
    margin: usize,
    viewport_state: ViewportState,
    decorations: DecorationSet,
}

impl LinkDecorations {
    pub fn new(margin: usize) -> Self {
        Self {
            margin,
            viewport_state: ViewportState::default(),
            decorations: DecorationSet::none(),
        }
    }

    fn build(&self, update: &ViewUpdate<'_>) -> Result<DecorationSet, DecorationError> {
        let doc = update.state.doc();
        let line = update.state.cursor_line();
        let visible = compute_visible_range(doc, update.viewport, self.margin);
        let mut decorations: Vec<Decoration> = Vec::new();

        walk(doc.tree(), visible.from, visible.to, |element| {
            if element.kind() != SyntaxKind::LINK {
                return Visit::Continue;
            }
            let range = element_range(element);
            let Some(link) = extract_link_info(doc, range.start, range.end) else {
                return Visit::SkipChildren;
            };

            let on_current_line = link.from >= line.from && link.from < line.to;
            if on_current_line {
                if link.url_from < link.url_to {
                    decorations.push(Decoration {
                        from: link.url_from,
                        to: link.url_to,
                        spec: DecorationSpec::mark(theme::LINK_ACTIVE),
                    });
                }
                return Visit::SkipChildren;
            }

            decorations.push(Decoration {
                from: link.from,
                to: link.from + 1,
                spec: DecorationSpec::mark(theme::HIDE_LINK_SYNTAX),
            });
            decorations.push(Decoration {
                from: link.text_to,
                to: link.to,
                spec: DecorationSpec::mark(theme::HIDE_LINK_SYNTAX),
            });
            if link.text_from < link.text_to {
                decorations.push(Decoration {
                    from: link.text_from,
                    to: link.text_to,
                    spec: DecorationSpec::replace(Some(LinkWidget::new(link.text, link.url))),
                });
            }
            Visit::SkipChildren
        });

        decorations.sort_by_key(|d| (d.from, d.to));

        let mut builder = DecorationSetBuilder::new();
        for Decoration { from, to, spec } in decorations {
            builder.add(from, to, spec)?;
        }
        Ok(builder.finish())
    }
}

impl Default for LinkDecorations {
    fn default() -> Self {
        Self::new(VIEWPORT_MARGIN)
    }
}

impl DecorationPass for LinkDecorations {
    fn name(&self) -> &'static str {
        "links"
    }

    fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    fn update(&mut self, update: &ViewUpdate<'_>) {
        let line = update.state.cursor_line().number;
        let Some(next) = next_viewport_state(update, &self.viewport_state, line, true) else {
            return;
        };
        self.viewport_state = next;

        let built = self.build(update);
        commit(self.name(), built, &mut self.decorations);
    }
}
