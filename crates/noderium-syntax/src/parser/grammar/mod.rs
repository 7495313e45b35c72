//! # Grammar Rules
//!
//! Each function takes a `&mut Parser` and uses its methods to inspect the
//! current token, consume tokens, and build structure with markers.
//!
//! - [`block`] - Block-level elements (headings, quotes, lists, fences)
//! - [`inline`] - Inline elements (links, emphasis, code spans)
//!
//! Grammar functions are lenient: every input produces a tree that
//! preserves all bytes. Constructs that fail to match fall back to
//! paragraphs and plain text rather than error nodes.

mod block;
mod inline;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while !p.at_end() {
        block::block(p);
    }

    m.complete(p, SyntaxKind::ROOT);
}
