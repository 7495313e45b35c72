//! Flat parse events.
//!
//! Grammar functions never touch rowan. They push events, and the
//! [`Sink`](super::sink::Sink) replays them into a green tree once parsing is
//! done. A quote line `> q` comes out as:
//!
//! ```text
//! Start(BLOCK_QUOTE)
//!   Marker(QUOTE_MARK, 1)
//!   Marker(WHITESPACE, 1)
//!   Start(PARAGRAPH)
//!     Marker(TEXT, 1)
//!   Finish
//! Finish
//! ```
//!
//! A marker spanning several lexer tokens, such as a ```` ``` ```` fence or
//! `**`, is one event with a raw-token count, so the tree holds one token
//! per marker.
//!
//! `forward_parent` lets a completed node be wrapped after the fact: the
//! first list item is parsed before its `BULLET_LIST` or `ORDERED_LIST` is
//! known. The sink follows the chain and opens the outermost node first.

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Open a node. `forward_parent` is an index to a later `Start` that
    /// wraps this one.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },

    /// Emit one tree token built from `n_raw_tokens` lexer tokens.
    Token { kind: SyntaxKind, n_raw_tokens: u32 },

    Finish,

    /// Left by `Parser::start`; a completed marker overwrites it, an
    /// abandoned one is skipped by the sink.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start {
            kind,
            forward_parent: None,
        }
    }

    /// A token covering exactly one lexer token.
    pub fn token(kind: SyntaxKind) -> Self {
        Event::marker(kind, 1)
    }

    /// A token covering `n_raw_tokens` lexer tokens, re-kinded as `kind`.
    pub fn marker(kind: SyntaxKind, n_raw_tokens: u32) -> Self {
        Event::Token { kind, n_raw_tokens }
    }
}
