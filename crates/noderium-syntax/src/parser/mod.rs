//! # Parser - Event-Based Tree Construction
//!
//! Transforms a token stream into a syntax tree using the **event-based**
//! architecture from rust-analyzer.
//!
//! The parser never builds tree nodes directly. It emits a flat list of
//! [`Event`]s (Start, Token, Finish) and the [`Sink`] turns those into a Rowan
//! tree afterwards:
//!
//! ```text
//! Start(ATX_HEADING_1)
//! Token(HEADER_MARK)
//! Token(WHITESPACE)
//! Token(TEXT)
//! Token(NEWLINE)
//! Finish
//! ```
//!
//! ## The Marker System
//!
//! `parser.start()` returns a [`Marker`] which **must** be completed with a
//! node kind or abandoned; dropping it is a bug and panics. Because the kind
//! is only chosen at completion time, a rule can decide late what it parsed
//! (a paragraph that turns out to be a setext heading, for example).
//!
//! [`CompletedMarker::precede`] wraps an already-completed node in a new
//! parent; lists use it to wrap their first item once it is known to start a
//! list.
//!
//! ## Marker tokens
//!
//! Raw punctuation that forms Markdown syntax is re-emitted under a marker
//! kind with [`Parser::bump_n`], e.g. three `BACKTICK` tokens become one
//! `CODE_MARK` token. This keeps the tree lossless while giving consumers a
//! single token per marker.
//!
//! ```
//! use noderium_syntax::parse;
//!
//! let tree = parse("# Hello\n");
//! println!("{:#?}", tree);
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        let sink = Sink::new(self.tokens, self.events);
        sink.finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Index of the current raw token.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Text of the token n ahead, empty past the end.
    pub fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    /// Kind of the token just before the current one, EOF at the start.
    pub fn prev(&self) -> SyntaxKind {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume the current token, re-emitting it under `kind`.
    pub fn bump_as(&mut self, kind: SyntaxKind) {
        self.bump_n(1, kind);
    }

    /// Consume n tokens as a single composite token.
    pub fn bump_n(&mut self, n: usize, kind: SyntaxKind) {
        if n > 0 && self.pos + n <= self.tokens.len() {
            self.events.push(Event::marker(kind, n as u32));
            self.pos += n;
        }
    }

    /// Number of tokens from here to the end of the line (exclusive of the
    /// line break).
    pub fn line_len(&self) -> usize {
        let mut n = 0;
        while !matches!(self.nth(n), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
            n += 1;
        }
        n
    }

    /// Number of consecutive `kind` tokens starting n ahead.
    pub fn run_len(&self, n: usize, kind: SyntaxKind) -> usize {
        let mut len = 0;
        while self.nth(n + len) == kind {
            len += 1;
        }
        len
    }
}

/// A marker for a node being constructed.
///
/// Every marker must be either **completed** via `marker.complete(parser,
/// KIND)`, turning its placeholder into a `Start` event, or **abandoned**
/// via `marker.abandon(parser)`. Dropping it otherwise panics.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start {
            kind,
            forward_parent: None,
        };
        p.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }

    /// Abandon this marker without creating a node.
    ///
    /// The placeholder is removed if it is the last event, otherwise it stays
    /// inert and the Sink ignores it.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// A marker for a node that has been completed.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    /// Position of the Start event for this completed node
    pos: usize,
}

impl CompletedMarker {
    /// Create a new parent node that will contain this node.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        let new_pos = p.events.len();
        p.events.push(Event::Placeholder);

        if let Event::Start { forward_parent, .. } = &mut p.events[self.pos] {
            *forward_parent = Some(new_pos);
        }

        Marker {
            pos: new_pos,
            completed: false,
        }
    }
}

/// Parse markdown source into a syntax tree.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    let parser = Parser::new(&tokens);
    parser.parse()
}
