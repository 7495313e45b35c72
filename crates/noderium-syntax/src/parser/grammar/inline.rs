//! Inline grammar rules.
//!
//! Inline constructs are recognised by bounded lookahead on the current line
//! before any event is emitted, so a construct that does not close never
//! leaves marker tokens behind: its opening punctuation is consumed as plain
//! text instead.
//!
//! Every rule receives `room`, the number of tokens it may look at and
//! consume. Nested content is parsed with a tighter bound, which keeps inner
//! constructs from running past their parent's closing delimiter.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse inline content up to (not including) the line break.
pub fn inline_until_newline(p: &mut Parser<'_, '_>) {
    let end = p.pos() + p.line_len();
    inline_until(p, end);
}

/// Parse inline content up to the raw token index `end`.
fn inline_until(p: &mut Parser<'_, '_>, end: usize) {
    while p.pos() < end {
        let room = end - p.pos();
        let parsed = match p.current() {
            SyntaxKind::LBRACKET if p.nth(1) == SyntaxKind::LBRACKET => wikilink(p, room),
            SyntaxKind::LBRACKET => link(p, room),
            SyntaxKind::BACKTICK => code_span(p, room),
            SyntaxKind::STAR | SyntaxKind::UNDERSCORE => emphasis(p, room),
            SyntaxKind::TILDE => strikethrough(p, room),
            _ => false,
        };
        if !parsed {
            p.bump();
        }
    }
}

/// `[[target]]` or `[[target|alias]]`.
fn wikilink(p: &mut Parser<'_, '_>, room: usize) -> bool {
    let mut close = 2;
    loop {
        if close + 1 >= room {
            return false;
        }
        match (p.nth(close), p.nth(close + 1)) {
            (SyntaxKind::RBRACKET, SyntaxKind::RBRACKET) => break,
            (SyntaxKind::LBRACKET | SyntaxKind::RBRACKET, _) => return false,
            _ => close += 1,
        }
    }
    if close == 2 {
        return false;
    }

    let m = p.start();
    p.bump_n(2, SyntaxKind::LINK_MARK);
    for _ in 2..close {
        p.bump();
    }
    p.bump_n(2, SyntaxKind::LINK_MARK);
    m.complete(p, SyntaxKind::WIKILINK);
    true
}

/// `[text](url)` with no `]` in the text and no `)` in the destination.
fn link(p: &mut Parser<'_, '_>, room: usize) -> bool {
    let mut text_end = 1;
    while text_end < room && p.nth(text_end) != SyntaxKind::RBRACKET {
        if p.nth(text_end) == SyntaxKind::LBRACKET {
            return false;
        }
        text_end += 1;
    }
    if text_end + 1 >= room || p.nth(text_end + 1) != SyntaxKind::LPAREN {
        return false;
    }

    let url_start = text_end + 2;
    let mut url_end = url_start;
    while url_end < room && p.nth(url_end) != SyntaxKind::RPAREN {
        url_end += 1;
    }
    if url_end >= room {
        return false;
    }

    let m = p.start();
    p.bump_as(SyntaxKind::LINK_MARK);
    for _ in 1..text_end {
        p.bump();
    }
    p.bump_as(SyntaxKind::LINK_MARK);
    p.bump_as(SyntaxKind::LINK_MARK);
    p.bump_n(url_end - url_start, SyntaxKind::URL);
    p.bump_as(SyntaxKind::LINK_MARK);
    m.complete(p, SyntaxKind::LINK);
    true
}

/// Code span closed by a backtick run of the same length. An unmatched
/// opening run is consumed whole as literal text.
fn code_span(p: &mut Parser<'_, '_>, room: usize) -> bool {
    let open = p.run_len(0, SyntaxKind::BACKTICK).min(room);

    let mut i = open;
    while i < room {
        if p.nth(i) != SyntaxKind::BACKTICK {
            i += 1;
            continue;
        }
        let run = p.run_len(i, SyntaxKind::BACKTICK).min(room - i);
        if run == open {
            let m = p.start();
            p.bump_n(open, SyntaxKind::CODE_MARK);
            for _ in open..i {
                p.bump();
            }
            p.bump_n(run, SyntaxKind::CODE_MARK);
            m.complete(p, SyntaxKind::INLINE_CODE);
            return true;
        }
        i += run;
    }

    for _ in 0..open {
        p.bump();
    }
    true
}

/// `*em*`, `_em_`, `**strong**`, `__strong__`.
///
/// Openers must be followed by non-whitespace and closers preceded by it;
/// underscores additionally may not open or close inside a word.
fn emphasis(p: &mut Parser<'_, '_>, room: usize) -> bool {
    let delim = p.current();
    let run = p.run_len(0, delim).min(room);
    let width = if run >= 2 { 2 } else { 1 };

    if delim == SyntaxKind::UNDERSCORE && is_word(p.prev()) {
        return false;
    }
    if width >= room || is_space(p.nth(width)) {
        return false;
    }

    let mut i = width;
    while i < room {
        if p.nth(i) != delim {
            i += 1;
            continue;
        }
        let closer = p.run_len(i, delim).min(room - i);
        let closes = closer >= width
            && i > width
            && !is_space(p.nth(i - 1))
            && !(delim == SyntaxKind::UNDERSCORE && is_word(p.nth(i + width)));
        if closes {
            let close_at = p.pos() + i;
            let m = p.start();
            p.bump_n(width, SyntaxKind::EMPHASIS_MARK);
            inline_until(p, close_at);
            p.bump_n(width, SyntaxKind::EMPHASIS_MARK);
            let kind = if width == 2 {
                SyntaxKind::STRONG_EMPHASIS
            } else {
                SyntaxKind::EMPHASIS
            };
            m.complete(p, kind);
            return true;
        }
        i += closer;
    }

    false
}

/// `~~struck~~`.
fn strikethrough(p: &mut Parser<'_, '_>, room: usize) -> bool {
    if p.run_len(0, SyntaxKind::TILDE) != 2 || 2 >= room || is_space(p.nth(2)) {
        return false;
    }

    let mut i = 3;
    while i + 1 < room {
        if p.nth(i) == SyntaxKind::TILDE
            && p.run_len(i, SyntaxKind::TILDE) == 2
            && !is_space(p.nth(i - 1))
        {
            let close_at = p.pos() + i;
            let m = p.start();
            p.bump_n(2, SyntaxKind::STRIKETHROUGH_MARK);
            inline_until(p, close_at);
            p.bump_n(2, SyntaxKind::STRIKETHROUGH_MARK);
            m.complete(p, SyntaxKind::STRIKETHROUGH);
            return true;
        }
        i += 1;
    }

    false
}

fn is_space(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
    )
}

fn is_word(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::TEXT | SyntaxKind::DIGITS)
}
