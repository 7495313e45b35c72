//! Block-level grammar rules.

use crate::parser::{CompletedMarker, Parser};
use crate::syntax_kind::SyntaxKind;

use super::inline;

/// Parse a block element.
pub fn block(p: &mut Parser<'_, '_>) {
    // Skip blank lines, including whitespace-only ones
    loop {
        if p.at(SyntaxKind::NEWLINE)
            || (p.at(SyntaxKind::WHITESPACE)
                && matches!(p.nth(1), SyntaxKind::NEWLINE | SyntaxKind::EOF))
        {
            p.bump();
        } else {
            break;
        }
    }

    if p.at_end() {
        return;
    }

    match p.current() {
        SyntaxKind::HASH => match atx_heading_kind(p) {
            Some((level, kind)) => atx_heading(p, level, kind),
            None => paragraph(p),
        },
        SyntaxKind::GT => blockquote(p),
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::UNDERSCORE if is_thematic_break(p) => {
            thematic_break(p)
        }
        SyntaxKind::BACKTICK | SyntaxKind::TILDE if is_code_fence(p) => fenced_code(p),
        _ => match list_item_start(p) {
            Some(marker) => list(p, marker),
            None => paragraph(p),
        },
    }
}

/// Heading level and kind when the line opens an ATX heading: one to six
/// `#` followed by whitespace or the end of the line.
fn atx_heading_kind(p: &Parser<'_, '_>) -> Option<(usize, SyntaxKind)> {
    let level = p.run_len(0, SyntaxKind::HASH);
    if !matches!(
        p.nth(level),
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
    ) {
        return None;
    }
    SyntaxKind::atx_heading(level).map(|kind| (level, kind))
}

fn atx_heading(p: &mut Parser<'_, '_>, level: usize, kind: SyntaxKind) {
    let m = p.start();
    p.bump_n(level, SyntaxKind::HEADER_MARK);
    p.eat(SyntaxKind::WHITESPACE);
    inline::inline_until_newline(p);
    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, kind);
}

/// Check if current position is a thematic break (`---`, `***`, `___`).
fn is_thematic_break(p: &Parser<'_, '_>) -> bool {
    let marker = p.current();
    if !matches!(
        marker,
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::UNDERSCORE
    ) {
        return false;
    }

    let mut count = 0;
    for i in 0..p.line_len() {
        match p.nth(i) {
            k if k == marker => count += 1,
            SyntaxKind::WHITESPACE => {}
            _ => return false,
        }
    }

    count >= 3
}

fn thematic_break(p: &mut Parser<'_, '_>) {
    let m = p.start();
    bump_rest_of_line(p);
    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, SyntaxKind::THEMATIC_BREAK);
}

/// Blockquote: one or more lines starting with `>`.
fn blockquote(p: &mut Parser<'_, '_>) {
    let m = p.start();

    loop {
        while p.at(SyntaxKind::GT) {
            p.bump_as(SyntaxKind::QUOTE_MARK);
            p.eat(SyntaxKind::WHITESPACE);
        }

        if !at_line_end(p) {
            let para = p.start();
            inline::inline_until_newline(p);
            para.complete(p, SyntaxKind::PARAGRAPH);
        }
        p.eat(SyntaxKind::NEWLINE);

        let continues =
            p.at(SyntaxKind::GT) || (p.at(SyntaxKind::WHITESPACE) && p.nth(1) == SyntaxKind::GT);
        if !continues {
            break;
        }
        p.eat(SyntaxKind::WHITESPACE);
    }

    m.complete(p, SyntaxKind::BLOCK_QUOTE);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Ordered,
}

/// Shape of a list item opener found at the current line start.
#[derive(Debug, Clone, Copy)]
struct ListOpener {
    kind: ListKind,
    /// Whether a whitespace token precedes the marker
    indented: bool,
    /// Raw tokens forming the marker: 1 for bullets, 2 for `1.` / `1)`
    marker_len: usize,
}

fn list_item_start(p: &Parser<'_, '_>) -> Option<ListOpener> {
    let indent = usize::from(p.at(SyntaxKind::WHITESPACE));
    let (kind, marker_len) = match p.nth(indent) {
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS => (ListKind::Bullet, 1),
        SyntaxKind::DIGITS if is_ordinal_delimiter(p, indent + 1) => (ListKind::Ordered, 2),
        _ => return None,
    };

    matches!(
        p.nth(indent + marker_len),
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
    )
    .then_some(ListOpener {
        kind,
        indented: indent == 1,
        marker_len,
    })
}

/// `.` or `)` after the digits of an ordered list marker.
fn is_ordinal_delimiter(p: &Parser<'_, '_>, n: usize) -> bool {
    match p.nth(n) {
        SyntaxKind::RPAREN => true,
        SyntaxKind::TEXT => p.nth_text(n) == ".",
        _ => false,
    }
}

/// A run of consecutive list items of one flavour, wrapped in
/// `BULLET_LIST` or `ORDERED_LIST`.
fn list(p: &mut Parser<'_, '_>, first: ListOpener) {
    let item = list_item(p, first);
    let m = item.precede(p);

    while let Some(next) = list_item_start(p) {
        if next.kind != first.kind || (!next.indented && is_thematic_break(p)) {
            break;
        }
        list_item(p, next);
    }

    let kind = match first.kind {
        ListKind::Bullet => SyntaxKind::BULLET_LIST,
        ListKind::Ordered => SyntaxKind::ORDERED_LIST,
    };
    m.complete(p, kind);
}

fn list_item(p: &mut Parser<'_, '_>, opener: ListOpener) -> CompletedMarker {
    let m = p.start();

    if opener.indented {
        p.bump();
    }
    p.bump_n(opener.marker_len, SyntaxKind::LIST_MARK);
    p.eat(SyntaxKind::WHITESPACE);

    if is_task_marker(p) {
        p.bump_n(3, SyntaxKind::TASK_MARKER);
        p.eat(SyntaxKind::WHITESPACE);
    }

    if !at_line_end(p) {
        let para = p.start();
        inline::inline_until_newline(p);
        para.complete(p, SyntaxKind::PARAGRAPH);
    }
    p.eat(SyntaxKind::NEWLINE);

    m.complete(p, SyntaxKind::LIST_ITEM)
}

/// `[ ]`, `[x]` or `[X]` followed by whitespace or the end of the line.
fn is_task_marker(p: &Parser<'_, '_>) -> bool {
    if !p.at(SyntaxKind::LBRACKET) || p.nth(2) != SyntaxKind::RBRACKET {
        return false;
    }
    let mark = match p.nth(1) {
        SyntaxKind::WHITESPACE => p.nth_text(1) == " ",
        SyntaxKind::TEXT => matches!(p.nth_text(1), "x" | "X"),
        _ => false,
    };
    mark && matches!(
        p.nth(3),
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
    )
}

/// Check if current position starts a code fence (3+ backticks or tildes).
fn is_code_fence(p: &Parser<'_, '_>) -> bool {
    fence_run(p) >= 3
}

fn fence_run(p: &Parser<'_, '_>) -> usize {
    match p.current() {
        kind @ (SyntaxKind::BACKTICK | SyntaxKind::TILDE) => p.run_len(0, kind),
        _ => 0,
    }
}

/// Fenced code block. Unclosed fences run to the end of the document.
fn fenced_code(p: &mut Parser<'_, '_>) {
    let fence_kind = p.current();
    let open_len = fence_run(p);

    let m = p.start();
    p.bump_n(open_len, SyntaxKind::CODE_MARK);
    p.eat(SyntaxKind::WHITESPACE);

    if !at_line_end(p) {
        let info = p.start();
        bump_rest_of_line(p);
        info.complete(p, SyntaxKind::CODE_INFO);
    }
    p.eat(SyntaxKind::NEWLINE);

    let text = p.start();
    let mut has_text = false;
    while !p.at_end() && !is_closing_fence(p, fence_kind, open_len) {
        bump_rest_of_line(p);
        p.eat(SyntaxKind::NEWLINE);
        has_text = true;
    }
    if has_text {
        text.complete(p, SyntaxKind::CODE_TEXT);
    } else {
        text.abandon(p);
    }

    if !p.at_end() {
        let close_len = p.run_len(0, fence_kind);
        p.bump_n(close_len, SyntaxKind::CODE_MARK);
        bump_rest_of_line(p);
        p.eat(SyntaxKind::NEWLINE);
    }

    m.complete(p, SyntaxKind::FENCED_CODE);
}

/// A line holding only a run of the opening fence character, at least as
/// long as the opener, plus optional trailing whitespace.
fn is_closing_fence(p: &Parser<'_, '_>, fence_kind: SyntaxKind, open_len: usize) -> bool {
    let run = p.run_len(0, fence_kind);
    run >= open_len && (run..p.line_len()).all(|i| p.nth(i) == SyntaxKind::WHITESPACE)
}

/// Paragraph, or a setext heading when the following line is an underline.
fn paragraph(p: &mut Parser<'_, '_>) {
    let m = p.start();
    let mut kind = SyntaxKind::PARAGRAPH;

    loop {
        inline::inline_until_newline(p);
        if !p.eat(SyntaxKind::NEWLINE) {
            break;
        }

        if let Some((underline_len, heading)) = setext_underline(p) {
            p.bump_n(underline_len, SyntaxKind::HEADER_MARK);
            p.eat(SyntaxKind::WHITESPACE);
            p.eat(SyntaxKind::NEWLINE);
            kind = heading;
            break;
        }

        if ends_paragraph(p) {
            break;
        }
    }

    m.complete(p, kind);
}

/// `===` or `---` (any length, optional trailing whitespace) under a
/// paragraph line.
fn setext_underline(p: &Parser<'_, '_>) -> Option<(usize, SyntaxKind)> {
    let (marker, heading) = match p.current() {
        SyntaxKind::EQ => (SyntaxKind::EQ, SyntaxKind::SETEXT_HEADING_1),
        SyntaxKind::DASH => (SyntaxKind::DASH, SyntaxKind::SETEXT_HEADING_2),
        _ => return None,
    };
    let run = p.run_len(0, marker);
    let trailing = usize::from(p.nth(run) == SyntaxKind::WHITESPACE);
    matches!(p.nth(run + trailing), SyntaxKind::NEWLINE | SyntaxKind::EOF)
        .then_some((run, heading))
}

/// Whether the line at the current position interrupts a paragraph.
fn ends_paragraph(p: &Parser<'_, '_>) -> bool {
    match p.current() {
        SyntaxKind::NEWLINE | SyntaxKind::EOF => true,
        SyntaxKind::WHITESPACE => matches!(p.nth(1), SyntaxKind::NEWLINE | SyntaxKind::EOF),
        SyntaxKind::HASH => atx_heading_kind(p).is_some(),
        SyntaxKind::GT => true,
        SyntaxKind::BACKTICK | SyntaxKind::TILDE => is_code_fence(p),
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::UNDERSCORE if is_thematic_break(p) => {
            true
        }
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS => {
            p.nth(1) == SyntaxKind::WHITESPACE
        }
        _ => false,
    }
}

fn at_line_end(p: &Parser<'_, '_>) -> bool {
    matches!(p.current(), SyntaxKind::NEWLINE | SyntaxKind::EOF)
}

fn bump_rest_of_line(p: &mut Parser<'_, '_>) {
    for _ in 0..p.line_len() {
        p.bump();
    }
}
