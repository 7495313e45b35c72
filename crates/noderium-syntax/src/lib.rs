//! # noderium-syntax
//!
//! A lossless Markdown syntax tree using [Rowan] + [Logos], following the
//! [rust-analyzer] architecture model. It is the tree the Noderium editor
//! decorates: every marker the editor hides or styles (`#`, `>`, backtick
//! runs, emphasis delimiters, list bullets, link punctuation) is a single
//! token of its own kind.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! - [`lexer`] splits input into raw tokens; nothing is discarded.
//! - [`parser`] emits Start/Token/Finish events, grouping raw punctuation
//!   into marker tokens such as [`SyntaxKind::CODE_MARK`].
//! - [`parser::sink`] builds the immutable, cheaply cloned Rowan tree.
//! - [`walk`] visits the elements overlapping a byte range with a
//!   continue / skip-children / stop decision per element.
//!
//! ## Quick Start
//!
//! ```
//! use noderium_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("## Hello\n");
//! assert_eq!(tree.text().to_string(), "## Hello\n");
//!
//! let heading = tree.children().next().unwrap();
//! assert_eq!(heading.kind(), SyntaxKind::ATX_HEADING_2);
//! let mark = heading.first_token().unwrap();
//! assert_eq!(mark.kind(), SyntaxKind::HEADER_MARK);
//! assert_eq!(mark.text(), "##");
//! ```

pub mod lexer;
pub mod parser;
pub mod syntax_kind;
pub mod walk;

pub use parser::parse;
pub use syntax_kind::{MarkdownLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use walk::{Visit, element_range, walk};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Helper to format a syntax tree for snapshot testing.
    fn format_tree(node: &SyntaxNode, indent: usize) -> String {
        let mut result = String::new();
        let prefix = "  ".repeat(indent);

        result.push_str(&format!(
            "{}{:?}@{:?}\n",
            prefix,
            node.kind(),
            node.text_range()
        ));

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => {
                    result.push_str(&format_tree(&n, indent + 1));
                }
                rowan::NodeOrToken::Token(t) => {
                    let text = t.text().replace('\n', "\\n");
                    result.push_str(&format!(
                        "{}  {:?}@{:?} {:?}\n",
                        prefix,
                        t.kind(),
                        t.text_range(),
                        text
                    ));
                }
            }
        }

        result
    }

    /// Kinds of every element in preorder, for structural assertions.
    fn kinds(input: &str) -> Vec<SyntaxKind> {
        parse(input)
            .descendants_with_tokens()
            .map(|element| element.kind())
            .collect()
    }

    fn marker_texts(input: &str, kind: SyntaxKind) -> Vec<String> {
        parse(input)
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| token.kind() == kind)
            .map(|token| token.text().to_string())
            .collect()
    }

    #[test]
    fn snapshot_heading() {
        let tree = parse("# Hello\n");
        assert_snapshot!(format_tree(&tree, 0), @r##"
        ROOT@0..8
          ATX_HEADING_1@0..8
            HEADER_MARK@0..1 "#"
            WHITESPACE@1..2 " "
            TEXT@2..7 "Hello"
            NEWLINE@7..8 "\\n"
        "##);
    }

    #[test]
    fn snapshot_lists() {
        let tree = parse("- a\n- \n1. b\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..12
          BULLET_LIST@0..7
            LIST_ITEM@0..4
              LIST_MARK@0..1 "-"
              WHITESPACE@1..2 " "
              PARAGRAPH@2..3
                TEXT@2..3 "a"
              NEWLINE@3..4 "\\n"
            LIST_ITEM@4..7
              LIST_MARK@4..5 "-"
              WHITESPACE@5..6 " "
              NEWLINE@6..7 "\\n"
          ORDERED_LIST@7..12
            LIST_ITEM@7..12
              LIST_MARK@7..9 "1."
              WHITESPACE@9..10 " "
              PARAGRAPH@10..11
                TEXT@10..11 "b"
              NEWLINE@11..12 "\\n"
        "#);
    }

    #[test]
    fn snapshot_fenced_code() {
        let tree = parse("```rust\nfn main() {}\n```\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..25
          FENCED_CODE@0..25
            CODE_MARK@0..3 "```"
            CODE_INFO@3..7
              TEXT@3..7 "rust"
            NEWLINE@7..8 "\\n"
            CODE_TEXT@8..21
              TEXT@8..10 "fn"
              WHITESPACE@10..11 " "
              TEXT@11..15 "main"
              LPAREN@15..16 "("
              RPAREN@16..17 ")"
              WHITESPACE@17..18 " "
              TEXT@18..20 "{}"
              NEWLINE@20..21 "\\n"
            CODE_MARK@21..24 "```"
            NEWLINE@24..25 "\\n"
        "#);
    }

    #[test]
    fn snapshot_inline_elements() {
        let tree = parse("a *b* **c** `d` [e](f)\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..23
          PARAGRAPH@0..23
            TEXT@0..1 "a"
            WHITESPACE@1..2 " "
            EMPHASIS@2..5
              EMPHASIS_MARK@2..3 "*"
              TEXT@3..4 "b"
              EMPHASIS_MARK@4..5 "*"
            WHITESPACE@5..6 " "
            STRONG_EMPHASIS@6..11
              EMPHASIS_MARK@6..8 "**"
              TEXT@8..9 "c"
              EMPHASIS_MARK@9..11 "**"
            WHITESPACE@11..12 " "
            INLINE_CODE@12..15
              CODE_MARK@12..13 "`"
              TEXT@13..14 "d"
              CODE_MARK@14..15 "`"
            WHITESPACE@15..16 " "
            LINK@16..22
              LINK_MARK@16..17 "["
              TEXT@17..18 "e"
              LINK_MARK@18..19 "]"
              LINK_MARK@19..20 "("
              URL@20..21 "f"
              LINK_MARK@21..22 ")"
            NEWLINE@22..23 "\\n"
        "#);
    }

    #[test]
    fn snapshot_setext_and_quote() {
        let tree = parse("Title\n===\n> q\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..14
          SETEXT_HEADING_1@0..10
            TEXT@0..5 "Title"
            NEWLINE@5..6 "\\n"
            HEADER_MARK@6..9 "==="
            NEWLINE@9..10 "\\n"
          BLOCK_QUOTE@10..14
            QUOTE_MARK@10..11 ">"
            WHITESPACE@11..12 " "
            PARAGRAPH@12..13
              TEXT@12..13 "q"
            NEWLINE@13..14 "\\n"
        "#);
    }

    #[rstest]
    #[case("# One", SyntaxKind::ATX_HEADING_1)]
    #[case("###### Six", SyntaxKind::ATX_HEADING_6)]
    #[case("#", SyntaxKind::ATX_HEADING_1)]
    #[case("Setext Heading\n----", SyntaxKind::SETEXT_HEADING_2)]
    #[case("Title\n=", SyntaxKind::SETEXT_HEADING_1)]
    #[case("#hashtag", SyntaxKind::PARAGRAPH)]
    #[case("####### seven", SyntaxKind::PARAGRAPH)]
    #[case("---", SyntaxKind::THEMATIC_BREAK)]
    #[case("* * *", SyntaxKind::THEMATIC_BREAK)]
    #[case("- item", SyntaxKind::BULLET_LIST)]
    #[case("  - nested", SyntaxKind::BULLET_LIST)]
    #[case("3) third", SyntaxKind::ORDERED_LIST)]
    #[case("3.5 apples", SyntaxKind::PARAGRAPH)]
    #[case("~~~\ncode", SyntaxKind::FENCED_CODE)]
    #[case("``not a fence", SyntaxKind::PARAGRAPH)]
    fn first_block_kind(#[case] input: &str, #[case] expected: SyntaxKind) {
        let tree = parse(input);
        assert_eq!(tree.children().next().map(|n| n.kind()), Some(expected));
    }

    #[rstest]
    #[case("# Title", SyntaxKind::HEADER_MARK, &["#"])]
    #[case("> > nested", SyntaxKind::QUOTE_MARK, &[">", ">"])]
    #[case("```js\nx\n```", SyntaxKind::CODE_MARK, &["```", "```"])]
    #[case("``a ` b``", SyntaxKind::CODE_MARK, &["``", "``"])]
    #[case("***both***", SyntaxKind::EMPHASIS_MARK, &["**", "**"])]
    #[case("__strong__ and _em_", SyntaxKind::EMPHASIS_MARK, &["__", "__", "_", "_"])]
    #[case("- [ ] todo", SyntaxKind::TASK_MARKER, &["[ ]"])]
    #[case("- [x] done", SyntaxKind::TASK_MARKER, &["[x]"])]
    #[case("~~gone~~", SyntaxKind::STRIKETHROUGH_MARK, &["~~", "~~"])]
    #[case("[[page|alias]]", SyntaxKind::LINK_MARK, &["[[", "]]"])]
    #[case("[t](https://example.com/a-b)", SyntaxKind::URL, &["https://example.com/a-b"])]
    fn marker_tokens(#[case] input: &str, #[case] kind: SyntaxKind, #[case] expected: &[&str]) {
        assert_eq!(marker_texts(input, kind), expected);
    }

    #[rstest]
    #[case("snake_case_name")]
    #[case("a * b * c")]
    #[case("**")]
    #[case("[broken link without url")]
    #[case("[[unclosed wikilink")]
    #[case("`unclosed code")]
    fn unmatched_punctuation_leaves_no_markers(#[case] input: &str) {
        let found = kinds(input);
        for marker in [
            SyntaxKind::EMPHASIS_MARK,
            SyntaxKind::LINK_MARK,
            SyntaxKind::CODE_MARK,
        ] {
            assert!(!found.contains(&marker), "{marker:?} in {input:?}");
        }
    }

    #[test]
    fn mismatched_fence_stays_open() {
        let tree = parse("```\n~~~\nstill code\n```\nafter\n");
        let kinds: Vec<_> = tree.children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![SyntaxKind::FENCED_CODE, SyntaxKind::PARAGRAPH]);
    }

    #[test]
    fn list_items_group_by_flavour() {
        let tree = parse("- a\n- b\n1. c\n* d\n");
        let kinds: Vec<_> = tree.children().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::BULLET_LIST,
                SyntaxKind::ORDERED_LIST,
                SyntaxKind::BULLET_LIST,
            ]
        );
    }

    #[test]
    fn emphasis_does_not_cross_link_boundaries() {
        let tree = parse("*[a](b)* tail\n");
        let emphasis = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::EMPHASIS)
            .unwrap();
        assert!(emphasis.children().any(|n| n.kind() == SyntaxKind::LINK));
    }

    #[test]
    fn roundtrip_preserves_text() {
        let inputs = [
            "Hello, world!\n",
            "# Heading\n",
            "> Quote\n",
            "- Item\n",
            "```\ncode\n```\n",
            "[[wikilink]]\n",
            "[link](url)\n",
            "*emphasis*\n",
            "**strong**\n",
            "`code span`\n",
            "#Meeting Notes\n##Action Items\n- [ ] Call [[John] about it\n> half\nthat continues\n```python\nunclosed\n",
            "line\r\nwith crlf\r\n",
        ];

        for input in inputs {
            let tree = parse(input);
            assert_eq!(
                tree.text().to_string(),
                input,
                "Roundtrip failed for: {:?}",
                input
            );
        }
    }
}
