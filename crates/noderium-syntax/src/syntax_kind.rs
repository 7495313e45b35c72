//! SyntaxKind enum for all tokens and nodes in the Markdown CST.
//!
//! Tokens and nodes share a single enum. Every byte in the source appears as
//! a token in the tree. Markdown punctuation that the editor decorates
//! (`#`, `>`, backtick runs, emphasis delimiters, ...) is remapped by the
//! parser into composite *marker tokens* such as [`SyntaxKind::HEADER_MARK`],
//! so consumers can find markers without looking at raw punctuation.

/// All syntax kinds for the Markdown CST.
///
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Raw tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Plain text content
    TEXT,
    /// A run of ASCII digits, the start of an ordered list marker
    DIGITS,
    /// `>`
    GT,
    /// `-`
    DASH,
    /// `*`
    STAR,
    /// `+`
    PLUS,
    /// `_`
    UNDERSCORE,
    /// `=` for setext underlines
    EQ,
    /// Single backtick
    BACKTICK,
    /// `~`
    TILDE,
    /// `[`
    LBRACKET,
    /// `]`
    RBRACKET,
    /// `|`
    PIPE,
    /// `(`
    LPAREN,
    /// `)`
    RPAREN,
    /// `#`
    HASH,

    // === Marker tokens (raw tokens remapped by the parser) ===
    /// Heading prefix `#`..`######`, or a setext underline
    HEADER_MARK,
    /// Blockquote `>`
    QUOTE_MARK,
    /// List bullet or ordinal (`-`, `*`, `+`, `1.`, `1)`)
    LIST_MARK,
    /// Task checkbox `[ ]` / `[x]`
    TASK_MARKER,
    /// Fence run or inline code backtick run
    CODE_MARK,
    /// `*`, `**`, `_`, `__`
    EMPHASIS_MARK,
    /// `~~`
    STRIKETHROUGH_MARK,
    /// Link punctuation: `[`, `]`, `(`, `)`, `[[`, `]]`
    LINK_MARK,
    /// Link destination
    URL,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    ROOT,
    PARAGRAPH,
    ATX_HEADING_1,
    ATX_HEADING_2,
    ATX_HEADING_3,
    ATX_HEADING_4,
    ATX_HEADING_5,
    ATX_HEADING_6,
    /// Heading underlined with `=`
    SETEXT_HEADING_1,
    /// Heading underlined with `-`
    SETEXT_HEADING_2,
    BLOCK_QUOTE,
    BULLET_LIST,
    ORDERED_LIST,
    LIST_ITEM,
    /// Thematic break (`---`, `***`, `___`)
    THEMATIC_BREAK,
    FENCED_CODE,
    /// Info string after an opening fence
    CODE_INFO,
    /// Body lines of a fenced code block
    CODE_TEXT,
    INLINE_CODE,
    EMPHASIS,
    STRONG_EMPHASIS,
    STRIKETHROUGH,
    /// Standard link `[text](url)`
    LINK,
    /// Wikilink `[[target]]` or `[[target|alias]]`
    WIKILINK,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer or marker).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace/newlines).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE)
    }

    /// ATX heading kind for a `#` count, `None` outside `1..=6`.
    pub fn atx_heading(level: usize) -> Option<Self> {
        match level {
            1 => Some(Self::ATX_HEADING_1),
            2 => Some(Self::ATX_HEADING_2),
            3 => Some(Self::ATX_HEADING_3),
            4 => Some(Self::ATX_HEADING_4),
            5 => Some(Self::ATX_HEADING_5),
            6 => Some(Self::ATX_HEADING_6),
            _ => None,
        }
    }

    /// Heading level for ATX and setext heading kinds.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::ATX_HEADING_1 | Self::SETEXT_HEADING_1 => Some(1),
            Self::ATX_HEADING_2 | Self::SETEXT_HEADING_2 => Some(2),
            Self::ATX_HEADING_3 => Some(3),
            Self::ATX_HEADING_4 => Some(4),
            Self::ATX_HEADING_5 => Some(5),
            Self::ATX_HEADING_6 => Some(6),
            _ => None,
        }
    }

    /// Display name used in diagnostics and by editor tooling, e.g.
    /// `HeaderMark` or `ATXHeading2`.
    pub fn name(self) -> &'static str {
        match self {
            Self::WHITESPACE => "Whitespace",
            Self::NEWLINE => "Newline",
            Self::TEXT => "Text",
            Self::DIGITS => "Digits",
            Self::GT => "Gt",
            Self::DASH => "Dash",
            Self::STAR => "Star",
            Self::PLUS => "Plus",
            Self::UNDERSCORE => "Underscore",
            Self::EQ => "Eq",
            Self::BACKTICK => "Backtick",
            Self::TILDE => "Tilde",
            Self::LBRACKET => "LBracket",
            Self::RBRACKET => "RBracket",
            Self::PIPE => "Pipe",
            Self::LPAREN => "LParen",
            Self::RPAREN => "RParen",
            Self::HASH => "Hash",
            Self::HEADER_MARK => "HeaderMark",
            Self::QUOTE_MARK => "QuoteMark",
            Self::LIST_MARK => "ListMark",
            Self::TASK_MARKER => "TaskMarker",
            Self::CODE_MARK => "CodeMark",
            Self::EMPHASIS_MARK => "EmphasisMark",
            Self::STRIKETHROUGH_MARK => "StrikethroughMark",
            Self::LINK_MARK => "LinkMark",
            Self::URL => "URL",
            Self::EOF => "EOF",
            Self::ROOT => "Document",
            Self::PARAGRAPH => "Paragraph",
            Self::ATX_HEADING_1 => "ATXHeading1",
            Self::ATX_HEADING_2 => "ATXHeading2",
            Self::ATX_HEADING_3 => "ATXHeading3",
            Self::ATX_HEADING_4 => "ATXHeading4",
            Self::ATX_HEADING_5 => "ATXHeading5",
            Self::ATX_HEADING_6 => "ATXHeading6",
            Self::SETEXT_HEADING_1 => "SetextHeading1",
            Self::SETEXT_HEADING_2 => "SetextHeading2",
            Self::BLOCK_QUOTE => "Blockquote",
            Self::BULLET_LIST => "BulletList",
            Self::ORDERED_LIST => "OrderedList",
            Self::LIST_ITEM => "ListItem",
            Self::THEMATIC_BREAK => "HorizontalRule",
            Self::FENCED_CODE => "FencedCode",
            Self::CODE_INFO => "CodeInfo",
            Self::CODE_TEXT => "CodeText",
            Self::INLINE_CODE => "InlineCode",
            Self::EMPHASIS => "Emphasis",
            Self::STRONG_EMPHASIS => "StrongEmphasis",
            Self::STRIKETHROUGH => "Strikethrough",
            Self::LINK => "Link",
            Self::WIKILINK => "WikiLink",
            Self::ERROR => "Error",
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkdownLang {}

impl rowan::Language for MarkdownLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<MarkdownLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<MarkdownLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<MarkdownLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;
    use rstest::rstest;

    #[test]
    fn marker_kinds_are_tokens() {
        assert!(SyntaxKind::HEADER_MARK.is_token());
        assert!(SyntaxKind::URL.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::FENCED_CODE.is_node());
        assert!(SyntaxKind::WIKILINK.is_node());
    }

    #[test]
    fn trivia_detection() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::NEWLINE.is_trivia());
        assert!(!SyntaxKind::TEXT.is_trivia());
    }

    #[rstest]
    #[case(1, SyntaxKind::ATX_HEADING_1)]
    #[case(4, SyntaxKind::ATX_HEADING_4)]
    #[case(6, SyntaxKind::ATX_HEADING_6)]
    fn atx_heading_levels(#[case] level: usize, #[case] kind: SyntaxKind) {
        assert_eq!(SyntaxKind::atx_heading(level), Some(kind));
        assert_eq!(kind.heading_level(), Some(level as u8));
    }

    #[test]
    fn atx_heading_rejects_seven_hashes() {
        assert_eq!(SyntaxKind::atx_heading(7), None);
        assert_eq!(SyntaxKind::atx_heading(0), None);
    }

    #[test]
    fn setext_levels() {
        assert_eq!(SyntaxKind::SETEXT_HEADING_1.heading_level(), Some(1));
        assert_eq!(SyntaxKind::SETEXT_HEADING_2.heading_level(), Some(2));
        assert_eq!(SyntaxKind::PARAGRAPH.heading_level(), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(SyntaxKind::ROOT.name(), "Document");
        assert_eq!(SyntaxKind::ATX_HEADING_3.name(), "ATXHeading3");
        assert_eq!(SyntaxKind::CODE_MARK.name(), "CodeMark");
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        let kind = SyntaxKind::LIST_MARK;
        let raw: rowan::SyntaxKind = kind.into();
        let back = MarkdownLang::kind_from_raw(raw);
        assert_eq!(kind, back);
    }
}
