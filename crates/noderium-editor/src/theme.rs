//! Class names attached by the decoration passes. Hosts style these.

/// Marker shown on the cursor line
pub const MARKER: &str = "cm-md-marker";
pub const HIDE_MARKDOWN: &str = "cm-hide-markdown";
pub const HIDE_MARKDOWN_FENCE: &str = "cm-hide-markdown-fence";

pub const CODEBLOCK_FENCE: &str = "cm-md-codeblock-fence";
pub const CODEBLOCK_FENCE_TEXT: &str = "cm-md-codeblock-fence-text";
pub const CODEBLOCK: &str = "cm-md-codeblock";
pub const CODEBLOCK_LINE: &str = "cm-md-codeblock-line";
/// Suffixed with the normalized language
pub const CODEBLOCK_LANG_PREFIX: &str = "cm-md-codeblock-lang-";
pub const DATA_CODE_LINE: &str = "data-code-line";
pub const DATA_CODE_LANG: &str = "data-code-lang";

pub const HEADING_PREFIX: &str = "cm-md-heading-";
pub const STRONG: &str = "cm-md-strong";
pub const EMPHASIS: &str = "cm-md-emphasis";
pub const INLINE_CODE: &str = "cm-md-code";

pub const LINK_ACTIVE: &str = "cm-md-link-active";
pub const HIDE_LINK_SYNTAX: &str = "cm-hide-link-syntax";
pub const LINK_WIDGET: &str = "cm-link-widget";
pub const DATA_URL: &str = "data-url";

/// `cm-md-heading-<level>`
pub fn heading_class(level: u8) -> String {
    format!("{HEADING_PREFIX}{level}")
}

/// Class list for a line inside a fenced code block.
pub fn codeblock_line_class(language: &str) -> String {
    format!("{CODEBLOCK} {CODEBLOCK_LINE} {CODEBLOCK_LANG_PREFIX}{language}")
}
