use std::sync::OnceLock;

use regex::Regex;

/// Which character opened a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceMarker {
    Backticks,
    Tildes,
}

impl FenceMarker {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    pub fn as_str(self) -> &'static str {
        match self {
            FenceMarker::Backticks => Self::BACKTICKS,
            FenceMarker::Tildes => Self::TILDES,
        }
    }
}

/// A line that opens or closes a fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceLine<'a> {
    pub marker: FenceMarker,
    /// Everything after the three marker characters, untrimmed
    pub language: &'a str,
}

/// Recognise a fence line. The text is checked as given, so callers decide
/// whether leading whitespace counts.
pub fn parse_fence_line(text: &str) -> Option<FenceLine<'_>> {
    [FenceMarker::Backticks, FenceMarker::Tildes]
        .into_iter()
        .find_map(|marker| {
            text.strip_prefix(marker.as_str())
                .map(|language| FenceLine { marker, language })
        })
}

/// Language name suitable for a class suffix: lowercase `[a-z0-9_-]`, or
/// `plain` when nothing usable remains.
pub fn normalize_language(language: &str) -> String {
    static SANITIZE: OnceLock<Regex> = OnceLock::new();
    let sanitize = SANITIZE.get_or_init(|| Regex::new(r"[^a-z0-9_-]").expect("Invalid language regex"));

    let lowered = language.trim().to_lowercase();
    let normalized = sanitize.replace_all(&lowered, "");
    if normalized.is_empty() {
        "plain".to_string()
    } else {
        normalized.into_owned()
    }
}
