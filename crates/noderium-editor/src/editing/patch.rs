use std::ops::Range;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte ranges in the new document that were inserted or collapsed by
    /// a deletion
    pub changed: Vec<Range<usize>>,
    pub version: u64,
}
