use std::ops::Range;

/// A single selection range. `head` is the end that moves; the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn cursor(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn range(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn as_range(&self) -> Range<usize> {
        self.from()..self.to()
    }

    /// Map both ends through `change`.
    pub fn map(self, change: &Change) -> Self {
        Self {
            anchor: change.map_pos(self.anchor),
            head: change.map_pos(self.head),
        }
    }

    pub(crate) fn clamp(self, len: usize) -> Self {
        Self {
            anchor: self.anchor.min(len),
            head: self.head.min(len),
        }
    }
}

/// Replace `from..to` with `insert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl Change {
    pub fn new(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: insert.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    pub fn delete(from: usize, to: usize) -> Self {
        Self::new(from, to, "")
    }

    /// Where `pos` lands after the change. Positions before or at `from`
    /// stay put, positions inside the replaced range move to the end of the
    /// insertion.
    pub fn map_pos(&self, pos: usize) -> usize {
        if pos <= self.from {
            pos
        } else if pos >= self.to {
            pos - (self.to - self.from) + self.insert.len()
        } else {
            self.from + self.insert.len()
        }
    }
}
