//! Position within the filtered question list.

/// Wrapping cursor over a list of `len` items.
///
/// An empty list is a valid state: `current()` is `None` and every move is
/// a no-op that leaves the index at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Rebind to a new list, back at the first item.
    pub fn reset(&mut self, len: usize) {
        self.index = 0;
        self.len = len;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> Option<usize> {
        (self.index < self.len).then_some(self.index)
    }

    /// Advances one item, wrapping to the first. Returns false on an empty list.
    pub fn next(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.index = (self.index + 1) % self.len;
        true
    }

    /// Steps back one item, wrapping to the last. Returns false on an empty list.
    pub fn previous(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.index = (self.index + self.len - 1) % self.len;
        true
    }

    /// Jumps to `index`. Out-of-range requests are ignored and return false.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        true
    }
}
