/// A byte range `[start, end)` into the text being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// The text this span covers in `s`.
    pub fn slice(self, s: &str) -> &str {
        &s[self.start..self.end]
    }
}
