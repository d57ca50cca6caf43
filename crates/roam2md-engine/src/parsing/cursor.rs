/// A cursor for marker scanning with position tracking.
///
/// Delimiters are ASCII and matched byte-wise; uid payloads are counted in
/// `char`s so multi-byte text never splits a code point.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at byte offset `i` of `s`.
    pub fn at(s: &'a str, i: usize) -> Self {
        Self { s, i }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Consumes `pat` if the input starts with it.
    pub fn eat(&mut self, pat: &[u8]) -> bool {
        if self.starts_with(pat) {
            self.bump_n(pat.len());
            true
        } else {
            false
        }
    }

    /// Advances over exactly `n` chars, none of them a newline.
    ///
    /// Returns `false` and leaves the position unspecified when fewer than
    /// `n` such chars remain; callers restore a saved cursor on failure.
    pub fn bump_chars(&mut self, n: usize) -> bool {
        let Some(rest) = self.s.get(self.i..) else {
            return false;
        };
        let mut chars = rest.chars();
        for _ in 0..n {
            match chars.next() {
                Some('\n') | None => return false,
                Some(c) => self.i += c.len_utf8(),
            }
        }
        true
    }

    /// Advances over a run of ASCII digits, returning how many were consumed.
    pub fn bump_digits(&mut self) -> usize {
        let start = self.i;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.i += 1;
        }
        self.i - start
    }
}
