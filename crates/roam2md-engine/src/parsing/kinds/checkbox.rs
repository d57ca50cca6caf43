use crate::parsing::{cursor::Cursor, span::Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxState {
    Todo,
    Done,
}

impl CheckboxState {
    /// Markdown task-list replacement for the marker.
    pub fn markdown(self) -> &'static str {
        match self {
            CheckboxState::Todo => Checkbox::OPEN_BOX,
            CheckboxState::Done => Checkbox::DONE_BOX,
        }
    }
}

/// Leading task marker: one or more `{`, `[[TODO]]` or `[[DONE]]`, one or more `}`.
pub struct Checkbox;

impl Checkbox {
    pub const BRACE_OPEN: u8 = b'{';
    pub const BRACE_CLOSE: u8 = b'}';
    pub const TODO: &'static [u8] = b"[[TODO]]";
    pub const DONE: &'static [u8] = b"[[DONE]]";
    pub const OPEN_BOX: &'static str = "[ ]";
    pub const DONE_BOX: &'static str = "[x]";

    /// Matches a checkbox marker at the very start of `s`.
    pub fn parse_leading(s: &str) -> Option<(CheckboxState, Span)> {
        let mut cur = Cursor::at(s, 0);
        if cur.peek() != Some(Self::BRACE_OPEN) {
            return None;
        }
        while cur.peek() == Some(Self::BRACE_OPEN) {
            cur.bump();
        }

        let state = if cur.eat(Self::TODO) {
            CheckboxState::Todo
        } else if cur.eat(Self::DONE) {
            CheckboxState::Done
        } else {
            return None;
        };

        if cur.peek() != Some(Self::BRACE_CLOSE) {
            return None;
        }
        while cur.peek() == Some(Self::BRACE_CLOSE) {
            cur.bump();
        }

        Some((
            state,
            Span {
                start: 0,
                end: cur.pos(),
            },
        ))
    }

    /// Replaces a leading checkbox marker with its Markdown form.
    pub fn translate(s: &str) -> String {
        match Self::parse_leading(s) {
            Some((state, span)) => format!("{}{}", state.markdown(), &s[span.end..]),
            None => s.to_string(),
        }
    }
}
