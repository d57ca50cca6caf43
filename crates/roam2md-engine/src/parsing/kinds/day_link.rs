use chrono::NaiveDate;

use crate::parsing::cursor::Cursor;

/// Wiki-style day link: `[[<day phrase>]]`.
pub struct DayLink;

impl DayLink {
    pub const OPEN: &'static [u8] = b"[[";
    pub const CLOSE: &'static [u8] = b"]]";
}

/// A prose calendar date such as `January 5th, 2023`.
///
/// Only the shape is checked when scanning; whether the date exists is
/// decided by [`DayPhrase::to_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPhrase {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DayPhrase {
    pub const MONTHS: [&'static str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    pub const ORDINALS: [&'static [u8]; 4] = [b"st", b"nd", b"rd", b"th"];
    pub const YEAR_SEPARATOR: &'static [u8] = b", ";
    const YEAR_DIGITS: usize = 4;

    /// Parses a day phrase at the start of `s`, returning it and the number
    /// of bytes it spans.
    pub fn parse_prefix(s: &str) -> Option<(DayPhrase, usize)> {
        let mut cur = Cursor::at(s, 0);
        Self::parse_at(&mut cur).map(|phrase| (phrase, cur.pos()))
    }

    /// Parses a complete day phrase; trailing text is rejected.
    pub fn parse(s: &str) -> Option<DayPhrase> {
        Self::parse_prefix(s)
            .filter(|(_, len)| *len == s.len())
            .map(|(phrase, _)| phrase)
    }

    /// Parses a day phrase at the cursor, advancing past it on success.
    pub(crate) fn parse_at(cur: &mut Cursor<'_>) -> Option<DayPhrase> {
        let saved = cur.clone();
        let phrase = Self::parse_inner(cur);
        if phrase.is_none() {
            *cur = saved;
        }
        phrase
    }

    fn parse_inner(cur: &mut Cursor<'_>) -> Option<DayPhrase> {
        let month = Self::MONTHS
            .iter()
            .position(|name| cur.starts_with(name.as_bytes()))?;
        cur.bump_n(Self::MONTHS[month].len());
        if !cur.eat(b" ") {
            return None;
        }

        let day_start = cur.pos();
        if cur.bump_digits() == 0 {
            return None;
        }
        // Too many digits to be a day still has the right shape; it just
        // never names a real date.
        let day = cur.s[day_start..cur.pos()].parse().unwrap_or(u32::MAX);

        if !Self::ORDINALS.iter().any(|suffix| cur.eat(suffix)) {
            return None;
        }
        if !cur.eat(Self::YEAR_SEPARATOR) {
            return None;
        }

        let year_start = cur.pos();
        if cur.bump_digits() != Self::YEAR_DIGITS {
            return None;
        }
        let year = cur.s[year_start..cur.pos()].parse().ok()?;

        Some(DayPhrase {
            year,
            month: month as u32 + 1,
            day,
        })
    }

    /// The calendar date, or `None` when the phrase names a day that does not exist.
    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}
