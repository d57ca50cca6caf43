use chrono::NaiveDate;

use super::RejectReason;
use crate::models::PageKind;
use crate::parsing::kinds::DayPhrase;

/// Title prefix of weekly planning pages.
pub const WEEKLY_PREFIX: &str = "Weekly Plan: ";

const ISO_DATE: &str = "%Y-%m-%d";

/// Classifies a page by its title and returns the title it should be written under.
///
/// Journal titles (`January 5th, 2023`) become `2023-01-05`; weekly plans keep
/// their prefix with the date normalised the same way. A title with anything
/// after the date is an ordinary page.
pub fn classify_title(title: &str) -> Result<(PageKind, String), RejectReason> {
    if let Some(phrase) = DayPhrase::parse(title) {
        let date = phrase
            .to_date()
            .ok_or_else(|| RejectReason::MalformedDate(title.to_string()))?;
        return Ok((PageKind::Daily, iso(date)));
    }

    if let Some(rest) = title.strip_prefix(WEEKLY_PREFIX) {
        let date = parse_week_start(rest)
            .ok_or_else(|| RejectReason::MalformedDate(rest.to_string()))?;
        return Ok((PageKind::Weekly, format!("{WEEKLY_PREFIX}{}", iso(date))));
    }

    Ok((PageKind::Ordinary, title.to_string()))
}

fn parse_week_start(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    match DayPhrase::parse(s) {
        Some(phrase) => phrase.to_date(),
        None => NaiveDate::parse_from_str(s, ISO_DATE).ok(),
    }
}

fn iso(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}
