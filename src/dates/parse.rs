//! Date parsing at two distinct strictness levels.
//!
//! [`parse_date_strict`] accepts only the well-formed shapes the scanner's
//! regexes produce: `dd/mm/yyyy`, `dd-mm-yyyy`, and the Spanish long form
//! `"<dia> de <mes> de <año>"`. [`parse_date_fuzzy`] is the permissive
//! day-first fallback used only by the AI extraction path, which receives
//! less-structured entity spans. The two are deliberately separate operations:
//! merging them would let the scanner path silently accept ambiguous input
//! (e.g. a month/day swap) that strict parsing is meant to reject.

use chrono::NaiveDate;

use crate::error::DateError;

/// Spanish month names in calendar order, lowercase.
///
/// Lookup is exact-match: the scanner lower-cases its input before matching,
/// so an unexpected casing or spelling fails the lookup and the candidate is
/// dropped upstream.
pub const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Separators tried in order for numeric dates.
const NUMERIC_SEPARATORS: [char; 2] = ['/', '-'];

/// Look up a lowercase Spanish month name, 1-based.
fn month_number(name: &str) -> Option<u32> {
    SPANISH_MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

/// Parse a trimmed date-like string into a calendar date.
///
/// Strings containing `/` or `-` are parsed as day/month/year with either
/// separator, first successful format wins. Anything else is treated as the
/// long form and parsed positionally: token 0 is the day, token 2 the month
/// name, token 4 the year, with exactly five tokens required.
pub fn parse_date_strict(input: &str) -> Result<NaiveDate, DateError> {
    let s = input.trim();

    let unparsable = || DateError::Unparsable { input: s.to_string() };

    if s.contains('/') || s.contains('-') {
        // Day/month/year with either separator; 1-2 digit day and month,
        // exactly four-digit year (chrono's %Y is laxer than the contract,
        // so field widths are checked by hand).
        for sep in NUMERIC_SEPARATORS {
            let parts: Vec<&str> = s.split(sep).collect();
            if parts.len() != 3 {
                continue;
            }
            let [day, month, year] = [parts[0], parts[1], parts[2]];
            if !(1..=2).contains(&day.len())
                || !(1..=2).contains(&month.len())
                || year.len() != 4
                || !parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit()))
            {
                continue;
            }
            let (Ok(day), Ok(month), Ok(year)) =
                (day.parse::<u32>(), month.parse::<u32>(), year.parse::<i32>())
            else {
                continue;
            };
            return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(unparsable);
        }
        return Err(unparsable());
    }

    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.len() != 5 || tokens[1] != "de" || tokens[3] != "de" {
        return Err(unparsable());
    }

    let day: u32 = tokens[0].parse().map_err(|_| unparsable())?;
    let month = month_number(tokens[2]).ok_or_else(unparsable)?;
    let year: i32 = tokens[4].parse().map_err(|_| unparsable())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(unparsable)
}

/// Permissive day-first parse for AI-extracted entity spans.
///
/// Tries the strict parser first, then looks for a date embedded anywhere in
/// the span, then falls back to day-first numeric forms with two-digit years.
/// Only the NER path calls this; the regex scanner never does.
pub fn parse_date_fuzzy(input: &str) -> Option<NaiveDate> {
    let s = input.trim().to_lowercase();

    if let Ok(date) = parse_date_strict(&s) {
        return Some(date);
    }

    // Entity spans often wrap a date in prose ("el 12 de marzo de 2026").
    if let Some(date) = super::scan::first_date(&s) {
        return Some(date);
    }

    const LOOSE_FORMATS: [&str; 4] = ["%d/%m/%y", "%d-%m-%y", "%d.%m.%Y", "%d.%m.%y"];
    LOOSE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&s, fmt).ok())
}
