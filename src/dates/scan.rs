//! Date scanning over document text.
//!
//! Finds every date-shaped substring together with its character offset in a
//! lower-cased copy of the document. Offsets from this module and cue offsets
//! used by the deadline resolver refer to the same normalized text, so the
//! proximity arithmetic downstream stays aligned.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::parse::parse_date_strict;

static RE_DATE_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{4}").unwrap());

static RE_DATE_LONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}\s+de\s+[a-zA-Z]+\s+de\s+\d{4}").unwrap());

/// The two date shapes, tried in declaration order.
static DATE_PATTERNS: [&LazyLock<Regex>; 2] = [&RE_DATE_NUMERIC, &RE_DATE_LONG];

/// A parsed date and its byte offset in the lower-cased scan text.
///
/// The pairing matters: the deadline resolver measures distances between
/// these offsets and cue-phrase offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMatch {
    pub date: NaiveDate,
    pub offset: usize,
}

/// Scan the document for all dates, in scan order.
///
/// Both patterns are applied over a lower-cased copy of the text; every
/// non-overlapping match that survives strict parsing becomes one
/// [`DateMatch`]. Date-shaped substrings that fail validation (bad day,
/// unknown month name) are dropped silently — malformed look-alikes are
/// common false positives and must not abort the scan. Results are ordered
/// by pattern (numeric first), then by position.
pub fn scan_dates(text: &str) -> Vec<DateMatch> {
    let lower = text.to_lowercase();
    let mut matches = Vec::new();

    for pattern in DATE_PATTERNS {
        for m in pattern.find_iter(&lower) {
            if let Ok(date) = parse_date_strict(m.as_str()) {
                matches.push(DateMatch {
                    date,
                    offset: m.start(),
                });
            }
        }
    }

    matches
}

/// Return "the" first date in the document, for callers that want one date.
///
/// Tries the numeric pattern and returns its first parseable match; failing
/// that, the long-form pattern's first parseable match; else `None`.
pub fn first_date(text: &str) -> Option<NaiveDate> {
    let lower = text.to_lowercase();

    for pattern in DATE_PATTERNS {
        if let Some(date) = pattern
            .find_iter(&lower)
            .find_map(|m| parse_date_strict(m.as_str()).ok())
        {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn finds_numeric_dates_with_offsets() {
        let text = "Emitido el 01/01/2026. Entregar hasta el 15/03/2026.";
        let matches = scan_dates(text);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].date, date(2026, 1, 1));
        assert_eq!(matches[0].offset, text.find("01/01").unwrap());
        assert_eq!(matches[1].date, date(2026, 3, 15));
        assert_eq!(matches[1].offset, text.find("15/03").unwrap());
    }

    #[test]
    fn finds_long_form_dates() {
        let matches = scan_dates("Plazo: 12 de Marzo de 2026.");
        // The scan lower-cases, so the capitalized month still parses.
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].date, date(2026, 3, 12));
    }

    #[test]
    fn mixed_patterns_numeric_first() {
        let matches = scan_dates("el 5 de mayo de 2026 o el 01-02-2026");
        assert_eq!(matches.len(), 2);
        // Scan order: numeric pattern enumerated before long form.
        assert_eq!(matches[0].date, date(2026, 2, 1));
        assert_eq!(matches[1].date, date(2026, 5, 5));
    }

    #[test]
    fn unparsable_matches_are_dropped() {
        // Date-shaped but invalid: month 13 and an unknown month name.
        let matches = scan_dates("el 12/13/2026 y el 3 de brumario de 2026");
        assert!(matches.is_empty());
    }

    #[test]
    fn no_dates_yields_empty() {
        assert!(scan_dates("Sin fechas por aquí.").is_empty());
    }

    #[test]
    fn first_date_prefers_numeric_pattern() {
        let text = "el 5 de mayo de 2026 y luego 01/02/2026";
        assert_eq!(first_date(text), Some(date(2026, 2, 1)));
    }

    #[test]
    fn first_date_falls_back_to_long_form() {
        assert_eq!(
            first_date("reunión el 5 de mayo de 2026"),
            Some(date(2026, 5, 5))
        );
    }

    #[test]
    fn first_date_skips_unparsable() {
        // 99/99/9999 matches the numeric shape but fails validation; the next
        // parseable match wins.
        assert_eq!(
            first_date("el 99/99/9999 y el 02/02/2026"),
            Some(date(2026, 2, 2))
        );
    }

    #[test]
    fn first_date_none_when_empty() {
        assert_eq!(first_date("nada que ver"), None);
    }
}
