//! Deadline resolution and agenda scheduling.
//!
//! Two deadline policies live here and must not be conflated:
//!
//! - [`fallback_deadline`] is the simple policy: a detected date passes
//!   through unchanged, no date at all becomes `today + grace period`.
//! - [`resolve_deadline`] is the cue-proximity policy for documents with
//!   several dates, where the true deadline has to be told apart from
//!   incidental dates (issue date, meeting date) by its position relative to
//!   deadline-cue phrases.
//!
//! [`agenda_date`] then derives the earlier reminder date from the deadline.
//! The wall clock is always read by the caller and passed in as `today`, so
//! the fallback defaults are fresh per resolution and the policies stay
//! deterministic under test.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;

use crate::dates::scan_dates;
use crate::error::ConfigError;

/// Grace period in days used when no deadline signal exists.
pub const GRACE_PERIOD_DAYS: u64 = 2;

/// Lead time in days between the agenda reminder and the deadline.
pub const AGENDA_LEAD_DAYS: u64 = 2;

/// Default deadline-cue patterns, matched over lower-cased text.
///
/// "fecha límite" tolerates flexible spacing and the accentless spelling PDF
/// extraction often produces; same for "a más tardar".
pub const DEFAULT_CUE_PATTERNS: [&str; 7] = [
    "hasta",
    r"fecha\s+l[ií]mite",
    "plazo",
    "entregar",
    "entrega",
    r"a\s+m[aá]s\s+tardar",
    r"antes\s+del",
];

static DEFAULT_CUES: LazyLock<CueSet> =
    LazyLock::new(|| CueSet::new(&default_cue_patterns()).unwrap());

/// The default cue patterns as owned strings, for config defaults.
pub fn default_cue_patterns() -> Vec<String> {
    DEFAULT_CUE_PATTERNS.iter().map(|s| s.to_string()).collect()
}

/// A compiled, data-driven set of deadline-cue patterns.
#[derive(Debug)]
pub struct CueSet {
    patterns: Vec<Regex>,
}

impl CueSet {
    /// Compile cue patterns. Each entry is a regular expression applied to
    /// lower-cased text.
    pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::BadPattern {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Offsets of every cue occurrence in the (already lower-cased) text.
    fn occurrences(&self, lower: &str) -> Vec<usize> {
        self.patterns
            .iter()
            .flat_map(|p| p.find_iter(lower).map(|m| m.start()))
            .collect()
    }
}

impl Default for CueSet {
    fn default() -> Self {
        Self::new(&default_cue_patterns()).unwrap()
    }
}

/// Simple fallback policy: keep a detected date, else `today + grace period`.
///
/// Never fails; the user-facing system always has a deadline to display.
pub fn fallback_deadline(detected: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    fallback_deadline_after(detected, today, GRACE_PERIOD_DAYS)
}

/// [`fallback_deadline`] with a configurable grace period.
pub fn fallback_deadline_after(
    detected: Option<NaiveDate>,
    today: NaiveDate,
    grace_days: u64,
) -> NaiveDate {
    detected.unwrap_or_else(|| today + Days::new(grace_days))
}

/// Cue-proximity resolution with the default cue set.
pub fn resolve_deadline(text: &str) -> Option<NaiveDate> {
    resolve_deadline_with(text, &DEFAULT_CUES)
}

/// Pick the most likely deadline among all dates in the document.
///
/// Returns `None` only when the document contains no dates at all. With cue
/// occurrences present, only dates at or after a cue qualify; among
/// qualifying (date, cue) pairs the smallest date-after-cue distance wins.
/// Tie-break is deterministic: dates are walked in scan order and a candidate
/// must be strictly closer to displace the current best, so on equal distance
/// the earliest date in scan order wins. With no cues (or no date following
/// any cue), the latest date in the document is taken as the deadline.
pub fn resolve_deadline_with(text: &str, cues: &CueSet) -> Option<NaiveDate> {
    let dates = scan_dates(text);
    if dates.is_empty() {
        return None;
    }

    let lower = text.to_lowercase();
    let cue_offsets = cues.occurrences(&lower);

    if !cue_offsets.is_empty() {
        let mut best: Option<(usize, NaiveDate)> = None;
        for dm in &dates {
            for &cue in &cue_offsets {
                if dm.offset < cue {
                    continue;
                }
                let distance = dm.offset - cue;
                if best.is_none_or(|(d, _)| distance < d) {
                    best = Some((distance, dm.date));
                }
            }
        }
        if let Some((_, date)) = best {
            return Some(date);
        }
        // Cues exist but every date precedes all of them; fall through to
        // the latest-date policy so a document with dates still resolves.
    }

    dates.iter().map(|dm| dm.date).max()
}

/// Agenda (reminder) date: `deadline − lead time` when a deadline was
/// detected, else `today + grace period`.
///
/// Note the asymmetry with [`fallback_deadline`]: a detected deadline is
/// moved earlier by the lead time here, while the fallback policy returns it
/// unchanged. The no-signal default is the same grace period in both, not
/// the grace period minus the lead.
pub fn agenda_date(detected: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    agenda_date_with(detected, today, GRACE_PERIOD_DAYS, AGENDA_LEAD_DAYS)
}

/// [`agenda_date`] with configurable grace and lead periods.
pub fn agenda_date_with(
    detected: Option<NaiveDate>,
    today: NaiveDate,
    grace_days: u64,
    lead_days: u64,
) -> NaiveDate {
    match detected {
        Some(deadline) => deadline - Days::new(lead_days),
        None => today + Days::new(grace_days),
    }
}
