//! Keyword and cue scanning over memo text.
//!
//! Four independent scanners, all driven by data-defined pattern lists rather
//! than hard-coded branching:
//!
//! - [`scan_keywords`]: fixed-vocabulary substring hits, vocabulary order.
//! - [`find_responsible`]: ordered regex cascade for the accountable person.
//! - [`find_subject`]: line-anchored "Asunto:" subject extraction.
//! - [`classify_action`]: closed three-way classifier of the instructed action.

mod action;
mod party;
mod subject;

pub use action::{classify_action, Action};
pub use party::find_responsible;
pub use subject::find_subject;

/// Default keyword vocabulary, in priority order.
///
/// Matching is case-insensitive substring; each entry appears at most once in
/// the result regardless of how often it recurs in the text. The tail entries
/// are institution-specific role and honorific strings.
pub const DEFAULT_KEYWORDS: [&str; 17] = [
    "hasta",
    "departamento de",
    "jefe de departamento",
    "jefe de laboratorio",
    "docente",
    "para",
    "entregar",
    "fecha límite",
    "plazo",
    "entrega",
    "asunto",
    "presentar",
    "encargado",
    "rectorado",
    "vicerrectorado",
    "unidad educativa",
    "msc.",
];

/// Scan for vocabulary hits, responsible-party signal first.
///
/// The sub-list of `vocabulary` entries present anywhere in the lower-cased
/// text, in vocabulary-declaration order (not position-in-text order). When a
/// responsible party is detected, the pseudo-keyword `"Encargado: <text>"` is
/// prepended so that signal is always first and never lost among ordinary
/// hits.
pub fn scan_keywords(text: &str, vocabulary: &[String]) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut hits = Vec::new();

    if let Some(responsible) = find_responsible(text) {
        hits.push(format!("Encargado: {responsible}"));
    }

    for word in vocabulary {
        if lower.contains(&word.to_lowercase()) {
            hits.push(word.clone());
        }
    }

    hits
}

/// The default vocabulary as owned strings, for config defaults.
pub fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_in_vocabulary_order_without_duplicates() {
        let text = "Plazo de entrega: 5 dias, favor cumplir el plazo";
        let hits = scan_keywords(text, &default_keywords());
        assert_eq!(hits, vec!["plazo".to_string(), "entrega".to_string()]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let hits = scan_keywords("ENTREGAR HASTA EL VIERNES", &default_keywords());
        assert!(hits.contains(&"hasta".to_string()));
        assert!(hits.contains(&"entregar".to_string()));
    }

    #[test]
    fn responsible_pseudo_keyword_comes_first() {
        let text = "Encargado: Maria Lopez.\nPlazo: mañana.";
        let hits = scan_keywords(text, &default_keywords());
        assert_eq!(hits[0], "Encargado: Maria Lopez.");
        assert!(hits.contains(&"plazo".to_string()));
        // "encargado" the vocabulary entry also matches, later in the list.
        assert!(hits.contains(&"encargado".to_string()));
    }

    #[test]
    fn single_line_responsible_keeps_rest_of_line() {
        let text = "Encargado: Maria Lopez. Plazo: mañana.";
        let hits = scan_keywords(text, &default_keywords());
        assert!(hits[0].starts_with("Encargado: Maria Lopez."));
    }

    #[test]
    fn empty_text_yields_empty() {
        assert!(scan_keywords("", &default_keywords()).is_empty());
    }
}
