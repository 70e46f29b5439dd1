//! Subject-line ("Asunto:") detection.

use std::sync::LazyLock;

use regex::Regex;

/// Line-anchored, case-insensitive "asunto" at the start of a line, with an
/// optional `:` or `-`, capturing the remainder of that line.
static RE_SUBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*asunto\s*[:\-]?\s*(.+)$").unwrap());

/// Extract the memo's subject line, if a line starts with "Asunto".
///
/// Only the first matching line counts.
pub fn find_subject(text: &str) -> Option<String> {
    RE_SUBJECT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_with_colon() {
        let text = "MEMORANDO\nAsunto: Entrega de informes finales\nCuerpo.";
        assert_eq!(
            find_subject(text),
            Some("Entrega de informes finales".to_string())
        );
    }

    #[test]
    fn subject_with_dash_and_lowercase() {
        let text = "asunto - reunión de docentes";
        assert_eq!(find_subject(text), Some("reunión de docentes".to_string()));
    }

    #[test]
    fn only_first_matching_line_counts() {
        let text = "Asunto: Primero\nAsunto: Segundo";
        assert_eq!(find_subject(text), Some("Primero".to_string()));
    }

    #[test]
    fn mid_line_mention_does_not_count() {
        let text = "Sobre el asunto: tratado ayer no hay novedad.";
        assert_eq!(find_subject(text), None);
    }

    #[test]
    fn absent_without_subject_line() {
        assert_eq!(find_subject("Sin encabezado alguno."), None);
    }
}
