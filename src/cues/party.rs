//! Responsible-party ("encargado") detection.

use std::sync::LazyLock;

use regex::Regex;

/// Ordered cascade of responsible-party patterns, first match wins.
///
/// These run over the original-case text — proper names matter — with only
/// the cue words themselves matched case-insensitively. Each pattern's
/// capture group 1 is the party text.
static RESPONSIBLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // "Encargado: Jane Doe" — the rest of the line after the cue word.
        // A closing paren right after the cue means this is the parenthetical
        // form, which belongs to the later patterns.
        r"(?i:encargado)\s*:?\s*([^\r\n)][^\r\n]*)",
        // "Jefe de Laboratorio (función de encargado)" — a jefe phrase
        // qualified by a parenthesized clause containing "encargado".
        r"((?i:jefe)[\w\s.]*?)\((?i:[^)]*encargado[^)]*)\)",
        // "Maria Lopez (encargado)" — a capitalized-word run right before
        // the bare parenthetical.
        r"([A-ZÁÉÍÓÚÑ][\wáéíóúñ.]*(?:\s+[A-ZÁÉÍÓÚÑ][\wáéíóúñ.]*)*)\s*\((?i:encargado)\)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Find the responsible party named in the document, if any.
///
/// Applies the cascade in order and returns the first pattern's first match,
/// trimmed. Returns `None` when no pattern matches.
pub fn find_responsible(text: &str) -> Option<String> {
    RESPONSIBLE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_line() {
        let text = "Documento interno.\nEncargado: Maria Lopez\nGracias.";
        assert_eq!(find_responsible(text), Some("Maria Lopez".to_string()));
    }

    #[test]
    fn labeled_line_without_colon() {
        let text = "encargado Juan Perez";
        assert_eq!(find_responsible(text), Some("Juan Perez".to_string()));
    }

    #[test]
    fn jefe_with_parenthesized_clause() {
        let text = "Responde el Jefe de Laboratorio (actúa como encargado) del área.";
        assert_eq!(
            find_responsible(text),
            Some("Jefe de Laboratorio".to_string())
        );
    }

    #[test]
    fn name_followed_by_parenthetical() {
        let text = "Coordina Maria Lopez (encargado) esta semana.";
        assert_eq!(find_responsible(text), Some("Maria Lopez".to_string()));
    }

    #[test]
    fn first_pattern_takes_precedence() {
        // Both pattern 1 and pattern 3 could fire; the cascade order decides.
        let text = "Encargado: Ana Ruiz\nPedro Gomez (encargado)";
        assert_eq!(find_responsible(text), Some("Ana Ruiz".to_string()));
    }

    #[test]
    fn absent_when_no_pattern_matches() {
        assert_eq!(find_responsible("Circular sin responsables."), None);
    }
}
