//! Dominant-action classification.

use serde::{Deserialize, Serialize};

/// The instructed action a memo asks for. A closed three-way classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Entregar,
    Presentar,
    Tarea,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entregar => write!(f, "Entregar"),
            Self::Presentar => write!(f, "Presentar"),
            Self::Tarea => write!(f, "Tarea"),
        }
    }
}

/// Ordered decision table: first rule whose needle list matches wins.
const ACTION_RULES: [(&[&str], Action); 2] = [
    (&["entregar", "entrega"], Action::Entregar),
    (&["presentar"], Action::Presentar),
];

/// Classify the document's dominant instructed action.
///
/// Evaluated as an ordered cascade over the lower-cased text; documents that
/// match no rule default to [`Action::Tarea`].
pub fn classify_action(text: &str) -> Action {
    let lower = text.to_lowercase();

    ACTION_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, action)| *action)
        .unwrap_or(Action::Tarea)
}
