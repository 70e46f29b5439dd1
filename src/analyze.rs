//! Full-document analysis pipeline.
//!
//! Runs the independent scanners (keywords, responsible party, subject,
//! action, dates) over one document, resolves the deadline through the
//! cue-proximity policy with the grace-period fallback, and derives the
//! agenda reminder date. The wall clock is read fresh per invocation, at
//! resolution time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::cues::{classify_action, find_responsible, find_subject, scan_keywords, Action};
use crate::error::ConfigError;
use crate::event::EventSpec;
use crate::resolve::{agenda_date_with, fallback_deadline_after, resolve_deadline_with, CueSet};

/// Everything the engine found in one document.
///
/// `deadline` is always concrete: either the resolved date or the
/// grace-period default. `detected` preserves whether any date signal existed
/// at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Name of the analyzed document (file name or label).
    pub source: String,
    pub keywords: Vec<String>,
    pub responsible: Option<String>,
    pub subject: Option<String>,
    pub action: Action,
    /// The resolved deadline before fallback, if the document had one.
    pub detected: Option<NaiveDate>,
    pub deadline: NaiveDate,
    pub agenda: NaiveDate,
}

impl DocumentAnalysis {
    /// Build the calendar-event spec for this analysis.
    ///
    /// Title is `"<action>: <subject>"` (document name when no subject was
    /// found); the event starts on the agenda date.
    pub fn event_spec(&self) -> EventSpec {
        let topic = self.subject.as_deref().unwrap_or(&self.source);
        let title = format!("{}: {}", self.action, topic);

        let mut description = format!(
            "Documento analizado: {}\nAsunto: {}",
            self.source,
            self.subject.as_deref().unwrap_or("No detectado"),
        );
        if let Some(responsible) = &self.responsible {
            description.push_str("\nEncargado: ");
            description.push_str(responsible);
        }

        EventSpec::new(title, description, self.agenda)
    }
}

/// The analysis engine: configuration plus compiled cue patterns.
pub struct Analyzer {
    config: AnalyzerConfig,
    cues: CueSet,
}

impl Analyzer {
    /// Build an analyzer, compiling the configured cue patterns.
    pub fn new(config: AnalyzerConfig) -> Result<Self, ConfigError> {
        let cues = CueSet::new(&config.cue_phrases)?;
        Ok(Self { config, cues })
    }

    /// Analyzer with the built-in defaults.
    pub fn with_defaults() -> Self {
        Self::new(AnalyzerConfig::default()).expect("default cue patterns compile")
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one document, reading the wall clock now.
    pub fn analyze(&self, source: &str, text: &str) -> DocumentAnalysis {
        self.analyze_at(source, text, chrono::Local::now().date_naive())
    }

    /// Analyze one document against a fixed `today`.
    pub fn analyze_at(&self, source: &str, text: &str, today: NaiveDate) -> DocumentAnalysis {
        let keywords = scan_keywords(text, &self.config.keywords);
        let responsible = find_responsible(text);
        let subject = find_subject(text);
        let action = classify_action(text);

        let detected = resolve_deadline_with(text, &self.cues);
        let deadline =
            fallback_deadline_after(detected, today, self.config.grace_period_days);
        let agenda = agenda_date_with(
            detected,
            today,
            self.config.grace_period_days,
            self.config.agenda_lead_days,
        );

        debug!(
            source,
            keywords = keywords.len(),
            ?detected,
            %deadline,
            %agenda,
            "analyzed document"
        );

        DocumentAnalysis {
            source: source.to_string(),
            keywords,
            responsible,
            subject,
            action,
            detected,
            deadline,
            agenda,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const TODAY: fn() -> NaiveDate = || date(2026, 1, 10);

    const MEMO: &str = "\
MEMORANDO No. 045
Asunto: Entrega de informes finales
Encargado: Maria Lopez

Se comunica a los docentes que los informes del periodo deben entregarse
a más tardar el 15 de marzo de 2026 en el Departamento de Sistemas.
Emitido el 10/01/2026.";

    #[test]
    fn full_pipeline_on_a_memo() {
        let analysis = Analyzer::with_defaults().analyze_at("memo-045.pdf", MEMO, TODAY());

        assert_eq!(analysis.subject.as_deref(), Some("Entrega de informes finales"));
        assert_eq!(analysis.responsible.as_deref(), Some("Maria Lopez"));
        assert_eq!(analysis.action, Action::Entregar);
        assert_eq!(analysis.keywords[0], "Encargado: Maria Lopez");
        assert_eq!(analysis.detected, Some(date(2026, 3, 15)));
        assert_eq!(analysis.deadline, date(2026, 3, 15));
        assert_eq!(analysis.agenda, date(2026, 3, 13));
    }

    #[test]
    fn no_signal_document_gets_grace_defaults() {
        let analysis =
            Analyzer::with_defaults().analyze_at("nota.txt", "Comunicado general.", TODAY());

        assert_eq!(analysis.detected, None);
        assert_eq!(analysis.deadline, date(2026, 1, 12));
        assert_eq!(analysis.agenda, date(2026, 1, 12));
        assert_eq!(analysis.action, Action::Tarea);
    }

    #[test]
    fn event_spec_uses_subject_and_agenda() {
        let analysis = Analyzer::with_defaults().analyze_at("memo-045.pdf", MEMO, TODAY());
        let event = analysis.event_spec();

        assert_eq!(event.title, "Entregar: Entrega de informes finales");
        assert!(event.description.contains("Documento analizado: memo-045.pdf"));
        assert!(event.description.contains("Encargado: Maria Lopez"));
        assert_eq!(event.start.date(), date(2026, 3, 13));
    }

    #[test]
    fn event_spec_falls_back_to_source_name() {
        let analysis =
            Analyzer::with_defaults().analyze_at("nota.txt", "Comunicado general.", TODAY());
        let event = analysis.event_spec();

        assert_eq!(event.title, "Tarea: nota.txt");
        assert!(event.description.contains("Asunto: No detectado"));
    }

    #[test]
    fn custom_grace_period_applies() {
        let config = AnalyzerConfig {
            grace_period_days: 5,
            ..Default::default()
        };
        let analysis = Analyzer::new(config)
            .unwrap()
            .analyze_at("n", "Sin fechas.", TODAY());
        assert_eq!(analysis.deadline, date(2026, 1, 15));
    }

    #[test]
    fn analysis_serializes_to_json() {
        let analysis = Analyzer::with_defaults().analyze_at("memo-045.pdf", MEMO, TODAY());
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"deadline\":\"2026-03-15\""));
        assert!(json.contains("Maria Lopez"));
    }
}
