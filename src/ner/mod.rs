//! Model-backed entity extraction fallback.
//!
//! An alternative path to the regex pipeline: when a trained NER model is
//! available, the first person entity becomes the responsible party and the
//! first parseable date entity the deadline candidate. When no model can be
//! loaded the extractor reports [`NerError::MissingModel`] — a structured
//! result, never a panic — and callers skip the AI-derived fields while the
//! rule-based pipeline keeps working.
//!
//! The model handle is an explicit tri-state holder (uninitialized, ready,
//! failed) rather than an implicit global: a failed load is memoized and
//! never retried within the process, and tests can inject a counting loader
//! and reset the state between cases.

#[cfg(feature = "ner")]
pub mod onnx;

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dates::{parse_date_fuzzy, parse_date_strict};
use crate::error::{NerError, NerResult};

/// Entity classes the extractor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Date,
    Other,
}

/// One entity span as returned by a recognizer, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    pub text: String,
    pub label: EntityLabel,
}

/// What the fallback extractor found in one document.
///
/// Either field may be absent without that being an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityExtraction {
    pub responsible: Option<String>,
    pub deadline: Option<chrono::NaiveDate>,
}

/// A named-entity recognizer backend.
///
/// Takes `&mut self` because inference sessions are stateful.
pub trait NerBackend: Send {
    /// Human-readable backend identifier (e.g. "onnx").
    fn backend_id(&self) -> &str;

    /// Recognize entities, in document order.
    fn entities(&mut self, text: &str) -> NerResult<Vec<RecognizedEntity>>;
}

/// Produces a backend on first use. Injectable so tests can observe and
/// control load attempts.
pub trait ModelLoader: Send {
    fn load(&self) -> NerResult<Box<dyn NerBackend>>;
}

/// Memoized model handle: load is attempted at most once per extractor.
enum ModelState {
    Uninitialized,
    Ready(Box<dyn NerBackend>),
    Failed,
}

/// The entity-extraction fallback component.
pub struct EntityExtractor {
    state: Mutex<ModelState>,
    loader: Box<dyn ModelLoader>,
}

impl EntityExtractor {
    /// Build an extractor with an injected loader.
    pub fn new(loader: Box<dyn ModelLoader>) -> Self {
        Self {
            state: Mutex::new(ModelState::Uninitialized),
            loader,
        }
    }

    /// Build an extractor with the default loader for this build.
    ///
    /// With the `ner` feature, loads an ONNX token-classification model from
    /// `model_dir`; without it (or without a directory) the model is simply
    /// unavailable.
    pub fn with_default_loader(model_dir: Option<std::path::PathBuf>) -> Self {
        #[cfg(feature = "ner")]
        if let Some(dir) = model_dir {
            return Self::new(Box::new(onnx::OnnxLoader::new(dir)));
        }
        #[cfg(not(feature = "ner"))]
        let _ = model_dir;
        Self::new(Box::new(UnavailableLoader))
    }

    /// Extract a (responsible party, deadline) pair from the document.
    ///
    /// Walks recognizer entities in their returned order: the first person
    /// entity becomes the responsible party; date entities are fed through a
    /// two-stage parse (strict, then permissive day-first) until one
    /// succeeds. Scanning stops early once both fields are filled.
    pub fn extract(&self, text: &str) -> NerResult<EntityExtraction> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if let ModelState::Uninitialized = *state {
            *state = match self.loader.load() {
                Ok(backend) => ModelState::Ready(backend),
                Err(e) => {
                    warn!(error = %e, "NER model load failed; AI path disabled");
                    ModelState::Failed
                }
            };
        }

        let backend = match &mut *state {
            ModelState::Ready(backend) => backend,
            ModelState::Failed => return Err(NerError::MissingModel),
            ModelState::Uninitialized => unreachable!("state initialized above"),
        };

        let mut result = EntityExtraction::default();
        for entity in backend.entities(text)? {
            match entity.label {
                EntityLabel::Person if result.responsible.is_none() => {
                    result.responsible = Some(entity.text.trim().to_string());
                }
                EntityLabel::Date if result.deadline.is_none() => {
                    result.deadline = parse_date_strict(&entity.text)
                        .ok()
                        .or_else(|| parse_date_fuzzy(&entity.text));
                }
                _ => {}
            }
            if result.responsible.is_some() && result.deadline.is_some() {
                break;
            }
        }

        Ok(result)
    }

    /// Forget the memoized model state. Intended for tests.
    pub fn reset(&self) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = ModelState::Uninitialized;
    }
}

/// Loader for builds or configurations without a model: always unavailable.
pub struct UnavailableLoader;

impl ModelLoader for UnavailableLoader {
    fn load(&self) -> NerResult<Box<dyn NerBackend>> {
        Err(NerError::MissingModel)
    }
}
