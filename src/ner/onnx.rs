//! ONNX Runtime NER backend.
//!
//! Runs a token-classification model (BIO tagging) exported to ONNX, with a
//! HuggingFace `tokenizers` tokenizer. The model directory must contain
//! `model.onnx` and `tokenizer.json`; an optional `labels.json` (a JSON array
//! of tag strings, index = class id) overrides the default BIO label set.

use std::path::{Path, PathBuf};

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::info;

use crate::error::{NerError, NerResult};

use super::{EntityLabel, ModelLoader, NerBackend, RecognizedEntity};

/// Default BIO tag set for Spanish NER models (WikiNEuRal-style ordering).
const DEFAULT_LABELS: [&str; 9] = [
    "O", "B-PER", "I-PER", "B-ORG", "I-ORG", "B-LOC", "I-LOC", "B-MISC", "I-MISC",
];

/// Maximum token length fed to the model.
const MAX_TOKENS: usize = 512;

fn backend_err(e: impl std::fmt::Display) -> NerError {
    NerError::Backend {
        message: e.to_string(),
    }
}

fn tokenizer_err(e: impl std::fmt::Display) -> NerError {
    NerError::Tokenizer {
        message: e.to_string(),
    }
}

/// Loads [`OnnxNer`] from a model directory on first use.
pub struct OnnxLoader {
    model_dir: PathBuf,
}

impl OnnxLoader {
    pub fn new(model_dir: PathBuf) -> Self {
        Self { model_dir }
    }
}

impl ModelLoader for OnnxLoader {
    fn load(&self) -> NerResult<Box<dyn NerBackend>> {
        Ok(Box::new(OnnxNer::load(&self.model_dir)?))
    }
}

/// Token-classification NER backend over ONNX Runtime.
pub struct OnnxNer {
    session: Session,
    tokenizer: Tokenizer,
    labels: Vec<String>,
}

impl OnnxNer {
    /// Load a model from a directory containing `model.onnx` and
    /// `tokenizer.json`.
    pub fn load(model_dir: &Path) -> NerResult<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() || !tokenizer_path.exists() {
            return Err(NerError::MissingModel);
        }

        let session = Session::builder()
            .map_err(backend_err)?
            .commit_from_file(&model_path)
            .map_err(backend_err)?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(tokenizer_err)?;
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_TOKENS,
                ..Default::default()
            }))
            .map_err(tokenizer_err)?;

        let labels = load_labels(model_dir);

        info!(model = %model_path.display(), classes = labels.len(), "loaded NER model");
        Ok(Self {
            session,
            tokenizer,
            labels,
        })
    }
}

/// Read `labels.json` if present, else the default BIO set.
fn load_labels(model_dir: &Path) -> Vec<String> {
    std::fs::read_to_string(model_dir.join("labels.json"))
        .ok()
        .and_then(|s| serde_json::from_str::<Vec<String>>(&s).ok())
        .unwrap_or_else(|| DEFAULT_LABELS.iter().map(|s| s.to_string()).collect())
}

/// Map a BIO tag's entity type to the labels the extractor understands.
fn entity_label(tag: &str) -> EntityLabel {
    let kind = tag.trim_start_matches("B-").trim_start_matches("I-");
    match kind {
        "PER" | "PERSON" => EntityLabel::Person,
        "DATE" | "TIME" | "FECHA" => EntityLabel::Date,
        _ => EntityLabel::Other,
    }
}

impl NerBackend for OnnxNer {
    fn backend_id(&self) -> &str {
        "onnx"
    }

    fn entities(&mut self, text: &str) -> NerResult<Vec<RecognizedEntity>> {
        let encoding = self.tokenizer.encode(text, true).map_err(tokenizer_err)?;

        let seq_len = encoding.get_ids().len();
        if seq_len == 0 {
            return Ok(Vec::new());
        }

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = encoding
            .get_type_ids()
            .iter()
            .map(|&t| t as i64)
            .collect();

        let shape = [1i64, seq_len as i64];
        let ids_tensor =
            Tensor::from_array((shape, input_ids.into_boxed_slice())).map_err(backend_err)?;
        let mask_tensor =
            Tensor::from_array((shape, attention_mask.into_boxed_slice())).map_err(backend_err)?;
        let type_tensor =
            Tensor::from_array((shape, token_type_ids.into_boxed_slice())).map_err(backend_err)?;

        let outputs = self
            .session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => type_tensor,
            ])
            .map_err(backend_err)?;

        // Logits: [1, seq_len, num_labels].
        let (out_shape, logits) = outputs[0].try_extract_tensor::<f32>().map_err(backend_err)?;
        let dims: &[i64] = out_shape;
        if dims.len() != 3 || dims[1] as usize != seq_len {
            return Err(backend_err(format!("unexpected output shape: {dims:?}")));
        }
        let num_labels = dims[2] as usize;

        // Per-token argmax over the class axis.
        let offsets = encoding.get_offsets();
        let mut entities = Vec::new();
        let mut current: Option<(EntityLabel, usize, usize)> = None;

        for token in 0..seq_len {
            // Special tokens carry a (0, 0) offset; they end any open span.
            let (start, end) = offsets[token];
            let is_special = start == 0 && end == 0 && token != 0;

            let row = &logits[token * num_labels..(token + 1) * num_labels];
            let class = row
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let tag = self.labels.get(class).map(String::as_str).unwrap_or("O");

            let label = entity_label(tag);
            let continues = tag.starts_with("I-");

            if is_special || tag == "O" {
                flush(&mut entities, &mut current, text);
                continue;
            }

            match &mut current {
                Some((open_label, _, open_end)) if continues && *open_label == label => {
                    *open_end = end;
                }
                _ => {
                    flush(&mut entities, &mut current, text);
                    current = Some((label, start, end));
                }
            }
        }
        flush(&mut entities, &mut current, text);

        Ok(entities)
    }
}

/// Close the open span, if any, into the entity list.
fn flush(
    entities: &mut Vec<RecognizedEntity>,
    current: &mut Option<(EntityLabel, usize, usize)>,
    text: &str,
) {
    if let Some((label, start, end)) = current.take() {
        if let Some(span) = text.get(start..end) {
            let span = span.trim();
            if !span.is_empty() {
                entities.push(RecognizedEntity {
                    text: span.to_string(),
                    label,
                });
            }
        }
    }
}
