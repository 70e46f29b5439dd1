//! Rich diagnostic error types for the plazo analysis engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the plazo engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum PlazoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pdf(#[from] PdfError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ner(#[from] NerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Date errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum DateError {
    #[error("unparsable date: {input:?}")]
    #[diagnostic(
        code(plazo::date::unparsable),
        help(
            "Supported forms are dd/mm/yyyy, dd-mm-yyyy, and the Spanish long \
             form \"<dia> de <mes> de <año>\" with a lowercase month name \
             (enero through diciembre)."
        )
    )]
    Unparsable { input: String },
}

// ---------------------------------------------------------------------------
// PDF errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PdfError {
    #[error("I/O error reading {path}: {source}")]
    #[diagnostic(
        code(plazo::pdf::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF parse error: {message}")]
    #[diagnostic(
        code(plazo::pdf::parse),
        help(
            "The file could not be decoded as a PDF. It may be corrupt, \
             encrypted, or not a PDF at all."
        )
    )]
    Parse { message: String },

    #[error("no extractable text in {origin}")]
    #[diagnostic(
        code(plazo::pdf::empty),
        help(
            "Every page of this document yielded empty text. Scanned PDFs \
             without an OCR text layer cannot be analyzed."
        )
    )]
    EmptyDocument { origin: String },
}

// ---------------------------------------------------------------------------
// NER errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum NerError {
    #[error("no entity-recognition model available")]
    #[diagnostic(
        code(plazo::ner::missing_model),
        help(
            "The AI-assisted extraction path needs a trained model. Point \
             `model_dir` at a directory containing model.onnx and \
             tokenizer.json (and build with the `ner` feature enabled). \
             The rule-based pipeline keeps working without it."
        )
    )]
    MissingModel,

    #[error("NER backend error: {message}")]
    #[diagnostic(
        code(plazo::ner::backend),
        help("The entity-recognition backend failed while processing the document.")
    )]
    Backend { message: String },

    #[error("tokenizer error: {message}")]
    #[diagnostic(
        code(plazo::ner::tokenizer),
        help("The tokenizer.json could not be loaded or failed to encode the text.")
    )]
    Tokenizer { message: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    #[diagnostic(
        code(plazo::config::read),
        help("Check that the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {message}")]
    #[diagnostic(
        code(plazo::config::parse),
        help("The config file is not valid TOML, or has fields of the wrong type.")
    )]
    Parse { message: String },

    #[error("invalid cue pattern {pattern:?}: {message}")]
    #[diagnostic(
        code(plazo::config::bad_pattern),
        help("Cue phrases are regular expressions; check the pattern syntax.")
    )]
    BadPattern { pattern: String, message: String },
}

/// Convenience alias for functions returning plazo results.
pub type PlazoResult<T> = std::result::Result<T, PlazoError>;

/// Convenience alias for NER operations.
pub type NerResult<T> = std::result::Result<T, NerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_error_converts_to_plazo_error() {
        let err = DateError::Unparsable {
            input: "32 de foo de 2026".into(),
        };
        let plazo: PlazoError = err.into();
        assert!(matches!(plazo, PlazoError::Date(DateError::Unparsable { .. })));
    }

    #[test]
    fn ner_error_converts_to_plazo_error() {
        let plazo: PlazoError = NerError::MissingModel.into();
        assert!(matches!(plazo, PlazoError::Ner(NerError::MissingModel)));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = DateError::Unparsable {
            input: "99/99/9999".into(),
        };
        assert!(format!("{err}").contains("99/99/9999"));

        let err = PdfError::EmptyDocument {
            origin: "memo.pdf".into(),
        };
        assert!(format!("{err}").contains("memo.pdf"));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::BadPattern {
            pattern: "fecha\\s+(".into(),
            message: "unclosed group".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("unclosed group"));
    }
}
