//! PDF text extraction using the `pdf-extract` crate.
//!
//! Glue between a PDF file and the analysis pipeline: text is reassembled in
//! reading order, one newline between pages, and pages with no extractable
//! text are silently skipped. The core scanners only ever see the decoded
//! string produced here.

use std::path::Path;

use tracing::debug;

use crate::error::PdfError;

/// Extract the concatenated text of a PDF file.
pub fn extract_text(path: &Path) -> Result<String, PdfError> {
    let data = std::fs::read(path).map_err(|source| PdfError::Io {
        path: path.display().to_string(),
        source,
    })?;
    extract_text_from_bytes(&data, &path.display().to_string())
}

/// Extract the concatenated text of a PDF held in memory.
///
/// `origin` names the document in diagnostics (a file name or label).
pub fn extract_text_from_bytes(data: &[u8], origin: &str) -> Result<String, PdfError> {
    let raw = pdf_extract::extract_text_from_mem(data).map_err(|e| PdfError::Parse {
        message: e.to_string(),
    })?;

    // pdf-extract separates pages with form feeds. Join non-empty pages with
    // single newlines, dropping pages that yielded no text.
    let text: String = raw
        .split('\x0C')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        return Err(PdfError::EmptyDocument {
            origin: origin.to_string(),
        });
    }

    debug!(origin, chars = text.len(), "extracted PDF text");
    Ok(text)
}
