//! Text extraction from uploaded resume documents.
//!
//! The output contract is the same for both kinds: visible text in reading order.
//! PDF page texts are concatenated as the PDF library returns them; DOCX paragraphs
//! are joined with `\n`. No other whitespace normalization is applied.

use std::path::Path;

use thiserror::Error;

pub mod docx;
pub mod pdf;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("DOCX parse error: {0}")]
    Docx(String),

    #[error("document contains no extractable text")]
    NoExtractableText,
}

/// The two document kinds accepted for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Determines the kind from the filename suffix, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            _ => Err(ExtractionError::UnsupportedFileType(filename.to_string())),
        }
    }
}

/// Extracts the visible text of `bytes` as a document of the given kind.
///
/// Whitespace-only results are reported as `NoExtractableText` rather than
/// returned, so callers can tell an empty document from a broken one.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
    let text = match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(bytes)?,
        DocumentKind::Docx => docx::extract_docx_text(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::NoExtractableText);
    }
    Ok(text)
}
