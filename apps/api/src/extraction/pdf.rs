use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::debug;

use super::ExtractionError;

/// Extracts text from all pages of a PDF held in memory, in page order.
///
/// pdf-extract can panic on malformed input; the panic is caught and reported
/// as a parse error for this document only.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let result = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)));

    match result {
        Ok(Ok(text)) => {
            debug!("PDF extracted: {} bytes -> {} chars", bytes.len(), text.len());
            Ok(text)
        }
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(_) => Err(ExtractionError::Pdf(
            "PDF extraction panicked (malformed PDF)".to_string(),
        )),
    }
}
