//! Plain-text extraction from the master résumé PDF.

use std::panic;

use crate::errors::AppError;

/// Turns a stored document into plain text. Pure and synchronous; callers run
/// it off the async executor.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, AppError>;
}

/// Master résumés are PDFs.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, AppError> {
        extract_resume_text(bytes)
    }
}

/// Extracts the text layer of a PDF held in memory.
///
/// The PDF parser can panic on some corrupt inputs; that is reported as an
/// extraction failure like any other unreadable document.
pub fn extract_resume_text(bytes: &[u8]) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Extraction("document is empty".to_string()));
    }

    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(AppError::Extraction(format!("PDF extraction error: {e}"))),
        Err(_) => Err(AppError::Extraction(
            "PDF parser aborted on malformed document".to_string(),
        )),
    }
}
