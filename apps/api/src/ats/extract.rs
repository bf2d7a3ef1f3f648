use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;

pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Pulls the plain text out of an uploaded PDF resume.
/// Parsing runs on the blocking pool.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<String, AppError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation("Please upload a PDF file".to_string()));
    }

    // The parser can panic on malformed input; a panicked task counts as unreadable.
    let extracted = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| e.to_string())
    .and_then(|r| r);

    match extracted {
        Ok(text) => Ok(normalize(&text)),
        Err(e) => {
            warn!("PDF text extraction failed: {e}");
            Err(AppError::Validation(
                "Could not read text from the PDF".to_string(),
            ))
        }
    }
}

/// Trims each line and collapses runs of blank lines to one.
fn normalize(text: &str) -> String {
    let mut out = Vec::new();
    let mut blank = false;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            if !blank && !out.is_empty() {
                out.push("");
            }
            blank = true;
        } else {
            out.push(line.trim_start());
            blank = false;
        }
    }
    while out.last() == Some(&"") {
        out.pop();
    }
    out.join("\n")
}
