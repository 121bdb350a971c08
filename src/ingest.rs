//! Upload checks and PDF text extraction.

use crate::config::IngestConfig;
use crate::error::{Result, ServiceError};
use lopdf::Document;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Plain text of a PDF, one chunk per page joined by newlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
}

/// Extracts the text of every page.
///
/// A page whose text cannot be decoded contributes an empty string instead
/// of failing the whole document.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText> {
    extract_text_within(bytes, usize::MAX)
}

/// Like [`extract_text`], but fails with `TooManyPages` before any page is
/// read when the document has more than `max_pages` pages.
pub fn extract_text_within(bytes: &[u8], max_pages: usize) -> Result<ExtractedText> {
    let document = load(bytes)?;
    let pages = document.get_pages();
    if pages.len() > max_pages {
        return Err(ServiceError::TooManyPages {
            pages: pages.len(),
            limit: max_pages,
        });
    }
    let page_texts: Vec<String> = pages
        .keys()
        .map(|&number| {
            document.extract_text(&[number]).unwrap_or_else(|e| {
                log::debug!("No text extracted from page {}: {}", number, e);
                String::new()
            })
        })
        .collect();

    Ok(ExtractedText {
        text: page_texts.join("\n"),
        page_count: pages.len(),
    })
}

fn load(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(|e| ServiceError::Extraction(e.to_string()))
}

/// Validates an upload and returns the file name to store it under.
pub fn check_upload(file_name: &str, bytes: &[u8], limits: &IngestConfig) -> Result<String> {
    if bytes.is_empty() {
        return Err(ServiceError::InvalidInput("the PDF file is empty".into()));
    }
    if bytes.len() > limits.max_upload_bytes {
        return Err(ServiceError::InvalidInput(format!(
            "file is {} bytes, the limit is {}",
            bytes.len(),
            limits.max_upload_bytes
        )));
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ServiceError::InvalidInput("only PDF files are accepted".into()));
    }
    Ok(sanitize_file_name(file_name))
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let name: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() {
        "document.pdf".to_string()
    } else {
        name
    }
}

/// The first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
