#![allow(dead_code)]

pub mod assertions;

use async_trait::async_trait;
use lopdf::Document as LopdfDocument;
use pmforge_llm::{LlmClient, LlmError};
use pmforge_render_core::{RenderBlock, write_document};
use pmforge_render_lopdf::LopdfRenderer;
use std::collections::VecDeque;
use std::io::Read;
use std::sync::Mutex;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of every page, one page per line block
    pub fn text(&self) -> String {
        let mut text = String::new();
        for page in self.doc.get_pages().keys() {
            if let Ok(page_text) = self.doc.extract_text(&[*page]) {
                text.push_str(&page_text);
                text.push('\n');
            }
        }
        text
    }
}

/// Reads one part of a DOCX package as a string.
pub fn docx_part(bytes: &[u8], name: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))?;
    let mut part = archive.by_name(name)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// A PDF with one paragraph per entry, for ingestion tests.
pub fn sample_pdf(paragraphs: &[&str]) -> Vec<u8> {
    let blocks: Vec<RenderBlock> = paragraphs
        .iter()
        .map(|p| RenderBlock::Paragraph(p.to_string()))
        .collect();
    write_document(Box::new(LopdfRenderer::new()), "Sample", &blocks)
        .expect("sample PDF renders")
}

/// Model client that replays scripted replies in order.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<String>>,
    pub calls: Mutex<Vec<(String, String, f32)>>,
}

impl ScriptedClient {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete_json(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string(), temperature));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyResponse)
    }
}
