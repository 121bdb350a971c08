//! pmforge: project documents in, PM artifacts out.
//!
//! A project owns uploaded PDFs. Processing the latest one extracts its text
//! and asks a language model for a structured context; from that context the
//! model drafts artifacts, which are coerced into strict shapes, stored, and
//! exported as DOCX or PDF.
//!
//! The pure pieces live in the member crates:
//! - `pmforge_coerce`: untrusted model JSON to strict shapes
//! - `pmforge_render_core`: strict shapes to render blocks
//! - `pmforge_render_docx` and `pmforge_render_lopdf`: render blocks to bytes
//! - `pmforge_llm`: prompts and the chat-completion client

pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod service;
pub mod store;

pub use config::{AppConfig, IngestConfig, LlmConfig, StorageConfig};
pub use error::{Result, ServiceError, StoreError};
pub use export::{ExportedFile, export_artifact};
pub use service::{ArtifactUpdate, ProcessOutcome, ProjectService, ProjectUpdate};
pub use store::{ArtifactRecord, FilesystemStore, MemoryStore, Project, RecordStore, SourceDocument};

pub use pmforge_coerce::{CoerceError, coerce};
pub use pmforge_types::{
    ArtifactContent, ArtifactType, ExportFormat, Methodology, ProjectMetadata, StructuredContext,
};
