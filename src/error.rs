use pmforge_coerce::CoerceError;
use pmforge_llm::LlmError;
use pmforge_render_core::RenderError;
use pmforge_types::FormatError;
use thiserror::Error;
use uuid::Uuid;

/// Failures of the record store backends.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A comprehensive error type for project and artifact operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Project {0} has no uploaded document")]
    NoDocument(Uuid),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Document has {pages} pages, the limit is {limit}")]
    TooManyPages { pages: usize, limit: usize },

    #[error("Project {0} has no structured context; process a document first")]
    MissingContext(Uuid),

    #[error("No language model is configured")]
    ModelUnavailable,

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Coerce(#[from] CoerceError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Language model step failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Storage failed: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
