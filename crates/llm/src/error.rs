use pmforge_coerce::CoerceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Model API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Model returned no content")]
    EmptyResponse,
    #[error(transparent)]
    Coerce(#[from] CoerceError),
}
