use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    /// The reply is not parseable JSON, or parses to something other than an object.
    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),
}
