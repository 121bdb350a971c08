use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unsupported export format '{0}': expected 'docx' or 'pdf'")]
    UnsupportedFormat(String),

    #[error("Unknown artifact type '{0}'")]
    UnknownArtifactType(String),
}
