use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("XML generation error: {0}")]
    Xml(String),
    #[error("Archive error: {0}")]
    Archive(String),
    #[error("Table has {cells} cells in row {row} but {headers} headers")]
    RaggedTable { row: usize, cells: usize, headers: usize },
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}
