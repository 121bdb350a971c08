use crate::artifact::ArtifactType;
use crate::error::FormatError;
use std::fmt;
use std::str::FromStr;

/// Output document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docx" => Ok(ExportFormat::Docx),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(FormatError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Base name (no extension) of an exported artifact file.
pub fn export_base_name(kind: ArtifactType) -> &'static str {
    match kind {
        ArtifactType::Charter => "01_Project-Charter",
        ArtifactType::RiskRegister => "02_Risk-register",
        ArtifactType::StakeholderRegister => "03_Stakeholders",
        ArtifactType::Wbs | ArtifactType::Backlog => "04_WBS",
    }
}

pub fn export_filename(kind: ArtifactType, format: ExportFormat) -> String {
    format!("{}.{}", export_base_name(kind), format.extension())
}
