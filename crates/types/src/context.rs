use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of source document the structured context was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Contract,
    Sow,
    Rfp,
    Annex,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Contract,
        DocumentType::Sow,
        DocumentType::Rfp,
        DocumentType::Annex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Contract => "contract",
            DocumentType::Sow => "sow",
            DocumentType::Rfp => "rfp",
            DocumentType::Annex => "annex",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

/// Delivery methodology chosen for the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Methodology {
    #[default]
    Predictivo,
    Agil,
    Hibrido,
}

impl Methodology {
    pub fn as_str(self) -> &'static str {
        match self {
            Methodology::Predictivo => "predictivo",
            Methodology::Agil => "agil",
            Methodology::Hibrido => "hibrido",
        }
    }
}

impl fmt::Display for Methodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Methodology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "predictivo" | "predictive" => Ok(Methodology::Predictivo),
            "agil" | "ágil" | "agile" => Ok(Methodology::Agil),
            "hibrido" | "híbrido" | "hybrid" => Ok(Methodology::Hibrido),
            other => Err(format!("unknown methodology '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextDeliverable {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub evidence: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRisk {
    pub description: String,
    #[serde(default)]
    pub evidence: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStakeholder {
    pub role: String,
    pub interest: String,
    #[serde(default)]
    pub evidence: String,
}

/// Structured view of a contract, SoW or RFP, extracted by the model from the
/// document text. Artifact generation works from this instead of raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredContext {
    pub project_name: String,
    pub document_type: DocumentType,
    pub language: Language,
    pub scope_summary: String,
    pub deliverables: Vec<ContextDeliverable>,
    pub obligations: Vec<String>,
    pub sla: Vec<String>,
    pub penalties: Vec<String>,
    pub milestones: Vec<String>,
    pub payment_terms: Vec<String>,
    pub constraints: Vec<String>,
    pub assumptions: Vec<String>,
    pub risks_raw: Vec<RawRisk>,
    pub stakeholders_raw: Vec<RawStakeholder>,
}

/// Project facts entered by the user, sent alongside the context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub industry: String,
    pub duration_estimate: String,
    pub budget_estimate: String,
    pub methodology: Methodology,
}
