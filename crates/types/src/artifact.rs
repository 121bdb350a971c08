use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of management artifact generated for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    Charter,
    RiskRegister,
    StakeholderRegister,
    Wbs,
    Backlog,
}

/// The strict content shape an artifact type is coerced into.
///
/// `Wbs` and `Backlog` share the tree shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactShape {
    Charter,
    RiskRegister,
    StakeholderRegister,
    Tree,
}

impl ArtifactType {
    pub const ALL: [ArtifactType; 5] = [
        ArtifactType::Charter,
        ArtifactType::RiskRegister,
        ArtifactType::StakeholderRegister,
        ArtifactType::Wbs,
        ArtifactType::Backlog,
    ];

    /// The wire tag, e.g. `risk_register`.
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactType::Charter => "charter",
            ArtifactType::RiskRegister => "risk_register",
            ArtifactType::StakeholderRegister => "stakeholder_register",
            ArtifactType::Wbs => "wbs",
            ArtifactType::Backlog => "backlog",
        }
    }

    /// Human-readable document title used as the level-1 heading.
    pub fn title(self) -> &'static str {
        match self {
            ArtifactType::Charter => "Project Charter",
            ArtifactType::RiskRegister => "Risk Register",
            ArtifactType::StakeholderRegister => "Stakeholder Register",
            ArtifactType::Wbs => "WBS",
            ArtifactType::Backlog => "Product Backlog",
        }
    }

    pub fn shape(self) -> ArtifactShape {
        match self {
            ArtifactType::Charter => ArtifactShape::Charter,
            ArtifactType::RiskRegister => ArtifactShape::RiskRegister,
            ArtifactType::StakeholderRegister => ArtifactShape::StakeholderRegister,
            ArtifactType::Wbs | ArtifactType::Backlog => ArtifactShape::Tree,
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactType {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        ArtifactType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| FormatError::UnknownArtifactType(s.to_string()))
    }
}
