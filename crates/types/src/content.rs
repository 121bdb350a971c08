//! Strict artifact shapes.
//!
//! Every value of these types is fully populated: lists are present (possibly
//! empty), enums hold a member of their closed set, row ids are numbers.

use crate::artifact::ArtifactShape;
use crate::enums::{Impact, Influence, Probability, RiskStatus, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric row id. Kept exactly as the model sent it, so `3` stays `3` and
/// `2.5` stays `2.5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub serde_json::Number);

impl RowId {
    /// Id derived from a 1-based list position.
    pub fn from_position(position: usize) -> Self {
        RowId(serde_json::Number::from(position as u64))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deliverable {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_estimate: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharterStakeholder {
    pub role: String,
    pub responsibility: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Charter {
    pub project_name: String,
    pub scope_summary: String,
    pub objectives: Vec<String>,
    pub deliverables: Vec<Deliverable>,
    pub milestones: Vec<Milestone>,
    pub constraints: Vec<String>,
    pub assumptions: Vec<String>,
    pub budget_summary: String,
    pub duration_summary: String,
    pub stakeholders: Vec<CharterStakeholder>,
    pub approval_criteria: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: RowId,
    pub description: String,
    pub probability: Probability,
    pub impact: Impact,
    pub severity: Severity,
    pub mitigation: String,
    pub owner: String,
    pub status: RiskStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskRegister {
    pub risks: Vec<Risk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub id: RowId,
    pub name_role: String,
    pub interest: String,
    pub influence: Influence,
    pub engagement_strategy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StakeholderRegister {
    pub stakeholders: Vec<Stakeholder>,
}

/// One node of a WBS or backlog forest. Each node owns its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WbsNode {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WbsNode>,
}

impl WbsNode {
    /// Outline label, `"{id} {name}"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.id, self.name)
    }
}

/// Work breakdown structure or product backlog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkBreakdown {
    pub phases: Vec<WbsNode>,
}

/// The strict content of any artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArtifactContent {
    Charter(Charter),
    RiskRegister(RiskRegister),
    StakeholderRegister(StakeholderRegister),
    Tree(WorkBreakdown),
}

impl ArtifactContent {
    pub fn shape(&self) -> ArtifactShape {
        match self {
            ArtifactContent::Charter(_) => ArtifactShape::Charter,
            ArtifactContent::RiskRegister(_) => ArtifactShape::RiskRegister,
            ArtifactContent::StakeholderRegister(_) => ArtifactShape::StakeholderRegister,
            ArtifactContent::Tree(_) => ArtifactShape::Tree,
        }
    }

    /// The JSON form used for storage and for user edits.
    pub fn to_value(&self) -> serde_json::Value {
        // Serializing plain structs of strings, numbers and enums cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
