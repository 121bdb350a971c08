//! Shared vocabulary for the artifact pipeline.
//!
//! - `ArtifactType`: the five artifact tags and their titles
//! - `ArtifactContent` and the strict shapes it wraps
//! - Closed enumerations (probability, impact, severity, status, influence)
//! - `StructuredContext` and `ProjectMetadata`, the inputs to generation
//! - `ExportFormat` and the export filename mapping

pub mod artifact;
pub mod content;
pub mod context;
pub mod enums;
pub mod error;
pub mod export;

pub use artifact::{ArtifactShape, ArtifactType};
pub use content::{
    ArtifactContent, Charter, CharterStakeholder, Deliverable, Milestone, Risk, RiskRegister,
    RowId, Stakeholder, StakeholderRegister, WbsNode, WorkBreakdown,
};
pub use context::{
    ContextDeliverable, DocumentType, Language, Methodology, ProjectMetadata, RawRisk,
    RawStakeholder, StructuredContext,
};
pub use enums::{ClosedSet, Impact, Influence, Probability, RiskStatus, Severity};
pub use error::FormatError;
pub use export::{ExportFormat, export_base_name, export_filename};
