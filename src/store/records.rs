use chrono::{DateTime, Utc};
use pmforge_coerce::{CoerceError, coerce};
use pmforge_types::{ArtifactContent, ArtifactType, ProjectMetadata, StructuredContext};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    #[serde(flatten)]
    pub metadata: ProjectMetadata,
    #[serde(default)]
    pub structured_context: Option<StructuredContext>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(metadata: ProjectMetadata) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            metadata,
            structured_context: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An uploaded source PDF. Its bytes live beside the record, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub id: Uuid,
    pub project_id: Uuid,
    pub file_name: String,
    pub file_size_bytes: u64,
    #[serde(default)]
    pub parsed_text: Option<String>,
    #[serde(default)]
    pub page_count: Option<usize>,
    pub created_at: DateTime<Utc>,
}

/// A generated artifact. At most one exists per project and type.
///
/// Content read back from storage is coerced again for `kind`, so records
/// edited by hand or written by older versions still load as strict shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredArtifact")]
pub struct ArtifactRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    #[serde(rename = "type")]
    pub kind: ArtifactType,
    pub content: ArtifactContent,
    #[serde(default)]
    pub observations: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct StoredArtifact {
    id: Uuid,
    project_id: Uuid,
    #[serde(rename = "type")]
    kind: ArtifactType,
    content: serde_json::Value,
    #[serde(default)]
    observations: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoredArtifact> for ArtifactRecord {
    type Error = CoerceError;

    fn try_from(stored: StoredArtifact) -> Result<Self, Self::Error> {
        let content = coerce(stored.kind, &stored.content)?;
        Ok(ArtifactRecord {
            id: stored.id,
            project_id: stored.project_id,
            kind: stored.kind,
            content,
            observations: stored.observations,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }
}
