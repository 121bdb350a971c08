use crate::error::StoreError;
use crate::store::records::{ArtifactRecord, Project, SourceDocument};
use async_trait::async_trait;
use pmforge_types::ArtifactType;
use uuid::Uuid;

/// Persistence for projects, their documents and artifacts.
///
/// Writes replace whole records, so the last write wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert or replace a project
    async fn put_project(&self, project: &Project) -> Result<(), StoreError>;

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    /// All projects, newest first
    async fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    /// Delete a project with its documents, uploaded files and artifacts.
    /// Returns false when the project did not exist.
    async fn delete_project(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn put_document(&self, document: &SourceDocument) -> Result<(), StoreError>;

    /// Documents of a project, newest first
    async fn list_documents(&self, project_id: Uuid) -> Result<Vec<SourceDocument>, StoreError>;

    /// Store the raw bytes of an uploaded document
    async fn put_file(&self, document_id: Uuid, bytes: &[u8]) -> Result<(), StoreError>;

    async fn get_file(&self, document_id: Uuid) -> Result<Option<Vec<u8>>, StoreError>;

    /// Insert or replace an artifact. Any other artifact of the same project
    /// and type is removed.
    async fn put_artifact(&self, artifact: &ArtifactRecord) -> Result<(), StoreError>;

    async fn get_artifact(&self, id: Uuid) -> Result<Option<ArtifactRecord>, StoreError>;

    /// Artifacts of a project in artifact type order
    async fn list_artifacts(&self, project_id: Uuid) -> Result<Vec<ArtifactRecord>, StoreError>;

    async fn find_artifact(
        &self,
        project_id: Uuid,
        kind: ArtifactType,
    ) -> Result<Option<ArtifactRecord>, StoreError> {
        Ok(self
            .list_artifacts(project_id)
            .await?
            .into_iter()
            .find(|a| a.kind == kind))
    }
}

pub(crate) fn type_order(kind: ArtifactType) -> usize {
    ArtifactType::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(ArtifactType::ALL.len())
}

pub(crate) fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

pub(crate) fn sort_documents(documents: &mut [SourceDocument]) {
    documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

pub(crate) fn sort_artifacts(artifacts: &mut [ArtifactRecord]) {
    artifacts.sort_by_key(|a| type_order(a.kind));
}
