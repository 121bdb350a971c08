use crate::error::StoreError;
use crate::store::backend::{RecordStore, sort_artifacts, sort_documents, sort_projects};
use crate::store::records::{ArtifactRecord, Project, SourceDocument};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    projects: HashMap<Uuid, Project>,
    documents: HashMap<Uuid, SourceDocument>,
    files: HashMap<Uuid, Vec<u8>>,
    artifacts: HashMap<Uuid, ArtifactRecord>,
}

/// In-memory store for tests and throwaway runs.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put_project(&self, project: &Project) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .projects
            .insert(project.id, project.clone());
        Ok(())
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> =
            self.tables.read().await.projects.values().cloned().collect();
        sort_projects(&mut projects);
        Ok(projects)
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.projects.remove(&id).is_none() {
            return Ok(false);
        }
        let documents: Vec<Uuid> = tables
            .documents
            .values()
            .filter(|d| d.project_id == id)
            .map(|d| d.id)
            .collect();
        for document_id in documents {
            tables.documents.remove(&document_id);
            tables.files.remove(&document_id);
        }
        tables.artifacts.retain(|_, a| a.project_id != id);
        Ok(true)
    }

    async fn put_document(&self, document: &SourceDocument) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .documents
            .insert(document.id, document.clone());
        Ok(())
    }

    async fn list_documents(&self, project_id: Uuid) -> Result<Vec<SourceDocument>, StoreError> {
        let mut documents: Vec<SourceDocument> = self
            .tables
            .read()
            .await
            .documents
            .values()
            .filter(|d| d.project_id == project_id)
            .cloned()
            .collect();
        sort_documents(&mut documents);
        Ok(documents)
    }

    async fn put_file(&self, document_id: Uuid, bytes: &[u8]) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .files
            .insert(document_id, bytes.to_vec());
        Ok(())
    }

    async fn get_file(&self, document_id: Uuid) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.tables.read().await.files.get(&document_id).cloned())
    }

    async fn put_artifact(&self, artifact: &ArtifactRecord) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.artifacts.retain(|id, a| {
            *id == artifact.id || a.project_id != artifact.project_id || a.kind != artifact.kind
        });
        tables.artifacts.insert(artifact.id, artifact.clone());
        Ok(())
    }

    async fn get_artifact(&self, id: Uuid) -> Result<Option<ArtifactRecord>, StoreError> {
        Ok(self.tables.read().await.artifacts.get(&id).cloned())
    }

    async fn list_artifacts(&self, project_id: Uuid) -> Result<Vec<ArtifactRecord>, StoreError> {
        let mut artifacts: Vec<ArtifactRecord> = self
            .tables
            .read()
            .await
            .artifacts
            .values()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect();
        sort_artifacts(&mut artifacts);
        Ok(artifacts)
    }
}
