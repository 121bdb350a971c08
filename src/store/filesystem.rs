use crate::error::StoreError;
use crate::store::backend::{RecordStore, sort_artifacts, sort_documents, sort_projects};
use crate::store::records::{ArtifactRecord, Project, SourceDocument};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const PROJECTS: &str = "projects";
const DOCUMENTS: &str = "documents";
const ARTIFACTS: &str = "artifacts";
const FILES: &str = "files";

/// Filesystem-based store: one pretty-printed JSON file per record.
///
/// ```text
/// <base>/projects/<id>.json
/// <base>/documents/<id>.json
/// <base>/artifacts/<id>.json
/// <base>/files/<document id>.pdf
/// ```
pub struct FilesystemStore {
    base_path: PathBuf,
}

impl FilesystemStore {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_path = base_path.into();
        for dir in [PROJECTS, DOCUMENTS, ARTIFACTS, FILES] {
            tokio::fs::create_dir_all(base_path.join(dir)).await?;
        }
        log::debug!("Record store at {}", base_path.display());
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn record_path(&self, dir: &str, id: Uuid) -> PathBuf {
        self.base_path.join(dir).join(format!("{id}.json"))
    }

    fn file_path(&self, document_id: Uuid) -> PathBuf {
        self.base_path.join(FILES).join(format!("{document_id}.pdf"))
    }

    async fn write_record<T: Serialize + Sync>(
        &self,
        dir: &str,
        id: Uuid,
        record: &T,
    ) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(record)?;
        write_atomic(&self.record_path(dir, id), &bytes).await
    }

    async fn read_record<T: DeserializeOwned>(
        &self,
        dir: &str,
        id: Uuid,
    ) -> Result<Option<T>, StoreError> {
        match tokio::fs::read(self.record_path(dir, id)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Raw JSON of every record in `dir` owned by `project_id`, keyed by path.
    ///
    /// Filtering happens on the raw value, before any decoding. Files that
    /// are not valid JSON are skipped.
    async fn scan(
        &self,
        dir: &str,
        project_id: Option<Uuid>,
    ) -> Result<Vec<(PathBuf, Value)>, StoreError> {
        let mut records = Vec::new();
        let mut entries = tokio::fs::read_dir(self.base_path.join(dir)).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let value: Value = match tokio::fs::read(&path).await {
                Ok(bytes) => match serde_json::from_slice(&bytes) {
                    Ok(value) => value,
                    Err(e) => {
                        log::warn!("Skipping {}: {e}", path.display());
                        continue;
                    }
                },
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            if project_id.is_some_and(|id| raw_uuid(&value, "project_id") != Some(id)) {
                continue;
            }
            records.push((path, value));
        }
        Ok(records)
    }

    /// Decodes scanned records, dropping the ones that fail with a warning.
    async fn read_all<T: DeserializeOwned>(
        &self,
        dir: &str,
        project_id: Option<Uuid>,
    ) -> Result<Vec<T>, StoreError> {
        let records = self
            .scan(dir, project_id)
            .await?
            .into_iter()
            .filter_map(|(path, value)| match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping unreadable record {}: {e}", path.display());
                    None
                }
            })
            .collect();
        Ok(records)
    }

    async fn remove(&self, path: &Path) -> Result<(), StoreError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn raw_uuid(value: &Value, field: &str) -> Option<Uuid> {
    value
        .get(field)
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
}

/// Writes to a sibling temp file, then renames it over `path`.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl RecordStore for FilesystemStore {
    async fn put_project(&self, project: &Project) -> Result<(), StoreError> {
        self.write_record(PROJECTS, project.id, project).await
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        self.read_record(PROJECTS, id).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> = self.read_all(PROJECTS, None).await?;
        sort_projects(&mut projects);
        Ok(projects)
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, StoreError> {
        let path = self.record_path(PROJECTS, id);
        if !tokio::fs::try_exists(&path).await? {
            return Ok(false);
        }
        for (record, value) in self.scan(DOCUMENTS, Some(id)).await? {
            if let Some(document_id) = raw_uuid(&value, "id") {
                self.remove(&self.file_path(document_id)).await?;
            }
            self.remove(&record).await?;
        }
        for (record, _) in self.scan(ARTIFACTS, Some(id)).await? {
            self.remove(&record).await?;
        }
        self.remove(&path).await?;
        Ok(true)
    }

    async fn put_document(&self, document: &SourceDocument) -> Result<(), StoreError> {
        self.write_record(DOCUMENTS, document.id, document).await
    }

    async fn list_documents(&self, project_id: Uuid) -> Result<Vec<SourceDocument>, StoreError> {
        let mut documents: Vec<SourceDocument> =
            self.read_all(DOCUMENTS, Some(project_id)).await?;
        sort_documents(&mut documents);
        Ok(documents)
    }

    async fn put_file(&self, document_id: Uuid, bytes: &[u8]) -> Result<(), StoreError> {
        write_atomic(&self.file_path(document_id), bytes).await
    }

    async fn get_file(&self, document_id: Uuid) -> Result<Option<Vec<u8>>, StoreError> {
        match tokio::fs::read(self.file_path(document_id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put_artifact(&self, artifact: &ArtifactRecord) -> Result<(), StoreError> {
        let own = self.record_path(ARTIFACTS, artifact.id);
        for (path, value) in self.scan(ARTIFACTS, Some(artifact.project_id)).await? {
            let same_kind =
                value.get("type").and_then(Value::as_str) == Some(artifact.kind.as_str());
            if same_kind && path != own {
                log::debug!("Replacing {} artifact at {}", artifact.kind, path.display());
                self.remove(&path).await?;
            }
        }
        self.write_record(ARTIFACTS, artifact.id, artifact).await
    }

    async fn get_artifact(&self, id: Uuid) -> Result<Option<ArtifactRecord>, StoreError> {
        self.read_record(ARTIFACTS, id).await
    }

    async fn list_artifacts(&self, project_id: Uuid) -> Result<Vec<ArtifactRecord>, StoreError> {
        let mut artifacts: Vec<ArtifactRecord> =
            self.read_all(ARTIFACTS, Some(project_id)).await?;
        sort_artifacts(&mut artifacts);
        Ok(artifacts)
    }
}
