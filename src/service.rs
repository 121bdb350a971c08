//! Project workflow: upload, process, generate, edit, export.

use crate::config::IngestConfig;
use crate::error::{Result, ServiceError};
use crate::export::{self, ExportedFile};
use crate::ingest;
use crate::store::{ArtifactRecord, Project, RecordStore, SourceDocument};
use chrono::Utc;
use pmforge_coerce::coerce;
use pmforge_llm::{LlmClient, stub_context};
use pmforge_types::{ArtifactType, ExportFormat, Methodology, ProjectMetadata};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

const UNNAMED_PROJECT: &str = "Untitled project";

/// Partial project update. Fields left as `None` keep their value.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub duration_estimate: Option<String>,
    pub budget_estimate: Option<String>,
    pub methodology: Option<Methodology>,
}

impl ProjectUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.industry.is_none()
            && self.duration_estimate.is_none()
            && self.budget_estimate.is_none()
            && self.methodology.is_none()
    }
}

/// User edit of an artifact. `content` replaces the whole content and is
/// coerced for the artifact's type.
#[derive(Debug, Clone, Default)]
pub struct ArtifactUpdate {
    pub content: Option<serde_json::Value>,
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    pub page_count: usize,
    /// Characters of extracted text, before the storage cap
    pub text_length: usize,
}

pub struct ProjectService {
    store: Arc<dyn RecordStore>,
    llm: Option<Arc<dyn LlmClient>>,
    limits: IngestConfig,
}

impl ProjectService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        llm: Option<Arc<dyn LlmClient>>,
        limits: IngestConfig,
    ) -> Self {
        Self { store, llm, limits }
    }

    pub fn has_model(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn create_project(&self, mut metadata: ProjectMetadata) -> Result<Project> {
        metadata.name = project_name(&metadata.name);
        let project = Project::new(metadata);
        self.store.put_project(&project).await?;
        log::info!("Created project {} ({})", project.id, project.metadata.name);
        Ok(project)
    }

    pub async fn get_project(&self, id: Uuid) -> Result<Project> {
        self.store
            .get_project(id)
            .await?
            .ok_or(ServiceError::NotFound { kind: "project", id })
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.store.list_projects().await?)
    }

    pub async fn update_project(&self, id: Uuid, update: ProjectUpdate) -> Result<Project> {
        if update.is_empty() {
            return Err(ServiceError::InvalidInput(
                "include at least one of name, industry, duration_estimate, budget_estimate or methodology"
                    .into(),
            ));
        }
        let mut project = self.get_project(id).await?;
        let metadata = &mut project.metadata;
        if let Some(name) = update.name {
            metadata.name = project_name(&name);
        }
        if let Some(industry) = update.industry {
            metadata.industry = industry.trim().to_string();
        }
        if let Some(duration) = update.duration_estimate {
            metadata.duration_estimate = duration.trim().to_string();
        }
        if let Some(budget) = update.budget_estimate {
            metadata.budget_estimate = budget.trim().to_string();
        }
        if let Some(methodology) = update.methodology {
            metadata.methodology = methodology;
        }
        project.updated_at = Utc::now();
        self.store.put_project(&project).await?;
        Ok(project)
    }

    pub async fn delete_project(&self, id: Uuid) -> Result<()> {
        if !self.store.delete_project(id).await? {
            return Err(ServiceError::NotFound { kind: "project", id });
        }
        log::info!("Deleted project {}", id);
        Ok(())
    }

    /// Stores an uploaded PDF for a project.
    pub async fn attach_document(
        &self,
        project_id: Uuid,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<SourceDocument> {
        let file_name = ingest::check_upload(file_name, bytes, &self.limits)?;
        self.get_project(project_id).await?;

        let document = SourceDocument {
            id: Uuid::new_v4(),
            project_id,
            file_name,
            file_size_bytes: bytes.len() as u64,
            parsed_text: None,
            page_count: None,
            created_at: Utc::now(),
        };
        self.store.put_file(document.id, bytes).await?;
        self.store.put_document(&document).await?;
        log::info!(
            "Attached {} ({} bytes) to project {}",
            document.file_name,
            document.file_size_bytes,
            project_id
        );
        Ok(document)
    }

    pub async fn list_documents(&self, project_id: Uuid) -> Result<Vec<SourceDocument>> {
        self.get_project(project_id).await?;
        Ok(self.store.list_documents(project_id).await?)
    }

    /// Extracts the latest document of a project and builds its structured
    /// context. Without a model the stub context is stored instead.
    pub async fn process_document(&self, project_id: Uuid) -> Result<ProcessOutcome> {
        let mut project = self.get_project(project_id).await?;
        let mut document = self
            .store
            .list_documents(project_id)
            .await?
            .into_iter()
            .next()
            .ok_or(ServiceError::NoDocument(project_id))?;
        let bytes = self
            .store
            .get_file(document.id)
            .await?
            .ok_or(ServiceError::NotFound { kind: "document file", id: document.id })?;

        let extracted = ingest::extract_text_within(&bytes, self.limits.max_pdf_pages)?;
        let text_length = extracted.text.chars().count();
        log::info!(
            "Extracted {} chars from {} pages of {}",
            text_length,
            extracted.page_count,
            document.file_name
        );

        document.parsed_text = Some(
            ingest::truncate_chars(&extracted.text, self.limits.max_stored_text_chars).to_string(),
        );
        document.page_count = Some(extracted.page_count);
        self.store.put_document(&document).await?;

        let context = match &self.llm {
            Some(client) => {
                log::info!("Structuring document text for project {}", project_id);
                pmforge_llm::structure_document(
                    client.as_ref(),
                    &extracted.text,
                    &project.metadata.name,
                    self.limits.max_context_chars,
                )
                .await?
            }
            None => {
                log::warn!("No model configured; storing a stub context for project {}", project_id);
                stub_context(&project.metadata.name)
            }
        };

        project.structured_context = Some(context);
        project.updated_at = Utc::now();
        self.store.put_project(&project).await?;

        Ok(ProcessOutcome {
            page_count: extracted.page_count,
            text_length,
        })
    }

    /// Generates one artifact from the project's structured context.
    ///
    /// Regenerating a type replaces its content and keeps the artifact's id
    /// and observations.
    pub async fn generate_artifact(
        &self,
        project_id: Uuid,
        kind: ArtifactType,
    ) -> Result<ArtifactRecord> {
        let client = self.llm.as_ref().ok_or(ServiceError::ModelUnavailable)?;
        let project = self.get_project(project_id).await?;
        let context = project
            .structured_context
            .as_ref()
            .ok_or(ServiceError::MissingContext(project_id))?;

        log::info!("Generating {} for project {}", kind, project_id);
        let content =
            pmforge_llm::generate_artifact(client.as_ref(), context, &project.metadata, kind)
                .await?;

        let now = Utc::now();
        let record = match self.store.find_artifact(project_id, kind).await? {
            Some(existing) => ArtifactRecord {
                content,
                updated_at: now,
                ..existing
            },
            None => ArtifactRecord {
                id: Uuid::new_v4(),
                project_id,
                kind,
                content,
                observations: None,
                created_at: now,
                updated_at: now,
            },
        };
        self.store.put_artifact(&record).await?;
        Ok(record)
    }

    pub async fn update_artifact(&self, id: Uuid, update: ArtifactUpdate) -> Result<ArtifactRecord> {
        if update.content.is_none() && update.observations.is_none() {
            return Err(ServiceError::InvalidInput(
                "include content or observations".into(),
            ));
        }
        let mut record = self.get_artifact(id).await?;

        if let Some(content) = &update.content {
            if !content.is_object() {
                return Err(ServiceError::InvalidInput(
                    "artifact content must be a JSON object".into(),
                ));
            }
            record.content = coerce(record.kind, content)?;
        }
        if let Some(observations) = update.observations {
            record.observations = Some(observations.trim().to_string());
        }
        record.updated_at = Utc::now();
        self.store.put_artifact(&record).await?;
        log::info!("Updated {} artifact {}", record.kind, id);
        Ok(record)
    }

    pub async fn get_artifact(&self, id: Uuid) -> Result<ArtifactRecord> {
        self.store
            .get_artifact(id)
            .await?
            .ok_or(ServiceError::NotFound { kind: "artifact", id })
    }

    pub async fn list_artifacts(&self, project_id: Uuid) -> Result<Vec<ArtifactRecord>> {
        self.get_project(project_id).await?;
        Ok(self.store.list_artifacts(project_id).await?)
    }

    /// Renders a stored artifact. The format is validated before anything is
    /// loaded or rendered.
    pub async fn export_artifact(&self, id: Uuid, format: &str) -> Result<ExportedFile> {
        let format: ExportFormat = format.parse()?;
        let record = self.get_artifact(id).await?;
        Ok(export::export_artifact(record.kind, &record.content, format)?)
    }
}

fn project_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        UNNAMED_PROJECT.to_string()
    } else {
        name.to_string()
    }
}
