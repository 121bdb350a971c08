mod common;

use common::{GeneratedPdf, ScriptedClient, TestResult, init_logging, sample_pdf};
use pmforge::{
    ArtifactContent, ArtifactType, ArtifactUpdate, FilesystemStore, IngestConfig, MemoryStore,
    Methodology, ProjectMetadata, ProjectService, ProjectUpdate, RecordStore, ServiceError,
};
use pmforge_llm::{LlmClient, STRUCTURE_PROMPT};
use pmforge_types::{DocumentType, FormatError};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

const STRUCTURED: &str = r#"```json
{"project_name": "Billing", "document_type": "RFP", "language": "en",
 "scope_summary": "Replace the billing system", "sla": ["99.5% uptime"]}
```"#;

const RISKS: &str = r#"{"risks": [
  {"id": 1, "description": "Vendor delay", "probability": "alta", "impact": "alto", "severity": "critico"},
  {"description": "Data loss"}
]}"#;

fn metadata(name: &str) -> ProjectMetadata {
    ProjectMetadata {
        name: name.to_string(),
        industry: "Utilities".to_string(),
        duration_estimate: "6 months".to_string(),
        budget_estimate: "200k".to_string(),
        methodology: Methodology::Hibrido,
    }
}

fn service_with(
    store: Arc<dyn RecordStore>,
    client: Option<Arc<ScriptedClient>>,
    limits: IngestConfig,
) -> ProjectService {
    let llm = client.map(|c| c as Arc<dyn LlmClient>);
    ProjectService::new(store, llm, limits)
}

fn risks(content: &ArtifactContent) -> &pmforge_types::RiskRegister {
    match content {
        ArtifactContent::RiskRegister(register) => register,
        other => panic!("expected a risk register, got {:?}", other),
    }
}

#[tokio::test]
async fn test_full_flow_in_memory() -> TestResult {
    init_logging();

    let client = Arc::new(ScriptedClient::new(&[STRUCTURED, RISKS, RISKS]));
    let service = service_with(
        Arc::new(MemoryStore::new()),
        Some(client.clone()),
        IngestConfig::default(),
    );

    let project = service.create_project(metadata("  Billing revamp ")).await?;
    assert_eq!(project.metadata.name, "Billing revamp");

    let pdf = sample_pdf(&["The supplier shall replace the billing system."]);
    let document = service
        .attach_document(project.id, "RFP billing (final).pdf", &pdf)
        .await?;
    assert_eq!(document.file_name, "RFP_billing__final_.pdf");
    assert_eq!(document.file_size_bytes, pdf.len() as u64);

    let outcome = service.process_document(project.id).await?;
    assert_eq!(outcome.page_count, 1);
    assert!(outcome.text_length > 0);

    let stored = service.list_documents(project.id).await?;
    assert_eq!(stored[0].page_count, Some(1));
    assert!(
        stored[0]
            .parsed_text
            .as_deref()
            .is_some_and(|t| t.contains("replace the billing system"))
    );

    let project = service.get_project(project.id).await?;
    let context = project.structured_context.as_ref().ok_or("no context")?;
    assert_eq!(context.project_name, "Billing");
    assert_eq!(context.document_type, DocumentType::Rfp);
    assert_eq!(context.sla, vec!["99.5% uptime"]);
    {
        let calls = client.calls.lock().unwrap();
        assert_eq!(calls[0].0, STRUCTURE_PROMPT);
        assert!(calls[0].1.contains("Billing revamp"));
    }

    let first = service
        .generate_artifact(project.id, ArtifactType::RiskRegister)
        .await?;
    assert_eq!(first.kind, ArtifactType::RiskRegister);
    let register = risks(&first.content);
    assert_eq!(register.risks.len(), 2);
    assert_eq!(register.risks[1].id.to_string(), "2");
    assert_eq!(register.risks[1].status.to_string(), "abierto");

    let edited = service
        .update_artifact(
            first.id,
            ArtifactUpdate {
                content: None,
                observations: Some("  check with legal  ".into()),
            },
        )
        .await?;
    assert_eq!(edited.observations.as_deref(), Some("check with legal"));

    let second = service
        .generate_artifact(project.id, ArtifactType::RiskRegister)
        .await?;
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.observations.as_deref(), Some("check with legal"));
    assert_eq!(service.list_artifacts(project.id).await?.len(), 1);
    assert_eq!(client.call_count(), 3);

    let file = service.export_artifact(second.id, "PDF").await?;
    assert_eq!(file.file_name, "02_Risk-register.pdf");
    let pdf = GeneratedPdf::from_bytes(file.bytes)?;
    assert_pdf_contains_text!(pdf, "Vendor delay");
    assert_pdf_contains_text!(pdf, "Data loss");
    Ok(())
}

#[tokio::test]
async fn test_processing_without_model_stores_stub_context() -> TestResult {
    init_logging();

    let service = service_with(Arc::new(MemoryStore::new()), None, IngestConfig::default());
    assert!(!service.has_model());

    let project = service.create_project(metadata("ERP")).await?;
    service
        .attach_document(project.id, "sow.pdf", &sample_pdf(&["Statement of work"]))
        .await?;
    service.process_document(project.id).await?;

    let project = service.get_project(project.id).await?;
    let context = project.structured_context.ok_or("no context")?;
    assert_eq!(context.project_name, "ERP");
    assert_eq!(context.document_type, DocumentType::Contract);
    assert!(context.deliverables.is_empty());

    let err = service
        .generate_artifact(project.id, ArtifactType::Charter)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ModelUnavailable));
    Ok(())
}

#[tokio::test]
async fn test_generation_requires_context() -> TestResult {
    let client = Arc::new(ScriptedClient::new(&[RISKS]));
    let service = service_with(Arc::new(MemoryStore::new()), Some(client.clone()), IngestConfig::default());
    let project = service.create_project(metadata("Portal")).await?;

    let err = service
        .generate_artifact(project.id, ArtifactType::Wbs)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::MissingContext(id) if id == project.id));
    assert_eq!(client.call_count(), 0);

    let err = service.process_document(project.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NoDocument(_)));
    Ok(())
}

#[tokio::test]
async fn test_malformed_model_reply_is_reported() -> TestResult {
    let client = Arc::new(ScriptedClient::new(&[STRUCTURED, "Sorry, I can't do that."]));
    let service = service_with(Arc::new(MemoryStore::new()), Some(client), IngestConfig::default());
    let project = service.create_project(metadata("Portal")).await?;
    service
        .attach_document(project.id, "rfp.pdf", &sample_pdf(&["Request for proposal"]))
        .await?;
    service.process_document(project.id).await?;

    let err = service
        .generate_artifact(project.id, ArtifactType::Charter)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Malformed model output"), "{err}");
    assert!(service.list_artifacts(project.id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_upload_and_page_limits() -> TestResult {
    init_logging();

    let limits = IngestConfig {
        max_pdf_pages: 1,
        max_stored_text_chars: 10,
        ..IngestConfig::default()
    };
    let service = service_with(Arc::new(MemoryStore::new()), None, limits);
    let project = service.create_project(metadata("Limits")).await?;

    let err = service
        .attach_document(project.id, "notes.txt", b"plain text")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let err = service
        .attach_document(Uuid::new_v4(), "a.pdf", &sample_pdf(&["x"]))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "project", .. }));

    service
        .attach_document(project.id, "short.pdf", &sample_pdf(&["A short contract body"]))
        .await?;
    let outcome = service.process_document(project.id).await?;
    let documents = service.list_documents(project.id).await?;
    let parsed = documents[0].parsed_text.as_deref().unwrap_or_default();
    assert_eq!(parsed.chars().count(), 10);
    assert!(outcome.text_length > 10);

    let long: Vec<String> = (0..150).map(|i| format!("Clause {i}")).collect();
    let refs: Vec<&str> = long.iter().map(String::as_str).collect();
    service
        .attach_document(project.id, "long.pdf", &sample_pdf(&refs))
        .await?;
    let err = service.process_document(project.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::TooManyPages { limit: 1, .. }));
    Ok(())
}

#[tokio::test]
async fn test_project_updates() -> TestResult {
    let service = service_with(Arc::new(MemoryStore::new()), None, IngestConfig::default());
    let project = service.create_project(metadata("")).await?;
    assert_eq!(project.metadata.name, "Untitled project");

    let err = service
        .update_project(project.id, ProjectUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let updated = service
        .update_project(
            project.id,
            ProjectUpdate {
                name: Some("   ".into()),
                budget_estimate: Some(" 1M ".into()),
                methodology: Some(Methodology::Agil),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.metadata.name, "Untitled project");
    assert_eq!(updated.metadata.budget_estimate, "1M");
    assert_eq!(updated.metadata.duration_estimate, "6 months");
    assert_eq!(updated.metadata.methodology, Methodology::Agil);
    assert!(updated.updated_at >= project.updated_at);

    service.delete_project(project.id).await?;
    let err = service.get_project(project.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
    let err = service.delete_project(project.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn test_artifact_edits_are_coerced() -> TestResult {
    let client = Arc::new(ScriptedClient::new(&[STRUCTURED, RISKS]));
    let service = service_with(Arc::new(MemoryStore::new()), Some(client), IngestConfig::default());
    let project = service.create_project(metadata("Edits")).await?;
    service
        .attach_document(project.id, "c.pdf", &sample_pdf(&["Contract"]))
        .await?;
    service.process_document(project.id).await?;
    let artifact = service
        .generate_artifact(project.id, ArtifactType::RiskRegister)
        .await?;

    let err = service
        .update_artifact(artifact.id, ArtifactUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let err = service
        .update_artifact(
            artifact.id,
            ArtifactUpdate { content: Some(json!(["not", "an", "object"])), observations: None },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let edited = service
        .update_artifact(
            artifact.id,
            ArtifactUpdate {
                content: Some(json!({"risks": [{"description": "Only risk", "impact": "ALTO"}]})),
                observations: None,
            },
        )
        .await?;
    let register = risks(&edited.content);
    assert_eq!(register.risks.len(), 1);
    assert_eq!(register.risks[0].description, "Only risk");
    assert_eq!(register.risks[0].impact.to_string(), "alto");
    assert_eq!(register.risks[0].probability.to_string(), "media");
    assert!(edited.updated_at >= artifact.updated_at);

    let err = service
        .update_artifact(Uuid::new_v4(), ArtifactUpdate { observations: Some("x".into()), content: None })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "artifact", .. }));
    Ok(())
}

#[tokio::test]
async fn test_export_format_is_checked_first() {
    let service = service_with(Arc::new(MemoryStore::new()), None, IngestConfig::default());

    let err = service.export_artifact(Uuid::new_v4(), "odt").await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Format(FormatError::UnsupportedFormat(ref f)) if f == "odt"
    ));

    let err = service.export_artifact(Uuid::new_v4(), "docx").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "artifact", .. }));
}

#[tokio::test]
async fn test_filesystem_store_persists_and_cascades() -> TestResult {
    init_logging();

    let dir = tempfile::tempdir()?;
    let client = Arc::new(ScriptedClient::new(&[STRUCTURED, RISKS]));
    let project_id;
    let artifact_id;
    {
        let store = FilesystemStore::new(dir.path()).await?;
        let service = service_with(Arc::new(store), Some(client), IngestConfig::default());
        let project = service.create_project(metadata("Persisted")).await?;
        project_id = project.id;
        service
            .attach_document(project.id, "c.pdf", &sample_pdf(&["Persisted contract"]))
            .await?;
        service.process_document(project.id).await?;
        artifact_id = service
            .generate_artifact(project.id, ArtifactType::RiskRegister)
            .await?
            .id;
    }

    let store = Arc::new(FilesystemStore::new(dir.path()).await?);
    let service = service_with(store.clone(), None, IngestConfig::default());

    let project = service.get_project(project_id).await?;
    assert_eq!(project.metadata.methodology, Methodology::Hibrido);
    assert_eq!(
        project.structured_context.map(|c| c.document_type),
        Some(DocumentType::Rfp)
    );
    let artifact = service.get_artifact(artifact_id).await?;
    assert_eq!(risks(&artifact.content).risks.len(), 2);

    let documents = service.list_documents(project_id).await?;
    assert_eq!(documents.len(), 1);
    assert!(store.get_file(documents[0].id).await?.is_some());

    service.delete_project(project_id).await?;
    assert!(store.get_file(documents[0].id).await?.is_none());
    assert!(store.get_artifact(artifact_id).await?.is_none());
    assert!(store.list_documents(project_id).await?.is_empty());
    assert!(service.list_projects().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_store_keeps_one_artifact_per_type() -> TestResult {
    let dir = tempfile::tempdir()?;
    let stores: Vec<Arc<dyn RecordStore>> = vec![
        Arc::new(MemoryStore::new()),
        Arc::new(FilesystemStore::new(dir.path()).await?),
    ];

    for store in stores {
        let service = service_with(store.clone(), None, IngestConfig::default());
        let project = service.create_project(metadata("Unique")).await?;

        let content = pmforge::coerce(ArtifactType::Wbs, &json!({"phases": []}))?;
        let now = chrono::Utc::now();
        let mut record = pmforge::ArtifactRecord {
            id: Uuid::new_v4(),
            project_id: project.id,
            kind: ArtifactType::Wbs,
            content,
            observations: None,
            created_at: now,
            updated_at: now,
        };
        store.put_artifact(&record).await?;
        record.id = Uuid::new_v4();
        store.put_artifact(&record).await?;

        let artifacts = store.list_artifacts(project.id).await?;
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].id, record.id);
        assert!(
            store
                .find_artifact(project.id, ArtifactType::Wbs)
                .await?
                .is_some()
        );
        assert!(
            store
                .find_artifact(project.id, ArtifactType::Backlog)
                .await?
                .is_none()
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_bad_record_does_not_break_other_projects() -> TestResult {
    init_logging();

    let dir = tempfile::tempdir()?;
    let now = chrono::Utc::now().to_rfc3339();
    let foreign = Uuid::new_v4();
    let broken = json!({
        "id": Uuid::new_v4(), "project_id": foreign, "type": "charter",
        "content": "x", "created_at": now, "updated_at": now
    });
    std::fs::create_dir_all(dir.path().join("artifacts"))?;
    std::fs::write(
        dir.path().join("artifacts").join(format!("{}.json", Uuid::new_v4())),
        serde_json::to_vec(&broken)?,
    )?;
    std::fs::write(dir.path().join("artifacts").join("garbage.json"), b"{not json")?;

    let client = Arc::new(ScriptedClient::new(&[STRUCTURED, RISKS]));
    let store = Arc::new(FilesystemStore::new(dir.path()).await?);
    let service = service_with(store.clone(), Some(client), IngestConfig::default());
    let project = service.create_project(metadata("Clean")).await?;
    service
        .attach_document(project.id, "c.pdf", &sample_pdf(&["Clean contract"]))
        .await?;
    service.process_document(project.id).await?;
    service
        .generate_artifact(project.id, ArtifactType::RiskRegister)
        .await?;

    assert_eq!(service.list_artifacts(project.id).await?.len(), 1);
    assert!(store.list_artifacts(foreign).await?.is_empty());

    // A broken record inside the project is skipped on listing and removed on delete
    let own_broken = dir.path().join("artifacts").join(format!("{}.json", Uuid::new_v4()));
    let mut own = broken.clone();
    own["project_id"] = json!(project.id);
    own["type"] = json!("wbs");
    std::fs::write(&own_broken, serde_json::to_vec(&own)?)?;
    assert_eq!(service.list_artifacts(project.id).await?.len(), 1);

    service.delete_project(project.id).await?;
    assert!(!own_broken.exists());
    assert!(store.list_artifacts(project.id).await?.is_empty());
    assert!(dir.path().join("artifacts").join("garbage.json").exists());
    Ok(())
}
