//! pmforge command line.
//!
//! ```bash
//! pmforge project create --name "Portal migration" --methodology agil
//! pmforge ingest <project-id> contract.pdf
//! pmforge generate <project-id> risk_register
//! pmforge export <artifact-id> --format pdf --out ./out
//! pmforge render wbs draft.json --format docx
//! ```

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use pmforge::{
    AppConfig, ArtifactType, ArtifactUpdate, ExportFormat, ExportedFile, FilesystemStore,
    Methodology, ProjectMetadata, ProjectService, ProjectUpdate, coerce, export_artifact,
};
use pmforge_llm::LlmClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "pmforge")]
#[command(about = "Generate project management artifacts from contracts, SoWs and RFPs")]
struct Cli {
    /// Configuration file (defaults to $PMFORGE_CONFIG, then ./pmforge.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Upload a PDF to a project and process it
    Ingest {
        project: Uuid,
        pdf: PathBuf,
        /// Only store the file
        #[arg(long)]
        no_process: bool,
    },

    /// Process the latest document of a project again
    Process { project: Uuid },

    /// Generate one artifact from the project's structured context
    Generate {
        project: Uuid,
        #[arg(value_name = "TYPE")]
        kind: ArtifactType,
    },

    /// Replace an artifact's content or observations
    Edit {
        artifact: Uuid,
        /// JSON file holding the new content object
        #[arg(long)]
        content: Option<PathBuf>,
        #[arg(long)]
        observations: Option<String>,
    },

    /// List the artifacts of a project
    Artifacts { project: Uuid },

    /// Print one artifact as JSON
    Show { artifact: Uuid },

    /// Export a stored artifact
    Export {
        artifact: Uuid,
        #[arg(short, long, default_value = "pdf")]
        format: String,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Coerce a JSON file for an artifact type and export it, without a project
    Render {
        #[arg(value_name = "TYPE")]
        kind: ArtifactType,
        json: PathBuf,
        #[arg(short, long, default_value = "pdf")]
        format: ExportFormat,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProjectCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        industry: String,
        #[arg(long, default_value = "")]
        duration: String,
        #[arg(long, default_value = "")]
        budget: String,
        #[arg(long, default_value = "predictivo")]
        methodology: Methodology,
    },
    Update {
        project: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        budget: Option<String>,
        #[arg(long)]
        methodology: Option<Methodology>,
    },
    List,
    Show { project: Uuid },
    Delete { project: Uuid },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Render { kind, json, format, out } => {
            let text = tokio::fs::read_to_string(&json)
                .await
                .with_context(|| format!("reading {}", json.display()))?;
            let content = coerce(kind, text.as_str())?;
            let file = export_artifact(kind, &content, format)?;
            write_export(&out, &file).await
        }
        command => {
            let service = open_service(&config).await?;
            run(&service, command).await
        }
    }
}

async fn open_service(config: &AppConfig) -> anyhow::Result<ProjectService> {
    let store = FilesystemStore::new(&config.storage.path).await?;
    let llm = match config.llm_client()? {
        Some(client) => {
            log::info!("Using model {}", client.model());
            Some(Arc::new(client) as Arc<dyn LlmClient>)
        }
        None => None,
    };
    Ok(ProjectService::new(Arc::new(store), llm, config.ingest.clone()))
}

async fn run(service: &ProjectService, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Project { command } => run_project(service, command).await?,
        Commands::Ingest { project, pdf, no_process } => {
            let bytes = tokio::fs::read(&pdf)
                .await
                .with_context(|| format!("reading {}", pdf.display()))?;
            let file_name = pdf
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let document = service.attach_document(project, &file_name, &bytes).await?;
            println!("document {} ({})", document.id, document.file_name);
            if !no_process {
                let outcome = service.process_document(project).await?;
                println!("{} pages, {} chars", outcome.page_count, outcome.text_length);
            }
        }
        Commands::Process { project } => {
            let outcome = service.process_document(project).await?;
            println!("{} pages, {} chars", outcome.page_count, outcome.text_length);
        }
        Commands::Generate { project, kind } => {
            let artifact = service.generate_artifact(project, kind).await?;
            println!("{} {}", artifact.id, artifact.kind);
        }
        Commands::Edit { artifact, content, observations } => {
            let content = match content {
                Some(path) => {
                    let text = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("reading {}", path.display()))?;
                    Some(serde_json::from_str(&text).context("content is not valid JSON")?)
                }
                None => None,
            };
            let record = service
                .update_artifact(artifact, ArtifactUpdate { content, observations })
                .await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Artifacts { project } => {
            for artifact in service.list_artifacts(project).await? {
                println!(
                    "{}  {:<22} {}",
                    artifact.id,
                    artifact.kind.as_str(),
                    artifact.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Commands::Show { artifact } => {
            let record = service.get_artifact(artifact).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Export { artifact, format, out } => {
            let file = service.export_artifact(artifact, &format).await?;
            write_export(&out, &file).await?;
        }
        Commands::Render { kind, .. } => {
            bail!("render {kind} does not use a project store");
        }
    }
    Ok(())
}

async fn run_project(service: &ProjectService, command: ProjectCommand) -> anyhow::Result<()> {
    match command {
        ProjectCommand::Create { name, industry, duration, budget, methodology } => {
            let project = service
                .create_project(ProjectMetadata {
                    name,
                    industry,
                    duration_estimate: duration,
                    budget_estimate: budget,
                    methodology,
                })
                .await?;
            println!("{}", project.id);
        }
        ProjectCommand::Update { project, name, industry, duration, budget, methodology } => {
            let project = service
                .update_project(
                    project,
                    ProjectUpdate {
                        name,
                        industry,
                        duration_estimate: duration,
                        budget_estimate: budget,
                        methodology,
                    },
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        ProjectCommand::List => {
            for project in service.list_projects().await? {
                let status = if project.structured_context.is_some() {
                    "processed"
                } else {
                    "pending"
                };
                println!("{}  {:<10} {}", project.id, status, project.metadata.name);
            }
        }
        ProjectCommand::Show { project } => {
            let project = service.get_project(project).await?;
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        ProjectCommand::Delete { project } => {
            service.delete_project(project).await?;
            println!("deleted {project}");
        }
    }
    Ok(())
}

async fn write_export(out: &Path, file: &ExportedFile) -> anyhow::Result<()> {
    if out.exists() && !out.is_dir() {
        bail!("{} is not a directory", out.display());
    }
    tokio::fs::create_dir_all(out).await?;
    let path = out.join(&file.file_name);
    tokio::fs::write(&path, &file.bytes)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    println!("{} ({}, {} bytes)", path.display(), file.content_type, file.bytes.len());
    Ok(())
}
