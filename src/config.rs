use pmforge_llm::{DEFAULT_MAX_CONTEXT_CHARS, LlmError, OpenAiClient};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "PMFORGE";
const CONFIG_ENV_VAR: &str = "PMFORGE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "pmforge.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub ingest: IngestConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Falls back to `OPENAI_API_KEY`. Without a key documents are not
    /// structured and artifacts cannot be generated.
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    pub max_pdf_pages: usize,
    pub max_context_chars: usize,
    pub max_stored_text_chars: usize,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_pdf_pages: 150,
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
            max_stored_text_chars: 500_000,
            max_upload_bytes: 15 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Loads defaults, then the first config file found, then `PMFORGE__*`
    /// environment variables.
    ///
    /// The file is `explicit` when given, else `$PMFORGE_CONFIG`, else
    /// `pmforge.toml` in the working directory when it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = explicit
            .map(Path::to_path_buf)
            .or_else(|| {
                std::env::var(CONFIG_ENV_VAR)
                    .ok()
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from)
            })
            .or_else(|| {
                let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
                candidate.exists().then_some(candidate)
            });

        let mut config = Self::from_sources(
            file.as_deref(),
            config::Environment::with_prefix(ENV_PREFIX).separator("__"),
        )?;
        if config.llm.api_key.is_none() {
            config.llm.api_key = std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        Ok(config)
    }

    /// Builds the layered configuration from an optional file and an
    /// environment source.
    pub fn from_sources(
        file: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let ingest = IngestConfig::default();
        let mut builder = config::Config::builder()
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.timeout_secs", 120_i64)?
            .set_default("ingest.max_pdf_pages", ingest.max_pdf_pages as i64)?
            .set_default("ingest.max_context_chars", ingest.max_context_chars as i64)?
            .set_default("ingest.max_stored_text_chars", ingest.max_stored_text_chars as i64)?
            .set_default("ingest.max_upload_bytes", ingest.max_upload_bytes as i64)?
            .set_default("storage.path", "pmforge-data")?;

        if let Some(path) = file {
            log::debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(environment);

        let mut config: AppConfig = builder.build()?.try_deserialize()?;
        config.llm.api_key = config.llm.api_key.filter(|key| !key.trim().is_empty());
        Ok(config)
    }

    /// The configured model client, or `None` when no API key is set.
    pub fn llm_client(&self) -> Result<Option<OpenAiClient>, LlmError> {
        match &self.llm.api_key {
            Some(key) => Ok(Some(OpenAiClient::new(
                key.trim(),
                &self.llm.base_url,
                self.llm.model.clone(),
                Duration::from_secs(self.llm.timeout_secs),
            )?)),
            None => Ok(None),
        }
    }
}
