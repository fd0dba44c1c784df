//! TOML configuration file loading
//!
//! Supports `~/.config/omni/chronicler/config.toml` as a persistent config
//! source. All fields are optional; the file is a partial overlay on top
//! of defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct ChroniclerConfigFile {
    /// Community name woven into the prompts
    #[serde(default)]
    pub community: Option<String>,

    /// LLM configuration
    #[serde(default)]
    pub llm: LlmFileConfig,

    /// Summarization tuning
    #[serde(default)]
    pub summarize: SummarizeFileConfig,

    /// Output locations
    #[serde(default)]
    pub output: OutputFileConfig,
}

/// LLM-related configuration
#[derive(Debug, Default, Deserialize)]
pub struct LlmFileConfig {
    /// OpenAI-compatible API key
    pub api_key: Option<String>,

    /// API base URL (e.g. "<https://api.openai.com>")
    pub base_url: Option<String>,

    /// Model for raw chunk summaries
    pub chunk_model: Option<String>,

    /// Model for group condensation
    pub group_model: Option<String>,

    /// Model for the final pass
    pub final_model: Option<String>,

    /// Model for topic and discussion summaries
    pub topic_model: Option<String>,

    /// Sampling temperature for every stage
    pub temperature: Option<f32>,
}

/// Summarization tuning
#[derive(Debug, Default, Deserialize)]
pub struct SummarizeFileConfig {
    /// Messages per chunk
    pub chunk_size: Option<usize>,

    /// Chunk summaries per condensation group
    pub group_size: Option<usize>,

    /// Conversation window around relevant messages, in minutes
    pub window_minutes: Option<i64>,
}

/// Output locations
#[derive(Debug, Default, Deserialize)]
pub struct OutputFileConfig {
    /// Root data directory (cache, summaries and topics live under it)
    pub data_dir: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `ChroniclerConfigFile::default()` if the file doesn't exist or
/// can't be parsed.
pub fn load_config_file() -> ChroniclerConfigFile {
    let Some(path) = config_file_path() else {
        return ChroniclerConfigFile::default();
    };

    if !path.exists() {
        return ChroniclerConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                ChroniclerConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            ChroniclerConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/omni/chronicler/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| {
        d.config_dir()
            .join("omni")
            .join("chronicler")
            .join("config.toml")
    })
}
