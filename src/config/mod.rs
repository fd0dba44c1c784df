//! Configuration management for the chronicler
//!
//! Every setting resolves with env > config file > default precedence.
//! The config file is written by `chronicler setup` and lives under the
//! XDG config directory; data (cache, summaries, topics) lives under the
//! XDG data directory.

pub mod file;

use std::path::PathBuf;

use chrono::TimeDelta;

use crate::error::{Error, Result};

/// Model identifiers for the summarization stages
#[derive(Debug, Clone)]
pub struct ModelTiers {
    /// Cheap model for raw chunk summaries
    pub chunk: String,

    /// Stronger model for group condensation
    pub group: String,

    /// Strongest model for the final pass
    pub final_pass: String,

    /// Model for topic and discussion summaries
    pub topic: String,
}

impl Default for ModelTiers {
    fn default() -> Self {
        Self {
            chunk: "gpt-4.1-nano".to_string(),
            group: "gpt-4.1-mini".to_string(),
            final_pass: "gpt-4.1".to_string(),
            topic: "gpt-4.1-mini".to_string(),
        }
    }
}

/// Chronicler configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI-compatible API key
    pub api_key: String,

    /// API base URL
    pub base_url: String,

    /// Model identifiers per stage
    pub models: ModelTiers,

    /// Sampling temperature for every stage
    pub temperature: f32,

    /// Messages per chunk
    pub chunk_size: usize,

    /// Chunk summaries per condensation group
    pub group_size: usize,

    /// Conversation window around relevant messages
    pub window: TimeDelta,

    /// Community name woven into the prompts; `None` falls back to the
    /// chat name recorded in the export
    pub community: Option<String>,

    /// Root data directory (cache, summaries and topics live under it)
    pub data_dir: PathBuf,
}

impl Config {
    /// Load configuration (env > config file > default)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no API key is configured, when a
    /// size is zero or when the window is negative.
    pub fn load() -> Result<Self> {
        let fc = file::load_config_file();

        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .or(fc.llm.api_key)
            .ok_or_else(|| {
                Error::Config(
                    "no API key configured, set OPENAI_API_KEY or run `chronicler setup`"
                        .to_string(),
                )
            })?;

        let base_url = std::env::var("OPENAI_BASE_URL")
            .ok()
            .or(fc.llm.base_url)
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        let defaults = ModelTiers::default();
        let models = ModelTiers {
            chunk: std::env::var("CHRONICLER_CHUNK_MODEL")
                .ok()
                .or(fc.llm.chunk_model)
                .unwrap_or(defaults.chunk),
            group: std::env::var("CHRONICLER_GROUP_MODEL")
                .ok()
                .or(fc.llm.group_model)
                .unwrap_or(defaults.group),
            final_pass: std::env::var("CHRONICLER_FINAL_MODEL")
                .ok()
                .or(fc.llm.final_model)
                .unwrap_or(defaults.final_pass),
            topic: std::env::var("CHRONICLER_TOPIC_MODEL")
                .ok()
                .or(fc.llm.topic_model)
                .unwrap_or(defaults.topic),
        };

        let temperature = std::env::var("CHRONICLER_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok())
            .or(fc.llm.temperature)
            .unwrap_or(0.3);

        let chunk_size = std::env::var("CHRONICLER_CHUNK_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .or(fc.summarize.chunk_size)
            .unwrap_or(10_000);

        let group_size = std::env::var("CHRONICLER_GROUP_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .or(fc.summarize.group_size)
            .unwrap_or(70);

        if chunk_size == 0 || group_size == 0 {
            return Err(Error::Config(
                "chunk_size and group_size must be at least 1".to_string(),
            ));
        }

        let window_minutes = std::env::var("CHRONICLER_WINDOW_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .or(fc.summarize.window_minutes)
            .unwrap_or(40);
        if window_minutes < 0 {
            return Err(Error::Config(
                "window_minutes must not be negative".to_string(),
            ));
        }

        let community = std::env::var("CHRONICLER_COMMUNITY").ok().or(fc.community);

        let data_dir = std::env::var("CHRONICLER_DATA_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| fc.output.data_dir.map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        Ok(Self {
            api_key,
            base_url,
            models,
            temperature,
            chunk_size,
            group_size,
            window: TimeDelta::minutes(window_minutes),
            community,
            data_dir,
        })
    }

    /// Directory for cached chunk summaries
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache")
    }

    /// Directory for chronicle artifacts
    #[must_use]
    pub fn summaries_dir(&self) -> PathBuf {
        self.data_dir.join("summaries")
    }

    /// Directory for topic summaries
    #[must_use]
    pub fn topics_dir(&self) -> PathBuf {
        self.data_dir.join("topics")
    }
}

/// Default data directory: `~/.local/share/omni/chronicler/` on Linux
fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".local/share/omni/chronicler"),
        |d| d.data_dir().join("omni").join("chronicler"),
    )
}
