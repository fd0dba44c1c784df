//! Interactive first-run setup wizard (`chronicler setup`)

use std::path::Path;

use dialoguer::{Confirm, Input};

use crate::config::file::{
    ChroniclerConfigFile, LlmFileConfig, OutputFileConfig, SummarizeFileConfig,
};
use crate::config::ModelTiers;

/// Run the interactive setup wizard
///
/// # Errors
///
/// Returns error if user input fails or config cannot be written
pub fn run_setup() -> anyhow::Result<()> {
    println!("Chronicler Setup\n");

    // Load existing config if present
    let existing = crate::config::file::load_config_file();
    let config_path = crate::config::file::config_file_path()
        .unwrap_or_else(|| std::path::PathBuf::from("~/.config/omni/chronicler/config.toml"));

    if config_path.exists() {
        println!("Existing config found at {}\n", config_path.display());
    }

    // 1. API key (leave blank to keep the stored one)
    let existing_key = existing.llm.api_key.as_deref();
    let masked = existing_key.map(|k| {
        if k.len() > 8 {
            format!("{}...{}", &k[..4], &k[k.len() - 4..])
        } else {
            "****".to_string()
        }
    });

    let prompt = if let Some(ref m) = masked {
        format!("OpenAI API key (current: {m}, leave blank to keep)")
    } else {
        "OpenAI API key (OPENAI_API_KEY)".to_string()
    };

    let api_key_input: String = Input::new()
        .with_prompt(&prompt)
        .allow_empty(true)
        .interact_text()?;

    let api_key = if api_key_input.is_empty() {
        existing_key.map(str::to_string)
    } else {
        Some(api_key_input)
    };

    // 2. API base URL
    let base_url: String = Input::new()
        .with_prompt("API base URL")
        .default(
            existing
                .llm
                .base_url
                .unwrap_or_else(|| "https://api.openai.com".to_string()),
        )
        .interact_text()?;

    // 3. Community name used in prompts
    let community: String = Input::new()
        .with_prompt("Community name (blank to use the chat name from the export)")
        .allow_empty(true)
        .default(existing.community.unwrap_or_default())
        .interact_text()?;

    // 4. Model tiers (optional)
    let tiers = ModelTiers::default();
    let customize_models = Confirm::new()
        .with_prompt("Customize model tiers?")
        .default(false)
        .interact()?;

    let (chunk_model, group_model, final_model, topic_model) = if customize_models {
        let chunk: String = Input::new()
            .with_prompt("Chunk model")
            .default(existing.llm.chunk_model.unwrap_or(tiers.chunk))
            .interact_text()?;
        let group: String = Input::new()
            .with_prompt("Group model")
            .default(existing.llm.group_model.unwrap_or(tiers.group))
            .interact_text()?;
        let final_pass: String = Input::new()
            .with_prompt("Final model")
            .default(existing.llm.final_model.unwrap_or(tiers.final_pass))
            .interact_text()?;
        let topic: String = Input::new()
            .with_prompt("Topic model")
            .default(existing.llm.topic_model.unwrap_or(tiers.topic))
            .interact_text()?;
        (Some(chunk), Some(group), Some(final_pass), Some(topic))
    } else {
        (
            existing.llm.chunk_model,
            existing.llm.group_model,
            existing.llm.final_model,
            existing.llm.topic_model,
        )
    };

    // 5. Summarization tuning (optional)
    let adjust_tuning = Confirm::new()
        .with_prompt("Adjust summarization tuning?")
        .default(false)
        .interact()?;

    let summarize = if adjust_tuning {
        let chunk_size: usize = Input::new()
            .with_prompt("Messages per chunk")
            .default(existing.summarize.chunk_size.unwrap_or(10_000))
            .interact_text()?;
        let group_size: usize = Input::new()
            .with_prompt("Chunk summaries per group")
            .default(existing.summarize.group_size.unwrap_or(70))
            .interact_text()?;
        let window_minutes: i64 = Input::new()
            .with_prompt("Topic window, minutes")
            .default(existing.summarize.window_minutes.unwrap_or(40))
            .interact_text()?;
        SummarizeFileConfig {
            chunk_size: Some(chunk_size),
            group_size: Some(group_size),
            window_minutes: Some(window_minutes),
        }
    } else {
        existing.summarize
    };

    // 6. Build and write config
    let config_file = ChroniclerConfigFile {
        community: if community.is_empty() {
            None
        } else {
            Some(community)
        },
        llm: LlmFileConfig {
            api_key,
            base_url: Some(base_url),
            chunk_model,
            group_model,
            final_model,
            topic_model,
            temperature: existing.llm.temperature,
        },
        summarize,
        output: OutputFileConfig {
            data_dir: existing.output.data_dir,
        },
    };

    write_config(&config_path, &config_file)?;
    println!("\nConfig written to {}", config_path.display());

    println!("\nSetup complete! Run `chronicler chronicle <export.json>` to start.");

    Ok(())
}

/// Serialize and write the config file
fn write_config(path: &Path, config: &ChroniclerConfigFile) -> anyhow::Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = serialize_config(config);
    std::fs::write(path, toml)?;

    Ok(())
}

/// Serialize config to a readable TOML string
fn serialize_config(config: &ChroniclerConfigFile) -> String {
    let mut out = String::new();

    if let Some(ref community) = config.community {
        out.push_str(&format!("community = \"{community}\"\n\n"));
    }

    // [llm]
    let llm = &config.llm;
    if llm.api_key.is_some()
        || llm.base_url.is_some()
        || llm.chunk_model.is_some()
        || llm.group_model.is_some()
        || llm.final_model.is_some()
        || llm.topic_model.is_some()
        || llm.temperature.is_some()
    {
        out.push_str("[llm]\n");
        for (key, val) in [
            ("api_key", &llm.api_key),
            ("base_url", &llm.base_url),
            ("chunk_model", &llm.chunk_model),
            ("group_model", &llm.group_model),
            ("final_model", &llm.final_model),
            ("topic_model", &llm.topic_model),
        ] {
            if let Some(v) = val {
                out.push_str(&format!("{key} = \"{v}\"\n"));
            }
        }
        if let Some(t) = llm.temperature {
            out.push_str(&format!("temperature = {t}\n"));
        }
        out.push('\n');
    }

    // [summarize]
    let sm = &config.summarize;
    if sm.chunk_size.is_some() || sm.group_size.is_some() || sm.window_minutes.is_some() {
        out.push_str("[summarize]\n");
        if let Some(n) = sm.chunk_size {
            out.push_str(&format!("chunk_size = {n}\n"));
        }
        if let Some(n) = sm.group_size {
            out.push_str(&format!("group_size = {n}\n"));
        }
        if let Some(n) = sm.window_minutes {
            out.push_str(&format!("window_minutes = {n}\n"));
        }
        out.push('\n');
    }

    // [output]
    if let Some(ref dir) = config.output.data_dir {
        out.push_str("[output]\n");
        out.push_str(&format!("data_dir = \"{dir}\"\n"));
    }

    out
}
