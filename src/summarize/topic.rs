//! Topic-focused summarization
//!
//! Selects the messages relevant to the given topics (exact matches, their
//! reply threads and the surrounding conversation windows), renders them
//! chronologically and asks the model for a single summary. Nothing is
//! cached: topic queries are one-shot.

use std::path::PathBuf;

use chrono::{Local, NaiveDate, TimeDelta};

use crate::error::Result;
use crate::llm::ChatModel;
use crate::render::RenderContext;
use crate::search;
use crate::store::MessageStore;
use crate::summarize::prompts;

/// Tuning for a topic run
#[derive(Debug, Clone)]
pub struct TopicOptions {
    /// Community name woven into the prompt
    pub community: String,
    /// How far around a relevant message the conversation window reaches
    pub window: TimeDelta,
    /// Directory receiving the summary file
    pub output_dir: PathBuf,
}

/// Outcome of a topic run that found something to summarize
#[derive(Debug)]
pub struct TopicReport {
    pub summary: String,
    pub path: PathBuf,
    /// How many messages went into the prompt
    pub message_count: usize,
}

/// Summarize the discussion of `topics` across the whole export
///
/// Returns `Ok(None)` when no message mentions any of the topics; the
/// model is not called in that case.
///
/// # Errors
///
/// Fails when the model call fails or the summary file cannot be written.
pub async fn summarize_topics(
    store: &MessageStore,
    topics: &[String],
    model: &dyn ChatModel,
    options: &TopicOptions,
) -> Result<Option<TopicReport>> {
    let Some(selected) = search::select_relevant(store, topics, options.window) else {
        tracing::warn!(?topics, "no messages mention any of the topics");
        return Ok(None);
    };

    tracing::info!(
        selected = selected.len(),
        model = model.name(),
        "summarizing topic discussion"
    );

    // Seeded so reply quotes resolve even when the target itself was not
    // selected
    let mut ctx = RenderContext::seeded(store);
    let rendered: String = selected
        .iter()
        .map(|message| ctx.render_user(message))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = prompts::topic_prompt(&options.community, topics, &rendered);
    let summary = model.summarize(&prompt).await?;

    std::fs::create_dir_all(&options.output_dir)?;
    let path = options
        .output_dir
        .join(output_name(topics, Local::now().date_naive()));
    std::fs::write(&path, &summary)?;
    tracing::info!(path = %path.display(), "wrote topic summary");

    Ok(Some(TopicReport {
        summary,
        path,
        message_count: selected.len(),
    }))
}

/// `<topics joined with '_', lowercased>_<YYYY-MM-DD>.txt`
fn output_name(topics: &[String], date: NaiveDate) -> String {
    let slug = topics.join("_").to_lowercase().replace([' ', '/'], "_");
    format!("{slug}_{}.txt", date.format("%Y-%m-%d"))
}
