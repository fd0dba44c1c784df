//! Whole-history chronicle pipeline
//!
//! Walks the export in its original order, summarizes fixed-size chunks
//! with the cheap model tier, then condenses chunk chronicles in groups
//! and finally into one history. Chunk summaries are cached on disk so an
//! interrupted run resumes where it stopped.
//!
//! A chunk the model rejects as too large is split in half and the halves
//! are summarized recursively; their summaries are concatenated and cached
//! under the original chunk's fingerprint. A single message that is still
//! too large cannot be split further and aborts the run.

use std::path::PathBuf;

use futures::future::BoxFuture;

use crate::cache::SummaryCache;
use crate::error::{Error, Result};
use crate::export::Message;
use crate::llm::ChatModel;
use crate::render::RenderContext;
use crate::store::MessageStore;
use crate::summarize::chunks::chunk_fingerprint;
use crate::summarize::prompts;

/// Tuning for a chronicle run
#[derive(Debug, Clone)]
pub struct ChronicleOptions {
    /// Community name woven into the prompts
    pub community: String,
    /// Messages per chunk, at least 1
    pub chunk_size: usize,
    /// Chunk summaries per condensation group, at least 1
    pub group_size: usize,
    /// Directory receiving `group_summary_{n}.txt` and `final_summary.txt`
    pub summary_dir: PathBuf,
}

/// Drives the chunk/group/final summarization stages
pub struct Chronicler {
    cache: SummaryCache,
    options: ChronicleOptions,
}

impl Chronicler {
    #[must_use]
    pub fn new(cache: SummaryCache, options: ChronicleOptions) -> Self {
        Self { cache, options }
    }

    /// Summarize the whole export and return the final history text
    ///
    /// Artifacts are written into the configured summary directory as a
    /// side effect. The three models cover the three stages: a cheap one
    /// for raw chunks, a stronger one for group condensation and the
    /// strongest for the final pass.
    ///
    /// # Errors
    ///
    /// Fails on an empty export, on cache or file system problems, and on
    /// any model error. [`Error::PromptTooLarge`] is only fatal when a
    /// single message exceeds the model's window.
    pub async fn run(
        &self,
        store: &MessageStore,
        chunk_model: &dyn ChatModel,
        group_model: &dyn ChatModel,
        final_model: &dyn ChatModel,
    ) -> Result<String> {
        if store.is_empty() {
            return Err(Error::Export("the export contains no messages".to_string()));
        }

        let messages: Vec<&Message> = store.in_export_order().collect();
        let total_chunks = messages.len().div_ceil(self.options.chunk_size);
        tracing::info!(
            messages = messages.len(),
            chunks = total_chunks,
            model = chunk_model.name(),
            "chronicling chat history"
        );

        let mut ctx = RenderContext::new();
        let mut chunk_summaries = Vec::with_capacity(total_chunks);
        for (index, chunk) in messages.chunks(self.options.chunk_size).enumerate() {
            tracing::info!(
                chunk = index + 1,
                total = total_chunks,
                messages = chunk.len(),
                "summarizing chunk"
            );
            let summary = self.summarize_chunk(chunk, chunk_model, &mut ctx).await?;
            chunk_summaries.push(summary);
        }

        self.condense(&chunk_summaries, group_model, final_model).await
    }

    /// Cache-first chunk summarization with recursive bisection on oversize
    fn summarize_chunk<'a>(
        &'a self,
        chunk: &'a [&'a Message],
        model: &'a dyn ChatModel,
        ctx: &'a mut RenderContext,
    ) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let fingerprint = chunk_fingerprint(chunk);
            if self.cache.exists(&fingerprint) {
                tracing::debug!(%fingerprint, "chunk summary served from cache");
                return self.cache.get(&fingerprint);
            }

            let rendered: String = chunk
                .iter()
                .map(|message| ctx.render(message))
                .collect::<Vec<_>>()
                .join("\n");
            let prompt = prompts::chunk_prompt(&self.options.community, &rendered);

            match model.summarize(&prompt).await {
                Ok(summary) => {
                    self.cache.put(&fingerprint, &summary)?;
                    Ok(summary)
                }
                Err(Error::PromptTooLarge(reason)) if chunk.len() > 1 => {
                    let middle = chunk.len() / 2;
                    tracing::warn!(
                        messages = chunk.len(),
                        %reason,
                        "chunk rejected as too large, bisecting"
                    );
                    let first = self.summarize_chunk(&chunk[..middle], model, ctx).await?;
                    let second = self.summarize_chunk(&chunk[middle..], model, ctx).await?;
                    let combined = format!("{first}\n\n{second}");
                    self.cache.put(&fingerprint, &combined)?;
                    Ok(combined)
                }
                Err(e) => Err(e),
            }
        })
    }

    /// Condense chunk chronicles into groups, then the groups into one text
    async fn condense(
        &self,
        chunk_summaries: &[String],
        group_model: &dyn ChatModel,
        final_model: &dyn ChatModel,
    ) -> Result<String> {
        let today = chrono::Local::now().date_naive();
        let total_groups = chunk_summaries.len().div_ceil(self.options.group_size);
        let mut group_summaries = Vec::with_capacity(total_groups);
        for (index, group) in chunk_summaries.chunks(self.options.group_size).enumerate() {
            tracing::info!(
                group = index + 1,
                total = total_groups,
                model = group_model.name(),
                "condensing summary group"
            );
            let prompt =
                prompts::group_prompt(&self.options.community, today, &group.join("\n\n"));
            let summary = group_model.summarize(&prompt).await?;
            self.write_artifact(&format!("group_summary_{}.txt", index + 1), &summary)?;
            group_summaries.push(summary);
        }

        tracing::info!(model = final_model.name(), "writing the final history");
        let prompt =
            prompts::final_prompt(&self.options.community, today, &group_summaries.join("\n\n"));
        let final_summary = final_model.summarize(&prompt).await?;
        self.write_artifact("final_summary.txt", &final_summary)?;
        Ok(final_summary)
    }

    fn write_artifact(&self, name: &str, text: &str) -> Result<()> {
        std::fs::create_dir_all(&self.options.summary_dir)?;
        let path = self.options.summary_dir.join(name);
        std::fs::write(&path, text)?;
        tracing::info!(path = %path.display(), "wrote summary artifact");
        Ok(())
    }
}
