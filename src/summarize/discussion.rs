//! Ad hoc discussion summarization
//!
//! Summarizes the span of the export between two linked messages, steered
//! by caller-provided instructions. The span is inclusive on both ends; an
//! omitted end link runs to the end of the export. Reply quotes resolve
//! only within the span, so the summary sees the discussion the way a
//! reader scrolling that span would.

use crate::error::{Error, Result};
use crate::export::UserMessage;
use crate::links::MessageLink;
use crate::llm::ChatModel;
use crate::render::RenderContext;
use crate::store::MessageStore;
use crate::summarize::prompts;

/// Instructions used when the caller does not provide any
pub const DEFAULT_INSTRUCTIONS: &str =
    "A heated argument happened in this chat. Read the conversation below and describe \
     the participants, their opinions, who argues with whom and about what. Finish with \
     a short conclusion and your own judgement of who is right.";

/// Summarize the user messages between two linked messages
///
/// Returns `Ok(None)` when no user message falls inside the range; the
/// model is not called in that case.
///
/// # Errors
///
/// Returns [`Error::InvalidLink`] when the links disagree on channel or
/// thread. Otherwise fails only when the model call fails.
pub async fn summarize_discussion(
    store: &MessageStore,
    start: &MessageLink,
    end: Option<&MessageLink>,
    instructions: &str,
    model: &dyn ChatModel,
) -> Result<Option<String>> {
    if let Some(end) = end {
        if end.channel != start.channel {
            return Err(Error::InvalidLink(format!(
                "links must belong to the same channel: {} != {}",
                start.channel, end.channel
            )));
        }
        if end.thread_id != start.thread_id {
            return Err(Error::InvalidLink(format!(
                "links must belong to the same thread: {:?} != {:?}",
                start.thread_id, end.thread_id
            )));
        }
    }

    let lower = start.message_id;
    let upper = end.map_or(i64::MAX, |link| link.message_id);
    let selected: Vec<&UserMessage> = store
        .user_messages()
        .filter(|message| (lower..=upper).contains(&message.id))
        .collect();

    if selected.is_empty() {
        tracing::warn!(lower, upper, "no messages found in the linked range");
        return Ok(None);
    }

    let mut ctx = RenderContext::new();
    let rendered: String = selected
        .iter()
        .map(|message| ctx.render_user(message))
        .collect::<Vec<_>>()
        .join("\n");

    tracing::info!(
        selected = selected.len(),
        model = model.name(),
        "summarizing linked discussion"
    );
    let prompt = prompts::discussion_prompt(instructions, &rendered);
    let summary = model.summarize(&prompt).await?;
    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ChatHistory, Message};

    struct NoCallModel;

    #[async_trait::async_trait]
    impl ChatModel for NoCallModel {
        fn name(&self) -> &str {
            "none"
        }

        async fn summarize(&self, _prompt: &str) -> Result<String> {
            panic!("the model must not be called");
        }
    }

    #[derive(Default)]
    struct CapturingModel {
        prompt: std::sync::Mutex<Option<String>>,
    }

    impl CapturingModel {
        fn prompt(&self) -> String {
            self.prompt.lock().unwrap().clone().expect("model called")
        }
    }

    #[async_trait::async_trait]
    impl ChatModel for CapturingModel {
        fn name(&self) -> &str {
            "capturing"
        }

        async fn summarize(&self, prompt: &str) -> Result<String> {
            *self.prompt.lock().unwrap() = Some(prompt.to_string());
            Ok("verdict".to_string())
        }
    }

    fn link(channel: &str, thread_id: Option<i64>, message_id: i64) -> MessageLink {
        MessageLink {
            channel: channel.to_string(),
            thread_id,
            message_id,
        }
    }

    fn store() -> MessageStore {
        let messages = (1..=5)
            .map(|id| {
                Message::User(UserMessage {
                    id,
                    date: format!("2023-01-01T10:0{id}:00").parse().unwrap(),
                    from: Some("Alice".to_string()),
                    from_id: None,
                    text: format!("message {id}"),
                    reply_to_message_id: None,
                    edited: None,
                    reactions: Vec::new(),
                    sticker_emoji: None,
                    photo: None,
                })
            })
            .collect();
        MessageStore::from_history(ChatHistory {
            name: "fixture".to_string(),
            kind: "private_supergroup".to_string(),
            id: 1,
            messages,
        })
    }

    #[tokio::test]
    async fn mismatched_channels_are_rejected() {
        let err = summarize_discussion(
            &store(),
            &link("alpha", None, 1),
            Some(&link("beta", None, 5)),
            DEFAULT_INSTRUCTIONS,
            &NoCallModel,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("same channel"));
    }

    #[tokio::test]
    async fn mismatched_threads_are_rejected() {
        let err = summarize_discussion(
            &store(),
            &link("alpha", Some(10), 1),
            Some(&link("alpha", None, 5)),
            DEFAULT_INSTRUCTIONS,
            &NoCallModel,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("same thread"));
    }

    #[tokio::test]
    async fn range_is_inclusive_on_both_ends() {
        let model = CapturingModel::default();
        let summary = summarize_discussion(
            &store(),
            &link("alpha", None, 2),
            Some(&link("alpha", None, 4)),
            "Summarize.",
            &model,
        )
        .await
        .unwrap()
        .expect("messages in range");

        assert_eq!(summary, "verdict");
        let prompt = model.prompt();
        assert!(prompt.starts_with("Summarize."));
        assert!(prompt.contains("message 2") && prompt.contains("message 4"));
        assert!(!prompt.contains("message 1") && !prompt.contains("message 5"));
    }

    #[tokio::test]
    async fn open_ended_range_runs_to_the_export_end() {
        let model = CapturingModel::default();
        summarize_discussion(&store(), &link("alpha", None, 4), None, "Summarize.", &model)
            .await
            .unwrap()
            .expect("messages in range");

        let prompt = model.prompt();
        assert!(prompt.contains("message 4") && prompt.contains("message 5"));
        assert!(!prompt.contains("message 3"));
    }

    #[tokio::test]
    async fn empty_range_reports_nothing_found() {
        let outcome = summarize_discussion(
            &store(),
            &link("alpha", None, 100),
            Some(&link("alpha", None, 200)),
            DEFAULT_INSTRUCTIONS,
            &NoCallModel,
        )
        .await
        .unwrap();

        assert!(outcome.is_none());
    }
}
