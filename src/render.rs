//! Message rendering
//!
//! Turns message records into the text blocks the prompts are built from.
//! Reply quoting needs to know what the target message said, so rendering
//! carries a [`RenderContext`]: a memo of every message seen so far. The
//! chronicle feeds it incrementally in chronological order; the topic
//! pipeline seeds it with the whole store up front so any target resolves.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::export::{Message, ServiceMessage, UserMessage};
use crate::store::MessageStore;

/// Timestamp format used in rendered blocks
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reply quotes are cut to this many characters
const PREVIEW_CHARS: usize = 100;

/// Block separator appended after every rendered message
const SEPARATOR: &str = "------------------------";

/// Memo of previously rendered (or pre-registered) messages, used to
/// resolve reply targets. Explicit state owned by the caller, nothing
/// process-wide.
#[derive(Debug, Default)]
pub struct RenderContext {
    seen: HashMap<i64, ReplyTarget>,
}

#[derive(Debug)]
struct ReplyTarget {
    sender: Option<String>,
    text: String,
}

impl RenderContext {
    /// Empty context; reply targets resolve only once rendered
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context pre-seeded with every user message in the store, so reply
    /// targets resolve regardless of render order
    #[must_use]
    pub fn seeded(store: &MessageStore) -> Self {
        let seen = store
            .user_messages()
            .map(|m| {
                (
                    m.id,
                    ReplyTarget {
                        sender: m.from.clone(),
                        text: m.text.clone(),
                    },
                )
            })
            .collect();
        Self { seen }
    }

    /// Render one message to its text block, recording it for later
    /// reply resolution
    pub fn render(&mut self, message: &Message) -> String {
        match message {
            Message::User(user) => self.render_user(user),
            Message::Service(service) => render_service(service),
        }
    }

    /// Render a user message directly (same memo semantics as [`render`])
    ///
    /// [`render`]: Self::render
    pub fn render_user(&mut self, message: &UserMessage) -> String {
        self.seen.insert(
            message.id,
            ReplyTarget {
                sender: message.from.clone(),
                text: message.text.clone(),
            },
        );

        let mut block = String::from("USER MESSAGE:\n");
        block.push_str(&format!("Sent at: {}\n", format_date(message.date)));
        block.push_str(&format!(
            "Sender: {}\n",
            message.from.as_deref().unwrap_or("unknown")
        ));

        if let Some(emoji) = &message.sticker_emoji {
            block.push_str(&format!("Attached sticker: {emoji}\n"));
        }
        if message.photo.is_some() {
            block.push_str("Photo attached\n");
        }

        // A target we have never seen renders as no reply at all
        if let Some(target) = message
            .reply_to_message_id
            .and_then(|id| self.seen.get(&id))
        {
            block.push_str(&format!(
                "In reply to {}: \"{}\"\n",
                target.sender.as_deref().unwrap_or("unknown"),
                truncate_preview(&target.text)
            ));
        }

        if !message.text.is_empty() {
            block.push_str(&format!("Text: {}\n", message.text));
        }

        let reactions: Vec<String> = message
            .reactions
            .iter()
            .filter_map(|r| r.emoji.as_ref().map(|emoji| format!("{emoji} ({})", r.count)))
            .collect();
        if !reactions.is_empty() {
            block.push_str(&format!("Reactions: {}\n", reactions.join(", ")));
        }

        block.push_str(SEPARATOR);
        block
    }
}

fn render_service(message: &ServiceMessage) -> String {
    format!(
        "SERVICE MESSAGE:\nSent at: {}\nAction: {} by {}\n{SEPARATOR}",
        format_date(message.date),
        message.action,
        message.actor.as_deref().unwrap_or("unknown"),
    )
}

fn format_date(date: NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Cut a quote to the preview length on a character boundary
fn truncate_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
