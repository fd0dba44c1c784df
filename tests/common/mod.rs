//! Shared test utilities

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use chat_chronicler::export::{ChatHistory, Message, ServiceMessage, UserMessage};
use chat_chronicler::{ChatModel, MessageStore, Result};
use tokio::sync::Mutex;

/// Chat model that replays scripted responses and records every prompt
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedModel {
    #[must_use]
    pub fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    pub async fn calls(&self) -> usize {
        self.prompts.lock().await.len()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn summarize(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().await.push(prompt.to_string());
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok("unscripted response".to_string()))
    }
}

/// Build a user message fixture
#[must_use]
pub fn user_message(id: i64, date: &str, text: &str) -> Message {
    Message::User(UserMessage {
        id,
        date: date.parse().expect("valid fixture date"),
        from: Some(format!("User {id}")),
        from_id: Some(format!("user{id}")),
        text: text.to_string(),
        reply_to_message_id: None,
        edited: None,
        reactions: Vec::new(),
        sticker_emoji: None,
        photo: None,
    })
}

/// Build a user message replying to `target`
#[must_use]
pub fn reply_message(id: i64, date: &str, text: &str, target: i64) -> Message {
    match user_message(id, date, text) {
        Message::User(mut message) => {
            message.reply_to_message_id = Some(target);
            Message::User(message)
        }
        Message::Service(_) => unreachable!(),
    }
}

/// Build a service message fixture
#[must_use]
pub fn service_message(id: i64, date: &str, action: &str) -> Message {
    Message::Service(ServiceMessage {
        id,
        date: date.parse().expect("valid fixture date"),
        actor: Some("Admin".to_string()),
        actor_id: None,
        action: action.to_string(),
    })
}

/// Build a chat history fixture around the given messages
#[must_use]
pub fn history(messages: Vec<Message>) -> ChatHistory {
    ChatHistory {
        name: "Anime Cell".to_string(),
        kind: "private_supergroup".to_string(),
        id: 1_234_567,
        messages,
    }
}

/// Build an indexed store around the given messages
#[must_use]
pub fn store(messages: Vec<Message>) -> MessageStore {
    MessageStore::from_history(history(messages))
}
