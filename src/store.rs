//! In-memory message store
//!
//! Built once per run from a parsed export; read-only afterwards. Holds the
//! id → message map plus the derived indexes the retrieval pipeline needs:
//! the reverse reply index and the chronological order of user messages.

use std::collections::HashMap;

use crate::export::{ChatHistory, Message, UserMessage};

/// Id-indexed view of a whole chat export
#[derive(Debug)]
pub struct MessageStore {
    messages: HashMap<i64, Message>,

    // Export insertion order, one entry per distinct id
    export_order: Vec<i64>,

    // reply-target id -> ids of user messages replying to it
    repliers: HashMap<i64, Vec<i64>>,

    // User-message ids sorted by (date, id)
    date_order: Vec<i64>,
}

impl MessageStore {
    /// Build the store from a parsed export in a single pass.
    ///
    /// Ids are expected to be unique; if the export repeats an id, the later
    /// record wins (and keeps the earlier record's position in export
    /// order). That mirrors plain single-pass insertion and is not a
    /// guarantee callers should lean on.
    #[must_use]
    pub fn from_history(history: ChatHistory) -> Self {
        let mut messages = HashMap::with_capacity(history.messages.len());
        let mut export_order = Vec::with_capacity(history.messages.len());

        for message in history.messages {
            let id = message.id();
            if messages.insert(id, message).is_none() {
                export_order.push(id);
            }
        }

        let mut repliers: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut date_order = Vec::new();

        for message in messages.values() {
            if let Message::User(user) = message {
                date_order.push(user.id);
                if let Some(target) = user.reply_to_message_id {
                    repliers.entry(target).or_default().push(user.id);
                }
            }
        }

        date_order.sort_unstable_by_key(|id| {
            let date = messages[id].date();
            (date, *id)
        });

        Self {
            messages,
            export_order,
            repliers,
            date_order,
        }
    }

    /// Number of distinct messages in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the store holds no messages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Look up any message by id
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Message> {
        self.messages.get(&id)
    }

    /// Look up a user message by id; `None` for absent ids and for
    /// service messages
    #[must_use]
    pub fn user(&self, id: i64) -> Option<&UserMessage> {
        self.messages.get(&id).and_then(Message::as_user)
    }

    /// All messages in export order (service messages included)
    pub fn in_export_order(&self) -> impl Iterator<Item = &Message> {
        self.export_order.iter().map(|id| &self.messages[id])
    }

    /// All user messages in chronological order (timestamp, then id)
    pub fn user_messages(&self) -> impl Iterator<Item = &UserMessage> {
        self.date_order
            .iter()
            .filter_map(|id| self.messages[id].as_user())
    }

    /// Ids of user messages replying to `id`
    #[must_use]
    pub fn repliers(&self, id: i64) -> &[i64] {
        self.repliers.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Resolve a set of ids to user messages sorted chronologically.
    /// Ids that are absent or name service messages are dropped.
    #[must_use]
    pub fn sort_chronologically(&self, ids: &std::collections::HashSet<i64>) -> Vec<&UserMessage> {
        let mut selected: Vec<&UserMessage> =
            ids.iter().filter_map(|&id| self.user(id)).collect();
        selected.sort_unstable_by_key(|m| (m.date, m.id));
        selected
    }
}
