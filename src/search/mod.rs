//! Topic-focused message retrieval
//!
//! Selects the slice of a chat worth summarizing for a set of topics:
//! literal matches seed the selection, the reply graph pulls in the
//! conversations around them, and a time window picks up neighboring
//! chatter that never used the topic words.

pub mod reply_graph;
pub mod time_window;

pub use reply_graph::expand_reply_graph;
pub use time_window::{TimeWindow, expand_time_windows, merge_windows};

use std::collections::HashSet;

use chrono::TimeDelta;

use crate::export::UserMessage;
use crate::store::MessageStore;

/// Ids of user messages whose text contains at least one topic string.
///
/// Matching is case-sensitive substring containment; messages with empty
/// text never match.
#[must_use]
pub fn exact_matches(store: &MessageStore, topics: &[String]) -> HashSet<i64> {
    store
        .user_messages()
        .filter(|m| !m.text.is_empty() && topics.iter().any(|topic| m.text.contains(topic)))
        .map(|m| m.id)
        .collect()
}

/// Run the whole retrieval pipeline: locate seeds, close over the reply
/// graph, then widen to temporal neighbors. The result is chronological.
///
/// Returns `None` when no message matches any topic, so callers can report
/// "nothing found" instead of proceeding with an empty selection.
#[must_use]
pub fn select_relevant<'a>(
    store: &'a MessageStore,
    topics: &[String],
    window: TimeDelta,
) -> Option<Vec<&'a UserMessage>> {
    let seeds = exact_matches(store, topics);
    if seeds.is_empty() {
        return None;
    }
    tracing::debug!(seeds = seeds.len(), "located topic seeds");

    let connected = expand_reply_graph(store, &seeds);
    tracing::debug!(connected = connected.len(), "expanded reply graph");

    let relevant = store.sort_chronologically(&connected);
    let widened = expand_time_windows(store, &relevant, window);
    tracing::debug!(selected = widened.len(), "expanded time windows");

    Some(store.sort_chronologically(&widened))
}
