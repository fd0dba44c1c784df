//! Reply-graph closure
//!
//! Messages form a directed graph through `reply_to_message_id`. Starting
//! from a seed set, the expansion follows edges in both directions (what a
//! message replied to, and everything that replied to it) until no new
//! message is reachable.

use std::collections::HashSet;

use crate::store::MessageStore;

/// Expand a seed id set to its full reply-graph closure.
///
/// The traversal uses the store's reverse reply index for the inbound
/// direction, so each frontier element costs one map lookup per direction.
/// A reply target outside the store (or pointing at a service message) is
/// skipped silently. The result always contains the seeds.
#[must_use]
pub fn expand_reply_graph(store: &MessageStore, seeds: &HashSet<i64>) -> HashSet<i64> {
    let mut included = seeds.clone();
    let mut frontier: Vec<i64> = seeds.iter().copied().collect();

    while let Some(current) = frontier.pop() {
        // Outbound: the message this one replies to
        if let Some(target) = store.user(current).and_then(|m| m.reply_to_message_id) {
            if store.user(target).is_some() && included.insert(target) {
                frontier.push(target);
            }
        }

        // Inbound: every message replying to this one
        for &replier in store.repliers(current) {
            if included.insert(replier) {
                frontier.push(replier);
            }
        }
    }

    included
}
