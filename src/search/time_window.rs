//! Temporal neighbor expansion
//!
//! Around every relevant message lies chatter that never mentioned the
//! topic but belongs to the same moment. Each relevant message opens a
//! `[date - delta, date + delta]` window; the windows are merged into a
//! minimal disjoint sequence, then swept against the chronologically
//! sorted store in a single merge-join pass.

use std::collections::HashSet;

use chrono::{NaiveDateTime, TimeDelta};

use crate::export::UserMessage;
use crate::store::MessageStore;

/// A closed time interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Whether `at` falls inside the window (bounds included)
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }
}

/// Build the minimal disjoint window cover for a chronologically sorted
/// slice of relevant messages.
///
/// Consecutive windows are merged while the next one starts at or before
/// the current end, so no two returned windows overlap or touch. An empty
/// input yields no windows; callers guard against empty selections before
/// getting here.
#[must_use]
pub fn merge_windows(relevant: &[&UserMessage], delta: TimeDelta) -> Vec<TimeWindow> {
    let mut windows: Vec<TimeWindow> = Vec::new();

    for message in relevant {
        let start = message.date - delta;
        let end = message.date + delta;

        match windows.last_mut() {
            Some(last) if start <= last.end => last.end = last.end.max(end),
            _ => windows.push(TimeWindow { start, end }),
        }
    }

    windows
}

/// Ids of every user message in the store whose timestamp falls within
/// `delta` of at least one relevant message.
///
/// The relevant messages themselves are always part of the result, their
/// own timestamps being trivially inside their own windows. `relevant`
/// must be sorted chronologically (see
/// [`MessageStore::sort_chronologically`]).
#[must_use]
pub fn expand_time_windows(
    store: &MessageStore,
    relevant: &[&UserMessage],
    delta: TimeDelta,
) -> HashSet<i64> {
    let windows = merge_windows(relevant, delta);
    let messages: Vec<&UserMessage> = store.user_messages().collect();

    let mut ids = HashSet::new();
    let mut msg_idx = 0;
    let mut win_idx = 0;

    // Both sequences are sorted, so one simultaneous walk suffices
    while msg_idx < messages.len() && win_idx < windows.len() {
        let message = messages[msg_idx];
        let window = windows[win_idx];

        if message.date < window.start {
            msg_idx += 1;
        } else if message.date > window.end {
            win_idx += 1;
        } else {
            ids.insert(message.id);
            msg_idx += 1;
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ChatHistory, Message};

    fn date(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    fn user(id: i64, at: &str) -> Message {
        Message::User(UserMessage {
            id,
            date: date(at),
            from: Some("someone".to_string()),
            from_id: None,
            text: format!("message {id}"),
            reply_to_message_id: None,
            edited: None,
            reactions: Vec::new(),
            sticker_emoji: None,
            photo: None,
        })
    }

    fn store(messages: Vec<Message>) -> MessageStore {
        MessageStore::from_history(ChatHistory {
            name: "fixture".to_string(),
            kind: "private_supergroup".to_string(),
            id: 1,
            messages,
        })
    }

    fn relevant<'a>(store: &'a MessageStore, ids: &[i64]) -> Vec<&'a UserMessage> {
        store.sort_chronologically(&ids.iter().copied().collect())
    }

    // ---- merge_windows ----

    #[test]
    fn disjoint_windows_stay_separate() {
        let store = store(vec![
            user(1, "2023-01-01T10:00:00"),
            user(2, "2023-01-01T14:00:00"),
        ]);
        let windows = merge_windows(&relevant(&store, &[1, 2]), TimeDelta::minutes(30));

        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start, date("2023-01-01T09:30:00"));
        assert_eq!(windows[0].end, date("2023-01-01T10:30:00"));
        assert_eq!(windows[1].start, date("2023-01-01T13:30:00"));
    }

    #[test]
    fn overlapping_windows_merge() {
        let store = store(vec![
            user(1, "2023-01-01T10:00:00"),
            user(2, "2023-01-01T10:40:00"),
        ]);
        let windows = merge_windows(&relevant(&store, &[1, 2]), TimeDelta::minutes(30));

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, date("2023-01-01T09:30:00"));
        assert_eq!(windows[0].end, date("2023-01-01T11:10:00"));
    }

    #[test]
    fn touching_windows_merge() {
        // Second window starts exactly where the first ends
        let store = store(vec![
            user(1, "2023-01-01T10:00:00"),
            user(2, "2023-01-01T11:00:00"),
        ]);
        let windows = merge_windows(&relevant(&store, &[1, 2]), TimeDelta::minutes(30));
        assert_eq!(windows.len(), 1);
    }

    #[test]
    fn merged_windows_are_minimal_and_cover_inputs() {
        let store = store(vec![
            user(1, "2023-01-01T10:00:00"),
            user(2, "2023-01-01T10:10:00"),
            user(3, "2023-01-01T10:20:00"),
            user(4, "2023-01-01T16:00:00"),
        ]);
        let messages = relevant(&store, &[1, 2, 3, 4]);
        let delta = TimeDelta::minutes(15);
        let windows = merge_windows(&messages, delta);

        // Minimality: strictly increasing, with gaps between windows
        for pair in windows.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
        // Coverage: every input neighborhood lies inside some window
        for message in &messages {
            assert!(windows.iter().any(|w| w.contains(message.date - delta)));
            assert!(windows.iter().any(|w| w.contains(message.date + delta)));
        }
    }

    #[test]
    fn empty_input_yields_no_windows() {
        assert!(merge_windows(&[], TimeDelta::minutes(30)).is_empty());
    }

    // ---- expand_time_windows ----

    #[test]
    fn expansion_is_sound_and_complete() {
        let store = store(vec![
            user(1, "2023-01-01T10:00:00"),
            user(2, "2023-01-01T10:20:00"),
            user(3, "2023-01-01T11:30:00"),
            user(4, "2023-01-01T12:00:00"),
            user(5, "2023-01-01T23:00:00"),
        ]);
        let delta = TimeDelta::minutes(30);
        let seeds = relevant(&store, &[1, 4]);

        let expanded = expand_time_windows(&store, &seeds, delta);

        // Brute force over the same store
        let expected: HashSet<i64> = store
            .user_messages()
            .filter(|m| {
                seeds
                    .iter()
                    .any(|s| (m.date - s.date).abs() <= delta)
            })
            .map(|m| m.id)
            .collect();

        assert_eq!(expanded, expected);
        assert_eq!(expanded, HashSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn includes_the_relevant_messages_themselves() {
        let store = store(vec![
            user(1, "2023-01-01T10:00:00"),
            user(2, "2023-01-01T18:00:00"),
        ]);
        let expanded =
            expand_time_windows(&store, &relevant(&store, &[1, 2]), TimeDelta::zero());
        assert_eq!(expanded, HashSet::from([1, 2]));
    }

    #[test]
    fn zero_delta_picks_up_identical_timestamps() {
        let store = store(vec![
            user(1, "2023-01-01T10:00:00"),
            user(2, "2023-01-01T10:00:00"),
            user(3, "2023-01-01T10:00:01"),
        ]);
        let expanded = expand_time_windows(&store, &relevant(&store, &[1]), TimeDelta::zero());
        assert_eq!(expanded, HashSet::from([1, 2]));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let store = store(vec![
            user(1, "2023-01-01T10:00:00"),
            user(2, "2023-01-01T10:30:00"),
            user(3, "2023-01-01T10:30:01"),
        ]);
        let expanded =
            expand_time_windows(&store, &relevant(&store, &[1]), TimeDelta::minutes(30));
        assert_eq!(expanded, HashSet::from([1, 2]));
    }

    #[test]
    fn empty_relevant_list_selects_nothing() {
        let store = store(vec![user(1, "2023-01-01T10:00:00")]);
        assert!(expand_time_windows(&store, &[], TimeDelta::minutes(30)).is_empty());
    }
}
