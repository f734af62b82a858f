// src/domain/diff.rs

use crate::domain::event::Event;
use crate::domain::snapshot::Snapshot;
use serde::Serialize;
use std::collections::BTreeMap;

/// Listings present now but absent (by content id) from the previous
/// snapshot. Ordering is a hard requirement: the notification layer relies
/// on byte-identical output across retries to avoid duplicate or reordered
/// sends.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiffResult {
    /// Sorted ascending by (state, raw).
    pub new_events: Vec<Event>,
    /// State code to its new listings, each bucket sorted ascending by raw.
    pub states: BTreeMap<String, Vec<Event>>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.new_events.is_empty()
    }
}

/// True when `filter` selects this state. Empty or "ALL" (any case) means
/// no filtering.
pub fn state_matches(state: &str, filter: &str) -> bool {
    filter.is_empty() || filter.eq_ignore_ascii_case("all") || state.eq_ignore_ascii_case(filter)
}

/// Compare the freshly scraped events against the previous snapshot.
/// `None` is an empty snapshot: everything is new. Filtered-out events are
/// invisible to the whole call, not merely excluded from "new".
pub fn diff(previous: Option<&Snapshot>, current: &[Event], state_filter: &str) -> DiffResult {
    let mut new_events: Vec<Event> = current
        .iter()
        .filter(|event| state_matches(&event.state, state_filter))
        .filter(|event| match previous {
            Some(snapshot) => !snapshot.events.contains_key(&event.id),
            None => true,
        })
        .cloned()
        .collect();

    new_events.sort_by(|a, b| a.state.cmp(&b.state).then_with(|| a.raw.cmp(&b.raw)));

    let mut states: BTreeMap<String, Vec<Event>> = BTreeMap::new();
    for event in &new_events {
        // Buckets inherit the (state, raw) sort, so each is raw-ordered.
        states
            .entry(event.state.clone())
            .or_default()
            .push(event.clone());
    }

    DiffResult { new_events, states }
}
