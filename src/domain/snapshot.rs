// src/domain/snapshot.rs

use crate::domain::changes::EventChange;
use crate::domain::event::Event;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable point-in-time view of everything one pipeline knows. Ordered
/// maps keep iteration and the persisted JSON deterministic. Field names
/// are part of the storage contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub events: BTreeMap<String, Event>,
    #[serde(default)]
    pub stable_index: BTreeMap<String, String>,
    #[serde(default)]
    pub change_log: Vec<EventChange>,
    pub updated_at: String,
}

impl Snapshot {
    /// The nothing-persisted-yet snapshot. Storage returns this, not an
    /// error, on first run.
    pub fn empty(updated_at: impl Into<String>) -> Self {
        Snapshot {
            events: BTreeMap::new(),
            stable_index: BTreeMap::new(),
            change_log: Vec::new(),
            updated_at: updated_at.into(),
        }
    }

    /// Single pass over the input. Events insert by id; a non-empty stable
    /// key inserts or overwrites its index entry, so on a collision the
    /// later event in input order wins.
    pub fn create(events: &[Event], updated_at: &str) -> Self {
        let mut snapshot = Snapshot::empty(updated_at);
        for event in events {
            if !event.stable_key.is_empty() {
                snapshot
                    .stable_index
                    .insert(event.stable_key.clone(), event.id.clone());
            }
            snapshot.events.insert(event.id.clone(), event.clone());
        }
        snapshot
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::generate_stable_key;

    fn event(title: &str, raw: &str) -> Event {
        Event::new("NV", title, "Apr 4 2026", "Las Vegas", raw, "https://example.com")
    }

    #[test]
    fn one_entry_per_distinct_id() {
        let a = event("Pebble Beach", "raw a");
        let b = event("Desert Classic", "raw b");
        let duplicate = event("Pebble Beach", "raw a");
        let snapshot = Snapshot::create(&[a.clone(), b.clone(), duplicate], "2026-04-01T00:00:00Z");
        assert_eq!(snapshot.events.len(), 2);
        assert!(snapshot.events.contains_key(&a.id));
        assert!(snapshot.events.contains_key(&b.id));
    }

    #[test]
    fn stable_index_points_at_events_and_last_write_wins() {
        // Same title, different raw lines: one stable key, two ids.
        let first = event("Pebble Beach", "raw v1");
        let second = event("Pebble Beach", "raw v2");
        let snapshot = Snapshot::create(&[first.clone(), second.clone()], "2026-04-01T00:00:00Z");

        let key = generate_stable_key("NV", "Pebble Beach");
        assert_eq!(snapshot.stable_index.get(&key), Some(&second.id));
        // Every index value resolves to a held event.
        for id in snapshot.stable_index.values() {
            assert!(snapshot.events.contains_key(id));
        }
    }

    #[test]
    fn empty_snapshot_is_empty() {
        let snapshot = Snapshot::empty("2026-04-01T00:00:00Z");
        assert!(snapshot.is_empty());
        assert!(snapshot.stable_index.is_empty());
    }

    #[test]
    fn json_shape_matches_storage_contract() {
        let snapshot = Snapshot::create(&[event("Pebble Beach", "raw a")], "2026-04-01T00:00:00Z");
        let json = serde_json::to_value(&snapshot).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj["events"].is_object());
        assert!(obj["stable_index"].is_object());
        assert!(obj["change_log"].is_array());
        assert_eq!(obj["updated_at"], "2026-04-01T00:00:00Z");
    }

    #[test]
    fn missing_change_log_defaults_on_load() {
        // Snapshots persisted before the change log existed still load.
        let legacy = r#"{"events":{},"stable_index":{},"updated_at":"2026-04-01T00:00:00Z"}"#;
        let snapshot: Snapshot = serde_json::from_str(legacy).unwrap();
        assert!(snapshot.change_log.is_empty());
    }
}
