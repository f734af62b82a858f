// src/domain/changes.rs

use crate::domain::event::Event;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of change classifications. Exhaustive matching catches a
/// missing case at compile time if a field is ever added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    New,
    Date,
    Title,
    City,
}

impl ChangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::New => "new",
            ChangeType::Date => "date",
            ChangeType::Title => "title",
            ChangeType::City => "city",
        }
    }
}

/// One detected field-level change, persisted in the snapshot change log
/// and handed to the notification layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventChange {
    pub event_id: String,
    pub stable_key: String,
    pub change_type: ChangeType,
    pub old_value: String,
    pub new_value: String,
    pub detected_at: DateTime<Utc>,
}

/// Compare two events sharing a stable key. With no previous event the
/// whole listing is new: exactly one `new` change carrying the title.
/// Otherwise date_text, title, and city are compared by exact string
/// equality ("Apr 4 2026" vs "Apr 04 2026" counts as a change even though
/// both denote the same day) and emitted in fixed order date, title, city.
pub fn detect_changes(previous: Option<&Event>, current: &Event) -> Vec<EventChange> {
    let detected_at = Utc::now();

    let change = |change_type: ChangeType, old_value: &str, new_value: &str| EventChange {
        event_id: current.id.clone(),
        stable_key: current.stable_key.clone(),
        change_type,
        old_value: old_value.to_string(),
        new_value: new_value.to_string(),
        detected_at,
    };

    let Some(previous) = previous else {
        return vec![change(ChangeType::New, "", &current.title)];
    };

    let mut changes = Vec::new();
    if previous.date_text != current.date_text {
        changes.push(change(ChangeType::Date, &previous.date_text, &current.date_text));
    }
    if previous.title != current.title {
        changes.push(change(ChangeType::Title, &previous.title, &current.title));
    }
    if previous.city != current.city {
        changes.push(change(ChangeType::City, &previous.city, &current.city));
    }
    changes
}

/// Walk every stable key of the current run. Keys seen in the previous run
/// are diffed pairwise; keys appearing for the first time classify as new.
/// Keys that vanished entirely are not reported here; removal detection
/// operates on the key-set difference separately.
pub fn compare_snapshots(
    previous_events: &BTreeMap<String, Event>,
    current_events: &BTreeMap<String, Event>,
    previous_index: &BTreeMap<String, String>,
    current_index: &BTreeMap<String, String>,
) -> Vec<EventChange> {
    let mut changes = Vec::new();
    for (stable_key, current_id) in current_index {
        let Some(current) = current_events.get(current_id) else {
            continue;
        };
        let previous = previous_index
            .get(stable_key)
            .and_then(|id| previous_events.get(id));
        changes.extend(detect_changes(previous, current));
    }
    changes
}
