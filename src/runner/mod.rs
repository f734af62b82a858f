// src/runner/mod.rs

use crate::domain::changes::{compare_snapshots, EventChange};
use crate::domain::diff::{diff, state_matches, DiffResult};
use crate::domain::event::Event;
use crate::domain::snapshot::Snapshot;
use crate::errors::TrackerError;
use crate::feed::{self, RawListing};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Everything one batch run produced, handed to the notification layer.
#[derive(Debug)]
pub struct RunReport {
    pub snapshot_key: String,
    pub diff: DiffResult,
    pub changes: Vec<EventChange>,
    pub removed: Vec<Event>,
    pub snapshot: Snapshot,
}

/// Snapshot file key for a filter: the lowercased state code, or "all"
/// for unfiltered runs. One key, one pipeline, one writer.
pub fn snapshot_key(state_filter: &str) -> String {
    let filter = state_filter.trim();
    if filter.is_empty() || filter.eq_ignore_ascii_case("all") {
        "all".to_string()
    } else {
        filter.to_lowercase()
    }
}

/// One batch run: load the previous snapshot, build events from the feed,
/// diff for new listings, classify field changes, detect removals, then
/// persist the fresh snapshot with the run's change log embedded.
pub fn run(
    store: &dyn Storage,
    listings: &[RawListing],
    state_filter: &str,
) -> Result<RunReport, TrackerError> {
    let key = snapshot_key(state_filter);
    let previous = store.load(&key)?;

    let events = feed::build_events(listings);
    let diff_result = diff(Some(&previous), &events, state_filter);

    // The persisted snapshot only ever holds what this pipeline considered.
    let considered: Vec<Event> = events
        .iter()
        .filter(|event| state_matches(&event.state, state_filter))
        .cloned()
        .collect();

    let now = Utc::now();
    let mut snapshot = Snapshot::create(&considered, &now.to_rfc3339());

    let changes = compare_snapshots(
        &previous.events,
        &snapshot.events,
        &previous.stable_index,
        &snapshot.stable_index,
    );
    let removed = detect_removed(&previous, &snapshot.stable_index, now);

    snapshot.change_log = changes.clone();
    store.save(&snapshot, &key)?;

    println!(
        "✅ Run complete for {key}: {} new, {} change records, {} removed, {} tracked",
        diff_result.new_events.len(),
        changes.len(),
        removed.len(),
        snapshot.events.len()
    );

    Ok(RunReport {
        snapshot_key: key,
        diff: diff_result,
        changes,
        removed,
        snapshot,
    })
}

/// Stable keys present in the previous snapshot and absent from the
/// current index vanished from the feed. The previous event comes back
/// stamped with removed_at; this stays outside the change detector.
pub fn detect_removed(
    previous: &Snapshot,
    current_index: &BTreeMap<String, String>,
    removed_at: DateTime<Utc>,
) -> Vec<Event> {
    previous
        .stable_index
        .iter()
        .filter(|(stable_key, _)| !current_index.contains_key(*stable_key))
        .filter_map(|(_, id)| previous.events.get(id))
        .map(|event| {
            let mut removed = event.clone();
            removed.removed_at = Some(removed_at);
            removed
        })
        .collect()
}
