mod models;

pub use models::RawListing;

use crate::domain::event::Event;
use crate::errors::TrackerError;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use url::Url;

/// Read a scraped feed file (JSON array of listings). Records that cannot
/// be given an identity (missing title or raw line) are skipped with a
/// warning; a malformed source_url is only warned about, the record is
/// kept; dropping it would silently swallow an event.
pub fn load_feed(path: &str) -> Result<Vec<RawListing>, TrackerError> {
    let data = fs::read_to_string(path)
        .map_err(|e| TrackerError::Feed(format!("Failed to read feed file {path}: {e}")))?;
    let listings: Vec<RawListing> = serde_json::from_str(&data)
        .map_err(|e| TrackerError::Feed(format!("Feed JSON parse error in {path}: {e}")))?;

    let mut kept = Vec::with_capacity(listings.len());
    for listing in listings {
        if listing.title.trim().is_empty() || listing.raw.trim().is_empty() {
            eprintln!(
                "Skipping record: missing title or raw line (state={:?})",
                listing.state
            );
            continue;
        }
        if !listing.source_url.is_empty() {
            if let Err(e) = Url::parse(&listing.source_url) {
                eprintln!(
                    "Keeping record with unparseable source_url {:?}: {e}",
                    listing.source_url
                );
            }
        }
        kept.push(listing);
    }
    Ok(kept)
}

/// Construct events from the run's listings. Cross-listing annotation
/// happens here, while events are still being built; afterwards they are
/// immutable except for removal stamping.
pub fn build_events(listings: &[RawListing]) -> Vec<Event> {
    let mut events: Vec<Event> = listings
        .iter()
        .map(|l| Event::new(&l.state, &l.title, &l.date_text, &l.city, &l.raw, &l.source_url))
        .collect();
    annotate_cross_listings(&mut events);
    events
}

/// The same physical tournament listed under several state feeds shares a
/// normalized title and date text; record the sibling state codes in each
/// event's also_in, sorted.
fn annotate_cross_listings(events: &mut [Event]) {
    let mut states_by_listing: HashMap<(String, String), BTreeSet<String>> = HashMap::new();
    for event in events.iter() {
        states_by_listing
            .entry(cross_listing_key(event))
            .or_default()
            .insert(event.state.clone());
    }
    for event in events.iter_mut() {
        if let Some(states) = states_by_listing.get(&cross_listing_key(event)) {
            event.also_in = states
                .iter()
                .filter(|s| !s.eq_ignore_ascii_case(&event.state))
                .cloned()
                .collect();
        }
    }
}

fn cross_listing_key(event: &Event) -> (String, String) {
    (event.title.trim().to_lowercase(), event.date_text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(state: &str, title: &str, date_text: &str) -> RawListing {
        RawListing {
            state: state.to_string(),
            title: title.to_string(),
            date_text: date_text.to_string(),
            city: String::new(),
            raw: format!("{title} | {date_text}"),
            source_url: String::new(),
        }
    }

    #[test]
    fn cross_listed_events_reference_each_other() {
        let listings = vec![
            listing("NV", "Border Shootout", "Apr 4 2026"),
            listing("AZ", "Border Shootout", "Apr 4 2026"),
            listing("NV", "Desert Classic", "Jun 15 2026"),
        ];
        let events = build_events(&listings);
        assert_eq!(events[0].also_in, vec!["AZ".to_string()]);
        assert_eq!(events[1].also_in, vec!["NV".to_string()]);
        assert!(events[2].also_in.is_empty());
    }

    #[test]
    fn different_dates_do_not_cross_link() {
        let listings = vec![
            listing("NV", "Border Shootout", "Apr 4 2026"),
            listing("AZ", "Border Shootout", "Apr 11 2026"),
        ];
        let events = build_events(&listings);
        assert!(events[0].also_in.is_empty());
        assert!(events[1].also_in.is_empty());
    }

    #[test]
    fn title_matching_ignores_case_and_padding() {
        let listings = vec![
            listing("NV", "Border Shootout", "Apr 4 2026"),
            listing("AZ", "  BORDER SHOOTOUT ", "Apr 4 2026"),
        ];
        let events = build_events(&listings);
        assert_eq!(events[0].also_in, vec!["AZ".to_string()]);
    }
}
