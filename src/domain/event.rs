// src/domain/event.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Both identities are SHA-256 truncated to 160 bits. Nothing here relies
/// on a security property, only on determinism and distribution.
const HASH_BYTES: usize = 20;

/// One scraped tournament listing. Field names and omission rules are part
/// of the persisted storage contract, so do not rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Content identity: any byte change in the raw source line (a moved
    /// date, an edited city) produces a different id.
    pub id: String,
    /// Fuzzy identity: survives date and city edits, so "the same
    /// tournament moved" is distinguishable from "a brand new listing".
    pub stable_key: String,
    pub state: String,
    pub title: String,
    pub date_text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    /// The exact source line that was hashed into `id`.
    pub raw: String,
    pub source_url: String,
    /// Set once at construction, never mutated.
    pub first_seen: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed_at: Option<DateTime<Utc>>,
    /// Other state codes the same physical event was also listed under.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub also_in: Vec<String>,
}

impl Event {
    pub fn new(
        state: &str,
        title: &str,
        date_text: &str,
        city: &str,
        raw: &str,
        source_url: &str,
    ) -> Self {
        Event {
            id: generate_id(state, raw),
            stable_key: generate_stable_key(state, title),
            state: state.to_string(),
            title: title.to_string(),
            date_text: date_text.to_string(),
            city: city.to_string(),
            raw: raw.to_string(),
            source_url: source_url.to_string(),
            first_seen: Utc::now(),
            removed_at: None,
            also_in: Vec::new(),
        }
    }
}

/// Content id over the exact scraped line. Total: any byte string hashes,
/// including empty input.
pub fn generate_id(state: &str, raw: &str) -> String {
    hash_160(state, raw)
}

/// Stable key over the normalized title. Normalization is lowercase + trim
/// only; suffix stripping ("Golf Club", "CC") is a course-matching concern
/// and deliberately not applied here.
pub fn generate_stable_key(state: &str, title: &str) -> String {
    hash_160(state, &title.trim().to_lowercase())
}

fn hash_160(state: &str, payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(state.as_bytes());
    hasher.update(b"|");
    hasher.update(payload.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..HASH_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_deterministic() {
        let a = generate_id("NV", "Pebble Beach Open | Apr 4 2026 | Las Vegas");
        let b = generate_id("NV", "Pebble Beach Open | Apr 4 2026 | Las Vegas");
        assert_eq!(a, b);
    }

    #[test]
    fn id_changes_with_any_byte_of_raw() {
        let a = generate_id("NV", "Pebble Beach Open | Apr 4 2026");
        let b = generate_id("NV", "Pebble Beach Open | Apr 04 2026");
        assert_ne!(a, b);
    }

    #[test]
    fn id_changes_with_state() {
        assert_ne!(generate_id("NV", "same raw"), generate_id("AZ", "same raw"));
    }

    #[test]
    fn id_is_160_bits_hex() {
        let id = generate_id("NV", "");
        assert_eq!(id.len(), 40);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn stable_key_survives_date_and_city_edits() {
        let before = Event::new(
            "NV",
            "Pebble Beach Open",
            "Apr 4 2026",
            "Las Vegas",
            "Pebble Beach Open | Apr 4 2026 | Las Vegas",
            "https://example.com/nv",
        );
        let after = Event::new(
            "NV",
            "Pebble Beach Open",
            "Apr 11 2026",
            "Henderson",
            "Pebble Beach Open | Apr 11 2026 | Henderson",
            "https://example.com/nv",
        );
        assert_eq!(before.stable_key, after.stable_key);
        assert_ne!(before.id, after.id);
    }

    #[test]
    fn stable_key_normalizes_case_and_whitespace_only() {
        assert_eq!(
            generate_stable_key("NV", "  Pebble Beach Open "),
            generate_stable_key("NV", "PEBBLE BEACH OPEN")
        );
        // No suffix stripping: a retitled listing is a new stable key.
        assert_ne!(
            generate_stable_key("NV", "Pebble Beach Open"),
            generate_stable_key("NV", "Pebble Beach Open Golf Club")
        );
    }

    #[test]
    fn new_event_sets_identities_and_defaults() {
        let event = Event::new(
            "NV",
            "Desert Classic",
            "Jan 24",
            "Reno",
            "Desert Classic | Jan 24 | Reno",
            "https://example.com/nv",
        );
        assert_eq!(event.id, generate_id("NV", "Desert Classic | Jan 24 | Reno"));
        assert_eq!(event.stable_key, generate_stable_key("NV", "Desert Classic"));
        assert!(event.removed_at.is_none());
        assert!(event.also_in.is_empty());
    }

    #[test]
    fn json_shape_omits_empty_optional_fields() {
        let mut event = Event::new("NV", "Desert Classic", "Jan 24", "", "raw line", "");
        let json = serde_json::to_value(&event).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("stable_key"));
        assert!(obj.contains_key("date_text"));
        assert!(obj.contains_key("source_url"));
        assert!(obj.contains_key("first_seen"));
        assert!(!obj.contains_key("city"));
        assert!(!obj.contains_key("removed_at"));
        assert!(!obj.contains_key("also_in"));

        event.city = "Reno".to_string();
        event.also_in = vec!["CA".to_string()];
        let json = serde_json::to_value(&event).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["city"], "Reno");
        assert_eq!(obj["also_in"][0], "CA");
    }
}
