use crate::feed::RawListing;
use crate::storage::JsonStore;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Fresh scratch directory and store, isolated per test.
pub fn scratch_store(tag: &str) -> (JsonStore, PathBuf) {
    let dir = env::temp_dir().join(format!("golfwatch_{tag}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    (JsonStore::new(dir.clone()), dir)
}

/// Shorthand for a feed record the way the scraper emits them.
pub fn listing(state: &str, title: &str, date_text: &str, city: &str) -> RawListing {
    RawListing {
        state: state.to_string(),
        title: title.to_string(),
        date_text: date_text.to_string(),
        city: city.to_string(),
        raw: format!("{title} | {date_text} | {city}"),
        source_url: format!("https://example.com/{}", state.to_lowercase()),
    }
}
