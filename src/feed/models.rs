use serde::Deserialize;

// listing
//  ├── state        ("NV")
//  ├── title        ("Pebble Beach Open")
//  ├── date_text    ("Apr 4 2026", "4.4.26", "Jan 24", sometimes junk)
//  ├── city         (optional)
//  ├── raw          (the exact scraped line, hashed into the content id)
//  └── source_url   (listing page the line came from)

/// One scraped tuple, exactly as the scraper hands it over.
#[derive(Debug, Clone, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date_text: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub source_url: String,
}
