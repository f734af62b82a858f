use chrono::Utc;
use golfwatch::domain::changes::ChangeType;
use golfwatch::domain::dates;
use golfwatch::feed;
use golfwatch::runner;
use golfwatch::storage::JsonStore;
use std::env;
use std::process;

const SNAPSHOT_DIR: &str = "snapshots";

fn main() {
    // 1️⃣ Collect run inputs
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: golfwatch <feed.json> [state|ALL]");
        process::exit(2);
    }
    let feed_path = &args[1];
    let state_filter = args.get(2).map(String::as_str).unwrap_or("");

    // 2️⃣ Load the scraped feed
    let listings = match feed::load_feed(feed_path) {
        Ok(listings) => listings,
        Err(e) => {
            eprintln!("❌ Feed load failed: {e}");
            process::exit(1);
        }
    };
    println!("Loaded {} listings from {feed_path}", listings.len());

    // 3️⃣ Diff against the previous snapshot and persist the new one
    let store = JsonStore::new(SNAPSHOT_DIR);
    let report = match runner::run(&store, &listings, state_filter) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("❌ Run failed: {e}");
            process::exit(1);
        }
    };

    // 4️⃣ Human-readable summary
    let today = Utc::now().date_naive();
    for (state, events) in &report.diff.states {
        let mut events = events.clone();
        dates::sort_by_date_on(&mut events, today);
        println!("\n{state}: {} new", events.len());
        for event in &events {
            let when = dates::format_event_date(&event.date_text, today);
            // Past listings still show up (never silently dropped), just
            // flagged so nobody drives out to a finished tournament.
            let marker = if dates::is_past_event_on(&event.date_text, today) {
                "[past]"
            } else {
                "•"
            };
            if event.city.is_empty() {
                println!("  {marker} {} on {when}", event.title);
            } else {
                println!("  {marker} {} ({}) on {when}", event.title, event.city);
            }
        }
    }

    let soon = report
        .diff
        .new_events
        .iter()
        .filter(|e| dates::is_within_days_on(&e.date_text, 30, today))
        .count();
    if soon > 0 {
        println!("\n⏳ {soon} of the new listings tee off within 30 days");
    }

    let field_changes: Vec<_> = report
        .changes
        .iter()
        .filter(|c| c.change_type != ChangeType::New)
        .collect();
    if !field_changes.is_empty() {
        println!("\nChanged:");
        for change in field_changes {
            println!(
                "  ~ {} changed: {:?} -> {:?}",
                change.change_type.as_str(),
                change.old_value,
                change.new_value
            );
        }
    }

    if !report.removed.is_empty() {
        println!("\nRemoved:");
        for event in &report.removed {
            println!("  - {} ({})", event.title, event.state);
        }
    }
}
