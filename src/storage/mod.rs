mod json_store;

pub use json_store::JsonStore;

use crate::domain::snapshot::Snapshot;
use crate::errors::TrackerError;

/// Snapshot persistence boundary. One snapshot per state key; callers run
/// one pipeline per key and serialize saves externally.
pub trait Storage {
    /// The previously persisted snapshot for `state`. Nothing persisted
    /// yet is not an error: an empty snapshot comes back instead.
    fn load(&self, state: &str) -> Result<Snapshot, TrackerError>;

    fn save(&self, snapshot: &Snapshot, state: &str) -> Result<(), TrackerError>;
}
