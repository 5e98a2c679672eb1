pub mod config;
pub mod stats;
pub mod timer;

use pomodoro_pro_core::{Database, KeyValueStore, MemoryStore};

/// Open the on-disk store, or fall back to memory so the timer still runs
/// when the database is unavailable. Nothing persists in that case.
pub fn open_backend() -> Box<dyn KeyValueStore> {
    match Database::open() {
        Ok(db) => Box::new(db),
        Err(e) => {
            tracing::warn!(error = %e, "database unavailable, stats will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}
