//! Best score persisted across sessions
//!
//! Stored as a plain integer string under a single key.

use super::store::KeyValueStore;

/// Highest score ever reached at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "skyhop_best_score";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Read the stored best; absent, unreadable or garbled values give 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(value) => {
                    log::info!("Loaded best score {}", value);
                    Self { value }
                }
                Err(_) => {
                    log::warn!("Ignoring unparsable best score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Best score unavailable: {}", e);
                Self::default()
            }
        }
    }

    /// Fold in a finished run's score. Writes only when the best improves;
    /// a failed write is logged and otherwise ignored. Returns true on a new
    /// best.
    pub fn record(&mut self, store: &mut dyn KeyValueStore, score: u32) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        match store.set(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", score),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
        true
    }
}
