//! Save/load persistence
//!
//! Features:
//! - Pluggable key-value storage (memory, JSON file, LocalStorage on web)
//! - Best score that survives restarts
//! - Fail-soft reads and writes: storage trouble never interrupts play

pub mod best_score;
pub mod store;

pub use best_score::BestScore;
pub use store::{KeyValueStore, MemoryStore, StorageError};

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;
