//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod actor;
pub mod collision;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use collision::{Aabb, Contact, detect, first_contact};
pub use obstacle::{Obstacle, ObstacleField};
pub use state::{GameEvent, Phase, Session, SessionListener, Snapshot, dispatch};
pub use tick::{TickInput, tick};
