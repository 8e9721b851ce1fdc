//! Core types: players, phases, properties, state, history, RNG, errors.
//!
//! This module contains the building blocks every move is written against.
//! Games plug their own game and player types in through `SubState`.

pub mod error;
pub mod phase;
pub mod player;
pub mod property;
pub mod record;
pub mod rng;
pub mod state;

pub use error::{checked_count, ConfigurationError, IllegalMove, MoveError};
pub use phase::PhaseId;
pub use player::{PlayerIndex, PlayerMap};
pub use property::{PropertyBag, PropertyError, PropertyType, PropertyValue};
pub use record::MoveRecord;
pub use rng::GameRng;
pub use state::{MoveCatalogue, State, SubState};
