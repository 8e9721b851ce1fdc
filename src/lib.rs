//! # rust-moves
//!
//! A composable move library for turn-based, phase-driven board game engines.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The library knows nothing about any particular game.
//!    Games plug in their own game and player sub-states, stacks and
//!    properties, and pick the moves they need.
//!
//! 2. **Composition Over Inheritance**: Every move shares the base behaviour
//!    of `Move`. Behaviour layers (`ApplyUntilCount`, `RoundRobin`, ...) are
//!    traits a move opts into by implementing a few capability methods.
//!
//! 3. **Configuration Over Convention**: A move type is an example move plus
//!    `with_*` options. Names, help text, stacks and counts are all
//!    configuration; missing names are derived from the configuration.
//!
//! ## Architecture
//!
//! - **Propose / Legal / Apply**: A proposal builds a fresh move, fills in
//!   its defaults, checks `legal`, then applies it to a copy of the state.
//!   The copy replaces the state only on success.
//!
//! - **Fix-Up Moves**: After each move the registry applies the first legal
//!   fix-up move, repeatedly, until none is legal. Dealing, collecting and
//!   turn passing are all fix-ups.
//!
//! - **Persistent History**: Move history uses `im` vectors, so copying a
//!   state for a proposal is cheap.
//!
//! ## Modules
//!
//! - `core`: Players, phases, properties, state, history, RNG, errors
//! - `components`: Component chest and stacks
//! - `config`: Configuration bag, `with_*` options, move progressions
//! - `moves`: The move contract, capability traits, layers and ready-made moves
//! - `rules`: Move configuration and the registry that runs proposals

pub mod components;
pub mod config;
pub mod core;
pub mod moves;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ConfigurationError, IllegalMove, MoveError, MoveRecord, PhaseId, PlayerIndex, PlayerMap,
    PropertyBag, PropertyValue, State, SubState,
};

pub use crate::components::{ComponentChest, ComponentId, Stack, StackRef};

pub use crate::config::{ConfigBag, ConfigOption, ProgressionGroup};

pub use crate::moves::{Base, Move, MoveInfo};

pub use crate::rules::{AutoConfigurer, MoveConfig, MoveRegistry, MoveType};
