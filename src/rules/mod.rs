//! Registering moves and running proposals.
//!
//! A game configures each of its move types once, against an example state:
//! - `AutoConfigurer` turns an example move plus `with_*` options into a
//!   `MoveConfig`, checking the configuration as it goes
//! - `MoveRegistry` installs the configs in order, enforces unique names,
//!   and runs proposals and fix-up sweeps against a `State`

pub mod auto;
pub mod registry;

pub use auto::{AutoConfigurer, MoveConfig, MoveConstructor, MoveType};
pub use registry::MoveRegistry;
