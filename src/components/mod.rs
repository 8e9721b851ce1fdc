//! Component system: the chest of physical components and the stacks that hold them.
//!
//! ## Key Types
//!
//! - `ComponentChest`: Every component of a game, grouped into decks
//! - `Component` / `ComponentValues`: A component and its game-defined values
//! - `Stack`: Ordered component slots, growable or sized
//! - `StackRef`: Address of a stack property on the game or a player
//! - `SlotPosition`: Where to take from or insert into a stack

pub mod chest;
pub mod stack;

pub use chest::{Component, ComponentChest, ComponentId, ComponentValues, Deck, DeckId};
pub use stack::{SlotPosition, Stack, StackError, StackOwner, StackRef};
