//! The move library: the move contract, capability traits, layers, and
//! ready-made moves.
//!
//! ## Key Types
//!
//! - `Move`: The contract every move implements; its provided methods are
//!   the base behaviour (phase and progression gates, name derivation)
//! - `Base` / `MoveInfo`: Per-move state and the shared move type metadata
//! - Capabilities: Small traits a move or sub-state implements to unlock
//!   a layer (`SourceStacker`, `ConditionMetter`, `Seater`, ...)
//! - Layers: `ApplyUntil`, `ApplyUntilCount`, `ApplyCountTimes`,
//!   `RoundRobin`, `RoundRobinNumRounds`, `CurrentPlayer`, `DefaultComponent`
//!
//! ## Ready-made moves
//!
//! | Module | Moves |
//! |--------|-------|
//! | `components` | `MoveCountComponents`, `DealAllComponents`, `CollectCountComponents`, ... |
//! | `turn` | `FinishTurn`, `StartPhase` |
//! | `utility` | `ShuffleStack`, `Increment`, `NoOp` |
//! | `seat` | `SeatPlayer`, `CloseEmptySeat`, `ActivateInactivePlayer` |

/// `base`/`base_mut` for a move struct with a `base: Base` field.
macro_rules! base_accessors {
    () => {
        fn base(&self) -> &$crate::moves::Base {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::moves::Base {
            &mut self.base
        }
    };
}

pub mod apply_until;
pub mod base;
pub mod capabilities;
pub mod components;
pub mod round_robin;
pub mod seat;
pub mod turn;
pub mod utility;

pub use apply_until::{ApplyCountTimes, ApplyUntil, ApplyUntilCount};
pub use base::{name_from_type, Base, Move, MoveInfo};
pub use capabilities::{
    properties, validate_stack, ConditionMetter, Counter, CurrentPlayerSetter,
    DestinationStacker, GameStacker, LegalComponent, PlayerConditionMetter, PlayerInactiver,
    PlayerStacker, PlayerTurnFinisher, RoundRobinActioner, RoundRobinProperties, Seater,
    SourceStacker, TargetCounter,
};
pub use components::{
    CollectAllComponents, CollectComponentsUntilGameCountReached,
    CollectComponentsUntilPlayerCountLeft, CollectCountComponents, DealAllComponents,
    DealComponentsUntilGameCountLeft, DealComponentsUntilPlayerCountReached, DealCountComponents,
    MoveAllComponents, MoveComponentsUntilCountLeft, MoveComponentsUntilCountReached,
    MoveCountComponents,
};
pub use round_robin::{RoundRobin, RoundRobinCursor, RoundRobinNumRounds};
pub use seat::{ActivateInactivePlayer, CloseEmptySeat, SeatPlayer};
pub use turn::{CurrentPlayer, FinishTurn, StartPhase};
pub use utility::{DefaultComponent, Increment, NoOp, ShuffleStack};
