//! Capability traits: the small method sets that unlock move behaviour.
//!
//! Some capabilities are implemented by moves (which stacks to use, what to
//! count, when to stop). Others are implemented by game or player
//! sub-states (round-robin bookkeeping, seats, turn hooks). A move layer
//! that needs a capability names it as a bound, so a move that lacks one
//! does not compile.
//!
//! Stack and count capabilities have defaults that read the move type's
//! configuration bag. Sub-state capabilities have defaults backed by
//! well-known property names, so a game can opt in with an empty impl.

use crate::components::StackRef;
use crate::config::{keys, ConfigBag};
use crate::core::error::{ConfigurationError, IllegalMove, MoveError};
use crate::core::player::PlayerIndex;
use crate::core::property::{PropertyBag, PropertyType};
use crate::core::state::{State, SubState};

use super::base::Move;

/// Property names backing the default sub-state capabilities.
pub mod properties {
    pub const ROUND_ROBIN_LAST_PLAYER: &str = "RoundRobinLastPlayer";
    pub const ROUND_ROBIN_STARTER_PLAYER: &str = "RoundRobinStarterPlayer";
    pub const ROUND_ROBIN_ROUND_COUNT: &str = "RoundRobinRoundCount";
    pub const ROUND_ROBIN_HAS_STARTED: &str = "RoundRobinHasStarted";
    pub const SEAT_FILLED: &str = "SeatFilled";
    pub const SEAT_CLOSED: &str = "SeatClosed";
    pub const INACTIVE: &str = "Inactive";
}

fn configured(config: &ConfigBag, key: &'static str) -> Result<String, MoveError> {
    config
        .text(key)
        .map(str::to_string)
        .ok_or_else(|| ConfigurationError::MissingKey(key).into())
}

/// Check that a stack reference resolves on `state`.
///
/// Used by `valid_configuration`, so failures are configuration errors.
pub fn validate_stack<G: SubState, P: SubState>(
    state: &State<G, P>,
    stack: &StackRef,
) -> Result<(), MoveError> {
    state
        .properties_of(stack.owner)
        .and_then(|bag| bag.expect_type(&stack.property, PropertyType::Stack))
        .map_err(|err| MoveError::Configuration(err.into()))
}

// === Move capabilities ===

/// Names the stack components are taken from.
pub trait SourceStacker<G: SubState, P: SubState>: Move<G, P> {
    /// Defaults to the game stack named by `SourceStack`.
    fn source_stack(&self, _state: &State<G, P>) -> Result<StackRef, MoveError> {
        configured(self.configuration(), keys::SOURCE_STACK).map(StackRef::game)
    }
}

/// Names the stack components are put into.
pub trait DestinationStacker<G: SubState, P: SubState>: Move<G, P> {
    /// Defaults to the game stack named by `DestinationStack`.
    fn destination_stack(&self, _state: &State<G, P>) -> Result<StackRef, MoveError> {
        configured(self.configuration(), keys::DESTINATION_STACK).map(StackRef::game)
    }
}

/// The game side of a deal or collect.
pub trait GameStacker<G: SubState, P: SubState>: Move<G, P> {
    /// Defaults to the game stack named by `GameStack`.
    fn game_stack(&self, _state: &State<G, P>) -> Result<StackRef, MoveError> {
        configured(self.configuration(), keys::GAME_STACK).map(StackRef::game)
    }
}

/// The player side of a deal or collect.
pub trait PlayerStacker<G: SubState, P: SubState>: Move<G, P> {
    /// Defaults to `player`'s stack named by `PlayerStack`.
    fn player_stack(
        &self,
        _state: &State<G, P>,
        player: PlayerIndex,
    ) -> Result<StackRef, MoveError> {
        configured(self.configuration(), keys::PLAYER_STACK)
            .map(|property| StackRef::player(player, property))
    }
}

/// The target of an end condition. Must not be negative.
pub trait TargetCounter<G: SubState, P: SubState>: Move<G, P> {
    /// Defaults to `TargetCount`, or 1.
    fn target_count(&self, _state: &State<G, P>) -> i64 {
        self.configuration().target_count()
    }
}

/// Progress toward `target_count`. Must not be negative.
pub trait Counter<G: SubState, P: SubState>: TargetCounter<G, P> {
    fn count(&self, state: &State<G, P>) -> Result<i64, MoveError>;
}

/// Whole-move stop condition.
pub trait ConditionMetter<G: SubState, P: SubState>: Move<G, P> {
    /// `true` once the move should stop being applied.
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError>;
}

/// Per-player stop condition for round robins.
pub trait PlayerConditionMetter<G: SubState, P: SubState>: Move<G, P> {
    fn player_condition_met(
        &self,
        state: &State<G, P>,
        player: PlayerIndex,
    ) -> Result<bool, MoveError>;
}

/// Per-player action for round robins.
pub trait RoundRobinActioner<G: SubState, P: SubState>: Move<G, P> {
    fn round_robin_action(
        &self,
        state: &mut State<G, P>,
        player: PlayerIndex,
    ) -> Result<(), MoveError>;
}

/// Per-component legality, tested by default-component selection.
pub trait LegalComponent<G, P> {
    fn legal(&self, state: &State<G, P>, legal_type: i64) -> Result<(), MoveError>;
}

// === Sub-state capabilities ===

/// Round-robin bookkeeping on the game sub-state.
pub trait RoundRobinProperties: SubState {
    fn round_robin_last_player(&self) -> PlayerIndex {
        self.properties()
            .player(properties::ROUND_ROBIN_LAST_PLAYER)
            .unwrap_or(PlayerIndex::OBSERVER)
    }

    fn set_round_robin_last_player(&mut self, player: PlayerIndex) {
        self.properties_mut()
            .set(properties::ROUND_ROBIN_LAST_PLAYER, player);
    }

    fn round_robin_starter_player(&self) -> PlayerIndex {
        self.properties()
            .player(properties::ROUND_ROBIN_STARTER_PLAYER)
            .unwrap_or(PlayerIndex::OBSERVER)
    }

    fn set_round_robin_starter_player(&mut self, player: PlayerIndex) {
        self.properties_mut()
            .set(properties::ROUND_ROBIN_STARTER_PLAYER, player);
    }

    fn round_robin_round_count(&self) -> i64 {
        self.properties()
            .int(properties::ROUND_ROBIN_ROUND_COUNT)
            .unwrap_or(0)
    }

    fn set_round_robin_round_count(&mut self, count: i64) {
        self.properties_mut()
            .set(properties::ROUND_ROBIN_ROUND_COUNT, count);
    }

    fn round_robin_has_started(&self) -> bool {
        self.properties()
            .bool(properties::ROUND_ROBIN_HAS_STARTED)
            .unwrap_or(false)
    }

    fn set_round_robin_has_started(&mut self, started: bool) {
        self.properties_mut()
            .set(properties::ROUND_ROBIN_HAS_STARTED, started);
    }
}

impl RoundRobinProperties for PropertyBag {}

/// Turn hooks on the player sub-state, driven by `FinishTurn`.
pub trait PlayerTurnFinisher: SubState {
    /// `Ok` once the player has nothing left to do this turn.
    fn turn_done(&self) -> Result<(), IllegalMove>;

    fn reset_for_turn_start(&mut self) -> Result<(), MoveError> {
        Ok(())
    }

    fn reset_for_turn_end(&mut self) -> Result<(), MoveError> {
        Ok(())
    }
}

/// Sets whose turn it is.
pub trait CurrentPlayerSetter {
    fn set_current_player(&mut self, player: PlayerIndex);
}

impl<G: SubState, P: SubState> CurrentPlayerSetter for State<G, P> {
    fn set_current_player(&mut self, player: PlayerIndex) {
        State::set_current_player(self, player);
    }
}

/// Activity flags on the player sub-state.
pub trait PlayerInactiver {
    fn is_active(&self) -> bool;
    fn set_player_active(&mut self);
    fn set_player_inactive(&mut self);
}

impl PlayerInactiver for PropertyBag {
    fn is_active(&self) -> bool {
        !self.bool(properties::INACTIVE).unwrap_or(false)
    }

    fn set_player_active(&mut self) {
        self.set(properties::INACTIVE, false);
    }

    fn set_player_inactive(&mut self) {
        self.set(properties::INACTIVE, true);
    }
}

/// Seat flags on the player sub-state.
pub trait Seater: SubState {
    fn seat_is_filled(&self) -> bool {
        self.properties()
            .bool(properties::SEAT_FILLED)
            .unwrap_or(false)
    }

    fn seat_is_closed(&self) -> bool {
        self.properties()
            .bool(properties::SEAT_CLOSED)
            .unwrap_or(false)
    }

    fn set_seat_filled(&mut self) {
        self.properties_mut().set(properties::SEAT_FILLED, true);
    }

    fn set_seat_closed(&mut self) {
        self.properties_mut().set(properties::SEAT_CLOSED, true);
    }

    /// The same sub-state as a `PlayerInactiver`, if it is one.
    fn as_inactiver_mut(&mut self) -> Option<&mut dyn PlayerInactiver> {
        None
    }
}

impl Seater for PropertyBag {
    fn as_inactiver_mut(&mut self) -> Option<&mut dyn PlayerInactiver> {
        Some(self)
    }
}
