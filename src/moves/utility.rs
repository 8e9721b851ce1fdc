//! Utility moves.
//!
//! - `ShuffleStack`: shuffle `SourceStack` with the state's RNG
//! - `Increment`: add `Amount` to an int property
//! - `NoOp`: does nothing; separates groups in a move progression
//! - `DefaultComponent`: layer that picks the first legal component of a stack

use log::{debug, trace};

use crate::config::{keys, ConfigBag};
use crate::core::error::{ConfigurationError, IllegalMove, MoveError};
use crate::core::player::PlayerIndex;
use crate::core::property::PropertyType;
use crate::core::state::{State, SubState};

use super::base::{Base, Move};
use super::capabilities::{validate_stack, SourceStacker};

/// Shuffle the stack named by `SourceStack`.
///
/// Legal whenever the base gate passes, so gate it with `LegalPhases` or a
/// move progression.
#[derive(Clone, Debug, Default)]
pub struct ShuffleStack {
    base: Base,
}

impl<G: SubState, P: SubState> Move<G, P> for ShuffleStack {
    base_accessors!();

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        let stack = self.source_stack(state)?;
        state.shuffle_stack(&stack)?;
        debug!("shuffled {}", stack);
        Ok(())
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_stack(state, &self.source_stack(state)?)
    }

    fn fallback_name(&self) -> String {
        match self.base.configuration().source_stack() {
            Some(stack) => format!("Shuffle {}", stack),
            None => "Shuffle Stack".to_string(),
        }
    }

    fn fallback_help_text(&self) -> String {
        match self.base.configuration().source_stack() {
            Some(stack) => format!("Shuffles the {} stack.", stack),
            None => "Shuffles a stack.".to_string(),
        }
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }
}

impl<G: SubState, P: SubState> SourceStacker<G, P> for ShuffleStack {}

/// The property an `Increment` adds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IncrementTarget<'a> {
    Game(&'a str),
    Player(&'a str),
}

impl<'a> IncrementTarget<'a> {
    fn from_config(config: &'a ConfigBag) -> Result<Self, MoveError> {
        match (config.game_property(), config.player_property()) {
            (Some(property), None) => Ok(IncrementTarget::Game(property)),
            (None, Some(property)) => Ok(IncrementTarget::Player(property)),
            (Some(_), Some(_)) => Err(ConfigurationError::ConflictingKeys(
                keys::GAME_PROPERTY,
                keys::PLAYER_PROPERTY,
            )
            .into()),
            (None, None) => Err(ConfigurationError::MissingKey(keys::GAME_PROPERTY).into()),
        }
    }

    fn property(self) -> &'a str {
        match self {
            IncrementTarget::Game(property) | IncrementTarget::Player(property) => property,
        }
    }
}

/// Add `Amount` (default 1) to the int property named by `GameProperty`
/// on the game, or by `PlayerProperty` on the current player.
#[derive(Clone, Debug, Default)]
pub struct Increment {
    base: Base,
}

impl<G: SubState, P: SubState> Move<G, P> for Increment {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, _proposer: PlayerIndex) -> Result<(), MoveError> {
        self.base.legal(&Move::<G, P>::name(self), state)?;
        let target = IncrementTarget::from_config(self.base.configuration())?;
        if matches!(target, IncrementTarget::Player(_)) && state.current_player_state().is_none() {
            return Err(IllegalMove::NoCurrentPlayer.into());
        }
        Ok(())
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        let config = self.base.configuration();
        let target = IncrementTarget::from_config(config)?;
        let properties = match target {
            IncrementTarget::Game(_) => state.game_mut().properties_mut(),
            IncrementTarget::Player(_) => state
                .current_player_state_mut()
                .ok_or(IllegalMove::NoCurrentPlayer)?
                .properties_mut(),
        };

        let property = target.property();
        let value = properties.int(property)? + config.amount();
        properties.set(property, value);
        trace!("{} is now {}", property, value);
        Ok(())
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        let target = IncrementTarget::from_config(self.base.configuration())?;
        let properties = match target {
            IncrementTarget::Game(_) => state.game().properties(),
            IncrementTarget::Player(_) => state
                .player(PlayerIndex::new(0))
                .map(SubState::properties)
                .ok_or_else(|| ConfigurationError::Invalid("game has no players".to_string()))?,
        };
        properties
            .expect_type(target.property(), PropertyType::Int)
            .map_err(|err| MoveError::Configuration(err.into()))
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        match config.game_property().or_else(|| config.player_property()) {
            Some(property) => format!("Increment {}", property),
            None => "Increment".to_string(),
        }
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        match config.game_property().or_else(|| config.player_property()) {
            Some(property) => format!("Adds {} to {}.", config.amount(), property),
            None => "Adds to a property.".to_string(),
        }
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }
}

/// Does nothing.
///
/// Placed between two groups of a move progression so that a repeatable
/// move at the end of one group is not matched by the start of the next.
#[derive(Clone, Debug, Default)]
pub struct NoOp {
    base: Base,
}

impl<G: SubState, P: SubState> Move<G, P> for NoOp {
    base_accessors!();

    fn fallback_help_text(&self) -> String {
        "Does nothing; separates groups in a move progression.".to_string()
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }
}

/// A move that acts on one component of `SourceStack`, chosen by default
/// as the first whose values accept it as legal.
///
/// Implementors store the chosen slot, call `default_component_defaults`
/// from `defaults_for_state`, forward `legal` to `default_component_legal`,
/// and do the actual work in `apply`.
pub trait DefaultComponent<G: SubState, P: SubState>: SourceStacker<G, P> {
    fn component_index(&self) -> Option<usize>;
    fn set_component_index(&mut self, index: Option<usize>);

    /// Passed to `LegalComponent::legal`. Defaults to `LegalType`, or 0.
    fn legal_type(&self) -> i64 {
        self.configuration().legal_type()
    }

    /// Pick the first slot of the source stack whose component is legal.
    fn default_component_defaults(&mut self, state: &State<G, P>) {
        let legal_type = self.legal_type();
        let chosen = self
            .source_stack(state)
            .ok()
            .and_then(|stack| state.stack(&stack).ok())
            .and_then(|stack| {
                stack.slots().iter().position(|slot| {
                    slot.and_then(|id| state.component(id))
                        .and_then(|component| component.values().as_legal_component())
                        .map_or(false, |legal| legal.legal(state, legal_type).is_ok())
                })
            });
        trace!("{} picked component slot {:?}", self.name(), chosen);
        self.set_component_index(chosen);
    }

    /// The base gate, then the chosen component must still be legal.
    fn default_component_legal(
        &self,
        state: &State<G, P>,
        _proposer: PlayerIndex,
    ) -> Result<(), MoveError> {
        self.base().legal(&self.name(), state)?;

        let index = self.component_index().ok_or(IllegalMove::NoLegalComponent)?;
        let invalid = |reason: String| IllegalMove::InvalidComponent { index, reason };

        let stack = state.stack(&self.source_stack(state)?)?;
        let id = stack
            .component_at(index)
            .ok_or_else(|| invalid("slot is empty".to_string()))?;
        let component = state
            .component(id)
            .ok_or_else(|| invalid(format!("component {} is not in the chest", id)))?;
        let legal = component
            .values()
            .as_legal_component()
            .ok_or_else(|| invalid("component has no legality check".to_string()))?;
        legal
            .legal(state, self.legal_type())
            .map_err(|err| invalid(err.to_string()))?;
        Ok(())
    }
}
