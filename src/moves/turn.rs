//! Turn and phase moves.
//!
//! - `CurrentPlayer`: layer for moves only the current player may make
//! - `FinishTurn`: fix-up that passes the turn once the current player is done
//! - `StartPhase`: fix-up that switches to the configured phase

use log::debug;

use crate::config::keys;
use crate::core::error::{ConfigurationError, IllegalMove, MoveError};
use crate::core::player::PlayerIndex;
use crate::core::state::{State, SubState};

use super::base::{Base, Move};
use super::capabilities::{CurrentPlayerSetter, PlayerTurnFinisher};

/// A move made by the current player on their own behalf.
///
/// Implementors store the target player, fill it in from
/// `current_player_defaults` in `defaults_for_state`, and forward `legal`
/// to `current_player_legal`.
pub trait CurrentPlayer<G: SubState, P: SubState>: Move<G, P> {
    fn target_player(&self) -> PlayerIndex;
    fn set_target_player(&mut self, player: PlayerIndex);

    /// Target the player whose turn it is.
    fn current_player_defaults(&mut self, state: &State<G, P>) {
        self.set_target_player(state.current_player());
    }

    /// The base gate, then:
    /// 1. The target must be a seat of this game.
    /// 2. It must be the target's turn.
    /// 3. The proposer must be the target (or the admin).
    fn current_player_legal(
        &self,
        state: &State<G, P>,
        proposer: PlayerIndex,
    ) -> Result<(), MoveError> {
        self.base().legal(&self.name(), state)?;

        let target = self.target_player();
        if target.seat().is_none() || !target.is_valid(state.player_count()) {
            return Err(IllegalMove::TargetPlayerInvalid(target).into());
        }
        if !target.equivalent(state.current_player()) {
            return Err(IllegalMove::NotYourTurn(target).into());
        }
        if !target.equivalent(proposer) {
            return Err(IllegalMove::NotYourTurn(proposer).into());
        }
        Ok(())
    }
}

/// Pass the turn to the next player once the current one is done.
///
/// Runs `reset_for_turn_end` on the outgoing player and
/// `reset_for_turn_start` on the incoming one.
#[derive(Clone, Debug, Default)]
pub struct FinishTurn {
    base: Base,
}

impl<G: SubState, P: PlayerTurnFinisher> Move<G, P> for FinishTurn {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, _proposer: PlayerIndex) -> Result<(), MoveError> {
        self.base.legal(&Move::<G, P>::name(self), state)?;
        let player = state
            .current_player_state()
            .ok_or(IllegalMove::NoCurrentPlayer)?;
        player.turn_done()?;
        Ok(())
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        let current = state.current_player();
        state
            .current_player_state_mut()
            .ok_or(IllegalMove::NoCurrentPlayer)?
            .reset_for_turn_end()?;

        let next = current.next(state.player_count());
        CurrentPlayerSetter::set_current_player(state, next);

        state
            .current_player_state_mut()
            .ok_or(IllegalMove::NoCurrentPlayer)?
            .reset_for_turn_start()?;
        debug!("turn passed from {} to {}", current, next);
        Ok(())
    }

    fn fallback_help_text(&self) -> String {
        "Advances to the next player when the current player is done.".to_string()
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }
}

/// Switch to the phase configured by `PhaseToStart`.
#[derive(Clone, Debug, Default)]
pub struct StartPhase {
    base: Base,
}

impl<G: SubState, P: SubState> Move<G, P> for StartPhase {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, _proposer: PlayerIndex) -> Result<(), MoveError> {
        self.base.legal(&Move::<G, P>::name(self), state)?;
        let phase = self
            .base
            .configuration()
            .phase_to_start()
            .ok_or(ConfigurationError::MissingKey(keys::PHASE_TO_START))?;
        if state.phase() == phase {
            return Err(IllegalMove::PhaseAlreadyActive(phase).into());
        }
        Ok(())
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        let phase = self
            .base
            .configuration()
            .phase_to_start()
            .ok_or(ConfigurationError::MissingKey(keys::PHASE_TO_START))?;
        debug!("starting {} (was {})", phase, state.phase());
        state.set_phase(phase);
        Ok(())
    }

    fn valid_configuration(&self, _state: &State<G, P>) -> Result<(), MoveError> {
        if self.base.configuration().phase_to_start().is_none() {
            return Err(ConfigurationError::MissingKey(keys::PHASE_TO_START).into());
        }
        Ok(())
    }

    fn fallback_name(&self) -> String {
        match self.base.configuration().phase_to_start() {
            Some(phase) => format!("Start {}", phase),
            None => "Start Phase".to_string(),
        }
    }

    fn fallback_help_text(&self) -> String {
        match self.base.configuration().phase_to_start() {
            Some(phase) => format!("Enters {}.", phase),
            None => "Enters the next phase.".to_string(),
        }
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }
}
