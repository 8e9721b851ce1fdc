//! Round robins: apply an action to each player in turn.
//!
//! ## Cursor
//!
//! The cursor lives on the game sub-state (`RoundRobinProperties`): the
//! starter, the player most recently acted on, and the number of completed
//! rounds. A fresh round robin sets `last = starter`, so the first
//! application acts on the player after the starter and the application
//! that lands on (or passes) the starter completes a round.
//!
//! A round robin continues only while the most recent record in the
//! current phase is this same move. Anything else in between starts a
//! fresh one, so stale cursor values from an earlier run are never read.
//!
//! ## Termination
//!
//! `RoundRobin` stops once every player meets `player_condition_met`, and
//! skips players that already do. `RoundRobinNumRounds` stops after a fixed
//! number of rounds instead.

use log::trace;

use crate::core::error::{checked_count, IllegalMove, MoveError};
use crate::core::player::PlayerIndex;
use crate::core::state::{State, SubState};

use super::capabilities::{
    ConditionMetter, PlayerConditionMetter, RoundRobinActioner, RoundRobinProperties,
};

/// Where a round robin stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundRobinCursor {
    pub starter: PlayerIndex,
    pub last: PlayerIndex,
    pub round_count: i64,
}

impl RoundRobinCursor {
    /// A round robin that has not acted on anyone yet.
    #[must_use]
    pub fn fresh(starter: PlayerIndex) -> Self {
        Self {
            starter,
            last: starter,
            round_count: 0,
        }
    }

    /// The next player after `last` that `skip` does not reject, and
    /// whether reaching them completes a round.
    ///
    /// `None` when every player is skipped.
    pub fn step<F>(
        &self,
        player_count: usize,
        mut skip: F,
    ) -> Result<Option<(PlayerIndex, bool)>, MoveError>
    where
        F: FnMut(PlayerIndex) -> Result<bool, MoveError>,
    {
        let mut player = self.last.next(player_count);
        let mut wrapped = false;
        for _ in 0..player_count {
            if player == self.starter {
                wrapped = true;
            }
            if !skip(player)? {
                return Ok(Some((player, wrapped)));
            }
            player = player.next(player_count);
        }
        Ok(None)
    }
}

/// Apply `round_robin_action` to each player in succession.
///
/// Implementors forward `legal` and `apply` to `round_robin_legal` and
/// `round_robin_apply`, and usually answer `condition_met` with
/// `all_players_condition_met`. Round robins are fix-up moves that may be
/// applied several times in a row.
pub trait RoundRobin<G: RoundRobinProperties, P: SubState>:
    RoundRobinActioner<G, P> + PlayerConditionMetter<G, P> + ConditionMetter<G, P>
{
    /// The player a fresh round robin starts from.
    ///
    /// Defaults to the current player, or player 0 when that is not a seat.
    fn round_robin_start_player(&self, state: &State<G, P>) -> PlayerIndex {
        let current = state.current_player();
        match current.seat() {
            Some(seat) if seat < state.player_count() => current,
            _ => PlayerIndex::new(0),
        }
    }

    /// The cursor this application continues from.
    fn round_robin_cursor(&self, state: &State<G, P>) -> RoundRobinCursor {
        let game = state.game();
        let continuing = game.round_robin_has_started()
            && state
                .last_record_in_phase()
                .map_or(false, |record| record.name == self.name());

        let cursor = if continuing {
            RoundRobinCursor {
                starter: game.round_robin_starter_player(),
                last: game.round_robin_last_player(),
                round_count: game.round_robin_round_count(),
            }
        } else {
            let starter = self.round_robin_start_player(state);
            let starter = if starter.is_valid(state.player_count()) && starter.seat().is_some() {
                starter
            } else {
                PlayerIndex::new(0)
            };
            RoundRobinCursor::fresh(starter)
        };
        trace!("{} cursor: {:?} (continuing: {})", self.name(), cursor, continuing);
        cursor
    }

    /// Completed rounds of the round robin this application belongs to.
    fn round_robin_round_count(&self, state: &State<G, P>) -> i64 {
        self.round_robin_cursor(state).round_count
    }

    /// Whether every player meets `player_condition_met`.
    fn all_players_condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        for player in PlayerIndex::all(state.player_count()) {
            if !self.player_condition_met(state, player)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether the round robin passes over `player`.
    ///
    /// Defaults to players that already meet `player_condition_met`.
    fn round_robin_skip(
        &self,
        state: &State<G, P>,
        player: PlayerIndex,
    ) -> Result<bool, MoveError> {
        self.player_condition_met(state, player)
    }

    /// The player the next application acts on, and whether it completes a round.
    fn round_robin_next_player(
        &self,
        state: &State<G, P>,
    ) -> Result<Option<(PlayerIndex, bool)>, MoveError> {
        let cursor = self.round_robin_cursor(state);
        cursor.step(state.player_count(), |player| self.round_robin_skip(state, player))
    }

    fn round_robin_legal(
        &self,
        state: &State<G, P>,
        _proposer: PlayerIndex,
    ) -> Result<(), MoveError> {
        self.base().legal(&self.name(), state)?;
        if self.condition_met(state)? {
            return Err(IllegalMove::ConditionAlreadyMet.into());
        }
        if self.round_robin_next_player(state)?.is_none() {
            return Err(IllegalMove::NoEligiblePlayer.into());
        }
        Ok(())
    }

    /// Act on the next player and advance the cursor.
    fn round_robin_apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        let cursor = self.round_robin_cursor(state);
        let (player, wrapped) = cursor
            .step(state.player_count(), |player| self.round_robin_skip(state, player))?
            .ok_or(IllegalMove::NoEligiblePlayer)?;

        self.round_robin_action(state, player)?;

        let round_count = cursor.round_count + i64::from(wrapped);
        let game = state.game_mut();
        game.set_round_robin_starter_player(cursor.starter);
        game.set_round_robin_last_player(player);
        game.set_round_robin_round_count(round_count);
        game.set_round_robin_has_started(true);
        trace!("{} acted on {}, round {}", self.name(), player, round_count);
        Ok(())
    }
}

/// A round robin that runs for a fixed number of rounds.
///
/// Implementors answer `condition_met` with `num_rounds_reached` and
/// usually never meet `player_condition_met`.
pub trait RoundRobinNumRounds<G: RoundRobinProperties, P: SubState>: RoundRobin<G, P> {
    /// Defaults to `NumRounds`, or 1.
    fn num_rounds(&self, _state: &State<G, P>) -> i64 {
        self.configuration().num_rounds()
    }

    fn num_rounds_reached(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        let rounds = checked_count("number of rounds", self.num_rounds(state))?;
        Ok(self.round_robin_round_count(state) >= rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: PlayerIndex) -> Result<bool, MoveError> {
        Ok(false)
    }

    #[test]
    fn test_fresh_cursor_wraps_after_one_lap() {
        let mut cursor = RoundRobinCursor::fresh(PlayerIndex::new(1));
        let mut visited = Vec::new();

        for _ in 0..3 {
            let (player, wrapped) = cursor.step(3, never).unwrap().unwrap();
            visited.push((player.0, wrapped));
            cursor.last = player;
        }

        assert_eq!(visited, vec![(2, false), (0, false), (1, true)]);
    }

    #[test]
    fn test_step_skips_players() {
        let cursor = RoundRobinCursor::fresh(PlayerIndex::new(0));
        let skip_one = |player: PlayerIndex| Ok(player == PlayerIndex::new(1));

        assert_eq!(cursor.step(3, skip_one).unwrap(), Some((PlayerIndex::new(2), false)));
    }

    #[test]
    fn test_passing_a_skipped_starter_completes_a_round() {
        let cursor = RoundRobinCursor {
            starter: PlayerIndex::new(0),
            last: PlayerIndex::new(2),
            round_count: 0,
        };
        let skip_starter = |player: PlayerIndex| Ok(player == PlayerIndex::new(0));

        assert_eq!(cursor.step(3, skip_starter).unwrap(), Some((PlayerIndex::new(1), true)));
    }

    #[test]
    fn test_step_with_everyone_skipped() {
        let cursor = RoundRobinCursor::fresh(PlayerIndex::new(0));
        assert_eq!(cursor.step(4, |_| Ok(true)).unwrap(), None);
    }

    #[test]
    fn test_step_propagates_errors() {
        let cursor = RoundRobinCursor::fresh(PlayerIndex::new(0));
        let failing = |_: PlayerIndex| Err(MoveError::Internal("boom".to_string()));

        assert!(cursor.step(2, failing).is_err());
    }
}
