//! Seating: filling, closing and activating player seats.
//!
//! - `SeatPlayer`: the admin seats a new participant in the first open seat
//! - `CloseEmptySeat`: fix-up that closes seats nobody took
//! - `ActivateInactivePlayer`: fix-up that lets newly seated players join in

use log::debug;

use crate::core::error::{IllegalMove, MoveError};
use crate::core::player::PlayerIndex;
use crate::core::state::{State, SubState};

use super::base::{Base, Move};
use super::capabilities::{PlayerInactiver, Seater};

/// The first seat that is neither filled nor closed.
fn first_open_seat<G: SubState, P: Seater>(state: &State<G, P>) -> Option<PlayerIndex> {
    state
        .players()
        .iter()
        .find(|(_, player)| !player.seat_is_filled() && !player.seat_is_closed())
        .map(|(index, _)| index)
}

/// Check that `target` names an open seat.
fn check_open_seat<G: SubState, P: Seater>(
    state: &State<G, P>,
    target: Option<PlayerIndex>,
) -> Result<PlayerIndex, MoveError> {
    let target = target.ok_or(IllegalMove::NoEligiblePlayer)?;
    let player = state
        .player(target)
        .ok_or(IllegalMove::TargetPlayerInvalid(target))?;
    if player.seat_is_filled() {
        return Err(IllegalMove::SeatAlreadyFilled(target).into());
    }
    if player.seat_is_closed() {
        return Err(IllegalMove::SeatAlreadyClosed(target).into());
    }
    Ok(target)
}

/// Seat a new participant. Only the admin may propose it.
///
/// The seated player starts out inactive if its sub-state is also a
/// `PlayerInactiver`.
#[derive(Clone, Debug, Default)]
pub struct SeatPlayer {
    base: Base,
    target_player: Option<PlayerIndex>,
}

impl SeatPlayer {
    /// The seat this move fills.
    #[must_use]
    pub fn target_player(&self) -> Option<PlayerIndex> {
        self.target_player
    }

    pub fn set_target_player(&mut self, player: PlayerIndex) {
        self.target_player = Some(player);
    }
}

impl<G: SubState, P: Seater> Move<G, P> for SeatPlayer {
    base_accessors!();

    fn defaults_for_state(&mut self, state: &State<G, P>) {
        self.target_player = first_open_seat(state);
    }

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        if proposer != PlayerIndex::ADMIN {
            return Err(IllegalMove::NotAdmin(proposer).into());
        }
        self.base.legal(&Move::<G, P>::name(self), state)?;
        check_open_seat(state, self.target_player)?;
        Ok(())
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        let target = self.target_player.ok_or(IllegalMove::NoEligiblePlayer)?;
        let player = state
            .player_mut(target)
            .ok_or(IllegalMove::TargetPlayerInvalid(target))?;
        player.set_seat_filled();
        if let Some(inactiver) = player.as_inactiver_mut() {
            inactiver.set_player_inactive();
        }
        debug!("seated {}", target);
        Ok(())
    }

    fn fallback_help_text(&self) -> String {
        "Seats a new participant in the first open seat.".to_string()
    }

    fn is_seat_player_move(&self) -> bool {
        true
    }
}

/// Close the first seat that is neither filled nor closed.
#[derive(Clone, Debug, Default)]
pub struct CloseEmptySeat {
    base: Base,
    target_player: Option<PlayerIndex>,
}

impl<G: SubState, P: Seater> Move<G, P> for CloseEmptySeat {
    base_accessors!();

    fn defaults_for_state(&mut self, state: &State<G, P>) {
        self.target_player = first_open_seat(state);
    }

    fn legal(&self, state: &State<G, P>, _proposer: PlayerIndex) -> Result<(), MoveError> {
        self.base.legal(&Move::<G, P>::name(self), state)?;
        check_open_seat(state, self.target_player)?;
        Ok(())
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        let target = self.target_player.ok_or(IllegalMove::NoEligiblePlayer)?;
        state
            .player_mut(target)
            .ok_or(IllegalMove::TargetPlayerInvalid(target))?
            .set_seat_closed();
        debug!("closed the seat of {}", target);
        Ok(())
    }

    fn fallback_help_text(&self) -> String {
        "Closes an empty seat so no one else can join.".to_string()
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

/// Activate the first inactive player.
#[derive(Clone, Debug, Default)]
pub struct ActivateInactivePlayer {
    base: Base,
    target_player: Option<PlayerIndex>,
}

impl<G: SubState, P: SubState + PlayerInactiver> Move<G, P> for ActivateInactivePlayer {
    base_accessors!();

    fn defaults_for_state(&mut self, state: &State<G, P>) {
        self.target_player = state
            .players()
            .iter()
            .find(|(_, player)| !player.is_active())
            .map(|(index, _)| index);
    }

    fn legal(&self, state: &State<G, P>, _proposer: PlayerIndex) -> Result<(), MoveError> {
        self.base.legal(&Move::<G, P>::name(self), state)?;
        let target = self.target_player.ok_or(IllegalMove::NoEligiblePlayer)?;
        match state.player(target) {
            Some(player) if !player.is_active() => Ok(()),
            Some(_) => Err(IllegalMove::NoEligiblePlayer.into()),
            None => Err(IllegalMove::TargetPlayerInvalid(target).into()),
        }
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        let target = self.target_player.ok_or(IllegalMove::NoEligiblePlayer)?;
        state
            .player_mut(target)
            .ok_or(IllegalMove::TargetPlayerInvalid(target))?
            .set_player_active();
        debug!("activated {}", target);
        Ok(())
    }

    fn fallback_help_text(&self) -> String {
        "Lets a newly seated player take part.".to_string()
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PropertyBag;

    type TestState = State<PropertyBag, PropertyBag>;

    fn new_state() -> TestState {
        State::new(PropertyBag::new(), vec![PropertyBag::new(); 3], 0)
    }

    fn as_dyn(m: &dyn Move<PropertyBag, PropertyBag>) -> &dyn Move<PropertyBag, PropertyBag> {
        m
    }

    #[test]
    fn test_seat_player_fills_first_open_seat() {
        let mut state = new_state();
        state.player_mut(PlayerIndex::new(0)).unwrap().set_seat_filled();
        let mut m = SeatPlayer::default();

        Move::<PropertyBag, PropertyBag>::defaults_for_state(&mut m, &state);
        assert_eq!(m.target_player(), Some(PlayerIndex::new(1)));
        assert!(m.legal(&state, PlayerIndex::ADMIN).is_ok());

        m.apply(&mut state).unwrap();
        let seated = state.player(PlayerIndex::new(1)).unwrap();
        assert!(seated.seat_is_filled());
        assert!(!seated.is_active());
        assert!(as_dyn(&m).is_seat_player_move());
        assert!(!as_dyn(&m).is_fix_up());
    }

    #[test]
    fn test_seat_player_is_admin_only() {
        let state = new_state();
        let mut m = SeatPlayer::default();
        Move::<PropertyBag, PropertyBag>::defaults_for_state(&mut m, &state);

        assert_eq!(
            m.legal(&state, PlayerIndex::new(0)),
            Err(IllegalMove::NotAdmin(PlayerIndex::new(0)).into())
        );
        assert_eq!(
            m.legal(&state, PlayerIndex::OBSERVER),
            Err(IllegalMove::NotAdmin(PlayerIndex::OBSERVER).into())
        );
    }

    #[test]
    fn test_seat_player_rejects_taken_seats() {
        let mut state = new_state();
        state.player_mut(PlayerIndex::new(1)).unwrap().set_seat_filled();
        state.player_mut(PlayerIndex::new(2)).unwrap().set_seat_closed();
        let mut m = SeatPlayer::default();

        m.set_target_player(PlayerIndex::new(1));
        assert_eq!(
            m.legal(&state, PlayerIndex::ADMIN),
            Err(IllegalMove::SeatAlreadyFilled(PlayerIndex::new(1)).into())
        );
        m.set_target_player(PlayerIndex::new(2));
        assert_eq!(
            m.legal(&state, PlayerIndex::ADMIN),
            Err(IllegalMove::SeatAlreadyClosed(PlayerIndex::new(2)).into())
        );
    }

    #[test]
    fn test_seat_player_with_no_open_seat() {
        let mut state = new_state();
        for player in PlayerIndex::all(3) {
            state.player_mut(player).unwrap().set_seat_filled();
        }
        let mut m = SeatPlayer::default();
        Move::<PropertyBag, PropertyBag>::defaults_for_state(&mut m, &state);

        assert_eq!(
            m.legal(&state, PlayerIndex::ADMIN),
            Err(IllegalMove::NoEligiblePlayer.into())
        );
    }

    #[test]
    fn test_close_empty_seats() {
        let mut state = new_state();
        state.player_mut(PlayerIndex::new(0)).unwrap().set_seat_filled();

        let mut closed = 0;
        loop {
            let mut m = CloseEmptySeat::default();
            Move::<PropertyBag, PropertyBag>::defaults_for_state(&mut m, &state);
            if m.legal(&state, PlayerIndex::ADMIN).is_err() {
                break;
            }
            m.apply(&mut state).unwrap();
            closed += 1;
        }

        assert_eq!(closed, 2);
        assert!(!state.player(PlayerIndex::new(0)).unwrap().seat_is_closed());
        assert!(state.player(PlayerIndex::new(2)).unwrap().seat_is_closed());
    }

    #[test]
    fn test_activate_inactive_player() {
        let mut state = new_state();
        state
            .player_mut(PlayerIndex::new(2))
            .unwrap()
            .set_player_inactive();
        let mut m = ActivateInactivePlayer::default();

        Move::<PropertyBag, PropertyBag>::defaults_for_state(&mut m, &state);
        assert!(m.legal(&state, PlayerIndex::ADMIN).is_ok());
        m.apply(&mut state).unwrap();
        assert!(state.player(PlayerIndex::new(2)).unwrap().is_active());

        let mut m = ActivateInactivePlayer::default();
        Move::<PropertyBag, PropertyBag>::defaults_for_state(&mut m, &state);
        assert_eq!(
            m.legal(&state, PlayerIndex::ADMIN),
            Err(IllegalMove::NoEligiblePlayer.into())
        );
    }
}
