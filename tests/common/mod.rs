//! Shared fixtures for integration tests: a small card game's sub-states
//! and a couple of game-defined moves.

#![allow(dead_code)]

use rust_moves::components::{ComponentId, DeckId, Stack};
use rust_moves::core::{IllegalMove, MoveError, PlayerIndex, PropertyBag, State, SubState};
use rust_moves::moves::{
    ApplyCountTimes, ApplyUntil, ApplyUntilCount, Base, ConditionMetter, Counter, Move,
    PlayerConditionMetter, PlayerInactiver, PlayerTurnFinisher, RoundRobin, RoundRobinActioner,
    RoundRobinNumRounds, RoundRobinProperties, Seater, TargetCounter,
};

/// Install `env_logger` once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Game sub-state: stacks and counters as properties, round-robin
/// bookkeeping through the property-bag defaults.
#[derive(Clone, Debug, Default)]
pub struct TestGame {
    pub properties: PropertyBag,
}

impl SubState for TestGame {
    fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut PropertyBag {
        &mut self.properties
    }
}

impl RoundRobinProperties for TestGame {}

/// Player sub-state with turn hooks that count their calls.
#[derive(Clone, Debug)]
pub struct TestPlayer {
    pub properties: PropertyBag,
    pub done: bool,
    pub active: bool,
    pub turn_starts: u32,
    pub turn_ends: u32,
}

impl TestPlayer {
    pub fn new() -> Self {
        Self {
            properties: PropertyBag::new().with("Hand", Stack::new()).with("Score", 0),
            done: false,
            active: true,
            turn_starts: 0,
            turn_ends: 0,
        }
    }
}

impl Default for TestPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubState for TestPlayer {
    fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut PropertyBag {
        &mut self.properties
    }
}

impl PlayerTurnFinisher for TestPlayer {
    fn turn_done(&self) -> Result<(), IllegalMove> {
        if self.done {
            Ok(())
        } else {
            Err(IllegalMove::ConditionNotMet("turn is not over".to_string()))
        }
    }

    fn reset_for_turn_start(&mut self) -> Result<(), MoveError> {
        self.turn_starts += 1;
        self.done = false;
        Ok(())
    }

    fn reset_for_turn_end(&mut self) -> Result<(), MoveError> {
        self.turn_ends += 1;
        Ok(())
    }
}

impl PlayerInactiver for TestPlayer {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_player_active(&mut self) {
        self.active = true;
    }

    fn set_player_inactive(&mut self) {
        self.active = false;
    }
}

impl Seater for TestPlayer {
    fn as_inactiver_mut(&mut self) -> Option<&mut dyn PlayerInactiver> {
        Some(self)
    }
}

pub type TestState = State<TestGame, TestPlayer>;

/// Component IDs `0..count` of deck 0.
pub fn cards(count: u32) -> Vec<ComponentId> {
    (0..count).map(|i| ComponentId::new(DeckId::new(0), i)).collect()
}

/// A game with a `Draw` pile of `draw` cards, an empty `Discard` pile and
/// a `Round` counter.
pub fn new_state(player_count: usize, draw: u32) -> TestState {
    let game = TestGame {
        properties: PropertyBag::new()
            .with("Draw", Stack::from_components(cards(draw)))
            .with("Discard", Stack::new())
            .with("Round", 1),
    };
    State::new(game, vec![TestPlayer::new(); player_count], 42)
}

/// A game-defined move that does nothing and may repeat within a
/// progression step.
#[derive(Clone, Debug, Default)]
pub struct Tick {
    base: Base,
}

impl<G: SubState, P: SubState> Move<G, P> for Tick {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

/// Marks the current player's turn as over.
#[derive(Clone, Debug, Default)]
pub struct EndMyTurn {
    base: Base,
}

impl Move<TestGame, TestPlayer> for EndMyTurn {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn legal(&self, state: &TestState, proposer: PlayerIndex) -> Result<(), MoveError> {
        self.base.legal(&self.name(), state)?;
        if !proposer.equivalent(state.current_player()) {
            return Err(IllegalMove::NotYourTurn(proposer).into());
        }
        Ok(())
    }

    fn apply(&self, state: &mut TestState) -> Result<(), MoveError> {
        state
            .current_player_state_mut()
            .ok_or(IllegalMove::NoCurrentPlayer)?
            .done = true;
        Ok(())
    }
}

/// Rolls `TargetCount` times in a row, bumping `Round` each time.
#[derive(Clone, Debug, Default)]
pub struct RollDice {
    base: Base,
}

impl Move<TestGame, TestPlayer> for RollDice {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn legal(&self, state: &TestState, proposer: PlayerIndex) -> Result<(), MoveError> {
        self.apply_until_legal(state, proposer)
    }

    fn apply(&self, state: &mut TestState) -> Result<(), MoveError> {
        let round = state.game().properties.int("Round")?;
        state.game_mut().properties.set("Round", round + 1);
        Ok(())
    }

    fn fallback_name(&self) -> String {
        self.count_times_fallback_name()
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl TargetCounter<TestGame, TestPlayer> for RollDice {}

impl Counter<TestGame, TestPlayer> for RollDice {
    fn count(&self, state: &TestState) -> Result<i64, MoveError> {
        Ok(self.count_times(state))
    }
}

impl ConditionMetter<TestGame, TestPlayer> for RollDice {
    fn condition_met(&self, state: &TestState) -> Result<bool, MoveError> {
        self.count_reached(state)
    }
}

/// Gives every player a point per round, for `NumRounds` rounds.
#[derive(Clone, Debug, Default)]
pub struct AwardPoint {
    base: Base,
}

impl Move<TestGame, TestPlayer> for AwardPoint {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn legal(&self, state: &TestState, proposer: PlayerIndex) -> Result<(), MoveError> {
        self.round_robin_legal(state, proposer)
    }

    fn apply(&self, state: &mut TestState) -> Result<(), MoveError> {
        self.round_robin_apply(state)
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl RoundRobin<TestGame, TestPlayer> for AwardPoint {}
impl RoundRobinNumRounds<TestGame, TestPlayer> for AwardPoint {}

impl RoundRobinActioner<TestGame, TestPlayer> for AwardPoint {
    fn round_robin_action(
        &self,
        state: &mut TestState,
        player: PlayerIndex,
    ) -> Result<(), MoveError> {
        let properties = &mut state
            .player_mut(player)
            .ok_or(IllegalMove::TargetPlayerInvalid(player))?
            .properties;
        let score = properties.int("Score")?;
        properties.set("Score", score + 1);
        Ok(())
    }
}

impl PlayerConditionMetter<TestGame, TestPlayer> for AwardPoint {
    fn player_condition_met(
        &self,
        _state: &TestState,
        _player: PlayerIndex,
    ) -> Result<bool, MoveError> {
        Ok(false)
    }
}

impl ConditionMetter<TestGame, TestPlayer> for AwardPoint {
    fn condition_met(&self, state: &TestState) -> Result<bool, MoveError> {
        self.num_rounds_reached(state)
    }
}
