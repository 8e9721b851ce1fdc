//! Component movement: one component per application, from the first slot
//! of a source stack to the last slot of a destination stack.
//!
//! Three kinds of move cross four end conditions:
//!
//! | Kind | Source | Destination |
//! |------|--------|-------------|
//! | Move | `SourceStack` | `DestinationStack` |
//! | Deal | `GameStack` | each player's `PlayerStack` in turn |
//! | Collect | each player's `PlayerStack` in turn | `GameStack` |
//!
//! | End condition | Stop when |
//! |---------------|-----------|
//! | `CountComponents` | `TargetCount` applications (deals and collects: rounds) |
//! | `ComponentsUntilCountReached` | the destination holds at least `TargetCount` |
//! | `ComponentsUntilCountLeft` | the source holds at most `TargetCount` |
//! | `AllComponents` | the source is empty |
//!
//! Deals and collects are round robins. Their per-player conditions decide
//! which players the round robin passes over: a deal until every player
//! has three cards skips players that already do.
//!
//! All of these are fix-up moves that may be applied several times in a row.

use log::trace;

use crate::components::{SlotPosition, StackRef};
use crate::core::error::{checked_count, IllegalMove, MoveError};
use crate::core::player::PlayerIndex;
use crate::core::state::{State, SubState};

use super::apply_until::{ApplyCountTimes, ApplyUntil, ApplyUntilCount};
use super::base::{Base, Move};
use super::capabilities::{
    validate_stack, ConditionMetter, Counter, DestinationStacker, GameStacker,
    PlayerConditionMetter, PlayerStacker, RoundRobinActioner, RoundRobinProperties,
    SourceStacker, TargetCounter,
};
use super::round_robin::{RoundRobin, RoundRobinNumRounds};

fn num_components<G: SubState, P: SubState>(
    state: &State<G, P>,
    stack: &StackRef,
) -> Result<i64, MoveError> {
    Ok(state.stack(stack)?.num_components() as i64)
}

fn check_transfer<G: SubState, P: SubState>(
    state: &State<G, P>,
    from: &StackRef,
    to: &StackRef,
) -> Result<(), MoveError> {
    if state.stack(from)?.num_components() == 0 {
        return Err(IllegalMove::SourceEmpty.into());
    }
    if state.stack(to)?.is_full() {
        return Err(IllegalMove::DestinationFull.into());
    }
    Ok(())
}

fn transfer<G: SubState, P: SubState>(
    state: &mut State<G, P>,
    from: &StackRef,
    to: &StackRef,
) -> Result<(), MoveError> {
    let component = state.move_component(from, SlotPosition::First, to, SlotPosition::Last)?;
    trace!("moved component {} from {} to {}", component, from, to);
    Ok(())
}

fn label(property: Option<&str>) -> &str {
    property.unwrap_or("Stack")
}

// === Move kind ===

fn move_kind_legal<G, P, M>(
    m: &M,
    state: &State<G, P>,
    proposer: PlayerIndex,
) -> Result<(), MoveError>
where
    G: SubState,
    P: SubState,
    M: ConditionMetter<G, P> + SourceStacker<G, P> + DestinationStacker<G, P>,
{
    m.apply_until_legal(state, proposer)?;
    check_transfer(state, &m.source_stack(state)?, &m.destination_stack(state)?)
}

fn move_kind_apply<G, P, M>(m: &M, state: &mut State<G, P>) -> Result<(), MoveError>
where
    G: SubState,
    P: SubState,
    M: SourceStacker<G, P> + DestinationStacker<G, P>,
{
    let from = m.source_stack(state)?;
    let to = m.destination_stack(state)?;
    transfer(state, &from, &to)
}

fn validate_move_kind<G, P, M>(m: &M, state: &State<G, P>) -> Result<(), MoveError>
where
    G: SubState,
    P: SubState,
    M: SourceStacker<G, P> + DestinationStacker<G, P> + TargetCounter<G, P>,
{
    validate_stack(state, &m.source_stack(state)?)?;
    validate_stack(state, &m.destination_stack(state)?)?;
    checked_count("target count", m.target_count(state))?;
    Ok(())
}

/// Move `TargetCount` components from `SourceStack` to `DestinationStack`.
#[derive(Clone, Debug, Default)]
pub struct MoveCountComponents {
    base: Base,
}

impl<G: SubState, P: SubState> Move<G, P> for MoveCountComponents {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        move_kind_legal(self, state, proposer)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        move_kind_apply(self, state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_move_kind(self, state)?;
        self.validate_counts(state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Move {} Components From {} To {}",
            config.target_count(),
            label(config.source_stack()),
            label(config.destination_stack())
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Moves {} components from {} to {}.",
            config.target_count(),
            label(config.source_stack()),
            label(config.destination_stack())
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: SubState, P: SubState> SourceStacker<G, P> for MoveCountComponents {}
impl<G: SubState, P: SubState> DestinationStacker<G, P> for MoveCountComponents {}
impl<G: SubState, P: SubState> TargetCounter<G, P> for MoveCountComponents {}

impl<G: SubState, P: SubState> Counter<G, P> for MoveCountComponents {
    fn count(&self, state: &State<G, P>) -> Result<i64, MoveError> {
        Ok(self.count_times(state))
    }
}

impl<G: SubState, P: SubState> ConditionMetter<G, P> for MoveCountComponents {
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        self.count_reached(state)
    }
}

/// Move components until `DestinationStack` holds at least `TargetCount`.
#[derive(Clone, Debug, Default)]
pub struct MoveComponentsUntilCountReached {
    base: Base,
}

impl<G: SubState, P: SubState> Move<G, P> for MoveComponentsUntilCountReached {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        move_kind_legal(self, state, proposer)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        move_kind_apply(self, state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_move_kind(self, state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Move Components From {} Until {} Has {}",
            label(config.source_stack()),
            label(config.destination_stack()),
            config.target_count()
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Moves components from {} to {} until {} holds {}.",
            label(config.source_stack()),
            label(config.destination_stack()),
            label(config.destination_stack()),
            config.target_count()
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: SubState, P: SubState> SourceStacker<G, P> for MoveComponentsUntilCountReached {}
impl<G: SubState, P: SubState> DestinationStacker<G, P> for MoveComponentsUntilCountReached {}
impl<G: SubState, P: SubState> TargetCounter<G, P> for MoveComponentsUntilCountReached {}

impl<G: SubState, P: SubState> ConditionMetter<G, P> for MoveComponentsUntilCountReached {
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        let target = checked_count("target count", self.target_count(state))?;
        Ok(num_components(state, &self.destination_stack(state)?)? >= target)
    }
}

/// Move components until `SourceStack` holds at most `TargetCount`.
#[derive(Clone, Debug, Default)]
pub struct MoveComponentsUntilCountLeft {
    base: Base,
}

impl<G: SubState, P: SubState> Move<G, P> for MoveComponentsUntilCountLeft {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        move_kind_legal(self, state, proposer)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        move_kind_apply(self, state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_move_kind(self, state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Move Components From {} To {} Until {} Left",
            label(config.source_stack()),
            label(config.destination_stack()),
            config.target_count()
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Moves components from {} to {} until {} are left.",
            label(config.source_stack()),
            label(config.destination_stack()),
            config.target_count()
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: SubState, P: SubState> SourceStacker<G, P> for MoveComponentsUntilCountLeft {}
impl<G: SubState, P: SubState> DestinationStacker<G, P> for MoveComponentsUntilCountLeft {}
impl<G: SubState, P: SubState> TargetCounter<G, P> for MoveComponentsUntilCountLeft {}

impl<G: SubState, P: SubState> ConditionMetter<G, P> for MoveComponentsUntilCountLeft {
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        let target = checked_count("target count", self.target_count(state))?;
        Ok(num_components(state, &self.source_stack(state)?)? <= target)
    }
}

/// Move every component from `SourceStack` to `DestinationStack`.
#[derive(Clone, Debug, Default)]
pub struct MoveAllComponents {
    base: Base,
}

impl<G: SubState, P: SubState> Move<G, P> for MoveAllComponents {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        move_kind_legal(self, state, proposer)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        move_kind_apply(self, state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_move_kind(self, state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Move All Components From {} To {}",
            label(config.source_stack()),
            label(config.destination_stack())
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Moves every component from {} to {}.",
            label(config.source_stack()),
            label(config.destination_stack())
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: SubState, P: SubState> SourceStacker<G, P> for MoveAllComponents {}
impl<G: SubState, P: SubState> DestinationStacker<G, P> for MoveAllComponents {}
impl<G: SubState, P: SubState> TargetCounter<G, P> for MoveAllComponents {}

impl<G: SubState, P: SubState> ConditionMetter<G, P> for MoveAllComponents {
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        Ok(num_components(state, &self.source_stack(state)?)? == 0)
    }
}

// === Deal and collect kinds ===

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Deal,
    Collect,
}

fn round_robin_stacks<G, P, M>(
    m: &M,
    state: &State<G, P>,
    player: PlayerIndex,
    flow: Flow,
) -> Result<(StackRef, StackRef), MoveError>
where
    G: SubState,
    P: SubState,
    M: GameStacker<G, P> + PlayerStacker<G, P>,
{
    let game = m.game_stack(state)?;
    let player = m.player_stack(state, player)?;
    Ok(match flow {
        Flow::Deal => (game, player),
        Flow::Collect => (player, game),
    })
}

fn round_robin_kind_legal<G, P, M>(
    m: &M,
    state: &State<G, P>,
    proposer: PlayerIndex,
    flow: Flow,
) -> Result<(), MoveError>
where
    G: RoundRobinProperties,
    P: SubState,
    M: RoundRobin<G, P> + GameStacker<G, P> + PlayerStacker<G, P>,
{
    m.round_robin_legal(state, proposer)?;
    if let Some((player, _)) = m.round_robin_next_player(state)? {
        let (from, to) = round_robin_stacks(m, state, player, flow)?;
        check_transfer(state, &from, &to)?;
    }
    Ok(())
}

fn round_robin_kind_action<G, P, M>(
    m: &M,
    state: &mut State<G, P>,
    player: PlayerIndex,
    flow: Flow,
) -> Result<(), MoveError>
where
    G: SubState,
    P: SubState,
    M: GameStacker<G, P> + PlayerStacker<G, P>,
{
    let (from, to) = round_robin_stacks(m, state, player, flow)?;
    transfer(state, &from, &to)
}

fn validate_round_robin_kind<G, P, M>(m: &M, state: &State<G, P>) -> Result<(), MoveError>
where
    G: SubState,
    P: SubState,
    M: GameStacker<G, P> + PlayerStacker<G, P> + TargetCounter<G, P>,
{
    validate_stack(state, &m.game_stack(state)?)?;
    validate_stack(state, &m.player_stack(state, PlayerIndex::new(0))?)?;
    checked_count("target count", m.target_count(state))?;
    Ok(())
}

fn player_components<G, P, M>(
    m: &M,
    state: &State<G, P>,
    player: PlayerIndex,
) -> Result<i64, MoveError>
where
    G: SubState,
    P: SubState,
    M: PlayerStacker<G, P>,
{
    num_components(state, &m.player_stack(state, player)?)
}

fn game_components<G, P, M>(m: &M, state: &State<G, P>) -> Result<i64, MoveError>
where
    G: SubState,
    P: SubState,
    M: GameStacker<G, P>,
{
    num_components(state, &m.game_stack(state)?)
}

/// Deal `TargetCount` rounds of one component from `GameStack` to every
/// player's `PlayerStack`.
#[derive(Clone, Debug, Default)]
pub struct DealCountComponents {
    base: Base,
}

impl<G: RoundRobinProperties, P: SubState> Move<G, P> for DealCountComponents {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        round_robin_kind_legal(self, state, proposer, Flow::Deal)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        self.round_robin_apply(state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_round_robin_kind(self, state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Deal {} Components From {} To Each {}",
            config.target_count(),
            label(config.game_stack()),
            label(config.player_stack())
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Deals {} components from {} to each player's {}.",
            config.target_count(),
            label(config.game_stack()),
            label(config.player_stack())
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: RoundRobinProperties, P: SubState> GameStacker<G, P> for DealCountComponents {}
impl<G: RoundRobinProperties, P: SubState> PlayerStacker<G, P> for DealCountComponents {}
impl<G: RoundRobinProperties, P: SubState> TargetCounter<G, P> for DealCountComponents {}
impl<G: RoundRobinProperties, P: SubState> RoundRobin<G, P> for DealCountComponents {}

impl<G: RoundRobinProperties, P: SubState> RoundRobinNumRounds<G, P> for DealCountComponents {
    fn num_rounds(&self, state: &State<G, P>) -> i64 {
        self.target_count(state)
    }
}

impl<G: RoundRobinProperties, P: SubState> RoundRobinActioner<G, P> for DealCountComponents {
    fn round_robin_action(
        &self,
        state: &mut State<G, P>,
        player: PlayerIndex,
    ) -> Result<(), MoveError> {
        round_robin_kind_action(self, state, player, Flow::Deal)
    }
}

impl<G: RoundRobinProperties, P: SubState> PlayerConditionMetter<G, P> for DealCountComponents {
    fn player_condition_met(
        &self,
        _state: &State<G, P>,
        _player: PlayerIndex,
    ) -> Result<bool, MoveError> {
        Ok(false)
    }
}

impl<G: RoundRobinProperties, P: SubState> ConditionMetter<G, P> for DealCountComponents {
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        self.num_rounds_reached(state)
    }
}

/// Deal from `GameStack` until every player's `PlayerStack` holds at least
/// `TargetCount`.
#[derive(Clone, Debug, Default)]
pub struct DealComponentsUntilPlayerCountReached {
    base: Base,
}

impl<G: RoundRobinProperties, P: SubState> Move<G, P> for DealComponentsUntilPlayerCountReached {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        round_robin_kind_legal(self, state, proposer, Flow::Deal)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        self.round_robin_apply(state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_round_robin_kind(self, state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Deal Components From {} Until Each {} Has {}",
            label(config.game_stack()),
            label(config.player_stack()),
            config.target_count()
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Deals components from {} until each player's {} holds {}.",
            label(config.game_stack()),
            label(config.player_stack()),
            config.target_count()
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: RoundRobinProperties, P: SubState> GameStacker<G, P>
    for DealComponentsUntilPlayerCountReached
{
}
impl<G: RoundRobinProperties, P: SubState> PlayerStacker<G, P>
    for DealComponentsUntilPlayerCountReached
{
}
impl<G: RoundRobinProperties, P: SubState> TargetCounter<G, P>
    for DealComponentsUntilPlayerCountReached
{
}
impl<G: RoundRobinProperties, P: SubState> RoundRobin<G, P>
    for DealComponentsUntilPlayerCountReached
{
}

impl<G: RoundRobinProperties, P: SubState> RoundRobinActioner<G, P>
    for DealComponentsUntilPlayerCountReached
{
    fn round_robin_action(
        &self,
        state: &mut State<G, P>,
        player: PlayerIndex,
    ) -> Result<(), MoveError> {
        round_robin_kind_action(self, state, player, Flow::Deal)
    }
}

impl<G: RoundRobinProperties, P: SubState> PlayerConditionMetter<G, P>
    for DealComponentsUntilPlayerCountReached
{
    fn player_condition_met(
        &self,
        state: &State<G, P>,
        player: PlayerIndex,
    ) -> Result<bool, MoveError> {
        let target = checked_count("target count", self.target_count(state))?;
        Ok(player_components(self, state, player)? >= target)
    }
}

impl<G: RoundRobinProperties, P: SubState> ConditionMetter<G, P>
    for DealComponentsUntilPlayerCountReached
{
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        self.all_players_condition_met(state)
    }
}

/// Deal from `GameStack` until it holds at most `TargetCount`.
#[derive(Clone, Debug, Default)]
pub struct DealComponentsUntilGameCountLeft {
    base: Base,
}

impl<G: RoundRobinProperties, P: SubState> Move<G, P> for DealComponentsUntilGameCountLeft {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        round_robin_kind_legal(self, state, proposer, Flow::Deal)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        self.round_robin_apply(state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_round_robin_kind(self, state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Deal Components From {} To Each {} Until {} Left",
            label(config.game_stack()),
            label(config.player_stack()),
            config.target_count()
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Deals components from {} to each player's {} until {} are left.",
            label(config.game_stack()),
            label(config.player_stack()),
            config.target_count()
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: RoundRobinProperties, P: SubState> GameStacker<G, P> for DealComponentsUntilGameCountLeft {}
impl<G: RoundRobinProperties, P: SubState> PlayerStacker<G, P>
    for DealComponentsUntilGameCountLeft
{
}
impl<G: RoundRobinProperties, P: SubState> TargetCounter<G, P>
    for DealComponentsUntilGameCountLeft
{
}
impl<G: RoundRobinProperties, P: SubState> RoundRobin<G, P> for DealComponentsUntilGameCountLeft {}

impl<G: RoundRobinProperties, P: SubState> RoundRobinActioner<G, P>
    for DealComponentsUntilGameCountLeft
{
    fn round_robin_action(
        &self,
        state: &mut State<G, P>,
        player: PlayerIndex,
    ) -> Result<(), MoveError> {
        round_robin_kind_action(self, state, player, Flow::Deal)
    }
}

impl<G: RoundRobinProperties, P: SubState> PlayerConditionMetter<G, P>
    for DealComponentsUntilGameCountLeft
{
    fn player_condition_met(
        &self,
        _state: &State<G, P>,
        _player: PlayerIndex,
    ) -> Result<bool, MoveError> {
        Ok(false)
    }
}

impl<G: RoundRobinProperties, P: SubState> ConditionMetter<G, P>
    for DealComponentsUntilGameCountLeft
{
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        let target = checked_count("target count", self.target_count(state))?;
        Ok(game_components(self, state)? <= target)
    }
}

/// Deal every component of `GameStack` to the players' `PlayerStack`s.
#[derive(Clone, Debug, Default)]
pub struct DealAllComponents {
    base: Base,
}

impl<G: RoundRobinProperties, P: SubState> Move<G, P> for DealAllComponents {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        round_robin_kind_legal(self, state, proposer, Flow::Deal)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        self.round_robin_apply(state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_round_robin_kind(self, state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Deal All Components From {} To Each {}",
            label(config.game_stack()),
            label(config.player_stack())
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Deals every component of {} out to the players' {}.",
            label(config.game_stack()),
            label(config.player_stack())
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: RoundRobinProperties, P: SubState> GameStacker<G, P> for DealAllComponents {}
impl<G: RoundRobinProperties, P: SubState> PlayerStacker<G, P> for DealAllComponents {}
impl<G: RoundRobinProperties, P: SubState> TargetCounter<G, P> for DealAllComponents {}
impl<G: RoundRobinProperties, P: SubState> RoundRobin<G, P> for DealAllComponents {}

impl<G: RoundRobinProperties, P: SubState> RoundRobinActioner<G, P> for DealAllComponents {
    fn round_robin_action(
        &self,
        state: &mut State<G, P>,
        player: PlayerIndex,
    ) -> Result<(), MoveError> {
        round_robin_kind_action(self, state, player, Flow::Deal)
    }
}

impl<G: RoundRobinProperties, P: SubState> PlayerConditionMetter<G, P> for DealAllComponents {
    fn player_condition_met(
        &self,
        _state: &State<G, P>,
        _player: PlayerIndex,
    ) -> Result<bool, MoveError> {
        Ok(false)
    }
}

impl<G: RoundRobinProperties, P: SubState> ConditionMetter<G, P> for DealAllComponents {
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        Ok(game_components(self, state)? == 0)
    }
}

/// Collect `TargetCount` rounds of one component from every player's
/// `PlayerStack` into `GameStack`.
#[derive(Clone, Debug, Default)]
pub struct CollectCountComponents {
    base: Base,
}

impl<G: RoundRobinProperties, P: SubState> Move<G, P> for CollectCountComponents {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        round_robin_kind_legal(self, state, proposer, Flow::Collect)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        self.round_robin_apply(state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_round_robin_kind(self, state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Collect {} Components From Each {} To {}",
            config.target_count(),
            label(config.player_stack()),
            label(config.game_stack())
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Collects {} components from each player's {} into {}.",
            config.target_count(),
            label(config.player_stack()),
            label(config.game_stack())
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: RoundRobinProperties, P: SubState> GameStacker<G, P> for CollectCountComponents {}
impl<G: RoundRobinProperties, P: SubState> PlayerStacker<G, P> for CollectCountComponents {}
impl<G: RoundRobinProperties, P: SubState> TargetCounter<G, P> for CollectCountComponents {}
impl<G: RoundRobinProperties, P: SubState> RoundRobin<G, P> for CollectCountComponents {}

impl<G: RoundRobinProperties, P: SubState> RoundRobinNumRounds<G, P> for CollectCountComponents {
    fn num_rounds(&self, state: &State<G, P>) -> i64 {
        self.target_count(state)
    }
}

impl<G: RoundRobinProperties, P: SubState> RoundRobinActioner<G, P> for CollectCountComponents {
    fn round_robin_action(
        &self,
        state: &mut State<G, P>,
        player: PlayerIndex,
    ) -> Result<(), MoveError> {
        round_robin_kind_action(self, state, player, Flow::Collect)
    }
}

impl<G: RoundRobinProperties, P: SubState> PlayerConditionMetter<G, P> for CollectCountComponents {
    fn player_condition_met(
        &self,
        _state: &State<G, P>,
        _player: PlayerIndex,
    ) -> Result<bool, MoveError> {
        Ok(false)
    }
}

impl<G: RoundRobinProperties, P: SubState> ConditionMetter<G, P> for CollectCountComponents {
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        self.num_rounds_reached(state)
    }
}

/// Collect into `GameStack` until every player's `PlayerStack` holds at
/// most `TargetCount`.
#[derive(Clone, Debug, Default)]
pub struct CollectComponentsUntilPlayerCountLeft {
    base: Base,
}

impl<G: RoundRobinProperties, P: SubState> Move<G, P> for CollectComponentsUntilPlayerCountLeft {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        round_robin_kind_legal(self, state, proposer, Flow::Collect)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        self.round_robin_apply(state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_round_robin_kind(self, state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Collect Components From Each {} To {} Until {} Left",
            label(config.player_stack()),
            label(config.game_stack()),
            config.target_count()
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Collects components into {} until each player's {} holds {}.",
            label(config.game_stack()),
            label(config.player_stack()),
            config.target_count()
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: RoundRobinProperties, P: SubState> GameStacker<G, P>
    for CollectComponentsUntilPlayerCountLeft
{
}
impl<G: RoundRobinProperties, P: SubState> PlayerStacker<G, P>
    for CollectComponentsUntilPlayerCountLeft
{
}
impl<G: RoundRobinProperties, P: SubState> TargetCounter<G, P>
    for CollectComponentsUntilPlayerCountLeft
{
}
impl<G: RoundRobinProperties, P: SubState> RoundRobin<G, P>
    for CollectComponentsUntilPlayerCountLeft
{
}

impl<G: RoundRobinProperties, P: SubState> RoundRobinActioner<G, P>
    for CollectComponentsUntilPlayerCountLeft
{
    fn round_robin_action(
        &self,
        state: &mut State<G, P>,
        player: PlayerIndex,
    ) -> Result<(), MoveError> {
        round_robin_kind_action(self, state, player, Flow::Collect)
    }
}

impl<G: RoundRobinProperties, P: SubState> PlayerConditionMetter<G, P>
    for CollectComponentsUntilPlayerCountLeft
{
    fn player_condition_met(
        &self,
        state: &State<G, P>,
        player: PlayerIndex,
    ) -> Result<bool, MoveError> {
        let target = checked_count("target count", self.target_count(state))?;
        Ok(player_components(self, state, player)? <= target)
    }
}

impl<G: RoundRobinProperties, P: SubState> ConditionMetter<G, P>
    for CollectComponentsUntilPlayerCountLeft
{
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        self.all_players_condition_met(state)
    }
}

/// Collect from the players until `GameStack` holds at least `TargetCount`.
///
/// Players with nothing left to give are passed over.
#[derive(Clone, Debug, Default)]
pub struct CollectComponentsUntilGameCountReached {
    base: Base,
}

impl<G: RoundRobinProperties, P: SubState> Move<G, P> for CollectComponentsUntilGameCountReached {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        round_robin_kind_legal(self, state, proposer, Flow::Collect)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        self.round_robin_apply(state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_round_robin_kind(self, state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Collect Components From Each {} Until {} Has {}",
            label(config.player_stack()),
            label(config.game_stack()),
            config.target_count()
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Collects components from each player's {} until {} holds {}.",
            label(config.player_stack()),
            label(config.game_stack()),
            config.target_count()
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: RoundRobinProperties, P: SubState> GameStacker<G, P>
    for CollectComponentsUntilGameCountReached
{
}
impl<G: RoundRobinProperties, P: SubState> PlayerStacker<G, P>
    for CollectComponentsUntilGameCountReached
{
}
impl<G: RoundRobinProperties, P: SubState> TargetCounter<G, P>
    for CollectComponentsUntilGameCountReached
{
}
impl<G: RoundRobinProperties, P: SubState> RoundRobin<G, P>
    for CollectComponentsUntilGameCountReached
{
}

impl<G: RoundRobinProperties, P: SubState> RoundRobinActioner<G, P>
    for CollectComponentsUntilGameCountReached
{
    fn round_robin_action(
        &self,
        state: &mut State<G, P>,
        player: PlayerIndex,
    ) -> Result<(), MoveError> {
        round_robin_kind_action(self, state, player, Flow::Collect)
    }
}

impl<G: RoundRobinProperties, P: SubState> PlayerConditionMetter<G, P>
    for CollectComponentsUntilGameCountReached
{
    fn player_condition_met(
        &self,
        state: &State<G, P>,
        player: PlayerIndex,
    ) -> Result<bool, MoveError> {
        Ok(player_components(self, state, player)? == 0)
    }
}

impl<G: RoundRobinProperties, P: SubState> ConditionMetter<G, P>
    for CollectComponentsUntilGameCountReached
{
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        let target = checked_count("target count", self.target_count(state))?;
        Ok(game_components(self, state)? >= target)
    }
}

/// Collect every component from the players' `PlayerStack`s into `GameStack`.
#[derive(Clone, Debug, Default)]
pub struct CollectAllComponents {
    base: Base,
}

impl<G: RoundRobinProperties, P: SubState> Move<G, P> for CollectAllComponents {
    base_accessors!();

    fn legal(&self, state: &State<G, P>, proposer: PlayerIndex) -> Result<(), MoveError> {
        round_robin_kind_legal(self, state, proposer, Flow::Collect)
    }

    fn apply(&self, state: &mut State<G, P>) -> Result<(), MoveError> {
        self.round_robin_apply(state)
    }

    fn valid_configuration(&self, state: &State<G, P>) -> Result<(), MoveError> {
        validate_round_robin_kind(self, state)
    }

    fn fallback_name(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Collect All Components From Each {} To {}",
            label(config.player_stack()),
            label(config.game_stack())
        )
    }

    fn fallback_help_text(&self) -> String {
        let config = self.base.configuration();
        format!(
            "Collects every component of the players' {} into {}.",
            label(config.player_stack()),
            label(config.game_stack())
        )
    }

    fn fallback_is_fix_up(&self) -> bool {
        true
    }

    fn allow_multiple_in_progression(&self) -> bool {
        true
    }
}

impl<G: RoundRobinProperties, P: SubState> GameStacker<G, P> for CollectAllComponents {}
impl<G: RoundRobinProperties, P: SubState> PlayerStacker<G, P> for CollectAllComponents {}
impl<G: RoundRobinProperties, P: SubState> TargetCounter<G, P> for CollectAllComponents {}
impl<G: RoundRobinProperties, P: SubState> RoundRobin<G, P> for CollectAllComponents {}

impl<G: RoundRobinProperties, P: SubState> RoundRobinActioner<G, P> for CollectAllComponents {
    fn round_robin_action(
        &self,
        state: &mut State<G, P>,
        player: PlayerIndex,
    ) -> Result<(), MoveError> {
        round_robin_kind_action(self, state, player, Flow::Collect)
    }
}

impl<G: RoundRobinProperties, P: SubState> PlayerConditionMetter<G, P> for CollectAllComponents {
    fn player_condition_met(
        &self,
        state: &State<G, P>,
        player: PlayerIndex,
    ) -> Result<bool, MoveError> {
        Ok(player_components(self, state, player)? == 0)
    }
}

impl<G: RoundRobinProperties, P: SubState> ConditionMetter<G, P> for CollectAllComponents {
    fn condition_met(&self, state: &State<G, P>) -> Result<bool, MoveError> {
        self.all_players_condition_met(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::type_name;
    use std::sync::Arc;

    use crate::components::{ComponentId, DeckId, Stack};
    use crate::config::{
        with_destination_stack, with_game_stack, with_player_stack, with_source_stack,
        with_target_count, ConfigBag, ConfigOption,
    };
    use crate::core::{ConfigurationError, PropertyBag};
    use crate::moves::MoveInfo;

    type TestState = State<PropertyBag, PropertyBag>;

    fn ids(range: std::ops::Range<u32>) -> Vec<ComponentId> {
        range.map(|i| ComponentId::new(DeckId::new(0), i)).collect()
    }

    fn wired<M: Move<PropertyBag, PropertyBag>>(mut m: M, options: Vec<ConfigOption>) -> M {
        let bag = Arc::new(ConfigBag::from_options(options));
        let info =
            MoveInfo::new("", type_name::<M>(), bag).with_allow_multiple_in_progression(true);
        m.set_info(Arc::new(info));
        m
    }

    /// Apply `m` as the admin until it is no longer legal, recording each
    /// application the way the registry does.
    fn run<M: Move<PropertyBag, PropertyBag>>(m: &M, state: &mut TestState) -> usize {
        let mut applied = 0;
        while m.legal(state, PlayerIndex::ADMIN).is_ok() {
            m.apply(state).unwrap();
            let phase = state.phase();
            state.record_move(m.name(), phase, PlayerIndex::ADMIN);
            applied += 1;
            assert!(applied < 100, "{} never stopped", m.name());
        }
        applied
    }

    fn table_state(draw: u32) -> TestState {
        let game = PropertyBag::new()
            .with("Draw", Stack::from_components(ids(0..draw)))
            .with("Discard", Stack::new());
        let players = vec![PropertyBag::new().with("Hand", Stack::new()); 3];
        State::new(game, players, 7)
    }

    fn stack(state: &TestState, stack: StackRef) -> Vec<ComponentId> {
        state.stack(&stack).unwrap().components().collect()
    }

    fn hand(state: &TestState, player: i32) -> Vec<ComponentId> {
        stack(state, StackRef::player(PlayerIndex::new(player), "Hand"))
    }

    fn move_options(target: i64) -> Vec<ConfigOption> {
        vec![
            with_source_stack("Draw"),
            with_destination_stack("Discard"),
            with_target_count(target),
        ]
    }

    fn deal_options(target: i64) -> Vec<ConfigOption> {
        vec![
            with_game_stack("Draw"),
            with_player_stack("Hand"),
            with_target_count(target),
        ]
    }

    #[test]
    fn test_move_until_count_reached() {
        let m = wired(MoveComponentsUntilCountReached::default(), move_options(3));
        let mut state = table_state(5);

        assert_eq!(run(&m, &mut state), 3);
        assert_eq!(stack(&state, StackRef::game("Draw")), ids(3..5));
        assert_eq!(stack(&state, StackRef::game("Discard")), ids(0..3));
        assert_eq!(
            m.legal(&state, PlayerIndex::ADMIN),
            Err(IllegalMove::ConditionAlreadyMet.into())
        );
    }

    #[test]
    fn test_move_count_components_counts_applications() {
        let m = wired(MoveCountComponents::default(), move_options(2));
        let mut state = table_state(5);

        assert_eq!(run(&m, &mut state), 2);
        assert_eq!(stack(&state, StackRef::game("Discard")), ids(0..2));
    }

    #[test]
    fn test_move_until_count_left() {
        let m = wired(MoveComponentsUntilCountLeft::default(), move_options(1));
        let mut state = table_state(4);

        assert_eq!(run(&m, &mut state), 3);
        assert_eq!(stack(&state, StackRef::game("Draw")), ids(3..4));
    }

    #[test]
    fn test_move_all_components() {
        let m = wired(MoveAllComponents::default(), move_options(1));
        let mut state = table_state(4);

        assert_eq!(run(&m, &mut state), 4);
        assert!(stack(&state, StackRef::game("Draw")).is_empty());
        assert_eq!(stack(&state, StackRef::game("Discard")), ids(0..4));
    }

    #[test]
    fn test_source_empty_before_condition_met() {
        let m = wired(MoveComponentsUntilCountReached::default(), move_options(3));
        let mut state = table_state(1);

        assert_eq!(run(&m, &mut state), 1);
        assert_eq!(
            m.legal(&state, PlayerIndex::ADMIN),
            Err(IllegalMove::SourceEmpty.into())
        );
    }

    #[test]
    fn test_sized_destination_fills_up() {
        let m = wired(MoveAllComponents::default(), move_options(1));
        let mut state = table_state(3);
        state
            .game_mut()
            .properties_mut()
            .set("Discard", Stack::sized(2));

        assert_eq!(run(&m, &mut state), 2);
        assert_eq!(
            m.legal(&state, PlayerIndex::ADMIN),
            Err(IllegalMove::DestinationFull.into())
        );
    }

    #[test]
    fn test_fix_up_multi_defaults() {
        let m = wired(MoveAllComponents::default(), move_options(1));
        let m: &dyn Move<PropertyBag, PropertyBag> = &m;

        assert!(m.is_fix_up());
        assert!(m.allow_multiple_in_progression());
        assert_eq!(m.name(), "Move All Components From Draw To Discard");
    }

    #[test]
    fn test_deal_count_components_deals_rounds() {
        let m = wired(DealCountComponents::default(), deal_options(2));
        let mut state = table_state(7);

        assert_eq!(run(&m, &mut state), 6);
        assert_eq!(hand(&state, 1), vec![ids(0..1)[0], ids(3..4)[0]]);
        assert_eq!(hand(&state, 2), vec![ids(1..2)[0], ids(4..5)[0]]);
        assert_eq!(hand(&state, 0), vec![ids(2..3)[0], ids(5..6)[0]]);
        assert_eq!(stack(&state, StackRef::game("Draw")), ids(6..7));
        assert_eq!(state.game().round_robin_round_count(), 2);
    }

    #[test]
    fn test_deal_until_player_count_reached_skips_full_hands() {
        let m = wired(DealComponentsUntilPlayerCountReached::default(), deal_options(2));
        let mut state = table_state(6);
        state
            .player_mut(PlayerIndex::new(2))
            .unwrap()
            .set("Hand", Stack::from_components(ids(10..12)));

        assert_eq!(run(&m, &mut state), 4);
        assert_eq!(hand(&state, 0).len(), 2);
        assert_eq!(hand(&state, 1).len(), 2);
        assert_eq!(hand(&state, 2), ids(10..12));
    }

    #[test]
    fn test_deal_until_game_count_left() {
        let m = wired(DealComponentsUntilGameCountLeft::default(), deal_options(2));
        let mut state = table_state(6);

        assert_eq!(run(&m, &mut state), 4);
        assert_eq!(stack(&state, StackRef::game("Draw")).len(), 2);
    }

    #[test]
    fn test_deal_all_components() {
        let m = wired(DealAllComponents::default(), deal_options(1));
        let mut state = table_state(5);

        assert_eq!(run(&m, &mut state), 5);
        assert_eq!(hand(&state, 1).len(), 2);
        assert_eq!(hand(&state, 2).len(), 2);
        assert_eq!(hand(&state, 0).len(), 1);
    }

    #[test]
    fn test_collect_all_skips_empty_hands() {
        let m = wired(CollectAllComponents::default(), deal_options(1));
        let mut state = table_state(0);
        state
            .player_mut(PlayerIndex::new(0))
            .unwrap()
            .set("Hand", Stack::from_components(ids(0..2)));
        state
            .player_mut(PlayerIndex::new(2))
            .unwrap()
            .set("Hand", Stack::from_components(ids(2..3)));

        assert_eq!(run(&m, &mut state), 3);
        assert_eq!(stack(&state, StackRef::game("Draw")).len(), 3);
        assert!((0..3).all(|p| hand(&state, p).is_empty()));
    }

    #[test]
    fn test_collect_count_components() {
        let m = wired(CollectCountComponents::default(), deal_options(1));
        let mut state = table_state(0);
        for player in PlayerIndex::all(3) {
            let start = player.0 as u32 * 10;
            state
                .player_mut(player)
                .unwrap()
                .set("Hand", Stack::from_components(ids(start..start + 2)));
        }

        assert_eq!(run(&m, &mut state), 3);
        assert!((0..3).all(|p| hand(&state, p).len() == 1));
    }

    #[test]
    fn test_collect_until_player_count_left() {
        let m = wired(CollectComponentsUntilPlayerCountLeft::default(), deal_options(1));
        let mut state = table_state(0);
        state
            .player_mut(PlayerIndex::new(1))
            .unwrap()
            .set("Hand", Stack::from_components(ids(0..3)));

        assert_eq!(run(&m, &mut state), 2);
        assert_eq!(hand(&state, 1), ids(2..3));
    }

    #[test]
    fn test_collect_until_game_count_reached() {
        let m = wired(CollectComponentsUntilGameCountReached::default(), deal_options(2));
        let mut state = table_state(0);
        state
            .player_mut(PlayerIndex::new(2))
            .unwrap()
            .set("Hand", Stack::from_components(ids(0..4)));

        assert_eq!(run(&m, &mut state), 2);
        assert_eq!(stack(&state, StackRef::game("Draw")), ids(0..2));
    }

    #[test]
    fn test_valid_configuration() {
        let state = table_state(3);

        let m = wired(MoveAllComponents::default(), move_options(1));
        assert!(m.valid_configuration(&state).is_ok());

        let m = wired(MoveAllComponents::default(), vec![with_source_stack("Draw")]);
        assert_eq!(
            m.valid_configuration(&state),
            Err(ConfigurationError::MissingKey(crate::config::keys::DESTINATION_STACK).into())
        );

        let m = wired(
            DealAllComponents::default(),
            vec![with_game_stack("Draw"), with_player_stack("Pocket")],
        );
        assert_eq!(
            m.valid_configuration(&state),
            Err(ConfigurationError::NoSuchProperty("Pocket".to_string()).into())
        );

        let m = wired(DealCountComponents::default(), deal_options(-2));
        assert!(matches!(
            m.valid_configuration(&state),
            Err(MoveError::Configuration(ConfigurationError::NegativeCount { .. }))
        ));
    }
}
