//! Game state as seen by moves.
//!
//! ## SubState
//!
//! Games bring their own game and player types. The only thing the move
//! library requires of them is access to a `PropertyBag`, through which
//! configured moves find stacks and counters by name.
//!
//! ## State
//!
//! A complete snapshot of one game:
//! - Game sub-state and one player sub-state per seat
//! - Current phase and current player
//! - Version counter and move history
//! - RNG, component chest, and the catalogue of registered moves
//!
//! Cloning a state is cheap enough to take a snapshot before every move:
//! the history is an `im` persistent vector and the chest and catalogue are shared.

use std::fmt::Debug;
use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;

use super::error::MoveError;
use super::phase::PhaseId;
use super::player::{PlayerIndex, PlayerMap};
use super::property::{PropertyBag, PropertyError};
use super::record::MoveRecord;
use super::rng::GameRng;
use crate::components::{
    Component, ComponentChest, ComponentId, SlotPosition, Stack, StackOwner, StackRef,
};
use crate::moves::MoveInfo;

/// A game or player sub-state.
pub trait SubState: Clone + Debug + 'static {
    fn properties(&self) -> &PropertyBag;
    fn properties_mut(&mut self) -> &mut PropertyBag;
}

impl SubState for PropertyBag {
    fn properties(&self) -> &PropertyBag {
        self
    }

    fn properties_mut(&mut self) -> &mut PropertyBag {
        self
    }
}

/// Registered move metadata, keyed by move name.
pub type MoveCatalogue = FxHashMap<String, Arc<MoveInfo>>;

/// Snapshot of a game.
///
/// ## Example
///
/// ```
/// use rust_moves::core::{PlayerIndex, PropertyBag, State};
///
/// let game = PropertyBag::new().with("Round", 1);
/// let players = vec![PropertyBag::new(); 3];
/// let state = State::new(game, players, 42).with_current_player(PlayerIndex::new(1));
///
/// assert_eq!(state.player_count(), 3);
/// assert_eq!(state.current_player(), PlayerIndex::new(1));
/// assert_eq!(state.version(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct State<G, P> {
    game: G,
    players: PlayerMap<P>,
    phase: PhaseId,
    current_player: PlayerIndex,
    version: u64,
    history: Vector<MoveRecord>,
    rng: GameRng,
    chest: Arc<ComponentChest<G, P>>,
    catalogue: Arc<MoveCatalogue>,
}

impl<G: SubState, P: SubState> State<G, P> {
    /// Create a new state.
    ///
    /// ## Defaults
    ///
    /// - `phase`: PhaseId(0)
    /// - `current_player`: Player 0
    /// - empty chest, empty history, no registered moves
    ///
    /// Panics if `players` is empty.
    #[must_use]
    pub fn new(game: G, players: Vec<P>, seed: u64) -> Self {
        Self {
            game,
            players: PlayerMap::new(players),
            phase: PhaseId::default(),
            current_player: PlayerIndex::new(0),
            version: 0,
            history: Vector::new(),
            rng: GameRng::new(seed),
            chest: Arc::new(ComponentChest::new()),
            catalogue: Arc::new(MoveCatalogue::default()),
        }
    }

    /// Builder: set the component chest.
    #[must_use]
    pub fn with_chest(mut self, chest: ComponentChest<G, P>) -> Self {
        self.chest = Arc::new(chest);
        self
    }

    /// Builder: set the starting phase.
    #[must_use]
    pub fn with_phase(mut self, phase: PhaseId) -> Self {
        self.phase = phase;
        self
    }

    /// Builder: set the starting player.
    #[must_use]
    pub fn with_current_player(mut self, player: PlayerIndex) -> Self {
        self.current_player = player;
        self
    }

    // === Sub-states ===

    #[must_use]
    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<P> {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut PlayerMap<P> {
        &mut self.players
    }

    /// A player's sub-state, or `None` for sentinels and unknown seats.
    #[must_use]
    pub fn player(&self, player: PlayerIndex) -> Option<&P> {
        self.players.get(player)
    }

    pub fn player_mut(&mut self, player: PlayerIndex) -> Option<&mut P> {
        self.players.get_mut(player)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    // === Turn and phase ===

    #[must_use]
    pub fn current_player(&self) -> PlayerIndex {
        self.current_player
    }

    pub fn set_current_player(&mut self, player: PlayerIndex) {
        self.current_player = player;
    }

    /// The current player's sub-state, if the current player is a seat.
    #[must_use]
    pub fn current_player_state(&self) -> Option<&P> {
        self.players.get(self.current_player)
    }

    pub fn current_player_state_mut(&mut self) -> Option<&mut P> {
        self.players.get_mut(self.current_player)
    }

    #[must_use]
    pub fn phase(&self) -> PhaseId {
        self.phase
    }

    pub fn set_phase(&mut self, phase: PhaseId) {
        self.phase = phase;
    }

    // === History ===

    /// Number of moves applied so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Record an applied move and bump the version.
    ///
    /// `phase` is the phase the move was proposed in.
    pub fn record_move(&mut self, name: impl Into<String>, phase: PhaseId, proposer: PlayerIndex) {
        self.version += 1;
        self.history
            .push_back(MoveRecord::new(name, phase, proposer, self.version));
    }

    /// The most recent record, if it was made in the current phase.
    #[must_use]
    pub fn last_record_in_phase(&self) -> Option<&MoveRecord> {
        self.history.last().filter(|record| record.phase == self.phase)
    }

    /// Names of the trailing run of records made in the current phase, oldest first.
    #[must_use]
    pub fn phase_history(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .history
            .iter()
            .rev()
            .take_while(|record| record.phase == self.phase)
            .map(|record| record.name.as_str())
            .collect();
        names.reverse();
        names
    }

    /// How many times in a row, most recently and in the current phase,
    /// a move named `name` has been applied.
    #[must_use]
    pub fn consecutive_applications(&self, name: &str) -> usize {
        self.history
            .iter()
            .rev()
            .take_while(|record| record.phase == self.phase && record.name == name)
            .count()
    }

    // === Registered moves ===

    /// Replace the catalogue of registered moves.
    pub fn set_move_catalogue(&mut self, catalogue: Arc<MoveCatalogue>) {
        self.catalogue = catalogue;
    }

    #[must_use]
    pub fn move_info(&self, name: &str) -> Option<&Arc<MoveInfo>> {
        self.catalogue.get(name)
    }

    /// Whether the registered move `name` may repeat within a move progression.
    ///
    /// Unknown names never repeat.
    #[must_use]
    pub fn allows_multiple_in_progression(&self, name: &str) -> bool {
        self.move_info(name)
            .map_or(false, |info| info.allow_multiple_in_progression())
    }

    // === Components and stacks ===

    #[must_use]
    pub fn chest(&self) -> &ComponentChest<G, P> {
        &self.chest
    }

    #[must_use]
    pub fn component(&self, id: ComponentId) -> Option<&Component<G, P>> {
        self.chest.component(id)
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// The property bag that owns a stack.
    pub fn properties_of(&self, owner: StackOwner) -> Result<&PropertyBag, PropertyError> {
        match owner {
            StackOwner::Game => Ok(self.game.properties()),
            StackOwner::Player(player) => self
                .players
                .get(player)
                .map(SubState::properties)
                .ok_or(PropertyError::NoSuchPlayer(player)),
        }
    }

    /// Resolve a stack reference.
    pub fn stack(&self, stack: &StackRef) -> Result<&Stack, PropertyError> {
        self.properties_of(stack.owner)?.stack(&stack.property)
    }

    /// Resolve a stack reference for mutation.
    pub fn stack_mut(&mut self, stack: &StackRef) -> Result<&mut Stack, PropertyError> {
        owner_properties_mut(&mut self.game, &mut self.players, stack.owner)?
            .stack_mut(&stack.property)
    }

    /// Move one component between stacks.
    ///
    /// Fails without touching either stack if the source has no component
    /// at `from_position` or the destination is full.
    pub fn move_component(
        &mut self,
        from: &StackRef,
        from_position: SlotPosition,
        to: &StackRef,
        to_position: SlotPosition,
    ) -> Result<ComponentId, MoveError> {
        if self.stack(to)?.is_full() {
            return Err(MoveError::Apply(format!("{} is full", to)));
        }
        let component = self.stack_mut(from)?.take(from_position)?;
        self.stack_mut(to)?.insert(component, to_position)?;
        Ok(component)
    }

    /// Shuffle a stack with the state's RNG.
    pub fn shuffle_stack(&mut self, stack: &StackRef) -> Result<(), MoveError> {
        let bag = owner_properties_mut(&mut self.game, &mut self.players, stack.owner)?;
        bag.stack_mut(&stack.property)?.shuffle(&mut self.rng);
        Ok(())
    }
}

fn owner_properties_mut<'a, G: SubState, P: SubState>(
    game: &'a mut G,
    players: &'a mut PlayerMap<P>,
    owner: StackOwner,
) -> Result<&'a mut PropertyBag, PropertyError> {
    match owner {
        StackOwner::Game => Ok(game.properties_mut()),
        StackOwner::Player(player) => players
            .get_mut(player)
            .map(SubState::properties_mut)
            .ok_or(PropertyError::NoSuchPlayer(player)),
    }
}
