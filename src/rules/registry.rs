//! The move registry: installed move types and the proposal pipeline.
//!
//! A proposal runs `defaults_for_state` -> `legal` -> `apply` on a fresh
//! move. `apply` works on a copy of the state; the copy replaces the
//! original only if every step succeeds, so a failed move leaves no trace.
//!
//! After each player move the engine sweeps fix-up moves: the first fix-up
//! move legal for the admin is applied, then the sweep starts over, until
//! no fix-up move is legal.

use std::sync::Arc;

use log::{debug, trace, warn};
use rustc_hash::FxHashMap;

use crate::core::error::{ConfigurationError, IllegalMove, MoveError};
use crate::core::player::PlayerIndex;
use crate::core::state::{MoveCatalogue, State, SubState};
use crate::moves::Move;

use super::auto::{MoveConfig, MoveType};

/// Installed move types, in installation order, with unique names.
///
/// ## Example
///
/// ```
/// use rust_moves::config::with_game_property;
/// use rust_moves::core::{PlayerIndex, PropertyBag, State};
/// use rust_moves::moves::Increment;
/// use rust_moves::rules::{AutoConfigurer, MoveRegistry};
///
/// let mut state = State::new(PropertyBag::new().with("Round", 1), vec![PropertyBag::new(); 2], 0);
/// let configurer = AutoConfigurer::new(&state);
/// let registry = MoveRegistry::from_configs(vec![
///     configurer.must_config(Increment::default(), vec![with_game_property("Round")]),
/// ])
/// .unwrap();
///
/// registry.propose(&mut state, "Increment Round", PlayerIndex::ADMIN).unwrap();
/// assert_eq!(state.game().int("Round"), Ok(2));
/// assert_eq!(state.version(), 1);
/// ```
pub struct MoveRegistry<G, P> {
    types: Vec<MoveType<G, P>>,
    index: FxHashMap<String, usize>,
    catalogue: Arc<MoveCatalogue>,
}

impl<G: SubState, P: SubState> MoveRegistry<G, P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            index: FxHashMap::default(),
            catalogue: Arc::new(MoveCatalogue::default()),
        }
    }

    /// Install every config in order.
    pub fn from_configs(
        configs: impl IntoIterator<Item = MoveConfig<G, P>>,
    ) -> Result<Self, ConfigurationError> {
        let mut registry = Self::new();
        for config in configs {
            registry.install(config)?;
        }
        Ok(registry)
    }

    /// Install a move type. Names must be non-empty and unique.
    pub fn install(&mut self, config: MoveConfig<G, P>) -> Result<(), ConfigurationError> {
        let name = config.name();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        if self.index.contains_key(name) {
            return Err(ConfigurationError::DuplicateName(name.to_string()));
        }

        let move_type = MoveType::from_config(&config);
        Arc::make_mut(&mut self.catalogue)
            .insert(name.to_string(), Arc::clone(move_type.info()));
        self.index.insert(name.to_string(), self.types.len());
        self.types.push(move_type);
        debug!("installed move {:?}", name);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MoveType<G, P>> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    /// Installed move names, in installation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(MoveType::name)
    }

    #[must_use]
    pub fn move_types(&self) -> &[MoveType<G, P>] {
        &self.types
    }

    /// Metadata of every installed move, keyed by name.
    #[must_use]
    pub fn catalogue(&self) -> &Arc<MoveCatalogue> {
        &self.catalogue
    }

    /// Share this registry's move metadata with `state`.
    ///
    /// Progression checks need it to know which recorded moves may repeat.
    pub fn attach(&self, state: &mut State<G, P>) {
        state.set_move_catalogue(Arc::clone(&self.catalogue));
    }

    /// A new move named `name`, given its defaults for `state`.
    pub fn new_move(
        &self,
        state: &State<G, P>,
        name: &str,
    ) -> Result<Box<dyn Move<G, P>>, MoveError> {
        self.get(name)
            .map(|move_type| move_type.new_move(state))
            .ok_or_else(|| IllegalMove::UnknownMove(name.to_string()).into())
    }

    /// Names of the moves `proposer` could legally make right now.
    #[must_use]
    pub fn legal_moves(&self, state: &State<G, P>, proposer: PlayerIndex) -> Vec<&str> {
        self.types
            .iter()
            .filter(|move_type| move_type.new_move(state).legal(state, proposer).is_ok())
            .map(MoveType::name)
            .collect()
    }

    /// Propose the move `name` on behalf of `proposer` and apply it if legal.
    ///
    /// On success the move is recorded and the version bumped. On any error
    /// `state` is left exactly as it was.
    pub fn propose(
        &self,
        state: &mut State<G, P>,
        name: &str,
        proposer: PlayerIndex,
    ) -> Result<(), MoveError> {
        self.attach(state);
        let m = self.new_move(state, name)?;

        if let Err(err) = m.legal(state, proposer) {
            debug!("{} rejected {:?}: {}", proposer, name, err);
            return Err(err);
        }

        let phase = state.phase();
        let mut next = state.clone();
        match m.apply(&mut next) {
            Ok(()) => {
                next.record_move(m.name(), phase, proposer);
                debug!("{} applied {:?} (version {})", proposer, name, next.version());
                *state = next;
                Ok(())
            }
            Err(err) => {
                warn!("{:?} failed to apply, state rolled back: {}", name, err);
                Err(err)
            }
        }
    }

    /// The first installed fix-up move that is legal for the admin.
    ///
    /// `state` should have this registry attached.
    #[must_use]
    pub fn next_fix_up(&self, state: &State<G, P>) -> Option<&str> {
        self.types
            .iter()
            .filter(|move_type| move_type.info().is_fix_up())
            .find(|move_type| {
                let legal = move_type.new_move(state).legal(state, PlayerIndex::ADMIN);
                trace!("fix-up {:?}: {:?}", move_type.name(), legal);
                legal.is_ok()
            })
            .map(MoveType::name)
    }

    /// Apply legal fix-up moves until none is left, at most `limit` of them.
    ///
    /// Returns how many were applied.
    pub fn apply_fix_ups(&self, state: &mut State<G, P>, limit: usize) -> Result<usize, MoveError> {
        self.attach(state);
        let mut applied = 0;
        while applied < limit {
            let name = match self.next_fix_up(state) {
                Some(name) => name,
                None => break,
            };
            self.propose(state, name, PlayerIndex::ADMIN)?;
            applied += 1;
        }

        if applied == limit && self.next_fix_up(state).is_some() {
            warn!("fix-up sweep stopped at the limit of {} moves", limit);
        }
        debug!("fix-up sweep applied {} moves", applied);
        Ok(applied)
    }
}

impl<G: SubState, P: SubState> Default for MoveRegistry<G, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, P> std::fmt::Debug for MoveRegistry<G, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveRegistry")
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}
