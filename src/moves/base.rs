//! The move contract and the base behaviour every move shares.
//!
//! A move is a small value constructed fresh for every proposal. The engine
//! drives it through `defaults_for_state` -> `legal` -> `apply`. Everything a
//! move needs beyond its own few fields lives in the `State` or in the
//! configuration bag of its move type.
//!
//! ## Layering
//!
//! Moves are composed from layers. Every provided method of `Move` (and of
//! the layer traits in this module's siblings) calls other methods through
//! `self`, and `self` is always the concrete, outermost move type. A base
//! method that asks for `fallback_name()` therefore gets the override of the
//! move that is actually being run.

use std::any::type_name;
use std::fmt::Debug;
use std::sync::Arc;

use log::trace;
use once_cell::sync::Lazy;

use crate::config::{expected_next, progression_matches, ConfigBag};
use crate::core::error::{IllegalMove, MoveError};
use crate::core::player::PlayerIndex;
use crate::core::state::{State, SubState};

static EMPTY_CONFIG: Lazy<ConfigBag> = Lazy::new(ConfigBag::new);

/// Metadata of a registered move type, shared by every move of that type.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveInfo {
    name: String,
    help_text: String,
    is_fix_up: bool,
    allow_multiple_in_progression: bool,
    type_name: &'static str,
    configuration: Arc<ConfigBag>,
}

impl MoveInfo {
    /// Create move type metadata.
    pub fn new(
        name: impl Into<String>,
        type_name: &'static str,
        configuration: Arc<ConfigBag>,
    ) -> Self {
        Self {
            name: name.into(),
            help_text: String::new(),
            is_fix_up: false,
            allow_multiple_in_progression: false,
            type_name,
            configuration,
        }
    }

    #[must_use]
    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    #[must_use]
    pub fn with_fix_up(mut self, is_fix_up: bool) -> Self {
        self.is_fix_up = is_fix_up;
        self
    }

    #[must_use]
    pub fn with_allow_multiple_in_progression(mut self, allow: bool) -> Self {
        self.allow_multiple_in_progression = allow;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    #[must_use]
    pub fn is_fix_up(&self) -> bool {
        self.is_fix_up
    }

    #[must_use]
    pub fn allow_multiple_in_progression(&self) -> bool {
        self.allow_multiple_in_progression
    }

    /// Rust type name of the move.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn configuration(&self) -> &ConfigBag {
        &self.configuration
    }
}

/// State every move embeds: the link to its move type.
#[derive(Clone, Debug, Default)]
pub struct Base {
    info: Option<Arc<MoveInfo>>,
}

impl Base {
    pub fn set_info(&mut self, info: Arc<MoveInfo>) {
        self.info = Some(info);
    }

    #[must_use]
    pub fn info(&self) -> Option<&Arc<MoveInfo>> {
        self.info.as_ref()
    }

    /// The move type's configuration, or an empty bag for an unwired move.
    #[must_use]
    pub fn configuration(&self) -> &ConfigBag {
        match &self.info {
            Some(info) => info.configuration(),
            None => &*EMPTY_CONFIG,
        }
    }

    /// The legality gate every move runs first.
    ///
    /// 1. With `LegalPhases` configured, the current phase must be one of them.
    /// 2. With `LegalMoveProgression` configured, the names recorded in the
    ///    current phase followed by `name` must be a prefix of the progression.
    pub fn legal<G: SubState, P: SubState>(
        &self,
        name: &str,
        state: &State<G, P>,
    ) -> Result<(), MoveError> {
        let config = self.configuration();

        if let Some(phases) = config.legal_phases() {
            if !phases.contains(&state.phase()) {
                return Err(IllegalMove::WrongPhase(state.phase()).into());
            }
        }

        if let Some(pattern) = config.legal_move_progression() {
            let mut tape = state.phase_history();
            tape.push(name);
            let repeats = |candidate: &str| state.allows_multiple_in_progression(candidate);

            if !progression_matches(pattern, &tape, repeats) {
                let expected = expected_next(pattern, &tape[..tape.len() - 1], repeats);
                trace!("{} rejected by progression, expected {:?}", name, expected);
                return Err(IllegalMove::WrongProgression {
                    name: name.to_string(),
                    expected,
                }
                .into());
            }
        }

        Ok(())
    }
}

/// Turn a Rust type name into a move name.
///
/// Takes the last path segment, drops generic arguments and a leading
/// `Move` that starts a new word, then splits on capitals.
///
/// ```
/// use rust_moves::moves::name_from_type;
///
/// assert_eq!(name_from_type("my_game::moves::MoveDealInitialCards"), "Deal Initial Cards");
/// assert_eq!(name_from_type("ShuffleStack"), "Shuffle Stack");
/// assert_eq!(name_from_type("Mover"), "Mover");
/// ```
#[must_use]
pub fn name_from_type(type_name: &str) -> String {
    let without_generics = type_name.split('<').next().unwrap_or(type_name);
    let short = without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics);
    let trimmed = match short.strip_prefix("Move") {
        Some(rest) if rest.starts_with(|c: char| c.is_uppercase()) => rest,
        _ => short,
    };

    let mut name = String::with_capacity(trimmed.len() + 4);
    for (i, c) in trimmed.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            name.push(' ');
        }
        name.push(c);
    }
    name
}

/// A move: named, legality-gated, state-mutating.
///
/// Implementors provide `base`/`base_mut` and override what they need.
/// The provided methods are the base behaviour.
pub trait Move<G: SubState, P: SubState>: Debug {
    fn base(&self) -> &Base;
    fn base_mut(&mut self) -> &mut Base;

    fn set_info(&mut self, info: Arc<MoveInfo>) {
        self.base_mut().set_info(info);
    }

    fn info(&self) -> Option<&Arc<MoveInfo>> {
        self.base().info()
    }

    /// The registered name, or the derived one for an unregistered move.
    fn name(&self) -> String {
        match self.info() {
            Some(info) if !info.name().is_empty() => info.name().to_string(),
            _ => self.derive_name(),
        }
    }

    fn configuration(&self) -> &ConfigBag {
        self.base().configuration()
    }

    /// Fill in the move's fields from the current state before `legal` runs.
    fn defaults_for_state(&mut self, _state: &State<G, P>) {}

    fn legal(&self, state: &State<G, P>, _proposer: PlayerIndex) -> Result<(), MoveError> {
        self.base().legal(&self.name(), state)
    }

    fn apply(&self, _state: &mut State<G, P>) -> Result<(), MoveError> {
        Ok(())
    }

    /// Check the configuration against an example state at registration.
    fn valid_configuration(&self, _state: &State<G, P>) -> Result<(), MoveError> {
        Ok(())
    }

    fn fallback_name(&self) -> String {
        name_from_type(type_name::<Self>())
    }

    fn fallback_help_text(&self) -> String {
        String::new()
    }

    fn fallback_is_fix_up(&self) -> bool {
        false
    }

    /// `MoveName` if configured, else `fallback_name`, plus any `MoveNameSuffix`.
    fn derive_name(&self) -> String {
        let config = self.configuration();
        let mut name = match config.move_name() {
            Some(name) => name.to_string(),
            None => self.fallback_name(),
        };
        if name.is_empty() {
            name = name_from_type(type_name::<Self>());
        }
        if let Some(suffix) = config.move_name_suffix() {
            if !suffix.is_empty() {
                name = format!("{} - {}", name, suffix);
            }
        }
        name
    }

    fn help_text(&self) -> String {
        match self.configuration().help_text() {
            Some(text) => text.to_string(),
            None => self.fallback_help_text(),
        }
    }

    fn is_fix_up(&self) -> bool {
        self.configuration()
            .is_fix_up()
            .unwrap_or_else(|| self.fallback_is_fix_up())
    }

    /// Whether consecutive applications of this move count as one step of a
    /// move progression.
    fn allow_multiple_in_progression(&self) -> bool {
        false
    }

    /// Whether this move seats a player.
    fn is_seat_player_move(&self) -> bool {
        false
    }
}
