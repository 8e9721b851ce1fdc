//! Move registration: turning an example move and its options into a
//! `MoveConfig`.
//!
//! ```
//! use rust_moves::config::{with_game_property, with_amount};
//! use rust_moves::core::{PropertyBag, State};
//! use rust_moves::moves::Increment;
//! use rust_moves::rules::AutoConfigurer;
//!
//! let game = PropertyBag::new().with("Round", 1);
//! let state = State::new(game, vec![PropertyBag::new(); 2], 0);
//!
//! let config = AutoConfigurer::new(&state)
//!     .must_config(Increment::default(), vec![with_game_property("Round"), with_amount(1)]);
//!
//! assert_eq!(config.name(), "Increment Round");
//! assert!(config.is_fix_up());
//! ```

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::config::{ConfigBag, ConfigOption};
use crate::core::error::{ConfigurationError, MoveError};
use crate::core::state::{State, SubState};
use crate::moves::{Move, MoveInfo};

/// Builds a fresh move of one type.
pub type MoveConstructor<G, P> = Arc<dyn Fn() -> Box<dyn Move<G, P>>>;

/// A configured move type, ready to install.
pub struct MoveConfig<G, P> {
    name: String,
    help_text: String,
    is_fix_up: bool,
    allow_multiple_in_progression: bool,
    type_name: &'static str,
    constructor: MoveConstructor<G, P>,
    custom_configuration: Arc<ConfigBag>,
}

impl<G: SubState, P: SubState> MoveConfig<G, P> {
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

    /// Rust type name of the configured move.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn custom_configuration(&self) -> &ConfigBag {
        &self.custom_configuration
    }

    /// A fresh, unwired move of this type.
    #[must_use]
    pub fn construct(&self) -> Box<dyn Move<G, P>> {
        (self.constructor)()
    }

    /// The metadata every move of this type shares.
    #[must_use]
    pub fn info(&self) -> MoveInfo {
        MoveInfo::new(
            self.name.clone(),
            self.type_name,
            Arc::clone(&self.custom_configuration),
        )
        .with_help_text(self.help_text.clone())
        .with_fix_up(self.is_fix_up)
        .with_allow_multiple_in_progression(self.allow_multiple_in_progression)
    }
}

impl<G, P> Clone for MoveConfig<G, P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            help_text: self.help_text.clone(),
            is_fix_up: self.is_fix_up,
            allow_multiple_in_progression: self.allow_multiple_in_progression,
            type_name: self.type_name,
            constructor: Arc::clone(&self.constructor),
            custom_configuration: Arc::clone(&self.custom_configuration),
        }
    }
}

impl<G, P> fmt::Debug for MoveConfig<G, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveConfig")
            .field("name", &self.name)
            .field("help_text", &self.help_text)
            .field("is_fix_up", &self.is_fix_up)
            .field("allow_multiple_in_progression", &self.allow_multiple_in_progression)
            .field("type_name", &self.type_name)
            .field("custom_configuration", &self.custom_configuration)
            .finish_non_exhaustive()
    }
}

/// An installed move type: shared metadata plus a constructor.
pub struct MoveType<G, P> {
    info: Arc<MoveInfo>,
    constructor: MoveConstructor<G, P>,
}

impl<G: SubState, P: SubState> MoveType<G, P> {
    #[must_use]
    pub fn from_config(config: &MoveConfig<G, P>) -> Self {
        Self {
            info: Arc::new(config.info()),
            constructor: Arc::clone(&config.constructor),
        }
    }

    #[must_use]
    pub fn info(&self) -> &Arc<MoveInfo> {
        &self.info
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.info.name()
    }

    /// A new move of this type, wired to its metadata and given its
    /// defaults for `state`.
    #[must_use]
    pub fn new_move(&self, state: &State<G, P>) -> Box<dyn Move<G, P>> {
        let mut m = (self.constructor)();
        m.set_info(Arc::clone(&self.info));
        m.defaults_for_state(state);
        m
    }
}

impl<G, P> Clone for MoveType<G, P> {
    fn clone(&self) -> Self {
        Self {
            info: Arc::clone(&self.info),
            constructor: Arc::clone(&self.constructor),
        }
    }
}

impl<G, P> fmt::Debug for MoveType<G, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveType")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

/// Configures moves against an example state of the game.
///
/// The example state lets `valid_configuration` check that configured
/// stacks and properties exist before any game starts.
#[derive(Debug)]
pub struct AutoConfigurer<'a, G, P> {
    state: &'a State<G, P>,
}

impl<'a, G: SubState, P: SubState> AutoConfigurer<'a, G, P> {
    #[must_use]
    pub fn new(state: &'a State<G, P>) -> Self {
        Self { state }
    }

    /// Configure a move type from an example move and options.
    ///
    /// Every move of the type is a clone of `example`. Name, help text and
    /// fix-up flag come from the options when given, otherwise from the
    /// move's fallbacks.
    pub fn config<M>(
        &self,
        example: M,
        options: Vec<ConfigOption>,
    ) -> Result<MoveConfig<G, P>, MoveError>
    where
        M: Move<G, P> + Clone + 'static,
    {
        let bag = ConfigBag::from_options(options);
        bag.validate()?;
        let bag = Arc::new(bag);
        let type_name = type_name::<M>();

        let mut probe = example.clone();
        probe.set_info(Arc::new(MoveInfo::new("", type_name, Arc::clone(&bag))));
        probe.defaults_for_state(self.state);

        let name = probe.derive_name();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName.into());
        }
        let help_text = probe.help_text();
        let is_fix_up = probe.is_fix_up();
        let allow_multiple_in_progression = probe.allow_multiple_in_progression();

        probe.set_info(Arc::new(
            MoveInfo::new(name.clone(), type_name, Arc::clone(&bag))
                .with_help_text(help_text.clone())
                .with_fix_up(is_fix_up)
                .with_allow_multiple_in_progression(allow_multiple_in_progression),
        ));
        probe.valid_configuration(self.state)?;

        debug!(
            "configured {:?} as {} (fix-up: {})",
            name, type_name, is_fix_up
        );

        let constructor: MoveConstructor<G, P> =
            Arc::new(move || Box::new(example.clone()) as Box<dyn Move<G, P>>);

        Ok(MoveConfig {
            name,
            help_text,
            is_fix_up,
            allow_multiple_in_progression,
            type_name,
            constructor,
            custom_configuration: bag,
        })
    }

    /// `config`, panicking on a bad configuration.
    ///
    /// For game setup code, where a bad configuration is a bug.
    pub fn must_config<M>(&self, example: M, options: Vec<ConfigOption>) -> MoveConfig<G, P>
    where
        M: Move<G, P> + Clone + 'static,
    {
        match self.config(example, options) {
            Ok(config) => config,
            Err(e) => panic!("could not configure move: {}", e),
        }
    }
}
