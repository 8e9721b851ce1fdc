//! The move configuration bag.
//!
//! Every registered move type carries a `ConfigBag` mapping well-known keys
//! to typed values. Generic moves read their parameters from it (which stack
//! to shuffle, which property to increment, how many times to apply), so one
//! move type can be registered many times with different behaviour.
//!
//! Readers ignore unknown keys and fall back to documented defaults for
//! missing ones. `ConfigBag::validate` rejects well-known keys holding the
//! wrong kind of value so that readers never have to.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::progression::ProgressionGroup;
use crate::core::error::ConfigurationError;
use crate::core::phase::PhaseId;

/// Well-known configuration keys.
pub mod keys {
    pub const MOVE_NAME: &str = "MoveName";
    pub const MOVE_NAME_SUFFIX: &str = "MoveNameSuffix";
    pub const HELP_TEXT: &str = "HelpText";
    pub const IS_FIX_UP: &str = "IsFixUp";
    pub const PHASE_TO_START: &str = "PhaseToStart";
    pub const LEGAL_PHASES: &str = "LegalPhases";
    pub const LEGAL_MOVE_PROGRESSION: &str = "LegalMoveProgression";
    pub const SOURCE_STACK: &str = "SourceStack";
    pub const DESTINATION_STACK: &str = "DestinationStack";
    pub const GAME_STACK: &str = "GameStack";
    pub const PLAYER_STACK: &str = "PlayerStack";
    pub const TARGET_COUNT: &str = "TargetCount";
    pub const NUM_ROUNDS: &str = "NumRounds";
    pub const GAME_PROPERTY: &str = "GameProperty";
    pub const PLAYER_PROPERTY: &str = "PlayerProperty";
    pub const AMOUNT: &str = "Amount";
    pub const LEGAL_TYPE: &str = "LegalType";
}

/// Default for `TargetCount`.
pub const DEFAULT_TARGET_COUNT: i64 = 1;
/// Default for `NumRounds`.
pub const DEFAULT_NUM_ROUNDS: i64 = 1;
/// Default for `Amount`.
pub const DEFAULT_AMOUNT: i64 = 1;
/// Default for `LegalType`.
pub const DEFAULT_LEGAL_TYPE: i64 = 0;

/// A configuration value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ConfigValue {
    Int(i64),
    Bool(bool),
    Text(String),
    Phase(PhaseId),
    Phases(Vec<PhaseId>),
    Progression(Vec<ProgressionGroup>),
}

/// Key/value configuration of one move type.
///
/// ## Example
///
/// ```
/// use rust_moves::config::{keys, with_target_count, with_move_name_suffix, ConfigBag};
///
/// let bag = ConfigBag::from_options(vec![with_target_count(3), with_move_name_suffix("Setup")]);
///
/// assert_eq!(bag.target_count(), 3);
/// assert_eq!(bag.move_name_suffix(), Some("Setup"));
/// assert_eq!(bag.amount(), 1);
/// assert!(bag.contains(keys::TARGET_COUNT));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigBag {
    values: FxHashMap<String, ConfigValue>,
}

impl ConfigBag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag by applying options in order. Later options win.
    pub fn from_options(options: impl IntoIterator<Item = super::ConfigOption>) -> Self {
        let mut bag = Self::new();
        for option in options {
            option(&mut bag);
        }
        bag
    }

    /// Set a key, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: ConfigValue) {
        self.values.insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // === Raw typed readers ===

    #[must_use]
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(ConfigValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(ConfigValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ConfigValue::Text(v)) => Some(v),
            _ => None,
        }
    }

    // === Well-known keys ===

    #[must_use]
    pub fn move_name(&self) -> Option<&str> {
        self.text(keys::MOVE_NAME)
    }

    #[must_use]
    pub fn move_name_suffix(&self) -> Option<&str> {
        self.text(keys::MOVE_NAME_SUFFIX)
    }

    #[must_use]
    pub fn help_text(&self) -> Option<&str> {
        self.text(keys::HELP_TEXT)
    }

    #[must_use]
    pub fn is_fix_up(&self) -> Option<bool> {
        self.bool(keys::IS_FIX_UP)
    }

    #[must_use]
    pub fn phase_to_start(&self) -> Option<PhaseId> {
        match self.values.get(keys::PHASE_TO_START) {
            Some(ConfigValue::Phase(phase)) => Some(*phase),
            _ => None,
        }
    }

    /// Phases the move is legal in. `None` means every phase.
    #[must_use]
    pub fn legal_phases(&self) -> Option<&[PhaseId]> {
        match self.values.get(keys::LEGAL_PHASES) {
            Some(ConfigValue::Phases(phases)) => Some(phases),
            _ => None,
        }
    }

    /// The ordered move pattern the move must fit into, if any.
    #[must_use]
    pub fn legal_move_progression(&self) -> Option<&[ProgressionGroup]> {
        match self.values.get(keys::LEGAL_MOVE_PROGRESSION) {
            Some(ConfigValue::Progression(groups)) => Some(groups),
            _ => None,
        }
    }

    #[must_use]
    pub fn source_stack(&self) -> Option<&str> {
        self.text(keys::SOURCE_STACK)
    }

    #[must_use]
    pub fn destination_stack(&self) -> Option<&str> {
        self.text(keys::DESTINATION_STACK)
    }

    #[must_use]
    pub fn game_stack(&self) -> Option<&str> {
        self.text(keys::GAME_STACK)
    }

    #[must_use]
    pub fn player_stack(&self) -> Option<&str> {
        self.text(keys::PLAYER_STACK)
    }

    #[must_use]
    pub fn target_count(&self) -> i64 {
        self.int(keys::TARGET_COUNT).unwrap_or(DEFAULT_TARGET_COUNT)
    }

    #[must_use]
    pub fn num_rounds(&self) -> i64 {
        self.int(keys::NUM_ROUNDS).unwrap_or(DEFAULT_NUM_ROUNDS)
    }

    #[must_use]
    pub fn game_property(&self) -> Option<&str> {
        self.text(keys::GAME_PROPERTY)
    }

    #[must_use]
    pub fn player_property(&self) -> Option<&str> {
        self.text(keys::PLAYER_PROPERTY)
    }

    #[must_use]
    pub fn amount(&self) -> i64 {
        self.int(keys::AMOUNT).unwrap_or(DEFAULT_AMOUNT)
    }

    #[must_use]
    pub fn legal_type(&self) -> i64 {
        self.int(keys::LEGAL_TYPE).unwrap_or(DEFAULT_LEGAL_TYPE)
    }

    /// Check that every well-known key present holds the right kind of value.
    ///
    /// Unknown keys are left alone.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        const TEXT: &[&str] = &[
            keys::MOVE_NAME,
            keys::MOVE_NAME_SUFFIX,
            keys::HELP_TEXT,
            keys::SOURCE_STACK,
            keys::DESTINATION_STACK,
            keys::GAME_STACK,
            keys::PLAYER_STACK,
            keys::GAME_PROPERTY,
            keys::PLAYER_PROPERTY,
        ];
        const INT: &[&str] = &[
            keys::TARGET_COUNT,
            keys::NUM_ROUNDS,
            keys::AMOUNT,
            keys::LEGAL_TYPE,
        ];

        for (key, value) in &self.values {
            let expected = match (key.as_str(), value) {
                (k, ConfigValue::Text(_)) if TEXT.contains(&k) => continue,
                (k, _) if TEXT.contains(&k) => "text",
                (k, ConfigValue::Int(_)) if INT.contains(&k) => continue,
                (k, _) if INT.contains(&k) => "int",
                (keys::IS_FIX_UP, ConfigValue::Bool(_)) => continue,
                (keys::IS_FIX_UP, _) => "bool",
                (keys::PHASE_TO_START, ConfigValue::Phase(_)) => continue,
                (keys::PHASE_TO_START, _) => "phase",
                (keys::LEGAL_PHASES, ConfigValue::Phases(_)) => continue,
                (keys::LEGAL_PHASES, _) => "phase list",
                (keys::LEGAL_MOVE_PROGRESSION, ConfigValue::Progression(_)) => continue,
                (keys::LEGAL_MOVE_PROGRESSION, _) => "move progression",
                _ => continue,
            };
            return Err(ConfigurationError::WrongKeyType {
                key: key.clone(),
                expected,
            });
        }

        for key in [keys::TARGET_COUNT, keys::NUM_ROUNDS] {
            if let Some(value) = self.int(key) {
                if value < 0 {
                    return Err(ConfigurationError::NegativeCount {
                        what: key,
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let bag = ConfigBag::new();

        assert_eq!(bag.target_count(), 1);
        assert_eq!(bag.num_rounds(), 1);
        assert_eq!(bag.amount(), 1);
        assert_eq!(bag.legal_type(), 0);
        assert_eq!(bag.move_name(), None);
        assert_eq!(bag.legal_phases(), None);
        assert!(bag.validate().is_ok());
    }

    #[test]
    fn test_typed_readers_ignore_wrong_types() {
        let mut bag = ConfigBag::new();
        bag.set(keys::TARGET_COUNT, ConfigValue::Text("three".to_string()));

        assert_eq!(bag.target_count(), 1);
        assert_eq!(
            bag.validate(),
            Err(ConfigurationError::WrongKeyType {
                key: keys::TARGET_COUNT.to_string(),
                expected: "int",
            })
        );
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut bag = ConfigBag::new();
        bag.set("Flavor", ConfigValue::Int(7));

        assert!(bag.validate().is_ok());
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_validate_rejects_negative_counts() {
        let mut bag = ConfigBag::new();
        bag.set(keys::NUM_ROUNDS, ConfigValue::Int(-2));

        assert_eq!(
            bag.validate(),
            Err(ConfigurationError::NegativeCount {
                what: keys::NUM_ROUNDS,
                value: -2,
            })
        );
    }

    #[test]
    fn test_validate_phase_keys() {
        let mut bag = ConfigBag::new();
        bag.set(keys::LEGAL_PHASES, ConfigValue::Phase(PhaseId::new(1)));

        assert!(matches!(
            bag.validate(),
            Err(ConfigurationError::WrongKeyType { expected: "phase list", .. })
        ));
    }

    #[test]
    fn test_bag_serialization() {
        let mut bag = ConfigBag::new();
        bag.set(keys::MOVE_NAME, ConfigValue::Text("Deal Cards".to_string()));
        bag.set(keys::LEGAL_PHASES, ConfigValue::Phases(vec![PhaseId::new(2)]));

        let json = serde_json::to_string(&bag).unwrap();
        let back: ConfigBag = serde_json::from_str(&json).unwrap();

        assert_eq!(bag, back);
    }
}
