//! Option functions that assemble a `ConfigBag`.
//!
//! Each `with_*` function returns a closure that writes one well-known key.
//! Options are applied in order, so a later option overrides an earlier one
//! for the same key.

use super::bag::{keys, ConfigBag, ConfigValue};
use super::progression::ProgressionGroup;
use crate::core::phase::PhaseId;

/// A deferred write into a configuration bag.
pub type ConfigOption = Box<dyn FnOnce(&mut ConfigBag)>;

fn set(key: &'static str, value: ConfigValue) -> ConfigOption {
    Box::new(move |bag: &mut ConfigBag| bag.set(key, value))
}

/// Override the derived move name.
pub fn with_move_name(name: impl Into<String>) -> ConfigOption {
    set(keys::MOVE_NAME, ConfigValue::Text(name.into()))
}

/// Append `" - suffix"` to the move name.
pub fn with_move_name_suffix(suffix: impl Into<String>) -> ConfigOption {
    set(keys::MOVE_NAME_SUFFIX, ConfigValue::Text(suffix.into()))
}

pub fn with_help_text(text: impl Into<String>) -> ConfigOption {
    set(keys::HELP_TEXT, ConfigValue::Text(text.into()))
}

pub fn with_is_fix_up(is_fix_up: bool) -> ConfigOption {
    set(keys::IS_FIX_UP, ConfigValue::Bool(is_fix_up))
}

/// The phase `StartPhase` enters.
pub fn with_phase_to_start(phase: PhaseId) -> ConfigOption {
    set(keys::PHASE_TO_START, ConfigValue::Phase(phase))
}

/// Restrict the move to these phases.
pub fn with_legal_phases(phases: impl IntoIterator<Item = PhaseId>) -> ConfigOption {
    set(
        keys::LEGAL_PHASES,
        ConfigValue::Phases(phases.into_iter().collect()),
    )
}

/// Require the move to fit the given progression within its phase.
pub fn with_legal_move_progression(
    groups: impl IntoIterator<Item = ProgressionGroup>,
) -> ConfigOption {
    set(
        keys::LEGAL_MOVE_PROGRESSION,
        ConfigValue::Progression(groups.into_iter().collect()),
    )
}

/// Game stack property the move takes components from.
pub fn with_source_stack(property: impl Into<String>) -> ConfigOption {
    set(keys::SOURCE_STACK, ConfigValue::Text(property.into()))
}

/// Game stack property the move puts components into.
pub fn with_destination_stack(property: impl Into<String>) -> ConfigOption {
    set(keys::DESTINATION_STACK, ConfigValue::Text(property.into()))
}

/// Game-side stack property for deal and collect moves.
pub fn with_game_stack(property: impl Into<String>) -> ConfigOption {
    set(keys::GAME_STACK, ConfigValue::Text(property.into()))
}

/// Player-side stack property for deal and collect moves.
pub fn with_player_stack(property: impl Into<String>) -> ConfigOption {
    set(keys::PLAYER_STACK, ConfigValue::Text(property.into()))
}

pub fn with_target_count(count: i64) -> ConfigOption {
    set(keys::TARGET_COUNT, ConfigValue::Int(count))
}

pub fn with_num_rounds(rounds: i64) -> ConfigOption {
    set(keys::NUM_ROUNDS, ConfigValue::Int(rounds))
}

/// Integer property on the game sub-state for `Increment`.
pub fn with_game_property(property: impl Into<String>) -> ConfigOption {
    set(keys::GAME_PROPERTY, ConfigValue::Text(property.into()))
}

/// Integer property on the current player's sub-state for `Increment`.
pub fn with_player_property(property: impl Into<String>) -> ConfigOption {
    set(keys::PLAYER_PROPERTY, ConfigValue::Text(property.into()))
}

pub fn with_amount(amount: i64) -> ConfigOption {
    set(keys::AMOUNT, ConfigValue::Int(amount))
}

/// Passed to `LegalComponent::legal` during default-component selection.
pub fn with_legal_type(legal_type: i64) -> ConfigOption {
    set(keys::LEGAL_TYPE, ConfigValue::Int(legal_type))
}
