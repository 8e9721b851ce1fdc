//! Move configuration: the key/value bag, its option functions, and move progressions.
//!
//! ## Key Types
//!
//! - `ConfigBag`: Well-known keys mapped to typed values, one bag per move type
//! - `ConfigOption`: A `with_*` closure that writes one key
//! - `ProgressionGroup`: Pattern node for ordering moves within a phase

pub mod bag;
pub mod options;
pub mod progression;

pub use bag::{keys, ConfigBag, ConfigValue};
pub use options::{
    with_amount, with_destination_stack, with_game_property, with_game_stack, with_help_text,
    with_is_fix_up, with_legal_move_progression, with_legal_phases, with_legal_type,
    with_move_name, with_move_name_suffix, with_num_rounds, with_phase_to_start,
    with_player_property, with_player_stack, with_source_stack, with_target_count, ConfigOption,
};
pub use progression::{expected_next, progression_matches, ProgressionGroup};
