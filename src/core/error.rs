//! Error types shared by every move.
//!
//! - `ConfigurationError`: the move was registered with a bad configuration.
//!   Surfaced when the move is configured, before any game starts.
//! - `IllegalMove`: `legal` rejected the move. Expected and common; shown to
//!   the proposer.
//! - `MoveError::Apply`: `apply` failed after `legal` approved. The state is
//!   rolled back.
//! - `MoveError::Internal`: a programming error, such as a property holding
//!   the wrong type at runtime.

use thiserror::Error;

use super::phase::PhaseId;
use super::player::PlayerIndex;
use super::property::{PropertyError, PropertyType};
use crate::components::StackError;

/// Any failure of a move lifecycle operation.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum MoveError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("illegal move: {0}")]
    Illegal(#[from] IllegalMove),
    #[error("apply failed: {0}")]
    Apply(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl MoveError {
    /// Whether this is an `IllegalMove` rejection.
    #[must_use]
    pub fn is_illegal(&self) -> bool {
        matches!(self, MoveError::Illegal(_))
    }

    /// The illegal-move reason, if this is one.
    #[must_use]
    pub fn as_illegal(&self) -> Option<&IllegalMove> {
        match self {
            MoveError::Illegal(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<PropertyError> for MoveError {
    fn from(err: PropertyError) -> Self {
        MoveError::Internal(err.to_string())
    }
}

impl From<StackError> for MoveError {
    fn from(err: StackError) -> Self {
        MoveError::Apply(err.to_string())
    }
}

/// Reasons `legal` rejects a move.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("move is not legal in {0}")]
    WrongPhase(PhaseId),
    #[error("{name} is out of order in the move progression (expected one of {expected:?})")]
    WrongProgression { name: String, expected: Vec<String> },
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerIndex),
    #[error("{0} is not a valid target player")]
    TargetPlayerInvalid(PlayerIndex),
    #[error("there is no current player")]
    NoCurrentPlayer,
    #[error("condition already met")]
    ConditionAlreadyMet,
    #[error("condition not met yet: {0}")]
    ConditionNotMet(String),
    #[error("source stack is empty")]
    SourceEmpty,
    #[error("destination stack is full")]
    DestinationFull,
    #[error("seat of {0} is already filled")]
    SeatAlreadyFilled(PlayerIndex),
    #[error("seat of {0} is already closed")]
    SeatAlreadyClosed(PlayerIndex),
    #[error("no eligible player")]
    NoEligiblePlayer,
    #[error("{0} is already active")]
    PhaseAlreadyActive(PhaseId),
    #[error("only the admin may propose this move, not {0}")]
    NotAdmin(PlayerIndex),
    #[error("no move named {0:?}")]
    UnknownMove(String),
    #[error("no legal component")]
    NoLegalComponent,
    #[error("component in slot {index} is not legal: {reason}")]
    InvalidComponent { index: usize, reason: String },
}

/// Reasons a move configuration is rejected.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("missing required configuration key {0}")]
    MissingKey(&'static str),
    #[error("configuration key {key} should be a {expected}")]
    WrongKeyType { key: String, expected: &'static str },
    #[error("no property named {0:?}")]
    NoSuchProperty(String),
    #[error("property {name:?} is a {found}, not a {expected}")]
    WrongPropertyType {
        name: String,
        expected: PropertyType,
        found: PropertyType,
    },
    #[error("{what} must not be negative, got {value}")]
    NegativeCount { what: &'static str, value: i64 },
    #[error("configuration keys {0} and {1} cannot both be set")]
    ConflictingKeys(&'static str, &'static str),
    #[error("move name is empty")]
    EmptyName,
    #[error("a move named {0:?} is already installed")]
    DuplicateName(String),
    #[error("{0}")]
    Invalid(String),
}

impl From<PropertyError> for ConfigurationError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::NoSuchProperty(name) => ConfigurationError::NoSuchProperty(name),
            PropertyError::WrongType {
                name,
                expected,
                found,
            } => ConfigurationError::WrongPropertyType {
                name,
                expected,
                found,
            },
            PropertyError::NoSuchPlayer(player) => {
                ConfigurationError::Invalid(format!("{} has no player state", player))
            }
        }
    }
}

/// Reject a negative count as a configuration error.
///
/// ```
/// use rust_moves::core::{checked_count, ConfigurationError, MoveError};
///
/// assert_eq!(checked_count("target count", 3), Ok(3));
/// assert_eq!(
///     checked_count("target count", -1),
///     Err(MoveError::Configuration(ConfigurationError::NegativeCount {
///         what: "target count",
///         value: -1,
///     }))
/// );
/// ```
pub fn checked_count(what: &'static str, value: i64) -> Result<i64, MoveError> {
    if value < 0 {
        return Err(ConfigurationError::NegativeCount { what, value }.into());
    }
    Ok(value)
}
