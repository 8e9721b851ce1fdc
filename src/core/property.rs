//! Named, typed properties on game and player sub-states.
//!
//! Moves never know the concrete shape of a game's state. Everything they
//! read or write by name (the stack to shuffle, the counter to increment,
//! the round-robin cursor) goes through a `PropertyBag`.
//!
//! ## PropertyValue Types
//!
//! - `Int`: Numbers (round, score)
//! - `Bool`: Flags (seat filled, player inactive)
//! - `Text`: Strings
//! - `Player`: A `PlayerIndex` (round-robin cursor)
//! - `Stack`: An ordered stack of component slots

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerIndex;
use crate::components::Stack;

/// Value of a named property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Integer value (round number, score).
    Int(i64),
    /// Boolean flag.
    Bool(bool),
    /// Text value.
    Text(String),
    /// Reference to a player.
    Player(PlayerIndex),
    /// Stack of components.
    Stack(Stack),
}

impl PropertyValue {
    /// The type tag of this value.
    #[must_use]
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Int(_) => PropertyType::Int,
            PropertyValue::Bool(_) => PropertyType::Bool,
            PropertyValue::Text(_) => PropertyType::Text,
            PropertyValue::Player(_) => PropertyType::Player,
            PropertyValue::Stack(_) => PropertyType::Stack,
        }
    }

    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as player index if this is a Player value.
    #[must_use]
    pub fn as_player(&self) -> Option<PlayerIndex> {
        match self {
            PropertyValue::Player(p) => Some(*p),
            _ => None,
        }
    }

    /// Get as stack reference if this is a Stack value.
    #[must_use]
    pub fn as_stack(&self) -> Option<&Stack> {
        match self {
            PropertyValue::Stack(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        PropertyValue::Int(v as i64)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Text(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_string())
    }
}

impl From<PlayerIndex> for PropertyValue {
    fn from(v: PlayerIndex) -> Self {
        PropertyValue::Player(v)
    }
}

impl From<Stack> for PropertyValue {
    fn from(v: Stack) -> Self {
        PropertyValue::Stack(v)
    }
}

/// Type tag of a property, used in validation errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Int,
    Bool,
    Text,
    Player,
    Stack,
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PropertyType::Int => "int",
            PropertyType::Bool => "bool",
            PropertyType::Text => "text",
            PropertyType::Player => "player index",
            PropertyType::Stack => "stack",
        };
        f.write_str(name)
    }
}

/// Failure to read or write a property.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum PropertyError {
    #[error("no property named {0:?}")]
    NoSuchProperty(String),
    #[error("property {name:?} is a {found}, not a {expected}")]
    WrongType {
        name: String,
        expected: PropertyType,
        found: PropertyType,
    },
    #[error("{0} has no player state")]
    NoSuchPlayer(PlayerIndex),
}

/// Collection of named properties.
///
/// ## Example
///
/// ```
/// use rust_moves::core::PropertyBag;
///
/// let mut bag = PropertyBag::new().with("Round", 4);
///
/// let round = bag.int("Round").unwrap();
/// bag.set("Round", round + 1);
/// assert_eq!(bag.int("Round"), Ok(5));
/// assert!(bag.int("Score").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyBag {
    values: FxHashMap<String, PropertyValue>,
}

impl PropertyBag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a property.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Get a property value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    /// Check whether a property exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The type of a property, if it exists.
    #[must_use]
    pub fn property_type(&self, name: &str) -> Option<PropertyType> {
        self.values.get(name).map(PropertyValue::property_type)
    }

    /// Check that a property exists and has the given type.
    pub fn expect_type(&self, name: &str, expected: PropertyType) -> Result<(), PropertyError> {
        match self.property_type(name) {
            None => Err(PropertyError::NoSuchProperty(name.to_string())),
            Some(found) if found != expected => Err(PropertyError::WrongType {
                name: name.to_string(),
                expected,
                found,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Read an integer property.
    pub fn int(&self, name: &str) -> Result<i64, PropertyError> {
        self.typed(name, PropertyType::Int, PropertyValue::as_int)
    }

    /// Read a boolean property.
    pub fn bool(&self, name: &str) -> Result<bool, PropertyError> {
        self.typed(name, PropertyType::Bool, PropertyValue::as_bool)
    }

    /// Read a text property.
    pub fn text(&self, name: &str) -> Result<&str, PropertyError> {
        self.typed(name, PropertyType::Text, PropertyValue::as_text)
    }

    /// Read a player index property.
    pub fn player(&self, name: &str) -> Result<PlayerIndex, PropertyError> {
        self.typed(name, PropertyType::Player, PropertyValue::as_player)
    }

    /// Read a stack property.
    pub fn stack(&self, name: &str) -> Result<&Stack, PropertyError> {
        self.typed(name, PropertyType::Stack, PropertyValue::as_stack)
    }

    /// Mutable access to a stack property.
    pub fn stack_mut(&mut self, name: &str) -> Result<&mut Stack, PropertyError> {
        match self.values.get_mut(name) {
            Some(PropertyValue::Stack(stack)) => Ok(stack),
            Some(other) => Err(PropertyError::WrongType {
                name: name.to_string(),
                expected: PropertyType::Stack,
                found: other.property_type(),
            }),
            None => Err(PropertyError::NoSuchProperty(name.to_string())),
        }
    }

    /// Iterate over property names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: PropertyType,
        read: impl FnOnce(&'a PropertyValue) -> Option<T>,
    ) -> Result<T, PropertyError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| PropertyError::NoSuchProperty(name.to_string()))?;
        read(value).ok_or_else(|| PropertyError::WrongType {
            name: name.to_string(),
            expected,
            found: value.property_type(),
        })
    }
}
