//! Stacks of component slots.
//!
//! A `Stack` is an ordered sequence of slots owned by a game or player
//! sub-state. It comes in two shapes:
//! - Growable stacks (draw pile, discard) never hold empty slots and never fill up
//! - Sized stacks (a board row, a fixed hand) have a fixed number of slots,
//!   any of which may be empty
//!
//! Moves address stacks through a `StackRef` so that two stacks of the same
//! state can be involved in one operation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::chest::ComponentId;
use crate::core::player::PlayerIndex;
use crate::core::rng::GameRng;

/// Position for taking from or inserting into a stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotPosition {
    /// The first occupied slot (take) or the front / lowest empty slot (insert).
    First,
    /// The last occupied slot (take) or the back / highest empty slot (insert).
    Last,
    /// A specific slot index.
    Index(usize),
}

/// Failure of a stack mutation.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum StackError {
    #[error("stack has no components")]
    Empty,
    #[error("stack has no empty slots")]
    Full,
    #[error("slot {0} is empty")]
    SlotEmpty(usize),
    #[error("slot {0} is occupied")]
    SlotOccupied(usize),
    #[error("slot {index} is out of bounds for a stack of {len} slots")]
    OutOfBounds { index: usize, len: usize },
}

/// Ordered sequence of component slots.
///
/// ## Example
///
/// ```
/// use rust_moves::components::{ComponentId, DeckId, SlotPosition, Stack};
///
/// let deck = DeckId::new(0);
/// let mut draw = Stack::from_components((0..3).map(|i| ComponentId::new(deck, i)));
/// let mut hand = Stack::new();
///
/// let card = draw.take(SlotPosition::First).unwrap();
/// hand.insert(card, SlotPosition::Last).unwrap();
///
/// assert_eq!(draw.num_components(), 2);
/// assert_eq!(hand.first_component(), Some(ComponentId::new(deck, 0)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    slots: Vec<Option<ComponentId>>,
    /// Fixed slot count for sized stacks.
    size: Option<usize>,
}

impl Stack {
    /// Create an empty growable stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a growable stack holding `components` in order.
    pub fn from_components(components: impl IntoIterator<Item = ComponentId>) -> Self {
        Self {
            slots: components.into_iter().map(Some).collect(),
            size: None,
        }
    }

    /// Create a sized stack with `size` empty slots.
    #[must_use]
    pub fn sized(size: usize) -> Self {
        Self {
            slots: vec![None; size],
            size: Some(size),
        }
    }

    /// Whether this stack has a fixed number of slots.
    #[must_use]
    pub fn is_sized(&self) -> bool {
        self.size.is_some()
    }

    /// Number of slots, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the stack has no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn num_components(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether nothing more can be inserted.
    ///
    /// Growable stacks are never full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.is_sized() && self.slots.iter().all(Option::is_some)
    }

    /// The component in slot `index`, if any.
    #[must_use]
    pub fn component_at(&self, index: usize) -> Option<ComponentId> {
        self.slots.get(index).copied().flatten()
    }

    /// The first component in slot order.
    #[must_use]
    pub fn first_component(&self) -> Option<ComponentId> {
        self.components().next()
    }

    /// Raw slots, in order.
    #[must_use]
    pub fn slots(&self) -> &[Option<ComponentId>] {
        &self.slots
    }

    /// Iterate over components in slot order, skipping empty slots.
    pub fn components(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.slots.iter().filter_map(|slot| *slot)
    }

    /// Remove and return a component.
    ///
    /// Growable stacks close the gap. Sized stacks leave the slot empty.
    pub fn take(&mut self, position: SlotPosition) -> Result<ComponentId, StackError> {
        let index = match position {
            SlotPosition::First => self.slots.iter().position(Option::is_some),
            SlotPosition::Last => self.slots.iter().rposition(Option::is_some),
            SlotPosition::Index(index) => Some(self.check_bounds(index)?),
        };
        let index = index.ok_or(StackError::Empty)?;
        let component = self.slots[index].ok_or(StackError::SlotEmpty(index))?;

        if self.is_sized() {
            self.slots[index] = None;
        } else {
            self.slots.remove(index);
        }
        Ok(component)
    }

    /// Insert a component.
    ///
    /// Growable stacks insert at the front, the back, or before `Index(i)`
    /// (clamped to the end). Sized stacks fill an empty slot.
    pub fn insert(
        &mut self,
        component: ComponentId,
        position: SlotPosition,
    ) -> Result<(), StackError> {
        if !self.is_sized() {
            match position {
                SlotPosition::First => self.slots.insert(0, Some(component)),
                SlotPosition::Last => self.slots.push(Some(component)),
                SlotPosition::Index(i) => {
                    let index = i.min(self.slots.len());
                    self.slots.insert(index, Some(component));
                }
            }
            return Ok(());
        }

        let index = match position {
            SlotPosition::First => self.slots.iter().position(Option::is_none),
            SlotPosition::Last => self.slots.iter().rposition(Option::is_none),
            SlotPosition::Index(index) => {
                let index = self.check_bounds(index)?;
                if self.slots[index].is_some() {
                    return Err(StackError::SlotOccupied(index));
                }
                Some(index)
            }
        };
        let index = index.ok_or(StackError::Full)?;
        self.slots[index] = Some(component);
        Ok(())
    }

    /// Shuffle slot order in place.
    ///
    /// Sized stacks shuffle their empty slots along with the components.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.slots);
    }

    fn check_bounds(&self, index: usize) -> Result<usize, StackError> {
        if index < self.slots.len() {
            Ok(index)
        } else {
            Err(StackError::OutOfBounds {
                index,
                len: self.slots.len(),
            })
        }
    }
}

/// Which sub-state owns a stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackOwner {
    Game,
    Player(PlayerIndex),
}

/// Address of a stack property on a state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackRef {
    pub owner: StackOwner,
    pub property: String,
}

impl StackRef {
    /// A stack property on the game sub-state.
    pub fn game(property: impl Into<String>) -> Self {
        Self {
            owner: StackOwner::Game,
            property: property.into(),
        }
    }

    /// A stack property on a player's sub-state.
    pub fn player(player: PlayerIndex, property: impl Into<String>) -> Self {
        Self {
            owner: StackOwner::Player(player),
            property: property.into(),
        }
    }
}

impl std::fmt::Display for StackRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.owner {
            StackOwner::Game => write!(f, "game.{}", self.property),
            StackOwner::Player(player) => write!(f, "{}.{}", player, self.property),
        }
    }
}
