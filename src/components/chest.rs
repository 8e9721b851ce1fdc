//! The component chest: every physical component a game owns.
//!
//! Components are grouped into decks. The chest is built once before play
//! and shared, immutable, by every state of a game. Stacks only hold
//! `ComponentId`s; the chest resolves them to their values.

use std::fmt::Debug;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::property::PropertyBag;
use crate::moves::LegalComponent;

/// Identifier of a deck in a chest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeckId(pub u32);

impl DeckId {
    /// Create a new deck ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Identifier of one component: its deck and its position in that deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId {
    pub deck: DeckId,
    pub index: u32,
}

impl ComponentId {
    /// Create a new component ID.
    #[must_use]
    pub const fn new(deck: DeckId, index: u32) -> Self {
        Self { deck, index }
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.deck.0, self.index)
    }
}

/// Game-defined values attached to a component.
///
/// Values that take part in default-component selection expose themselves
/// through `as_legal_component`.
pub trait ComponentValues<G, P>: Debug {
    fn as_legal_component(&self) -> Option<&dyn LegalComponent<G, P>> {
        None
    }
}

impl<G, P> ComponentValues<G, P> for PropertyBag {}

/// A component in the chest.
#[derive(Debug)]
pub struct Component<G, P> {
    id: ComponentId,
    values: Arc<dyn ComponentValues<G, P>>,
}

impl<G, P> Component<G, P> {
    /// This component's ID.
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// The deck this component belongs to.
    #[must_use]
    pub fn deck(&self) -> DeckId {
        self.id.deck
    }

    /// The component's values.
    #[must_use]
    pub fn values(&self) -> &dyn ComponentValues<G, P> {
        self.values.as_ref()
    }
}

impl<G, P> Clone for Component<G, P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            values: Arc::clone(&self.values),
        }
    }
}

/// A named group of components.
#[derive(Debug)]
pub struct Deck<G, P> {
    id: DeckId,
    name: String,
    components: Vec<Component<G, P>>,
}

impl<G, P> Deck<G, P> {
    #[must_use]
    pub fn id(&self) -> DeckId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over the deck's components in order.
    pub fn components(&self) -> impl Iterator<Item = &Component<G, P>> {
        self.components.iter()
    }

    /// IDs of every component in the deck, in order.
    ///
    /// Handy for filling a starting stack.
    pub fn component_ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components.iter().map(Component::id)
    }
}

/// Every component of a game, grouped by deck.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rust_moves::components::{ComponentChest, ComponentValues, Stack};
/// use rust_moves::core::PropertyBag;
///
/// let mut chest: ComponentChest<PropertyBag, PropertyBag> = ComponentChest::new();
/// let cards: Vec<Arc<dyn ComponentValues<PropertyBag, PropertyBag>>> = (1..=4)
///     .map(|rank| {
///         Arc::new(PropertyBag::new().with("Rank", rank))
///             as Arc<dyn ComponentValues<PropertyBag, PropertyBag>>
///     })
///     .collect();
/// let deck = chest.add_deck("cards", cards);
///
/// let draw = Stack::from_components(chest.deck(deck).unwrap().component_ids());
/// assert_eq!(draw.num_components(), 4);
/// assert_eq!(chest.deck_by_name("cards").map(|d| d.id()), Some(deck));
/// ```
#[derive(Debug)]
pub struct ComponentChest<G, P> {
    decks: Vec<Deck<G, P>>,
    by_name: FxHashMap<String, DeckId>,
}

impl<G, P> Default for ComponentChest<G, P> {
    fn default() -> Self {
        Self {
            decks: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }
}

impl<G, P> ComponentChest<G, P> {
    /// Create an empty chest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a deck and return its ID.
    ///
    /// Panics if a deck with the same name already exists.
    pub fn add_deck(
        &mut self,
        name: impl Into<String>,
        values: Vec<Arc<dyn ComponentValues<G, P>>>,
    ) -> DeckId {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            panic!("Deck {:?} already exists in chest", name);
        }

        let id = DeckId::new(self.decks.len() as u32);
        let components = values
            .into_iter()
            .enumerate()
            .map(|(index, values)| Component {
                id: ComponentId::new(id, index as u32),
                values,
            })
            .collect();

        self.by_name.insert(name.clone(), id);
        self.decks.push(Deck {
            id,
            name,
            components,
        });
        id
    }

    /// Get a deck by ID.
    #[must_use]
    pub fn deck(&self, id: DeckId) -> Option<&Deck<G, P>> {
        self.decks.get(id.0 as usize)
    }

    /// Get a deck by name.
    #[must_use]
    pub fn deck_by_name(&self, name: &str) -> Option<&Deck<G, P>> {
        self.by_name.get(name).and_then(|id| self.deck(*id))
    }

    /// Resolve a component ID.
    #[must_use]
    pub fn component(&self, id: ComponentId) -> Option<&Component<G, P>> {
        self.deck(id.deck)?.components.get(id.index as usize)
    }

    /// Number of decks.
    #[must_use]
    pub fn num_decks(&self) -> usize {
        self.decks.len()
    }
}
