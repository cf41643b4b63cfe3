//! Card catalog for id lookup.
//!
//! The `CardCatalog` is the static, immutable table every match of a
//! process shares. Ids are dense (`0..len`) so lookup by id is an index;
//! lookup by wire key goes through a hash map.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId, CardKind};
use crate::core::error::{RuleError, RuleResult, SetupError};

/// Card ids are a single byte.
pub const MAX_CARDS: usize = u8::MAX as usize + 1;

const CLASSIC_SUSPECTS: [(&str, &str); 6] = [
    ("scarlet", "Miss Scarlet"),
    ("mustard", "Colonel Mustard"),
    ("white", "Mrs. White"),
    ("green", "Reverend Green"),
    ("peacock", "Mrs. Peacock"),
    ("plum", "Professor Plum"),
];

const CLASSIC_WEAPONS: [(&str, &str); 6] = [
    ("candlestick", "Candlestick"),
    ("dagger", "Dagger"),
    ("lead_pipe", "Lead Pipe"),
    ("revolver", "Revolver"),
    ("rope", "Rope"),
    ("wrench", "Wrench"),
];

const CLASSIC_ROOMS: [(&str, &str); 9] = [
    ("kitchen", "Kitchen"),
    ("ballroom", "Ballroom"),
    ("conservatory", "Conservatory"),
    ("dining_room", "Dining Room"),
    ("billiard_room", "Billiard Room"),
    ("library", "Library"),
    ("lounge", "Lounge"),
    ("hall", "Hall"),
    ("study", "Study"),
];

/// Registry of every card in the game.
///
/// ```
/// use rust_sleuth::cards::{CardCatalog, CardKind};
///
/// let catalog = CardCatalog::classic();
/// let wrench = catalog.by_key("wrench").unwrap();
/// assert_eq!(wrench.kind, CardKind::Weapon);
/// assert_eq!(catalog.of_kind(CardKind::Room).count(), 9);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct CardCatalog {
    cards: Vec<Card>,
    by_key: FxHashMap<String, CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard 6 suspects, 6 weapons and 9 rooms.
    #[must_use]
    pub fn classic() -> Self {
        let mut catalog = Self::new();
        let entries = CLASSIC_SUSPECTS
            .iter()
            .map(|e| (CardKind::Suspect, e))
            .chain(CLASSIC_WEAPONS.iter().map(|e| (CardKind::Weapon, e)))
            .chain(CLASSIC_ROOMS.iter().map(|e| (CardKind::Room, e)));
        for ((kind, &(key, name)), id) in entries.zip(0u8..) {
            catalog.insert(Card::new(CardId::new(id), key, name, kind));
        }
        catalog
    }

    /// Register a card, assigning the next id.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        kind: CardKind,
    ) -> Result<CardId, SetupError> {
        let key = key.into();
        if self.by_key.contains_key(&key) {
            return Err(SetupError::DuplicateCard(key));
        }
        let id = u8::try_from(self.cards.len())
            .map(CardId::new)
            .map_err(|_| SetupError::CatalogFull(MAX_CARDS))?;
        self.insert(Card::new(id, key, name, kind));
        Ok(id)
    }

    fn insert(&mut self, card: Card) {
        self.by_key.insert(card.key.clone(), card.id);
        self.cards.push(card);
    }

    /// Check that every category has at least one card.
    pub fn validate(&self) -> Result<(), SetupError> {
        for kind in CardKind::ALL {
            if self.of_kind(kind).next().is_none() {
                return Err(SetupError::EmptyCategory(kind.label()));
            }
        }
        Ok(())
    }

    /// Get a card by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.0 as usize)
    }

    /// Get a card by wire key.
    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<&Card> {
        self.by_key.get(key).and_then(|&id| self.get(id))
    }

    /// Resolve a wire key to an id of the expected category.
    pub fn resolve(&self, key: &str, kind: CardKind) -> RuleResult<CardId> {
        match self.by_key(key) {
            Some(card) if card.is(kind) => Ok(card.id),
            Some(card) => Err(RuleError::InvalidArgument(format!(
                "{key:?} is a {}, expected a {kind}",
                card.kind
            ))),
            None => Err(RuleError::InvalidArgument(format!("unknown card {key:?}"))),
        }
    }

    /// Check that `id` exists and belongs to `kind`.
    pub fn expect_kind(&self, id: CardId, kind: CardKind) -> RuleResult<()> {
        match self.get(id) {
            Some(card) if card.is(kind) => Ok(()),
            Some(card) => Err(RuleError::InvalidArgument(format!(
                "{:?} is a {}, expected a {kind}",
                card.key, card.kind
            ))),
            None => Err(RuleError::InvalidArgument(format!("unknown card {id}"))),
        }
    }

    /// Wire key of a card, or `"?"` for ids outside the catalog.
    #[must_use]
    pub fn key_of(&self, id: CardId) -> &str {
        self.get(id).map_or("?", |c| c.key.as_str())
    }

    /// Cards of one category, in id order.
    pub fn of_kind(&self, kind: CardKind) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.kind == kind)
    }

    /// Ids of one category, in id order.
    #[must_use]
    pub fn ids_of_kind(&self, kind: CardKind) -> Vec<CardId> {
        self.of_kind(kind).map(|c| c.id).collect()
    }

    /// Every card id.
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|c| c.id)
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

/// Ids are reassigned densely in list order.
impl TryFrom<Vec<Card>> for CardCatalog {
    type Error = SetupError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card.key, card.name, card.kind)?;
        }
        Ok(catalog)
    }
}

impl From<CardCatalog> for Vec<Card> {
    fn from(catalog: CardCatalog) -> Self {
        catalog.cards
    }
}
