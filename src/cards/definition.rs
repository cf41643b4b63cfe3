//! Card catalog entries.
//!
//! A `Card` is an immutable catalog entry. Game state never embeds cards,
//! it stores `CardId`s and looks the entry up in the `CardCatalog` when a
//! name or category is needed.

use serde::{Deserialize, Serialize};

/// Index of a card in its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The three card categories. The envelope holds one of each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardKind {
    Suspect,
    Weapon,
    Room,
}

impl CardKind {
    /// Every category, in envelope order.
    pub const ALL: [CardKind; 3] = [CardKind::Suspect, CardKind::Weapon, CardKind::Room];

    /// Lowercase label used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CardKind::Suspect => "suspect",
            CardKind::Weapon => "weapon",
            CardKind::Room => "room",
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Static card data.
///
/// ```
/// use rust_sleuth::cards::{Card, CardId, CardKind};
///
/// let rope = Card::new(CardId::new(10), "rope", "Rope", CardKind::Weapon);
/// assert!(rope.is(CardKind::Weapon));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Catalog index.
    pub id: CardId,

    /// Stable wire key (`"wrench"`, `"kitchen"`).
    pub key: String,

    /// Display name.
    pub name: String,

    /// Category.
    pub kind: CardKind,
}

impl Card {
    /// Create a new card.
    #[must_use]
    pub fn new(id: CardId, key: impl Into<String>, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            key: key.into(),
            name: name.into(),
            kind,
        }
    }

    /// Whether this card belongs to `kind`.
    #[must_use]
    pub fn is(&self, kind: CardKind) -> bool {
        self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(4);
        assert_eq!(id.raw(), 4);
        assert_eq!(format!("{}", id), "Card(4)");
    }

    #[test]
    fn test_kind_labels() {
        let labels: Vec<_> = CardKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(labels, vec!["suspect", "weapon", "room"]);
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(CardId::new(1), "plum", "Professor Plum", CardKind::Suspect);
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains(r#""kind":"suspect""#));

        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
