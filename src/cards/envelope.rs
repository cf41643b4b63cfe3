//! The secret solution.

use serde::{Deserialize, Serialize};

use super::catalog::CardCatalog;
use super::definition::{CardId, CardKind};

/// One suspect, one weapon and one room, fixed at setup.
///
/// Only the terminal reveal exposes it; projections must hide it before
/// game over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretEnvelope {
    pub suspect: CardId,
    pub weapon: CardId,
    pub room: CardId,
}

impl SecretEnvelope {
    /// Create an envelope. Category checks happen at setup.
    #[must_use]
    pub const fn new(suspect: CardId, weapon: CardId, room: CardId) -> Self {
        Self { suspect, weapon, room }
    }

    /// The three cards, in category order.
    #[must_use]
    pub const fn cards(&self) -> [CardId; 3] {
        [self.suspect, self.weapon, self.room]
    }

    /// Whether `card` is one of the three.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards().contains(&card)
    }

    /// The card of a given category.
    #[must_use]
    pub const fn get(&self, kind: CardKind) -> CardId {
        match kind {
            CardKind::Suspect => self.suspect,
            CardKind::Weapon => self.weapon,
            CardKind::Room => self.room,
        }
    }

    /// Check that each slot holds a card of its category.
    pub fn validate(&self, catalog: &CardCatalog) -> Result<(), String> {
        for kind in CardKind::ALL {
            let id = self.get(kind);
            match catalog.get(id) {
                Some(card) if card.is(kind) => {}
                Some(card) => return Err(format!("envelope {kind} slot holds {:?}", card.key)),
                None => return Err(format!("envelope {kind} slot holds unknown {id}")),
            }
        }
        Ok(())
    }
}
