//! Dealing: splitting the catalog into envelope, hands and table cards.
//!
//! The deck partition invariant starts here: every catalog card ends up
//! in exactly one of the envelope, one hand, or the face-up table.

use im::OrdSet;
use rustc_hash::FxHashSet;

use super::catalog::CardCatalog;
use super::definition::{CardId, CardKind};
use super::envelope::SecretEnvelope;
use crate::core::error::SetupError;
use crate::core::rng::GameRng;

/// The result of dealing one match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    pub envelope: SecretEnvelope,
    /// Seat-ordered hands.
    pub hands: Vec<OrdSet<CardId>>,
    /// Leftover cards shown face-up to everyone.
    pub table: OrdSet<CardId>,
}

impl Deal {
    /// Random deal.
    ///
    /// Draws one envelope card per category, shuffles the rest and deals
    /// whole rounds; the `remaining % player_count` leftovers go face-up.
    pub fn random(catalog: &CardCatalog, player_count: usize, rng: &mut GameRng) -> Result<Self, SetupError> {
        catalog.validate()?;
        if player_count == 0 {
            return Err(SetupError::PlayerCount(player_count));
        }

        let mut pick = |kind: CardKind| -> Result<CardId, SetupError> {
            let ids = catalog.ids_of_kind(kind);
            rng.choose(&ids)
                .copied()
                .ok_or(SetupError::EmptyCategory(kind.label()))
        };
        let envelope = SecretEnvelope::new(
            pick(CardKind::Suspect)?,
            pick(CardKind::Weapon)?,
            pick(CardKind::Room)?,
        );

        let mut deck: Vec<CardId> = catalog.ids().filter(|&id| !envelope.contains(id)).collect();
        rng.shuffle(&mut deck);

        let per_hand = deck.len() / player_count;
        let mut hands = vec![OrdSet::new(); player_count];
        let mut table = OrdSet::new();
        for (i, card) in deck.into_iter().enumerate() {
            if i < per_hand * player_count {
                hands[i % player_count].insert(card);
            } else {
                table.insert(card);
            }
        }

        Ok(Self { envelope, hands, table })
    }

    /// Explicit deal from wire keys, validated against the partition invariant.
    ///
    /// ```
    /// use rust_sleuth::cards::{CardCatalog, Deal};
    ///
    /// let catalog = CardCatalog::classic();
    /// let err = Deal::from_keys(&catalog, ["plum", "rope", "study"], &[&["wrench"], &[]], &[]);
    /// assert!(err.is_err()); // most of the deck is unaccounted for
    /// ```
    pub fn from_keys(
        catalog: &CardCatalog,
        envelope: [&str; 3],
        hands: &[&[&str]],
        table: &[&str],
    ) -> Result<Self, SetupError> {
        let lookup = |key: &str| -> Result<CardId, SetupError> {
            catalog
                .by_key(key)
                .map(|c| c.id)
                .ok_or_else(|| SetupError::InvalidDeal(format!("unknown card {key:?}")))
        };

        let envelope = SecretEnvelope::new(lookup(envelope[0])?, lookup(envelope[1])?, lookup(envelope[2])?);
        let hands = hands
            .iter()
            .map(|hand| hand.iter().map(|&k| lookup(k)).collect::<Result<OrdSet<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;
        let table = table.iter().map(|&k| lookup(k)).collect::<Result<OrdSet<_>, _>>()?;

        let deal = Self { envelope, hands, table };
        deal.validate(catalog)?;
        Ok(deal)
    }

    /// Check envelope categories and the partition invariant.
    pub fn validate(&self, catalog: &CardCatalog) -> Result<(), SetupError> {
        self.envelope.validate(catalog).map_err(SetupError::InvalidDeal)?;
        verify_partition(catalog, &self.envelope, self.hands.iter(), &self.table)
            .map_err(SetupError::InvalidDeal)
    }
}

/// Check that hands ∪ table ∪ envelope is exactly the catalog with no
/// card appearing twice.
pub fn verify_partition<'a>(
    catalog: &CardCatalog,
    envelope: &SecretEnvelope,
    hands: impl IntoIterator<Item = &'a OrdSet<CardId>>,
    table: &OrdSet<CardId>,
) -> Result<(), String> {
    let mut seen: FxHashSet<CardId> = FxHashSet::default();
    let parts = envelope
        .cards()
        .into_iter()
        .chain(hands.into_iter().flat_map(|h| h.iter().copied()))
        .chain(table.iter().copied());

    for card in parts {
        if catalog.get(card).is_none() {
            return Err(format!("unknown card {card}"));
        }
        if !seen.insert(card) {
            return Err(format!("{:?} appears twice", catalog.key_of(card)));
        }
    }

    if seen.len() != catalog.len() {
        let missing: Vec<_> = catalog
            .ids()
            .filter(|id| !seen.contains(id))
            .map(|id| catalog.key_of(id).to_string())
            .collect();
        return Err(format!("cards not dealt: {}", missing.join(", ")));
    }
    Ok(())
}
