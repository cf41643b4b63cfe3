//! What a bot knows about the envelope.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId, CardKind, SecretEnvelope};
use crate::core::error::RuleResult;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Cards a seat knows are outside the envelope.
///
/// Seeded from the seat's own hand and the face-up table; grows with
/// every card shown to it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Knowledge {
    seen: BTreeSet<CardId>,
    /// Last refutation already absorbed, by turn.
    absorbed_turn: Option<u32>,
}

impl Knowledge {
    /// Seed from what `me` can see at setup.
    pub fn new(state: &GameState, me: PlayerId) -> RuleResult<Self> {
        let seat = state.player(me)?;
        let seen = seat.hand.iter().chain(state.table_cards.iter()).copied().collect();
        Ok(Self {
            seen,
            absorbed_turn: None,
        })
    }

    /// Record a card known to be outside the envelope.
    pub fn observe(&mut self, card: CardId) -> bool {
        self.seen.insert(card)
    }

    /// Absorb the last refutation if it was shown to `me`.
    pub fn absorb(&mut self, state: &GameState, me: PlayerId) {
        let Some(result) = &state.last_refutation else {
            return;
        };
        if result.suggester != me || self.absorbed_turn == Some(result.turn) {
            return;
        }
        self.absorbed_turn = Some(result.turn);
        if let Some(card) = result.card_shown {
            self.observe(card);
        }
    }

    #[must_use]
    pub fn knows(&self, card: CardId) -> bool {
        self.seen.contains(&card)
    }

    /// Cards of `kind` that could still be in the envelope.
    #[must_use]
    pub fn candidates(&self, catalog: &CardCatalog, kind: CardKind) -> Vec<CardId> {
        catalog
            .of_kind(kind)
            .map(|c| c.id)
            .filter(|id| !self.seen.contains(id))
            .collect()
    }

    /// The envelope, once every category is down to one candidate.
    #[must_use]
    pub fn solution(&self, catalog: &CardCatalog) -> Option<SecretEnvelope> {
        let only = |kind| match self.candidates(catalog, kind).as_slice() {
            [one] => Some(*one),
            _ => None,
        };
        Some(SecretEnvelope::new(
            only(CardKind::Suspect)?,
            only(CardKind::Weapon)?,
            only(CardKind::Room)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deal;
    use crate::core::state::RefutationResult;
    use crate::games::classic::ClassicGameBuilder;
    use crate::rules::RulesEngine;

    fn setup() -> (crate::games::classic::ClassicGame, GameState) {
        let catalog = CardCatalog::classic();
        let deal = Deal::from_keys(
            &catalog,
            ["plum", "rope", "study"],
            &[
                &["scarlet", "mustard", "candlestick", "kitchen", "ballroom", "conservatory"],
                &["white", "green", "dagger", "lead_pipe", "dining_room", "billiard_room"],
                &["peacock", "revolver", "wrench", "library", "lounge", "hall"],
            ],
            &[],
        )
        .unwrap();
        ClassicGameBuilder::new().player_count(3).deal(deal).build().unwrap()
    }

    #[test]
    fn test_seeded_from_hand() {
        let (game, state) = setup();
        let knowledge = Knowledge::new(&state, PlayerId::new(0)).unwrap();
        let catalog = game.catalog();

        let suspects = knowledge.candidates(catalog, CardKind::Suspect);
        assert_eq!(suspects.len(), 4);
        assert!(!suspects.contains(&catalog.by_key("scarlet").unwrap().id));
        assert!(knowledge.solution(catalog).is_none());
    }

    #[test]
    fn test_absorb_only_own_refutations_once() {
        let (game, mut state) = setup();
        let catalog = game.catalog();
        let white = catalog.by_key("white").unwrap().id;
        let mut knowledge = Knowledge::new(&state, PlayerId::new(0)).unwrap();

        state.last_refutation = Some(RefutationResult {
            suggester: PlayerId::new(2),
            refuter: Some(PlayerId::new(1)),
            card_shown: Some(white),
            turn: 3,
        });
        knowledge.absorb(&state, PlayerId::new(0));
        assert!(!knowledge.knows(white));

        state.last_refutation = Some(RefutationResult {
            suggester: PlayerId::new(0),
            refuter: Some(PlayerId::new(1)),
            card_shown: Some(white),
            turn: 4,
        });
        knowledge.absorb(&state, PlayerId::new(0));
        assert!(knowledge.knows(white));
    }

    #[test]
    fn test_solution_when_all_singletons() {
        let (game, state) = setup();
        let catalog = game.catalog();
        let mut knowledge = Knowledge::new(&state, PlayerId::new(0)).unwrap();
        for key in [
            "white", "green", "peacock", "dagger", "lead_pipe", "revolver", "wrench",
            "dining_room", "billiard_room", "library", "lounge", "hall",
        ] {
            knowledge.observe(catalog.by_key(key).unwrap().id);
        }

        assert_eq!(knowledge.solution(catalog), Some(*state.envelope()));
    }
}
