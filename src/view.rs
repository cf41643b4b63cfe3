//! Per-seat projection of the game state.
//!
//! `GameState` holds everything, including the envelope and every hand.
//! A transport sends each seat a `PlayerView` instead:
//! - own hand in full, other hands as counts
//! - the envelope only through `gameover`
//! - `card_shown` only to the suggester and the refuter
//! - the live suggestion's matching cards only to its responder

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Coord;
use crate::cards::CardId;
use crate::core::config::Millis;
use crate::core::error::RuleResult;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, Gameover, TurnPhase};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub id: PlayerId,
    pub character: CardId,
    pub position: Coord,
    pub current_room: Option<CardId>,
    pub previous_room: Option<CardId>,
    /// Present for the viewer's own seat only.
    pub hand: Option<Vec<CardId>>,
    pub hand_size: usize,
    pub is_eliminated: bool,
    pub was_moved_by_suggestion: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionView {
    pub suggester: PlayerId,
    pub suspect: CardId,
    pub weapon: CardId,
    pub room: CardId,
    pub current_responder: Option<PlayerId>,
    /// Present for the responder only.
    pub matching_cards: Option<SmallVec<[CardId; 3]>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefutationView {
    pub suggester: PlayerId,
    pub refuter: Option<PlayerId>,
    /// Present for the suggester and the refuter only.
    pub card_shown: Option<CardId>,
    pub turn: u32,
}

/// What one seat may see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub viewer: PlayerId,
    pub seats: Vec<SeatView>,
    pub table_cards: Vec<CardId>,
    pub current_player: PlayerId,
    pub turn_number: u32,
    pub phase: TurnPhase,
    pub dice_roll: Option<Vec<u8>>,
    pub has_suggested: bool,
    pub awaiting_acknowledgement: bool,
    pub current_suggestion: Option<SuggestionView>,
    pub last_refutation: Option<RefutationView>,
    pub turn_started_at: Millis,
    pub stage_started_at: Millis,
    pub gameover: Option<Gameover>,
}

impl PlayerView {
    /// Redact `state` for `viewer`.
    pub fn for_viewer(state: &GameState, viewer: PlayerId) -> RuleResult<Self> {
        state.player(viewer)?;

        let seats = state
            .players
            .iter()
            .map(|(id, p)| SeatView {
                id,
                character: p.character,
                position: p.position,
                current_room: p.current_room,
                previous_room: p.previous_room,
                hand: (id == viewer).then(|| p.hand.iter().copied().collect()),
                hand_size: p.hand.len(),
                is_eliminated: p.is_eliminated,
                was_moved_by_suggestion: p.was_moved_by_suggestion,
            })
            .collect();

        let current_suggestion = state.current_suggestion.as_ref().map(|s| SuggestionView {
            suggester: s.suggester,
            suspect: s.suspect,
            weapon: s.weapon,
            room: s.room,
            current_responder: s.current_responder,
            matching_cards: (s.current_responder == Some(viewer)).then(|| s.matching_cards.clone()),
        });

        let last_refutation = state.last_refutation.as_ref().map(|r| {
            let privy = viewer == r.suggester || Some(viewer) == r.refuter;
            RefutationView {
                suggester: r.suggester,
                refuter: r.refuter,
                card_shown: if privy { r.card_shown } else { None },
                turn: r.turn,
            }
        });

        Ok(Self {
            viewer,
            seats,
            table_cards: state.table_cards.iter().copied().collect(),
            current_player: state.current_player,
            turn_number: state.turn_number,
            phase: state.phase,
            dice_roll: state.dice_roll.as_ref().map(|d| d.to_vec()),
            has_suggested: state.has_suggested,
            awaiting_acknowledgement: state.awaiting_acknowledgement,
            current_suggestion,
            last_refutation,
            turn_started_at: state.turn_started_at,
            stage_started_at: state.stage_started_at,
            gameover: state.gameover,
        })
    }
}
