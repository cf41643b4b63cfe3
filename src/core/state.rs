//! Game state: the single shared, unredacted aggregate of one match.
//!
//! ## GameState
//!
//! - Seats (`PlayerState`): pawn, room, hand, elimination, drag flag
//! - Table cards and the secret envelope
//! - Turn progression: active seat, turn number, phase, dice, per-turn flags
//! - The live suggestion and the last refutation result
//! - Deadline timestamps for the timeout supervisor
//! - Terminal outcome and move history
//!
//! Uses `im` persistent collections so the reducer can clone the whole
//! state per move and mutate the clone; a rejected move never touches
//! the caller's copy.

use im::{OrdSet, Vector};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::MoveRecord;
use super::config::{Millis, MAX_PLAYERS, MIN_PLAYERS};
use super::error::{RuleError, RuleResult, SetupError};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::{BoardGrid, Coord};
use crate::cards::{verify_partition, CardCatalog, CardId, CardKind, Deal, SecretEnvelope};

/// What action category is legal for the active seat right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnPhase {
    /// Waiting for the dice (or, when dragged, for the investigate choice).
    Roll,
    /// Dice rolled; waiting for a destination.
    Move,
    /// Stopped somewhere other than the center; may suggest when in a room.
    Action,
    /// A suggestion is waiting for its responder.
    Suggestion,
    /// Stopped on the center cell; may accuse.
    Accusation,
}

/// One seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,

    /// Suspect card this seat plays as.
    pub character: CardId,

    pub position: Coord,

    /// Room whose door the pawn stands on.
    pub current_room: Option<CardId>,

    /// Room the pawn was in when its current turn began.
    pub previous_room: Option<CardId>,

    /// Private cards. Refutation only shows a card; it never leaves the hand.
    pub hand: OrdSet<CardId>,

    pub is_eliminated: bool,

    /// Dragged into a room by another seat's suggestion since its last turn.
    pub was_moved_by_suggestion: bool,
}

impl PlayerState {
    /// Cards of this hand among `cards`, in the order given.
    #[must_use]
    pub fn matching(&self, cards: &[CardId]) -> SmallVec<[CardId; 3]> {
        cards.iter().copied().filter(|c| self.hand.contains(c)).collect()
    }
}

/// The live interrogation. At most one exists game-wide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionState {
    pub suggester: PlayerId,
    pub suspect: CardId,
    pub weapon: CardId,
    /// Always the suggester's room at the time of the suggestion.
    pub room: CardId,
    pub current_responder: Option<PlayerId>,
    /// Every named card the responder holds; they reveal exactly one.
    pub matching_cards: SmallVec<[CardId; 3]>,
}

impl SuggestionState {
    /// The three named cards.
    #[must_use]
    pub fn cards(&self) -> [CardId; 3] {
        [self.suspect, self.weapon, self.room]
    }
}

/// Outcome of the most recent suggestion.
///
/// `card_shown` is the true value. Only the suggester (and the refuter,
/// who chose it) may see it; redaction belongs to projections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefutationResult {
    pub suggester: PlayerId,
    pub refuter: Option<PlayerId>,
    pub card_shown: Option<CardId>,
    /// Turn the suggestion was made in.
    pub turn: u32,
}

/// Terminal result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameResult {
    /// A seat accused correctly.
    Winner(PlayerId),
    /// Every seat was eliminated before anyone solved it.
    Unsolved,
}

impl GameResult {
    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Terminal notification payload: result plus the revealed envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gameover {
    pub result: GameResult,
    pub solution: SecretEnvelope,
}

impl Gameover {
    /// The winning seat, if the match was solved.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.result {
            GameResult::Winner(p) => Some(p),
            GameResult::Unsolved => None,
        }
    }
}

/// Full match state including private information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    // === Seats and cards ===
    pub players: PlayerMap<PlayerState>,

    /// Leftover cards every seat can see.
    pub table_cards: OrdSet<CardId>,

    envelope: SecretEnvelope,

    // === Turn progression ===
    pub current_player: PlayerId,

    /// Starts at 1; increments on every turn change.
    pub turn_number: u32,

    pub phase: TurnPhase,

    /// Faces of this turn's roll.
    pub dice_roll: Option<SmallVec<[u8; 2]>>,

    /// A suggestion has been made this turn.
    pub has_suggested: bool,

    /// This turn's suggestion resolved and the suggester has not acknowledged.
    pub awaiting_acknowledgement: bool,

    // === Interrogation ===
    pub current_suggestion: Option<SuggestionState>,
    pub last_refutation: Option<RefutationResult>,

    // === Deadlines ===
    pub turn_started_at: Millis,
    pub stage_started_at: Millis,

    // === Terminal ===
    pub gameover: Option<Gameover>,

    /// Accepted moves, oldest first.
    pub history: Vector<MoveRecord>,

    /// Dice stream.
    pub rng: GameRng,
}

impl GameState {
    /// Seat the players and hand out the deal.
    ///
    /// Seat `i` plays the `i`-th suspect of the catalog and starts on
    /// start position `i`.
    pub fn new(
        deal: Deal,
        catalog: &CardCatalog,
        board: &BoardGrid,
        rng: GameRng,
        now: Millis,
    ) -> Result<Self, SetupError> {
        let player_count = deal.hands.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(SetupError::PlayerCount(player_count));
        }
        deal.validate(catalog)?;

        let suspects = catalog.ids_of_kind(CardKind::Suspect);
        if suspects.len() < player_count {
            return Err(SetupError::NotEnoughSuspects {
                players: player_count,
                suspects: suspects.len(),
            });
        }
        if board.seat_capacity() < player_count {
            return Err(SetupError::NotEnoughStarts {
                needed: player_count,
                found: board.seat_capacity(),
            });
        }

        let mut seats = Vec::with_capacity(player_count);
        for (i, hand) in deal.hands.into_iter().enumerate() {
            let position = board.start(i as u8).ok_or(SetupError::NotEnoughStarts {
                needed: player_count,
                found: i,
            })?;
            seats.push(PlayerState {
                id: PlayerId::new(i as u8),
                character: suspects[i],
                position,
                current_room: None,
                previous_room: None,
                hand,
                is_eliminated: false,
                was_moved_by_suggestion: false,
            });
        }

        Ok(Self {
            players: PlayerMap::from_vec(seats),
            table_cards: deal.table,
            envelope: deal.envelope,
            current_player: PlayerId::new(0),
            turn_number: 1,
            phase: TurnPhase::Roll,
            dice_roll: None,
            has_suggested: false,
            awaiting_acknowledgement: false,
            current_suggestion: None,
            last_refutation: None,
            turn_started_at: now,
            stage_started_at: now,
            gameover: None,
            history: Vector::new(),
            rng,
        })
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Look up a seat.
    pub fn player(&self, id: PlayerId) -> RuleResult<&PlayerState> {
        self.players.get(id).ok_or(RuleError::NotFound(id))
    }

    /// Mutable seat lookup.
    pub fn player_mut(&mut self, id: PlayerId) -> RuleResult<&mut PlayerState> {
        self.players.get_mut(id).ok_or(RuleError::NotFound(id))
    }

    /// The active seat.
    #[must_use]
    pub fn active(&self) -> &PlayerState {
        &self.players[self.current_player]
    }

    /// The secret solution. Unredacted; projections must hide it.
    #[must_use]
    pub fn envelope(&self) -> &SecretEnvelope {
        &self.envelope
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.gameover.is_some()
    }

    /// Seats still in the running.
    pub fn active_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(|(_, p)| !p.is_eliminated)
            .map(|(id, _)| id)
    }

    /// Seat playing a given suspect.
    #[must_use]
    pub fn seat_of_character(&self, suspect: CardId) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, p)| p.character == suspect)
            .map(|(id, _)| id)
    }

    /// Cells held by non-eliminated pawns other than `mover`.
    #[must_use]
    pub fn occupied_cells(&self, mover: PlayerId) -> FxHashSet<Coord> {
        self.players
            .iter()
            .filter(|(id, p)| *id != mover && !p.is_eliminated)
            .map(|(_, p)| p.position)
            .collect()
    }

    /// Sum of this turn's dice.
    #[must_use]
    pub fn dice_total(&self) -> Option<u32> {
        self.dice_roll
            .as_ref()
            .map(|faces| faces.iter().map(|&f| u32::from(f)).sum())
    }

    /// Check the deck partition invariant.
    pub fn verify_partition(&self, catalog: &CardCatalog) -> Result<(), String> {
        verify_partition(
            catalog,
            &self.envelope,
            self.players.values().map(|p| &p.hand),
            &self.table_cards,
        )
    }

    // === Snapshots ===

    /// Encode a snapshot for the host to persist.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Restore a snapshot.
    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}
