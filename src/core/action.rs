//! Moves: what a seat submits, what it may submit, and what was accepted.
//!
//! - `Move`: a fully resolved intent (card ids, coordinates)
//! - `MoveRequest`: the wire form with card keys, as a transport delivers it
//! - `MoveDescriptor`: one entry of `legal_moves`, with argument domains
//! - `MoveRecord`: an accepted move in the match history

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::Millis;
use super::error::{RuleError, RuleResult};
use super::player::PlayerId;
use crate::board::Coord;
use crate::cards::{CardCatalog, CardId, CardKind};

/// A resolved move.
///
/// Externally tagged so match snapshots stay decodable by `bincode`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Move {
    /// Roll the dice for movement.
    Roll,
    /// Dragged last round: skip movement and suggest in the current room.
    InvestigateNow,
    /// Stop on a reachable cell.
    MoveTo { to: Coord },
    /// Suggest a suspect and weapon in the current room.
    Suggest { suspect: CardId, weapon: CardId, room: CardId },
    /// Privately show one matching card to the suggester.
    Refute { card: CardId },
    /// Final, all-or-nothing guess from the center cell.
    Accuse { suspect: CardId, weapon: CardId, room: CardId },
    /// Suggester has seen the refutation result; ends the turn.
    Acknowledge,
    /// End the turn.
    EndTurn,
    /// Forced: the active seat of `turn` ran out of time.
    TimeoutCurrentPlayer { turn: u32 },
    /// Forced: the responder of `turn`'s suggestion ran out of time.
    SkipRefutation { turn: u32 },
}

impl Move {
    /// Forced moves may be submitted by any seat.
    #[must_use]
    pub fn is_forced(&self) -> bool {
        matches!(self, Move::TimeoutCurrentPlayer { .. } | Move::SkipRefutation { .. })
    }

    /// Wire name of the move.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Move::Roll => "roll",
            Move::InvestigateNow => "investigateNow",
            Move::MoveTo { .. } => "moveTo",
            Move::Suggest { .. } => "suggest",
            Move::Refute { .. } => "refute",
            Move::Accuse { .. } => "accuse",
            Move::Acknowledge => "acknowledge",
            Move::EndTurn => "endTurn",
            Move::TimeoutCurrentPlayer { .. } => "timeoutCurrentPlayer",
            Move::SkipRefutation { .. } => "skipRefutation",
        }
    }
}

/// A move as a transport delivers it: card arguments are catalog keys.
///
/// ```
/// use rust_sleuth::core::MoveRequest;
///
/// let req: MoveRequest = serde_json::from_str(
///     r#"{"move":"suggest","suspect":"plum","weapon":"wrench","room":"kitchen"}"#,
/// ).unwrap();
/// assert!(matches!(req, MoveRequest::Suggest { .. }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "move", rename_all = "camelCase")]
pub enum MoveRequest {
    Roll,
    InvestigateNow,
    MoveTo { to: Coord },
    Suggest { suspect: String, weapon: String, room: String },
    Refute { card: String },
    Accuse { suspect: String, weapon: String, room: String },
    Acknowledge,
    EndTurn,
    TimeoutCurrentPlayer { turn: u32 },
    SkipRefutation { turn: u32 },
}

impl MoveRequest {
    /// Resolve card keys against the catalog.
    ///
    /// Unknown keys and wrong categories are `InvalidArgument`.
    pub fn resolve(&self, catalog: &CardCatalog) -> RuleResult<Move> {
        let mv = match self {
            MoveRequest::Roll => Move::Roll,
            MoveRequest::InvestigateNow => Move::InvestigateNow,
            MoveRequest::MoveTo { to } => Move::MoveTo { to: *to },
            MoveRequest::Suggest { suspect, weapon, room } => Move::Suggest {
                suspect: catalog.resolve(suspect, CardKind::Suspect)?,
                weapon: catalog.resolve(weapon, CardKind::Weapon)?,
                room: catalog.resolve(room, CardKind::Room)?,
            },
            MoveRequest::Refute { card } => Move::Refute {
                card: catalog
                    .by_key(card)
                    .map(|c| c.id)
                    .ok_or_else(|| RuleError::InvalidArgument(format!("unknown card {card:?}")))?,
            },
            MoveRequest::Accuse { suspect, weapon, room } => Move::Accuse {
                suspect: catalog.resolve(suspect, CardKind::Suspect)?,
                weapon: catalog.resolve(weapon, CardKind::Weapon)?,
                room: catalog.resolve(room, CardKind::Room)?,
            },
            MoveRequest::Acknowledge => Move::Acknowledge,
            MoveRequest::EndTurn => Move::EndTurn,
            MoveRequest::TimeoutCurrentPlayer { turn } => Move::TimeoutCurrentPlayer { turn: *turn },
            MoveRequest::SkipRefutation { turn } => Move::SkipRefutation { turn: *turn },
        };
        Ok(mv)
    }
}

/// One legal move category for a seat, with its argument domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "move", rename_all = "camelCase")]
pub enum MoveDescriptor {
    Roll,
    InvestigateNow,
    MoveTo { destinations: Vec<Coord> },
    /// The room is fixed by the suggester's location.
    Suggest { room: CardId, suspects: Vec<CardId>, weapons: Vec<CardId> },
    Refute { options: SmallVec<[CardId; 3]> },
    Accuse,
    Acknowledge,
    EndTurn,
}

impl MoveDescriptor {
    /// Whether `mv` is an instance of this descriptor.
    #[must_use]
    pub fn admits(&self, mv: &Move) -> bool {
        match (self, mv) {
            (MoveDescriptor::Roll, Move::Roll)
            | (MoveDescriptor::InvestigateNow, Move::InvestigateNow)
            | (MoveDescriptor::Accuse, Move::Accuse { .. })
            | (MoveDescriptor::Acknowledge, Move::Acknowledge)
            | (MoveDescriptor::EndTurn, Move::EndTurn) => true,
            (MoveDescriptor::MoveTo { destinations }, Move::MoveTo { to }) => destinations.contains(to),
            (MoveDescriptor::Suggest { room, suspects, weapons }, Move::Suggest { suspect, weapon, room: r }) => {
                room == r && suspects.contains(suspect) && weapons.contains(weapon)
            }
            (MoveDescriptor::Refute { options }, Move::Refute { card }) => options.contains(card),
            _ => false,
        }
    }
}

/// An accepted move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The seat that submitted the move.
    pub player: PlayerId,

    /// The move taken.
    pub mv: Move,

    /// Turn number when the move was accepted.
    pub turn: u32,

    /// Host clock at acceptance.
    pub at: Millis,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(player: PlayerId, mv: Move, turn: u32, at: Millis) -> Self {
        Self { player, mv, turn, at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_wire_shape() {
        let mv = Move::MoveTo { to: Coord::new(2, 3) };
        let json = serde_json::to_string(&mv).unwrap();
        assert_eq!(json, r#"{"moveTo":{"to":{"row":2,"col":3}}}"#);

        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mv);
    }

    #[test]
    fn test_forced_moves() {
        assert!(Move::SkipRefutation { turn: 3 }.is_forced());
        assert!(Move::TimeoutCurrentPlayer { turn: 3 }.is_forced());
        assert!(!Move::EndTurn.is_forced());
        assert_eq!(Move::SkipRefutation { turn: 1 }.name(), "skipRefutation");
    }

    #[test]
    fn test_request_resolves_keys() {
        let catalog = CardCatalog::classic();
        let req = MoveRequest::Accuse {
            suspect: "plum".into(),
            weapon: "rope".into(),
            room: "study".into(),
        };
        let mv = req.resolve(&catalog).unwrap();
        assert_eq!(
            mv,
            Move::Accuse {
                suspect: catalog.by_key("plum").unwrap().id,
                weapon: catalog.by_key("rope").unwrap().id,
                room: catalog.by_key("study").unwrap().id,
            }
        );
    }

    #[test]
    fn test_request_rejects_wrong_category() {
        let catalog = CardCatalog::classic();
        let req = MoveRequest::Suggest {
            suspect: "wrench".into(),
            weapon: "plum".into(),
            room: "kitchen".into(),
        };
        assert!(matches!(req.resolve(&catalog), Err(RuleError::InvalidArgument(_))));

        let unknown = MoveRequest::Refute { card: "banana".into() };
        assert!(matches!(unknown.resolve(&catalog), Err(RuleError::InvalidArgument(_))));
    }

    #[test]
    fn test_descriptor_admits() {
        let d = MoveDescriptor::MoveTo {
            destinations: vec![Coord::new(0, 1)],
        };
        assert!(d.admits(&Move::MoveTo { to: Coord::new(0, 1) }));
        assert!(!d.admits(&Move::MoveTo { to: Coord::new(5, 5) }));
        assert!(!d.admits(&Move::Roll));

        let refute = MoveDescriptor::Refute {
            options: SmallVec::from_slice(&[CardId::new(3)]),
        };
        assert!(refute.admits(&Move::Refute { card: CardId::new(3) }));
        assert!(!refute.admits(&Move::Refute { card: CardId::new(4) }));
    }
}
