//! Typed rejections.
//!
//! `RuleError` is returned for every expected game-flow condition; the
//! state passed to `apply` is left untouched when one is returned.
//! `SetupError` is fatal and only produced while creating a match.

use thiserror::Error;

use super::player::PlayerId;

/// Why a submitted move was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// Right actor, wrong phase (or the move is not available to them).
    #[error("illegal move: {0}")]
    IllegalMove(&'static str),

    /// Unknown card, wrong card category, or a location that does not match.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A turn move submitted by a seat that is not the active one.
    #[error("not your turn: seat {actor} acted while seat {active} is active")]
    OutOfTurn { actor: PlayerId, active: PlayerId },

    /// The thing this move would resolve has already been resolved.
    #[error("already resolved: {0}")]
    AlreadyResolved(&'static str),

    /// The actor does not name a seat of this match.
    #[error("unknown player {0}")]
    NotFound(PlayerId),
}

/// Result alias for move handling.
pub type RuleResult<T> = Result<T, RuleError>;

/// Fatal problems found while creating a match.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("player count {0} outside the supported range")]
    PlayerCount(usize),

    #[error("invalid dice: {count}d{sides}")]
    InvalidDice { count: u8, sides: u8 },

    #[error("board has no rows")]
    EmptyBoard,

    #[error("board row {row} has width {found}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("unknown board glyph {glyph:?} at ({row}, {col})")]
    UnknownGlyph { row: usize, col: usize, glyph: char },

    #[error("board must have exactly one center cell, found {0}")]
    CenterCount(usize),

    #[error("start position {0} appears more than once")]
    DuplicateStart(u8),

    #[error("door glyph {0:?} is not mapped to a room")]
    UnmappedDoor(char),

    #[error("{0:?} is not a room card of the catalog")]
    UnknownRoom(String),

    #[error("room {0:?} has no door on the board")]
    RoomWithoutDoor(String),

    #[error("board offers {found} start positions, {needed} seats need one each")]
    NotEnoughStarts { needed: usize, found: usize },

    #[error("catalog has no {0} cards")]
    EmptyCategory(&'static str),

    #[error("catalog has {suspects} suspects, {players} seats need a character each")]
    NotEnoughSuspects { players: usize, suspects: usize },

    #[error("card key {0:?} registered twice")]
    DuplicateCard(String),

    #[error("catalog is full: at most {0} cards")]
    CatalogFull(usize),

    #[error("invalid deal: {0}")]
    InvalidDeal(String),

    #[error("config is not valid JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SetupError {
    fn from(err: serde_json::Error) -> Self {
        SetupError::Json(err.to_string())
    }
}
