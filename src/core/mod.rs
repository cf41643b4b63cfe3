//! Core engine types: seats, RNG, configuration, moves, state and errors.
//!
//! This module holds the data the rules operate on. It performs no rule
//! decisions itself beyond setup validation.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Move, MoveDescriptor, MoveRecord, MoveRequest};
pub use config::{GameConfig, Millis, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{RuleError, RuleResult, SetupError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{
    GameResult, GameState, Gameover, PlayerState, RefutationResult, SuggestionState, TurnPhase,
};
