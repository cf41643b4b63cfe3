//! # rust-sleuth
//!
//! Rules engine for a hidden-information deduction board game: pawns
//! move by dice across a grid, suggestions are refuted privately, and a
//! single all-or-nothing accusation decides the match.
//!
//! ## Design Principles
//!
//! 1. **Pure Reducer**: `RulesEngine::apply` takes a state and returns
//!    its successor. A rejected move leaves the caller's state untouched.
//!
//! 2. **Host-Owned Time**: The engine never reads a clock. Every
//!    transition receives `now`; timeouts are forced moves the host
//!    submits.
//!
//! 3. **Full State, Redacted Views**: `GameState` carries every hand and
//!    the envelope. `view::PlayerView` is what a seat may see.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` makes the
//!   clone-then-mutate reducer cheap.
//!
//! - **Deterministic RNG**: Dealing and dice draw from a ChaCha8 stream
//!   stored in the state, so snapshots replay exactly.
//!
//! ## Modules
//!
//! - `core`: Seats, RNG, configuration, moves, state, errors
//! - `cards`: Catalog, envelope, dealing
//! - `board`: Grid layout and BFS movement
//! - `rules`: RulesEngine trait, phase machine, suggestion, accusation, timeouts
//! - `games`: The classic game (catalog, board, builder)
//! - `bot`: Greedy deduction bot
//! - `view`: Per-seat redacted projection
//! - `table`: Single-writer match host with an outcome sink

pub mod core;
pub mod cards;
pub mod board;
pub mod rules;
pub mod games;
pub mod bot;
pub mod view;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng, GameRngState,
    GameConfig, Millis,
    Move, MoveDescriptor, MoveRecord, MoveRequest,
    RuleError, RuleResult, SetupError,
    GameResult, GameState, Gameover, PlayerState, RefutationResult, SuggestionState, TurnPhase,
};

pub use crate::cards::{Card, CardCatalog, CardId, CardKind, Deal, SecretEnvelope};

pub use crate::board::{BoardConfig, BoardGrid, CellKind, Coord};

pub use crate::rules::RulesEngine;

pub use crate::games::classic::{ClassicGame, ClassicGameBuilder};

pub use crate::bot::{Bot, Knowledge};

pub use crate::view::PlayerView;

pub use crate::table::{OutcomeSink, Table};
