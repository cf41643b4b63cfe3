//! Rules engine trait for game implementations.
//!
//! A game supplies its static tables (config, catalog, board) and the two
//! entry points every host drives:
//! - `legal_moves`: what a seat may submit right now
//! - `apply`: a pure reducer from `(state, actor, move, now)` to the next state
//!
//! Everything else has default implementations built on those.

use crate::board::BoardGrid;
use crate::cards::CardCatalog;
use crate::core::action::{Move, MoveDescriptor, MoveRequest};
use crate::core::config::{GameConfig, Millis};
use crate::core::error::RuleResult;
use crate::core::player::PlayerId;
use crate::core::state::{GameResult, GameState};

use super::timeout;

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: return empty if the seat can't act
/// - `apply`: must not touch `state`; return the successor or an error
/// - `apply`: must be deterministic given the state's RNG and `now`
pub trait RulesEngine {
    /// Get the match configuration.
    fn config(&self) -> &GameConfig;

    /// Get the card catalog.
    fn catalog(&self) -> &CardCatalog;

    /// Get the board.
    fn board(&self) -> &BoardGrid;

    /// Legal move categories for a seat, with argument domains.
    fn legal_moves(&self, state: &GameState, player: PlayerId) -> Vec<MoveDescriptor>;

    /// Apply a move submitted by `player` at host time `now`.
    fn apply(&self, state: &GameState, player: PlayerId, mv: &Move, now: Millis) -> RuleResult<GameState>;

    // === Convenience Methods ===

    /// Check if the match is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.gameover.map(|g| g.result)
    }

    /// Resolve a wire request and apply it.
    fn apply_request(
        &self,
        state: &GameState,
        player: PlayerId,
        request: &MoveRequest,
        now: Millis,
    ) -> RuleResult<GameState> {
        let mv = request.resolve(self.catalog())?;
        self.apply(state, player, &mv, now)
    }

    /// Whether `mv` is among the seat's legal moves.
    ///
    /// Forced moves are not listed by `legal_moves`; use `pending_timeout`.
    fn is_legal(&self, state: &GameState, player: PlayerId, mv: &Move) -> bool {
        self.legal_moves(state, player).iter().any(|d| d.admits(mv))
    }

    /// The forced move that is due at `now`, if any.
    fn pending_timeout(&self, state: &GameState, now: Millis) -> Option<Move> {
        timeout::pending_timeout(state, self.config(), now)
    }
}
