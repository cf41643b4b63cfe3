//! Rules: the reducer behind `RulesEngine::apply`.
//!
//! - `turn`: phase machine, movement moves, legal move enumeration
//! - `suggestion`: suggestion, drag, responder search, refutation
//! - `accusation`: accusation, elimination, terminal outcome
//! - `timeout`: deadlines and forced moves
//!
//! ## Rejection order
//!
//! Unknown seat, then forced moves (own rules), then game over (a repeated
//! accusation is `AlreadyResolved`, anything else `IllegalMove`), then
//! `refute`, then turn ownership, elimination, phase, arguments.

pub mod accusation;
pub mod engine;
pub mod suggestion;
pub mod timeout;
pub mod turn;

pub use engine::RulesEngine;
pub use suggestion::find_responder;
pub use timeout::{expired, next_deadline, pending_timeout, refutation_deadline, turn_deadline, Expiry};
pub use turn::{destinations, legal_moves};

use log::trace;

use crate::core::action::{Move, MoveRecord};
use crate::core::config::Millis;
use crate::core::error::{RuleError, RuleResult};
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Validate and apply one move, returning the successor state.
///
/// `state` is never modified. Accepted moves are appended to the history;
/// forced moves that turn out stale return an unchanged copy.
pub fn apply_move<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &GameState,
    actor: PlayerId,
    mv: &Move,
    now: Millis,
) -> RuleResult<GameState> {
    state.player(actor)?;

    let mut next = state.clone();
    let turn = next.turn_number;

    let changed = match *mv {
        Move::TimeoutCurrentPlayer { turn } => timeout::timeout_current_player(rules, &mut next, turn, now)?,
        Move::SkipRefutation { turn } => timeout::skip_refutation(rules, &mut next, turn, now)?,
        Move::Accuse { .. } if state.is_over() => {
            return Err(RuleError::AlreadyResolved("the case is already closed"))
        }
        _ if state.is_over() => return Err(RuleError::IllegalMove("the match is over")),
        Move::Refute { card } => {
            suggestion::refute(rules, &mut next, actor, card, now)?;
            true
        }
        _ => {
            turn::require_turn(state, actor)?;
            apply_turn_move(rules, &mut next, mv, now)?;
            true
        }
    };

    if !changed {
        return Ok(next);
    }
    trace!("seat {actor} applied {} on turn {turn}", mv.name());
    next.history.push_back(MoveRecord::new(actor, mv.clone(), turn, now));
    Ok(next)
}

/// Moves reserved to the active seat.
fn apply_turn_move<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &mut GameState,
    mv: &Move,
    now: Millis,
) -> RuleResult<()> {
    match *mv {
        Move::Roll => turn::roll(rules, state),
        Move::InvestigateNow => turn::investigate_now(state),
        Move::MoveTo { to } => turn::move_to(rules, state, to),
        Move::Suggest { suspect, weapon, room } => suggestion::suggest(rules, state, suspect, weapon, room, now),
        Move::Accuse { suspect, weapon, room } => accusation::accuse(rules, state, suspect, weapon, room, now),
        Move::Acknowledge => turn::acknowledge(state, now),
        Move::EndTurn => turn::end_turn(state, now),
        Move::Refute { .. } | Move::TimeoutCurrentPlayer { .. } | Move::SkipRefutation { .. } => {
            Err(RuleError::IllegalMove("not a turn move"))
        }
    }
}
