//! Timeout supervisor.
//!
//! The engine never reads a clock. Hosts ask `pending_timeout` (or
//! `next_deadline` to schedule a wake-up) and submit the forced move it
//! names. Forced moves carry the turn they target, so a late or repeated
//! submission for a stage that already moved on is an accepted no-op.
//!
//! ## Deadlines
//!
//! - Turn: `turn_started_at + turn_timeout_ms`, while no suggestion is live
//! - Refutation: `stage_started_at + refutation_timeout_ms`, while a
//!   suggestion is live
//!
//! The suggester cannot act while its suggestion waits on a responder, so
//! the turn clock is paused then. Closing the suggestion restarts it.

use log::{debug, warn};

use super::accusation::eliminate;
use super::engine::RulesEngine;
use super::suggestion;
use crate::core::action::Move;
use crate::core::config::{GameConfig, Millis};
use crate::core::error::{RuleError, RuleResult};
use crate::core::state::GameState;

/// Which deadline has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Expiry {
    Turn,
    Refutation,
}

#[must_use]
pub fn turn_deadline(state: &GameState, config: &GameConfig) -> Millis {
    state.turn_started_at.saturating_add(config.turn_timeout_ms)
}

/// `None` while no suggestion is live.
#[must_use]
pub fn refutation_deadline(state: &GameState, config: &GameConfig) -> Option<Millis> {
    state
        .current_suggestion
        .as_ref()
        .map(|_| state.stage_started_at.saturating_add(config.refutation_timeout_ms))
}

/// The deadline currently running, for hosts that schedule timers.
#[must_use]
pub fn next_deadline(state: &GameState, config: &GameConfig) -> Option<Millis> {
    if state.is_over() {
        return None;
    }
    Some(refutation_deadline(state, config).unwrap_or_else(|| turn_deadline(state, config)))
}

/// The deadline that has passed at `now`.
#[must_use]
pub fn expired(state: &GameState, config: &GameConfig, now: Millis) -> Option<Expiry> {
    if state.is_over() {
        return None;
    }
    match refutation_deadline(state, config) {
        Some(deadline) => (now >= deadline).then_some(Expiry::Refutation),
        None => (now >= turn_deadline(state, config)).then_some(Expiry::Turn),
    }
}

/// The forced move that is due at `now`.
#[must_use]
pub fn pending_timeout(state: &GameState, config: &GameConfig, now: Millis) -> Option<Move> {
    let turn = state.turn_number;
    expired(state, config, now).map(|expiry| match expiry {
        Expiry::Turn => Move::TimeoutCurrentPlayer { turn },
        Expiry::Refutation => Move::SkipRefutation { turn },
    })
}

/// Eliminate the active seat of `turn`. Returns whether anything changed.
pub(crate) fn timeout_current_player<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &mut GameState,
    turn: u32,
    now: Millis,
) -> RuleResult<bool> {
    if state.is_over() || turn != state.turn_number {
        debug!("turn timeout for turn {turn} is stale");
        return Ok(false);
    }
    if state.current_suggestion.is_some() {
        return Err(RuleError::IllegalMove("the turn clock is paused while a suggestion is live"));
    }
    if now < turn_deadline(state, rules.config()) {
        return Err(RuleError::IllegalMove("turn deadline has not passed"));
    }

    let player = state.current_player;
    warn!("seat {player} timed out on turn {turn} and is eliminated");
    eliminate(state, player, now);
    Ok(true)
}

/// Close the live suggestion of `turn` unrefuted. Returns whether anything changed.
pub(crate) fn skip_refutation<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &mut GameState,
    turn: u32,
    now: Millis,
) -> RuleResult<bool> {
    if state.is_over() || turn != state.turn_number {
        debug!("refutation timeout for turn {turn} is stale");
        return Ok(false);
    }
    let Some(live) = &state.current_suggestion else {
        debug!("refutation timeout for turn {turn}: suggestion already resolved");
        return Ok(false);
    };
    if refutation_deadline(state, rules.config()).is_some_and(|d| now < d) {
        return Err(RuleError::IllegalMove("refutation deadline has not passed"));
    }

    let suggester = live.suggester;
    warn!(
        "seat {} did not refute in time on turn {turn}",
        live.current_responder.map_or_else(|| "?".to_string(), |p| p.to_string())
    );
    suggestion::close(state, suggester, None, None, now);
    Ok(true)
}
