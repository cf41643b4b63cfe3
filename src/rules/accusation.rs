//! Accusation and elimination.
//!
//! An accusation is made from the center cell and is all-or-nothing: a
//! correct one wins the match, a wrong one eliminates the accuser. The
//! match ends unsolved once no seat remains in the running.

use log::info;

use super::engine::RulesEngine;
use super::turn::advance_turn;
use crate::cards::{CardId, CardKind, SecretEnvelope};
use crate::core::config::Millis;
use crate::core::error::{RuleError, RuleResult};
use crate::core::player::PlayerId;
use crate::core::state::{GameResult, GameState, Gameover, TurnPhase};

pub(crate) fn accuse<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &mut GameState,
    suspect: CardId,
    weapon: CardId,
    room: CardId,
    now: Millis,
) -> RuleResult<()> {
    if state.phase != TurnPhase::Accusation {
        return Err(RuleError::IllegalMove("accusations are made from the center"));
    }
    let catalog = rules.catalog();
    catalog.expect_kind(suspect, CardKind::Suspect)?;
    catalog.expect_kind(weapon, CardKind::Weapon)?;
    catalog.expect_kind(room, CardKind::Room)?;

    let accuser = state.current_player;
    if SecretEnvelope::new(suspect, weapon, room) == *state.envelope() {
        info!("seat {accuser} solved the case");
        finish(state, GameResult::Winner(accuser));
    } else {
        info!("seat {accuser} accused wrongly and is eliminated");
        eliminate(state, accuser, now);
    }
    Ok(())
}

/// Take a seat out of the running.
///
/// Ends the match when nobody is left; otherwise advances the turn if the
/// seat was active. The pawn stays where it is and stops blocking cells.
pub(crate) fn eliminate(state: &mut GameState, player: PlayerId, now: Millis) {
    state.players[player].is_eliminated = true;
    if state.active_players().next().is_none() {
        info!("every seat is eliminated; the case stays unsolved");
        finish(state, GameResult::Unsolved);
    } else if player == state.current_player {
        advance_turn(state, now);
    }
}

/// Record the terminal outcome and reveal the envelope.
pub(crate) fn finish(state: &mut GameState, result: GameResult) {
    state.current_suggestion = None;
    state.gameover = Some(Gameover {
        result,
        solution: *state.envelope(),
    });
}
