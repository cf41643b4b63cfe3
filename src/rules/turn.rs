//! Turn phase machine.
//!
//! ## Phases
//!
//! ```text
//! Roll ──roll──▶ Move ──moveTo──▶ Action ──suggest──▶ Suggestion
//!  │                        └───▶ Accusation (center)      │
//!  └──investigateNow──▶ Action ◀──────refute / skip────────┘
//! ```
//!
//! `endTurn` is accepted in every phase but `Suggestion`; `acknowledge`
//! ends the turn once a suggestion has resolved.

use std::collections::BTreeSet;
use std::iter;

use log::debug;
use smallvec::SmallVec;

use super::engine::RulesEngine;
use crate::board::{reachable, Coord};
use crate::cards::CardKind;
use crate::core::action::MoveDescriptor;
use crate::core::config::Millis;
use crate::core::error::{RuleError, RuleResult};
use crate::core::player::PlayerId;
use crate::core::state::{GameState, PlayerState, TurnPhase};

/// Gate for moves only the active, non-eliminated seat may make.
pub(crate) fn require_turn(state: &GameState, actor: PlayerId) -> RuleResult<&PlayerState> {
    if actor != state.current_player {
        return Err(RuleError::OutOfTurn {
            actor,
            active: state.current_player,
        });
    }
    let seat = state.player(actor)?;
    if seat.is_eliminated {
        return Err(RuleError::IllegalMove("eliminated players cannot act"));
    }
    Ok(seat)
}

/// Cells the active seat may move to with this turn's roll.
///
/// Empty outside the Move phase or for any other seat.
pub fn destinations<R: RulesEngine + ?Sized>(rules: &R, state: &GameState, player: PlayerId) -> BTreeSet<Coord> {
    if state.phase != TurnPhase::Move || player != state.current_player {
        return BTreeSet::new();
    }
    let (Some(steps), Ok(seat)) = (state.dice_total(), state.player(player)) else {
        return BTreeSet::new();
    };
    reachable(rules.board(), seat.position, steps, &state.occupied_cells(player))
}

pub(crate) fn roll<R: RulesEngine + ?Sized>(rules: &R, state: &mut GameState) -> RuleResult<()> {
    if state.phase != TurnPhase::Roll {
        return Err(RuleError::IllegalMove("dice were already rolled this turn"));
    }
    let config = rules.config();
    let faces: SmallVec<[u8; 2]> = (0..config.dice_count)
        .map(|_| state.rng.roll_die(config.dice_sides))
        .collect();

    let actor = state.current_player;
    state.players[actor].was_moved_by_suggestion = false;
    debug!("seat {actor} rolled {faces:?}");
    state.dice_roll = Some(faces);
    state.phase = TurnPhase::Move;
    Ok(())
}

pub(crate) fn investigate_now(state: &mut GameState) -> RuleResult<()> {
    if state.phase != TurnPhase::Roll {
        return Err(RuleError::IllegalMove("investigating replaces the roll"));
    }
    let seat = &mut state.players[state.current_player];
    if !seat.was_moved_by_suggestion || seat.current_room.is_none() {
        return Err(RuleError::IllegalMove("only a dragged pawn may investigate without moving"));
    }
    seat.was_moved_by_suggestion = false;
    state.phase = TurnPhase::Action;
    Ok(())
}

pub(crate) fn move_to<R: RulesEngine + ?Sized>(rules: &R, state: &mut GameState, to: Coord) -> RuleResult<()> {
    if state.phase != TurnPhase::Move {
        return Err(RuleError::IllegalMove("roll before moving"));
    }
    let actor = state.current_player;
    if !destinations(rules, state, actor).contains(&to) {
        return Err(RuleError::InvalidArgument(format!(
            "{to} is not reachable with a roll of {}",
            state.dice_total().unwrap_or(0)
        )));
    }

    let board = rules.board();
    let seat = &mut state.players[actor];
    seat.position = to;
    seat.current_room = board.room_at(to);
    state.phase = if to == board.center() {
        TurnPhase::Accusation
    } else {
        TurnPhase::Action
    };
    debug!("seat {actor} moved to {to}");
    Ok(())
}

pub(crate) fn acknowledge(state: &mut GameState, now: Millis) -> RuleResult<()> {
    if state.phase != TurnPhase::Action || !state.awaiting_acknowledgement {
        return Err(RuleError::IllegalMove("nothing to acknowledge"));
    }
    advance_turn(state, now);
    Ok(())
}

pub(crate) fn end_turn(state: &mut GameState, now: Millis) -> RuleResult<()> {
    if state.phase == TurnPhase::Suggestion {
        return Err(RuleError::IllegalMove("a refutation is pending"));
    }
    advance_turn(state, now);
    Ok(())
}

/// Hand the turn to the next non-eliminated seat clockwise.
///
/// The current seat is the last candidate, so a lone survivor plays on.
/// No-op when every seat is eliminated; callers end the match first.
pub(crate) fn advance_turn(state: &mut GameState, now: Millis) {
    let from = state.current_player;
    let next = from
        .others_clockwise(state.player_count())
        .chain(iter::once(from))
        .find(|&p| !state.players[p].is_eliminated);
    let Some(next) = next else {
        return;
    };

    // An unused investigate-now choice lapses with the turn.
    state.players[from].was_moved_by_suggestion = false;
    state.current_player = next;
    state.turn_number += 1;
    state.phase = TurnPhase::Roll;
    state.dice_roll = None;
    state.has_suggested = false;
    state.awaiting_acknowledgement = false;
    state.turn_started_at = now;
    state.stage_started_at = now;

    let seat = &mut state.players[next];
    seat.previous_room = seat.current_room;
    debug!("turn {} begins for seat {next}", state.turn_number);
}

/// Enumerate what `player` may submit. Forced moves are not listed.
pub fn legal_moves<R: RulesEngine + ?Sized>(rules: &R, state: &GameState, player: PlayerId) -> Vec<MoveDescriptor> {
    let Ok(seat) = state.player(player) else {
        return Vec::new();
    };
    if state.is_over() {
        return Vec::new();
    }

    if let Some(suggestion) = &state.current_suggestion {
        if suggestion.current_responder == Some(player) {
            return vec![MoveDescriptor::Refute {
                options: suggestion.matching_cards.clone(),
            }];
        }
    }
    if player != state.current_player || seat.is_eliminated {
        return Vec::new();
    }

    let mut moves = Vec::new();
    match state.phase {
        TurnPhase::Roll => {
            moves.push(MoveDescriptor::Roll);
            if seat.was_moved_by_suggestion && seat.current_room.is_some() {
                moves.push(MoveDescriptor::InvestigateNow);
            }
            moves.push(MoveDescriptor::EndTurn);
        }
        TurnPhase::Move => {
            let dests = destinations(rules, state, player);
            if !dests.is_empty() {
                moves.push(MoveDescriptor::MoveTo {
                    destinations: dests.into_iter().collect(),
                });
            }
            moves.push(MoveDescriptor::EndTurn);
        }
        TurnPhase::Action => {
            if let (Some(room), false) = (seat.current_room, state.has_suggested) {
                let catalog = rules.catalog();
                moves.push(MoveDescriptor::Suggest {
                    room,
                    suspects: catalog.ids_of_kind(CardKind::Suspect),
                    weapons: catalog.ids_of_kind(CardKind::Weapon),
                });
            }
            if state.awaiting_acknowledgement {
                moves.push(MoveDescriptor::Acknowledge);
            }
            moves.push(MoveDescriptor::EndTurn);
        }
        TurnPhase::Accusation => {
            moves.push(MoveDescriptor::Accuse);
            moves.push(MoveDescriptor::EndTurn);
        }
        TurnPhase::Suggestion => {}
    }
    moves
}
