//! Suggestion and refutation.
//!
//! A suggestion names a suspect, a weapon and the suggester's room. The
//! named suspect's pawn (when another seat plays it) is dragged into that
//! room. Seats are then asked clockwise from the suggester; the first one
//! holding any named card must privately show exactly one of them.
//!
//! At most one suggestion is live at a time. It closes on a refutation,
//! on a responder timeout, or immediately when nobody can answer.

use log::{debug, info};
use smallvec::SmallVec;

use super::engine::RulesEngine;
use crate::cards::{CardId, CardKind};
use crate::core::config::{GameConfig, Millis};
use crate::core::error::{RuleError, RuleResult};
use crate::core::player::PlayerId;
use crate::core::state::{GameState, RefutationResult, SuggestionState, TurnPhase};

pub(crate) fn suggest<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &mut GameState,
    suspect: CardId,
    weapon: CardId,
    room: CardId,
    now: Millis,
) -> RuleResult<()> {
    if state.phase != TurnPhase::Action {
        return Err(RuleError::IllegalMove("suggestions follow movement"));
    }
    let suggester = state.current_player;
    let here = state.players[suggester]
        .current_room
        .ok_or(RuleError::IllegalMove("suggestions are made from inside a room"))?;

    let catalog = rules.catalog();
    catalog.expect_kind(suspect, CardKind::Suspect)?;
    catalog.expect_kind(weapon, CardKind::Weapon)?;
    catalog.expect_kind(room, CardKind::Room)?;
    if room != here {
        return Err(RuleError::InvalidArgument(format!(
            "suggested room {:?} is not the current room {:?}",
            catalog.key_of(room),
            catalog.key_of(here)
        )));
    }
    if state.has_suggested {
        return Err(RuleError::AlreadyResolved("a suggestion was already made this turn"));
    }

    drag_suspect(rules, state, suggester, suspect, room);
    state.has_suggested = true;
    info!(
        "seat {suggester} suggests {} with the {} in the {}",
        catalog.key_of(suspect),
        catalog.key_of(weapon),
        catalog.key_of(room)
    );

    match find_responder(state, rules.config(), suggester, &[suspect, weapon, room]) {
        Some((responder, matching_cards)) => {
            debug!("seat {responder} must refute from {} matching cards", matching_cards.len());
            state.current_suggestion = Some(SuggestionState {
                suggester,
                suspect,
                weapon,
                room,
                current_responder: Some(responder),
                matching_cards,
            });
            state.phase = TurnPhase::Suggestion;
            state.stage_started_at = now;
        }
        None => close(state, suggester, None, None, now),
    }
    Ok(())
}

pub(crate) fn refute<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &mut GameState,
    actor: PlayerId,
    card: CardId,
    now: Millis,
) -> RuleResult<()> {
    let suggestion = state
        .current_suggestion
        .as_ref()
        .ok_or(RuleError::AlreadyResolved("no suggestion is waiting for a refutation"))?;
    if suggestion.current_responder != Some(actor) {
        return Err(RuleError::IllegalMove("only the current responder may refute"));
    }
    if !suggestion.matching_cards.contains(&card) {
        return Err(RuleError::InvalidArgument(format!(
            "{:?} does not answer this suggestion",
            rules.catalog().key_of(card)
        )));
    }

    let suggester = suggestion.suggester;
    close(state, suggester, Some(actor), Some(card), now);
    Ok(())
}

/// Move the named suspect's pawn to the first door of `room`.
///
/// Applies to any non-eliminated seat other than the suggester, even one
/// already standing in that room.
fn drag_suspect<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &mut GameState,
    suggester: PlayerId,
    suspect: CardId,
    room: CardId,
) {
    let Some(target) = state.seat_of_character(suspect) else {
        return;
    };
    let Some(&door) = rules.board().doors_of(room).first() else {
        return;
    };
    let seat = &mut state.players[target];
    if target == suggester || seat.is_eliminated {
        return;
    }
    seat.position = door;
    seat.current_room = Some(room);
    seat.was_moved_by_suggestion = true;
    debug!("seat {target} dragged to {door}");
}

/// First seat clockwise from the suggester holding any named card.
///
/// Eliminated seats are skipped unless the config lets them refute.
pub fn find_responder(
    state: &GameState,
    config: &GameConfig,
    suggester: PlayerId,
    named: &[CardId],
) -> Option<(PlayerId, SmallVec<[CardId; 3]>)> {
    suggester
        .others_clockwise(state.player_count())
        .filter(|&p| config.eliminated_refute || !state.players[p].is_eliminated)
        .find_map(|p| {
            let matching = state.players[p].matching(named);
            (!matching.is_empty()).then_some((p, matching))
        })
}

/// Resolve the current suggestion and hand control back to the suggester.
///
/// Restarts both clocks; the suggester then acknowledges or ends the turn.
pub(crate) fn close(
    state: &mut GameState,
    suggester: PlayerId,
    refuter: Option<PlayerId>,
    card: Option<CardId>,
    now: Millis,
) {
    match refuter {
        Some(p) => debug!("seat {p} refuted seat {suggester}"),
        None => info!("nobody refuted seat {suggester}"),
    }
    state.last_refutation = Some(RefutationResult {
        suggester,
        refuter,
        card_shown: card,
        turn: state.turn_number,
    });
    state.current_suggestion = None;
    state.phase = TurnPhase::Action;
    state.awaiting_acknowledgement = true;
    state.turn_started_at = now;
    state.stage_started_at = now;
}
