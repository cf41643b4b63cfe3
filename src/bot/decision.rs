//! Greedy move choice for a bot seat.
//!
//! ## Priorities
//!
//! 1. Refute with any matching card when asked
//! 2. Accuse once solved and standing on the center
//! 3. Once solved, walk toward the center
//! 4. Investigate when dragged, otherwise roll
//! 5. Suggest random unresolved candidates in the current room
//! 6. Acknowledge a resolved suggestion
//! 7. Move to a door of a room other than the one just left, else anywhere
//! 8. End the turn

use log::trace;

use super::knowledge::Knowledge;
use crate::board::walking_distances;
use crate::cards::{CardId, CardKind};
use crate::core::action::{Move, MoveDescriptor};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::rules::RulesEngine;

/// Pick the next move for `me`, or `None` when it has nothing to do.
pub fn decide<R: RulesEngine + ?Sized>(
    rules: &R,
    state: &GameState,
    me: PlayerId,
    knowledge: &Knowledge,
    rng: &mut GameRng,
) -> Option<Move> {
    let legal = rules.legal_moves(state, me);
    if legal.is_empty() {
        return None;
    }
    let catalog = rules.catalog();
    let seat = state.player(me).ok()?;
    let solution = knowledge.solution(catalog);

    let find = |pred: fn(&MoveDescriptor) -> bool| legal.iter().find(|d| pred(d));

    if let Some(MoveDescriptor::Refute { options }) = find(|d| matches!(d, MoveDescriptor::Refute { .. })) {
        return rng.choose(options).map(|&card| Move::Refute { card });
    }

    if let Some(envelope) = solution {
        if find(|d| matches!(d, MoveDescriptor::Accuse)).is_some() {
            return Some(Move::Accuse {
                suspect: envelope.suspect,
                weapon: envelope.weapon,
                room: envelope.room,
            });
        }
        if find(|d| matches!(d, MoveDescriptor::Roll)).is_some() {
            return Some(Move::Roll);
        }
        if let Some(MoveDescriptor::MoveTo { destinations }) = find(|d| matches!(d, MoveDescriptor::MoveTo { .. })) {
            let board = rules.board();
            let dist = walking_distances(board, board.center());
            let here = dist.get(&seat.position).copied().unwrap_or(u32::MAX);
            let best = destinations
                .iter()
                .filter_map(|c| dist.get(c).map(|&d| (d, *c)))
                .min();
            // Standing on the center already: step off and come back.
            if let Some((d, to)) = best {
                if d < here || here == 0 {
                    return Some(Move::MoveTo { to });
                }
            }
        }
        return Some(fallback(&legal));
    }

    if find(|d| matches!(d, MoveDescriptor::InvestigateNow)).is_some() {
        return Some(Move::InvestigateNow);
    }
    if find(|d| matches!(d, MoveDescriptor::Roll)).is_some() {
        return Some(Move::Roll);
    }

    if let Some(MoveDescriptor::Suggest { room, .. }) = find(|d| matches!(d, MoveDescriptor::Suggest { .. })) {
        let suspect = pick(knowledge, rules, CardKind::Suspect, rng)?;
        let weapon = pick(knowledge, rules, CardKind::Weapon, rng)?;
        trace!("bot {me} suggests {suspect} {weapon} {room}");
        return Some(Move::Suggest {
            suspect,
            weapon,
            room: *room,
        });
    }

    if let Some(MoveDescriptor::MoveTo { destinations }) = find(|d| matches!(d, MoveDescriptor::MoveTo { .. })) {
        let board = rules.board();
        let fresh: Vec<_> = destinations
            .iter()
            .copied()
            .filter(|&c| {
                board
                    .room_at(c)
                    .is_some_and(|room| Some(room) != seat.previous_room && Some(room) != seat.current_room)
            })
            .collect();
        let pool = if fresh.is_empty() { destinations.as_slice() } else { fresh.as_slice() };
        if let Some(&to) = rng.choose(pool) {
            return Some(Move::MoveTo { to });
        }
    }

    Some(fallback(&legal))
}

/// Acknowledge if possible, otherwise end the turn.
fn fallback(legal: &[MoveDescriptor]) -> Move {
    if legal.contains(&MoveDescriptor::Acknowledge) {
        Move::Acknowledge
    } else {
        Move::EndTurn
    }
}

/// Uniform pick among the unresolved candidates of `kind`. A resolved
/// category keeps naming its last candidate.
fn pick<R: RulesEngine + ?Sized>(
    knowledge: &Knowledge,
    rules: &R,
    kind: CardKind,
    rng: &mut GameRng,
) -> Option<CardId> {
    let candidates = knowledge.candidates(rules.catalog(), kind);
    rng.choose(&candidates).copied()
}
