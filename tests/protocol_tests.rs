//! Turn flow, suggestion protocol, accusation and timeouts, driven through
//! `RulesEngine::apply` on a small fixed board with one-sided dice.

use rust_sleuth::board::{BoardConfig, Coord};
use rust_sleuth::cards::{CardCatalog, CardId, Deal};
use rust_sleuth::core::{GameConfig, GameResult, GameState, Move, MoveDescriptor, MoveRequest, PlayerId, RuleError, TurnPhase};
use rust_sleuth::games::classic::{ClassicGame, ClassicGameBuilder};
use rust_sleuth::rules::RulesEngine;
use rust_sleuth::view::PlayerView;

// =============================================================================
// Fixtures
// =============================================================================

/// Seat 0 starts between the kitchen and ballroom doors; seat 3 starts
/// next to the center.
const ROWS: [&str; 3] = ["k0b1c2d3*", "i.l.o.h.s", "4.......5"];

const DOORS: [(char, &str); 9] = [
    ('k', "kitchen"),
    ('b', "ballroom"),
    ('c', "conservatory"),
    ('d', "dining_room"),
    ('i', "billiard_room"),
    ('l', "library"),
    ('o', "lounge"),
    ('h', "hall"),
    ('s', "study"),
];

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);
const P3: PlayerId = PlayerId(3);

fn setup_with(config: GameConfig) -> (ClassicGame, GameState) {
    let catalog = CardCatalog::classic();
    let deal = Deal::from_keys(
        &catalog,
        ["peacock", "rope", "study"],
        &[
            &["scarlet", "candlestick", "ballroom", "conservatory"],
            &["mustard", "dagger", "dining_room", "billiard_room"],
            &["white", "wrench", "library", "lounge"],
            &["green", "lead_pipe", "hall", "kitchen"],
        ],
        &["plum", "revolver"],
    )
    .unwrap();

    ClassicGameBuilder::new()
        .config(config.with_dice(1, 1))
        .board(BoardConfig::new(ROWS, DOORS))
        .deal(deal)
        .build()
        .unwrap()
}

fn setup() -> (ClassicGame, GameState) {
    setup_with(GameConfig::new(4))
}

fn card(game: &ClassicGame, key: &str) -> CardId {
    game.catalog().by_key(key).unwrap().id
}

fn suggest(game: &ClassicGame, suspect: &str, weapon: &str, room: &str) -> Move {
    Move::Suggest {
        suspect: card(game, suspect),
        weapon: card(game, weapon),
        room: card(game, room),
    }
}

fn accuse(game: &ClassicGame, suspect: &str, weapon: &str, room: &str) -> Move {
    Move::Accuse {
        suspect: card(game, suspect),
        weapon: card(game, weapon),
        room: card(game, room),
    }
}

/// Seat 0 rolls and steps onto the given door.
fn seat0_to(game: &ClassicGame, state: &GameState, to: Coord) -> GameState {
    let state = game.apply(state, P0, &Move::Roll, 0).unwrap();
    game.apply(&state, P0, &Move::MoveTo { to }, 0).unwrap()
}

/// Seats 0-2 pass; seat 3 steps onto the center.
fn seat3_to_center(game: &ClassicGame, mut state: GameState) -> GameState {
    for seat in [P0, P1, P2] {
        state = game.apply(&state, seat, &Move::EndTurn, 0).unwrap();
    }
    state = game.apply(&state, P3, &Move::Roll, 0).unwrap();
    game.apply(&state, P3, &Move::MoveTo { to: Coord::new(0, 8) }, 0).unwrap()
}

const KITCHEN_DOOR: Coord = Coord::new(0, 0);
const BALLROOM_DOOR: Coord = Coord::new(0, 2);

// =============================================================================
// Turn flow
// =============================================================================

#[test]
fn test_roll_then_move_into_room() {
    let (game, state) = setup();

    let rolled = game.apply(&state, P0, &Move::Roll, 0).unwrap();
    assert_eq!(rolled.phase, TurnPhase::Move);
    assert_eq!(rolled.dice_total(), Some(1));

    let moves = game.legal_moves(&rolled, P0);
    let expected = vec![KITCHEN_DOOR, Coord::new(0, 2), Coord::new(1, 1)];
    assert_eq!(
        moves[0],
        MoveDescriptor::MoveTo {
            destinations: expected
        }
    );

    let moved = game.apply(&rolled, P0, &Move::MoveTo { to: KITCHEN_DOOR }, 0).unwrap();
    assert_eq!(moved.phase, TurnPhase::Action);
    assert_eq!(moved.players[P0].current_room, Some(card(&game, "kitchen")));
    assert!(game
        .legal_moves(&moved, P0)
        .iter()
        .any(|d| matches!(d, MoveDescriptor::Suggest { .. })));
}

#[test]
fn test_hall_cell_is_not_a_room() {
    let (game, state) = setup();
    let state = seat0_to(&game, &state, Coord::new(1, 1));

    assert_eq!(state.phase, TurnPhase::Action);
    assert_eq!(state.players[P0].current_room, None);
    assert_eq!(game.legal_moves(&state, P0), vec![MoveDescriptor::EndTurn]);
    assert!(matches!(
        game.apply(&state, P0, &suggest(&game, "plum", "rope", "kitchen"), 0),
        Err(RuleError::IllegalMove(_))
    ));
}

#[test]
fn test_end_turn_advances_clockwise() {
    let (game, state) = setup();
    let state = game.apply(&state, P0, &Move::EndTurn, 500).unwrap();

    assert_eq!(state.current_player, P1);
    assert_eq!(state.turn_number, 2);
    assert_eq!(state.phase, TurnPhase::Roll);
    assert_eq!(state.turn_started_at, 500);
    assert_eq!(state.dice_roll, None);
}

#[test]
fn test_unreachable_destination_rejected() {
    let (game, state) = setup();
    let state = game.apply(&state, P0, &Move::Roll, 0).unwrap();

    assert!(matches!(
        game.apply(&state, P0, &Move::MoveTo { to: Coord::new(2, 4) }, 0),
        Err(RuleError::InvalidArgument(_))
    ));
    assert!(matches!(
        game.apply(&state, P0, &Move::Roll, 0),
        Err(RuleError::IllegalMove(_))
    ));
}

#[test]
fn test_rejections_do_not_touch_state() {
    let (game, state) = setup();
    let before = state.clone();

    assert_eq!(
        game.apply(&state, PlayerId::new(7), &Move::Roll, 0).unwrap_err(),
        RuleError::NotFound(PlayerId::new(7))
    );
    assert_eq!(
        game.apply(&state, P2, &Move::EndTurn, 0).unwrap_err(),
        RuleError::OutOfTurn { actor: P2, active: P0 }
    );
    assert!(matches!(
        game.apply(&state, P0, &Move::InvestigateNow, 0),
        Err(RuleError::IllegalMove(_))
    ));
    assert!(matches!(
        game.apply(&state, P0, &accuse(&game, "peacock", "rope", "study"), 0),
        Err(RuleError::IllegalMove(_))
    ));
    assert_eq!(
        game.apply(&state, P1, &Move::Refute { card: card(&game, "mustard") }, 0).unwrap_err(),
        RuleError::AlreadyResolved("no suggestion is waiting for a refutation")
    );
    assert_eq!(state, before);
}

#[test]
fn test_wire_request_with_wrong_category() {
    let (game, state) = setup();
    let state = seat0_to(&game, &state, KITCHEN_DOOR);

    let request: MoveRequest = serde_json::from_str(
        r#"{"move":"suggest","suspect":"wrench","weapon":"plum","room":"kitchen"}"#,
    )
    .unwrap();
    assert!(matches!(
        game.apply_request(&state, P0, &request, 0),
        Err(RuleError::InvalidArgument(_))
    ));
}

// =============================================================================
// Suggestions
// =============================================================================

#[test]
fn test_scenario_first_holder_refutes() {
    let (game, state) = setup();
    let state = seat0_to(&game, &state, KITCHEN_DOOR);
    let wrench = card(&game, "wrench");

    let state = game.apply(&state, P0, &suggest(&game, "plum", "wrench", "kitchen"), 10).unwrap();
    let live = state.current_suggestion.clone().unwrap();
    assert_eq!(state.phase, TurnPhase::Suggestion);
    assert_eq!(live.current_responder, Some(P2));
    assert_eq!(live.matching_cards.as_slice(), &[wrench]);
    assert_eq!(
        game.legal_moves(&state, P2),
        vec![MoveDescriptor::Refute {
            options: live.matching_cards.clone()
        }]
    );
    assert!(game.legal_moves(&state, P0).is_empty());

    // Only the responder may answer, and only with a matching card.
    assert!(matches!(
        game.apply(&state, P1, &Move::Refute { card: wrench }, 20),
        Err(RuleError::IllegalMove(_))
    ));
    assert!(matches!(
        game.apply(&state, P2, &Move::Refute { card: card(&game, "library") }, 20),
        Err(RuleError::InvalidArgument(_))
    ));
    assert!(matches!(
        game.apply(&state, P0, &Move::EndTurn, 20),
        Err(RuleError::IllegalMove(_))
    ));

    let state = game.apply(&state, P2, &Move::Refute { card: wrench }, 20).unwrap();
    let result = state.last_refutation.clone().unwrap();
    assert_eq!(result.suggester, P0);
    assert_eq!(result.refuter, Some(P2));
    assert_eq!(result.card_shown, Some(wrench));
    assert_eq!(game.catalog().key_of(wrench), "wrench");
    assert!(state.current_suggestion.is_none());
    assert_eq!(state.phase, TurnPhase::Action);
    assert_eq!(state.turn_started_at, 20);

    // Only the suggester and refuter learn the card.
    let seen = |seat| PlayerView::for_viewer(&state, seat).unwrap().last_refutation.unwrap().card_shown;
    assert_eq!(seen(P0), Some(wrench));
    assert_eq!(seen(P2), Some(wrench));
    assert_eq!(seen(P1), None);
    assert_eq!(seen(P3), None);

    let state = game.apply(&state, P0, &Move::Acknowledge, 30).unwrap();
    assert_eq!(state.current_player, P1);
    assert_eq!(state.turn_number, 2);
}

#[test]
fn test_scenario_nobody_can_refute() {
    let (game, state) = setup();
    let state = seat0_to(&game, &state, BALLROOM_DOOR);

    let state = game
        .apply(&state, P0, &suggest(&game, "peacock", "rope", "ballroom"), 10)
        .unwrap();
    let result = state.last_refutation.clone().unwrap();

    assert_eq!(result.refuter, None);
    assert_eq!(result.card_shown, None);
    assert!(state.current_suggestion.is_none());
    assert_eq!(state.phase, TurnPhase::Action);
    assert!(game.legal_moves(&state, P0).contains(&MoveDescriptor::Acknowledge));
}

#[test]
fn test_one_suggestion_per_turn() {
    let (game, state) = setup();
    let state = seat0_to(&game, &state, BALLROOM_DOOR);
    let mv = suggest(&game, "peacock", "rope", "ballroom");

    let state = game.apply(&state, P0, &mv, 0).unwrap();
    assert_eq!(
        game.apply(&state, P0, &mv, 0).unwrap_err(),
        RuleError::AlreadyResolved("a suggestion was already made this turn")
    );
}

#[test]
fn test_suggested_room_must_be_current_room() {
    let (game, state) = setup();
    let state = seat0_to(&game, &state, KITCHEN_DOOR);

    assert!(matches!(
        game.apply(&state, P0, &suggest(&game, "plum", "rope", "study"), 0),
        Err(RuleError::InvalidArgument(_))
    ));
}

#[test]
fn test_eliminated_seats_are_skipped() {
    let (game, mut state) = setup();
    state.players[P2].is_eliminated = true;
    let state = seat0_to(&game, &state, KITCHEN_DOOR);

    // Seat 2 holds the wrench but is out; seat 3 holds the kitchen.
    let state = game.apply(&state, P0, &suggest(&game, "plum", "wrench", "kitchen"), 0).unwrap();
    let live = state.current_suggestion.unwrap();
    assert_eq!(live.current_responder, Some(P3));
    assert_eq!(live.matching_cards.as_slice(), &[card(&game, "kitchen")]);
}

#[test]
fn test_eliminated_seats_refute_when_configured() {
    let (game, mut state) = setup_with(GameConfig::new(4).with_eliminated_refute(true));
    state.players[P2].is_eliminated = true;
    let state = seat0_to(&game, &state, KITCHEN_DOOR);

    let state = game.apply(&state, P0, &suggest(&game, "plum", "wrench", "kitchen"), 0).unwrap();
    assert_eq!(state.current_suggestion.unwrap().current_responder, Some(P2));
}

#[test]
fn test_suggestion_drags_suspect_pawn() {
    let (game, state) = setup();
    let kitchen = card(&game, "kitchen");
    let state = seat0_to(&game, &state, KITCHEN_DOOR);

    // Mustard is seat 1's pawn; seat 1 also holds the mustard card.
    let state = game.apply(&state, P0, &suggest(&game, "mustard", "rope", "kitchen"), 0).unwrap();
    assert_eq!(state.players[P1].position, KITCHEN_DOOR);
    assert_eq!(state.players[P1].current_room, Some(kitchen));
    assert!(state.players[P1].was_moved_by_suggestion);

    let state = game.apply(&state, P1, &Move::Refute { card: card(&game, "mustard") }, 0).unwrap();
    let state = game.apply(&state, P0, &Move::Acknowledge, 0).unwrap();

    assert_eq!(
        game.legal_moves(&state, P1),
        vec![MoveDescriptor::Roll, MoveDescriptor::InvestigateNow, MoveDescriptor::EndTurn]
    );
    let state = game.apply(&state, P1, &Move::InvestigateNow, 0).unwrap();
    assert_eq!(state.phase, TurnPhase::Action);
    assert!(!state.players[P1].was_moved_by_suggestion);
    assert!(game
        .apply(&state, P1, &suggest(&game, "plum", "rope", "kitchen"), 0)
        .is_ok());
}

#[test]
fn test_unused_investigate_now_lapses() {
    let (game, state) = setup();
    let state = seat0_to(&game, &state, KITCHEN_DOOR);
    let state = game.apply(&state, P0, &suggest(&game, "mustard", "rope", "kitchen"), 0).unwrap();
    let state = game.apply(&state, P1, &Move::Refute { card: card(&game, "mustard") }, 0).unwrap();
    let state = game.apply(&state, P0, &Move::Acknowledge, 0).unwrap();
    assert!(state.players[P1].was_moved_by_suggestion);

    // Seat 1 passes instead of investigating; the choice is gone next round.
    let mut state = game.apply(&state, P1, &Move::EndTurn, 0).unwrap();
    assert!(!state.players[P1].was_moved_by_suggestion);
    for seat in [P2, P3, P0] {
        state = game.apply(&state, seat, &Move::EndTurn, 0).unwrap();
    }
    assert_eq!(state.current_player, P1);
    assert_eq!(game.legal_moves(&state, P1), vec![MoveDescriptor::Roll, MoveDescriptor::EndTurn]);
}

#[test]
fn test_rolling_clears_drag_flag() {
    let (game, mut state) = setup();
    state.players[P0].was_moved_by_suggestion = true;
    state.players[P0].current_room = Some(card(&game, "kitchen"));

    let state = game.apply(&state, P0, &Move::Roll, 0).unwrap();
    assert!(!state.players[P0].was_moved_by_suggestion);
}

// =============================================================================
// Accusations
// =============================================================================

#[test]
fn test_scenario_correct_accusation_wins() {
    let (game, state) = setup();
    let state = seat3_to_center(&game, state);
    assert_eq!(state.phase, TurnPhase::Accusation);
    assert_eq!(
        game.legal_moves(&state, P3),
        vec![MoveDescriptor::Accuse, MoveDescriptor::EndTurn]
    );

    let state = game.apply(&state, P3, &accuse(&game, "peacock", "rope", "study"), 0).unwrap();
    let over = state.gameover.unwrap();
    assert_eq!(over.winner(), Some(P3));
    assert_eq!(over.solution, *state.envelope());
    assert_eq!(game.is_terminal(&state), Some(GameResult::Winner(P3)));

    // Terminal: everything is rejected except forced moves, which no-op.
    assert!(game.legal_moves(&state, P0).is_empty());
    assert!(matches!(
        game.apply(&state, P0, &Move::Roll, 0),
        Err(RuleError::IllegalMove(_))
    ));
    assert!(matches!(
        game.apply(&state, P3, &accuse(&game, "peacock", "rope", "study"), 0),
        Err(RuleError::AlreadyResolved(_))
    ));
    let same = game
        .apply(&state, P1, &Move::TimeoutCurrentPlayer { turn: state.turn_number }, u64::MAX)
        .unwrap();
    assert_eq!(same, state);
}

#[test]
fn test_wrong_accusation_eliminates() {
    let (game, state) = setup();
    let state = seat3_to_center(&game, state);

    let state = game.apply(&state, P3, &accuse(&game, "plum", "rope", "study"), 0).unwrap();
    assert!(state.players[P3].is_eliminated);
    assert!(state.gameover.is_none());
    assert_eq!(state.current_player, P0);
    assert_eq!(state.turn_number, 5);
    assert!(game.legal_moves(&state, P3).is_empty());
}

#[test]
fn test_everyone_eliminated_is_unsolved() {
    let (game, mut state) = setup();
    for seat in [P0, P1, P2] {
        state.players[seat].is_eliminated = true;
    }
    state.current_player = P3;
    let state = game.apply(&state, P3, &Move::Roll, 0).unwrap();
    let state = game.apply(&state, P3, &Move::MoveTo { to: Coord::new(0, 8) }, 0).unwrap();
    let state = game.apply(&state, P3, &accuse(&game, "plum", "rope", "study"), 0).unwrap();

    let over = state.gameover.unwrap();
    assert_eq!(over.result, GameResult::Unsolved);
    assert_eq!(over.winner(), None);
}

#[test]
fn test_lone_survivor_keeps_playing() {
    let (game, mut state) = setup();
    for seat in [P1, P2, P3] {
        state.players[seat].is_eliminated = true;
    }

    let state = game.apply(&state, P0, &Move::EndTurn, 0).unwrap();
    assert_eq!(state.current_player, P0);
    assert_eq!(state.turn_number, 2);
    assert!(state.gameover.is_none());
}

// =============================================================================
// Timeouts
// =============================================================================

#[test]
fn test_turn_timeout_is_idempotent() {
    let (game, state) = setup_with(GameConfig::new(4).with_turn_timeout(100));

    assert!(matches!(
        game.apply(&state, P2, &Move::TimeoutCurrentPlayer { turn: 1 }, 99),
        Err(RuleError::IllegalMove(_))
    ));
    assert_eq!(game.pending_timeout(&state, 100), Some(Move::TimeoutCurrentPlayer { turn: 1 }));

    let once = game.apply(&state, P2, &Move::TimeoutCurrentPlayer { turn: 1 }, 100).unwrap();
    assert!(once.players[P0].is_eliminated);
    assert_eq!(once.current_player, P1);
    assert_eq!(once.turn_started_at, 100);

    // A second observer racing on the same turn changes nothing.
    let twice = game.apply(&once, P3, &Move::TimeoutCurrentPlayer { turn: 1 }, 101).unwrap();
    assert_eq!(twice, once);
    assert_eq!(twice.history.len(), 1);
}

#[test]
fn test_skip_refutation_is_idempotent() {
    let (game, state) = setup();
    let state = seat0_to(&game, &state, KITCHEN_DOOR);
    let state = game.apply(&state, P0, &suggest(&game, "plum", "wrench", "kitchen"), 1_000).unwrap();
    let deadline = 1_000 + game.config().refutation_timeout_ms;

    assert!(matches!(
        game.apply(&state, P1, &Move::SkipRefutation { turn: 1 }, deadline - 1),
        Err(RuleError::IllegalMove(_))
    ));
    assert_eq!(game.pending_timeout(&state, deadline), Some(Move::SkipRefutation { turn: 1 }));

    let once = game.apply(&state, P1, &Move::SkipRefutation { turn: 1 }, deadline).unwrap();
    let result = once.last_refutation.clone().unwrap();
    assert_eq!(result.refuter, None);
    assert_eq!(result.card_shown, None);
    assert!(once.current_suggestion.is_none());

    let twice = game.apply(&once, P3, &Move::SkipRefutation { turn: 1 }, deadline + 5).unwrap();
    assert_eq!(twice, once);

    // The late refuter finds nothing left to answer.
    assert!(matches!(
        game.apply(&once, P2, &Move::Refute { card: card(&game, "wrench") }, deadline + 5),
        Err(RuleError::AlreadyResolved(_))
    ));
}

#[test]
fn test_turn_clock_waits_for_refutation() {
    let (game, state) = setup();
    let turn_ms = game.config().turn_timeout_ms;
    let refute_ms = game.config().refutation_timeout_ms;

    // Seat 0 suggests just before its own turn deadline.
    let late = turn_ms - 10_000;
    let state = seat0_to(&game, &state, KITCHEN_DOOR);
    let state = game.apply(&state, P0, &suggest(&game, "plum", "wrench", "kitchen"), late).unwrap();

    assert_eq!(game.pending_timeout(&state, turn_ms), None);
    assert!(matches!(
        game.apply(&state, P2, &Move::TimeoutCurrentPlayer { turn: 1 }, turn_ms),
        Err(RuleError::IllegalMove(_))
    ));
    assert!(!state.players[P0].is_eliminated);

    // The stalled responder is skipped instead; the suggester gets a fresh clock.
    let skip_at = late + refute_ms;
    assert_eq!(game.pending_timeout(&state, skip_at), Some(Move::SkipRefutation { turn: 1 }));
    let state = game.apply(&state, P2, &Move::SkipRefutation { turn: 1 }, skip_at).unwrap();
    assert!(!state.players[P0].is_eliminated);
    assert_eq!(state.current_player, P0);
    assert_eq!(state.turn_started_at, skip_at);
    assert_eq!(game.pending_timeout(&state, skip_at + turn_ms - 1), None);

    // Only once the suggester itself stalls is it eliminated.
    let state = game
        .apply(&state, P2, &Move::TimeoutCurrentPlayer { turn: 1 }, skip_at + turn_ms)
        .unwrap();
    assert!(state.players[P0].is_eliminated);
    assert_eq!(state.current_player, P1);
    assert_eq!(state.phase, TurnPhase::Roll);
}

#[test]
fn test_stale_forced_moves_are_noops() {
    let (game, state) = setup();
    let state = game.apply(&state, P0, &Move::EndTurn, 0).unwrap();

    let same = game.apply(&state, P0, &Move::TimeoutCurrentPlayer { turn: 1 }, u64::MAX).unwrap();
    assert_eq!(same, state);
    let same = game.apply(&state, P0, &Move::SkipRefutation { turn: 2 }, u64::MAX).unwrap();
    assert_eq!(same, state);
}
