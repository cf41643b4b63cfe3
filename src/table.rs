//! One hosted match.
//!
//! A `Table` owns the current `GameState` of a match and is its single
//! writer: submissions go through `&mut self`, one at a time. When a
//! submission ends the match the `OutcomeSink` hears about it exactly
//! once, however many further moves (or stale timeouts) arrive.

use log::info;

use crate::core::action::{Move, MoveRequest};
use crate::core::config::Millis;
use crate::core::error::RuleResult;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, Gameover};
use crate::rules::RulesEngine;
use crate::view::PlayerView;

/// Receives the terminal outcome of a match.
pub trait OutcomeSink {
    fn on_gameover(&mut self, outcome: &Gameover, state: &GameState);
}

impl OutcomeSink for Vec<Gameover> {
    fn on_gameover(&mut self, outcome: &Gameover, _state: &GameState) {
        self.push(*outcome);
    }
}

/// A match plus its outcome sink.
pub struct Table<R, S> {
    rules: R,
    state: GameState,
    sink: S,
    reported: bool,
}

impl<R: RulesEngine, S: OutcomeSink> Table<R, S> {
    pub fn new(rules: R, state: GameState, sink: S) -> Self {
        let mut table = Self {
            rules,
            state,
            sink,
            reported: false,
        };
        // A restored snapshot may already be terminal.
        table.report();
        table
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Apply a move. On error the table is unchanged.
    pub fn submit(&mut self, player: PlayerId, mv: &Move, now: Millis) -> RuleResult<&GameState> {
        self.state = self.rules.apply(&self.state, player, mv, now)?;
        self.report();
        Ok(&self.state)
    }

    /// Resolve and apply a wire request.
    pub fn submit_request(&mut self, player: PlayerId, request: &MoveRequest, now: Millis) -> RuleResult<&GameState> {
        let mv = request.resolve(self.rules.catalog())?;
        self.submit(player, &mv, now)
    }

    /// Apply the forced move due at `now`, if any. Returns it.
    pub fn tick(&mut self, now: Millis) -> RuleResult<Option<Move>> {
        let Some(mv) = self.rules.pending_timeout(&self.state, now) else {
            return Ok(None);
        };
        let actor = self.state.current_player;
        self.submit(actor, &mv, now)?;
        Ok(Some(mv))
    }

    /// Redacted state for one seat.
    pub fn view(&self, viewer: PlayerId) -> RuleResult<PlayerView> {
        PlayerView::for_viewer(&self.state, viewer)
    }

    /// Give back the engine, final state and sink.
    pub fn into_parts(self) -> (R, GameState, S) {
        (self.rules, self.state, self.sink)
    }

    fn report(&mut self) {
        if self.reported {
            return;
        }
        if let Some(outcome) = &self.state.gameover {
            info!("match over: {:?}", outcome.result);
            self.reported = true;
            self.sink.on_gameover(outcome, &self.state);
        }
    }
}
