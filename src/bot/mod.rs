//! Deduction bot.
//!
//! A simple, non-adaptive greedy strategy: remember every card known to
//! be outside the envelope, suggest among what is left, accuse once each
//! category has a single candidate. It never accuses on a guess.
//!
//! ```
//! use rust_sleuth::bot::Bot;
//! use rust_sleuth::core::PlayerId;
//! use rust_sleuth::games::classic::ClassicGameBuilder;
//! use rust_sleuth::rules::RulesEngine;
//!
//! let (game, state) = ClassicGameBuilder::new().player_count(3).build().unwrap();
//! let mut bot = Bot::new(&state, PlayerId::new(0), 1).unwrap();
//! let mv = bot.act(&game, &state).unwrap();
//! assert!(game.apply(&state, PlayerId::new(0), &mv, 0).is_ok());
//! ```

mod decision;
mod knowledge;

pub use decision::decide;
pub use knowledge::Knowledge;

use serde::{Deserialize, Serialize};

use crate::core::action::Move;
use crate::core::error::RuleResult;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::rules::RulesEngine;

/// One bot seat: its knowledge and its private RNG stream.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bot {
    me: PlayerId,
    knowledge: Knowledge,
    rng: GameRng,
}

impl Bot {
    /// Create a bot for seat `me`.
    pub fn new(state: &GameState, me: PlayerId, seed: u64) -> RuleResult<Self> {
        Ok(Self {
            me,
            knowledge: Knowledge::new(state, me)?,
            rng: GameRng::new(seed).for_context("bot"),
        })
    }

    #[must_use]
    pub fn seat(&self) -> PlayerId {
        self.me
    }

    #[must_use]
    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    /// Absorb what `state` shows this seat, then choose a move.
    pub fn act<R: RulesEngine + ?Sized>(&mut self, rules: &R, state: &GameState) -> Option<Move> {
        self.knowledge.absorb(state, self.me);
        decide(rules, state, self.me, &self.knowledge, &mut self.rng)
    }
}
