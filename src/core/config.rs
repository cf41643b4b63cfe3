//! Match configuration.
//!
//! `GameConfig` carries the tunables a host chooses at match creation:
//! seat count, deadlines, dice and the RNG seed. The board layout and the
//! card catalog are configured separately (`board::BoardConfig`,
//! `cards::CardCatalog`) because they are shared by every match of a
//! process.

use serde::{Deserialize, Serialize};

use super::error::SetupError;

/// Wall-clock milliseconds. The engine never reads a clock itself;
/// hosts pass `now` into every transition.
pub type Millis = u64;

/// Fewest seats a match may have.
pub const MIN_PLAYERS: usize = 3;

/// Most seats a match may have (one per suspect pawn).
pub const MAX_PLAYERS: usize = 6;

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of seats.
    pub player_count: usize,

    /// How long the active player may take for a whole turn.
    pub turn_timeout_ms: Millis,

    /// How long the current responder may take to refute.
    pub refutation_timeout_ms: Millis,

    /// Dice rolled per turn.
    pub dice_count: u8,

    /// Faces per die.
    pub dice_sides: u8,

    /// Seed for dealing and dice.
    pub seed: u64,

    /// Whether eliminated seats still answer suggestions from their hand.
    pub eliminated_refute: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            turn_timeout_ms: 120_000,
            refutation_timeout_ms: 60_000,
            dice_count: 2,
            dice_sides: 6,
            seed: 42,
            eliminated_refute: false,
        }
    }
}

impl GameConfig {
    /// Create a configuration for `player_count` seats with default timings.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set the turn timeout.
    #[must_use]
    pub fn with_turn_timeout(mut self, ms: Millis) -> Self {
        self.turn_timeout_ms = ms;
        self
    }

    /// Set the refutation timeout.
    #[must_use]
    pub fn with_refutation_timeout(mut self, ms: Millis) -> Self {
        self.refutation_timeout_ms = ms;
        self
    }

    /// Set the dice used for movement.
    #[must_use]
    pub fn with_dice(mut self, count: u8, sides: u8) -> Self {
        self.dice_count = count;
        self.dice_sides = sides;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Let eliminated seats keep refuting.
    #[must_use]
    pub fn with_eliminated_refute(mut self, enabled: bool) -> Self {
        self.eliminated_refute = enabled;
        self
    }

    /// Reject configurations no match can be created from.
    pub fn validate(&self) -> Result<(), SetupError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(SetupError::PlayerCount(self.player_count));
        }
        if self.dice_count == 0 || self.dice_sides == 0 {
            return Err(SetupError::InvalidDice {
                count: self.dice_count,
                sides: self.dice_sides,
            });
        }
        Ok(())
    }
}
