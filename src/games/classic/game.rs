//! Classic game implementation.

use log::info;

use crate::board::{BoardConfig, BoardGrid};
use crate::cards::{CardCatalog, Deal};
use crate::core::action::{Move, MoveDescriptor};
use crate::core::config::{GameConfig, Millis};
use crate::core::error::{RuleResult, SetupError};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::rules::{self, RulesEngine};

use super::board::classic_board;

/// Static tables of one match: configuration, catalog and board.
///
/// Immutable after `build`; every transition borrows it.
#[derive(Clone, Debug)]
pub struct ClassicGame {
    config: GameConfig,
    catalog: CardCatalog,
    board: BoardGrid,
}

/// Builder for creating a ClassicGame.
#[derive(Clone, Debug)]
pub struct ClassicGameBuilder {
    config: GameConfig,
    catalog: CardCatalog,
    board: BoardConfig,
    deal: Option<Deal>,
    started_at: Millis,
}

impl Default for ClassicGameBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            catalog: CardCatalog::classic(),
            board: classic_board(),
            deal: None,
            started_at: 0,
        }
    }
}

impl ClassicGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        self.config.player_count = count;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(mut self, catalog: CardCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Use a fixed deal instead of a seeded random one.
    pub fn deal(mut self, deal: Deal) -> Self {
        self.deal = Some(deal);
        self
    }

    /// Host time at which the first turn starts.
    pub fn started_at(mut self, now: Millis) -> Self {
        self.started_at = now;
        self
    }

    /// Validate everything and build the game and initial state.
    pub fn build(self) -> Result<(ClassicGame, GameState), SetupError> {
        self.config.validate()?;
        self.catalog.validate()?;
        let board = BoardGrid::from_config(&self.board, &self.catalog)?;

        let mut rng = GameRng::new(self.config.seed);
        let deal = match self.deal {
            Some(deal) if deal.hands.len() != self.config.player_count => {
                return Err(SetupError::InvalidDeal(format!(
                    "{} hands dealt for {} seats",
                    deal.hands.len(),
                    self.config.player_count
                )));
            }
            Some(deal) => deal,
            None => Deal::random(&self.catalog, self.config.player_count, &mut rng)?,
        };
        let state = GameState::new(deal, &self.catalog, &board, rng, self.started_at)?;

        info!(
            "match created: {} seats, {} cards, {} on the table, seed {}",
            self.config.player_count,
            self.catalog.len(),
            state.table_cards.len(),
            self.config.seed
        );

        let game = ClassicGame {
            config: self.config,
            catalog: self.catalog,
            board,
        };
        Ok((game, state))
    }
}

impl ClassicGame {
    /// Create with the classic catalog and board.
    pub fn builder() -> ClassicGameBuilder {
        ClassicGameBuilder::new()
    }
}

impl RulesEngine for ClassicGame {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    fn board(&self) -> &BoardGrid {
        &self.board
    }

    fn legal_moves(&self, state: &GameState, player: PlayerId) -> Vec<MoveDescriptor> {
        rules::legal_moves(self, state, player)
    }

    fn apply(&self, state: &GameState, player: PlayerId, mv: &Move, now: Millis) -> RuleResult<GameState> {
        rules::apply_move(self, state, player, mv, now)
    }
}
