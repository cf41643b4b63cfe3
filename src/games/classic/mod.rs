//! Classic deduction game: six suspects, six weapons, nine rooms.
//!
//! - 3-6 seats, one suspect pawn each
//! - Movement by dice over the stock board
//! - Suggest from a room, accuse from the center

mod board;
mod game;

pub use board::classic_board;
pub use game::{ClassicGame, ClassicGameBuilder};
