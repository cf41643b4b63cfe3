//! The stock board for the classic catalog.

use crate::board::BoardConfig;

/// Layout rows; see `board::grid` for the legend.
///
/// Nine rooms on the outer ring, two passages into the inner ring, and
/// the accusation cell in the middle.
const ROWS: [&str; 11] = [
    "k...b0c...d",
    ".#########.",
    "5#.......#1",
    ".#.#####.#.",
    "i..#...#..l",
    ".#.#.*.#.#.",
    "o..#...#..h",
    ".#.##.##.#.",
    "4#.......#2",
    ".#########.",
    "s...3......",
];

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

/// Board matching `CardCatalog::classic`.
#[must_use]
pub fn classic_board() -> BoardConfig {
    BoardConfig::new(ROWS, DOORS)
}
