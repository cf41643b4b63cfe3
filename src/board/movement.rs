//! Legal destinations for one movement roll.
//!
//! Breadth-first search over the four-connected grid. A destination is
//! any cell reachable in `1..=steps` steps; the pawn may stop early.
//!
//! ## Occupancy
//!
//! Void cells are impassable. A hall or start cell holding another active
//! pawn can be neither entered nor crossed. Door and center cells are
//! safe zones: they can be shared and crossed regardless of who stands
//! there. The mover's own cell is never a destination.

use std::collections::{BTreeSet, VecDeque};

use rustc_hash::{FxHashMap, FxHashSet};

use super::grid::{BoardGrid, Coord};

/// Every coordinate reachable from `start` within `1..=steps` steps.
///
/// `occupied` holds the cells of the other non-eliminated pawns.
///
/// ```
/// use rust_sleuth::board::{reachable, BoardConfig, BoardGrid, Coord};
/// use rust_sleuth::cards::{CardCatalog, CardKind};
/// use rustc_hash::FxHashSet;
///
/// let mut catalog = CardCatalog::new();
/// catalog.register("plum", "Plum", CardKind::Suspect).unwrap();
/// catalog.register("rope", "Rope", CardKind::Weapon).unwrap();
/// catalog.register("hall", "Hall", CardKind::Room).unwrap();
///
/// let board = BoardGrid::from_config(&BoardConfig::new(["0..h*"], [('h', "hall")]), &catalog).unwrap();
/// let dests = reachable(&board, Coord::new(0, 0), 2, &FxHashSet::default());
/// assert_eq!(dests.into_iter().collect::<Vec<_>>(), vec![Coord::new(0, 1), Coord::new(0, 2)]);
/// ```
#[must_use]
pub fn reachable(
    board: &BoardGrid,
    start: Coord,
    steps: u32,
    occupied: &FxHashSet<Coord>,
) -> BTreeSet<Coord> {
    let mut result = BTreeSet::new();
    if steps == 0 || !board.is_passable(start) {
        return result;
    }

    let mut visited: FxHashSet<Coord> = FxHashSet::default();
    visited.insert(start);

    let mut queue = VecDeque::new();
    queue.push_back((start, 0u32));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= steps {
            continue;
        }
        for next in board.neighbors(current) {
            if visited.contains(&next) || !board.is_passable(next) {
                continue;
            }
            if occupied.contains(&next) && !board.is_safe_zone(next) {
                continue;
            }
            visited.insert(next);
            result.insert(next);
            queue.push_back((next, depth + 1));
        }
    }

    result
}

/// Walking distance from every passable cell to `target`, ignoring pawns.
///
/// Cells that cannot reach `target` are absent.
#[must_use]
pub fn walking_distances(board: &BoardGrid, target: Coord) -> FxHashMap<Coord, u32> {
    let mut dist = FxHashMap::default();
    if !board.is_passable(target) {
        return dist;
    }
    dist.insert(target, 0);

    let mut queue = VecDeque::from([target]);
    while let Some(current) = queue.pop_front() {
        let d = dist[&current];
        for next in board.neighbors(current) {
            if board.is_passable(next) && !dist.contains_key(&next) {
                dist.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}
