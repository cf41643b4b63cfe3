//! Board layout and movement.
//!
//! - `grid`: `BoardConfig` (serializable) and `BoardGrid` (validated, immutable)
//! - `movement`: breadth-first reachability for a dice budget, walking distances

pub mod grid;
pub mod movement;

pub use grid::{BoardConfig, BoardGrid, CellKind, Coord};
pub use movement::{reachable, walking_distances};
