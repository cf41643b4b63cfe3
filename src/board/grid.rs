//! Static board configuration.
//!
//! A `BoardConfig` is the serializable description hosts load once per
//! process; `BoardGrid` is its validated, immutable form that the engine
//! reads. Room interiors are not cells: a pawn is "in" a room while it
//! stands on one of that room's door cells.
//!
//! ## Text legend
//!
//! | glyph | cell |
//! |-------|------|
//! | `#` | void (impassable) |
//! | `.` | hall |
//! | `*` | center (accusation cell) |
//! | `0`-`9` | start position of that seat |
//! | `a`-`z` | door; the `doors` map names its room card |

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId, CardKind};
use crate::core::error::SetupError;

/// Grid coordinate, row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u16,
    pub col: u16,
}

impl Coord {
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Manhattan distance.
    #[must_use]
    pub fn distance(self, other: Coord) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What a cell is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    Void,
    Hall,
    Door,
    Start,
    Center,
}

impl CellKind {
    /// Whether a pawn may enter the cell at all.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, CellKind::Void)
    }

    /// Door and center cells allow several pawns at once.
    #[must_use]
    pub const fn is_safe_zone(self) -> bool {
        matches!(self, CellKind::Door | CellKind::Center)
    }
}

/// Serializable board description.
///
/// ```
/// use rust_sleuth::board::BoardConfig;
///
/// let json = r#"{ "rows": ["0.k", ".*."], "doors": { "k": "kitchen" } }"#;
/// let config = BoardConfig::from_json(json).unwrap();
/// assert_eq!(config.rows.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// One string per row, see the module legend.
    pub rows: Vec<String>,

    /// Door glyph → room card key.
    pub doors: BTreeMap<char, String>,
}

impl BoardConfig {
    /// Build a config from text rows and a door map.
    pub fn new<R, K>(rows: impl IntoIterator<Item = R>, doors: impl IntoIterator<Item = (char, K)>) -> Self
    where
        R: Into<String>,
        K: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
            doors: doors.into_iter().map(|(g, k)| (g, k.into())).collect(),
        }
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Validated, immutable board.
#[derive(Clone, Debug)]
pub struct BoardGrid {
    width: u16,
    height: u16,
    cells: Vec<CellKind>,
    door_rooms: FxHashMap<Coord, CardId>,
    room_doors: FxHashMap<CardId, Vec<Coord>>,
    starts: BTreeMap<u8, Coord>,
    center: Coord,
}

impl BoardGrid {
    /// Validate a config against the card catalog.
    ///
    /// Every problem here is fatal for match creation.
    pub fn from_config(config: &BoardConfig, catalog: &CardCatalog) -> Result<Self, SetupError> {
        let height = config.rows.len();
        if height == 0 {
            return Err(SetupError::EmptyBoard);
        }
        let width = config.rows[0].chars().count();
        if width == 0 {
            return Err(SetupError::EmptyBoard);
        }

        let mut door_room_ids: FxHashMap<char, CardId> = FxHashMap::default();
        for (&glyph, key) in &config.doors {
            let room = catalog
                .by_key(key)
                .filter(|c| c.is(CardKind::Room))
                .ok_or_else(|| SetupError::UnknownRoom(key.clone()))?;
            door_room_ids.insert(glyph, room.id);
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut door_rooms = FxHashMap::default();
        let mut room_doors: FxHashMap<CardId, Vec<Coord>> = FxHashMap::default();
        let mut starts = BTreeMap::new();
        let mut centers = Vec::new();

        for (row, line) in config.rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(SetupError::RaggedRow { row, expected: width, found });
            }
            for (col, glyph) in line.chars().enumerate() {
                let coord = Coord::new(row as u16, col as u16);
                let kind = match glyph {
                    '#' => CellKind::Void,
                    '.' => CellKind::Hall,
                    '*' => {
                        centers.push(coord);
                        CellKind::Center
                    }
                    '0'..='9' => {
                        let seat = glyph as u8 - b'0';
                        if starts.insert(seat, coord).is_some() {
                            return Err(SetupError::DuplicateStart(seat));
                        }
                        CellKind::Start
                    }
                    'a'..='z' => {
                        let room = *door_room_ids.get(&glyph).ok_or(SetupError::UnmappedDoor(glyph))?;
                        door_rooms.insert(coord, room);
                        room_doors.entry(room).or_default().push(coord);
                        CellKind::Door
                    }
                    _ => return Err(SetupError::UnknownGlyph { row, col, glyph }),
                };
                cells.push(kind);
            }
        }

        let center = match centers.as_slice() {
            [only] => *only,
            other => return Err(SetupError::CenterCount(other.len())),
        };

        for room in catalog.of_kind(CardKind::Room) {
            if !room_doors.contains_key(&room.id) {
                return Err(SetupError::RoomWithoutDoor(room.key.clone()));
            }
        }

        Ok(Self {
            width: width as u16,
            height: height as u16,
            cells,
            door_rooms,
            room_doors,
            starts,
            center,
        })
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Cell kind at `coord`, or `None` off the board.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Option<CellKind> {
        if coord.row >= self.height || coord.col >= self.width {
            return None;
        }
        self.cells
            .get(coord.row as usize * self.width as usize + coord.col as usize)
            .copied()
    }

    /// Whether a pawn may stand on `coord`.
    #[must_use]
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.cell(coord).is_some_and(CellKind::is_passable)
    }

    /// Whether `coord` allows co-occupancy.
    #[must_use]
    pub fn is_safe_zone(&self, coord: Coord) -> bool {
        self.cell(coord).is_some_and(CellKind::is_safe_zone)
    }

    /// The room a door cell leads into.
    #[must_use]
    pub fn room_at(&self, coord: Coord) -> Option<CardId> {
        self.door_rooms.get(&coord).copied()
    }

    /// Door cells of a room, in reading order.
    #[must_use]
    pub fn doors_of(&self, room: CardId) -> &[Coord] {
        self.room_doors.get(&room).map_or(&[], Vec::as_slice)
    }

    /// Every door cell with its room.
    pub fn doors(&self) -> impl Iterator<Item = (Coord, CardId)> + '_ {
        self.door_rooms.iter().map(|(&c, &r)| (c, r))
    }

    /// The accusation cell.
    #[must_use]
    pub fn center(&self) -> Coord {
        self.center
    }

    /// Start position of a seat.
    #[must_use]
    pub fn start(&self, seat: u8) -> Option<Coord> {
        self.starts.get(&seat).copied()
    }

    /// Number of seats that have a start position, counting up from seat 0.
    #[must_use]
    pub fn seat_capacity(&self) -> usize {
        (0u8..=9).take_while(|s| self.starts.contains_key(s)).count()
    }

    /// In-bounds four-connected neighbours (void cells included).
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        const STEPS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        STEPS.iter().filter_map(move |&(dr, dc)| {
            let row = i32::from(coord.row) + dr;
            let col = i32::from(coord.col) + dc;
            if row < 0 || col < 0 || row >= i32::from(self.height) || col >= i32::from(self.width) {
                None
            } else {
                Some(Coord::new(row as u16, col as u16))
            }
        })
    }
}
