//! Lake layouts

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, grid::Position};

/// The 8x8 layout the agent is trained on by default
pub const DEFAULT_MAP: [&str; 8] = [
    "SFFFFFFF", "FFFFFFFF", "FFHFFFFF", "FFFFFHFF", "FFFFFFFH", "HFFFFFFF", "FFFFFFHF",
    "FFFHFFFG",
];

/// A single lake cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Start,
    Frozen,
    Hole,
    Goal,
}

impl Tile {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'S' => Some(Tile::Start),
            'F' => Some(Tile::Frozen),
            'H' => Some(Tile::Hole),
            'G' => Some(Tile::Goal),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Tile::Start => 'S',
            Tile::Frozen => 'F',
            Tile::Hole => 'H',
            Tile::Goal => 'G',
        }
    }

    /// Holes and goals end the episode
    pub fn is_terminal(self) -> bool {
        matches!(self, Tile::Hole | Tile::Goal)
    }
}

/// Rectangular lake with exactly one start tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LakeMap {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
    start: Position,
}

impl LakeMap {
    /// Parse a layout given as rows of `S`, `F`, `H` and `G`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyMap`] for no rows or an empty first row
    /// - [`Error::RaggedMapRow`] when rows differ in length
    /// - [`Error::InvalidMapCharacter`] for any other character
    /// - [`Error::InvalidStartCount`] unless exactly one `S` is present
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if cols == 0 {
            return Err(Error::EmptyMap);
        }

        let mut tiles = Vec::with_capacity(rows.len() * cols);
        let mut starts = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let got = row.chars().count();
            if got != cols {
                return Err(Error::RaggedMapRow {
                    row: r,
                    expected: cols,
                    got,
                });
            }
            for (c, character) in row.chars().enumerate() {
                let tile = Tile::from_char(character).ok_or(Error::InvalidMapCharacter {
                    character,
                    row: r,
                    column: c,
                })?;
                if tile == Tile::Start {
                    starts.push(Position::new(r, c));
                }
                tiles.push(tile);
            }
        }

        match starts.as_slice() {
            [start] => Ok(Self {
                rows: rows.len(),
                cols,
                tiles,
                start: *start,
            }),
            _ => Err(Error::InvalidStartCount {
                found: starts.len(),
            }),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells, which is also the number of states
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// # Panics
    ///
    /// Panics if `pos` lies outside the map.
    pub fn tile(&self, pos: Position) -> Tile {
        self.tiles[pos.index(self.cols)]
    }

    /// Layout as strings, the same shape [`LakeMap::parse`] accepts
    pub fn to_rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.cols)
            .map(|row| row.iter().map(|tile| tile.to_char()).collect())
            .collect()
    }
}

impl Default for LakeMap {
    fn default() -> Self {
        let cols = DEFAULT_MAP[0].len();
        let tiles = DEFAULT_MAP
            .iter()
            .flat_map(|row| row.chars())
            .filter_map(Tile::from_char)
            .collect();
        Self {
            rows: DEFAULT_MAP.len(),
            cols,
            tiles,
            start: Position::new(0, 0),
        }
    }
}

impl fmt::Display for LakeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}
