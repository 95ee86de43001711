//! Static tile grid
//!
//! The level is a fixed rectangle of tiles indexed `[row][column]`. World
//! coordinates map to tiles by floor division with the block size; anything
//! outside the rectangle is "outside the world" rather than an error.

use std::{error::Error, fmt};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_BLOCK_SIZE;

/// Occupancy of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tile {
    #[default]
    Empty,
    Wall,
}

impl Tile {
    #[inline]
    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> Self {
        match tile {
            Tile::Empty => 0,
            Tile::Wall => 1,
        }
    }
}

impl TryFrom<u8> for Tile {
    type Error = GridError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Tile::Empty),
            1 => Ok(Tile::Wall),
            other => Err(GridError::InvalidTile { value: other }),
        }
    }
}

/// Integer tile coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i64,
    pub column: i64,
}

/// Built-in level: solid border, a wall stub in column 2 and a 2x2 block
const DEFAULT_LEVEL: [[u8; 10]; 10] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Immutable rectangular tile grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridFile", into = "GridFile")]
pub struct Grid {
    rows: usize,
    columns: usize,
    block_size: f32,
    /// Row-major tiles
    tiles: Vec<Tile>,
}

impl Default for Grid {
    fn default() -> Self {
        let tiles = DEFAULT_LEVEL
            .iter()
            .flatten()
            .map(|&value| if value == 0 { Tile::Empty } else { Tile::Wall })
            .collect();
        Self {
            rows: DEFAULT_LEVEL.len(),
            columns: DEFAULT_LEVEL[0].len(),
            block_size: LEVEL_BLOCK_SIZE,
            tiles,
        }
    }
}

impl Grid {
    /// Build a grid from rows of 0/1 values
    pub fn from_rows(rows: Vec<Vec<u8>>, block_size: f32) -> Result<Self, GridError> {
        if !block_size.is_finite() || block_size <= 0.0 {
            return Err(GridError::InvalidBlockSize { block_size });
        }
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || columns == 0 {
            return Err(GridError::Empty);
        }

        let mut tiles = Vec::with_capacity(rows.len() * columns);
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(GridError::Ragged {
                    row: row_index,
                    expected: columns,
                    found: row.len(),
                });
            }
            for &value in row {
                tiles.push(Tile::try_from(value)?);
            }
        }

        Ok(Self {
            rows: rows.len(),
            columns,
            block_size,
            tiles,
        })
    }

    /// Parse a level from JSON
    ///
    /// Accepts either a bare 2D array of 0/1 values (block size defaults to
    /// 64) or `{ "block_size": 32.0, "tiles": [[...], ...] }`.
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        let file: GridFile =
            serde_json::from_str(json).map_err(|err| GridError::Parse(err.to_string()))?;
        Self::try_from(file)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// World units per tile edge
    #[inline]
    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    /// World-space extent of the whole grid
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.columns as f32, self.rows as f32) * self.block_size
    }

    /// Tile at a cell, `None` when outside the grid
    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        if cell.row < 0 || cell.column < 0 {
            return None;
        }
        let (row, column) = (cell.row as usize, cell.column as usize);
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.tiles.get(row * self.columns + column).copied()
    }

    /// Cell containing a world point, `None` for non-finite coordinates
    pub fn cell_at(&self, point: Vec2) -> Option<Cell> {
        if !point.is_finite() {
            return None;
        }
        let scaled = (point / self.block_size).floor();
        Some(Cell {
            row: scaled.y as i64,
            column: scaled.x as i64,
        })
    }

    /// Tile under a world point, `None` when outside the world
    pub fn tile_at(&self, point: Vec2) -> Option<Tile> {
        self.cell_at(point).and_then(|cell| self.tile(cell))
    }

    /// Iterate over every cell with its tile, row-major
    pub fn cells(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(i, &tile)| {
            let cell = Cell {
                row: (i / self.columns) as i64,
                column: (i % self.columns) as i64,
            };
            (cell, tile)
        })
    }

    /// Rows as 0/1 values
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.tiles
            .chunks(self.columns)
            .map(|row| row.iter().map(|&t| u8::from(t)).collect())
            .collect()
    }
}

/// On-disk level representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridFile {
    Bare(Vec<Vec<u8>>),
    Sized {
        #[serde(default = "default_block_size")]
        block_size: f32,
        tiles: Vec<Vec<u8>>,
    },
}

fn default_block_size() -> f32 {
    LEVEL_BLOCK_SIZE
}

impl TryFrom<GridFile> for Grid {
    type Error = GridError;

    fn try_from(file: GridFile) -> Result<Self, Self::Error> {
        match file {
            GridFile::Bare(rows) => Grid::from_rows(rows, LEVEL_BLOCK_SIZE),
            GridFile::Sized { block_size, tiles } => Grid::from_rows(tiles, block_size),
        }
    }
}

impl From<Grid> for GridFile {
    fn from(grid: Grid) -> Self {
        GridFile::Sized {
            block_size: grid.block_size,
            tiles: grid.to_rows(),
        }
    }
}

/// Errors that can occur when building or loading a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The level has no rows or no columns.
    Empty,
    /// A row's length differs from the first row.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A tile value other than 0 or 1.
    InvalidTile { value: u8 },
    /// Block size must be finite and positive.
    InvalidBlockSize { block_size: f32 },
    /// The level text is not valid JSON for a grid.
    Parse(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "level must have at least one row and one column"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} tiles but the first row has {expected}"
            ),
            Self::InvalidTile { value } => {
                write!(f, "tile values must be 0 or 1 (received {value})")
            }
            Self::InvalidBlockSize { block_size } => {
                write!(f, "block size must be positive (received {block_size})")
            }
            Self::Parse(message) => write!(f, "invalid level JSON: {message}"),
        }
    }
}

impl Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_layout() {
        let grid = Grid::default();
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.columns(), 10);
        assert_eq!(grid.block_size(), 64.0);

        let at = |row, column| grid.tile(Cell { row, column });
        // Border
        assert_eq!(at(0, 5), Some(Tile::Wall));
        assert_eq!(at(9, 0), Some(Tile::Wall));
        // Column 2 stub
        assert_eq!(at(1, 2), Some(Tile::Wall));
        assert_eq!(at(3, 2), Some(Tile::Wall));
        assert_eq!(at(4, 2), Some(Tile::Empty));
        // 2x2 block
        assert_eq!(at(6, 6), Some(Tile::Wall));
        assert_eq!(at(7, 7), Some(Tile::Wall));
        assert_eq!(at(8, 7), Some(Tile::Empty));
    }

    #[test]
    fn test_outside_is_none() {
        let grid = Grid::default();
        assert_eq!(grid.tile(Cell { row: -1, column: 0 }), None);
        assert_eq!(grid.tile(Cell { row: 0, column: 10 }), None);
        assert_eq!(grid.tile_at(Vec2::new(-0.5, 100.0)), None);
        assert_eq!(grid.tile_at(Vec2::new(640.0, 100.0)), None);
        assert_eq!(grid.tile_at(Vec2::new(f32::NAN, 100.0)), None);
    }

    #[test]
    fn test_world_to_tile_uses_floor_division() {
        let grid = Grid::default();
        // (224, 480) -> column 3, row 7
        assert_eq!(
            grid.cell_at(Vec2::new(224.0, 480.0)),
            Some(Cell { row: 7, column: 3 })
        );
        // Boundary belongs to the next tile
        assert_eq!(
            grid.cell_at(Vec2::new(128.0, 64.0)),
            Some(Cell { row: 1, column: 2 })
        );
        assert_eq!(grid.tile_at(Vec2::new(128.0, 64.0)), Some(Tile::Wall));
    }

    #[test]
    fn test_from_json_bare_and_sized() {
        let bare = Grid::from_json("[[1,1,1],[1,0,1],[1,1,1]]").unwrap();
        assert_eq!(bare.rows(), 3);
        assert_eq!(bare.block_size(), 64.0);
        assert_eq!(bare.tile(Cell { row: 1, column: 1 }), Some(Tile::Empty));

        let sized = Grid::from_json(r#"{"block_size": 1.0, "tiles": [[1,0],[0,1]]}"#).unwrap();
        assert_eq!(sized.block_size(), 1.0);
        assert_eq!(sized.tile_at(Vec2::new(1.5, 0.5)), Some(Tile::Empty));
    }

    #[test]
    fn test_from_json_rejects_bad_levels() {
        assert_eq!(Grid::from_json("[]"), Err(GridError::Empty));
        assert_eq!(
            Grid::from_json("[[1,1],[1]]"),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            Grid::from_json(r#"{"block_size": 0.0, "tiles": [[1]]}"#),
            Err(GridError::InvalidBlockSize { .. })
        ));
        assert!(matches!(
            Grid::from_json("[[0,2]]"),
            Err(GridError::InvalidTile { value: 2 })
        ));
        assert!(matches!(Grid::from_json("not json"), Err(GridError::Parse(_))));
    }

    #[test]
    fn test_serde_roundtrip_keeps_layout() {
        let grid = Grid::default();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
