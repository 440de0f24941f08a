//! Perfect maze generation and route finding on a doubled cell/wall grid
//!
//! A requested `w x h` maze is stored as a `(2w+1) x (2h+1)` grid: odd
//! indices are cell positions, even indices are the walls between them, so
//! walls are addressable grid elements rather than edge attributes.
//! Carving uses randomized Prim, which leaves exactly one route between
//! any two open cells and is reproducible per seed. Route finding is A*
//! with integer octile costs, 4- or 8-connected.
//!
//! # Examples
//! ```
//! use prim_maze::Maze;
//!
//! let mut maze = Maze::new();
//! maze.create(4, 3, 7).unwrap();
//!
//! // The conventional full-maze route runs between opposite corners.
//! let route = maze.find_path((1, 1), (7, 5), false).unwrap();
//! assert_eq!(route.first(), Some(&(1, 1)));
//! assert_eq!(route.last(), Some(&(7, 5)));
//! ```
//!
//! Renderers read one glyph code per grid position:
//! ```
//! use prim_maze::{Maze, WallKind};
//!
//! let mut maze = Maze::new();
//! maze.create(2, 2, 0).unwrap();
//!
//! // The bottom-left corner always joins walls to its right and above.
//! let (kind, on_path) = maze.glyph_code(0, 0).unwrap();
//! assert_eq!(kind, WallKind::RightUp);
//! assert!(!on_path);
//! ```

use std::error::Error;
use std::fmt;

pub mod generator;
pub mod grid;
pub mod pathfinder;

pub use generator::MazeGenerator;
pub use grid::{Cell, Direction, Grid, WallKind};
pub use pathfinder::PathFinder;

/// Failure modes of maze creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    /// Requested logical size (before doubling) had a zero side.
    InvalidDimensions { width: usize, height: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "invalid maze dimensions {width}x{height}: both sides must be at least 1"
                )
            }
        }
    }
}

impl Error for MazeError {}

/// One maze session: the grid plus the generator and path-finder state
/// that persists between calls.
///
/// `create` may be called repeatedly with new sizes and seeds; the grid is
/// resized and recarved in place. `find_path` runs against the most recent
/// maze. A session is single-threaded by construction: every operation
/// takes `&mut self`.
pub struct Maze {
    grid: Grid,
    generator: MazeGenerator,
    pathfinder: PathFinder,
}

impl Maze {
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            generator: MazeGenerator::new(),
            pathfinder: PathFinder::new(),
        }
    }

    /// (Re)creates the maze at logical size `width x height` cells.
    ///
    /// Fails without touching the previous grid when either side is zero.
    /// The same `(width, height, seed)` triple on a fresh session always
    /// reproduces the same layout; repeating a seed within one session
    /// continues the generator's random stream instead of rewinding it.
    pub fn create(&mut self, width: usize, height: usize, seed: u64) -> Result<(), MazeError> {
        if width < 1 || height < 1 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        self.grid.resize(2 * width + 1, 2 * height + 1);
        self.generator.carve(&mut self.grid, seed);
        MazeGenerator::derive_wall_kinds(&mut self.grid);
        Ok(())
    }

    /// Grid width after doubling (`2 * width + 1`).
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Grid height after doubling (`2 * height + 1`).
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Structural glyph code plus route-marker flag for one grid position,
    /// or `None` outside the grid.
    pub fn glyph_code(&self, x: usize, y: usize) -> Option<(WallKind, bool)> {
        self.grid
            .cell(x, y)
            .map(|cell| (cell.wall_kind, cell.on_path))
    }

    /// Shortest route between two open cells, or `None` when either
    /// endpoint is a wall or no route exists. See [PathFinder::find_path]
    /// for connectivity and marker semantics.
    pub fn find_path(
        &mut self,
        start: (usize, usize),
        goal: (usize, usize),
        diagonals: bool,
    ) -> Option<Vec<(usize, usize)>> {
        self.pathfinder
            .find_path(&mut self.grid, start, goal, diagonals)
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::new()
    }
}
