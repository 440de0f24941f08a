//! Maze carving with randomized Prim

use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::grid::{Direction, Grid, WallKind};

/// A frontier entry: a candidate wall block paired with the direction from
/// the wall toward the not-yet-visited cell beyond it. Lives only for the
/// duration of one carve.
#[derive(Debug, Clone, Copy)]
struct FrontierWall {
    x: usize,
    y: usize,
    toward: Direction,
}

/// Carves perfect mazes into an all-wall [Grid], reproducible per seed.
pub struct MazeGenerator {
    random: StdRng,
    seed: Option<u64>,
}

impl MazeGenerator {
    pub fn new() -> Self {
        Self {
            random: StdRng::seed_from_u64(0),
            seed: None,
        }
    }

    /// Opens passages in `grid` with the randomized Prim algorithm.
    ///
    /// The grid is expected in doubled form (`2w+1 x 2h+1`, see
    /// [Grid::resize]). Carving opens `(1, 1)`, then keeps picking one
    /// frontier wall uniformly at random until the frontier is exhausted.
    /// The result is a spanning tree over the cells: exactly one route
    /// between any two open positions.
    ///
    /// A fresh random stream is seeded whenever `seed` differs from the
    /// previous call; repeating the seed continues the existing stream, so
    /// back-to-back carves with one seed yield different (but still
    /// reproducible) layouts.
    pub fn carve(&mut self, grid: &mut Grid, seed: u64) {
        if self.seed != Some(seed) {
            self.random = StdRng::seed_from_u64(seed);
            self.seed = Some(seed);
        }

        info!(
            "carving {}x{} grid (seed {})",
            grid.width(),
            grid.height(),
            seed
        );

        // Border positions are never candidates; the frontier stays inside
        // [1, limit].
        let x_limit = grid.width().saturating_sub(2);
        let y_limit = grid.height().saturating_sub(2);

        let mut frontier: Vec<FrontierWall> = Vec::new();

        if let Some(start) = grid.cell_mut(1, 1) {
            start.is_wall = false;
            Self::record_frontier(grid, &mut frontier, 1, 1, x_limit, y_limit);
        }

        while !frontier.is_empty() {
            let picked = self.random.gen_range(0..frontier.len());
            let wall = frontier.swap_remove(picked);

            // The cell two steps past the chosen wall; already-open means
            // the wall stays, otherwise both are carved open.
            if let Some((fx, fy)) = wall.toward.step(wall.x, wall.y) {
                let unvisited = grid.cell(fx, fy).is_some_and(|c| c.is_wall);
                if unvisited {
                    if let Some(far) = grid.cell_mut(fx, fy) {
                        far.is_wall = false;
                    }
                    if let Some(block) = grid.cell_mut(wall.x, wall.y) {
                        block.is_wall = false;
                    }
                    Self::record_frontier(grid, &mut frontier, fx, fy, x_limit, y_limit);
                }
            }
        }
    }

    /// Records the wall neighbours of a newly opened cell whose far side is
    /// still unvisited, each tagged with the direction away from the opened
    /// region.
    fn record_frontier(
        grid: &Grid,
        frontier: &mut Vec<FrontierWall>,
        x: usize,
        y: usize,
        x_limit: usize,
        y_limit: usize,
    ) {
        for toward in [
            Direction::Down,
            Direction::Up,
            Direction::Right,
            Direction::Left,
        ] {
            let in_range = match toward {
                Direction::Down => y > 1,
                Direction::Up => y < y_limit,
                Direction::Right => x < x_limit,
                Direction::Left => x > 1,
            };
            if !in_range {
                continue;
            }

            let wall = toward.step(x, y);
            let beyond = wall.and_then(|(wx, wy)| toward.step(wx, wy));
            if let (Some((wx, wy)), Some((bx, by))) = (wall, beyond) {
                let wall_standing = grid.cell(wx, wy).is_some_and(|c| c.is_wall);
                let beyond_unvisited = grid.cell(bx, by).is_some_and(|c| c.is_wall);
                if wall_standing && beyond_unvisited {
                    frontier.push(FrontierWall {
                        x: wx,
                        y: wy,
                        toward,
                    });
                }
            }
        }
    }

    /// Recomputes every cell's junction shape from its cardinal
    /// neighbours.
    ///
    /// Open cells get the empty shape; wall cells OR together one bit per
    /// neighbouring wall, and out-of-grid neighbours contribute nothing.
    /// The shape is a rendering aid only.
    pub fn derive_wall_kinds(grid: &mut Grid) {
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let kind = if grid.cell(x, y).is_some_and(|c| !c.is_wall) {
                    WallKind::None
                } else {
                    let mut bits = 0u8;
                    for toward in [
                        Direction::Left,
                        Direction::Right,
                        Direction::Down,
                        Direction::Up,
                    ] {
                        let walled = toward
                            .step(x, y)
                            .and_then(|(nx, ny)| grid.cell(nx, ny))
                            .is_some_and(|c| c.is_wall);
                        if walled {
                            bits |= toward.bit();
                        }
                    }
                    WallKind::from_bits(bits)
                };
                if let Some(cell) = grid.cell_mut(x, y) {
                    cell.wall_kind = kind;
                }
            }
        }
    }
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
