//! A* route finding over the open cells of a carved grid

use log::{debug, info};

use crate::grid::Grid;

/// Per-cell search bookkeeping. Predecessors are indices into the flat
/// node pool, so a finished search leaves no linked structure behind: the
/// next search bulk-resets the pool.
#[derive(Debug, Clone, Default)]
struct PathNode {
    from_start: u32,
    to_goal: u32,
    predecessor: Option<usize>,
    in_open: bool,
    settled: bool,
}

impl PathNode {
    fn total(&self) -> u32 {
        self.from_start + self.to_goal
    }
}

/// Shortest-route search with selectable 4- or 8-connectivity.
///
/// The node pool is retained between searches and reset at the start of
/// each call, so one `PathFinder` serves any number of independent queries
/// against the same (or a recreated) grid.
#[derive(Default)]
pub struct PathFinder {
    nodes: Vec<PathNode>,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Octile distance with fixed-point step weights: 10 per orthogonal
    /// step, 14 per diagonal step (integer stand-in for sqrt(2) * 10).
    /// Doubles as the exact cost of a single move between adjacent cells.
    fn distance(a: (usize, usize), b: (usize, usize)) -> u32 {
        let dx = a.0.abs_diff(b.0) as u32;
        let dy = a.1.abs_diff(b.1) as u32;
        dx.min(dy) * 14 + dx.abs_diff(dy) * 10
    }

    /// Runs A* from `start` to `goal` over the open cells of `grid`.
    ///
    /// Neighbour expansion is 4-connected (orthogonal only), or all 8
    /// surrounding cells when `diagonals` is set. Returns the route cells
    /// in start-to-goal order, or `None` when either endpoint is a wall or
    /// no route exists.
    ///
    /// Cells on the returned route get their `on_path` marker set for the
    /// renderer; markers from the previous search are cleared before the
    /// new search begins, whatever its outcome.
    pub fn find_path(
        &mut self,
        grid: &mut Grid,
        start: (usize, usize),
        goal: (usize, usize),
        diagonals: bool,
    ) -> Option<Vec<(usize, usize)>> {
        self.reset(grid);

        let is_open =
            |grid: &Grid, (x, y): (usize, usize)| grid.cell(x, y).is_some_and(|c| !c.is_wall);
        if !is_open(grid, start) || !is_open(grid, goal) {
            return None;
        }

        let start_index = grid.index_of(start.0, start.1);
        let goal_index = grid.index_of(goal.0, goal.1);

        self.nodes[start_index].to_goal = Self::distance(start, goal);
        self.nodes[start_index].in_open = true;
        let mut open = vec![start_index];

        while !open.is_empty() {
            let current_index = Self::take_best(&mut open, &self.nodes);
            self.nodes[current_index].in_open = false;
            self.nodes[current_index].settled = true;

            if current_index == goal_index {
                return Some(self.reconstruct(grid, goal_index));
            }

            let current = {
                let cell = &grid.cells()[current_index];
                (cell.x, cell.y)
            };

            for dy in [-1isize, 0, 1] {
                for dx in [-1isize, 0, 1] {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    if !diagonals && dx != 0 && dy != 0 {
                        continue;
                    }

                    let neighbour = match (
                        current.0.checked_add_signed(dx),
                        current.1.checked_add_signed(dy),
                    ) {
                        (Some(nx), Some(ny)) => (nx, ny),
                        _ => continue,
                    };
                    let Some(cell) = grid.cell(neighbour.0, neighbour.1) else {
                        continue;
                    };
                    let neighbour_index = grid.index_of(neighbour.0, neighbour.1);
                    if cell.is_wall || self.nodes[neighbour_index].settled {
                        continue;
                    }

                    let candidate =
                        self.nodes[current_index].from_start + Self::distance(current, neighbour);
                    let node = &mut self.nodes[neighbour_index];
                    if !node.in_open || candidate < node.from_start {
                        node.from_start = candidate;
                        node.to_goal = Self::distance(neighbour, goal);
                        node.predecessor = Some(current_index);
                        if !node.in_open {
                            node.in_open = true;
                            open.push(neighbour_index);
                        }
                    }
                }
            }
        }

        info!("no route from {:?} to {:?}", start, goal);
        None
    }

    /// Pops the open entry with the lowest total cost; ties go to the node
    /// closer to the goal, which keeps equal-cost routes deterministic.
    fn take_best(open: &mut Vec<usize>, nodes: &[PathNode]) -> usize {
        let mut best = 0;
        for slot in 1..open.len() {
            let candidate = &nodes[open[slot]];
            let current = &nodes[open[best]];
            if candidate.total() < current.total()
                || (candidate.total() == current.total() && candidate.to_goal < current.to_goal)
            {
                best = slot;
            }
        }
        open.swap_remove(best)
    }

    /// Walks predecessor links back from the goal, marking route cells,
    /// and returns the route in start-to-goal order. The start cell has no
    /// predecessor, so it terminates the walk and heads the route.
    fn reconstruct(&self, grid: &mut Grid, goal_index: usize) -> Vec<(usize, usize)> {
        let mut route = Vec::new();
        let mut cursor = Some(goal_index);
        while let Some(index) = cursor {
            let cell = &mut grid.cells_mut()[index];
            cell.on_path = true;
            route.push((cell.x, cell.y));
            cursor = self.nodes[index].predecessor;
        }
        route.reverse();
        debug!("route found: {} cells", route.len());
        route
    }

    /// Bulk-resets costs and predecessor links, and clears the previous
    /// route markers from the grid.
    fn reset(&mut self, grid: &mut Grid) {
        self.nodes.clear();
        self.nodes.resize(grid.cells().len(), PathNode::default());
        for cell in grid.cells_mut() {
            cell.on_path = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MazeGenerator;

    /// 7x7 all-wall grid with one open row, (1,1) through (5,1).
    fn corridor() -> Grid {
        let mut grid = Grid::new();
        grid.resize(7, 7);
        for x in 1..=5 {
            grid.cell_mut(x, 1).unwrap().is_wall = false;
        }
        grid
    }

    /// 5x5 grid with a fully open 3x3 block in the middle.
    fn open_block() -> Grid {
        let mut grid = Grid::new();
        grid.resize(5, 5);
        for y in 1..=3 {
            for x in 1..=3 {
                grid.cell_mut(x, y).unwrap().is_wall = false;
            }
        }
        grid
    }

    fn carved(width: usize, height: usize, seed: u64) -> Grid {
        let mut grid = Grid::new();
        grid.resize(2 * width + 1, 2 * height + 1);
        let mut generator = MazeGenerator::new();
        generator.carve(&mut grid, seed);
        grid
    }

    #[test]
    fn adjacent_cells_give_a_two_cell_route() {
        let mut grid = corridor();
        let route = PathFinder::new()
            .find_path(&mut grid, (1, 1), (2, 1), false)
            .unwrap();
        assert_eq!(route, vec![(1, 1), (2, 1)]);
    }

    #[test]
    fn start_equals_goal_gives_a_single_cell_route() {
        let mut grid = corridor();
        let route = PathFinder::new()
            .find_path(&mut grid, (1, 1), (1, 1), false)
            .unwrap();
        assert_eq!(route, vec![(1, 1)]);
        assert!(grid.cell(1, 1).unwrap().on_path);
    }

    #[test]
    fn route_follows_the_only_corridor() {
        let mut grid = corridor();
        let route = PathFinder::new()
            .find_path(&mut grid, (1, 1), (5, 1), false)
            .unwrap();
        assert_eq!(route, vec![(1, 1), (2, 1), (3, 1), (4, 1), (5, 1)]);
    }

    #[test]
    fn walled_endpoints_give_no_route() {
        let mut grid = corridor();
        let mut finder = PathFinder::new();
        assert!(finder.find_path(&mut grid, (1, 1), (6, 1), false).is_none());
        assert!(finder.find_path(&mut grid, (0, 0), (5, 1), false).is_none());
    }

    #[test]
    fn disconnected_cells_give_no_route() {
        let mut grid = Grid::new();
        grid.resize(5, 5);
        grid.cell_mut(1, 1).unwrap().is_wall = false;
        grid.cell_mut(3, 1).unwrap().is_wall = false;

        let mut finder = PathFinder::new();
        assert!(finder.find_path(&mut grid, (1, 1), (3, 1), false).is_none());
    }

    #[test]
    fn diagonal_shortcut_is_taken_only_when_allowed() {
        let mut grid = open_block();
        let mut finder = PathFinder::new();

        let orthogonal = finder.find_path(&mut grid, (1, 1), (3, 3), false).unwrap();
        assert_eq!(orthogonal.len(), 5);

        let diagonal = finder.find_path(&mut grid, (1, 1), (3, 3), true).unwrap();
        assert_eq!(diagonal, vec![(1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn route_cells_are_open_and_adjacent() {
        let mut grid = carved(5, 4, 3);
        let route = PathFinder::new()
            .find_path(&mut grid, (1, 1), (9, 7), false)
            .unwrap();

        for cell in &route {
            assert!(!grid.cell(cell.0, cell.1).unwrap().is_wall);
        }
        for pair in route.windows(2) {
            let step = pair[0].0.abs_diff(pair[1].0) + pair[0].1.abs_diff(pair[1].1);
            assert_eq!(step, 1);
        }
    }

    #[test]
    fn full_maze_route_with_diagonals() {
        let mut grid = carved(3, 3, 1);
        let route = PathFinder::new()
            .find_path(&mut grid, (1, 1), (5, 5), true)
            .unwrap();

        assert!(!route.is_empty());
        assert_eq!(route.first(), Some(&(1, 1)));
        assert_eq!(route.last(), Some(&(5, 5)));
    }

    #[test]
    fn markers_do_not_leak_between_searches() {
        let mut grid = carved(4, 4, 8);
        let mut finder = PathFinder::new();

        finder.find_path(&mut grid, (1, 1), (7, 7), false).unwrap();
        let second = finder.find_path(&mut grid, (1, 1), (1, 3), false).unwrap();

        for cell in grid.cells() {
            let on_second_route = second.contains(&(cell.x, cell.y));
            assert_eq!(cell.on_path, on_second_route);
        }
    }

    #[test]
    fn failed_search_clears_previous_markers() {
        let mut grid = corridor();
        let mut finder = PathFinder::new();

        finder.find_path(&mut grid, (1, 1), (5, 1), false).unwrap();
        assert!(finder.find_path(&mut grid, (1, 1), (6, 1), false).is_none());

        assert!(grid.cells().iter().all(|c| !c.on_path));
    }
}
