use alloc::vec::Vec;

use rand::Rng;
use rand::seq::IndexedRandom as _;

use undercroft::math::{Facing, GridCoordinate};

use super::MazeGrid;

impl MazeGrid {
    /// Generates a perfect maze by randomized depth-first search.
    ///
    /// The cells with two even coordinates are the maze's junctions and the cells
    /// between them its passages. Starting from the junction `(0, 0)`, the search
    /// repeatedly moves to a random unvisited junction two cells away, opening it and
    /// the passage in between, and backtracks when none remain. Still being wall is what
    /// marks a junction as unvisited.
    ///
    /// Every junction ends up open, and the open cells form a tree: there is exactly
    /// one path between any two of them.
    pub fn backtracker<R: Rng + ?Sized>(
        width: GridCoordinate,
        length: GridCoordinate,
        rng: &mut R,
    ) -> Self {
        let mut grid = MazeGrid::new(width, length, true);
        if !grid.contains(0, 0) {
            return grid;
        }

        grid.set_wall(0, 0, false);
        let mut stack: Vec<(GridCoordinate, GridCoordinate)> = vec![(0, 0)];
        let mut candidates = Vec::with_capacity(4);
        while let Some(&(x, z)) = stack.last() {
            candidates.clear();
            candidates.extend(Facing::ALL.into_iter().filter_map(|facing| {
                let step = facing.normal_vector();
                let (nx, nz) = (x + step.x * 2, z + step.z * 2);
                (grid.contains(nx, nz) && grid.is_wall(nx, nz)).then_some((nx, nz))
            }));
            match candidates.choose(rng) {
                Some(&(nx, nz)) => {
                    grid.set_wall((x + nx) / 2, (z + nz) / 2, false);
                    grid.set_wall(nx, nz, false);
                    stack.push((nx, nz));
                }
                None => {
                    stack.pop();
                }
            }
        }

        log::trace!(
            "backtracker maze {width}×{length}: {} open cells",
            grid.open_cells().count()
        );
        grid
    }
}
