//! Two-dimensional mazes and their conversion into voxels.
//!
//! A [`MazeGrid`] is a coarse plan of a room's floor: each cell is either wall or open.
//! It is produced by one of two generators, [`MazeGrid::backtracker`] (a perfect maze)
//! or [`MazeGrid::recursive_bisection`] (rooms divided by walls with one door each),
//! and then [rasterized](MazeGrid::rasterize) into a [`VoxelBuffer`].

use alloc::boxed::Box;
use alloc::vec;
use core::fmt;

use undercroft::math::{GridAab, GridCoordinate, GridPoint};
use undercroft::{Material, VoxelBuffer};

mod backtrack;
mod bisect;
pub use bisect::*;

/// A rectangular grid of wall and open cells.
///
/// Cells are addressed by `(x, z)`, matching the horizontal axes of the buffer the maze
/// is eventually drawn into.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct MazeGrid {
    width: GridCoordinate,
    length: GridCoordinate,
    /// X-major: index is `x * length + z`. `true` is wall.
    walls: Box<[bool]>,
}

impl MazeGrid {
    /// Constructs a grid where every cell is wall (if `wall`) or open.
    ///
    /// Nonpositive dimensions produce an empty grid.
    pub fn new(width: GridCoordinate, length: GridCoordinate, wall: bool) -> Self {
        let width = width.max(0);
        let length = length.max(0);
        Self {
            width,
            length,
            walls: vec![wall; width as usize * length as usize].into_boxed_slice(),
        }
    }

    /// Size along X.
    pub fn width(&self) -> GridCoordinate {
        self.width
    }

    /// Size along Z.
    pub fn length(&self) -> GridCoordinate {
        self.length
    }

    /// Returns whether `(x, z)` is a cell of this grid.
    pub fn contains(&self, x: GridCoordinate, z: GridCoordinate) -> bool {
        (0..self.width).contains(&x) && (0..self.length).contains(&z)
    }

    fn index(&self, x: GridCoordinate, z: GridCoordinate) -> Option<usize> {
        self.contains(x, z)
            .then(|| x as usize * self.length as usize + z as usize)
    }

    /// Returns whether `(x, z)` is wall. Cells outside the grid count as wall.
    pub fn is_wall(&self, x: GridCoordinate, z: GridCoordinate) -> bool {
        self.index(x, z).is_none_or(|i| self.walls[i])
    }

    /// Sets whether `(x, z)` is wall. Cells outside the grid are ignored.
    pub fn set_wall(&mut self, x: GridCoordinate, z: GridCoordinate, wall: bool) {
        if let Some(i) = self.index(x, z) {
            self.walls[i] = wall;
        }
    }

    /// Iterates over the open cells in X-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + '_ {
        let length = self.length;
        self.walls
            .iter()
            .enumerate()
            .filter(|&(_, &wall)| !wall)
            .map(move |(i, _)| {
                let i = i as GridCoordinate;
                (i / length, i % length)
            })
    }

    /// Draws the maze into `buffer`.
    ///
    /// Each grid cell covers a `pitch × pitch` square of columns, the first with its
    /// corner at `origin`. Every wall cell's square is filled on the layers
    /// `origin.y ..= origin.y + wall_height − 1` with the material `wall` chooses for
    /// each voxel; if it chooses [`None`] the voxel is left alone.
    pub fn rasterize<'m, M: Material + 'm>(
        &self,
        buffer: &mut VoxelBuffer<M>,
        origin: GridPoint,
        pitch: GridCoordinate,
        wall_height: GridCoordinate,
        mut wall: impl FnMut(GridPoint) -> Option<&'m M>,
    ) {
        let pitch = pitch.max(1);
        for x in 0..self.width {
            for z in 0..self.length {
                if !self.is_wall(x, z) {
                    continue;
                }
                let footprint = GridAab::from_lower_size(
                    [origin.x + x * pitch, origin.y, origin.z + z * pitch],
                    [pitch, wall_height.max(0), pitch],
                );
                for cube in footprint.interior_iter() {
                    if let Some(material) = wall(cube) {
                        buffer.set(cube, material);
                    }
                }
            }
        }
    }
}

impl fmt::Debug for MazeGrid {
    /// Draws the grid as text, one row per Z coordinate, `#` for wall and `.` for open.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MazeGrid {}×{}", self.width, self.length)?;
        for z in 0..self.length {
            for x in 0..self.width {
                f.write_str(if self.is_wall(x, z) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
