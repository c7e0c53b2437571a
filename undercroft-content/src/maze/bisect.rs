use alloc::vec::Vec;

use rand::Rng;

use undercroft::math::GridCoordinate;

use super::MazeGrid;

/// Half the side of the square kept open at the center of a bisection maze.
const HUB_RADIUS: GridCoordinate = 2;

/// A rectangle of maze cells: `[x, z]` of the first cell and the size along each axis.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct MazeRegion {
    #[expect(missing_docs)]
    pub x: GridCoordinate,
    #[expect(missing_docs)]
    pub z: GridCoordinate,
    #[expect(missing_docs)]
    pub width: GridCoordinate,
    #[expect(missing_docs)]
    pub length: GridCoordinate,
}

/// Which way a [`WallSegment`] runs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_enums)]
pub enum WallAxis {
    /// The wall has constant Z and runs along X.
    AlongX,
    /// The wall has constant X and runs along Z.
    AlongZ,
}

/// One dividing wall placed by [`bisect_region`], with its door.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WallSegment {
    start: (GridCoordinate, GridCoordinate),
    len: GridCoordinate,
    axis: WallAxis,
    door: (GridCoordinate, GridCoordinate),
}

impl WallSegment {
    #[expect(missing_docs)]
    pub fn axis(&self) -> WallAxis {
        self.axis
    }

    /// The one cell of the wall left open.
    pub fn door(&self) -> (GridCoordinate, GridCoordinate) {
        self.door
    }

    /// Every cell of the wall, door included.
    pub fn cells(&self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + use<> {
        let (x, z) = self.start;
        let axis = self.axis;
        (0..self.len).map(move |i| match axis {
            WallAxis::AlongX => (x + i, z),
            WallAxis::AlongZ => (x, z + i),
        })
    }
}

/// A maze made by [`MazeGrid::recursive_bisection`], together with the walls that
/// divided it.
#[derive(Clone, Debug)]
#[expect(clippy::exhaustive_structs)]
pub struct Bisection {
    #[expect(missing_docs)]
    pub grid: MazeGrid,
    /// Dividing walls in the order they were placed. The outer border is not included.
    pub segments: Vec<WallSegment>,
}

impl MazeGrid {
    /// Generates a maze by recursive division.
    ///
    /// The border of the grid is wall. Its interior is split by a wall with a single
    /// door, then each side is split again, until the pieces are less than four cells
    /// across. Finally the 5×5 block at the center is cleared so that the middle of
    /// the room is always open.
    ///
    /// Unlike [`MazeGrid::backtracker`], the result may contain loops, and a door may be
    /// blocked if a later wall meets it end-on.
    pub fn recursive_bisection<R: Rng + ?Sized>(
        width: GridCoordinate,
        length: GridCoordinate,
        rng: &mut R,
    ) -> Bisection {
        let mut grid = MazeGrid::new(width, length, false);
        for x in 0..grid.width {
            grid.set_wall(x, 0, true);
            grid.set_wall(x, grid.length - 1, true);
        }
        for z in 0..grid.length {
            grid.set_wall(0, z, true);
            grid.set_wall(grid.width - 1, z, true);
        }

        let interior = MazeRegion {
            x: 1,
            z: 1,
            width: grid.width - 2,
            length: grid.length - 2,
        };
        let segments = bisect_region(&mut grid, interior, rng);

        let (cx, cz) = (grid.width / 2, grid.length / 2);
        for x in cx - HUB_RADIUS..=cx + HUB_RADIUS {
            for z in cz - HUB_RADIUS..=cz + HUB_RADIUS {
                grid.set_wall(x, z, false);
            }
        }

        log::trace!(
            "bisection maze {width}×{length}: {} walls, {} open cells",
            segments.len(),
            grid.open_cells().count()
        );
        Bisection { grid, segments }
    }
}

/// Recursively divides `region` of `grid` with walls, each pierced by one door, and
/// returns the walls placed.
///
/// A region narrower than four cells on either axis is left alone. Otherwise the wall
/// runs across the region's shorter dimension, at least two cells in from the
/// starting edge.
pub fn bisect_region<R: Rng + ?Sized>(
    grid: &mut MazeGrid,
    region: MazeRegion,
    rng: &mut R,
) -> Vec<WallSegment> {
    let mut segments = Vec::new();
    let mut pending = vec![region];
    while let Some(MazeRegion {
        x,
        z,
        width,
        length,
    }) = pending.pop()
    {
        if width < 4 || length < 4 {
            continue;
        }
        let segment = if width < length {
            let wall_z = z + 2 + rng.random_range(0..(length - 3).max(1));
            let door = (x + rng.random_range(0..width), wall_z);
            pending.push(MazeRegion {
                x,
                z: wall_z + 1,
                width,
                length: length - (wall_z - z) - 1,
            });
            pending.push(MazeRegion {
                x,
                z,
                width,
                length: wall_z - z,
            });
            WallSegment {
                start: (x, wall_z),
                len: width,
                axis: WallAxis::AlongX,
                door,
            }
        } else {
            let wall_x = x + 2 + rng.random_range(0..(width - 3).max(1));
            let door = (wall_x, z + rng.random_range(0..length));
            pending.push(MazeRegion {
                x: wall_x + 1,
                z,
                width: width - (wall_x - x) - 1,
                length,
            });
            pending.push(MazeRegion {
                x,
                z,
                width: wall_x - x,
                length,
            });
            WallSegment {
                start: (wall_x, z),
                len: length,
                axis: WallAxis::AlongZ,
                door,
            }
        };
        for (cx, cz) in segment.cells() {
            grid.set_wall(cx, cz, true);
        }
        grid.set_wall(segment.door.0, segment.door.1, false);
        segments.push(segment);
    }
    segments
}
