//! Straight paths across a horizontal layer.

use core::iter::FusedIterator;

use undercroft::math::GridCoordinate;
use undercroft::{Material, VoxelBuffer};

/// Iterator over the cells of a straight line between two points of a plane, as
/// chosen by Bresenham's algorithm.
///
/// Both endpoints are included, and consecutive cells are adjacent horizontally,
/// vertically or diagonally.
#[derive(Clone, Debug)]
pub struct Bresenham {
    x: GridCoordinate,
    z: GridCoordinate,
    end_x: GridCoordinate,
    end_z: GridCoordinate,
    dx: GridCoordinate,
    dz: GridCoordinate,
    step_x: GridCoordinate,
    step_z: GridCoordinate,
    error: GridCoordinate,
    done: bool,
}

impl Bresenham {
    #[expect(missing_docs)]
    pub fn new(start: [GridCoordinate; 2], end: [GridCoordinate; 2]) -> Self {
        let [x, z] = start;
        let [end_x, end_z] = end;
        let dx = (end_x - x).abs();
        let dz = -(end_z - z).abs();
        Self {
            x,
            z,
            end_x,
            end_z,
            dx,
            dz,
            step_x: if x < end_x { 1 } else { -1 },
            step_z: if z < end_z { 1 } else { -1 },
            error: dx + dz,
            done: false,
        }
    }
}

impl Iterator for Bresenham {
    type Item = [GridCoordinate; 2];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = [self.x, self.z];
        if self.x == self.end_x && self.z == self.end_z {
            self.done = true;
            return Some(current);
        }
        let e2 = 2 * self.error;
        if e2 >= self.dz {
            self.error += self.dz;
            self.x += self.step_x;
        }
        if e2 <= self.dx {
            self.error += self.dx;
            self.z += self.step_z;
        }
        Some(current)
    }
}

impl FusedIterator for Bresenham {}

/// Draws a line of `material` at height `y` from `start` to `end` (both `[x, z]`),
/// writing only into cells that are currently air.
pub fn rasterize_line<M: Material>(
    buffer: &mut VoxelBuffer<M>,
    start: [GridCoordinate; 2],
    end: [GridCoordinate; 2],
    y: GridCoordinate,
    material: &M,
) {
    for [x, z] in Bresenham::new(start, end) {
        let cube = [x, y, z];
        if buffer.get(cube).is_air() {
            buffer.set(cube, material);
        }
    }
}
