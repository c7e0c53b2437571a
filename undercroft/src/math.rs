//! Coordinate types and small geometric helpers shared by buffers and generators.

use euclid::{Point3D, Vector3D};

mod facing;
pub use facing::*;
mod grid_aab;
pub use grid_aab::*;

/// Unit marker for [`euclid`] types whose coordinates count voxels of a [`VoxelBuffer`].
///
/// [`VoxelBuffer`]: crate::VoxelBuffer
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(clippy::exhaustive_enums)]
pub enum Voxel {}

/// Coordinates that are locked to the voxel grid.
pub type GridCoordinate = i32;

/// Positions that are locked to the voxel grid.
pub type GridPoint = Point3D<GridCoordinate, Voxel>;

/// Vectors that are locked to the voxel grid.
pub type GridVector = Vector3D<GridCoordinate, Voxel>;

/// Coordinates that are not locked to the voxel grid, used for distance computations.
///
/// Because `GridCoordinate = i32` and `FreeCoordinate = f64`, the infallible conversion
/// `From<GridCoordinate> for FreeCoordinate` exists, which is often convenient.
pub type FreeCoordinate = f64;

/// Euclidean distance between two columns, ignoring the Y axis.
#[inline]
pub fn planar_distance(dx: GridCoordinate, dz: GridCoordinate) -> FreeCoordinate {
    FreeCoordinate::from(dx).hypot(FreeCoordinate::from(dz))
}

/// Euclidean length of a grid vector.
#[inline]
pub fn grid_distance(v: GridVector) -> FreeCoordinate {
    let sq = i64::from(v.x).pow(2) + i64::from(v.y).pow(2) + i64::from(v.z).pow(2);
    (sq as FreeCoordinate).sqrt()
}

/// Sort two numbers into ascending order.
#[inline]
pub(crate) fn sort_two(a: GridCoordinate, b: GridCoordinate) -> (GridCoordinate, GridCoordinate) {
    if a <= b { (a, b) } else { (b, a) }
}
