//! Axis-aligned boxes of cubes.

use core::fmt;
use core::iter::FusedIterator;
use core::ops::Range;

use crate::math::{GridCoordinate, GridPoint, GridVector, sort_two};

/// An axis-aligned box with integer coordinates, whose volume is a set of whole cubes.
///
/// The lower bounds are inclusive and the upper bounds exclusive, so a box whose
/// size is zero along any axis contains no cubes. Shape routines usually describe
/// boxes by two inclusive corners instead; see [`GridAab::from_corners`].
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridAab {
    lower_bounds: GridPoint,
    upper_bounds: GridPoint,
}

impl GridAab {
    /// The box containing no cubes, positioned at the origin.
    pub const ORIGIN_EMPTY: GridAab = GridAab {
        lower_bounds: GridPoint::new(0, 0, 0),
        upper_bounds: GridPoint::new(0, 0, 0),
    };

    /// Constructs a [`GridAab`] from inclusive lower bounds and exclusive upper bounds.
    ///
    /// If any upper bound is less than the corresponding lower bound, it is raised to
    /// equal it, producing an empty box.
    #[inline]
    pub fn from_lower_upper(
        lower_bounds: impl Into<GridPoint>,
        upper_bounds: impl Into<GridPoint>,
    ) -> Self {
        let lower_bounds = lower_bounds.into();
        let upper_bounds = upper_bounds.into().max(lower_bounds);
        Self {
            lower_bounds,
            upper_bounds,
        }
    }

    /// Constructs a [`GridAab`] from inclusive lower bounds and a size.
    #[inline]
    pub fn from_lower_size(lower_bounds: impl Into<GridPoint>, size: impl Into<GridVector>) -> Self {
        let lower_bounds = lower_bounds.into();
        Self::from_lower_upper(lower_bounds, lower_bounds + size.into())
    }

    /// Constructs the smallest [`GridAab`] containing both of the given cubes.
    ///
    /// The corners may be given in any order; this is how the fill and clear routines
    /// interpret their coordinates.
    ///
    /// The exclusive upper bound saturates, so a corner at [`GridCoordinate::MAX`]
    /// behaves like one at `GridCoordinate::MAX - 1`. No buffer reaches that far.
    ///
    /// ```
    /// use undercroft::math::{GridAab, GridPoint};
    ///
    /// let aab = GridAab::from_corners([4, 0, 1], [0, 2, 3]);
    /// assert_eq!(aab.lower_bounds(), GridPoint::new(0, 0, 1));
    /// assert_eq!(aab.upper_bounds(), GridPoint::new(5, 3, 4));
    /// assert_eq!(aab.volume(), 5 * 3 * 3);
    /// ```
    pub fn from_corners(a: impl Into<GridPoint>, b: impl Into<GridPoint>) -> Self {
        let a = a.into();
        let b = b.into();
        let (x0, x1) = sort_two(a.x, b.x);
        let (y0, y1) = sort_two(a.y, b.y);
        let (z0, z1) = sort_two(a.z, b.z);
        Self {
            lower_bounds: GridPoint::new(x0, y0, z0),
            upper_bounds: GridPoint::new(
                x1.saturating_add(1),
                y1.saturating_add(1),
                z1.saturating_add(1),
            ),
        }
    }

    /// Inclusive lower bounds on cube coordinates.
    #[inline]
    pub fn lower_bounds(&self) -> GridPoint {
        self.lower_bounds
    }

    /// Exclusive upper bounds on cube coordinates.
    #[inline]
    pub fn upper_bounds(&self) -> GridPoint {
        self.upper_bounds
    }

    /// Size of the box in each axis; equivalent to `self.upper_bounds() - self.lower_bounds()`.
    #[inline]
    pub fn size(&self) -> GridVector {
        self.upper_bounds - self.lower_bounds
    }

    /// The number of cubes this box contains.
    #[inline]
    pub fn volume(&self) -> usize {
        let size = self.size();
        size.x as usize * size.y as usize * size.z as usize
    }

    /// Whether the box contains no cubes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x_range().is_empty() || self.y_range().is_empty() || self.z_range().is_empty()
    }

    /// The range of X coordinates of the contained cubes.
    #[inline]
    pub fn x_range(&self) -> Range<GridCoordinate> {
        self.lower_bounds.x..self.upper_bounds.x
    }

    /// The range of Y coordinates of the contained cubes.
    #[inline]
    pub fn y_range(&self) -> Range<GridCoordinate> {
        self.lower_bounds.y..self.upper_bounds.y
    }

    /// The range of Z coordinates of the contained cubes.
    #[inline]
    pub fn z_range(&self) -> Range<GridCoordinate> {
        self.lower_bounds.z..self.upper_bounds.z
    }

    /// Returns whether the box includes the given cube.
    #[inline]
    pub fn contains_cube(&self, cube: impl Into<GridPoint>) -> bool {
        let cube = cube.into();
        self.x_range().contains(&cube.x)
            && self.y_range().contains(&cube.y)
            && self.z_range().contains(&cube.z)
    }

    /// Returns the intersection of `self` and `other`, or [`None`] if it contains no cubes.
    #[must_use]
    pub fn intersection(self, other: GridAab) -> Option<GridAab> {
        let lower = self.lower_bounds.max(other.lower_bounds);
        let upper = self.upper_bounds.min(other.upper_bounds);
        let result = GridAab::from_lower_upper(lower, upper);
        (!result.is_empty()).then_some(result)
    }

    /// Displaces the box by the given offset.
    #[must_use]
    #[inline]
    pub fn translate(self, offset: impl Into<GridVector>) -> Self {
        let offset = offset.into();
        Self {
            lower_bounds: self.lower_bounds + offset,
            upper_bounds: self.upper_bounds + offset,
        }
    }

    /// Iterates over every cube in the box, in X-major order (Z varies fastest).
    ///
    /// ```
    /// use undercroft::math::{GridAab, GridPoint};
    ///
    /// let cubes: Vec<GridPoint> = GridAab::from_corners([0, 0, 0], [1, 0, 1])
    ///     .interior_iter()
    ///     .collect();
    /// assert_eq!(cubes, vec![
    ///     GridPoint::new(0, 0, 0),
    ///     GridPoint::new(0, 0, 1),
    ///     GridPoint::new(1, 0, 0),
    ///     GridPoint::new(1, 0, 1),
    /// ]);
    /// ```
    pub fn interior_iter(self) -> GridIter {
        GridIter::new(self)
    }
}

impl fmt::Debug for GridAab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = self.lower_bounds;
        let u = self.upper_bounds;
        write!(
            f,
            "GridAab({:?}..{:?}, {:?}..{:?}, {:?}..{:?})",
            l.x, u.x, l.y, u.y, l.z, u.z
        )
    }
}

/// Iterator produced by [`GridAab::interior_iter`].
#[derive(Clone, Debug)]
pub struct GridIter {
    bounds: GridAab,
    /// The cube that will be yielded next, or one whose X is out of range if done.
    cube: GridPoint,
}

impl GridIter {
    fn new(bounds: GridAab) -> Self {
        Self {
            bounds,
            cube: if bounds.is_empty() {
                // Already exhausted.
                GridPoint::new(bounds.upper_bounds.x, 0, 0)
            } else {
                bounds.lower_bounds
            },
        }
    }
}

impl Iterator for GridIter {
    type Item = GridPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cube.x >= self.bounds.upper_bounds.x {
            return None;
        }
        let result = self.cube;
        self.cube.z += 1;
        if self.cube.z >= self.bounds.upper_bounds.z {
            self.cube.z = self.bounds.lower_bounds.z;
            self.cube.y += 1;
            if self.cube.y >= self.bounds.upper_bounds.y {
                self.cube.y = self.bounds.lower_bounds.y;
                self.cube.x += 1;
            }
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.cube.x >= self.bounds.upper_bounds.x {
            0
        } else {
            let size = self.bounds.size();
            let (sy, sz) = (size.y as usize, size.z as usize);
            let rel = self.cube - self.bounds.lower_bounds;
            let done = (rel.x as usize * sy + rel.y as usize) * sz + rel.z as usize;
            self.bounds.volume() - done
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter {}
impl FusedIterator for GridIter {}
