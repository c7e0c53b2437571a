//! Horizontal directions: the [`Facing`] type.
//! Reexported from [`crate::math`].

use core::fmt;

use crate::math::{GridCoordinate, GridPoint, GridVector};

/// One of the four horizontal directions a room feature can face.
///
/// North is −Z and east is +X, so that rotating clockwise when viewed from above
/// (looking down −Y) proceeds North → East → South → West.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_enums)]
#[repr(u8)]
pub enum Facing {
    /// Toward −Z.
    North = 0,
    /// Toward +X.
    East = 1,
    /// Toward +Z.
    South = 2,
    /// Toward −X.
    West = 3,
}

impl Facing {
    /// All four facings, in clockwise order starting from [`Facing::North`].
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the facing pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Returns the facing a quarter turn clockwise (viewed from above) from this one.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Returns the unit vector pointing in this direction.
    #[inline]
    pub const fn normal_vector(self) -> GridVector {
        match self {
            Self::North => GridVector::new(0, 0, -1),
            Self::East => GridVector::new(1, 0, 0),
            Self::South => GridVector::new(0, 0, 1),
            Self::West => GridVector::new(-1, 0, 0),
        }
    }

    /// Returns the unit vector pointing to the right of someone facing this way.
    ///
    /// This is the axis along which a feature facing this way is laid out sideways:
    /// facing north or south it is ±X, facing east or west it is ±Z.
    #[inline]
    pub const fn lateral_vector(self) -> GridVector {
        self.clockwise().normal_vector()
    }

    /// Offsets `base` sideways by `lateral` cells and upward by `vertical` cells, relative
    /// to this facing.
    ///
    /// ```
    /// use undercroft::math::{Facing, GridPoint};
    ///
    /// let base = GridPoint::new(10, 2, 10);
    /// assert_eq!(Facing::North.offset(base, 3, 1), GridPoint::new(13, 3, 10));
    /// assert_eq!(Facing::South.offset(base, 3, 1), GridPoint::new(7, 3, 10));
    /// assert_eq!(Facing::East.offset(base, 3, 0), GridPoint::new(10, 2, 13));
    /// ```
    #[inline]
    #[must_use]
    pub fn offset(
        self,
        base: GridPoint,
        lateral: GridCoordinate,
        vertical: GridCoordinate,
    ) -> GridPoint {
        base + self.lateral_vector() * lateral + GridVector::new(0, vertical, 0)
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exhaust::Exhaust as _;

    #[test]
    fn all_matches_exhaust() {
        assert_eq!(Facing::exhaust().collect::<Vec<_>>(), Facing::ALL.to_vec());
    }

    #[test]
    fn rotation_consistency() {
        for facing in Facing::ALL {
            assert_eq!(facing.clockwise().clockwise(), facing.opposite());
            assert_eq!(facing.opposite().opposite(), facing);
            assert_eq!(facing.normal_vector(), -facing.opposite().normal_vector());
            assert_eq!(
                facing.normal_vector().dot(facing.lateral_vector()),
                0,
                "{facing} lateral not perpendicular"
            );
        }
    }

    #[test]
    fn offsets_swap_sign_per_axis() {
        let base = GridPoint::new(5, 0, 5);
        assert_eq!(Facing::North.offset(base, 2, 0), GridPoint::new(7, 0, 5));
        assert_eq!(Facing::South.offset(base, 2, 0), GridPoint::new(3, 0, 5));
        assert_eq!(Facing::East.offset(base, 2, 0), GridPoint::new(5, 0, 7));
        assert_eq!(Facing::West.offset(base, 2, 4), GridPoint::new(5, 4, 3));
    }
}
