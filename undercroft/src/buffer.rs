//! [`VoxelBuffer`], the dense volume a room is built in.

use alloc::boxed::Box;
use alloc::vec;
use core::fmt;

use crate::material::Material;
use crate::math::{GridAab, GridCoordinate, GridPoint, GridVector};

/// A dense box of materials, `width × height × length` cells with its lower corner at
/// the origin.
///
/// Every cell starts out as [air](Material::air). Writes outside the bounds are
/// silently discarded and reads outside the bounds return air, so shape routines may
/// overshoot the edges without any clipping of their own.
///
/// The contents are stored in Z-major order: linearly adjacent elements have adjacent
/// Z coordinates.
#[derive(Clone, Eq, PartialEq)]
pub struct VoxelBuffer<M> {
    bounds: GridAab,
    /// Invariant: `contents.len() == bounds.volume()`.
    contents: Box<[M]>,
    /// Returned by reference for reads outside `bounds`.
    air: M,
}

impl<M: Material> VoxelBuffer<M> {
    /// Constructs a buffer of the given size filled with air.
    ///
    /// Returns [`InvalidDimension`] if any dimension is not positive, or if the volume
    /// would not fit in memory addressing.
    ///
    /// ```
    /// use undercroft::VoxelBuffer;
    /// # #[derive(Clone, Debug, PartialEq)] struct Mat(u8);
    /// # impl undercroft::Material for Mat { fn air() -> Self { Mat(0) } }
    ///
    /// let buffer = VoxelBuffer::<Mat>::new(4, 2, 3).unwrap();
    /// assert_eq!(buffer.count(|m| *m == Mat(0)), 24);
    /// assert!(VoxelBuffer::<Mat>::new(4, 0, 3).is_err());
    /// ```
    pub fn new(
        width: GridCoordinate,
        height: GridCoordinate,
        length: GridCoordinate,
    ) -> Result<Self, InvalidDimension> {
        let error = InvalidDimension {
            size: [width, height, length],
        };
        if width <= 0 || height <= 0 || length <= 0 {
            return Err(error);
        }
        let volume = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .zip(usize::try_from(length).ok())
            .and_then(|((w, h), l)| w.checked_mul(h)?.checked_mul(l))
            .ok_or(error)?;
        let air = M::air();
        Ok(Self {
            bounds: GridAab::from_lower_size([0, 0, 0], [width, height, length]),
            contents: vec![air.clone(); volume].into_boxed_slice(),
            air,
        })
    }

    /// Size along the X axis.
    #[inline]
    pub fn width(&self) -> GridCoordinate {
        self.bounds.size().x
    }

    /// Size along the Y axis.
    #[inline]
    pub fn height(&self) -> GridCoordinate {
        self.bounds.size().y
    }

    /// Size along the Z axis.
    #[inline]
    pub fn length(&self) -> GridCoordinate {
        self.bounds.size().z
    }

    /// `[width, height, length]` as a vector.
    #[inline]
    pub fn size(&self) -> GridVector {
        self.bounds.size()
    }

    /// The box of valid coordinates.
    #[inline]
    pub fn bounds(&self) -> GridAab {
        self.bounds
    }

    /// Returns whether `cube` is a cell of this buffer.
    #[inline]
    pub fn in_bounds(&self, cube: impl Into<GridPoint>) -> bool {
        self.bounds.contains_cube(cube)
    }

    #[inline(always)]
    fn index(&self, cube: GridPoint) -> Option<usize> {
        if !self.bounds.contains_cube(cube) {
            return None;
        }
        let size = self.bounds.size();
        // Non-negative and in range after the bounds check.
        let (x, y, z) = (cube.x as usize, cube.y as usize, cube.z as usize);
        Some((x * size.y as usize + y) * size.z as usize + z)
    }

    /// Returns the material at `cube`, or air if `cube` is out of bounds.
    #[inline]
    pub fn get(&self, cube: impl Into<GridPoint>) -> &M {
        match self.index(cube.into()) {
            Some(index) => &self.contents[index],
            None => &self.air,
        }
    }

    /// Writes `material` at `cube` if it is in bounds; otherwise does nothing.
    ///
    /// Returns whether the write took effect.
    #[inline]
    pub fn set(&mut self, cube: impl Into<GridPoint>, material: &M) -> bool {
        match self.index(cube.into()) {
            Some(index) => {
                self.contents[index].clone_from(material);
                true
            }
            None => false,
        }
    }

    /// Writes `material` at every cell of `region` that is in bounds.
    pub fn fill(&mut self, region: GridAab, material: &M) {
        if let Some(region) = region.intersection(self.bounds) {
            for cube in region.interior_iter() {
                self.set(cube, material);
            }
        }
    }

    /// Iterates over every cell and its material in Z-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPoint, &M)> + '_ {
        self.bounds.interior_iter().zip(self.contents.iter())
    }

    /// Counts the cells whose material satisfies `predicate`.
    pub fn count(&self, mut predicate: impl FnMut(&M) -> bool) -> usize {
        self.contents.iter().filter(|m| predicate(m)).count()
    }

    /// Returns the contents in Z-major order, with the same indexing as [`Self::iter`].
    #[inline]
    pub fn as_linear(&self) -> &[M] {
        &self.contents
    }
}

impl<M: fmt::Debug> fmt::Debug for VoxelBuffer<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The contents are usually too large to be useful to print.
        f.debug_struct("VoxelBuffer")
            .field("bounds", &self.bounds)
            .field("air", &self.air)
            .finish_non_exhaustive()
    }
}

/// Error from [`VoxelBuffer::new`] when a requested size is unusable.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, thiserror::Error)]
#[error("invalid voxel buffer dimensions {size:?}; each must be positive")]
pub struct InvalidDimension {
    size: [GridCoordinate; 3],
}

impl InvalidDimension {
    /// The `[width, height, length]` that was requested.
    pub fn size(&self) -> [GridCoordinate; 3] {
        self.size
    }
}
