//! Routines that choose materials cell by cell from a scalar field.

use core::ops::RangeInclusive;

use rand::Rng;

use undercroft::math::{FreeCoordinate, GridAab, GridCoordinate, planar_distance};
use undercroft::{Material, VoxelBuffer};

use crate::alg::{chance, gradient_lookup};

/// Linear falloff from 1 at distance 0 to 0 at `max_radius` and beyond.
#[inline]
pub fn radial_intensity(distance: FreeCoordinate, max_radius: FreeCoordinate) -> FreeCoordinate {
    (1.0 - distance / max_radius).max(0.0)
}

/// Recolors the non-air cells in `layers` that lie within `max_radius` of the column
/// (`center_x`, `center_z`), so that `gradient` runs from its first material at the
/// rim to its last at the center.
///
/// Each cell's pick is perturbed by a uniform random offset of up to `±spread / 2`,
/// which dithers the boundaries between bands. Air is never filled in, so the blend
/// can be applied after the room's shape is finished.
pub fn radial_material_blend<M: Material, R: Rng + ?Sized>(
    buffer: &mut VoxelBuffer<M>,
    center_x: GridCoordinate,
    center_z: GridCoordinate,
    layers: RangeInclusive<GridCoordinate>,
    max_radius: FreeCoordinate,
    gradient: &[&M],
    spread: FreeCoordinate,
    rng: &mut R,
) {
    if gradient.is_empty() {
        return;
    }
    let Some(region) = buffer.bounds().intersection(GridAab::from_corners(
        [0, *layers.start(), 0],
        [buffer.width() - 1, *layers.end(), buffer.length() - 1],
    )) else {
        return;
    };
    for cube in region.interior_iter() {
        let distance = planar_distance(cube.x - center_x, cube.z - center_z);
        if distance > max_radius || buffer.get(cube).is_air() {
            continue;
        }
        let jitter = (rng.random::<FreeCoordinate>() - 0.5) * spread;
        let value = radial_intensity(distance, max_radius) + jitter;
        let material: &M = gradient_lookup::<&M>(gradient, value);
        buffer.set(cube, material);
    }
}

/// Height of the closed-form terrain surface at a column:
/// `base + ⌊(sin(x·frequency) + cos(z·frequency)) · amplitude⌋`.
pub fn terrain_height(
    x: GridCoordinate,
    z: GridCoordinate,
    base: GridCoordinate,
    amplitude: FreeCoordinate,
    frequency: FreeCoordinate,
) -> GridCoordinate {
    let wave = (FreeCoordinate::from(x) * frequency).sin()
        + (FreeCoordinate::from(z) * frequency).cos();
    base + (wave * amplitude).floor() as GridCoordinate
}

/// Shape and materials of a [`height_field`].
#[derive(Debug)]
#[expect(clippy::exhaustive_structs)]
pub struct Terrain<'m, M> {
    /// Height of the surface where the wave term is zero.
    pub base: GridCoordinate,
    #[expect(missing_docs)]
    pub amplitude: FreeCoordinate,
    /// Angular frequency, in radians per cell.
    pub frequency: FreeCoordinate,
    /// Fill of every column.
    pub ground: &'m M,
    /// Occasionally used for the top cell of a column instead of `ground`.
    pub surface: &'m M,
    /// Probability of using `surface` for a column's top cell. Values outside
    /// `0.0..=1.0` are clamped.
    pub surface_chance: f64,
}

// Manual impls because the derives would require `M: Copy`.
impl<M> Clone for Terrain<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<M> Copy for Terrain<'_, M> {}

/// Fills each column of the buffer with ground from the floor up to
/// [`terrain_height`], leaving any cells that are not air as they were.
pub fn height_field<M: Material, R: Rng + ?Sized>(
    buffer: &mut VoxelBuffer<M>,
    terrain: Terrain<'_, M>,
    rng: &mut R,
) {
    for x in 0..buffer.width() {
        for z in 0..buffer.length() {
            let top = terrain_height(x, z, terrain.base, terrain.amplitude, terrain.frequency)
                .min(buffer.height() - 1);
            for y in 0..=top {
                if !buffer.get([x, y, z]).is_air() {
                    continue;
                }
                let material = if y == top && chance(rng, terrain.surface_chance) {
                    terrain.surface
                } else {
                    terrain.ground
                };
                buffer.set([x, y, z], material);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DungeonMaterial::*;
    use crate::alg::{fill_area, tests::buffer};
    use rand::SeedableRng as _;
    use rand_xoshiro::Xoshiro256Plus;
    use rstest::rstest;

    #[test]
    fn intensity_falloff() {
        assert_eq!(radial_intensity(0.0, 10.0), 1.0);
        assert_eq!(radial_intensity(5.0, 10.0), 0.5);
        assert_eq!(radial_intensity(10.0, 10.0), 0.0);
        assert_eq!(radial_intensity(20.0, 10.0), 0.0);
    }

    #[test]
    fn blend_without_spread_is_banded() {
        let mut b = buffer(21, 1, 21);
        fill_area(&mut b, [0, 0, 0], [20, 0, 20], &Stone);
        b.set([10, 0, 12], &Air);
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        radial_material_blend(
            &mut b,
            10,
            10,
            0..=0,
            10.0,
            &[&Netherrack, &Magma, &Lava],
            0.0,
            &mut rng,
        );
        // Center: intensity 1 → last.
        assert_eq!(*b.get([10, 0, 10]), Lava);
        // Distance 5: intensity 0.5 → index 1.
        assert_eq!(*b.get([15, 0, 10]), Magma);
        // Distance 9: intensity 0.1 → first.
        assert_eq!(*b.get([1, 0, 10]), Netherrack);
        // Beyond the radius: untouched.
        assert_eq!(*b.get([0, 0, 0]), Stone);
        // Air stays air.
        assert_eq!(*b.get([10, 0, 12]), Air);
    }

    #[test]
    fn blend_only_recolors_within_radius() {
        let mut b = buffer(16, 3, 16);
        fill_area(&mut b, [0, 0, 0], [15, 0, 15], &Stone);
        let mut rng = Xoshiro256Plus::seed_from_u64(9);
        radial_material_blend(&mut b, 8, 8, 0..=2, 4.0, &[&Obsidian, &Purpur], 0.6, &mut rng);
        for (cube, material) in b.iter() {
            let d = planar_distance(cube.x - 8, cube.z - 8);
            match material {
                Obsidian | Purpur => assert!(cube.y == 0 && d <= 4.0),
                Stone => assert!(cube.y == 0 && d > 4.0),
                Air => assert!(cube.y > 0),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn height_field_columns() {
        let mut b = buffer(12, 8, 12);
        b.set([3, 1, 3], &Glowstone);
        let mut rng = Xoshiro256Plus::seed_from_u64(1);
        let terrain = Terrain {
            base: 3,
            amplitude: 1.5,
            frequency: 0.4,
            ground: &Stone,
            surface: &Gravel,
            surface_chance: 0.25,
        };
        height_field(&mut b, terrain, &mut rng);
        assert_eq!(*b.get([3, 1, 3]), Glowstone, "existing content kept");
        for x in 0..12 {
            for z in 0..12 {
                let top = terrain_height(x, z, 3, 1.5, 0.4);
                for y in 0..8 {
                    let m = *b.get([x, y, z]);
                    if y > top {
                        assert_eq!(m, Air, "above surface at {x} {y} {z}");
                    } else if y < top {
                        assert!(m == Stone || (x, y, z) == (3, 1, 3), "{x} {y} {z}: {m:?}");
                    } else {
                        assert!(m == Stone || m == Gravel);
                    }
                }
            }
        }
        assert!(b.count(|m| *m == Gravel) > 0);
    }

    #[rstest]
    #[case::above_ceiling(40, 5.0, 6 * 4 * 6, 6 * 6)]
    #[case::below_floor(-10, 5.0, 0, 0)]
    #[case::no_surface(40, -1.0, 6 * 4 * 6, 0)]
    fn height_field_beyond_buffer(
        #[case] base: i32,
        #[case] surface_chance: f64,
        #[case] filled: usize,
        #[case] surfaced: usize,
    ) {
        let mut b = buffer(6, 4, 6);
        let terrain = Terrain {
            base,
            amplitude: 2.0,
            frequency: 0.7,
            ground: &Stone,
            surface: &Gravel,
            surface_chance,
        };
        height_field(&mut b, terrain, &mut Xoshiro256Plus::seed_from_u64(4));
        assert_eq!(b.count(|m| *m != Air), filled);
        assert_eq!(b.count(|m| *m == Gravel), surfaced);
        assert!(
            b.iter()
                .filter(|(_, m)| **m == Gravel)
                .all(|(cube, _)| cube.y == 3)
        );
    }
}
