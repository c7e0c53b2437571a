//! Round shapes: spirals, rings, gears and domes.

use core::f64::consts::{FRAC_PI_4, PI};

use rand::Rng;

use undercroft::math::{FreeCoordinate, GridCoordinate, GridPoint, planar_distance};
use undercroft::{Material, VoxelBuffer};

use crate::alg::chance;

/// Number of steps in one full turn of [`spiral_staircase`].
const STEPS_PER_TURN: GridCoordinate = 8;
/// Number of steps that share one height in [`spiral_staircase`].
const STEPS_PER_LEVEL: GridCoordinate = 4;

/// Returns the position of step `i` of a spiral staircase.
///
/// Step `i` is at angle `i × 45°` around the center column and at height
/// `start_y + i / 4`, so the stair climbs one level per half turn.
pub fn spiral_step_position(
    center_x: GridCoordinate,
    center_z: GridCoordinate,
    radius: FreeCoordinate,
    start_y: GridCoordinate,
    i: GridCoordinate,
) -> GridPoint {
    let angle = FreeCoordinate::from(i % STEPS_PER_TURN) * FRAC_PI_4;
    GridPoint::new(
        center_x + (radius * angle.cos()).round() as GridCoordinate,
        start_y + i / STEPS_PER_LEVEL,
        center_z + (radius * angle.sin()).round() as GridCoordinate,
    )
}

/// Places `4 × (end_y − start_y)` steps spiralling around the column at
/// (`center_x`, `center_z`), as given by [`spiral_step_position`]. If `railing` is given,
/// it is placed directly above each step.
///
/// Returns the number of steps placed (whether or not they were in bounds).
pub fn spiral_staircase<M: Material>(
    buffer: &mut VoxelBuffer<M>,
    center_x: GridCoordinate,
    center_z: GridCoordinate,
    radius: FreeCoordinate,
    start_y: GridCoordinate,
    end_y: GridCoordinate,
    step: &M,
    railing: Option<&M>,
) -> usize {
    let count = (end_y - start_y).max(0) * STEPS_PER_LEVEL;
    for i in 0..count {
        let position = spiral_step_position(center_x, center_z, radius, start_y, i);
        buffer.set(position, step);
        if let Some(railing) = railing {
            buffer.set(position + GridPoint::new(0, 1, 0).to_vector(), railing);
        }
    }
    count as usize
}

/// Builds a round room filling the whole buffer: a disk of radius `radius + 0.5` on the
/// bottom and top layers, and a one-cell ring wall on every layer between.
pub fn circular_room<M: Material>(
    buffer: &mut VoxelBuffer<M>,
    center_x: GridCoordinate,
    center_z: GridCoordinate,
    radius: FreeCoordinate,
    material: &M,
) {
    let bounds = buffer.bounds();
    let top = buffer.height() - 1;
    for cube in bounds.interior_iter() {
        let distance = planar_distance(cube.x - center_x, cube.z - center_z);
        let solid = if cube.y == 0 || cube.y == top {
            distance <= radius + 0.5
        } else {
            (radius - 0.5..=radius + 0.5).contains(&distance)
        };
        if solid {
            buffer.set(cube, material);
        }
    }
}

/// Draws a horizontal gear: a solid disk out to `radius − 2`, surrounded by a band of
/// teeth out to `radius`. Teeth occupy the even-numbered angular sectors, each sector
/// spanning `π / (2 × radius)` radians, so one tooth and one gap together span
/// `π / radius`.
pub fn gear_pattern<M: Material>(
    buffer: &mut VoxelBuffer<M>,
    center_x: GridCoordinate,
    center_z: GridCoordinate,
    y: GridCoordinate,
    radius: GridCoordinate,
    material: &M,
) {
    let r = FreeCoordinate::from(radius);
    for dx in -radius..=radius {
        for dz in -radius..=radius {
            let distance = planar_distance(dx, dz);
            let solid = if distance <= r - 2.0 {
                true
            } else if distance <= r {
                let angle = FreeCoordinate::from(dz).atan2(FreeCoordinate::from(dx));
                let sector = (angle * (2.0 * r) / PI).floor() as GridCoordinate;
                sector.rem_euclid(2) == 0
            } else {
                false
            };
            if solid {
                buffer.set([center_x + dx, y, center_z + dz], material);
            }
        }
    }
}

/// Appearance of a [`dome_shell`].
#[derive(Debug)]
#[expect(clippy::exhaustive_structs)]
pub struct DomeStyle<'m, M> {
    /// Most of the shell.
    pub primary: &'m M,
    /// Used instead of `primary` with probability `secondary_chance`.
    pub secondary: &'m M,
    /// Probability of using `secondary`. Values outside `0.0..=1.0` are clamped.
    pub secondary_chance: f64,
    /// Decoration hung beneath the shell, and the probability (clamped like
    /// `secondary_chance`) of each shell cell having one.
    pub star: Option<(&'m M, f64)>,
}

// Manual impls because the derives would require `M: Copy`.
impl<M> Clone for DomeStyle<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<M> Copy for DomeStyle<'_, M> {}

/// Draws the upper half of a spherical shell around `center`, covering the cells whose
/// distance from `center` is between `radius − 1.5` and `radius`.
///
/// Each shell cell independently chooses between the style's two materials, and may
/// hang a star on the cell below it when that cell is inside the dome.
pub fn dome_shell<M: Material, R: Rng + ?Sized>(
    buffer: &mut VoxelBuffer<M>,
    center: GridPoint,
    radius: FreeCoordinate,
    style: DomeStyle<'_, M>,
    rng: &mut R,
) {
    let inner = radius - 1.5;
    let extent = radius.ceil() as GridCoordinate;
    let distance = |dx: GridCoordinate, dy: GridCoordinate, dz: GridCoordinate| {
        planar_distance(dx, dz).hypot(FreeCoordinate::from(dy))
    };
    for dx in -extent..=extent {
        for dz in -extent..=extent {
            for dy in 0..=extent {
                let d = distance(dx, dy, dz);
                if !(inner..=radius).contains(&d) {
                    continue;
                }
                let material = if chance(rng, style.secondary_chance) {
                    style.secondary
                } else {
                    style.primary
                };
                let cube = center + GridPoint::new(dx, dy, dz).to_vector();
                buffer.set(cube, material);
                if let Some((star, star_chance)) = style.star {
                    if dy > 0 && distance(dx, dy - 1, dz) < inner && chance(rng, star_chance) {
                        buffer.set(cube - GridPoint::new(0, 1, 0).to_vector(), star);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DungeonMaterial::{self, *};
    use crate::alg::tests::buffer;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng as _;
    use rand_xoshiro::Xoshiro256Plus;
    use rstest::rstest;

    #[rstest]
    #[case(1, 5, 3.0, None)]
    #[case(0, 8, 4.0, Some(&Glowstone))]
    #[case(2, 3, 2.0, Some(&OakFence))]
    fn spiral_step_count(
        #[case] start_y: i32,
        #[case] end_y: i32,
        #[case] radius: f64,
        #[case] railing: Option<&DungeonMaterial>,
    ) {
        let mut b = buffer(16, 12, 16);
        let placed = spiral_staircase(&mut b, 8, 8, radius, start_y, end_y, &Stone, railing);
        let expected = 4 * (end_y - start_y) as usize;
        assert_eq!(placed, expected);
        assert_eq!(b.count(|m| *m == Stone), expected);
        if let Some(railing) = railing {
            assert_eq!(b.count(|m| m == railing), expected);
        }
    }

    #[test]
    fn spiral_angles_and_heights() {
        let positions: Vec<GridPoint> = (0..12)
            .map(|i| spiral_step_position(0, 0, 3.0, 1, i))
            .collect();
        assert_eq!(
            positions[..8].iter().map(|p| (p.x, p.z)).collect::<Vec<_>>(),
            vec![(3, 0), (2, 2), (0, 3), (-2, 2), (-3, 0), (-2, -2), (0, -3), (2, -2)]
        );
        assert_eq!(positions[8], GridPoint::new(3, 3, 0));
        assert!(positions.windows(2).all(|w| w[0].y <= w[1].y));
        assert_eq!(positions[11].y, 1 + 11 / 4);
    }

    #[test]
    fn spiral_with_reversed_range_places_nothing() {
        let mut b = buffer(8, 8, 8);
        assert_eq!(spiral_staircase(&mut b, 4, 4, 2.0, 5, 1, &Stone, None), 0);
        assert_eq!(b.count(|m| *m == Stone), 0);
    }

    #[test]
    fn circular_room_layers() {
        let mut b = buffer(15, 4, 15);
        circular_room(&mut b, 7, 7, 5.0, &Stone);
        // Center column: solid floor and ceiling, open between.
        assert_eq!(*b.get([7, 0, 7]), Stone);
        assert_eq!(*b.get([7, 3, 7]), Stone);
        assert_eq!(*b.get([7, 1, 7]), Air);
        // Wall ring at radius 5.
        assert_eq!(*b.get([12, 1, 7]), Stone);
        assert_eq!(*b.get([7, 2, 2]), Stone);
        // Outside the ring.
        assert_eq!(*b.get([13, 1, 7]), Air);
        assert_eq!(*b.get([0, 0, 0]), Air);
        // Every wall layer is identical.
        let layer = |y: i32| -> Vec<bool> {
            b.iter().filter(|(p, _)| p.y == y).map(|(_, m)| *m == Stone).collect()
        };
        assert_eq!(layer(1), layer(2));
    }

    #[test]
    fn gear_is_idempotent() {
        let mut b = buffer(16, 3, 16);
        gear_pattern(&mut b, 8, 8, 1, 5, &IronBlock);
        let once = b.clone();
        gear_pattern(&mut b, 8, 8, 1, 5, &IronBlock);
        assert_eq!(b, once);
    }

    #[test]
    fn gear_has_solid_hub_and_alternating_teeth() {
        let mut b = buffer(16, 3, 16);
        gear_pattern(&mut b, 8, 8, 1, 5, &IronBlock);
        for dx in -3..=3 {
            for dz in -3..=3 {
                if planar_distance(dx, dz) <= 3.0 {
                    assert_eq!(*b.get([8 + dx, 1, 8 + dz]), IronBlock);
                }
            }
        }
        // Angle 0 lies in sector 0 (a tooth); atan2(2, 4) lies in sector 1 (a gap).
        assert_eq!(*b.get([13, 1, 8]), IronBlock);
        assert_eq!(*b.get([12, 1, 10]), Air);
        assert_eq!(b.count(|m| *m == IronBlock), b.count(|m| !m.is_air()));
        assert!(b.iter().filter(|(_, m)| !m.is_air()).all(|(p, _)| p.y == 1));
    }

    #[test]
    fn dome_shell_distances() {
        let mut b = buffer(21, 12, 21);
        let mut rng = Xoshiro256Plus::seed_from_u64(3);
        let center = GridPoint::new(10, 1, 10);
        let style = DomeStyle {
            primary: &Obsidian,
            secondary: &EndStone,
            secondary_chance: 0.3,
            star: Some((&Glowstone, 0.2)),
        };
        dome_shell(&mut b, center, 8.0, style, &mut rng);

        let mut shell = 0;
        let mut stars = 0;
        for (cube, material) in b.iter() {
            let v = cube - center;
            let d = planar_distance(v.x, v.z).hypot(f64::from(v.y));
            match material {
                Obsidian | EndStone => {
                    shell += 1;
                    assert!(v.y >= 0 && (6.5..=8.0).contains(&d), "{cube:?} at {d}");
                }
                Glowstone => {
                    stars += 1;
                    assert!(d < 6.5, "star {cube:?} not inside dome");
                }
                Air => {}
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(shell > 100, "{shell}");
        assert!(stars > 0);
        assert!(b.count(|m| *m == EndStone) > 0);
    }
}
