//! Shape routines used by the room templates.
//!
//! They are gathered in this module to encourage noting similarities rather than writing
//! near-duplicate code. Every routine writes through [`VoxelBuffer::set`] and relies on
//! it to discard writes outside the buffer, so none of them clip their own shapes.

use rand::Rng;

use undercroft::math::{Facing, GridAab, GridCoordinate, GridPoint};
use undercroft::{Material, VoxelBuffer};

mod curve;
pub use curve::*;
mod field;
pub use field::*;
mod line;
pub use line::*;

/// Sets every cell in the box spanned by the two inclusive corners, given in any order.
pub fn fill_area<M: Material>(
    buffer: &mut VoxelBuffer<M>,
    a: impl Into<GridPoint>,
    b: impl Into<GridPoint>,
    material: &M,
) {
    buffer.fill(GridAab::from_corners(a, b), material);
}

/// Sets every cell in the box spanned by the two inclusive corners to air.
pub fn clear_area<M: Material>(
    buffer: &mut VoxelBuffer<M>,
    a: impl Into<GridPoint>,
    b: impl Into<GridPoint>,
) {
    fill_area(buffer, a, b, &M::air());
}

/// Sets the six faces of the box spanned by the two inclusive corners, leaving its
/// interior untouched.
pub fn hollow_box<M: Material>(
    buffer: &mut VoxelBuffer<M>,
    a: impl Into<GridPoint>,
    b: impl Into<GridPoint>,
    material: &M,
) {
    let aab = GridAab::from_corners(a, b);
    let lo = aab.lower_bounds();
    let hi = aab.upper_bounds() - GridPoint::new(1, 1, 1).to_vector();
    for (a, b) in [
        ([lo.x, lo.y, lo.z], [hi.x, lo.y, hi.z]), // floor
        ([lo.x, hi.y, lo.z], [hi.x, hi.y, hi.z]), // ceiling
        ([lo.x, lo.y, lo.z], [lo.x, hi.y, hi.z]),
        ([hi.x, lo.y, lo.z], [hi.x, hi.y, hi.z]),
        ([lo.x, lo.y, lo.z], [hi.x, hi.y, lo.z]),
        ([lo.x, lo.y, hi.z], [hi.x, hi.y, hi.z]),
    ] {
        fill_area(buffer, a, b, material);
    }
}

/// Sets a vertical run of cells from `y_bottom` to `y_top` inclusive.
pub fn column<M: Material>(
    buffer: &mut VoxelBuffer<M>,
    x: GridCoordinate,
    z: GridCoordinate,
    y_bottom: GridCoordinate,
    y_top: GridCoordinate,
    material: &M,
) {
    fill_area(buffer, [x, y_bottom, z], [x, y_top, z], material);
}

/// Computes the cell `lateral` cells to the side of and `vertical` cells above `base`,
/// as seen when facing `facing`.
///
/// Facing north or south moves along X (with opposite signs), and facing east or west
/// moves along Z.
#[inline]
pub fn directional_offset(
    base: GridPoint,
    facing: Facing,
    lateral: GridCoordinate,
    vertical: GridCoordinate,
) -> GridPoint {
    facing.offset(base, lateral, vertical)
}

/// Draws an arch `width` cells wide and `height` cells tall, standing in the plane
/// perpendicular to `facing`, with its lower left corner (as seen facing that way) at
/// `base`.
///
/// Every row below the top two is solid. The row second from the top is solid only at
/// its two edge columns, and the top row only at its interior columns, which rounds
/// off the corners of the lintel.
pub fn arch<M: Material>(
    buffer: &mut VoxelBuffer<M>,
    base: GridPoint,
    facing: Facing,
    width: GridCoordinate,
    height: GridCoordinate,
    material: &M,
) {
    for row in 0..height {
        for col in 0..width {
            let edge = col == 0 || col == width - 1;
            let solid = if row == height - 1 {
                !edge
            } else if row == height - 2 {
                edge
            } else {
                true
            };
            if solid {
                buffer.set(directional_offset(base, facing, col, row), material);
            }
        }
    }
}

/// Picks the element of `gradient` that `value` (nominally in `0.0..=1.0`) falls into,
/// clamping values outside that range to the first or last element.
///
/// Panics if `gradient` is empty.
pub fn gradient_lookup<T>(gradient: &[T], value: f64) -> &T {
    &gradient[((value * gradient.len() as f64) as usize).clamp(0, gradient.len() - 1)]
}

/// Returns true with the given probability. Probabilities above 1 always succeed, and
/// those below 0 or NaN never do.
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    let probability = if probability >= 1.0 {
        1.0
    } else if probability > 0.0 {
        probability
    } else {
        0.0
    };
    rng.random_bool(probability)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::DungeonMaterial::{self, *};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng as _;
    use rand_xoshiro::Xoshiro256Plus;
    use rstest::rstest;
    use undercroft::math::GridVector;

    pub(crate) fn buffer(w: i32, h: i32, l: i32) -> VoxelBuffer<DungeonMaterial> {
        VoxelBuffer::new(w, h, l).unwrap()
    }

    #[test]
    fn fill_area_floor_scenario() {
        let mut b = buffer(10, 5, 10);
        fill_area(&mut b, [0, 0, 0], [4, 0, 4], &Stone);
        assert_eq!(b.count(|m| *m == Stone), 25);
        assert_eq!(b.count(|m| *m == Air), 500 - 25);
        assert!(
            b.iter()
                .filter(|(_, m)| **m == Stone)
                .all(|(p, _)| p.y == 0 && p.x <= 4 && p.z <= 4)
        );
    }

    #[test]
    fn fill_and_clear_accept_any_corner_order() {
        let mut b = buffer(6, 6, 6);
        fill_area(&mut b, [4, 3, 1], [1, 0, 4], &Stone);
        assert_eq!(b.count(|m| *m == Stone), 4 * 4 * 4);
        clear_area(&mut b, [2, 3, 2], [1, 2, 1]);
        assert_eq!(b.count(|m| *m == Stone), 4 * 4 * 4 - 8);
    }

    #[test]
    fn overshooting_fill_only_touches_valid_cells() {
        let mut b = buffer(4, 4, 4);
        fill_area(&mut b, [-10, -10, -10], [1, 1, 1], &Stone);
        assert_eq!(b.count(|m| *m == Stone), 8);
    }

    #[test]
    fn extreme_corners_are_clipped() {
        let (min, max) = (i32::MIN, i32::MAX);
        let mut b = buffer(4, 4, 4);
        fill_area(&mut b, [0, 0, 0], [max, 0, 0], &Stone);
        assert_eq!(b.count(|m| *m == Stone), 4);
        fill_area(&mut b, [min, 3, min], [max, max, max], &Glowstone);
        assert_eq!(b.count(|m| *m == Glowstone), 16);
        clear_area(&mut b, [min, min, min], [max, max, max]);
        assert_eq!(b.count(|m| *m == Air), 64);
        // Only the floor face reaches the buffer.
        hollow_box(&mut b, [min, 0, min], [max, max, max], &Stone);
        assert_eq!(b.count(|m| *m == Stone), 16);
        assert!(b.iter().filter(|(_, m)| **m == Stone).all(|(p, _)| p.y == 0));
    }

    /// Draws a shape into a buffer, with every X and Z coordinate displaced by the
    /// second argument.
    type Draw = fn(&mut VoxelBuffer<DungeonMaterial>, GridCoordinate);

    /// Each shape overhangs an 8×6×8 buffer. Drawing it again into a wider buffer,
    /// displaced so that nothing falls off the sides, must agree on every cell the
    /// small buffer has.
    #[rstest]
    #[case::hollow_box(|b: &mut VoxelBuffer<DungeonMaterial>, s: GridCoordinate| {
        hollow_box(b, [s - 3, -2, s - 3], [s + 4, 8, s + 10], &Stone);
    })]
    #[case::arch(|b: &mut VoxelBuffer<DungeonMaterial>, s: GridCoordinate| {
        arch(b, GridPoint::new(s + 5, 2, s + 4), Facing::North, 6, 6, &Stone);
    })]
    #[case::spiral_staircase(|b: &mut VoxelBuffer<DungeonMaterial>, s: GridCoordinate| {
        spiral_staircase(b, s - 1, s + 7, 3.0, 2, 9, &Stone, Some(&Glowstone));
    })]
    #[case::circular_room(|b: &mut VoxelBuffer<DungeonMaterial>, s: GridCoordinate| {
        circular_room(b, s + 7, s + 1, 4.0, &Stone);
    })]
    #[case::gear_pattern(|b: &mut VoxelBuffer<DungeonMaterial>, s: GridCoordinate| {
        gear_pattern(b, s - 2, s + 3, 1, 5, &Stone);
    })]
    #[case::dome_shell(|b: &mut VoxelBuffer<DungeonMaterial>, s: GridCoordinate| {
        let style = DomeStyle {
            primary: &Stone,
            secondary: &Glowstone,
            secondary_chance: 0.3,
            star: Some((&GoldBlock, 0.5)),
        };
        let rng = &mut Xoshiro256Plus::seed_from_u64(3);
        dome_shell(b, GridPoint::new(s + 6, -1, s + 6), 4.0, style, rng);
    })]
    #[case::rasterize_line(|b: &mut VoxelBuffer<DungeonMaterial>, s: GridCoordinate| {
        rasterize_line(b, [s - 5, s + 2], [s + 12, s + 6], 1, &Stone);
    })]
    #[case::radial_material_blend(|b: &mut VoxelBuffer<DungeonMaterial>, s: GridCoordinate| {
        fill_area(b, [-100, 0, -100], [100, 0, 100], &Stone);
        let rng = &mut Xoshiro256Plus::seed_from_u64(0);
        radial_material_blend(b, s - 2, s + 3, 0..=0, 6.0, &[&Netherrack, &Magma], 0.0, rng);
    })]
    fn primitives_clip_at_buffer_edges(#[case] draw: Draw) {
        const SHIFT: GridCoordinate = 16;
        let mut small = buffer(8, 6, 8);
        draw(&mut small, 0);
        let mut large = buffer(8 + 2 * SHIFT, 6, 8 + 2 * SHIFT);
        draw(&mut large, SHIFT);

        let shift = GridVector::new(SHIFT, 0, SHIFT);
        for (cube, material) in small.iter() {
            assert_eq!(material, large.get(cube + shift), "at {cube:?}");
        }
        let drawn = small.count(|m| *m != Air);
        assert!(drawn > 0, "nothing drawn in bounds");
        assert!(
            large.count(|m| *m != Air) > drawn,
            "shape does not overhang the small buffer"
        );
    }

    #[rstest]
    #[case(-0.5, false)]
    #[case(0.0, false)]
    #[case(f64::NAN, false)]
    #[case(1.0, true)]
    #[case(3.0, true)]
    fn chance_out_of_range(#[case] probability: f64, #[case] expected: bool) {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        for _ in 0..100 {
            assert_eq!(chance(&mut rng, probability), expected);
        }
    }

    #[rstest]
    #[case([1, 1, 1], [6, 5, 7])]
    #[case([6, 5, 7], [1, 1, 1])]
    #[case([2, 2, 2], [3, 3, 3])]
    #[case([0, 0, 0], [0, 4, 4])]
    fn hollow_box_faces_and_interior(#[case] a: [i32; 3], #[case] c: [i32; 3]) {
        let mut b = buffer(8, 8, 8);
        // Pre-existing interior content must survive.
        fill_area(&mut b, [0, 0, 0], [7, 7, 7], &Glowstone);
        hollow_box(&mut b, a, c, &Stone);
        let aab = GridAab::from_corners(a, c);
        let lo = aab.lower_bounds();
        let hi = aab.upper_bounds() - GridVector::new(1, 1, 1);
        for (cube, material) in b.iter() {
            let on_face = aab.contains_cube(cube)
                && (cube.x == lo.x
                    || cube.x == hi.x
                    || cube.y == lo.y
                    || cube.y == hi.y
                    || cube.z == lo.z
                    || cube.z == hi.z);
            let expected = if on_face { Stone } else { Glowstone };
            assert_eq!(*material, expected, "at {cube:?}");
        }
    }

    #[test]
    fn arch_shape() {
        let mut b = buffer(8, 6, 8);
        arch(&mut b, GridPoint::new(1, 1, 3), Facing::North, 5, 4, &Stone);
        let row = |y: i32| -> String {
            (1..6)
                .map(|x| if *b.get([x, y, 3]) == Stone { '#' } else { '.' })
                .collect()
        };
        assert_eq!(
            [row(4), row(3), row(2), row(1)],
            [".###.", "#...#", "#####", "#####"].map(String::from)
        );
        assert_eq!(b.count(|m| *m == Stone), 5 + 5 + 2 + 3);
    }

    #[test]
    fn arch_follows_facing() {
        let mut b = buffer(8, 6, 8);
        arch(&mut b, GridPoint::new(2, 0, 1), Facing::East, 3, 3, &Stone);
        // East-facing arches run along +Z.
        assert!(b.iter().filter(|(_, m)| **m == Stone).all(|(p, _)| p.x == 2));
        assert_eq!(*b.get([2, 0, 3]), Stone);
        assert_eq!(*b.get([2, 2, 2]), Stone);
        assert_eq!(*b.get([2, 2, 1]), Air);
    }

    #[test]
    fn gradient_lookup_cases() {
        let gradient = [0, 1, 2, 3];
        let inputs_and_output_indices = [
            (-f64::INFINITY, 0),
            (-0.1, 0),
            (0.0, 0),
            (0.24, 0),
            (0.25, 1),
            (0.5, 2),
            (0.9, 3),
            (1.0, 3),
            (10.0, 3),
            (f64::NAN, 0),
        ];
        assert_eq!(
            inputs_and_output_indices.map(|(i, _)| *gradient_lookup(&gradient, i)),
            inputs_and_output_indices.map(|(_, o)| o),
        );
    }
}
