use undercroft::math::{GridAab, GridCoordinate, planar_distance};
use undercroft::{InvalidDimension, Material, Room};

use crate::DungeonMaterial::*;
use crate::alg::{circular_room, column, fill_area, radial_material_blend, rasterize_line};
use crate::rooms::{
    LootTable, RoomContext, STANDARD, ceiling, corners, floor, floor_region,
};

pub(crate) fn combat_room<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let region = floor_region(&room);
    ctx.speckle(&mut room, region, StoneBrick, CrackedStoneBrick, 0.15);
    ceiling(&mut room, ctx.mat(StoneBrick));

    cover(ctx, &mut room);

    for [x, z] in corners(2, 23) {
        room.buffer_mut().set([x, 1, z], ctx.mat(Torch));
    }

    for [x, z] in corners(5, 20) {
        ctx.spawner(&mut room, [x, 1, z], 1);
    }
    ctx.spawner(&mut room, [13, 1, 13], 2);
    ctx.chest(&mut room, [13, 1, 20], LootTable::Normal);
    Ok(room)
}

/// Scatters a dozen small pieces of cover over the floor: L-shaped and straight
/// stretches of low wall, and two-high cobblestone posts.
fn cover<M: Material>(ctx: &mut RoomContext<'_, M>, room: &mut Room<M>) {
    let wall = ctx.mat(CobblestoneWall);
    let post = ctx.mat(Cobblestone);
    for _ in 0..12 {
        let x = 3 + ctx.below(20);
        let z = 3 + ctx.below(20);
        let buffer = room.buffer_mut();
        match ctx.below(3) {
            0 => {
                for cube in [[x, 1, z], [x + 1, 1, z], [x, 1, z + 1]] {
                    buffer.set(cube, wall);
                }
            }
            1 => column(buffer, x, z, 1, 2, post),
            _ => fill_area(buffer, [x - 1, 1, z], [x + 1, 1, z], wall),
        }
    }
}

pub(crate) fn combat_training_ground<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, _, l] = STANDARD;
    for x in 0..w {
        for z in 0..l {
            let border = x < 2 || z < 2 || x >= w - 2 || z >= l - 2;
            let material = if border { SpruceLog } else { SprucePlanks };
            room.buffer_mut().set([x, 0, z], ctx.mat(material));
        }
    }

    for x in [8, 17] {
        let buffer = room.buffer_mut();
        column(buffer, x, 13, 1, 2, ctx.mat(HayBale));
        buffer.set([x, 3, 13], ctx.mat(Pumpkin));
    }
    for z in [8, 18] {
        fill_area(room.buffer_mut(), [12, 1, z], [14, 2, z], ctx.mat(OakFence));
    }
    for [x, z] in corners(4, 21) {
        room.buffer_mut().set([x, 2, z], ctx.mat(Torch));
    }

    ctx.spawner(&mut room, [13, 1, 4], 1);
    ctx.spawner(&mut room, [13, 1, 21], 1);
    ctx.chest(&mut room, [13, 1, 13], LootTable::Normal);
    Ok(room)
}

/// A sand pit ringed by brick terraces, open to the sky.
pub(crate) fn combat_colosseum<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, _, l] = STANDARD;
    let (cx, cz) = (w / 2, l / 2);
    for x in 0..w {
        for z in 0..l {
            let distance = planar_distance(x - cx, z - cz);
            let buffer = room.buffer_mut();
            if distance <= 10.0 {
                buffer.set([x, 0, z], ctx.mat(Sand));
            } else if distance <= 12.0 {
                buffer.set([x, 0, z], ctx.mat(StoneBrick));
                buffer.set([x, 1, z], ctx.mat(StoneBrickStairs));
            } else {
                column(buffer, x, z, 0, 2, ctx.mat(StoneBrick));
            }
        }
    }
    column(room.buffer_mut(), cx, cz, 1, 4, ctx.mat(IronBlock));

    ctx.spawner(&mut room, [cx - 6, 1, cz], 2);
    ctx.spawner(&mut room, [cx + 6, 1, cz], 2);
    ctx.chest(&mut room, [cx - 3, 1, cz - 3], LootTable::Normal);
    ctx.chest(&mut room, [cx + 3, 1, cz + 3], LootTable::Normal);
    Ok(room)
}

const ARENA_RADIUS: GridCoordinate = 11;

/// A round arena whose floor wears from chiseled brick at the center to cracked brick
/// at the rim, with four diagonal barricades.
pub(crate) fn combat_arena<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let c = STANDARD[0] / 2;
    let radius = f64::from(ARENA_RADIUS);
    circular_room(room.buffer_mut(), c, c, radius, ctx.mat(StoneBrick));
    let gradient = [
        ctx.mat(CrackedStoneBrick),
        ctx.mat(MossyStoneBrick),
        ctx.mat(StoneBrick),
        ctx.mat(ChiseledStoneBrick),
    ];
    radial_material_blend(
        room.buffer_mut(),
        c,
        c,
        0..=0,
        radius,
        &gradient,
        0.3,
        ctx.rng(),
    );

    for (start, end) in [
        ([c - 5, c - 9], [c - 9, c - 5]),
        ([c + 5, c - 9], [c + 9, c - 5]),
        ([c - 9, c + 5], [c - 5, c + 9]),
        ([c + 9, c + 5], [c + 5, c + 9]),
    ] {
        rasterize_line(room.buffer_mut(), start, end, 1, ctx.mat(CobblestoneWall));
    }
    for [x, z] in corners(c - 5, c + 5) {
        room.buffer_mut().set([x, 1, z], ctx.mat(Torch));
    }
    // Keep the entrances on the four axes clear of the ring wall.
    for (dx, dz) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
        let (x, z) = (c + dx * ARENA_RADIUS, c + dz * ARENA_RADIUS);
        room.buffer_mut().fill(
            GridAab::from_corners([x - 1, 1, z - 1], [x + 1, 3, z + 1]),
            &M::air(),
        );
    }

    for (dx, dz) in [(0, -8), (0, 8), (-8, 0), (8, 0)] {
        ctx.spawner(&mut room, [c + dx, 1, c + dz], 2);
    }
    ctx.chest(&mut room, [c, 1, c], LootTable::Normal);
    Ok(room)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity_provider;
    use undercroft::MetadataRecord;

    #[test]
    fn colosseum_terraces() {
        let provider = identity_provider();
        let room = combat_colosseum(&mut RoomContext::new(&provider, 0)).unwrap();
        let b = room.buffer();
        assert_eq!(*b.get([13, 0, 13]), Sand);
        assert_eq!(*b.get([13, 4, 13]), IronBlock);
        assert_eq!(*b.get([13, 1, 2]), StoneBrickStairs);
        assert_eq!(*b.get([0, 2, 0]), StoneBrick);
        assert_eq!(*b.get([0, 3, 0]), Air);
    }

    #[test]
    fn arena_floor_is_blended_inside_the_ring() {
        let provider = identity_provider();
        let room = combat_arena(&mut RoomContext::new(&provider, 9)).unwrap();
        let b = room.buffer();
        // Corners lie outside the circle and stay air.
        assert_eq!(*b.get([0, 0, 0]), Air);
        assert!(matches!(
            b.get([13, 0, 10]),
            CrackedStoneBrick | MossyStoneBrick | StoneBrick | ChiseledStoneBrick
        ));
        assert_eq!(*b.get([13, 2, 2]), Air, "entrance cleared");
        assert_eq!(*b.get([8, 1, 4]), CobblestoneWall);
        let spawners = room
            .records()
            .iter()
            .filter(|r| matches!(r, MetadataRecord::Spawner(_)))
            .count();
        assert_eq!(spawners, 4);
    }

    #[test]
    fn combat_room_spawners() {
        let provider = identity_provider();
        let room = combat_room(&mut RoomContext::new(&provider, 4)).unwrap();
        assert_eq!(room.records().len(), 6);
        assert_eq!(*room.buffer().get([2, 1, 23]), Torch);
    }
}
