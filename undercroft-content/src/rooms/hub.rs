use undercroft::math::GridCoordinate;
use undercroft::{InvalidDimension, Material, Room};

use crate::DungeonMaterial::*;
use crate::alg::{column, fill_area, rasterize_line};
use crate::rooms::entrance::{DOORWAYS, gateway};
use crate::rooms::{
    LootTable, RoomContext, STANDARD, ceiling, corners, floor, floor_region, pillar,
    ring_distance,
};

pub(crate) fn fountain_room<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let c = STANDARD[0] / 2;
    floor(&mut room, ctx.mat(Stone));
    ceiling(&mut room, ctx.mat(StoneBrick));

    // Basin: a rim of stairs around a pool, with a spouting quartz column in the middle.
    for dx in -3..=3 {
        for dz in -3..=3 {
            let buffer = room.buffer_mut();
            match ring_distance(dx, dz) {
                3 => buffer.set([c + dx, 1, c + dz], ctx.mat(StoneBrickStairs)),
                1 | 2 => buffer.set([c + dx, 0, c + dz], ctx.mat(Water)),
                _ => false,
            };
        }
    }
    column(room.buffer_mut(), c, c, 1, 3, ctx.mat(QuartzBlock));
    room.buffer_mut().set([c, 4, c], ctx.mat(Water));
    for [x, z] in corners(5, 20) {
        room.buffer_mut().set([x, 1, z], ctx.mat(FlowerPot));
    }

    ctx.chest(&mut room, [5, 1, c], LootTable::Hub);
    ctx.chest(&mut room, [20, 1, c], LootTable::Hub);
    Ok(room)
}

/// A campsite around a fire, with two tents.
pub(crate) fn hub_camp<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let c = STANDARD[0] / 2;
    let region = floor_region(&room);
    ctx.speckle(&mut room, region, Dirt, Grass, 0.3);

    room.buffer_mut().set([c, 0, c], ctx.mat(Netherrack));
    room.buffer_mut().set([c, 1, c], ctx.mat(Fire));
    for [x, z] in corners(c - 2, c + 2) {
        room.buffer_mut().set([x, 1, z], ctx.mat(OakLog));
    }
    for corner in [6, 18] {
        tent(&mut room, corner, corner, ctx.mat(WhiteWool));
    }

    // Supplies are kept inside the tents.
    ctx.chest(&mut room, [7, 1, 7], LootTable::Hub);
    ctx.chest(&mut room, [19, 1, 19], LootTable::Hub);
    Ok(room)
}

/// A 2×2 tent, sloping from a full lower course to a single peak cell.
fn tent<M: Material>(room: &mut Room<M>, x: GridCoordinate, z: GridCoordinate, cloth: &M) {
    let buffer = room.buffer_mut();
    fill_area(buffer, [x, 1, z], [x + 1, 1, z + 1], cloth);
    fill_area(buffer, [x, 2, z], [x + 1, 2, z], cloth);
    buffer.set([x, 3, z], cloth);
}

pub(crate) fn hub_library<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let c = STANDARD[0] / 2;
    floor(&mut room, ctx.mat(OakPlanks));
    ceiling(&mut room, ctx.mat(DarkOakPlanks));

    // Rows of shelves with an aisle down the middle.
    for z in [4, 9, 14, 19] {
        for (x0, x1) in [(3, c - 2), (c + 2, 22)] {
            fill_area(room.buffer_mut(), [x0, 1, z], [x1, 3, z], ctx.mat(Bookshelf));
        }
    }
    room.buffer_mut().set([c, 1, c], ctx.mat(EnchantingTable));
    for x in [c - 3, c + 3] {
        room.buffer_mut().set([x, 1, c], ctx.mat(OakFence));
        room.buffer_mut().set([x, 2, c], ctx.mat(WoodenPressurePlate));
    }
    for x in [6, 19] {
        for z in [2, 23] {
            room.buffer_mut().set([x, 3, z], ctx.mat(Torch));
        }
    }

    ctx.chest(&mut room, [3, 1, c], LootTable::Hub);
    Ok(room)
}

/// A formal hall: a carpet runs between two colonnades, and every wall has a
/// quartz gateway.
pub(crate) fn hub_grand_foyer<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, _, l] = STANDARD;
    let c = w / 2;
    for x in 0..w {
        for z in 0..l {
            let border = x < 2 || z < 2 || x >= w - 2 || z >= l - 2;
            let material = if border {
                ChiseledStoneBrick
            } else {
                QuartzBlock
            };
            room.buffer_mut().set([x, 0, z], ctx.mat(material));
        }
    }
    ceiling(&mut room, ctx.mat(StoneBrick));

    for (facing, base) in DOORWAYS {
        gateway(&mut room, facing, base.into(), ctx.mat(QuartzBlock));
    }
    for x in [6, 19] {
        for z in [5, 10, 15, 20] {
            pillar(&mut room, x, z, 5, ctx.mat(QuartzPillar), ctx.mat(Glowstone));
        }
    }
    rasterize_line(room.buffer_mut(), [c, 1], [c, l - 2], 1, ctx.mat(RedCarpet));

    ctx.chest(&mut room, [c, 1, l - 6], LootTable::Hub);
    Ok(room)
}
