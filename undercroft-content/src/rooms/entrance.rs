use undercroft::math::{Facing, GridCoordinate, GridPoint};
use undercroft::{InvalidDimension, Material, Room};

use crate::DungeonMaterial::*;
use crate::alg::{arch, column, directional_offset, hollow_box};
use crate::rooms::{
    LootTable, RoomContext, STANDARD, ceiling, corners, floor, floor_region, pillar,
};

pub(crate) fn entrance_room<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    floor(&mut room, ctx.mat(Stone));
    ceiling(&mut room, ctx.mat(StoneBrick));
    for [x, z] in corners(5, 20) {
        column(room.buffer_mut(), x, z, 1, 4, ctx.mat(StoneBrick));
    }
    for cube in [[13, 2, 2], [13, 2, 23], [2, 2, 13], [23, 2, 13]] {
        room.buffer_mut().set(cube, ctx.mat(Torch));
    }

    ctx.chest(&mut room, [13, 1, 13], LootTable::Entrance);
    Ok(room)
}

/// An entrance hall long fallen into ruin.
pub(crate) fn entrance_ruins<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, h, l] = STANDARD;
    let region = floor_region(&room);
    ctx.speckle(&mut room, region, CrackedStoneBrick, MossyStoneBrick, 0.4);
    ceiling(&mut room, ctx.mat(CrackedStoneBrick));

    for [x, z] in [[6, 6], [19, 6], [6, 19]] {
        ruined_pillar(ctx, &mut room, x, z);
    }
    column(room.buffer_mut(), 19, 19, 1, 5, ctx.mat(CrackedStoneBrick));
    for _ in 0..8 {
        let x = 1 + ctx.below(w - 2);
        let z = 1 + ctx.below(l - 2);
        room.buffer_mut().set([x, h - 2, z], ctx.mat(Vine));
    }
    room.buffer_mut().set([13, 2, 5], ctx.mat(Torch));
    room.buffer_mut().set([13, 2, 20], ctx.mat(Torch));

    ctx.chest(&mut room, [13, 1, 13], LootTable::Entrance);
    Ok(room)
}

/// A broken-off pillar one to three cells tall, with rubble possibly fallen beside it.
fn ruined_pillar<M: Material>(
    ctx: &mut RoomContext<'_, M>,
    room: &mut Room<M>,
    x: GridCoordinate,
    z: GridCoordinate,
) {
    let rubble = ctx.mat(CrackedStoneBrick);
    let height = 1 + ctx.below(3);
    column(room.buffer_mut(), x, z, 1, height, rubble);
    if ctx.chance(0.5) {
        room.buffer_mut().set([x + 1, 1, z], rubble);
    }
    if ctx.chance(0.5) {
        room.buffer_mut().set([x, 1, z + 1], rubble);
    }
}

pub(crate) fn entrance_temple<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, _, l] = STANDARD;
    for x in 0..w {
        for z in 0..l {
            let material = if (x + z) % 5 == 0 {
                ChiseledSandstone
            } else {
                SmoothSandstone
            };
            room.buffer_mut().set([x, 0, z], ctx.mat(material));
        }
    }
    ceiling(&mut room, ctx.mat(SmoothSandstone));

    for [x, z] in corners(6, 19) {
        pillar(&mut room, x, z, 4, ctx.mat(SmoothSandstone), ctx.mat(Torch));
    }
    // Carved panel over the far door.
    room.buffer_mut().set([13, 4, 2], ctx.mat(ChiseledSandstone));
    room.buffer_mut().set([12, 4, 2], ctx.mat(SandstoneStairs));
    room.buffer_mut().set([14, 4, 2], ctx.mat(SandstoneStairs));
    for [x, z] in corners(3, 22) {
        room.buffer_mut().set([x, 1, z], ctx.mat(RedstoneTorch));
    }

    ctx.chest(&mut room, [13, 1, 13], LootTable::Entrance);
    Ok(room)
}

/// Lower left corner (seen from inside) of the doorway in each wall of a standard room.
pub(crate) const DOORWAYS: [(Facing, [GridCoordinate; 3]); 4] = [
    (Facing::North, [11, 1, 0]),
    (Facing::East, [25, 1, 11]),
    (Facing::South, [15, 1, 25]),
    (Facing::West, [0, 1, 15]),
];
const DOOR_WIDTH: GridCoordinate = 5;
const DOOR_HEIGHT: GridCoordinate = 6;

/// Frames a doorway with an arch standing at `base` and clears the opening inside it,
/// cutting through whatever wall was there.
pub(crate) fn gateway<M: Material>(room: &mut Room<M>, facing: Facing, base: GridPoint, frame: &M) {
    let buffer = room.buffer_mut();
    arch(buffer, base, facing, DOOR_WIDTH, DOOR_HEIGHT, frame);
    for col in 1..DOOR_WIDTH - 1 {
        for row in 0..DOOR_HEIGHT - 1 {
            buffer.set(directional_offset(base, facing, col, row), &M::air());
        }
    }
}

/// A walled room with an arched doorway in the middle of every wall.
pub(crate) fn exit_room<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, h, l] = STANDARD;
    hollow_box(room.buffer_mut(), [0, 0, 0], [w - 1, h - 1, l - 1], ctx.mat(StoneBrick));

    for (facing, base) in DOORWAYS {
        gateway(&mut room, facing, base.into(), ctx.mat(ChiseledStoneBrick));
    }
    for [x, z] in corners(2, 23) {
        room.buffer_mut().set([x, 2, z], ctx.mat(Torch));
    }

    ctx.chest(&mut room, [13, 1, 13], LootTable::Entrance);
    Ok(room)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity_provider;

    #[test]
    fn exit_room_doorways() {
        let provider = identity_provider();
        let room = exit_room(&mut RoomContext::new(&provider, 0)).unwrap();
        let b = room.buffer();
        // North doorway: opening, jambs, lintel.
        assert_eq!(*b.get([13, 2, 0]), Air);
        assert_eq!(*b.get([13, 5, 0]), Air);
        assert_eq!(*b.get([11, 2, 0]), ChiseledStoneBrick);
        assert_eq!(*b.get([13, 6, 0]), ChiseledStoneBrick);
        assert_eq!(*b.get([11, 6, 0]), StoneBrick);
        // East and west doorways run along Z.
        assert_eq!(*b.get([25, 1, 13]), Air);
        assert_eq!(*b.get([25, 1, 15]), ChiseledStoneBrick);
        assert_eq!(*b.get([0, 3, 12]), Air);
        assert_eq!(*b.get([0, 3, 11]), ChiseledStoneBrick);
        // Solid wall away from the doors.
        assert_eq!(*b.get([0, 3, 5]), StoneBrick);
        assert_eq!(*b.get([5, 7, 5]), StoneBrick);
    }

    #[test]
    fn ruins_pillars_are_short() {
        let provider = identity_provider();
        for seed in 0..5 {
            let room = entrance_ruins(&mut RoomContext::new(&provider, seed)).unwrap();
            let b = room.buffer();
            assert_eq!(*b.get([6, 4, 6]), Air);
            assert_eq!(*b.get([6, 1, 6]), CrackedStoneBrick);
            assert_eq!(*b.get([19, 5, 19]), CrackedStoneBrick);
        }
    }
}
