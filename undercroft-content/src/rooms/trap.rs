use undercroft::math::GridCoordinate;
use undercroft::{InvalidDimension, Material, Room};

use crate::DungeonMaterial::*;
use crate::alg::{clear_area, fill_area};
use crate::rooms::{LootTable, RoomContext, STANDARD, ceiling, corners, floor, floor_region};

/// Spawners flank a pressure plate corridor every this many cells.
const TRAP_SPACING: GridCoordinate = 3;

pub(crate) fn trap_room<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    floor(&mut room, ctx.mat(StoneBrick));
    ceiling(&mut room, ctx.mat(StoneBrick));
    fill_area(room.buffer_mut(), [11, 0, 11], [15, 0, 15], ctx.mat(Glowstone));

    // One corridor runs along X; the other is a single plate at the crossing.
    let corridors = [(8..=18, 13, true), (13..=13, 13, false)];
    for (span, across, along_x) in corridors.clone() {
        for i in span {
            let cube = if along_x { [i, 1, across] } else { [across, 1, i] };
            room.buffer_mut().set(cube, ctx.mat(StonePressurePlate));
        }
    }
    let hidden = corners(3, 20);
    for [x, z] in hidden {
        clear_area(room.buffer_mut(), [x, 1, z], [x + 2, 3, z + 2]);
    }

    // The spawners sit under the floor either side of the plates.
    for (span, across, along_x) in corridors {
        let start = *span.start();
        for i in span.filter(|i| (i - start) % TRAP_SPACING == 0) {
            for side in [across - 2, across + 2] {
                let cube = if along_x { [i, 0, side] } else { [side, 0, i] };
                ctx.spawner(&mut room, cube, 1);
            }
        }
    }
    for [x, z] in hidden {
        ctx.spawner(&mut room, [x + 1, 1, z + 1], 2);
    }
    ctx.chest(&mut room, [13, 1, 13], LootTable::Trap);
    Ok(room)
}

pub(crate) fn trap_arrow_corridor<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let region = floor_region(&room);
    ctx.speckle(&mut room, region, StoneBrick, CrackedStoneBrick, 0.2);
    ceiling(&mut room, ctx.mat(StoneBrick));

    for x in [4, 21] {
        fill_area(room.buffer_mut(), [x, 1, 4], [x, 3, 21], ctx.mat(StoneBrick));
        for z in (4..=21).filter(|z| z % 3 == 0) {
            room.buffer_mut().set([x, 2, z], ctx.mat(Dispenser));
        }
    }
    for z in (5..=20).step_by(2) {
        room.buffer_mut().set([13, 1, z], ctx.mat(StonePressurePlate));
    }

    for x in [2, 23] {
        for z in [8, 17] {
            ctx.spawner(&mut room, [x, 1, z], 1);
        }
    }
    ctx.chest(&mut room, [13, 1, 22], LootTable::Trap);
    Ok(room)
}

/// Webbed pits with a spawner waiting in each.
pub(crate) fn trap_pitfall<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let region = floor_region(&room);
    ctx.speckle(&mut room, region, StoneBrick, MossyStoneBrick, 0.3);
    ceiling(&mut room, ctx.mat(StoneBrick));

    let pits = corners(6, 18);
    for [x, z] in pits {
        fill_area(room.buffer_mut(), [x - 1, 0, z - 1], [x + 1, 0, z + 1], ctx.mat(Cobweb));
    }
    for cube in [[13, 1, 4], [13, 1, 21], [4, 1, 13], [21, 1, 13]] {
        room.buffer_mut().set(cube, ctx.mat(RedstoneTorch));
    }

    for [x, z] in pits {
        ctx.spawner(&mut room, [x, 1, z], 1);
    }
    ctx.chest(&mut room, [13, 1, 13], LootTable::Trap);
    Ok(room)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity_provider;
    use undercroft::MetadataRecord;

    #[test]
    fn trap_room_spawners_replace_glowstone() {
        let provider = identity_provider();
        let room = trap_room(&mut RoomContext::new(&provider, 2)).unwrap();
        let b = room.buffer();
        assert_eq!(*b.get([11, 0, 11]), Spawner);
        assert_eq!(*b.get([12, 0, 11]), Glowstone);
        assert_eq!(*b.get([10, 1, 13]), StonePressurePlate);
        // 8 along the corridor, 2 at the crossing, 4 hidden, and the chest.
        assert_eq!(room.records().len(), 15);
        assert!(room.overwritten_records(|r, m| match r {
            MetadataRecord::Spawner(_) => *m == Spawner,
            MetadataRecord::Container(_) => *m == Chest,
        }).next().is_none());
    }

    #[test]
    fn arrow_corridor_dispensers() {
        let provider = identity_provider();
        let room = trap_arrow_corridor(&mut RoomContext::new(&provider, 2)).unwrap();
        let b = room.buffer();
        // z = 6, 9, 12, 15, 18, 21 on each side.
        assert_eq!(b.count(|m| *m == Dispenser), 12);
        assert_eq!(*b.get([4, 2, 5]), StoneBrick);
        assert_eq!(*b.get([13, 1, 7]), StonePressurePlate);
    }
}
