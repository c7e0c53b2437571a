use core::f64::consts::FRAC_PI_4;

use undercroft::math::{FreeCoordinate, GridCoordinate, planar_distance};
use undercroft::{InvalidDimension, Material, Room};

use crate::DungeonMaterial::*;
use crate::alg::column;
use crate::rooms::{
    BOSS, LootTable, MINI_BOSS, RoomContext, ceiling, corners, pillar, ring_distance,
};

pub(crate) fn boss_arena<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(BOSS)?;
    let [size, height, _] = BOSS;
    let center = size / 2;

    // Checkerboard of 3×3 tiles.
    for x in 0..size {
        for z in 0..size {
            let tile = if (x / 3 + z / 3) % 2 == 0 {
                BarrierAnchor
            } else {
                Andesite
            };
            room.buffer_mut().set([x, 0, z], ctx.mat(tile));
        }
    }
    ceiling(&mut room, ctx.mat(BarrierAnchor));

    for [x, z] in corners(8, size - 9) {
        for (dx, dz) in [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
            column(
                room.buffer_mut(),
                x + dx,
                z + dz,
                1,
                height - 3,
                ctx.mat(BarrierAnchor),
            );
        }
        room.buffer_mut().set([x, height - 2, z], ctx.mat(Glowstone));
    }

    // Altar: rings of obsidian, purpur and end stone around the temporal barrier.
    for dx in -3..=3 {
        for dz in -3..=3 {
            let material = match ring_distance(dx, dz) {
                3 => Obsidian,
                2 => Purpur,
                _ => EndStone,
            };
            room.buffer_mut()
                .set([center + dx, 1, center + dz], ctx.mat(material));
        }
    }
    room.buffer_mut()
        .set([center, 2, center], ctx.mat(TemporalBarrier));

    wall_torches(&mut room, ctx.mat(RedstoneTorch), size, height);

    ctx.chest(&mut room, [center - 5, 1, center], LootTable::Boss);
    ctx.chest(&mut room, [center + 5, 1, center], LootTable::Boss);
    Ok(room)
}

/// Redstone torches every six cells along all four walls, halfway up.
fn wall_torches<M: Material>(
    room: &mut Room<M>,
    torch: &M,
    size: GridCoordinate,
    height: GridCoordinate,
) {
    let buffer = room.buffer_mut();
    for i in (8..size - 8).step_by(6) {
        for cube in [
            [i, height / 2, 2],
            [i, height / 2, size - 3],
            [2, height / 2, i],
            [size - 3, height / 2, i],
        ] {
            buffer.set(cube, torch);
        }
    }
}

pub(crate) fn mini_boss_arena<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(MINI_BOSS)?;
    let [size, height, _] = MINI_BOSS;
    let c = size / 2;

    for x in 0..size {
        for z in 0..size {
            let distance = planar_distance(x - c, z - c);
            let material = if distance > 14.0 {
                ctx.mat(Stone)
            } else if (distance as GridCoordinate) % 4 == 0 {
                ctx.mat(ChiseledStoneBrick)
            } else {
                ctx.either(0.1, CrackedStoneBrick, StoneBrick)
            };
            room.buffer_mut().set([x, 0, z], material);
        }
    }
    ceiling(&mut room, ctx.mat(StoneBrick));

    for [x, z] in corners(8, size - 9) {
        pillar(&mut room, x, z, height - 3, ctx.mat(StoneBrick), ctx.mat(Torch));
    }

    // Raised platform in the middle, with a chiseled rim.
    for dx in -2..=2 {
        for dz in -2..=2 {
            let material = if ring_distance(dx, dz) == 2 {
                ChiseledStoneBrick
            } else {
                StoneBrick
            };
            room.buffer_mut().set([c + dx, 1, c + dz], ctx.mat(material));
        }
    }

    for k in 0..8 {
        let angle = FreeCoordinate::from(k) * FRAC_PI_4;
        let x = c + (10.0 * angle.cos()).round() as GridCoordinate;
        let z = c + (10.0 * angle.sin()).round() as GridCoordinate;
        room.buffer_mut().set([x, 1, z], ctx.mat(Torch));
    }

    ctx.mini_boss_spawner(&mut room, [c - 4, 1, c]);
    ctx.mini_boss_spawner(&mut room, [c + 4, 1, c]);
    ctx.chest(&mut room, [c, 1, c + 6], LootTable::Treasure);
    Ok(room)
}

/// A darker variant of [`mini_boss_arena`] set in the nether.
pub(crate) fn mini_boss_arena_dark<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(MINI_BOSS)?;
    let [size, height, _] = MINI_BOSS;
    let c = size / 2;

    for x in 0..size {
        for z in 0..size {
            let distance = planar_distance(x - c, z - c);
            let material = if distance > 13.0 {
                ctx.mat(Obsidian)
            } else if distance > 3.0 {
                ctx.either(0.08, Magma, NetherBrick)
            } else {
                ctx.mat(NetherBrick)
            };
            room.buffer_mut().set([x, 0, z], material);
        }
    }
    ceiling(&mut room, ctx.mat(NetherBrick));

    for [x, z] in corners(7, size - 8) {
        room.buffer_mut().set([x, 0, z], ctx.mat(Netherrack));
        pillar(&mut room, x, z, height - 3, ctx.mat(NetherBrick), ctx.mat(Fire));
    }

    ctx.mini_boss_spawner(&mut room, [c - 5, 1, c - 3]);
    ctx.mini_boss_spawner(&mut room, [c + 5, 1, c + 3]);
    ctx.chest(&mut room, [c, 1, c], LootTable::Treasure);
    Ok(room)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::Script;
    use crate::{DungeonMaterial, identity_provider};
    use undercroft::MetadataRecord;

    #[test]
    fn boss_arena_altar_and_pillars() {
        let provider = identity_provider();
        let room = boss_arena(&mut RoomContext::new(&provider, 1)).unwrap();
        let b = room.buffer();
        assert_eq!(*b.get([18, 2, 18]), TemporalBarrier);
        assert_eq!(*b.get([15, 1, 18]), Obsidian);
        assert_eq!(*b.get([16, 1, 17]), Purpur);
        assert_eq!(*b.get([18, 1, 19]), EndStone);
        assert_eq!(*b.get([8, 14, 8]), Glowstone);
        assert_eq!(*b.get([9, 13, 8]), BarrierAnchor);
        assert_eq!(*b.get([9, 13, 9]), Air);
        assert_eq!(b.count(|m| *m == RedstoneTorch), 16);
        assert_eq!(room.records().len(), 2);
    }

    #[test]
    fn mini_boss_arenas_have_two_self_destructing_spawners() {
        let provider = identity_provider();
        let scripts: [Script<DungeonMaterial>; 2] = [mini_boss_arena, mini_boss_arena_dark];
        for script in scripts {
            let room = script(&mut RoomContext::new(&provider, 5)).unwrap();
            let spawners: Vec<_> = room
                .records()
                .iter()
                .filter_map(|r| match r {
                    MetadataRecord::Spawner(s) => Some(s),
                    MetadataRecord::Container(_) => None,
                })
                .collect();
            assert_eq!(spawners.len(), 2);
            assert!(
                spawners
                    .iter()
                    .all(|s| s.entries()[0].overrides().destroys_spawner)
            );
        }
    }
}
