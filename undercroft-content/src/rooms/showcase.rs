use undercroft::math::{GridCoordinate, GridPoint};
use undercroft::{InvalidDimension, Material, Room};

use crate::DungeonMaterial::*;
use crate::alg::{
    DomeStyle, Terrain, column, dome_shell, gear_pattern, height_field, radial_material_blend,
    terrain_height,
};
use crate::rooms::{LootTable, RoomContext, STANDARD, ceiling, corners, floor, ring_distance};

/// The observatory needs headroom for its dome.
const OBSERVATORY: [GridCoordinate; 3] = [26, 14, 26];

/// Height of the first free cell above the ground that [`height_field`] lays at a column.
fn standing_height<M>(
    terrain: &Terrain<'_, M>,
    x: GridCoordinate,
    z: GridCoordinate,
) -> GridCoordinate {
    terrain_height(x, z, terrain.base, terrain.amplitude, terrain.frequency).max(0) + 1
}

/// A natural cavern under a low stone dome, with crystals growing from its uneven floor.
pub(crate) fn crystal_cave<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, h, l] = STANDARD;
    let c = w / 2;

    // The dome's center is sunk below the floor so that its crown just fits.
    let style = DomeStyle {
        primary: ctx.mat(Stone),
        secondary: ctx.mat(Andesite),
        secondary_chance: 0.3,
        star: Some((ctx.mat(Glowstone), 0.05)),
    };
    dome_shell(
        room.buffer_mut(),
        GridPoint::new(c, h - 1 - 12, c),
        12.0,
        style,
        ctx.rng(),
    );
    let terrain = Terrain {
        base: 2,
        amplitude: 1.0,
        frequency: 0.35,
        ground: ctx.mat(Stone),
        surface: ctx.mat(Crystal),
        surface_chance: 0.15,
    };
    height_field(room.buffer_mut(), terrain, ctx.rng());

    for _ in 0..6 {
        let x = 4 + ctx.below(w - 8);
        let z = 4 + ctx.below(l - 8);
        let y = standing_height(&terrain, x, z);
        let top = y + ctx.below(3);
        column(room.buffer_mut(), x, z, y, top, ctx.mat(Crystal));
    }

    for [x, z] in [[6, 6], [19, 19]] {
        let y = standing_height(&terrain, x, z);
        ctx.spawner(&mut room, [x, y, z], 2);
    }
    ctx.chest(&mut room, [c, standing_height(&terrain, c, c), c], LootTable::Treasure);
    Ok(room)
}

/// A workshop whose floor and ceiling are inlaid with meshing gears.
pub(crate) fn clockwork_workshop<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [_, h, _] = STANDARD;
    floor(&mut room, ctx.mat(StoneBrick));
    ceiling(&mut room, ctx.mat(StoneBrick));

    for (x, z, radius, metal) in [
        (7, 7, 5, IronBlock),
        (17, 9, 4, GoldBlock),
        (8, 18, 4, GoldBlock),
        (18, 18, 5, IronBlock),
    ] {
        gear_pattern(room.buffer_mut(), x, z, 0, radius, ctx.mat(metal));
    }
    gear_pattern(room.buffer_mut(), 13, 13, h - 1, 6, ctx.mat(IronBlock));

    // Workbenches along the walls.
    for x in (5..=20).step_by(5) {
        room.buffer_mut().set([x, 1, 1], ctx.mat(CraftingTable));
        room.buffer_mut().set([x, 1, 24], ctx.mat(Dispenser));
    }
    for [x, z] in corners(2, 23) {
        room.buffer_mut().set([x, h - 2, z], ctx.mat(RedstoneLamp));
    }

    ctx.spawner(&mut room, [4, 1, 21], 1);
    ctx.spawner(&mut room, [21, 1, 4], 1);
    ctx.chest(&mut room, [13, 1, 13], LootTable::Normal);
    Ok(room)
}

/// Rough netherrack ground torn open around a pool of lava.
pub(crate) fn nether_breach<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let c = STANDARD[0] / 2;
    floor(&mut room, ctx.mat(Netherrack));
    ceiling(&mut room, ctx.mat(Obsidian));

    let terrain = Terrain {
        base: 1,
        amplitude: 1.5,
        frequency: 0.4,
        ground: ctx.mat(Netherrack),
        surface: ctx.mat(Magma),
        surface_chance: 0.2,
    };
    height_field(room.buffer_mut(), terrain, ctx.rng());
    let gradient = [
        ctx.mat(Netherrack),
        ctx.mat(Magma),
        ctx.mat(Lava),
        ctx.mat(Lava),
    ];
    radial_material_blend(
        room.buffer_mut(),
        c,
        c,
        0..=3,
        8.0,
        &gradient,
        0.3,
        ctx.rng(),
    );

    for [x, z] in corners(4, 21) {
        let y = standing_height(&terrain, x, z);
        ctx.spawner(&mut room, [x, y, z], 2);
    }
    ctx.chest(&mut room, [4, standing_height(&terrain, 4, c), c], LootTable::Normal);
    Ok(room)
}

/// A tall obsidian dome spangled with lights, around a raised purpur dais.
pub(crate) fn void_observatory<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(OBSERVATORY)?;
    let [w, h, _] = OBSERVATORY;
    let c = w / 2;
    floor(&mut room, ctx.mat(Obsidian));

    let style = DomeStyle {
        primary: ctx.mat(Obsidian),
        secondary: ctx.mat(EndStone),
        secondary_chance: 0.25,
        star: Some((ctx.mat(Glowstone), 0.08)),
    };
    dome_shell(
        room.buffer_mut(),
        GridPoint::new(c, 1, c),
        f64::from(h - 2),
        style,
        ctx.rng(),
    );

    for dx in -2..=2 {
        for dz in -2..=2 {
            let material = if ring_distance(dx, dz) == 2 {
                Purpur
            } else {
                EndStone
            };
            room.buffer_mut().set([c + dx, 1, c + dz], ctx.mat(material));
        }
    }

    ctx.spawner(&mut room, [5, 1, c], 2);
    ctx.spawner(&mut room, [w - 5, 1, c], 2);
    ctx.chest(&mut room, [c, 2, c], LootTable::Treasure);
    Ok(room)
}
