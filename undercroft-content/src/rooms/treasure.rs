use core::f64::consts::{FRAC_PI_2, TAU};

use itertools::iproduct;

use undercroft::math::{FreeCoordinate, GridCoordinate, planar_distance};
use undercroft::{InvalidDimension, Material, Room};

use crate::DungeonMaterial::*;
use crate::alg::{circular_room, fill_area, radial_material_blend, rasterize_line};
use crate::rooms::{
    LootTable, RoomContext, STANDARD, ceiling, corners, floor, pillar, ring_distance,
};

pub(crate) fn treasure_room<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, _, l] = STANDARD;
    let (cx, cz) = (w / 2, l / 2);
    for x in 0..w {
        for z in 0..l {
            let to_edge = x.min(z).min(w - 1 - x).min(l - 1 - z);
            let material = if to_edge < 2 { GoldBlock } else { Stone };
            room.buffer_mut().set([x, 0, z], ctx.mat(material));
        }
    }
    ceiling(&mut room, ctx.mat(StoneBrick));

    for dx in -2..=2 {
        for dz in -2..=2 {
            if ring_distance(dx, dz) == 2 {
                room.buffer_mut()
                    .set([cx + dx, 1, cz + dz], ctx.mat(QuartzBlock));
            }
        }
    }
    room.buffer_mut().set([cx, 1, cz], ctx.mat(QuartzPillar));
    for [x, z] in corners(5, 20) {
        pillar(&mut room, x, z, 3, ctx.mat(GoldBlock), ctx.mat(Torch));
    }

    ctx.spawner(&mut room, [cx, 0, 5], 2);
    ctx.spawner(&mut room, [cx, 0, 20], 2);
    ctx.chest(&mut room, [cx, 2, cz], LootTable::Treasure);
    ctx.chest(&mut room, [cx - 2, 1, cz], LootTable::Treasure);
    ctx.chest(&mut room, [cx + 2, 1, cz], LootTable::Treasure);
    Ok(room)
}

pub(crate) fn treasure_vault<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, _, l] = STANDARD;
    for x in 0..w {
        for z in 0..l {
            let material = if (x + z) % 4 < 2 { IronBlock } else { Stone };
            room.buffer_mut().set([x, 0, z], ctx.mat(material));
        }
    }
    ceiling(&mut room, ctx.mat(StoneBrick));

    let shelves: Vec<[GridCoordinate; 2]> = [6, 12, 18]
        .into_iter()
        .flat_map(|z| [5, 10, 15, 20].map(|x| [x, z]))
        .collect();
    for &[x, z] in &shelves {
        room.buffer_mut().set([x, 1, z], ctx.mat(IronBlock));
    }
    for [x, z] in corners(4, 21) {
        room.buffer_mut().set([x, 1, z], ctx.mat(RedstoneLamp));
    }

    ctx.spawner(&mut room, [3, 1, 13], 2);
    ctx.spawner(&mut room, [22, 1, 13], 2);
    for [x, z] in shelves {
        ctx.chest(&mut room, [x, 2, z], LootTable::Treasure);
    }
    Ok(room)
}

/// A throne room: a carpet leading to a golden throne between quartz columns.
pub(crate) fn treasure_royal<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    floor(&mut room, ctx.mat(StoneBrick));
    ceiling(&mut room, ctx.mat(StoneBrick));

    fill_area(room.buffer_mut(), [12, 1, 2], [13, 1, 23], ctx.mat(RedCarpet));
    room.buffer_mut().set([13, 1, 21], ctx.mat(QuartzStairs));
    fill_area(room.buffer_mut(), [13, 2, 22], [13, 3, 22], ctx.mat(GoldBlock));
    for [x, z] in [[5, 8], [20, 8], [5, 16], [20, 16]] {
        pillar(&mut room, x, z, 4, ctx.mat(QuartzPillar), ctx.mat(Torch));
    }

    ctx.spawner(&mut room, [7, 1, 4], 2);
    ctx.spawner(&mut room, [18, 1, 4], 2);
    ctx.chest(&mut room, [10, 1, 20], LootTable::Treasure);
    ctx.chest(&mut room, [16, 1, 20], LootTable::Treasure);
    Ok(room)
}

/// A sunken prismarine hall: the treasure sits on an island inside a ring of water.
pub(crate) fn treasure_ocean<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, h, l] = STANDARD;
    let (cx, cz) = (w / 2, l / 2);
    floor(&mut room, ctx.mat(Prismarine));
    ceiling(&mut room, ctx.mat(DarkPrismarine));
    let gradient = [
        ctx.mat(Prismarine),
        ctx.mat(DarkPrismarine),
        ctx.mat(Prismarine),
        ctx.mat(SeaLantern),
    ];
    radial_material_blend(room.buffer_mut(), cx, cz, 0..=0, 12.0, &gradient, 0.25, ctx.rng());

    for (x, z) in iproduct!(0..w, 0..l) {
        if (5.0..7.0).contains(&planar_distance(x - cx, z - cz)) {
            room.buffer_mut().set([x, 0, z], ctx.mat(Water));
        }
    }
    fill_area(room.buffer_mut(), [cx - 1, 0, cz - 1], [cx + 1, 0, cz + 1], ctx.mat(DarkPrismarine));
    for x in (4..w).step_by(6) {
        for z in (4..l).step_by(6) {
            room.buffer_mut().set([x, h - 1, z], ctx.mat(SeaLantern));
        }
    }

    ctx.spawner(&mut room, [4, 1, 4], 2);
    ctx.spawner(&mut room, [w - 5, 1, l - 5], 2);
    ctx.chest(&mut room, [cx, 1, cz], LootTable::Treasure);
    Ok(room)
}

const RITUAL_RADIUS: FreeCoordinate = 11.0;
const STAR_RADIUS: FreeCoordinate = 8.0;

/// The five points of a star inscribed in a circle of `radius`, the first pointing
/// toward −Z, as `[x, z]`.
fn star_points(
    cx: GridCoordinate,
    cz: GridCoordinate,
    radius: FreeCoordinate,
) -> [[GridCoordinate; 2]; 5] {
    core::array::from_fn(|k| {
        let angle = -FRAC_PI_2 + TAU * k as FreeCoordinate / 5.0;
        [
            cx + (radius * angle.cos()).round() as GridCoordinate,
            cz + (radius * angle.sin()).round() as GridCoordinate,
        ]
    })
}

/// A round obsidian chamber with a pentagram traced on its floor and a guardian
/// spawner at each point of the star.
pub(crate) fn ritual_chamber<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, h, l] = STANDARD;
    let (cx, cz) = (w / 2, l / 2);
    circular_room(room.buffer_mut(), cx, cz, RITUAL_RADIUS, ctx.mat(Obsidian));
    let gradient = [ctx.mat(Obsidian), ctx.mat(Netherrack), ctx.mat(Magma)];
    radial_material_blend(room.buffer_mut(), cx, cz, 0..=0, RITUAL_RADIUS, &gradient, 0.2, ctx.rng());
    room.buffer_mut().set([cx, h - 1, cz], ctx.mat(Glowstone));

    let points = star_points(cx, cz, STAR_RADIUS);
    for k in 0..points.len() {
        let (start, end) = (points[k], points[(k + 2) % points.len()]);
        rasterize_line(room.buffer_mut(), start, end, 1, ctx.mat(RedCarpet));
    }

    for [x, z] in points {
        ctx.spawner(&mut room, [x, 1, z], 2);
    }
    ctx.chest(&mut room, [cx, 1, cz], LootTable::Treasure);
    Ok(room)
}
