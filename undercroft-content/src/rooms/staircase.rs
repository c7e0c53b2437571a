//! Multi-storey rooms joined by a spiral stair around a central newel.

use itertools::iproduct;

use undercroft::math::{FreeCoordinate, GridCoordinate, planar_distance};
use undercroft::{InvalidDimension, Material, Room};

use crate::DungeonMaterial::*;
use crate::alg::{column, spiral_staircase};
use crate::rooms::{LootTable, RoomContext, STAIRCASE, ceiling, corners, floor, layer};

const SHAFT_CENTER: GridCoordinate = STAIRCASE[0] / 2;
const SHAFT_RADIUS: FreeCoordinate = 3.0;
/// Storey floors are cut open this far from the newel so the stair can pass.
const HOLE_RADIUS: FreeCoordinate = SHAFT_RADIUS + 1.0;
/// Height of the upper storey's floor.
const UPPER: GridCoordinate = 16;
const MIDDLE: GridCoordinate = 8;

/// Opens a hole around the shaft in each floor of `storeys`, then winds the stair from
/// just above the ground to just below [`UPPER`].
///
/// Returns the number of steps placed.
fn stair_shaft<M: Material>(
    ctx: &RoomContext<'_, M>,
    room: &mut Room<M>,
    storeys: &[GridCoordinate],
) -> usize {
    let c = SHAFT_CENTER;
    let buffer = room.buffer_mut();
    for (&y, x, z) in iproduct!(storeys, 0..buffer.width(), 0..buffer.length()) {
        if planar_distance(x - c, z - c) <= HOLE_RADIUS {
            buffer.set([x, y, z], &M::air());
        }
    }
    column(buffer, c, c, 1, buffer.height() - 2, ctx.mat(QuartzPillar));
    spiral_staircase(
        buffer,
        c,
        c,
        SHAFT_RADIUS,
        1,
        UPPER,
        ctx.mat(StoneBrickStairs),
        None,
    )
}

/// Lights hung under the ceiling of a storey whose ceiling is at `y`.
fn storey_lights<M: Material>(ctx: &RoomContext<'_, M>, room: &mut Room<M>, y: GridCoordinate) {
    for [x, z] in corners(4, 21) {
        room.buffer_mut().set([x, y, z], ctx.mat(Glowstone));
    }
}

/// A tall hall whose stair climbs to a landing near the roof.
pub(crate) fn staircase_up<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STAIRCASE)?;
    let [_, h, _] = STAIRCASE;
    floor(&mut room, ctx.mat(StoneBrick));
    layer(&mut room, UPPER, ctx.mat(OakPlanks));
    ceiling(&mut room, ctx.mat(StoneBrick));
    stair_shaft(ctx, &mut room, &[UPPER]);
    storey_lights(ctx, &mut room, UPPER - 1);
    storey_lights(ctx, &mut room, h - 1);

    ctx.spawner(&mut room, [4, 1, 4], 1);
    ctx.spawner(&mut room, [21, 1, 21], 1);
    ctx.chest(&mut room, [21, UPPER + 1, 4], LootTable::Normal);
    Ok(room)
}

/// A room entered from above, with the stair leading down into a cellar.
pub(crate) fn staircase_down<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STAIRCASE)?;
    let [w, h, l] = STAIRCASE;
    floor(&mut room, ctx.mat(Cobblestone));
    layer(&mut room, UPPER, ctx.mat(StoneBrick));
    ceiling(&mut room, ctx.mat(StoneBrick));
    stair_shaft(ctx, &mut room, &[UPPER]);
    storey_lights(ctx, &mut room, h - 1);

    // The cellar is dark, and cobwebbed where nobody walks.
    for _ in 0..12 {
        let x = 1 + ctx.below(w - 2);
        let z = 1 + ctx.below(l - 2);
        let y = 1 + ctx.below(UPPER - 2);
        if planar_distance(x - SHAFT_CENTER, z - SHAFT_CENTER) > HOLE_RADIUS {
            room.buffer_mut().set([x, y, z], ctx.mat(Cobweb));
        }
    }

    ctx.spawner(&mut room, [4, UPPER + 1, 21], 1);
    ctx.spawner(&mut room, [21, 1, 21], 2);
    ctx.chest(&mut room, [4, 1, 4], LootTable::Normal);
    Ok(room)
}

/// Three storeys, all reached from the one stair.
pub(crate) fn staircase_both<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STAIRCASE)?;
    let [_, h, _] = STAIRCASE;
    floor(&mut room, ctx.mat(StoneBrick));
    layer(&mut room, MIDDLE, ctx.mat(SprucePlanks));
    layer(&mut room, UPPER, ctx.mat(SprucePlanks));
    ceiling(&mut room, ctx.mat(StoneBrick));
    stair_shaft(ctx, &mut room, &[MIDDLE, UPPER]);
    for y in [MIDDLE - 1, UPPER - 1, h - 1] {
        storey_lights(ctx, &mut room, y);
    }

    for y in [0, MIDDLE, UPPER] {
        ctx.spawner(&mut room, [4, y + 1, 21], 1);
    }
    ctx.chest(&mut room, [21, MIDDLE + 1, 4], LootTable::Normal);
    Ok(room)
}
