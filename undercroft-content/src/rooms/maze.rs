use undercroft::math::GridPoint;
use undercroft::{InvalidDimension, Material, Room};

use crate::DungeonMaterial::*;
use crate::maze::{Bisection, MazeGrid};
use crate::rooms::{LootTable, RoomContext, STANDARD, ceiling, floor};

/// Cells of a 13×13 backtracker maze are drawn two voxels wide to fill a standard room.
const PUZZLE_PITCH: i32 = 2;

pub(crate) fn maze_room<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, _, l] = STANDARD;
    floor(&mut room, ctx.mat(Stone));
    ceiling(&mut room, ctx.mat(Stone));

    let Bisection { grid, .. } = MazeGrid::recursive_bisection(w, l, ctx.rng());
    let barrier = ctx.mat(BarrierAnchor);
    let brick = ctx.mat(StoneBrick);
    grid.rasterize(room.buffer_mut(), GridPoint::new(0, 1, 0), 1, 4, |cube| {
        let edge = cube.x == 0 || cube.z == 0 || cube.x == w - 1 || cube.z == l - 1;
        Some(if edge { barrier } else { brick })
    });

    for (x, z) in [(7, 7), (18, 7), (7, 18), (18, 18)] {
        if !grid.is_wall(x, z) {
            ctx.spawner(&mut room, [x, 1, z], 1);
        }
    }
    ctx.chest(&mut room, [w / 2, 1, l / 2], LootTable::Hub);
    Ok(room)
}

/// A hedge maze under the open sky.
pub(crate) fn maze_garden<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, _, l] = STANDARD;
    floor(&mut room, ctx.mat(Grass));

    let Bisection { grid, .. } = MazeGrid::recursive_bisection(w, l, ctx.rng());
    let leaves = ctx.mat(Leaves);
    grid.rasterize(room.buffer_mut(), GridPoint::new(0, 1, 0), 1, 3, |_| {
        Some(leaves)
    });

    for _ in 0..15 {
        let x = 1 + ctx.below(w - 2);
        let z = 1 + ctx.below(l - 2);
        let flower = if ctx.chance(0.5) {
            RedFlower
        } else {
            YellowFlower
        };
        if !grid.is_wall(x, z) {
            room.buffer_mut().set([x, 1, z], ctx.mat(flower));
        }
    }

    ctx.spawner(&mut room, [6, 0, 6], 1);
    ctx.spawner(&mut room, [19, 0, 19], 1);
    ctx.chest(&mut room, [w / 2, 1, l / 2], LootTable::Hub);
    Ok(room)
}

/// A perfect maze with the entrance in one corner and the reward in the opposite one.
pub(crate) fn puzzle_maze<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, h, l] = STANDARD;
    floor(&mut room, ctx.mat(StoneBrick));
    ceiling(&mut room, ctx.mat(StoneBrick));
    for x in (3..w).step_by(6) {
        for z in (3..l).step_by(6) {
            room.buffer_mut().set([x, h - 1, z], ctx.mat(Glowstone));
        }
    }

    let grid = MazeGrid::backtracker(w / PUZZLE_PITCH, l / PUZZLE_PITCH, ctx.rng());
    grid.rasterize(
        room.buffer_mut(),
        GridPoint::new(0, 1, 0),
        PUZZLE_PITCH,
        h - 2,
        |_| Some(ctx.either(0.2, MossyStoneBrick, StoneBrick)),
    );

    // Junctions (even maze coordinates) are always open.
    let far = (grid.width() - 1) / 2 * 2 * PUZZLE_PITCH;
    ctx.spawner(&mut room, [far, 1, 0], 1);
    ctx.spawner(&mut room, [0, 1, far], 1);
    ctx.chest(&mut room, [far, 1, far], LootTable::Normal);
    Ok(room)
}
