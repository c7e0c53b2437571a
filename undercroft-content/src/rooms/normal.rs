use rand::Rng as _;

use undercroft::{InvalidDimension, Material, Room};

use crate::DungeonMaterial::{self, *};
use crate::alg::{column, fill_area};
use crate::rooms::{LootTable, RoomContext, STANDARD, ceiling, corners, floor};

pub(crate) fn alchemy_room<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    floor(&mut room, ctx.mat(StoneBrick));
    ceiling(&mut room, ctx.mat(StoneBrick));

    for [x, z] in corners(8, 17) {
        room.buffer_mut().set([x, 1, z], ctx.mat(BrewingStand));
        room.buffer_mut().set([x, 1, z + 1], ctx.mat(Cauldron));
    }
    room.buffer_mut().set([13, 1, 13], ctx.mat(CraftingTable));
    for [x, z] in corners(3, 22) {
        room.buffer_mut().set([x, 2, z], ctx.mat(Torch));
    }

    ctx.spawner(&mut room, [13, 0, 4], 1);
    ctx.spawner(&mut room, [13, 0, 21], 1);
    ctx.chest(&mut room, [13, 1, 8], LootTable::Normal);
    Ok(room)
}

/// Rows of wheat under a glass roof, watered from a spring in the middle.
pub(crate) fn greenhouse<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    floor(&mut room, ctx.mat(Grass));
    ceiling(&mut room, ctx.mat(Glass));

    for x in (4..=21).step_by(3) {
        let buffer = room.buffer_mut();
        fill_area(buffer, [x, 0, 4], [x, 0, 21], ctx.mat(Farmland));
        fill_area(buffer, [x, 1, 4], [x, 1, 21], ctx.mat(Wheat));
    }
    room.buffer_mut().set([13, 0, 13], ctx.mat(Water));
    room.buffer_mut().set([13, 1, 13], &M::air());

    ctx.spawner(&mut room, [2, 1, 13], 1);
    ctx.spawner(&mut room, [23, 1, 13], 1);
    ctx.chest(&mut room, [13, 1, 4], LootTable::Normal);
    Ok(room)
}

/// Floor material of a mine: mostly stone, with gravel and the odd ore.
fn mine_floor(roll: f64) -> DungeonMaterial {
    match roll {
        r if r < 0.10 => Gravel,
        r if r < 0.15 => CoalOre,
        r if r < 0.18 => IronOre,
        _ => Stone,
    }
}

/// A timbered mine gallery with a rail line down the middle.
pub(crate) fn mine<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    let [w, _, l] = STANDARD;
    for x in 0..w {
        for z in 0..l {
            let material = mine_floor(ctx.rng().random());
            room.buffer_mut().set([x, 0, z], ctx.mat(material));
        }
    }
    ceiling(&mut room, ctx.mat(Stone));

    fill_area(room.buffer_mut(), [13, 1, 4], [13, 1, 21], ctx.mat(Rail));
    for z in [6, 12, 18] {
        let buffer = room.buffer_mut();
        column(buffer, 6, z, 1, 4, ctx.mat(OakLog));
        column(buffer, 19, z, 1, 4, ctx.mat(OakLog));
        fill_area(buffer, [6, 5, z], [19, 5, z], ctx.mat(OakPlanks));
    }

    ctx.spawner(&mut room, [4, 1, 4], 1);
    ctx.spawner(&mut room, [21, 1, 21], 1);
    ctx.chest(&mut room, [13, 1, 8], LootTable::Normal);
    Ok(room)
}

pub(crate) fn storage_room<M: Material>(
    ctx: &mut RoomContext<'_, M>,
) -> Result<Room<M>, InvalidDimension> {
    let mut room = ctx.room(STANDARD)?;
    floor(&mut room, ctx.mat(DarkOakPlanks));
    ceiling(&mut room, ctx.mat(OakPlanks));

    // Decorative crates; only the chest in the middle holds loot.
    for z in [5, 12, 19] {
        for x in (4..=21).step_by(4) {
            room.buffer_mut().set([x, 1, z], ctx.mat(EmptyChest));
            if ctx.chance(0.5) {
                room.buffer_mut().set([x, 2, z], ctx.mat(EmptyChest));
            }
        }
    }

    ctx.spawner(&mut room, [2, 1, 2], 1);
    ctx.spawner(&mut room, [23, 1, 23], 1);
    ctx.chest(&mut room, [13, 1, 13], LootTable::Normal);
    Ok(room)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity_provider;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, Gravel)]
    #[case(0.12, CoalOre)]
    #[case(0.17, IronOre)]
    #[case(0.5, Stone)]
    fn mine_floor_bands(#[case] roll: f64, #[case] expected: DungeonMaterial) {
        assert_eq!(mine_floor(roll), expected);
    }

    #[test]
    fn greenhouse_spring() {
        let provider = identity_provider();
        let room = greenhouse(&mut RoomContext::new(&provider, 0)).unwrap();
        let b = room.buffer();
        assert_eq!(*b.get([13, 0, 13]), Water);
        assert_eq!(*b.get([13, 1, 13]), Air);
        assert_eq!(*b.get([10, 1, 13]), Wheat);
        assert_eq!(*b.get([10, 0, 13]), Farmland);
        assert_eq!(*b.get([13, 1, 4]), Chest);
        assert_eq!(*b.get([11, 0, 13]), Grass);
    }

    #[test]
    fn storage_crates_hold_no_records() {
        let provider = identity_provider();
        let room = storage_room(&mut RoomContext::new(&provider, 8)).unwrap();
        assert_eq!(room.records().len(), 3);
        assert!(room.buffer().count(|m| *m == EmptyChest) >= 15);
    }
}
