//! The hand-composed room scripts behind [`RoomTemplate`](crate::RoomTemplate), and the
//! pieces they share.
//!
//! Every script follows the same order: allocate the room, shape it with [`alg`]
//! routines, then place spawners and containers. Records go last so that no later
//! shape can overwrite the cell a record is bound to.
//!
//! [`alg`]: crate::alg

use alloc::vec;

use rand::{Rng, SeedableRng as _};
use rand_xoshiro::Xoshiro256Plus;

use undercroft::math::{GridAab, GridCoordinate, GridPoint};
use undercroft::{
    EntityOverrides, InvalidDimension, LootTableId, Material, MaterialProvider, Room,
    SpawnEntry, SpawnParameters,
};

use crate::DungeonMaterial;
use crate::alg::{column, fill_area};

mod boss;
pub(crate) use boss::*;
mod combat;
pub(crate) use combat::*;
mod entrance;
pub(crate) use entrance::*;
mod hub;
pub(crate) use hub::*;
mod maze;
pub(crate) use maze::*;
mod normal;
pub(crate) use normal::*;
mod showcase;
pub(crate) use showcase::*;
mod staircase;
pub(crate) use staircase::*;
mod trap;
pub(crate) use trap::*;
mod treasure;
pub(crate) use treasure::*;

/// Width, height and length of an ordinary room.
pub(crate) const STANDARD: [GridCoordinate; 3] = [26, 8, 26];
pub(crate) const MINI_BOSS: [GridCoordinate; 3] = [32, 12, 32];
pub(crate) const BOSS: [GridCoordinate; 3] = [36, 16, 36];
/// Staircase rooms span three storeys of a standard room.
pub(crate) const STAIRCASE: [GridCoordinate; 3] = [26, 24, 26];

/// Entities an ordinary spawner may produce, chosen uniformly.
const SPAWNER_ENTITIES: [&str; 2] = ["moremod:curse_knight", "moremod:weeping_angel"];

const MINI_BOSS_ENTITY: &str = "moremod:void_ripper";
const MINI_BOSS_HEALTH: f32 = 60.0;

/// Which loot table a container is filled from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, exhaust::Exhaust)]
#[derive(strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum LootTable {
    /// The reward for clearing a boss arena.
    Boss,
    /// Treasure rooms and mini-boss rewards.
    Treasure,
    #[allow(missing_docs)]
    Normal,
    /// Resting places between fights.
    Hub,
    /// Bait at the end of a trap.
    Trap,
    #[allow(missing_docs)]
    Entrance,
}

impl LootTable {
    /// The host's identifier for this table.
    pub fn id(self) -> LootTableId {
        LootTableId::new_static(match self {
            LootTable::Boss => "moremod:dungeon/dungeon_boss",
            LootTable::Treasure => "moremod:dungeon/dungeon_treasure",
            LootTable::Normal => "moremod:dungeon/dungeon_normal",
            LootTable::Hub => "moremod:dungeon/dungeon_hub",
            LootTable::Trap => "moremod:dungeon/dungeon_trap",
            LootTable::Entrance => "moremod:dungeon/dungeon_entrance",
        })
    }
}

/// Signature shared by every room script.
pub(crate) type Script<M> = fn(&mut RoomContext<'_, M>) -> Result<Room<M>, InvalidDimension>;

/// Everything one room script needs besides the room itself: the host's materials and
/// a random source of its own.
///
/// A context is created per [`RoomTemplate::build()`](crate::RoomTemplate::build) call,
/// so no random state is shared between rooms.
pub(crate) struct RoomContext<'p, M> {
    materials: &'p MaterialProvider<DungeonMaterial, M>,
    rng: Xoshiro256Plus,
}

impl<'p, M: Material> RoomContext<'p, M> {
    pub(crate) fn new(materials: &'p MaterialProvider<DungeonMaterial, M>, seed: u64) -> Self {
        Self {
            materials,
            rng: Xoshiro256Plus::seed_from_u64(seed),
        }
    }

    /// Looks up the host's value for a named material.
    pub(crate) fn mat(&self, key: DungeonMaterial) -> &'p M {
        let materials: &'p MaterialProvider<DungeonMaterial, M> = self.materials;
        &materials[key]
    }

    pub(crate) fn rng(&mut self) -> &mut Xoshiro256Plus {
        &mut self.rng
    }

    pub(crate) fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability)
    }

    /// Returns `rare` with the given probability, and otherwise `common`.
    pub(crate) fn either(
        &mut self,
        probability: f64,
        rare: DungeonMaterial,
        common: DungeonMaterial,
    ) -> &'p M {
        let key = if self.chance(probability) {
            rare
        } else {
            common
        };
        self.mat(key)
    }

    /// Uniform draw from `0..n`; `n` must be positive.
    pub(crate) fn below(&mut self, n: GridCoordinate) -> GridCoordinate {
        self.rng.random_range(0..n)
    }

    pub(crate) fn room(&self, size: [GridCoordinate; 3]) -> Result<Room<M>, InvalidDimension> {
        let [width, height, length] = size;
        Room::new(width, height, length)
    }

    /// Fills every cell of `region` with `common`, or `rare` with the given probability
    /// independently per cell.
    pub(crate) fn speckle(
        &mut self,
        room: &mut Room<M>,
        region: GridAab,
        common: DungeonMaterial,
        rare: DungeonMaterial,
        probability: f64,
    ) {
        for cube in region.interior_iter() {
            let material = self.either(probability, rare, common);
            room.buffer_mut().set(cube, material);
        }
    }

    /// Places a spawner of a randomly chosen ordinary monster.
    pub(crate) fn spawner(
        &mut self,
        room: &mut Room<M>,
        position: impl Into<GridPoint>,
        difficulty: u32,
    ) {
        let entity = SPAWNER_ENTITIES[self.rng.random_range(0..SPAWNER_ENTITIES.len())];
        room.spawner(
            position,
            self.mat(DungeonMaterial::Spawner),
            vec![SpawnEntry::new(entity, 1)],
            SpawnParameters::for_difficulty(difficulty),
        );
    }

    /// Places a mini-boss spawner, whose weakened monsters destroy it once they appear.
    pub(crate) fn mini_boss_spawner(&mut self, room: &mut Room<M>, position: impl Into<GridPoint>) {
        let entry = SpawnEntry::new(MINI_BOSS_ENTITY, 1).with_overrides(EntityOverrides {
            max_health: Some(MINI_BOSS_HEALTH),
            destroys_spawner: true,
        });
        room.spawner(
            position,
            self.mat(DungeonMaterial::Spawner),
            vec![entry],
            SpawnParameters::mini_boss(),
        );
    }

    pub(crate) fn chest(
        &mut self,
        room: &mut Room<M>,
        position: impl Into<GridPoint>,
        table: LootTable,
    ) {
        room.container(
            position,
            self.mat(DungeonMaterial::Chest),
            table.id(),
            &mut self.rng,
        );
    }
}

/// Fills the bottom layer of the room.
pub(crate) fn floor<M: Material>(room: &mut Room<M>, material: &M) {
    layer(room, 0, material);
}

/// Fills the top layer of the room.
pub(crate) fn ceiling<M: Material>(room: &mut Room<M>, material: &M) {
    let top = room.buffer().height() - 1;
    layer(room, top, material);
}

pub(crate) fn layer<M: Material>(room: &mut Room<M>, y: GridCoordinate, material: &M) {
    let buffer = room.buffer_mut();
    let (w, l) = (buffer.width(), buffer.length());
    fill_area(buffer, [0, y, 0], [w - 1, y, l - 1], material);
}

/// The bottom layer of the room, as a region.
pub(crate) fn floor_region<M: Material>(room: &Room<M>) -> GridAab {
    let size = room.buffer().size();
    GridAab::from_lower_size([0, 0, 0], [size.x, 1, size.z])
}

/// A column of `body` from `y = 1` to `top`, capped with `cap` just above.
pub(crate) fn pillar<M: Material>(
    room: &mut Room<M>,
    x: GridCoordinate,
    z: GridCoordinate,
    top: GridCoordinate,
    body: &M,
    cap: &M,
) {
    let buffer = room.buffer_mut();
    column(buffer, x, z, 1, top, body);
    buffer.set([x, top + 1, z], cap);
}

/// The four corners of the square with opposite corners at `(lo, lo)` and `(hi, hi)`,
/// as `[x, z]`.
pub(crate) fn corners(lo: GridCoordinate, hi: GridCoordinate) -> [[GridCoordinate; 2]; 4] {
    [[lo, lo], [hi, lo], [lo, hi], [hi, hi]]
}

/// Chebyshev (chessboard) distance between two columns.
pub(crate) fn ring_distance(dx: GridCoordinate, dz: GridCoordinate) -> GridCoordinate {
    dx.abs().max(dz.abs())
}
