//! The named materials the room templates are written in terms of.

use exhaust::Exhaust;
use undercroft::{DefaultProvision, Material, MaterialProvider};

/// Names for materials assigned specific roles in dungeon rooms.
///
/// Templates never refer to host materials directly; they look these names up in a
/// [`MaterialProvider`], which the host fills with its own values. `DungeonMaterial`
/// is itself a [`Material`], so [`MaterialProvider::default()`] over it is an identity
/// binding, which is convenient for testing and previewing rooms.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Exhaust)]
#[derive(strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum DungeonMaterial {
    /// Empty space.
    Air,

    // Natural stone and earth
    Stone,
    Andesite,
    Cobblestone,
    CobblestoneWall,
    Gravel,
    Dirt,
    Grass,
    Sand,
    CoalOre,
    IronOre,

    // Masonry
    StoneBrick,
    MossyStoneBrick,
    CrackedStoneBrick,
    ChiseledStoneBrick,
    StoneBrickStairs,
    SmoothSandstone,
    ChiseledSandstone,
    SandstoneStairs,
    QuartzBlock,
    QuartzPillar,
    QuartzStairs,
    Prismarine,
    DarkPrismarine,

    /// Indestructible wall used where players must not dig out of a room.
    BarrierAnchor,
    /// Indestructible marker at the heart of a boss altar.
    TemporalBarrier,

    // Otherworldly
    Obsidian,
    Purpur,
    EndStone,
    NetherBrick,
    Netherrack,
    Magma,
    Crystal,

    // Metal
    GoldBlock,
    IronBlock,

    // Fluids and fire
    Water,
    Lava,
    Fire,

    // Light
    Torch,
    RedstoneTorch,
    Glowstone,
    SeaLantern,
    RedstoneLamp,
    Glass,

    /// A monster spawner; every spawn record sits on one of these.
    Spawner,
    /// A loot container; every container record sits on one of these.
    Chest,
    /// A container that is only decoration and has no record.
    EmptyChest,

    // Wood
    OakPlanks,
    SprucePlanks,
    DarkOakPlanks,
    OakLog,
    SpruceLog,
    OakFence,
    Bookshelf,

    // Furnishings
    EnchantingTable,
    BrewingStand,
    Cauldron,
    CraftingTable,
    FlowerPot,
    HayBale,
    Pumpkin,
    WhiteWool,
    RedCarpet,
    Rail,
    Dispenser,
    StonePressurePlate,
    WoodenPressurePlate,
    Cobweb,

    // Plants
    Leaves,
    Vine,
    RedFlower,
    YellowFlower,
    Farmland,
    Wheat,
}

impl Material for DungeonMaterial {
    fn air() -> Self {
        DungeonMaterial::Air
    }
}

impl DefaultProvision<DungeonMaterial> for DungeonMaterial {
    fn default(self) -> DungeonMaterial {
        self
    }
}

/// A provider mapping every [`DungeonMaterial`] to itself.
pub fn identity_provider() -> MaterialProvider<DungeonMaterial, DungeonMaterial> {
    MaterialProvider::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_snake_case() {
        assert_eq!(DungeonMaterial::StoneBrickStairs.to_string(), "stone_brick_stairs");
        let name: &'static str = DungeonMaterial::BarrierAnchor.into();
        assert_eq!(name, "barrier_anchor");
    }

    #[test]
    fn identity_binding() {
        let provider = identity_provider();
        for material in DungeonMaterial::exhaust() {
            assert_eq!(provider[material], material);
            assert_eq!(material.is_air(), material == DungeonMaterial::Air);
        }
    }

    #[test]
    fn host_binding_with_map() {
        // A host that represents materials by name.
        let provider = identity_provider().map(|_, m| m.to_string());
        assert_eq!(provider[DungeonMaterial::Chest], "chest");
    }
}
