//! The catalog of named room templates.

use macro_rules_attribute::macro_rules_derive;
use paste::paste;

use undercroft::{InvalidDimension, Material, MaterialProvider, Room};

use crate::DungeonMaterial;
use crate::dungeon::RegistryError;
use crate::rooms::{self, RoomContext, Script};

/// Generate a `#[test]` function for each element of [`RoomTemplate`].
/// This macro is used as a derive macro via [`macro_rules_derive`].
macro_rules! generate_template_test {
    (
        $(#[$type_meta:meta])*
        $vis:vis enum $enum_name:ident {
            $(
                $( #[doc = $doc:literal] )*
                $variant_name:ident
            ),* $(,)?
        }
    ) => {
        $(
            paste! {
                #[cfg(test)]
                #[test]
                #[allow(non_snake_case)]
                fn [< template_ $variant_name >] () {
                    tests::check_template($enum_name::$variant_name);
                }
            }
        )*
    }
}

/// A named, hand-composed room.
///
/// Each template is a script which shapes a fresh [`Room`] and then attaches its
/// spawners and containers. Templates are selected by name (see [`strum::EnumString`])
/// or by room kind through [`TemplateRegistry`](crate::TemplateRegistry).
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    exhaust::Exhaust,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
#[macro_rules_derive(generate_template_test!)]
pub enum RoomTemplate {
    /// The final arena: a checkered hall with an altar, a temporal barrier, and the
    /// boss's reward.
    BossArena,
    /// Two spawners of weakened elite monsters which destroy their spawner on arrival.
    MiniBossArena,
    /// A darker variant of [`RoomTemplate::MiniBossArena`].
    MiniBossArenaDark,

    /// Scattered cover and a handful of spawners.
    CombatRoom,
    /// Practice dummies and weapon racks.
    CombatTrainingGround,
    /// A tiered arena open to the sky.
    CombatColosseum,
    /// A round arena with diagonal barricades.
    CombatArena,

    /// A maze of recursively bisected walls around an open hub.
    MazeRoom,
    /// A hedge maze.
    MazeGarden,
    /// A perfect maze, carved by backtracking, with the reward in the far corner.
    PuzzleMaze,

    /// Hidden spawners under the corridor and a baited chest.
    TrapRoom,
    /// A corridor lined with dispensers.
    TrapArrowCorridor,
    /// A floor that gives way over a pit.
    TrapPitfall,

    /// A golden hall with a chest on a pedestal.
    TreasureRoom,
    /// Rows of shelves, each bearing a chest.
    TreasureVault,
    /// A throne room.
    TreasureRoyal,
    /// A prismarine hall with the treasure on an island in a moat.
    TreasureOcean,
    /// A round obsidian chamber with a pentagram on the floor.
    RitualChamber,

    /// The plain first room of a dungeon.
    EntranceRoom,
    /// A ruined entrance hall.
    EntranceRuins,
    /// A sandstone temple entrance.
    EntranceTemple,
    /// A walled room with an arched doorway in every wall.
    ExitRoom,

    /// A resting place around a fountain.
    FountainRoom,
    /// A campsite with tents.
    HubCamp,
    /// A library.
    HubLibrary,
    /// A formal hall between two colonnades.
    HubGrandFoyer,

    /// A brewing workshop.
    AlchemyRoom,
    /// Crops under a glass roof.
    Greenhouse,
    /// A timbered mine gallery.
    Mine,
    /// A storeroom full of empty crates.
    StorageRoom,

    /// A cavern with crystals growing from an uneven floor.
    CrystalCave,
    /// A workshop inlaid with gears.
    ClockworkWorkshop,
    /// Netherrack ground around a pool of lava.
    NetherBreach,
    /// A tall starry dome over a dais.
    VoidObservatory,

    /// A stair climbing to an upper landing.
    StaircaseUp,
    /// A stair descending to a cellar.
    StaircaseDown,
    /// Three storeys joined by one stair.
    StaircaseBoth,
}

impl RoomTemplate {
    fn script<M: Material>(self) -> Script<M> {
        use RoomTemplate::*;
        match self {
            BossArena => rooms::boss_arena,
            MiniBossArena => rooms::mini_boss_arena,
            MiniBossArenaDark => rooms::mini_boss_arena_dark,
            CombatRoom => rooms::combat_room,
            CombatTrainingGround => rooms::combat_training_ground,
            CombatColosseum => rooms::combat_colosseum,
            CombatArena => rooms::combat_arena,
            MazeRoom => rooms::maze_room,
            MazeGarden => rooms::maze_garden,
            PuzzleMaze => rooms::puzzle_maze,
            TrapRoom => rooms::trap_room,
            TrapArrowCorridor => rooms::trap_arrow_corridor,
            TrapPitfall => rooms::trap_pitfall,
            TreasureRoom => rooms::treasure_room,
            TreasureVault => rooms::treasure_vault,
            TreasureRoyal => rooms::treasure_royal,
            TreasureOcean => rooms::treasure_ocean,
            RitualChamber => rooms::ritual_chamber,
            EntranceRoom => rooms::entrance_room,
            EntranceRuins => rooms::entrance_ruins,
            EntranceTemple => rooms::entrance_temple,
            ExitRoom => rooms::exit_room,
            FountainRoom => rooms::fountain_room,
            HubCamp => rooms::hub_camp,
            HubLibrary => rooms::hub_library,
            HubGrandFoyer => rooms::hub_grand_foyer,
            AlchemyRoom => rooms::alchemy_room,
            Greenhouse => rooms::greenhouse,
            Mine => rooms::mine,
            StorageRoom => rooms::storage_room,
            CrystalCave => rooms::crystal_cave,
            ClockworkWorkshop => rooms::clockwork_workshop,
            NetherBreach => rooms::nether_breach,
            VoidObservatory => rooms::void_observatory,
            StaircaseUp => rooms::staircase_up,
            StaircaseDown => rooms::staircase_down,
            StaircaseBoth => rooms::staircase_both,
        }
    }

    /// Generates a new [`Room`] from this template, using the host's materials.
    ///
    /// The result is fully determined by the template, the materials, and
    /// `params.seed`.
    pub fn build<M: Material>(
        self,
        materials: &MaterialProvider<DungeonMaterial, M>,
        params: TemplateParameters,
    ) -> Result<Room<M>, GenError> {
        let mut ctx = RoomContext::new(materials, params.seed.unwrap_or(0));
        let room = (self.script())(&mut ctx).map_err(|source| GenError::Template {
            template: self,
            source,
        })?;

        let size = room.buffer().size();
        log::debug!(
            "built {self} ({}×{}×{}) with {} records",
            size.x,
            size.y,
            size.z,
            room.records().len()
        );
        Ok(room)
    }
}

/// Configuration for exactly what a [`RoomTemplate`] should produce.
///
/// Pass this structure to [`RoomTemplate::build()`].
#[derive(Clone, Debug, Default, PartialEq)]
#[allow(clippy::exhaustive_structs)]
pub struct TemplateParameters {
    /// Seed for any randomization which the template performs.
    /// Not all templates have random elements.
    ///
    /// The seed is optional so that user input processing can distinguish whether the
    /// seed was explicitly specified. A seed of `None` is treated as `Some(0)`.
    //---
    // Design note: u64 was chosen because both `std::hash::Hasher` and `rand::SeedableRng`
    // agree on this many bits for seeds.
    pub seed: Option<u64>,
}

/// Failure to generate a room.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum GenError {
    /// A template asked for a room of impossible size.
    #[error("template {template} failed to generate")]
    Template {
        /// The template that failed.
        template: RoomTemplate,
        /// What went wrong.
        #[source]
        source: InvalidDimension,
    },

    /// The registry could not supply a template.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity_provider;
    use pretty_assertions::assert_eq;
    use undercroft::MetadataRecord;

    /// Checks what every template must guarantee, whatever it builds.
    pub(super) fn check_template(template: RoomTemplate) {
        let provider = identity_provider();
        let params = TemplateParameters { seed: Some(0x1234) };
        let room = template.build(&provider, params.clone()).unwrap();
        let buffer = room.buffer();

        let size = buffer.size();
        assert!(size.x > 0 && size.y > 0 && size.z > 0);
        assert!(!room.records().is_empty(), "{template} placed no records");
        for record in room.records() {
            assert!(buffer.in_bounds(record.position()), "{record:?}");
        }
        let overwritten: Vec<&MetadataRecord> = room
            .overwritten_records(|record, material| match record {
                MetadataRecord::Spawner(_) => *material == DungeonMaterial::Spawner,
                MetadataRecord::Container(_) => *material == DungeonMaterial::Chest,
            })
            .collect();
        assert_eq!(overwritten, Vec::<&MetadataRecord>::new());

        let again = template.build(&provider, params).unwrap();
        assert!(room == again, "{template} is not deterministic");
    }

    #[test]
    fn names_round_trip() {
        use strum::IntoEnumIterator as _;
        for template in RoomTemplate::iter() {
            let name: &'static str = template.into();
            assert_eq!(name.parse::<RoomTemplate>(), Ok(template));
        }
        assert_eq!(
            "treasure_vault".parse::<RoomTemplate>(),
            Ok(RoomTemplate::TreasureVault)
        );
        assert!("treasure-vault".parse::<RoomTemplate>().is_err());
        assert_eq!(RoomTemplate::iter().count(), 37);
    }

    #[test]
    fn sizes() {
        let provider = identity_provider();
        for (template, size) in [
            (RoomTemplate::BossArena, [36, 16, 36]),
            (RoomTemplate::MiniBossArena, [32, 12, 32]),
            (RoomTemplate::Greenhouse, [26, 8, 26]),
            (RoomTemplate::StaircaseBoth, [26, 24, 26]),
        ] {
            let room = template
                .build(&provider, TemplateParameters::default())
                .unwrap();
            assert_eq!(room.buffer().size().to_array(), size, "{template}");
        }
    }

    #[test]
    fn missing_seed_is_seed_zero() {
        let provider = identity_provider();
        let unseeded = RoomTemplate::CombatRoom
            .build(&provider, TemplateParameters::default())
            .unwrap();
        let zero = RoomTemplate::CombatRoom
            .build(&provider, TemplateParameters { seed: Some(0) })
            .unwrap();
        assert!(unseeded == zero);
    }

    #[test]
    fn seeds_vary_the_result() {
        let provider = identity_provider();
        let rooms: Vec<_> = (0..4)
            .map(|seed| {
                RoomTemplate::CombatRoom
                    .build(&provider, TemplateParameters { seed: Some(seed) })
                    .unwrap()
            })
            .collect();
        assert!(rooms.windows(2).any(|pair| pair[0] != pair[1]));
    }
}
