//! Metadata records: the interactive features a room asks its host to instantiate.
//!
//! A record is bound to one cell of a [`VoxelBuffer`] and describes either a monster
//! spawner ([`SpawnDescriptor`]) or a loot container ([`ContainerDescriptor`]). This
//! crate only describes them; what a spawner does or what a loot table contains is
//! up to the host.

use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt;

use rand::Rng;

use crate::buffer::VoxelBuffer;
use crate::material::Material;
use crate::math::GridPoint;

/// Opaque identifier of a kind of entity, in the host's namespace (such as `"mod:zombie"`).
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(Cow<'static, str>);

/// Opaque identifier of a loot table, in the host's namespace.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootTableId(Cow<'static, str>);

macro_rules! impl_string_id {
    ($t:ident) => {
        impl $t {
            /// Constructs an identifier from a static string without allocating.
            pub const fn new_static(id: &'static str) -> Self {
                Self(Cow::Borrowed(id))
            }

            /// Returns the identifier's text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&'static str> for $t {
            fn from(id: &'static str) -> Self {
                Self::new_static(id)
            }
        }

        impl From<alloc::string::String> for $t {
            fn from(id: alloc::string::String) -> Self {
                Self(Cow::Owned(id))
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}
impl_string_id!(EntityId);
impl_string_id!(LootTableId);

/// Per-entry changes to the spawned entity's attributes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_structs)]
pub struct EntityOverrides {
    /// Replacement maximum health, if any.
    pub max_health: Option<f32>,
    /// Whether the spawned entity destroys the spawner that produced it.
    pub destroys_spawner: bool,
}

/// One weighted choice of what a spawner produces.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnEntry {
    entity: EntityId,
    weight: u32,
    overrides: EntityOverrides,
}

impl SpawnEntry {
    /// An entry producing `entity` with relative likelihood `weight`, without overrides.
    pub fn new(entity: impl Into<EntityId>, weight: u32) -> Self {
        Self {
            entity: entity.into(),
            weight,
            overrides: EntityOverrides::default(),
        }
    }

    /// Replaces the entity attribute overrides of this entry.
    #[must_use]
    pub fn with_overrides(mut self, overrides: EntityOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    #[expect(missing_docs)]
    pub fn entity(&self) -> &EntityId {
        &self.entity
    }

    /// Relative likelihood of this entry among the spawner's entries.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    #[expect(missing_docs)]
    pub fn overrides(&self) -> &EntityOverrides {
        &self.overrides
    }
}

/// Timing and range parameters of a spawner. Delays are in host ticks and ranges in cells.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_structs)]
pub struct SpawnParameters {
    /// Delay before the first spawn.
    pub initial_delay: u32,
    /// Lower bound of the random delay between spawns.
    pub min_delay: u32,
    /// Upper bound of the random delay between spawns.
    pub max_delay: u32,
    /// Number of entities produced per spawn.
    pub spawn_count: u32,
    /// The spawner pauses while this many of its entities are nearby.
    pub max_nearby: u32,
    /// The spawner is only active while a player is within this distance.
    pub player_range: u32,
    /// Entities appear within this distance of the spawner.
    pub spawn_range: u32,
}

impl SpawnParameters {
    /// Parameters for an ordinary spawner in a dungeon of the given difficulty.
    ///
    /// Higher difficulty spawns more often and more at once, down to a floor of
    /// 60–120 ticks between spawns.
    ///
    /// ```
    /// use undercroft::SpawnParameters;
    ///
    /// let easy = SpawnParameters::for_difficulty(0);
    /// assert_eq!((easy.min_delay, easy.max_delay, easy.spawn_count), (200, 400, 1));
    /// let hard = SpawnParameters::for_difficulty(10);
    /// assert_eq!((hard.min_delay, hard.max_delay, hard.spawn_count), (60, 120, 11));
    /// ```
    pub fn for_difficulty(difficulty: u32) -> Self {
        Self {
            initial_delay: 0,
            min_delay: 200u32.saturating_sub(difficulty.saturating_mul(20)).max(60),
            max_delay: 400u32.saturating_sub(difficulty.saturating_mul(40)).max(120),
            spawn_count: difficulty.saturating_add(1),
            max_nearby: difficulty.saturating_add(3),
            player_range: 16,
            spawn_range: 4,
        }
    }

    /// Parameters for the fast, close-range spawners that guard a mini-boss arena.
    pub const fn mini_boss() -> Self {
        Self {
            initial_delay: 20,
            min_delay: 20,
            max_delay: 40,
            spawn_count: 2,
            max_nearby: 6,
            player_range: 16,
            spawn_range: 3,
        }
    }
}

/// A monster spawner placed in a room.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnDescriptor {
    position: GridPoint,
    entries: Vec<SpawnEntry>,
    parameters: SpawnParameters,
}

impl SpawnDescriptor {
    #[expect(missing_docs)]
    pub fn position(&self) -> GridPoint {
        self.position
    }

    /// The weighted entity choices, never empty when produced by [`place_spawner`].
    pub fn entries(&self) -> &[SpawnEntry] {
        &self.entries
    }

    #[expect(missing_docs)]
    pub fn parameters(&self) -> &SpawnParameters {
        &self.parameters
    }

    /// Sum of the weights of all entries.
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.weight)).sum()
    }
}

/// A loot container placed in a room.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerDescriptor {
    position: GridPoint,
    loot_table: LootTableId,
    seed: u64,
}

impl ContainerDescriptor {
    #[expect(missing_docs)]
    pub fn position(&self) -> GridPoint {
        self.position
    }

    /// Which loot table the host should fill the container from.
    pub fn loot_table(&self) -> &LootTableId {
        &self.loot_table
    }

    /// Seed for the host's loot resolution, so that contents are reproducible.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// A feature attached to one cell of a generated room.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_enums)]
pub enum MetadataRecord {
    #[expect(missing_docs)]
    Spawner(SpawnDescriptor),
    #[expect(missing_docs)]
    Container(ContainerDescriptor),
}

impl MetadataRecord {
    /// The cell the record is attached to.
    pub fn position(&self) -> GridPoint {
        match self {
            MetadataRecord::Spawner(s) => s.position,
            MetadataRecord::Container(c) => c.position,
        }
    }
}

impl From<SpawnDescriptor> for MetadataRecord {
    fn from(value: SpawnDescriptor) -> Self {
        Self::Spawner(value)
    }
}
impl From<ContainerDescriptor> for MetadataRecord {
    fn from(value: ContainerDescriptor) -> Self {
        Self::Container(value)
    }
}

/// Writes `material` (which should be the host's spawner) at `position` and describes
/// the spawner that should exist there.
///
/// Like [`VoxelBuffer::set`], an out-of-bounds position leaves the buffer unchanged;
/// the descriptor is returned regardless.
///
/// Panics if `entries` is empty.
pub fn place_spawner<M: Material>(
    buffer: &mut VoxelBuffer<M>,
    position: impl Into<GridPoint>,
    material: &M,
    entries: Vec<SpawnEntry>,
    parameters: SpawnParameters,
) -> SpawnDescriptor {
    assert!(!entries.is_empty(), "spawner must have at least one entry");
    let position = position.into();
    buffer.set(position, material);
    SpawnDescriptor {
        position,
        entries,
        parameters,
    }
}

/// Writes `material` (which should be the host's container) at `position` and
/// describes the container that should exist there, with a loot seed drawn from `rng`.
///
/// Like [`VoxelBuffer::set`], an out-of-bounds position leaves the buffer unchanged;
/// the descriptor is returned regardless.
pub fn place_container<M: Material, R: Rng + ?Sized>(
    buffer: &mut VoxelBuffer<M>,
    position: impl Into<GridPoint>,
    material: &M,
    loot_table: impl Into<LootTableId>,
    rng: &mut R,
) -> ContainerDescriptor {
    let position = position.into();
    buffer.set(position, material);
    ContainerDescriptor {
        position,
        loot_table: loot_table.into(),
        seed: rng.random(),
    }
}
