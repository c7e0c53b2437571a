//! Core data structures for generating dungeon rooms out of voxels.
//!
//! A generated room is a [`Room`]: a dense [`VoxelBuffer`] of materials plus a list of
//! [`MetadataRecord`]s describing the interactive features (monster spawners, loot
//! containers) placed inside it. This crate knows nothing about what any material
//! *is*; it is generic over the host's material type through the [`Material`] trait,
//! and [`MaterialProvider`] binds a named set of materials to the host's values.
//!
//! The room templates themselves, and the geometric and maze algorithms they use,
//! live in the `undercroft-content` crate.

#![deny(rust_2018_idioms)]
#![warn(unused_extern_crates)]

extern crate alloc;

pub mod buffer;
pub use buffer::{InvalidDimension, VoxelBuffer};

pub mod material;
pub use material::{BindError, DefaultProvision, Material, MaterialProvider};

pub mod math;

pub mod record;
pub use record::{
    ContainerDescriptor, EntityId, EntityOverrides, LootTableId, MetadataRecord,
    SpawnDescriptor, SpawnEntry, SpawnParameters,
};

mod room;
pub use room::Room;
