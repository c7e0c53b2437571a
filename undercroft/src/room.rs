//! [`Room`], a voxel buffer together with the spawners and containers placed in it.

use alloc::vec::Vec;

use rand::Rng;

use crate::buffer::{InvalidDimension, VoxelBuffer};
use crate::material::Material;
use crate::math::{GridCoordinate, GridPoint};
use crate::record::{self, LootTableId, MetadataRecord, SpawnEntry, SpawnParameters};

/// A finished (or in-progress) room: its voxels and the records attached to them.
///
/// Unlike the free functions in [`record`](crate::record), the placement methods here
/// refuse to record a feature outside the buffer, so that every record in a `Room` is
/// bound to a real cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Room<M> {
    buffer: VoxelBuffer<M>,
    records: Vec<MetadataRecord>,
}

impl<M: Material> Room<M> {
    /// Constructs an all-air room with no records.
    pub fn new(
        width: GridCoordinate,
        height: GridCoordinate,
        length: GridCoordinate,
    ) -> Result<Self, InvalidDimension> {
        Ok(Self {
            buffer: VoxelBuffer::new(width, height, length)?,
            records: Vec::new(),
        })
    }

    #[expect(missing_docs)]
    pub fn buffer(&self) -> &VoxelBuffer<M> {
        &self.buffer
    }

    #[expect(missing_docs)]
    pub fn buffer_mut(&mut self) -> &mut VoxelBuffer<M> {
        &mut self.buffer
    }

    /// The records attached so far, in placement order.
    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    /// Places a spawner and records it, unless `position` is out of bounds, in which
    /// case nothing happens and a warning is logged.
    ///
    /// Panics if `entries` is empty.
    pub fn spawner(
        &mut self,
        position: impl Into<GridPoint>,
        material: &M,
        entries: Vec<SpawnEntry>,
        parameters: SpawnParameters,
    ) {
        let position = position.into();
        if self.reject_out_of_bounds(position, "spawner") {
            return;
        }
        let descriptor =
            record::place_spawner(&mut self.buffer, position, material, entries, parameters);
        self.records.push(descriptor.into());
    }

    /// Places a container and records it, unless `position` is out of bounds, in which
    /// case nothing happens and a warning is logged.
    pub fn container<R: Rng + ?Sized>(
        &mut self,
        position: impl Into<GridPoint>,
        material: &M,
        loot_table: impl Into<LootTableId>,
        rng: &mut R,
    ) {
        let position = position.into();
        if self.reject_out_of_bounds(position, "container") {
            return;
        }
        let descriptor =
            record::place_container(&mut self.buffer, position, material, loot_table, rng);
        self.records.push(descriptor.into());
    }

    fn reject_out_of_bounds(&self, position: GridPoint, what: &str) -> bool {
        if self.buffer.in_bounds(position) {
            false
        } else {
            log::warn!(
                "dropping {what} at {position:?} outside room bounds {bounds:?}",
                bounds = self.buffer.bounds()
            );
            true
        }
    }

    /// Returns the records whose cell no longer holds a material accepted by
    /// `expected`, which happens when a later shape overwrote the spawner or container.
    pub fn overwritten_records<'a>(
        &'a self,
        mut expected: impl FnMut(&MetadataRecord, &M) -> bool + 'a,
    ) -> impl Iterator<Item = &'a MetadataRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| !expected(r, self.buffer.get(r.position())))
    }

    /// Splits the room into its parts.
    pub fn into_parts(self) -> (VoxelBuffer<M>, Vec<MetadataRecord>) {
        (self.buffer, self.records)
    }
}
