//! Fixed-size voxel block storage.
//!
//! Uses Structure-of-Arrays (SoA) layout: each voxel field is stored in a
//! separate contiguous array, keeping the hot distance array dense for
//! query-heavy workloads.

use serde::{Deserialize, Serialize};

use crate::core::{EsdfVoxel, LocalCoord};

/// A fixed-size cube of ESDF voxels.
///
/// Side length `N` is set at construction; the block owns `N³` voxels
/// addressed by [`LocalCoord`] with linear layout `x + N*(y + N*z)`.
/// Out-of-range local indices are a programming error and panic.
///
/// ## Memory Layout
///
/// ```text
/// distances: [D D D D D D D D ...]   f32, f32::MAX when unobserved
/// weights:   [W W W W W W W W ...]   f32, 0 when unobserved or propagated
/// observed:  [O O O O O O O O ...]   u8, 0 or 1
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoxelBlock {
    distances: Vec<f32>,
    weights: Vec<f32>,
    observed: Vec<u8>,
    voxels_per_side: usize,
}

impl VoxelBlock {
    /// Create a block with all voxels in the unobserved state.
    pub fn new(voxels_per_side: usize) -> Self {
        let count = voxels_per_side * voxels_per_side * voxels_per_side;
        Self {
            distances: vec![f32::MAX; count],
            weights: vec![0.0; count],
            observed: vec![0; count],
            voxels_per_side,
        }
    }

    /// Side length in voxels.
    #[inline]
    pub fn voxels_per_side(&self) -> usize {
        self.voxels_per_side
    }

    /// Total number of voxels in the block.
    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    fn index(&self, local: LocalCoord) -> usize {
        debug_assert!(
            local.x < self.voxels_per_side
                && local.y < self.voxels_per_side
                && local.z < self.voxels_per_side
        );
        local.linear_index(self.voxels_per_side)
    }

    /// Read the voxel at a local index.
    #[inline]
    pub fn voxel(&self, local: LocalCoord) -> EsdfVoxel {
        let i = self.index(local);
        EsdfVoxel {
            distance: self.distances[i],
            weight: self.weights[i],
            observed: self.observed[i] != 0,
        }
    }

    /// Mutable view of the voxel at a local index.
    #[inline]
    pub fn voxel_mut(&mut self, local: LocalCoord) -> VoxelMut<'_> {
        let i = self.index(local);
        VoxelMut {
            distance: &mut self.distances[i],
            weight: &mut self.weights[i],
            observed: &mut self.observed[i],
        }
    }

    /// Overwrite the voxel at a local index.
    #[inline]
    pub fn set_voxel(&mut self, local: LocalCoord, voxel: EsdfVoxel) {
        let i = self.index(local);
        self.distances[i] = voxel.distance;
        self.weights[i] = voxel.weight;
        self.observed[i] = voxel.observed as u8;
    }

    /// Reset every voxel to the unobserved state.
    pub fn clear(&mut self) {
        self.distances.fill(f32::MAX);
        self.weights.fill(0.0);
        self.observed.fill(0);
    }

    /// Number of observed voxels in the block.
    pub fn observed_count(&self) -> usize {
        self.observed.iter().filter(|&&o| o != 0).count()
    }

    /// True if any voxel has been observed.
    pub fn has_observed(&self) -> bool {
        self.observed.iter().any(|&o| o != 0)
    }

    /// Raw distance slice.
    #[inline]
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    /// Raw weight slice.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Raw observed-flag slice.
    #[inline]
    pub fn observed_flags(&self) -> &[u8] {
        &self.observed
    }

    /// Consistency check used when loading persisted blocks: array lengths
    /// must match the declared side length.
    pub(crate) fn is_consistent(&self) -> bool {
        let count = self.voxels_per_side * self.voxels_per_side * self.voxels_per_side;
        self.distances.len() == count
            && self.weights.len() == count
            && self.observed.len() == count
    }
}

/// Mutable reference to a single voxel's fields in the SoA storage.
pub struct VoxelMut<'a> {
    /// Signed distance (meters).
    pub distance: &'a mut f32,
    /// Fusion weight.
    pub weight: &'a mut f32,
    /// Observed flag (0 = unobserved, 1 = observed).
    pub observed: &'a mut u8,
}

impl<'a> VoxelMut<'a> {
    /// Whether the voxel has been observed.
    #[inline]
    pub fn is_observed(&self) -> bool {
        *self.observed != 0
    }

    /// Write a distance and mark the voxel observed.
    #[inline]
    pub fn set_distance(&mut self, distance: f32) {
        *self.distance = distance;
        *self.observed = 1;
    }

    /// Write distance and weight together and mark observed.
    #[inline]
    pub fn set(&mut self, distance: f32, weight: f32) {
        *self.distance = distance;
        *self.weight = weight;
        *self.observed = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_block_unobserved() {
        let block = VoxelBlock::new(8);
        assert_eq!(block.voxel_count(), 512);
        assert_eq!(block.observed_count(), 0);
        assert!(!block.has_observed());

        let voxel = block.voxel(LocalCoord::new(3, 4, 5));
        assert!(!voxel.observed);
        assert_eq!(voxel.weight, 0.0);
    }

    #[test]
    fn test_set_and_get() {
        let mut block = VoxelBlock::new(8);
        let local = LocalCoord::new(1, 2, 3);

        block.set_voxel(
            local,
            EsdfVoxel {
                distance: 0.25,
                weight: 2.0,
                observed: true,
            },
        );

        let voxel = block.voxel(local);
        assert_eq!(voxel.distance, 0.25);
        assert_eq!(voxel.weight, 2.0);
        assert!(voxel.observed);
        assert_eq!(block.observed_count(), 1);
    }

    #[test]
    fn test_voxel_mut() {
        let mut block = VoxelBlock::new(4);
        let local = LocalCoord::new(0, 0, 0);

        {
            let mut vm = block.voxel_mut(local);
            assert!(!vm.is_observed());
            vm.set(0.1, 1.0);
        }

        assert!(block.voxel(local).observed);
        assert_eq!(block.voxel(local).distance, 0.1);
    }

    #[test]
    fn test_clear() {
        let mut block = VoxelBlock::new(4);
        block.set_voxel(
            LocalCoord::new(1, 1, 1),
            EsdfVoxel {
                distance: 0.5,
                weight: 1.0,
                observed: true,
            },
        );
        assert!(block.has_observed());

        block.clear();
        assert!(!block.has_observed());
        assert_eq!(block.voxel(LocalCoord::new(1, 1, 1)).distance, f32::MAX);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        let block = VoxelBlock::new(4);
        // z = 4 is out of range for a side-4 block
        let _ = block.voxel(LocalCoord::new(0, 0, 4));
    }
}
