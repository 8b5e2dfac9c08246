//! Sparse block layer: the spatial hash owning all voxel blocks.

use std::collections::HashMap;

use crate::core::{BlockCoord, EsdfVoxel, VoxelCoord, WorldPoint};

use super::voxel_block::{VoxelBlock, VoxelMut};

/// Sparse, unbounded voxel storage.
///
/// Maps integer block coordinates to owned [`VoxelBlock`]s. Blocks are
/// created lazily on first write and never destroyed implicitly; only
/// [`clear`](BlockLayer::clear) removes them. `voxel_size` and
/// `voxels_per_side` are fixed at construction and define the transform
/// between world positions and (block, voxel) indices.
///
/// Two lookup paths exist by contract:
/// - [`block_or_insert`](BlockLayer::block_or_insert) /
///   [`voxel_or_insert`](BlockLayer::voxel_or_insert): allocate on miss,
///   used only by the integrator
/// - [`block`](BlockLayer::block) / [`voxel`](BlockLayer::voxel): read-only,
///   never allocate, used by queries
#[derive(Clone, Debug)]
pub struct BlockLayer {
    blocks: HashMap<BlockCoord, VoxelBlock>,
    voxel_size: f32,
    /// Pre-computed 1.0 / voxel_size for faster world-to-voxel conversion.
    inv_voxel_size: f32,
    voxels_per_side: usize,
}

impl BlockLayer {
    /// Create an empty layer.
    pub fn new(voxel_size: f32, voxels_per_side: usize) -> Self {
        assert!(voxel_size > 0.0 && voxel_size.is_finite());
        assert!(voxels_per_side >= 2);
        Self {
            blocks: HashMap::new(),
            voxel_size,
            inv_voxel_size: 1.0 / voxel_size,
            voxels_per_side,
        }
    }

    /// Rebuild a layer from persisted blocks. Used by the io module.
    pub(crate) fn from_blocks(
        voxel_size: f32,
        voxels_per_side: usize,
        blocks: HashMap<BlockCoord, VoxelBlock>,
    ) -> Self {
        let mut layer = Self::new(voxel_size, voxels_per_side);
        layer.blocks = blocks;
        layer
    }

    // === Basic Properties ===

    /// Edge length of one voxel in meters.
    #[inline]
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// Side length of one block in voxels.
    #[inline]
    pub fn voxels_per_side(&self) -> usize {
        self.voxels_per_side
    }

    /// Edge length of one block in meters.
    #[inline]
    pub fn block_size(&self) -> f32 {
        self.voxel_size * self.voxels_per_side as f32
    }

    /// Number of allocated blocks.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// True if no blocks are allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    // === Coordinate Conversion ===

    /// Convert a world position to its containing global voxel coordinate.
    #[inline]
    pub fn world_to_voxel(&self, point: WorldPoint) -> VoxelCoord {
        VoxelCoord::new(
            (point.x * self.inv_voxel_size).floor() as i64,
            (point.y * self.inv_voxel_size).floor() as i64,
            (point.z * self.inv_voxel_size).floor() as i64,
        )
    }

    /// World position of a voxel's center.
    #[inline]
    pub fn voxel_center(&self, coord: VoxelCoord) -> WorldPoint {
        WorldPoint::new(
            (coord.x as f32 + 0.5) * self.voxel_size,
            (coord.y as f32 + 0.5) * self.voxel_size,
            (coord.z as f32 + 0.5) * self.voxel_size,
        )
    }

    // === Block Access ===

    /// Read-only block lookup; never allocates.
    #[inline]
    pub fn block(&self, coord: BlockCoord) -> Option<&VoxelBlock> {
        self.blocks.get(&coord)
    }

    /// Mutable block lookup; never allocates.
    #[inline]
    pub fn block_mut(&mut self, coord: BlockCoord) -> Option<&mut VoxelBlock> {
        self.blocks.get_mut(&coord)
    }

    /// Return the block, allocating a fresh unobserved one on miss.
    pub fn block_or_insert(&mut self, coord: BlockCoord) -> &mut VoxelBlock {
        let n = self.voxels_per_side;
        self.blocks.entry(coord).or_insert_with(|| VoxelBlock::new(n))
    }

    /// True if a block is allocated at this coordinate.
    #[inline]
    pub fn contains_block(&self, coord: BlockCoord) -> bool {
        self.blocks.contains_key(&coord)
    }

    /// Iterate over allocated blocks.
    pub fn iter(&self) -> impl Iterator<Item = (&BlockCoord, &VoxelBlock)> {
        self.blocks.iter()
    }

    /// Drop all blocks, returning the layer to its empty state.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    // === Voxel Access ===

    /// Read the voxel at a global coordinate; `None` if its block is not
    /// allocated. Never allocates.
    #[inline]
    pub fn voxel(&self, coord: VoxelCoord) -> Option<EsdfVoxel> {
        let (block_coord, local) = coord.split(self.voxels_per_side);
        self.blocks.get(&block_coord).map(|b| b.voxel(local))
    }

    /// Mutable view of the voxel at a global coordinate; never allocates.
    #[inline]
    pub fn voxel_mut(&mut self, coord: VoxelCoord) -> Option<VoxelMut<'_>> {
        let (block_coord, local) = coord.split(self.voxels_per_side);
        self.blocks.get_mut(&block_coord).map(|b| b.voxel_mut(local))
    }

    /// Mutable view of the voxel at a global coordinate, allocating its
    /// block if needed. Integrator-only path.
    #[inline]
    pub fn voxel_or_insert(&mut self, coord: VoxelCoord) -> VoxelMut<'_> {
        let (block_coord, local) = coord.split(self.voxels_per_side);
        self.block_or_insert(block_coord).voxel_mut(local)
    }

    /// True if the voxel containing this world point has been observed.
    #[inline]
    pub fn is_observed(&self, point: WorldPoint) -> bool {
        if !point.is_finite() {
            return false;
        }
        self.voxel(self.world_to_voxel(point))
            .map(|v| v.observed)
            .unwrap_or(false)
    }

    // === Statistics ===

    /// Total observed voxels across all blocks.
    pub fn observed_voxels(&self) -> usize {
        self.blocks.values().map(|b| b.observed_count()).sum()
    }

    /// Total allocated voxels across all blocks.
    pub fn allocated_voxels(&self) -> usize {
        self.blocks.values().map(|b| b.voxel_count()).sum()
    }

    // === Interpolated Queries ===

    /// Signed distance at a world position via trilinear interpolation over
    /// the 8 surrounding voxel centers.
    ///
    /// Unobserved or unallocated corners contribute `default_distance` and
    /// force the returned observed flag to `false`; the blended value is
    /// still returned. Non-finite points yield
    /// `(default_distance, false)`.
    pub fn interpolated_distance(&self, point: WorldPoint, default_distance: f32) -> (f32, bool) {
        if !point.is_finite() {
            return (default_distance, false);
        }

        // Voxel-center grid coordinates of the query point
        let gx = point.x * self.inv_voxel_size - 0.5;
        let gy = point.y * self.inv_voxel_size - 0.5;
        let gz = point.z * self.inv_voxel_size - 0.5;

        let x0 = gx.floor();
        let y0 = gy.floor();
        let z0 = gz.floor();

        let fx = gx - x0;
        let fy = gy - y0;
        let fz = gz - z0;

        let base = VoxelCoord::new(x0 as i64, y0 as i64, z0 as i64);

        let mut all_observed = true;
        let mut corners = [0.0f32; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let offset = VoxelCoord::new((i & 1) as i64, ((i >> 1) & 1) as i64, ((i >> 2) & 1) as i64);
            let coord = base.offset(offset.x, offset.y, offset.z);
            match self.voxel(coord) {
                Some(v) if v.observed => *corner = v.distance,
                _ => {
                    *corner = default_distance;
                    all_observed = false;
                }
            }
        }

        // Trilinear blend: X, then Y, then Z
        let d00 = corners[0] * (1.0 - fx) + corners[1] * fx;
        let d10 = corners[2] * (1.0 - fx) + corners[3] * fx;
        let d01 = corners[4] * (1.0 - fx) + corners[5] * fx;
        let d11 = corners[6] * (1.0 - fx) + corners[7] * fx;

        let d0 = d00 * (1.0 - fy) + d10 * fy;
        let d1 = d01 * (1.0 - fy) + d11 * fy;

        (d0 * (1.0 - fz) + d1 * fz, all_observed)
    }

    /// Signed distance and gradient at a world position.
    ///
    /// The gradient is computed by central finite differences of the
    /// interpolated field at ±half a voxel along each axis. The observed
    /// flag is true only when the center and all six offset samples are
    /// fully observed.
    pub fn interpolated_gradient(
        &self,
        point: WorldPoint,
        default_distance: f32,
    ) -> (f32, [f32; 3], bool) {
        if !point.is_finite() {
            return (default_distance, [0.0; 3], false);
        }

        let (distance, mut observed) = self.interpolated_distance(point, default_distance);

        let h = self.voxel_size * 0.5;
        let mut gradient = [0.0f32; 3];
        for (axis, g) in gradient.iter_mut().enumerate() {
            let mut forward = point;
            let mut backward = point;
            match axis {
                0 => {
                    forward.x += h;
                    backward.x -= h;
                }
                1 => {
                    forward.y += h;
                    backward.y -= h;
                }
                _ => {
                    forward.z += h;
                    backward.z -= h;
                }
            }
            let (df, of) = self.interpolated_distance(forward, default_distance);
            let (db, ob) = self.interpolated_distance(backward, default_distance);
            observed = observed && of && ob;
            *g = (df - db) / (2.0 * h);
        }

        (distance, gradient, observed)
    }
}
