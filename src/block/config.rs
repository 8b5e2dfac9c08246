//! Configuration types for the sparse voxel volume.

use serde::{Deserialize, Serialize};

use crate::integrator::IntegratorConfig;

/// Geometry of the sparse voxel volume.
///
/// Both parameters are immutable once a map is constructed; together they
/// define the world-to-voxel transform and the block hashing granularity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Meters per voxel (e.g., 0.10 = 10cm voxels)
    pub voxel_size: f32,

    /// Voxels per block edge (blocks hold voxels_per_side³ voxels)
    pub voxels_per_side: usize,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            voxel_size: 0.10,   // 10cm voxels
            voxels_per_side: 16, // 1.6m blocks
        }
    }
}

impl VolumeConfig {
    /// Edge length of one block in meters.
    pub fn block_size(&self) -> f32 {
        self.voxel_size * self.voxels_per_side as f32
    }

    /// Memory footprint of one allocated block in bytes.
    pub fn block_memory_bytes(&self) -> usize {
        // distance f32 + weight f32 + observed u8 per voxel
        let voxels = self.voxels_per_side.pow(3);
        voxels * (4 + 4 + 1)
    }

    /// True if the parameters describe a usable volume.
    pub fn is_valid(&self) -> bool {
        self.voxel_size > 0.0 && self.voxel_size.is_finite() && self.voxels_per_side >= 2
    }
}

/// Full map configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MapConfig {
    /// Volume geometry (voxel size, block size)
    pub volume: VolumeConfig,
    /// Integrator parameters (propagation bound, fusion weights)
    #[serde(default)]
    pub integrator: IntegratorConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VolumeConfig::default();
        assert_eq!(config.voxel_size, 0.10);
        assert_eq!(config.voxels_per_side, 16);
        assert!(config.is_valid());
    }

    #[test]
    fn test_block_memory() {
        let config = VolumeConfig::default();
        // 16³ voxels * 9 bytes = 36,864 bytes per block
        assert_eq!(config.block_memory_bytes(), 36864);
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = VolumeConfig::default();
        config.voxel_size = 0.0;
        assert!(!config.is_valid());

        let mut config = VolumeConfig::default();
        config.voxels_per_side = 1;
        assert!(!config.is_valid());
    }
}
