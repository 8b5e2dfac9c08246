//! Map configuration section.

use serde::{Deserialize, Serialize};

use crate::block::VolumeConfig;

use super::defaults;

/// Map configuration section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapSection {
    /// Voxel edge length (meters)
    #[serde(default = "defaults::voxel_size")]
    pub voxel_size: f32,

    /// Voxels per block edge
    #[serde(default = "defaults::voxels_per_side")]
    pub voxels_per_side: usize,
}

impl Default for MapSection {
    fn default() -> Self {
        Self {
            voxel_size: 0.10,
            voxels_per_side: 16,
        }
    }
}

impl MapSection {
    /// Convert to VolumeConfig
    pub fn to_volume_config(&self) -> VolumeConfig {
        VolumeConfig {
            voxel_size: self.voxel_size,
            voxels_per_side: self.voxels_per_side,
        }
    }
}
