//! Test utilities for vyoma-map integration tests.
//!
//! Provides helpers for building observation batches and pre-integrated
//! maps with known geometry.

#![allow(dead_code)]

use vyoma_map::{EsdfMap, IntegratorConfig, MapConfig, SurfaceObservation, VolumeConfig, WorldPoint};

/// Default test map: 10cm voxels, 1m propagation bound.
pub fn test_map() -> EsdfMap {
    EsdfMap::new(test_config())
}

/// Configuration shared by the integration tests.
pub fn test_config() -> MapConfig {
    MapConfig {
        volume: VolumeConfig {
            voxel_size: 0.1,
            voxels_per_side: 16,
        },
        integrator: IntegratorConfig {
            max_distance: 1.0,
            ..Default::default()
        },
    }
}

/// Surface observations for a flat patch at height `z`, covering
/// `[-half_extent, half_extent]²` with the given spacing. All samples
/// carry distance 0 (they lie on the surface).
pub fn flat_patch_observations(half_extent: f32, spacing: f32, z: f32) -> Vec<SurfaceObservation> {
    let steps = (2.0 * half_extent / spacing).round() as i32;
    let mut batch = Vec::new();
    for iy in 0..=steps {
        for ix in 0..=steps {
            let x = -half_extent + ix as f32 * spacing;
            let y = -half_extent + iy as f32 * spacing;
            batch.push(SurfaceObservation::new(WorldPoint::new(x, y, z), 0.0));
        }
    }
    batch
}

/// A map with a 1×1m flat surface integrated at z = 0.
pub fn flat_floor_map() -> EsdfMap {
    let mut map = test_map();
    map.integrate(&flat_patch_observations(0.5, 0.1, 0.0));
    map
}
