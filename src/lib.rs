//! # vyoma-map
//!
//! Sparse voxel Euclidean signed distance field (ESDF) mapping library.
//!
//! ## Overview
//!
//! vyoma-map maintains a 3D signed distance field over an unbounded sparse
//! voxel grid:
//!
//! - **Sparse block storage** - voxels grouped into fixed-size cubes,
//!   hashed by integer block coordinate, allocated lazily on write
//! - **Incremental integration** - surface observations are fused by
//!   weighted average and distances propagate outward via a bounded
//!   priority-queue wavefront
//! - **Batch queries** - distance, gradient, and observed flags for
//!   batches of world-space points, with trilinear interpolation
//! - **Persistence** - maps save to and load from a native binary format
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vyoma_map::{EsdfMap, MapConfig, SurfaceObservation, WorldPoint};
//!
//! // Create map with default configuration
//! let mut map = EsdfMap::new(MapConfig::default());
//!
//! // Integrate a batch of surface observations
//! let batch = vec![SurfaceObservation::new(WorldPoint::new(0.0, 0.0, 0.0), 0.0)];
//! let result = map.integrate(&batch);
//! println!("Updated {} voxels", result.updated_voxels);
//!
//! // Batch query: distances and gradients at world points
//! let points = vec![WorldPoint::new(0.0, 0.0, 0.1)];
//! let mut distances = vec![0.0; points.len()];
//! let mut gradients = vec![[0.0; 3]; points.len()];
//! let mut observed = vec![false; points.len()];
//! map.distance_and_gradient_at_position(&points, &mut distances, &mut gradients, &mut observed)?;
//! ```
//!
//! ## Coordinate System
//!
//! Right-handed metric coordinates; a voxel with global index `(i, j, k)`
//! covers the world cube `[i*s, (i+1)*s) × [j*s, (j+1)*s) × [k*s, (k+1)*s)`
//! for voxel size `s`. Distances are in meters, signed negative inside
//! obstacles.

#![warn(missing_docs)]

use std::path::Path;

use thiserror::Error;

// Core types
pub mod core;

// Sparse block storage
pub mod block;

// ESDF integration
pub mod integrator;

// Unified configuration
pub mod config;

// Persistence (save/load)
pub mod io;

// Thread-safe shared handle
pub mod shared;

// Re-export commonly used types
pub use crate::core::{
    BlockCoord, EsdfVoxel, LocalCoord, SurfaceObservation, VoxelCoord, WorldPoint,
};

pub use block::{BlockLayer, MapConfig, VolumeConfig, VoxelBlock, VoxelMut};

pub use config::{ConfigLoadError, VyomaConfig};

pub use integrator::{EsdfIntegrator, IntegrateResult, IntegratorConfig};

pub use io::IoError;

pub use shared::SharedEsdfMap;

/// Errors returned by batch query operations.
#[derive(Debug, Error)]
pub enum QueryError {
    /// An output buffer's length disagrees with the input point count.
    #[error("output buffer `{name}` has length {actual}, expected {expected}")]
    ShapeMismatch {
        /// Name of the offending buffer.
        name: &'static str,
        /// Required length (the input point count).
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
}

#[inline]
fn check_len(name: &'static str, expected: usize, actual: usize) -> Result<(), QueryError> {
    if expected != actual {
        return Err(QueryError::ShapeMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Map size and coverage statistics
#[derive(Clone, Copy, Debug, Default)]
pub struct MapStats {
    /// Allocated blocks
    pub allocated_blocks: usize,
    /// Allocated voxels (observed or not)
    pub allocated_voxels: usize,
    /// Voxels written by the integrator
    pub observed_voxels: usize,
    /// Observed volume (m³)
    pub observed_volume_m3: f32,
    /// Estimated voxel storage in bytes
    pub memory_bytes: usize,
}

/// The main ESDF map
///
/// This is the primary type for interacting with the distance field. It
/// owns the sparse block storage and an integrator; `voxel_size` and
/// `voxels_per_side` are fixed at construction.
///
/// Queries are strictly read-only and never allocate blocks; points in
/// unallocated or unobserved space report `observed = false` with the
/// configured sentinel distance
/// ([`default_distance`](EsdfMap::default_distance), which defaults to the
/// integrator's `max_distance`).
pub struct EsdfMap {
    /// Sparse voxel storage
    layer: BlockLayer,
    /// Incremental integrator with diagnostics counters
    integrator: EsdfIntegrator,
    /// Configuration
    config: MapConfig,
}

impl EsdfMap {
    /// Create an empty map.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (non-positive voxel size,
    /// `voxels_per_side < 2`, or a non-finite integrator bound).
    pub fn new(config: MapConfig) -> Self {
        assert!(config.volume.is_valid(), "invalid volume config");
        assert!(config.integrator.is_valid(), "invalid integrator config");

        let layer = BlockLayer::new(config.volume.voxel_size, config.volume.voxels_per_side);
        let integrator = EsdfIntegrator::new(config.integrator.clone());

        Self {
            layer,
            integrator,
            config,
        }
    }

    /// Construct a map from a serialized .vyom file.
    ///
    /// Volume parameters come from the file; the integrator uses defaults.
    pub fn load(path: &Path) -> Result<Self, IoError> {
        Self::load_with_integrator(path, IntegratorConfig::default())
    }

    /// Construct a map from a serialized .vyom file with an explicit
    /// integrator configuration.
    pub fn load_with_integrator(
        path: &Path,
        integrator_config: IntegratorConfig,
    ) -> Result<Self, IoError> {
        let layer = io::load_map(path)?;
        let config = MapConfig {
            volume: VolumeConfig {
                voxel_size: layer.voxel_size(),
                voxels_per_side: layer.voxels_per_side(),
            },
            integrator: integrator_config.clone(),
        };

        Ok(Self {
            layer,
            integrator: EsdfIntegrator::new(integrator_config),
            config,
        })
    }

    /// Save the map to a .vyom file.
    pub fn save(&self, path: &Path) -> Result<(), IoError> {
        io::save_map(&self.layer, path)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Get the block layer.
    pub fn layer(&self) -> &BlockLayer {
        &self.layer
    }

    /// Get mutable block layer.
    pub fn layer_mut(&mut self) -> &mut BlockLayer {
        &mut self.layer
    }

    /// Get the configuration.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Voxel edge length in meters.
    pub fn voxel_size(&self) -> f32 {
        self.layer.voxel_size()
    }

    /// Voxels per block edge.
    pub fn voxels_per_side(&self) -> usize {
        self.layer.voxels_per_side()
    }

    /// Block edge length in meters.
    pub fn block_size(&self) -> f32 {
        self.layer.block_size()
    }

    /// The sentinel distance reported for unobserved space.
    pub fn default_distance(&self) -> f32 {
        self.config.integrator.effective_default_distance()
    }

    /// Total malformed observations skipped since construction.
    pub fn rejected_observations(&self) -> u64 {
        self.integrator.rejected_total()
    }

    /// Get map statistics.
    pub fn stats(&self) -> MapStats {
        let allocated_blocks = self.layer.block_count();
        let allocated_voxels = self.layer.allocated_voxels();
        let observed_voxels = self.layer.observed_voxels();
        let voxel_volume = self.voxel_size().powi(3);

        MapStats {
            allocated_blocks,
            allocated_voxels,
            observed_voxels,
            observed_volume_m3: observed_voxels as f32 * voxel_volume,
            memory_bytes: allocated_blocks * self.config.volume.block_memory_bytes(),
        }
    }

    /// Drop all blocks, returning the map to its empty state. Diagnostics
    /// counters are kept.
    pub fn clear(&mut self) {
        self.layer.clear();
    }

    // =========================================================================
    // INTEGRATION
    // =========================================================================

    /// Integrate a batch of surface observations.
    ///
    /// This is the only operation that mutates voxels. Malformed
    /// observations are skipped and counted, never fatal to the batch; a
    /// batch with no valid observation is a no-op.
    pub fn integrate(&mut self, observations: &[SurfaceObservation]) -> IntegrateResult {
        self.integrator.integrate(&mut self.layer, observations)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Whether the voxel containing this point has been observed.
    pub fn is_observed_at(&self, point: WorldPoint) -> bool {
        self.layer.is_observed(point)
    }

    /// Interpolated signed distance at a point.
    ///
    /// Returns `(distance, observed)`; unobserved entries report the
    /// sentinel blended with any observed neighbors and `observed = false`.
    pub fn distance_at(&self, point: WorldPoint) -> (f32, bool) {
        self.layer
            .interpolated_distance(point, self.default_distance())
    }

    /// Interpolated signed distance and gradient at a point.
    pub fn distance_and_gradient_at(&self, point: WorldPoint) -> (f32, [f32; 3], bool) {
        self.layer
            .interpolated_gradient(point, self.default_distance())
    }

    /// Batch observed query.
    ///
    /// Writes one flag per input point into `out`. Fails with
    /// [`QueryError::ShapeMismatch`] if `out.len() != points.len()`.
    pub fn is_observed(&self, points: &[WorldPoint], out: &mut [bool]) -> Result<(), QueryError> {
        check_len("observed", points.len(), out.len())?;

        for (point, flag) in points.iter().zip(out.iter_mut()) {
            *flag = self.is_observed_at(*point);
        }
        Ok(())
    }

    /// Batch distance query.
    ///
    /// Writes one distance and one observed flag per input point. All
    /// buffers must have the same length as `points`.
    pub fn distance_at_position(
        &self,
        points: &[WorldPoint],
        distances: &mut [f32],
        observed: &mut [bool],
    ) -> Result<(), QueryError> {
        check_len("distances", points.len(), distances.len())?;
        check_len("observed", points.len(), observed.len())?;

        for (i, point) in points.iter().enumerate() {
            let (d, obs) = self.distance_at(*point);
            distances[i] = d;
            observed[i] = obs;
        }
        Ok(())
    }

    /// Batch distance and gradient query.
    ///
    /// Writes one distance, one gradient, and one observed flag per input
    /// point. All buffers must have the same length as `points`.
    pub fn distance_and_gradient_at_position(
        &self,
        points: &[WorldPoint],
        distances: &mut [f32],
        gradients: &mut [[f32; 3]],
        observed: &mut [bool],
    ) -> Result<(), QueryError> {
        check_len("distances", points.len(), distances.len())?;
        check_len("gradients", points.len(), gradients.len())?;
        check_len("observed", points.len(), observed.len())?;

        for (i, point) in points.iter().enumerate() {
            let (d, g, obs) = self.distance_and_gradient_at(*point);
            distances[i] = d;
            gradients[i] = g;
            observed[i] = obs;
        }
        Ok(())
    }
}
