//! Core types for the vyoma-map library.
//!
//! This module provides the fundamental types used throughout the mapping
//! pipeline.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`WorldPoint`]: floating-point world coordinates in meters
//! - [`VoxelCoord`]: global integer voxel indices (unbounded, signed)
//! - [`BlockCoord`]: integer block indices keying the sparse layer
//! - [`LocalCoord`]: per-block voxel indices in `[0, N)`
//!
//! ### Field Data
//! - [`EsdfVoxel`]: signed distance, fusion weight, and observed flag
//!
//! ### Input
//! - [`SurfaceObservation`]: a surface sample with known signed distance,
//!   the unit of work consumed by the integrator

mod observation;
mod point;
mod voxel;

pub use observation::SurfaceObservation;
pub use point::{BlockCoord, LocalCoord, VoxelCoord, WorldPoint};
pub use voxel::EsdfVoxel;
