//! Sparse block storage for the signed distance field.
//!
//! Voxels are grouped into fixed-size cubes ([`VoxelBlock`], SoA layout)
//! owned by a spatial hash ([`BlockLayer`]) keyed on integer block
//! coordinates. The layer grows lazily as the integrator writes and is
//! never grown by queries.
//!
//! ## Architecture
//!
//! ```text
//! WorldPoint ──► VoxelCoord ──► (BlockCoord, LocalCoord)
//!                                   │            │
//!                                   ▼            ▼
//!                          HashMap lookup   linear index
//!                                   │            │
//!                                   ▼            ▼
//!                              VoxelBlock ──► EsdfVoxel
//! ```
//!
//! ## Key Types
//!
//! - [`BlockLayer`]: sparse block map with world↔voxel conversion and
//!   trilinear-interpolated distance/gradient queries
//! - [`VoxelBlock`]: fixed-size SoA voxel cube
//! - [`VoxelMut`]: mutable view of one voxel's fields
//! - [`VolumeConfig`] / [`MapConfig`]: construction parameters

mod config;
mod layer;
mod voxel_block;

pub use config::{MapConfig, VolumeConfig};
pub use layer::BlockLayer;
pub use voxel_block::{VoxelBlock, VoxelMut};
