//! Incremental ESDF integration.
//!
//! The integrator consumes batches of surface observations and maintains
//! the signed distance field:
//!
//! 1. **Fusion**: each observation is merged into its containing voxel by
//!    weighted average, saturating at a configurable weight cap.
//! 2. **Propagation**: fused voxels seed a priority-queue wavefront that
//!    relaxes 26-connected neighbors outward until the configured maximum
//!    distance, leaving every touched voxel with the distance to the
//!    nearest known surface, signed negative inside obstacles.
//!
//! Computation is bounded to the region near changed geometry; a local
//! update never triggers full re-propagation.

mod config;
mod wavefront;

pub use config::IntegratorConfig;
pub use wavefront::{EsdfIntegrator, IntegrateResult};
