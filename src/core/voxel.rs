//! ESDF voxel type.

use serde::{Deserialize, Serialize};

/// A single voxel of the signed distance field.
///
/// Invariants maintained by the integrator:
/// - `weight >= 0`
/// - `observed` implies `distance` is finite
///
/// A positive `weight` marks a voxel that fused a direct surface
/// observation; voxels reached only by wavefront propagation stay at
/// `weight == 0` but are still `observed`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EsdfVoxel {
    /// Signed distance to the nearest surface (meters); negative inside
    /// obstacles. Only meaningful when `observed` is true.
    pub distance: f32,
    /// Accumulated observation weight.
    pub weight: f32,
    /// Whether the voxel has been written by the integrator.
    pub observed: bool,
}

impl EsdfVoxel {
    /// The unobserved state blocks are initialized to.
    #[inline]
    pub const fn unobserved() -> Self {
        Self {
            distance: f32::MAX,
            weight: 0.0,
            observed: false,
        }
    }

    /// True if this voxel holds a directly fused surface observation
    /// (as opposed to a propagated distance).
    #[inline]
    pub fn is_fused(&self) -> bool {
        self.observed && self.weight > 0.0
    }
}

impl Default for EsdfVoxel {
    fn default() -> Self {
        Self::unobserved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unobserved() {
        let voxel = EsdfVoxel::default();
        assert!(!voxel.observed);
        assert_eq!(voxel.weight, 0.0);
        assert!(!voxel.is_fused());
    }

    #[test]
    fn test_fused_requires_weight() {
        let propagated = EsdfVoxel {
            distance: 0.5,
            weight: 0.0,
            observed: true,
        };
        assert!(!propagated.is_fused());

        let fused = EsdfVoxel {
            distance: 0.0,
            weight: 1.0,
            observed: true,
        };
        assert!(fused.is_fused());
    }
}
