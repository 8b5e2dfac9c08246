//! Surface observation input type for the integrator.

use serde::{Deserialize, Serialize};

use super::WorldPoint;

/// A surface sample with known signed distance to the nearest surface.
///
/// Typically produced by depth sensing or an upstream TSDF layer: `point`
/// lies on or near a surface crossing, `distance` is the signed distance at
/// that point (negative inside the obstacle).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SurfaceObservation {
    /// Sample position in world coordinates.
    pub point: WorldPoint,
    /// Signed distance to the nearest surface at `point` (meters).
    pub distance: f32,
    /// Observation weight; larger values dominate the weighted fusion.
    pub weight: f32,
}

impl SurfaceObservation {
    /// Create an observation with unit weight.
    #[inline]
    pub fn new(point: WorldPoint, distance: f32) -> Self {
        Self {
            point,
            distance,
            weight: 1.0,
        }
    }

    /// Create an observation with an explicit weight.
    #[inline]
    pub fn weighted(point: WorldPoint, distance: f32, weight: f32) -> Self {
        Self {
            point,
            distance,
            weight,
        }
    }

    /// True if the observation is well-formed: finite position and
    /// distance, finite positive weight. Malformed observations are
    /// skipped by the integrator, not fatal to the batch.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.point.is_finite() && self.distance.is_finite() && self.weight.is_finite() && self.weight > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_observation() {
        let obs = SurfaceObservation::new(WorldPoint::new(1.0, 2.0, 3.0), 0.05);
        assert!(obs.is_valid());
        assert_eq!(obs.weight, 1.0);
    }

    #[test]
    fn test_invalid_observations() {
        let p = WorldPoint::ZERO;
        assert!(!SurfaceObservation::new(WorldPoint::new(f32::NAN, 0.0, 0.0), 0.0).is_valid());
        assert!(!SurfaceObservation::new(p, f32::INFINITY).is_valid());
        assert!(!SurfaceObservation::weighted(p, 0.0, 0.0).is_valid());
        assert!(!SurfaceObservation::weighted(p, 0.0, -1.0).is_valid());
        assert!(!SurfaceObservation::weighted(p, 0.0, f32::NAN).is_valid());
    }
}
