//! Integrator configuration.

use serde::{Deserialize, Serialize};

/// Parameters controlling ESDF fusion and wavefront propagation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntegratorConfig {
    /// Maximum propagation distance from the seed surface (meters).
    /// Bounds the region touched by a batch and the magnitude any voxel
    /// can hold.
    pub max_distance: f32,

    /// Weight cap for fused surface voxels. Fusion saturates here so a
    /// long-lived voxel can still be moved by fresh observations.
    pub max_weight: f32,

    /// Distance reported for unobserved space. `None` means use
    /// `max_distance` as the sentinel.
    pub default_distance: Option<f32>,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            max_distance: 2.0,
            max_weight: 100.0,
            default_distance: None,
        }
    }
}

impl IntegratorConfig {
    /// The sentinel distance reported for unobserved space.
    #[inline]
    pub fn effective_default_distance(&self) -> f32 {
        self.default_distance.unwrap_or(self.max_distance)
    }

    /// True if the parameters are usable.
    pub fn is_valid(&self) -> bool {
        self.max_distance > 0.0
            && self.max_distance.is_finite()
            && self.max_weight > 0.0
            && self.max_weight.is_finite()
            && self.default_distance.map_or(true, |d| d.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IntegratorConfig::default();
        assert_eq!(config.max_distance, 2.0);
        assert_eq!(config.effective_default_distance(), 2.0);
        assert!(config.is_valid());
    }

    #[test]
    fn test_explicit_sentinel() {
        let config = IntegratorConfig {
            default_distance: Some(5.0),
            ..Default::default()
        };
        assert_eq!(config.effective_default_distance(), 5.0);
    }

    #[test]
    fn test_invalid_config() {
        let config = IntegratorConfig {
            max_distance: 0.0,
            ..Default::default()
        };
        assert!(!config.is_valid());
    }
}
