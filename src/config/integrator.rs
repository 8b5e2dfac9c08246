//! Integrator configuration section.

use serde::{Deserialize, Serialize};

use crate::integrator::IntegratorConfig;

use super::defaults;

/// Integrator configuration section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntegratorSection {
    /// Maximum propagation distance (meters)
    #[serde(default = "defaults::max_distance")]
    pub max_distance: f32,

    /// Fusion weight cap
    #[serde(default = "defaults::max_weight")]
    pub max_weight: f32,

    /// Sentinel distance for unobserved space; omit to use max_distance
    #[serde(default)]
    pub default_distance: Option<f32>,
}

impl Default for IntegratorSection {
    fn default() -> Self {
        Self {
            max_distance: 2.0,
            max_weight: 100.0,
            default_distance: None,
        }
    }
}

impl IntegratorSection {
    /// Convert to IntegratorConfig
    pub fn to_integrator_config(&self) -> IntegratorConfig {
        IntegratorConfig {
            max_distance: self.max_distance,
            max_weight: self.max_weight,
            default_distance: self.default_distance,
        }
    }
}
