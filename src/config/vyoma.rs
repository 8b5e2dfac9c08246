//! Main VyomaConfig and conversion methods.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::block::MapConfig;

use super::error::ConfigLoadError;
use super::integrator::IntegratorSection;
use super::map::MapSection;
use super::persistence::PersistenceSection;

/// Full vyoma-map configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct VyomaConfig {
    /// Map settings
    #[serde(default)]
    pub map: MapSection,

    /// Integrator settings
    #[serde(default)]
    pub integrator: IntegratorSection,

    /// Persistence settings
    #[serde(default)]
    pub persistence: PersistenceSection,
}

impl VyomaConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Convert to MapConfig for EsdfMap
    pub fn to_map_config(&self) -> MapConfig {
        MapConfig {
            volume: self.map.to_volume_config(),
            integrator: self.integrator.to_integrator_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VyomaConfig::default();
        assert_eq!(config.map.voxel_size, 0.10);
        assert_eq!(config.map.voxels_per_side, 16);
        assert_eq!(config.integrator.max_distance, 2.0);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = VyomaConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: VyomaConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.map.voxel_size, config.map.voxel_size);
        assert_eq!(parsed.integrator.max_distance, config.integrator.max_distance);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = VyomaConfig::from_yaml("map:\n  voxel_size: 0.05\n").unwrap();
        assert_eq!(config.map.voxel_size, 0.05);
        assert_eq!(config.map.voxels_per_side, 16);
        assert_eq!(config.integrator.max_weight, 100.0);
    }

    #[test]
    fn test_to_map_config() {
        let config = VyomaConfig::default();
        let map_config = config.to_map_config();
        assert_eq!(map_config.volume.voxel_size, 0.10);
        assert_eq!(map_config.integrator.max_distance, 2.0);
    }

    #[test]
    fn test_bad_yaml_fails() {
        assert!(VyomaConfig::from_yaml("map: [not a mapping").is_err());
    }
}
