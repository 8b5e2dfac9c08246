//! Persistence configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Persistence settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistenceSection {
    /// Output directory path
    #[serde(default = "defaults::output_dir")]
    pub output_dir: String,

    /// Map file name within the output directory
    #[serde(default = "defaults::map_file")]
    pub map_file: String,
}

impl Default for PersistenceSection {
    fn default() -> Self {
        Self {
            output_dir: "./output".to_string(),
            map_file: "map.vyom".to_string(),
        }
    }
}

impl PersistenceSection {
    /// Full path of the configured map file.
    pub fn map_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.output_dir).join(&self.map_file)
    }
}
