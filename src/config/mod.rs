//! Unified configuration loading for vyoma-map.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vyoma_map::config::VyomaConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = VyomaConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = VyomaConfig::default();
//!
//! // Convert to the runtime config
//! let map_config = config.to_map_config();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`MapSection`] | Voxel size and block granularity |
//! | [`IntegratorSection`] | Propagation bound, fusion weights, sentinel |
//! | [`PersistenceSection`] | Map file output location |
//!
//! ## Example YAML
//!
//! ```yaml
//! map:
//!   voxel_size: 0.10       # 10cm voxels
//!   voxels_per_side: 16    # 1.6m blocks
//!
//! integrator:
//!   max_distance: 2.0      # propagation bound (meters)
//!   max_weight: 100.0
//!
//! persistence:
//!   output_dir: ./output
//!   map_file: map.vyom
//! ```

mod defaults;
mod error;
mod integrator;
mod map;
mod persistence;
mod vyoma;

// Re-export main types
pub use error::ConfigLoadError;
pub use vyoma::VyomaConfig;

// Re-export section types
pub use integrator::IntegratorSection;
pub use map::MapSection;
pub use persistence::PersistenceSection;
