//! Map persistence.
//!
//! Provides save/load for the native binary .vyom format, preserving the
//! full block layer (coordinates plus voxel arrays).
//!
//! ## Saving and Loading Maps
//!
//! ```rust,ignore
//! use vyoma_map::io::{save_map, load_map};
//! use std::path::Path;
//!
//! // Save map
//! save_map(map.layer(), Path::new("map.vyom"))?;
//!
//! // Load map
//! let layer = load_map(Path::new("map.vyom"))?;
//! ```

mod map_format;

pub use map_format::{load_map, read_map, save_map, write_map, IoError};
