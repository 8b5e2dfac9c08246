//! Default value functions for serde deserialization.

pub fn voxel_size() -> f32 {
    0.10
}

pub fn voxels_per_side() -> usize {
    16
}

pub fn max_distance() -> f32 {
    2.0
}

pub fn max_weight() -> f32 {
    100.0
}

pub fn output_dir() -> String {
    "./output".to_string()
}

pub fn map_file() -> String {
    "map.vyom".to_string()
}
