//! Batch-query the distance field of a saved map, or of a small built-in
//! demo surface when no map file is given.
//!
//! Usage:
//!   cargo run --example esdf_query [path/to/map.vyom]

use std::env;
use std::path::Path;

use vyoma_map::{EsdfMap, MapConfig, SurfaceObservation, WorldPoint};

fn demo_map() -> EsdfMap {
    let mut map = EsdfMap::new(MapConfig::default());

    // 1×1m flat surface at z = 0
    let mut batch = Vec::new();
    for iy in -5..=5 {
        for ix in -5..=5 {
            batch.push(SurfaceObservation::new(
                WorldPoint::new(ix as f32 * 0.1, iy as f32 * 0.1, 0.0),
                0.0,
            ));
        }
    }
    let result = map.integrate(&batch);
    println!(
        "Integrated demo surface: {} observations, {} voxels updated",
        result.integrated, result.updated_voxels
    );
    map
}

fn main() {
    env_logger::init();

    let map = match env::args().nth(1) {
        Some(path) => match EsdfMap::load(Path::new(&path)) {
            Ok(map) => map,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => demo_map(),
    };

    let stats = map.stats();
    println!(
        "Map: {} blocks, {} observed voxels ({:.3} m³)",
        stats.allocated_blocks, stats.observed_voxels, stats.observed_volume_m3
    );

    let points = vec![
        WorldPoint::new(0.0, 0.0, 0.1),
        WorldPoint::new(0.1, 0.0, 0.0),
        WorldPoint::new(0.1, 0.1, 0.0),
        WorldPoint::new(0.0, 0.1, 0.0),
    ];

    let mut distances = vec![0.0f32; points.len()];
    let mut gradients = vec![[0.0f32; 3]; points.len()];
    let mut observed = vec![false; points.len()];

    map.distance_and_gradient_at_position(&points, &mut distances, &mut gradients, &mut observed)
        .expect("query buffers are pre-sized");

    println!("\n{:>28} {:>10} {:>30} {:>9}", "point", "distance", "gradient", "observed");
    for (i, p) in points.iter().enumerate() {
        println!(
            "({:6.2}, {:6.2}, {:6.2})      {:10.4} ({:8.4}, {:8.4}, {:8.4})  {:>9}",
            p.x, p.y, p.z, distances[i], gradients[i][0], gradients[i][1], gradients[i][2], observed[i]
        );
    }
}
