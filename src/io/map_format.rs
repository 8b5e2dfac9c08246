//! Native .vyom binary map format.
//!
//! Layout: 4 magic bytes, a little-endian u32 format version, then a
//! bincode-encoded snapshot of the layer parameters and all allocated
//! blocks. Everything needed to reconstruct the map is in the file; the
//! integrator state (rejection counters) is not persisted.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::block::{BlockLayer, VoxelBlock};
use crate::core::BlockCoord;

/// File magic for .vyom map files.
const MAGIC: [u8; 4] = *b"VYMP";

/// Current format version.
const FORMAT_VERSION: u32 = 1;

/// Map persistence errors.
#[derive(Debug, Error)]
pub enum IoError {
    /// Underlying filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with the .vyom magic bytes.
    #[error("not a vyoma map file (bad magic)")]
    BadMagic,

    /// The file was written by an incompatible format version.
    #[error("unsupported map format version {0}")]
    UnsupportedVersion(u32),

    /// The payload failed to decode or violates format invariants.
    #[error("corrupt map file: {0}")]
    Corrupt(String),
}

/// Serializable snapshot of a block layer.
#[derive(Serialize, Deserialize)]
struct MapSnapshot {
    voxel_size: f32,
    voxels_per_side: u32,
    blocks: Vec<(BlockCoord, VoxelBlock)>,
}

/// Write a layer to a writer in .vyom format.
pub fn write_map<W: Write>(layer: &BlockLayer, mut writer: W) -> Result<(), IoError> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&FORMAT_VERSION.to_le_bytes())?;

    let snapshot = MapSnapshot {
        voxel_size: layer.voxel_size(),
        voxels_per_side: layer.voxels_per_side() as u32,
        blocks: layer
            .iter()
            .map(|(coord, block)| (*coord, block.clone()))
            .collect(),
    };

    bincode::serialize_into(&mut writer, &snapshot)
        .map_err(|e| IoError::Corrupt(e.to_string()))?;
    writer.flush()?;
    Ok(())
}

/// Read a layer from a reader in .vyom format.
pub fn read_map<R: Read>(mut reader: R) -> Result<BlockLayer, IoError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(IoError::BadMagic);
    }

    let mut version_bytes = [0u8; 4];
    reader.read_exact(&mut version_bytes)?;
    let version = u32::from_le_bytes(version_bytes);
    if version != FORMAT_VERSION {
        return Err(IoError::UnsupportedVersion(version));
    }

    let snapshot: MapSnapshot =
        bincode::deserialize_from(&mut reader).map_err(|e| IoError::Corrupt(e.to_string()))?;

    if !(snapshot.voxel_size > 0.0 && snapshot.voxel_size.is_finite()) {
        return Err(IoError::Corrupt(format!(
            "invalid voxel size {}",
            snapshot.voxel_size
        )));
    }
    let voxels_per_side = snapshot.voxels_per_side as usize;
    if voxels_per_side < 2 {
        return Err(IoError::Corrupt(format!(
            "invalid voxels per side {}",
            voxels_per_side
        )));
    }

    let mut blocks = HashMap::with_capacity(snapshot.blocks.len());
    for (coord, block) in snapshot.blocks {
        if block.voxels_per_side() != voxels_per_side || !block.is_consistent() {
            return Err(IoError::Corrupt(format!(
                "malformed block at ({}, {}, {})",
                coord.x, coord.y, coord.z
            )));
        }
        if blocks.insert(coord, block).is_some() {
            return Err(IoError::Corrupt(format!(
                "duplicate block at ({}, {}, {})",
                coord.x, coord.y, coord.z
            )));
        }
    }

    Ok(BlockLayer::from_blocks(
        snapshot.voxel_size,
        voxels_per_side,
        blocks,
    ))
}

/// Save a layer to a .vyom file.
pub fn save_map(layer: &BlockLayer, path: &Path) -> Result<(), IoError> {
    let file = File::create(path)?;
    write_map(layer, BufWriter::new(file))?;
    log::info!(
        "Saved map: {} blocks to {}",
        layer.block_count(),
        path.display()
    );
    Ok(())
}

/// Load a layer from a .vyom file.
pub fn load_map(path: &Path) -> Result<BlockLayer, IoError> {
    let file = File::open(path)?;
    let layer = read_map(BufReader::new(file))?;
    log::info!(
        "Loaded map: {} blocks ({} voxels observed) from {}",
        layer.block_count(),
        layer.observed_voxels(),
        path.display()
    );
    Ok(layer)
}
