//! ESDF integration via priority-queue wavefront propagation.
//!
//! Surface observations are fused into their containing voxels (weighted
//! average, TSDF-style), then signed distances are propagated outward with
//! a Dijkstra-style expansion over 26-connected neighbors: pop the voxel
//! with the smallest distance magnitude, relax each neighbor with the
//! inter-voxel Euclidean step, push improvements. Propagation stops at the
//! configured maximum distance, so a local update only touches the region
//! near changed geometry.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::block::BlockLayer;
use crate::core::{SurfaceObservation, VoxelCoord};

use super::config::IntegratorConfig;

/// Slack used when comparing candidate distances, to keep re-integration
/// of identical batches from re-expanding the wavefront.
const DISTANCE_EPSILON: f32 = 1e-5;

/// Result of integrating a batch of surface observations.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegrateResult {
    /// Observations fused into the field.
    pub integrated: usize,
    /// Malformed observations skipped (non-finite values, zero weight).
    pub rejected: usize,
    /// Voxels whose distance changed (seeds plus propagation).
    pub updated_voxels: usize,
    /// Blocks newly allocated by this batch.
    pub allocated_blocks: usize,
}

impl IntegrateResult {
    /// Merge another result into this one.
    pub fn merge(&mut self, other: &IntegrateResult) {
        self.integrated += other.integrated;
        self.rejected += other.rejected;
        self.updated_voxels += other.updated_voxels;
        self.allocated_blocks += other.allocated_blocks;
    }
}

/// Wavefront entry ordered for a min-heap on distance magnitude.
///
/// On equal magnitude, entries seeded from an already observed voxel win
/// the pop, so established field values anchor ties.
struct WavefrontEntry {
    magnitude: f32,
    distance: f32,
    coord: VoxelCoord,
    seeded: bool,
}

impl PartialEq for WavefrontEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WavefrontEntry {}

impl PartialOrd for WavefrontEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WavefrontEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest entry; reverse the magnitude order
        // so the smallest distance comes out first.
        other
            .magnitude
            .total_cmp(&self.magnitude)
            .then_with(|| self.seeded.cmp(&other.seeded))
    }
}

/// Incremental ESDF integrator.
///
/// Consumes batches of [`SurfaceObservation`]s and updates a
/// [`BlockLayer`] in place. Keeps a running count of rejected
/// observations for diagnostics.
#[derive(Clone, Debug)]
pub struct EsdfIntegrator {
    config: IntegratorConfig,
    rejected_total: u64,
}

impl EsdfIntegrator {
    /// Create an integrator with the given configuration.
    pub fn new(config: IntegratorConfig) -> Self {
        Self {
            config,
            rejected_total: 0,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Total malformed observations skipped over the integrator's lifetime.
    pub fn rejected_total(&self) -> u64 {
        self.rejected_total
    }

    /// Integrate a batch of surface observations into the layer.
    ///
    /// Malformed observations are skipped and counted; an empty or
    /// all-rejected batch is a no-op. Observations whose magnitude exceeds
    /// `max_distance` are clamped to the bound.
    pub fn integrate(
        &mut self,
        layer: &mut BlockLayer,
        observations: &[SurfaceObservation],
    ) -> IntegrateResult {
        let mut result = IntegrateResult::default();
        let blocks_before = layer.block_count();
        let mut heap = BinaryHeap::new();

        // Seed: fuse each valid observation into its containing voxel
        for obs in observations {
            if !obs.is_valid() {
                result.rejected += 1;
                continue;
            }

            let distance = obs
                .distance
                .clamp(-self.config.max_distance, self.config.max_distance);
            let coord = layer.world_to_voxel(obs.point);

            let mut voxel = layer.voxel_or_insert(coord);
            let (fused_distance, fused_weight) = if voxel.is_observed() && *voxel.weight > 0.0 {
                let total = *voxel.weight + obs.weight;
                (
                    (*voxel.distance * *voxel.weight + distance * obs.weight) / total,
                    total.min(self.config.max_weight),
                )
            } else {
                (distance, obs.weight.min(self.config.max_weight))
            };

            let seeded = voxel.is_observed();
            voxel.set(fused_distance, fused_weight);

            result.integrated += 1;
            result.updated_voxels += 1;
            heap.push(WavefrontEntry {
                magnitude: fused_distance.abs(),
                distance: fused_distance,
                coord,
                seeded,
            });
        }

        self.rejected_total += result.rejected as u64;

        if heap.is_empty() {
            if result.rejected > 0 {
                log::debug!("esdf batch rejected all {} observations", result.rejected);
            }
            return result;
        }

        // Propagate: Dijkstra-style relaxation bounded by max_distance
        let voxel_size = layer.voxel_size();
        while let Some(entry) = heap.pop() {
            // Stale entry: the voxel has since received a smaller distance
            match layer.voxel(entry.coord) {
                Some(v) if v.observed && v.distance.abs() + DISTANCE_EPSILON >= entry.magnitude => {}
                _ => continue,
            }

            for dz in -1i64..=1 {
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        if dx == 0 && dy == 0 && dz == 0 {
                            continue;
                        }
                        let step =
                            voxel_size * (((dx * dx + dy * dy + dz * dz) as f32).sqrt());
                        let candidate = entry.magnitude + step;
                        if candidate > self.config.max_distance {
                            continue;
                        }

                        let neighbor = entry.coord.offset(dx, dy, dz);
                        let improves = match layer.voxel(neighbor) {
                            None => true,
                            Some(v) => {
                                !v.observed || candidate + DISTANCE_EPSILON < v.distance.abs()
                            }
                        };
                        if !improves {
                            continue;
                        }

                        let signed = if entry.distance.is_sign_negative() {
                            -candidate
                        } else {
                            candidate
                        };
                        layer.voxel_or_insert(neighbor).set_distance(signed);
                        result.updated_voxels += 1;
                        heap.push(WavefrontEntry {
                            magnitude: candidate,
                            distance: signed,
                            coord: neighbor,
                            seeded: false,
                        });
                    }
                }
            }
        }

        result.allocated_blocks = layer.block_count() - blocks_before;
        log::debug!(
            "esdf batch: {} integrated, {} rejected, {} voxels updated, {} blocks allocated",
            result.integrated,
            result.rejected,
            result.updated_voxels,
            result.allocated_blocks
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldPoint;

    fn test_layer() -> BlockLayer {
        BlockLayer::new(0.1, 16)
    }

    fn integrator() -> EsdfIntegrator {
        EsdfIntegrator::new(IntegratorConfig::default())
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let mut layer = test_layer();
        let mut esdf = integrator();

        let result = esdf.integrate(&mut layer, &[]);
        assert_eq!(result.integrated, 0);
        assert_eq!(result.updated_voxels, 0);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_single_observation_seeds_field() {
        let mut layer = test_layer();
        let mut esdf = integrator();

        let obs = SurfaceObservation::new(WorldPoint::new(0.05, 0.05, 0.05), 0.0);
        let result = esdf.integrate(&mut layer, &[obs]);

        assert_eq!(result.integrated, 1);
        assert_eq!(result.rejected, 0);
        assert!(result.updated_voxels > 1);
        assert!(result.allocated_blocks > 0);

        let seed = layer.voxel(VoxelCoord::new(0, 0, 0)).unwrap();
        assert!(seed.observed);
        assert!(seed.distance.abs() < 1e-6);
        assert!(seed.weight > 0.0);
    }

    #[test]
    fn test_propagation_distances_grow_with_range() {
        let mut layer = test_layer();
        let mut esdf = integrator();

        let obs = SurfaceObservation::new(WorldPoint::new(0.05, 0.05, 0.05), 0.0);
        esdf.integrate(&mut layer, &[obs]);

        // Along +X the distance should increase by one voxel per step
        let d1 = layer.voxel(VoxelCoord::new(1, 0, 0)).unwrap().distance;
        let d3 = layer.voxel(VoxelCoord::new(3, 0, 0)).unwrap().distance;
        assert!((d1 - 0.1).abs() < 1e-4);
        assert!((d3 - 0.3).abs() < 1e-4);

        // Diagonal neighbor gets the Euclidean step
        let diag = layer.voxel(VoxelCoord::new(1, 1, 0)).unwrap().distance;
        assert!((diag - 0.1 * std::f32::consts::SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn test_propagation_bounded_by_max_distance() {
        let mut layer = test_layer();
        let mut esdf = EsdfIntegrator::new(IntegratorConfig {
            max_distance: 0.5,
            ..Default::default()
        });

        esdf.integrate(
            &mut layer,
            &[SurfaceObservation::new(WorldPoint::ZERO, 0.0)],
        );

        // 0.5m bound at 0.1m voxels: nothing observed past 5 voxels out
        assert!(layer.voxel(VoxelCoord::new(8, 0, 0)).map_or(true, |v| !v.observed));
        for (_, block) in layer.iter() {
            for (i, &d) in block.distances().iter().enumerate() {
                if block.observed_flags()[i] != 0 {
                    assert!(d.abs() <= 0.5 + 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_negative_seed_propagates_negative() {
        let mut layer = test_layer();
        let mut esdf = integrator();

        let obs = SurfaceObservation::new(WorldPoint::new(0.05, 0.05, 0.05), -0.05);
        esdf.integrate(&mut layer, &[obs]);

        let neighbor = layer.voxel(VoxelCoord::new(2, 0, 0)).unwrap();
        assert!(neighbor.observed);
        assert!(neighbor.distance < 0.0);
    }

    #[test]
    fn test_malformed_observations_rejected() {
        let mut layer = test_layer();
        let mut esdf = integrator();

        let batch = [
            SurfaceObservation::new(WorldPoint::new(f32::NAN, 0.0, 0.0), 0.0),
            SurfaceObservation::new(WorldPoint::ZERO, f32::INFINITY),
            SurfaceObservation::weighted(WorldPoint::ZERO, 0.0, 0.0),
            SurfaceObservation::new(WorldPoint::new(0.05, 0.05, 0.05), 0.0),
        ];
        let result = esdf.integrate(&mut layer, &batch);

        assert_eq!(result.rejected, 3);
        assert_eq!(result.integrated, 1);
        assert_eq!(esdf.rejected_total(), 3);
    }

    #[test]
    fn test_weighted_fusion() {
        let mut layer = test_layer();
        let mut esdf = integrator();

        let p = WorldPoint::new(0.05, 0.05, 0.05);
        esdf.integrate(&mut layer, &[SurfaceObservation::weighted(p, 0.0, 1.0)]);
        esdf.integrate(&mut layer, &[SurfaceObservation::weighted(p, 0.06, 1.0)]);

        // Equal weights: fused distance is the average
        let voxel = layer.voxel(VoxelCoord::new(0, 0, 0)).unwrap();
        assert!((voxel.distance - 0.03).abs() < 1e-5);
        assert!((voxel.weight - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_idempotent_integration() {
        let mut layer = test_layer();
        let mut esdf = integrator();

        let batch: Vec<SurfaceObservation> = (0..5)
            .map(|i| SurfaceObservation::new(WorldPoint::new(i as f32 * 0.1, 0.0, 0.0), 0.0))
            .collect();

        esdf.integrate(&mut layer, &batch);
        let snapshot: Vec<(VoxelCoord, f32)> = layer
            .iter()
            .flat_map(|(block_coord, block)| {
                let n = layer.voxels_per_side();
                let bc = *block_coord;
                block
                    .distances()
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| block.observed_flags()[*i] != 0)
                    .map(move |(i, &d)| {
                        let local = crate::core::LocalCoord::new(i % n, (i / n) % n, i / (n * n));
                        (VoxelCoord::join(bc, local, n), d)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let result = esdf.integrate(&mut layer, &batch);
        assert_eq!(result.allocated_blocks, 0);

        for (coord, before) in snapshot {
            let after = layer.voxel(coord).unwrap();
            assert!(after.observed);
            assert!(
                (after.distance - before).abs() < 1e-5,
                "distance changed at {:?}: {} -> {}",
                coord,
                before,
                after.distance
            );
        }
    }

    #[test]
    fn test_result_merge() {
        let mut a = IntegrateResult {
            integrated: 1,
            rejected: 2,
            updated_voxels: 3,
            allocated_blocks: 4,
        };
        let b = IntegrateResult {
            integrated: 10,
            rejected: 20,
            updated_voxels: 30,
            allocated_blocks: 40,
        };
        a.merge(&b);
        assert_eq!(a.integrated, 11);
        assert_eq!(a.rejected, 22);
        assert_eq!(a.updated_voxels, 33);
        assert_eq!(a.allocated_blocks, 44);
    }
}
