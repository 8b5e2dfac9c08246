//! Thread-safe shared handle for a single-writer, multi-reader deployment.
//!
//! The map itself is plain owned data: queries take `&self`, integration
//! takes `&mut self`. When an integration thread and query threads need
//! the same map, [`SharedEsdfMap`] wraps it in an `Arc<RwLock>` so a
//! batch integration holds the write lock while query batches share the
//! read lock.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::{SurfaceObservation, WorldPoint};
use crate::integrator::IntegrateResult;
use crate::{EsdfMap, MapStats, QueryError};

/// Cloneable handle to a lock-protected [`EsdfMap`].
#[derive(Clone)]
pub struct SharedEsdfMap {
    inner: Arc<RwLock<EsdfMap>>,
}

impl SharedEsdfMap {
    /// Wrap a map in a shared handle.
    pub fn new(map: EsdfMap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Acquire the read lock for ad-hoc queries.
    pub fn read(&self) -> RwLockReadGuard<'_, EsdfMap> {
        self.inner.read()
    }

    /// Acquire the write lock for ad-hoc mutation.
    pub fn write(&self) -> RwLockWriteGuard<'_, EsdfMap> {
        self.inner.write()
    }

    /// Integrate a batch under the write lock.
    pub fn integrate(&self, observations: &[SurfaceObservation]) -> IntegrateResult {
        self.inner.write().integrate(observations)
    }

    /// Batch observed query under the read lock.
    pub fn is_observed(&self, points: &[WorldPoint], out: &mut [bool]) -> Result<(), QueryError> {
        self.inner.read().is_observed(points, out)
    }

    /// Batch distance query under the read lock.
    pub fn distance_at_position(
        &self,
        points: &[WorldPoint],
        distances: &mut [f32],
        observed: &mut [bool],
    ) -> Result<(), QueryError> {
        self.inner.read().distance_at_position(points, distances, observed)
    }

    /// Batch distance and gradient query under the read lock.
    pub fn distance_and_gradient_at_position(
        &self,
        points: &[WorldPoint],
        distances: &mut [f32],
        gradients: &mut [[f32; 3]],
        observed: &mut [bool],
    ) -> Result<(), QueryError> {
        self.inner
            .read()
            .distance_and_gradient_at_position(points, distances, gradients, observed)
    }

    /// Map statistics under the read lock.
    pub fn stats(&self) -> MapStats {
        self.inner.read().stats()
    }
}
