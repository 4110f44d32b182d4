//! Typed Pool Registry
//!
//! Coordinates one drawable pool per [`DrawableKind`], each independently
//! tuned to that kind's expected churn. Acquire dispatches on the kind enum;
//! release routes back to the originating pool through the drawable's own
//! immutable kind tag, so no pool or in-flight resource is ever scanned.

use std::collections::HashMap;

use crate::config::RegistryTuning;
use crate::drawable::{Drawable, DrawableKind};
use crate::pool::{GenericResourcePool, PoolConfig, PoolError, PoolStats, Pooled};

/// Shared handle to a pooled drawable
pub type PooledDrawable = Pooled<Drawable>;

/// One drawable pool per kind
///
/// The pools are named fields rather than a map keyed at runtime: adding a
/// kind without wiring its pool fails to compile, and dispatch cannot fall
/// through to a default case.
pub struct TypedPoolRegistry {
    rectangles: GenericResourcePool<Drawable>,
    ellipses: GenericResourcePool<Drawable>,
    polygons: GenericResourcePool<Drawable>,
    text_runs: GenericResourcePool<Drawable>,
    rasters: GenericResourcePool<Drawable>,
    groups: GenericResourcePool<Drawable>,
}

fn build_pool(kind: DrawableKind, tuning: &RegistryTuning) -> GenericResourcePool<Drawable> {
    let tuning = tuning.for_kind(kind);
    let mut pool = GenericResourcePool::new(PoolConfig {
        factory: Box::new(move || Drawable::new(kind)),
        max_size: tuning.max_size,
        reset_fn: None,
    });
    pool.warm_up(tuning.warm_up);
    pool
}

impl TypedPoolRegistry {
    /// Create a registry with every kind's pool built and warmed up per the
    /// given tuning
    pub fn new(tuning: &RegistryTuning) -> Self {
        let registry = Self {
            rectangles: build_pool(DrawableKind::Rectangle, tuning),
            ellipses: build_pool(DrawableKind::Ellipse, tuning),
            polygons: build_pool(DrawableKind::Polygon, tuning),
            text_runs: build_pool(DrawableKind::TextRun, tuning),
            rasters: build_pool(DrawableKind::Raster, tuning),
            groups: build_pool(DrawableKind::Group, tuning),
        };
        log::info!(
            "created drawable pool registry with {} kinds",
            DrawableKind::all().len()
        );
        registry
    }

    fn pool(&self, kind: DrawableKind) -> &GenericResourcePool<Drawable> {
        match kind {
            DrawableKind::Rectangle => &self.rectangles,
            DrawableKind::Ellipse => &self.ellipses,
            DrawableKind::Polygon => &self.polygons,
            DrawableKind::TextRun => &self.text_runs,
            DrawableKind::Raster => &self.rasters,
            DrawableKind::Group => &self.groups,
        }
    }

    fn pool_mut(&mut self, kind: DrawableKind) -> &mut GenericResourcePool<Drawable> {
        match kind {
            DrawableKind::Rectangle => &mut self.rectangles,
            DrawableKind::Ellipse => &mut self.ellipses,
            DrawableKind::Polygon => &mut self.polygons,
            DrawableKind::TextRun => &mut self.text_runs,
            DrawableKind::Raster => &mut self.rasters,
            DrawableKind::Group => &mut self.groups,
        }
    }

    /// Acquire a drawable of the given kind
    ///
    /// Generic fields come back at reset defaults; kind-specific fields
    /// (text content, image source, polygon points) are the caller's to set.
    pub fn acquire(&mut self, kind: DrawableKind) -> PooledDrawable {
        log::debug!("acquiring {} drawable", kind);
        self.pool_mut(kind).acquire()
    }

    /// Release a drawable back to its originating pool
    ///
    /// Routed in O(1) through the drawable's immutable kind tag. Releasing a
    /// drawable that is not in use is a reported no-op.
    pub fn release(&mut self, drawable: PooledDrawable) -> Result<(), PoolError> {
        let kind = drawable.borrow().kind();
        self.pool_mut(kind).release(drawable)
    }

    /// Snapshot pool counters for a single kind
    pub fn stats_for(&self, kind: DrawableKind) -> PoolStats {
        self.pool(kind).stats()
    }

    /// Aggregate snapshot across all kinds
    pub fn stats(&self) -> HashMap<DrawableKind, PoolStats> {
        DrawableKind::all()
            .iter()
            .map(|kind| (*kind, self.pool(*kind).stats()))
            .collect()
    }

    /// Drop every free drawable in every pool; in-use drawables are unaffected
    pub fn clear(&mut self) {
        for kind in DrawableKind::all() {
            self.pool_mut(*kind).clear();
        }
    }
}
