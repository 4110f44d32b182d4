//! Per-session resource core
//!
//! One [`CanvasCore`] is constructed per editing session by the owning
//! application and passed to call sites explicitly. There is no process-wide
//! shared instance: lifetimes are the session's, and tests build independent
//! cores freely.

use crate::batch::BatchScheduler;
use crate::cache::TextureCache;
use crate::config::SessionConfig;
use crate::pool::TypedPoolRegistry;

/// The resource-management core owned by one editing session
///
/// Pure composition over the three subsystems; pools are warmed up and the
/// cache sized according to the session configuration.
pub struct CanvasCore {
    /// Per-kind drawable pools
    pub pools: TypedPoolRegistry,
    /// Frame-budgeted mutation batcher
    pub scheduler: BatchScheduler,
    /// Bounded texture cache
    pub textures: TextureCache,
}

impl CanvasCore {
    /// Build the core from a session configuration
    pub fn new(config: &SessionConfig) -> Self {
        log::info!("creating canvas resource core: {:?}", config);
        Self {
            pools: TypedPoolRegistry::new(&config.pools),
            scheduler: BatchScheduler::new(&config.scheduler),
            textures: TextureCache::new(&config.cache),
        }
    }
}

impl Default for CanvasCore {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}
