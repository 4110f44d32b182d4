//! # Canvas Core
//!
//! Resource-management core for an interactively edited canvas scene graph.
//!
//! ## Features
//!
//! - **Object Pools**: Generic free-list pool with warm-up and stats,
//!   one tuned pool per drawable kind
//! - **Batched Mutations**: Frame-budgeted coalescing so many edits cost
//!   exactly one render pass
//! - **Texture Cache**: Capacity-bounded memoization of generated raster
//!   buffers over a pooled buffer store
//! - **Explicit Sessions**: No globals; each editing session owns its core
//!
//! The rendering surface itself is external: this crate drives it through
//! the small [`surface::RenderSurface`] contract and decides nothing about
//! what to draw. Everything runs on a single mutation/render thread.
//!
//! ## Quick Start
//!
//! ```rust
//! use canvas_core::prelude::*;
//! use std::time::Instant;
//!
//! struct NullSurface;
//!
//! impl RenderSurface for NullSurface {
//!     fn add(&mut self, _drawable: &PooledDrawable) -> Result<(), String> { Ok(()) }
//!     fn remove(&mut self, _drawable: &PooledDrawable) -> Result<(), String> { Ok(()) }
//!     fn render(&mut self) {}
//!     fn set_auto_render(&mut self, _enabled: bool) {}
//! }
//!
//! let mut core = CanvasCore::new(&SessionConfig::default());
//! let mut surface = NullSurface;
//!
//! let rect = core.pools.acquire(DrawableKind::Rectangle);
//! core.scheduler.batch_add(vec![rect.clone()]);
//! core.scheduler.tick(&mut surface, Instant::now()).unwrap();
//! core.scheduler.flush(&mut surface).unwrap();
//!
//! core.pools.release(rect).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod batch;
pub mod cache;
pub mod config;
pub mod drawable;
pub mod pool;
pub mod session;
pub mod surface;

/// Commonly used types, re-exported for convenience
pub mod prelude {
    pub use crate::batch::{BatchError, BatchOp, BatchScheduler, BatchState};
    pub use crate::cache::{CacheError, PixelBuffer, PooledBuffer, TextureCache, TextureKey};
    pub use crate::config::{
        CacheConfig, Config, PoolTuning, RegistryTuning, SchedulerConfig, SessionConfig,
    };
    pub use crate::drawable::{Color, Drawable, DrawableKind, DrawablePatch, Stroke};
    pub use crate::pool::{
        GenericResourcePool, PoolConfig, PoolError, PoolResource, PoolStats, Pooled,
        PooledDrawable, TypedPoolRegistry,
    };
    pub use crate::session::CanvasCore;
    pub use crate::surface::RenderSurface;
}
