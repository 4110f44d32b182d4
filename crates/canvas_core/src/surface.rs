//! Rendering surface contract
//!
//! The surface itself (canvas, scene graph, GPU target) is external to this
//! core; this trait is the small in-process boundary the batch scheduler
//! drives. Individual mutations report failure as `Result<(), String>`; the
//! scheduler aggregates them per flush.

use crate::pool::PooledDrawable;

/// External rendering surface driven by the batch scheduler
///
/// Implementations must render on `render()` and must honor the
/// auto-render-on-mutate flag: while it is disabled, `add`/`remove` must not
/// trigger a redraw of their own.
pub trait RenderSurface {
    /// Add a drawable to the surface
    fn add(&mut self, drawable: &PooledDrawable) -> Result<(), String>;

    /// Remove a drawable from the surface
    fn remove(&mut self, drawable: &PooledDrawable) -> Result<(), String>;

    /// Redraw the surface
    fn render(&mut self);

    /// Enable or disable automatic re-render on mutation
    fn set_auto_render(&mut self, enabled: bool);
}
