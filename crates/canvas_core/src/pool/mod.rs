//! Object pooling for canvas resources
//!
//! A generic free-list pool plus a per-kind registry of drawable pools.

mod generic;
mod registry;

pub use generic::{GenericResourcePool, PoolConfig, PoolError, PoolResource, PoolStats, Pooled};
pub use registry::{PooledDrawable, TypedPoolRegistry};
