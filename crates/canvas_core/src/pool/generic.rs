//! Generic Resource Pool
//!
//! Reusable-object pool for drawables and raster buffers. Recycling objects
//! through a free-list avoids allocator churn when the editor creates and
//! discards drawables at interactive rates.
//!
//! Resources are handed out as shared [`Pooled`] handles because the caller,
//! the rendering surface, and the free-list may all hold the same object at
//! once. The pool is single-owner by contract: one logical mutation thread
//! drives `acquire`/`release`, matching the surface it serves.

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Shared handle to a pooled resource.
///
/// `Rc<RefCell<_>>` rather than `Arc<Mutex<_>>`: the core runs on a single
/// mutation/render thread and makes no cross-thread claims.
pub type Pooled<T> = Rc<RefCell<T>>;

/// Capability contract for anything that can live in a [`GenericResourcePool`].
///
/// Every pooled drawable and every pooled buffer implements this. `reset`
/// must restore the value to its default state; the in-use flag tracks
/// whether the resource is currently held by a caller.
pub trait PoolResource {
    /// Restore the resource to its default (post-construction) state.
    fn reset(&mut self);

    /// Whether the resource is currently held by a caller.
    fn is_in_use(&self) -> bool;

    /// Mark the resource as held or free. Called by the pool only.
    fn set_in_use(&mut self, in_use: bool);
}

/// Errors that can occur during pool operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    /// A resource was released that is not currently in use (double release,
    /// or release of a resource the pool never handed out)
    #[error("release of a resource that is not in use")]
    NotInUse,
}

/// Configuration for a [`GenericResourcePool`]
///
/// Explicit named fields rather than a loose option bag: the factory
/// constructs fresh resources on demand, `max_size` caps the free-list, and
/// `reset_fn` runs after the resource's own [`PoolResource::reset`] on every
/// acquire for pool-specific cleanup.
pub struct PoolConfig<T> {
    /// Constructs a new resource when the free-list is empty
    pub factory: Box<dyn FnMut() -> T>,
    /// Free-list capacity; releases beyond this drop the resource
    pub max_size: usize,
    /// Optional extra reset logic applied on every acquire
    pub reset_fn: Option<Box<dyn Fn(&mut T)>>,
}

/// Point-in-time snapshot of a pool's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Resources constructed by the factory since pool creation
    pub total_created: u64,
    /// Acquires satisfied from the free-list instead of the factory
    pub total_reused: u64,
    /// Resources currently sitting in the free-list
    pub current_pool_size: usize,
    /// Resources currently held by callers
    pub current_in_use: usize,
}

/// Reusable-object pool with a LIFO free-list
///
/// `acquire` pops the most-recently-released resource for cache locality and
/// never blocks: an empty free-list constructs synchronously via the factory.
/// `release` returns a resource to the free-list, or drops it once the list
/// is at `max_size`. `warm_up` pre-populates the working set and may push the
/// free-list past the ordinary release cap.
pub struct GenericResourcePool<T: PoolResource> {
    free_list: Vec<Pooled<T>>,
    factory: Box<dyn FnMut() -> T>,
    reset_fn: Option<Box<dyn Fn(&mut T)>>,
    max_size: usize,
    total_created: u64,
    total_reused: u64,
    current_in_use: usize,
}

impl<T: PoolResource> GenericResourcePool<T> {
    /// Create a new pool from the given configuration
    pub fn new(config: PoolConfig<T>) -> Self {
        Self {
            free_list: Vec::new(),
            factory: config.factory,
            reset_fn: config.reset_fn,
            max_size: config.max_size,
            total_created: 0,
            total_reused: 0,
            current_in_use: 0,
        }
    }

    /// Acquire a resource, reusing the most-recently-released one if available
    ///
    /// The returned resource has been fully reset (its own `reset`, then the
    /// pool's `reset_fn`) and is marked in-use.
    pub fn acquire(&mut self) -> Pooled<T> {
        let resource = match self.free_list.pop() {
            Some(resource) => {
                self.total_reused += 1;
                resource
            }
            None => {
                self.total_created += 1;
                Rc::new(RefCell::new((self.factory)()))
            }
        };

        {
            let mut inner = resource.borrow_mut();
            inner.reset();
            if let Some(reset_fn) = &self.reset_fn {
                reset_fn(&mut inner);
            }
            inner.set_in_use(true);
        }
        self.current_in_use += 1;

        resource
    }

    /// Return a resource to the pool
    ///
    /// Releasing a resource that is not in use (a double release, or a
    /// resource this pool never handed out) is a usage error: it is logged
    /// and reported, and all counters are left unchanged.
    ///
    /// # Returns
    /// * `Ok(())` - Resource returned to the free-list, or dropped if the
    ///   free-list is at capacity
    /// * `Err(PoolError::NotInUse)` - Usage error; pool state untouched
    pub fn release(&mut self, resource: Pooled<T>) -> Result<(), PoolError> {
        if !resource.borrow().is_in_use() {
            log::warn!("release of a resource that is not in use; ignoring");
            return Err(PoolError::NotInUse);
        }

        resource.borrow_mut().set_in_use(false);
        self.current_in_use = self.current_in_use.saturating_sub(1);

        if self.free_list.len() < self.max_size {
            self.free_list.push(resource);
        }
        // Over-cap releases simply drop the resource.

        Ok(())
    }

    /// Pre-populate the free-list with `count` fresh resources
    ///
    /// Establishes the pool's working set before first real use, avoiding
    /// first-acquire construction latency. Warm-up counts against
    /// `total_created` and may push the free-list above `max_size`.
    pub fn warm_up(&mut self, count: usize) {
        for _ in 0..count {
            let mut resource = (self.factory)();
            resource.set_in_use(false);
            self.free_list.push(Rc::new(RefCell::new(resource)));
        }
        self.total_created += count as u64;
        if count > 0 {
            log::info!(
                "warmed up pool with {} resources (free-list now {})",
                count,
                self.free_list.len()
            );
        }
    }

    /// Snapshot the pool's counters, without side effects
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            total_created: self.total_created,
            total_reused: self.total_reused,
            current_pool_size: self.free_list.len(),
            current_in_use: self.current_in_use,
        }
    }

    /// Drop every free resource; resources currently in use are unaffected
    pub fn clear(&mut self) {
        self.free_list.clear();
    }

    /// Free-list capacity applied on release
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}
