//! Batch Scheduler
//!
//! Coalesces mutation operations into one render pass per frame budget,
//! so N near-simultaneous edits cost one redraw instead of N. The timer is
//! a stored deadline armed on the first enqueue; the owning host pumps it
//! once per frame with [`BatchScheduler::tick`], or forces execution with
//! [`BatchScheduler::flush`]. Both paths run the same algorithm and a flush
//! issues exactly one `render()` call.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::SchedulerConfig;
use crate::drawable::DrawablePatch;
use crate::pool::PooledDrawable;
use crate::surface::RenderSurface;

/// A queued mutation operation
pub enum BatchOp {
    /// Add a drawable to the surface
    Add(PooledDrawable),
    /// Remove a drawable from the surface
    Remove(PooledDrawable),
    /// Apply a partial update to a drawable
    Update(PooledDrawable, DrawablePatch),
    /// Run an arbitrary mutation against the surface
    Run(Box<dyn FnOnce(&mut dyn RenderSurface) -> Result<(), String>>),
}

impl fmt::Debug for BatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchOp::Add(_) => write!(f, "Add"),
            BatchOp::Remove(_) => write!(f, "Remove"),
            BatchOp::Update(..) => write!(f, "Update"),
            BatchOp::Run(_) => write!(f, "Run"),
        }
    }
}

/// Scheduler lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// No timer armed, queue empty
    Idle,
    /// Timer armed, queue non-empty
    Pending,
    /// Executing the queued operations
    Flushing,
}

/// A single failed operation within a flush
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpFailure {
    /// Position of the operation in submission order
    pub index: usize,
    /// Failure message reported by the operation
    pub message: String,
}

impl fmt::Display for OpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op {}: {}", self.index, self.message)
    }
}

/// Errors reported by the batch scheduler
#[derive(Debug, Error)]
pub enum BatchError {
    /// One or more queued operations failed during a flush. The flush still
    /// drained the whole queue and rendered once.
    #[error("{} batched operation(s) failed during flush", failures.len())]
    Flush {
        /// The failed operations, in submission order
        failures: Vec<OpFailure>,
    },
}

/// Frame-budgeted mutation batcher
///
/// States move `Idle` → `Pending` (first enqueue arms the deadline) →
/// `Flushing` (deadline reached or explicit flush) → `Idle`. A flush in
/// progress cannot be re-entered (`&mut self`); operations enqueued after a
/// flush returns land in the next batch.
pub struct BatchScheduler {
    queue: VecDeque<BatchOp>,
    deadline: Option<Instant>,
    frame_budget: Duration,
    state: BatchState,
}

impl BatchScheduler {
    /// Create a scheduler with the given frame budget
    pub fn new(config: &SchedulerConfig) -> Self {
        Self {
            queue: VecDeque::new(),
            deadline: None,
            frame_budget: Duration::from_millis(config.frame_budget_ms),
            state: BatchState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Number of operations waiting for the next flush
    pub fn pending_ops(&self) -> usize {
        self.queue.len()
    }

    /// Append an operation to the queue, arming the frame timer if idle
    ///
    /// Submission order is preserved across every enqueue path, including
    /// the batch helpers.
    pub fn enqueue(&mut self, op: BatchOp) {
        self.queue.push_back(op);
        if self.deadline.is_none() {
            self.deadline = Some(Instant::now() + self.frame_budget);
            self.state = BatchState::Pending;
            log::debug!(
                "armed batch timer ({} ms budget)",
                self.frame_budget.as_millis()
            );
        }
    }

    /// Enqueue an add for every drawable in the list
    ///
    /// The whole list shares one queue and therefore resolves in one render.
    pub fn batch_add(&mut self, drawables: impl IntoIterator<Item = PooledDrawable>) {
        for drawable in drawables {
            self.enqueue(BatchOp::Add(drawable));
        }
    }

    /// Enqueue a remove for every drawable in the list
    pub fn batch_remove(&mut self, drawables: impl IntoIterator<Item = PooledDrawable>) {
        for drawable in drawables {
            self.enqueue(BatchOp::Remove(drawable));
        }
    }

    /// Enqueue a partial update for every (drawable, patch) pair in the list
    pub fn batch_update(
        &mut self,
        updates: impl IntoIterator<Item = (PooledDrawable, DrawablePatch)>,
    ) {
        for (drawable, patch) in updates {
            self.enqueue(BatchOp::Update(drawable, patch));
        }
    }

    /// Pump the frame timer; flushes if the deadline has passed
    ///
    /// The host calls this once per frame with the current time. Passing the
    /// time in keeps the scheduler deterministic under test.
    pub fn tick(
        &mut self,
        surface: &mut dyn RenderSurface,
        now: Instant,
    ) -> Result<(), BatchError> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.flush(surface),
            _ => Ok(()),
        }
    }

    /// Execute every queued operation and render exactly once
    ///
    /// Cancels any pending timer first, so a later timer expiry does no
    /// further work. An empty queue is a no-op: the surface is not touched.
    /// A failing operation never stops its siblings; all failures are
    /// collected and reported together once the queue has drained.
    pub fn flush(&mut self, surface: &mut dyn RenderSurface) -> Result<(), BatchError> {
        self.deadline = None;

        if self.queue.is_empty() {
            self.state = BatchState::Idle;
            return Ok(());
        }

        self.state = BatchState::Flushing;
        let ops = std::mem::take(&mut self.queue);
        let op_count = ops.len();

        surface.set_auto_render(false);

        let mut failures = Vec::new();
        for (index, op) in ops.into_iter().enumerate() {
            let result = match op {
                BatchOp::Add(drawable) => surface.add(&drawable),
                BatchOp::Remove(drawable) => surface.remove(&drawable),
                BatchOp::Update(drawable, patch) => {
                    patch.apply(&mut drawable.borrow_mut());
                    Ok(())
                }
                BatchOp::Run(operation) => operation(surface),
            };

            if let Err(message) = result {
                log::warn!("batched operation {} failed: {}", index, message);
                failures.push(OpFailure { index, message });
            }
        }

        surface.set_auto_render(true);
        surface.render();
        self.state = BatchState::Idle;

        log::debug!(
            "flushed {} batched operations ({} failed), 1 render",
            op_count,
            failures.len()
        );

        if failures.is_empty() {
            Ok(())
        } else {
            Err(BatchError::Flush { failures })
        }
    }
}
