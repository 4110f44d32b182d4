//! Texture Cache
//!
//! Capacity-bounded cache of generated raster buffers, backed by a buffer
//! pool so memoized glyph sheets and scaled rasters follow the same
//! acquire/release discipline as drawables. Entries are keyed by a derived
//! signature (content plus size). The cache never evicts: once at capacity,
//! new keys are generated on demand but not retained.

use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::config::CacheConfig;
use crate::pool::{GenericResourcePool, PoolConfig, PoolError, PoolResource, PoolStats, Pooled};

/// Cache key: content signature plus pixel dimensions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureKey {
    /// Content signature (e.g. the text and style a glyph sheet renders)
    pub content: String,
    /// Buffer width in pixels
    pub width: u32,
    /// Buffer height in pixels
    pub height: u32,
}

impl TextureKey {
    /// Construct a key from content signature and dimensions
    pub fn new(content: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            content: content.into(),
            width,
            height,
        }
    }
}

/// A pooled raw raster buffer
///
/// Managed identically to drawables: generators populate `data` on a cache
/// miss, and the buffer returns to its pool on release or cache clear.
#[derive(Debug, Default)]
pub struct PixelBuffer {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// RGBA pixel data, `width * height * 4` bytes once populated
    pub data: Vec<u8>,
    in_use: bool,
}

impl PixelBuffer {
    /// Construct an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Size `data` for the given dimensions, zero-filled
    pub fn allocate(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(width as usize * height as usize * 4, 0);
    }

    /// Drop pixel contents and dimensions, keeping the backing allocation
    pub fn clear_pixels(&mut self) {
        self.width = 0;
        self.height = 0;
        self.data.clear();
    }
}

impl PoolResource for PixelBuffer {
    fn reset(&mut self) {
        self.clear_pixels();
    }

    fn is_in_use(&self) -> bool {
        self.in_use
    }

    fn set_in_use(&mut self, in_use: bool) {
        self.in_use = in_use;
    }
}

/// Shared handle to a pooled pixel buffer
pub type PooledBuffer = Pooled<PixelBuffer>;

/// Errors reported by the texture cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// The generator callback failed. The acquired buffer was returned to
    /// the pool before this error propagated; nothing stays in use.
    #[error("texture generation failed: {0}")]
    Generation(String),
}

/// Point-in-time snapshot of the cache and its buffer pool
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    /// Number of retained entries
    pub cache_size: usize,
    /// Counters of the backing buffer pool
    pub pool: PoolStats,
}

/// Capacity-bounded texture cache over a pooled buffer store
pub struct TextureCache {
    entries: HashMap<TextureKey, PooledBuffer>,
    capacity: usize,
    buffer_pool: GenericResourcePool<PixelBuffer>,
}

impl TextureCache {
    /// Create a cache with the given capacity and buffer pool tuning
    pub fn new(config: &CacheConfig) -> Self {
        let buffer_pool = GenericResourcePool::new(PoolConfig {
            factory: Box::new(PixelBuffer::new),
            max_size: config.buffer_pool_max,
            reset_fn: None,
        });
        log::info!("created texture cache with capacity {}", config.capacity);
        Self {
            entries: HashMap::new(),
            capacity: config.capacity,
            buffer_pool,
        }
    }

    /// Look up a texture, generating it on a miss
    ///
    /// On a hit the stored buffer is returned unchanged and `generator` is
    /// never invoked. On a miss a buffer is acquired from the pool and
    /// populated by `generator`; the result is retained only while the cache
    /// is below capacity. At capacity the buffer is still returned to the
    /// caller but the next lookup for the same key regenerates it.
    ///
    /// # Errors
    /// `CacheError::Generation` if the generator fails; the buffer goes back
    /// to the pool before the error propagates.
    pub fn get_texture<F>(
        &mut self,
        key: &TextureKey,
        generator: F,
    ) -> Result<PooledBuffer, CacheError>
    where
        F: FnOnce(&mut PixelBuffer) -> Result<(), String>,
    {
        if let Some(buffer) = self.entries.get(key) {
            log::debug!("texture cache hit: {:?}", key);
            return Ok(Rc::clone(buffer));
        }

        let buffer = self.buffer_pool.acquire();
        let generated = {
            let mut target = buffer.borrow_mut();
            generator(&mut target)
        };

        if let Err(message) = generated {
            if let Err(err) = self.buffer_pool.release(buffer) {
                log::warn!("failed to return buffer after generator error: {}", err);
            }
            return Err(CacheError::Generation(message));
        }

        if self.entries.len() < self.capacity {
            self.entries.insert(key.clone(), Rc::clone(&buffer));
        } else {
            log::debug!(
                "texture cache at capacity ({}); not retaining {:?}",
                self.capacity,
                key
            );
        }

        Ok(buffer)
    }

    /// Clear a buffer's contents and return it to the buffer pool
    ///
    /// Distinct from removing it from the cache map: this is for buffers the
    /// caller is done holding.
    pub fn release_texture(&mut self, buffer: PooledBuffer) -> Result<(), PoolError> {
        buffer.borrow_mut().clear_pixels();
        self.buffer_pool.release(buffer)
    }

    /// Release every mapped buffer back to the pool and empty the map
    pub fn clear_cache(&mut self) {
        let released = self.entries.len();
        for (_, buffer) in self.entries.drain() {
            if let Err(err) = self.buffer_pool.release(buffer) {
                log::warn!("failed to release cached buffer: {}", err);
            }
        }
        log::debug!("cleared texture cache, released {} buffers", released);
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured entry capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot cache size and buffer pool counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            cache_size: self.entries.len(),
            pool: self.buffer_pool.stats(),
        }
    }
}
