//! Configuration system
//!
//! Serializable tuning for an editing session's pools, batch scheduler, and
//! texture cache, plus file load/save in TOML or RON.

use crate::drawable::DrawableKind;
pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Tuning for a single drawable pool
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolTuning {
    /// Free-list capacity applied on release
    pub max_size: usize,
    /// Resources constructed up front at session start
    pub warm_up: usize,
}

impl Default for PoolTuning {
    fn default() -> Self {
        Self {
            max_size: 32,
            warm_up: 0,
        }
    }
}

/// Per-kind pool tuning for the drawable registry
///
/// Defaults reflect expected churn: shape and text drawables recycle
/// constantly during editing, groups and rasters far less.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryTuning {
    /// Rectangle pool tuning
    pub rectangle: PoolTuning,
    /// Ellipse pool tuning
    pub ellipse: PoolTuning,
    /// Polygon pool tuning
    pub polygon: PoolTuning,
    /// Text-run pool tuning
    pub text_run: PoolTuning,
    /// Raster pool tuning
    pub raster: PoolTuning,
    /// Group pool tuning
    pub group: PoolTuning,
}

impl Default for RegistryTuning {
    fn default() -> Self {
        Self {
            rectangle: PoolTuning { max_size: 64, warm_up: 8 },
            ellipse: PoolTuning { max_size: 64, warm_up: 8 },
            polygon: PoolTuning { max_size: 32, warm_up: 4 },
            text_run: PoolTuning { max_size: 128, warm_up: 16 },
            raster: PoolTuning { max_size: 16, warm_up: 2 },
            group: PoolTuning { max_size: 16, warm_up: 0 },
        }
    }
}

impl RegistryTuning {
    /// Tuning for the pool serving the given kind
    pub fn for_kind(&self, kind: DrawableKind) -> PoolTuning {
        match kind {
            DrawableKind::Rectangle => self.rectangle,
            DrawableKind::Ellipse => self.ellipse,
            DrawableKind::Polygon => self.polygon,
            DrawableKind::TextRun => self.text_run,
            DrawableKind::Raster => self.raster,
            DrawableKind::Group => self.group,
        }
    }
}

/// Batch scheduler tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Frame budget in milliseconds: mutations enqueued within this window
    /// coalesce into a single render pass
    pub frame_budget_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { frame_budget_ms: 16 }
    }
}

/// Texture cache tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of retained cache entries
    pub capacity: usize,
    /// Free-list capacity of the backing buffer pool
    pub buffer_pool_max: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            buffer_pool_max: 32,
        }
    }
}

/// Complete configuration for one editing session's resource core
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Per-kind drawable pool tuning
    pub pools: RegistryTuning,
    /// Batch scheduler tuning
    pub scheduler: SchedulerConfig,
    /// Texture cache tuning
    pub cache: CacheConfig,
}

impl Config for SessionConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.scheduler.frame_budget_ms, 16);
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.pools.text_run.max_size, 128);
    }

    #[test]
    fn test_for_kind_covers_every_kind() {
        let tuning = RegistryTuning::default();
        for kind in DrawableKind::all() {
            assert!(tuning.for_kind(*kind).max_size > 0);
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        let path = path.to_str().unwrap();

        let mut config = SessionConfig::default();
        config.scheduler.frame_budget_ms = 8;
        config.pools.group.warm_up = 3;
        config.save_to_file(path).unwrap();

        let loaded = SessionConfig::load_from_file(path).unwrap();
        assert_eq!(loaded.scheduler.frame_budget_ms, 8);
        assert_eq!(loaded.pools.group.warm_up, 3);
        assert_eq!(loaded.cache.capacity, 100);
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.ron");
        let path = path.to_str().unwrap();

        let mut config = SessionConfig::default();
        config.cache.capacity = 7;
        config.save_to_file(path).unwrap();

        let loaded = SessionConfig::load_from_file(path).unwrap();
        assert_eq!(loaded.cache.capacity, 7);
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let result = SessionConfig::default().save_to_file("session.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
