use crate::error::{DrillError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub capacity: usize,
    pub items: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: 2,
            items: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { workers: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// =============================================================================
// Top-level config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillsConfig {
    pub cache: CacheConfig,
    pub queue: QueueConfig,
    pub pool: PoolConfig,
    pub log: LogConfig,
}

impl DrillsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DrillsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            DrillError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache.capacity == 0 {
            return Err(DrillError::Config("cache.capacity must be > 0".into()));
        }
        if self.queue.capacity == 0 {
            return Err(DrillError::Config("queue.capacity must be > 0".into()));
        }
        if self.pool.workers == 0 {
            return Err(DrillError::Config("pool.workers must be > 0".into()));
        }
        let level = self.log.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(DrillError::Config(format!(
                "log.level '{}' is not one of {}",
                self.log.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| DrillError::Config(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_samples() {
        let config = DrillsConfig::default();
        assert_eq!(config.cache.capacity, 2);
        assert_eq!(config.queue.capacity, 2);
        assert_eq!(config.queue.items, 5);
        assert_eq!(config.pool.workers, 2);
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = DrillsConfig::from_toml_str("[cache]\ncapacity = 8\n").unwrap();
        assert_eq!(config.cache.capacity, 8);
        assert_eq!(config.queue, QueueConfig::default());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = DrillsConfig::from_toml_str("[queue]\ncapacity = 0\n").unwrap_err();
        assert!(err.to_string().contains("queue.capacity"));
    }

    #[test]
    fn test_rejects_unknown_level() {
        let err = DrillsConfig::from_toml_str("[log]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, DrillError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pool]\nworkers = 4").unwrap();
        let config = DrillsConfig::load(file.path()).unwrap();
        assert_eq!(config.pool.workers, 4);
    }

    #[test]
    fn test_toml_output_reloads() {
        let config = DrillsConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(DrillsConfig::from_toml_str(&text).unwrap(), config);
    }
}
