//! Run configuration for the greenscreen pipeline.
//!
//! Can be loaded from JSON or constructed programmatically:
//!
//! ```no_run
//! use greenscreen_rust::GreenScreenConfig;
//! use std::path::Path;
//!
//! let config = GreenScreenConfig::from_json_file(Path::new("greenscreen.json"))?;
//! config.validate()?;
//! # Ok::<(), greenscreen_rust::FilterError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FilterError, Result};
use crate::filters::core::validate_threshold;
use crate::filters::histogram::MAX_BUCKETS;

/// Default histogram buckets per channel.
pub const DEFAULT_BUCKETS: usize = 4;

/// Default per-channel replacement tolerance.
pub const DEFAULT_THRESHOLD: i32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreenScreenConfig {
    /// Image whose dominant colour is keyed out
    pub foreground: PathBuf,

    /// Image shown through the keyed pixels (tiled if smaller)
    pub background: PathBuf,

    /// Where the composited image is written
    pub output: PathBuf,

    /// Histogram buckets per channel (1-256)
    pub buckets: usize,

    /// Per-channel tolerance around the key colour
    pub threshold: i32,

    /// Invert the composited image before saving
    pub invert_output: bool,
}

impl Default for GreenScreenConfig {
    fn default() -> Self {
        Self {
            foreground: PathBuf::from("foreground.jpg"),
            background: PathBuf::from("background.jpg"),
            output: PathBuf::from("overlay.jpg"),
            buckets: DEFAULT_BUCKETS,
            threshold: DEFAULT_THRESHOLD,
            invert_output: false,
        }
    }
}

impl GreenScreenConfig {
    /// Check parameter ranges without touching the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.buckets == 0 || self.buckets > MAX_BUCKETS {
            return Err(FilterError::invalid(
                "buckets",
                format!("must be in 1..={}, got {}", MAX_BUCKETS, self.buckets),
            ));
        }
        validate_threshold(self.threshold)
    }

    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FilterError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| FilterError::Config {
            message: format!("cannot write {}: {}", path.display(), e),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GreenScreenConfig::default();
        assert_eq!(config.buckets, 4);
        assert_eq!(config.threshold, 60);
        assert!(!config.invert_output);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: GreenScreenConfig =
            serde_json::from_str(r#"{ "threshold": 25, "output": "out.png" }"#).unwrap();
        assert_eq!(config.threshold, 25);
        assert_eq!(config.output, PathBuf::from("out.png"));
        assert_eq!(config.buckets, DEFAULT_BUCKETS);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut config = GreenScreenConfig::default();
        config.buckets = 0;
        assert!(config.validate().unwrap_err().is_invalid_argument());

        let mut config = GreenScreenConfig::default();
        config.threshold = -5;
        assert!(config.validate().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "greenscreen_config_{}.json",
            std::process::id()
        ));
        let mut config = GreenScreenConfig::default();
        config.buckets = 8;
        config.invert_output = true;

        config.to_json_file(&path).unwrap();
        let loaded = GreenScreenConfig::from_json_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = GreenScreenConfig::from_json_file(Path::new("/nonexistent/greenscreen.json"))
            .unwrap_err();
        assert!(matches!(err, FilterError::Config { .. }));
        assert!(err.to_string().contains("greenscreen.json"));
    }

    #[test]
    fn test_unwritable_path_is_config_error() {
        let err = GreenScreenConfig::default()
            .to_json_file(Path::new("/nonexistent/dir/greenscreen.json"))
            .unwrap_err();
        assert!(matches!(err, FilterError::Config { .. }));
    }
}
