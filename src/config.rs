//! Atlas build configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard ceiling on the atlas side length (`i32::MAX / i8::MAX`).
pub const MAX_ATLAS_SIZE: u32 = (i32::MAX / i8::MAX as i32) as u32;

/// Side length of a freshly created atlas.
pub const DEFAULT_ATLAS_SIZE: u32 = 512;

/// Padding of a freshly created atlas.
pub const DEFAULT_PADDING: u32 = 1;

/// Settings for building an atlas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Side length the first packing attempt uses.
    pub initial_size: u32,
    /// Pixels added on each side of every image.
    pub padding: u32,
    /// Largest side length growth may reach. Clamped to [`MAX_ATLAS_SIZE`].
    pub max_size: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_ATLAS_SIZE,
            padding: DEFAULT_PADDING,
            max_size: MAX_ATLAS_SIZE,
        }
    }
}

impl AtlasConfig {
    pub fn with_initial_size(mut self, size: u32) -> Self {
        self.initial_size = size;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// The ceiling growth actually honours.
    pub fn effective_max_size(&self) -> u32 {
        self.max_size.min(MAX_ATLAS_SIZE)
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_value() {
        assert_eq!(MAX_ATLAS_SIZE, 16_909_320);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AtlasConfig::from_json(r#"{ "padding": 4 }"#).unwrap();
        assert_eq!(config.padding, 4);
        assert_eq!(config.initial_size, DEFAULT_ATLAS_SIZE);
        assert_eq!(config.max_size, MAX_ATLAS_SIZE);
    }

    #[test]
    fn test_max_size_is_clamped() {
        let config = AtlasConfig::default().with_max_size(u32::MAX);
        assert_eq!(config.effective_max_size(), MAX_ATLAS_SIZE);
        assert_eq!(config.with_max_size(1024).effective_max_size(), 1024);
    }

    #[test]
    fn test_bad_json() {
        assert!(AtlasConfig::from_json("{ padding: }").is_err());
    }
}
