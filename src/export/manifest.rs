//! JSON manifest describing an atlas's regions.

use crate::atlas::Atlas;
use crate::error::Result;
use crate::types::{Region, UvRect};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable summary of an atlas, without pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasManifest {
    pub size: u32,
    pub padding: u32,
    /// Regions in name order.
    pub regions: Vec<ManifestRegion>,
}

/// One named region with pixel and UV bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestRegion {
    pub name: String,
    #[serde(flatten)]
    pub bounds: Region,
    pub uv: UvRect,
}

impl AtlasManifest {
    pub fn from_atlas(atlas: &Atlas) -> Self {
        let regions = atlas
            .regions()
            .iter()
            .map(|(name, region)| ManifestRegion {
                name: name.clone(),
                bounds: *region,
                uv: region.uv(atlas.size()),
            })
            .collect();

        Self {
            size: atlas.size(),
            padding: atlas.padding(),
            regions,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write the manifest of `atlas` as pretty-printed JSON.
pub fn export_manifest<P: AsRef<Path>>(atlas: &Atlas, path: P) -> Result<()> {
    let json = AtlasManifest::from_atlas(atlas).to_json()?;
    std::fs::write(path, json)?;
    Ok(())
}
