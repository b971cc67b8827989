//! Texture atlas building.
//!
//! This module combines multiple images into a single square atlas and
//! keeps a lookup from image name to the region it occupies.

mod builder;

pub use builder::{AtlasBuilder, NamedTexture};

use crate::codec::AtlasCodec;
use crate::config::AtlasConfig;
use crate::error::{PackerError, Result};
use crate::export;
use crate::texture::TextureData;
use crate::types::Region;
use std::collections::BTreeMap;
use std::path::Path;

/// A built (or rehydrated) texture atlas.
///
/// The region table is ordered by name, so iteration and serialization are
/// stable for the same contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
    size: u32,
    padding: u32,
    pixels: Vec<u8>,
    regions: BTreeMap<String, Region>,
}

impl Atlas {
    /// Create an atlas with no pixels yet. Always succeeds.
    pub fn create_empty(size: u32, padding: u32) -> Self {
        Self {
            size,
            padding,
            pixels: Vec::new(),
            regions: BTreeMap::new(),
        }
    }

    /// Create an empty atlas from configured size and padding.
    pub fn from_config(config: &AtlasConfig) -> Self {
        Self::create_empty(config.initial_size, config.padding)
    }

    /// Load a previously written atlas file.
    ///
    /// Fails if the file is missing or not a valid atlas. The padding of a
    /// loaded atlas is 0 because it is already part of the stored regions.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Self> {
        AtlasCodec::default().read_file(path)
    }

    /// Decode an atlas from bytes in the binary format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        AtlasCodec::default().deserialize(bytes)
    }

    pub(crate) fn from_parts(size: u32, padding: u32, pixels: Vec<u8>, regions: BTreeMap<String, Region>) -> Self {
        Self {
            size,
            padding,
            pixels,
            regions,
        }
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Padding applied around every image on the next build.
    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn set_padding(&mut self, padding: u32) {
        self.padding = padding;
    }

    /// RGBA8 pixel data, `size * size * 4` bytes once built.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True until a build (or load) has produced pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All regions, ordered by name.
    pub fn regions(&self) -> &BTreeMap<String, Region> {
        &self.regions
    }

    /// Look up the region for an image.
    pub fn region_for(&self, name: &str) -> Result<Region> {
        self.regions
            .get(name)
            .copied()
            .ok_or_else(|| PackerError::NotFound(name.to_string()))
    }

    /// Get the region for an image, if present.
    pub fn get_region(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    /// Check if the atlas contains an image.
    pub fn contains(&self, name: &str) -> bool {
        self.regions.contains_key(name)
    }

    /// A builder that starts from this atlas's size and padding.
    pub fn builder(&self) -> AtlasBuilder {
        AtlasBuilder::new(self.size, self.padding)
    }

    /// Rebuild the atlas from image files.
    ///
    /// On failure the atlas keeps its previous contents.
    pub fn build<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<&[u8]> {
        let builder = self.builder();
        self.build_with(&builder, paths)
    }

    /// Rebuild the atlas with a custom builder (codec, packer, limits).
    pub fn build_with<P: AsRef<Path>>(&mut self, builder: &AtlasBuilder, paths: &[P]) -> Result<&[u8]> {
        *self = builder.build(paths)?;
        Ok(&self.pixels)
    }

    /// Add image files to the atlas and repack everything.
    ///
    /// Existing regions are cut back out of the current pixels and packed
    /// again together with the new images. A new file whose name matches an
    /// existing region replaces it.
    pub fn append<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<&[u8]> {
        let builder = self.builder();
        self.append_with(&builder, paths)
    }

    /// Add image files using a custom builder.
    pub fn append_with<P: AsRef<Path>>(&mut self, builder: &AtlasBuilder, paths: &[P]) -> Result<&[u8]> {
        let added = builder.load(paths)?;

        let mut textures = Vec::with_capacity(self.regions.len() + added.len());
        for name in self.regions.keys() {
            if added.iter().any(|(new_name, _)| new_name == name) {
                continue;
            }
            textures.push((name.clone(), self.extract(name)?));
        }
        textures.extend(added);

        *self = builder.build_from_textures(textures)?;
        Ok(&self.pixels)
    }

    /// Copy one region's pixels out of the atlas.
    pub fn extract(&self, name: &str) -> Result<TextureData> {
        if self.is_empty() {
            return Err(PackerError::EmptyAtlas);
        }
        let region = self.region_for(name)?;

        let stride = self.size as usize * 4;
        let row_bytes = region.width as usize * 4;
        let mut pixels = Vec::with_capacity(row_bytes * region.height as usize);
        for row in 0..region.height as usize {
            let start = (region.y as usize + row) * stride + region.x as usize * 4;
            pixels.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }

        Ok(TextureData::new(region.width, region.height, pixels))
    }

    /// Encode the atlas in the binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        AtlasCodec::default().serialize(self)
    }

    /// Write the atlas to a binary file.
    pub fn export_binary<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        AtlasCodec::default().write_file(self, path)
    }

    /// Export the atlas as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        export::png::to_png(self)
    }

    /// Write the atlas as a PNG file.
    pub fn export_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        export::png::export_png(self, path)
    }
}
