//! Atlas build pipeline: load, pack with growth, compose.

use super::Atlas;
use crate::config::{AtlasConfig, MAX_ATLAS_SIZE};
use crate::error::{PackerError, Result};
use crate::packer::{all_packed, RectPacker, SkylinePacker};
use crate::texture::{ImageCodec, PngCodec, TextureData};
use crate::types::{PackRect, Region};
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// An image paired with the name its region is stored under.
pub type NamedTexture = (String, TextureData);

/// Builder for creating texture atlases.
pub struct AtlasBuilder {
    config: AtlasConfig,
    codec: Box<dyn ImageCodec>,
    packer: Box<dyn RectPacker>,
}

impl AtlasBuilder {
    /// Create a new atlas builder with the default codec and packer.
    pub fn new(initial_size: u32, padding: u32) -> Self {
        Self::from_config(
            AtlasConfig::default()
                .with_initial_size(initial_size)
                .with_padding(padding),
        )
    }

    pub fn from_config(config: AtlasConfig) -> Self {
        Self {
            config,
            codec: Box::new(PngCodec),
            packer: Box::new(SkylinePacker),
        }
    }

    /// Use a different image codec for loading.
    pub fn with_codec(mut self, codec: impl ImageCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    /// Use a different packing algorithm.
    pub fn with_packer(mut self, packer: impl RectPacker + 'static) -> Self {
        self.packer = Box::new(packer);
        self
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.config.max_size = max_size;
        self
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Build an atlas from image files. Regions are named by path.
    pub fn build<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Atlas> {
        let textures = self.load(paths)?;
        self.build_from_textures(textures)
    }

    /// Decode image files in input order.
    pub fn load<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<NamedTexture>> {
        let mut textures = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            let texture = self.codec.decode(path).map_err(|source| PackerError::Load {
                path: path.to_path_buf(),
                source,
            })?;
            if !texture.is_valid() {
                return Err(PackerError::Load {
                    path: path.to_path_buf(),
                    source: format!(
                        "decoded {} bytes for a {}x{} image",
                        texture.pixels.len(),
                        texture.width,
                        texture.height
                    )
                    .into(),
                });
            }
            debug!("Loaded {} ({}x{})", path.display(), texture.width, texture.height);
            textures.push((path.to_string_lossy().into_owned(), texture));
        }

        Ok(textures)
    }

    /// Build an atlas from images already in memory.
    pub fn build_from_textures(&self, textures: Vec<NamedTexture>) -> Result<Atlas> {
        let padding = self.config.padding;

        let mut seen = HashSet::with_capacity(textures.len());
        let mut rects = Vec::with_capacity(textures.len());
        for (id, (name, texture)) in textures.iter().enumerate() {
            if !seen.insert(name.as_str()) {
                return Err(PackerError::DuplicateName(name.clone()));
            }
            if !texture.is_valid() {
                return Err(PackerError::Format(format!(
                    "texture {} has {} bytes, expected {}",
                    name,
                    texture.pixels.len(),
                    texture.row_stride() * texture.height as usize
                )));
            }
            if texture.width == 0 || texture.height == 0 {
                return Err(PackerError::Format(format!(
                    "texture {} has no pixels ({}x{})",
                    name, texture.width, texture.height
                )));
            }
            let width = self.padded(texture.width)?;
            let height = self.padded(texture.height)?;
            rects.push(PackRect::new(id, width, height));
        }

        let size = self.pack_with_growth(&mut rects)?;
        let pixels = compose(size, padding, &rects, &textures)?;

        let regions: BTreeMap<String, Region> = rects
            .iter()
            .map(|rect| (textures[rect.id].0.clone(), Region::from_packed(rect, padding)))
            .collect();

        info!(
            "Packed {} images into {}x{} atlas using {}",
            regions.len(),
            size,
            size,
            self.packer.name()
        );

        Ok(Atlas::from_parts(size, padding, pixels, regions))
    }

    /// Add padding to both sides of a dimension.
    fn padded(&self, dimension: u32) -> Result<u32> {
        self.config
            .padding
            .checked_mul(2)
            .and_then(|p| dimension.checked_add(p))
            .ok_or(PackerError::AtlasTooLarge {
                size: dimension as u64 + self.config.padding as u64 * 2,
                max: self.config.effective_max_size(),
            })
    }

    /// Pack all rectangles, doubling the side length until they fit.
    ///
    /// Every attempt starts from scratch; placements at one size say nothing
    /// about the next. Returns the final side length.
    fn pack_with_growth(&self, rects: &mut [PackRect]) -> Result<u32> {
        let max = self.config.effective_max_size();
        let mut size = self.config.initial_size.max(1);

        if size > max {
            return Err(PackerError::AtlasTooLarge {
                size: size as u64,
                max,
            });
        }

        loop {
            for rect in rects.iter_mut() {
                rect.reset();
            }

            self.packer.pack(rects, size);

            if all_packed(rects) {
                return Ok(size);
            }

            let next = size as u64 * 2;
            debug!(
                "{} of {} rects fit in {}x{}, growing to {}",
                rects.iter().filter(|r| r.packed).count(),
                rects.len(),
                size,
                size,
                next
            );

            if next > max as u64 {
                warn!("Atlas size {} exceeds the maximum of {}", next, max);
                return Err(PackerError::AtlasTooLarge { size: next, max });
            }
            size = next as u32;
        }
    }
}

impl Default for AtlasBuilder {
    fn default() -> Self {
        Self::from_config(AtlasConfig::default())
    }
}

/// Byte length of a `size`x`size` RGBA8 buffer.
fn buffer_len(size: u32) -> Result<usize> {
    (size as u64)
        .checked_mul(size as u64)
        .and_then(|n| n.checked_mul(4))
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(PackerError::AtlasTooLarge {
            size: size as u64,
            max: MAX_ATLAS_SIZE,
        })
}

/// Copy every image into a fresh zeroed buffer at its padded position.
fn compose(size: u32, padding: u32, rects: &[PackRect], textures: &[NamedTexture]) -> Result<Vec<u8>> {
    let mut pixels = vec![0u8; buffer_len(size)?];
    let stride = size as usize * 4;

    for rect in rects {
        let (name, texture) = &textures[rect.id];
        if !rect.packed {
            return Err(PackerError::UnpackedRect(name.clone()));
        }
        if rect.x as u64 + rect.width as u64 > size as u64 || rect.y as u64 + rect.height as u64 > size as u64 {
            return Err(PackerError::MisplacedRect {
                name: name.clone(),
                x: rect.x,
                y: rect.y,
                size,
            });
        }

        let row_bytes = texture.row_stride();
        let dst_x = (rect.x + padding) as usize * 4;
        let dst_y = (rect.y + padding) as usize;

        for row in 0..texture.height as usize {
            let dst = (dst_y + row) * stride + dst_x;
            let src = row * row_bytes;
            pixels[dst..dst + row_bytes].copy_from_slice(&texture.pixels[src..src + row_bytes]);
        }
    }

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::ShelfPacker;

    fn create_test_texture(width: u32, height: u32, color: [u8; 4]) -> TextureData {
        TextureData::solid(width, height, color)
    }

    fn named(name: &str, width: u32, height: u32, color: [u8; 4]) -> NamedTexture {
        (name.to_string(), create_test_texture(width, height, color))
    }

    /// Packs nothing, ever.
    struct RefusingPacker;

    impl RectPacker for RefusingPacker {
        fn pack(&self, _rects: &mut [PackRect], _bin_size: u32) {}

        fn name(&self) -> &'static str {
            "refusing"
        }
    }

    /// Places every rect at `(offset_x, offset_y)`, whatever the bin size.
    struct FixedPacker {
        offset_x: fn(u32) -> u32,
        offset_y: fn(u32) -> u32,
    }

    impl RectPacker for FixedPacker {
        fn pack(&self, rects: &mut [PackRect], bin_size: u32) {
            for rect in rects.iter_mut() {
                rect.place((self.offset_x)(bin_size), (self.offset_y)(bin_size));
            }
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_empty_input() {
        let atlas = AtlasBuilder::new(64, 1).build_from_textures(Vec::new()).unwrap();
        assert_eq!(atlas.size(), 64);
        assert_eq!(atlas.pixels().len(), 64 * 64 * 4);
        assert!(atlas.pixels().iter().all(|&b| b == 0));
        assert!(atlas.regions().is_empty());
        assert!(!atlas.is_empty());
    }

    #[test]
    fn test_fits_without_growth() {
        let atlas = AtlasBuilder::new(512, 1)
            .build_from_textures(vec![
                named("a", 64, 64, [255, 0, 0, 255]),
                named("b", 128, 128, [0, 255, 0, 255]),
                named("c", 32, 32, [0, 0, 255, 255]),
            ])
            .unwrap();
        assert_eq!(atlas.size(), 512);
        assert_eq!(atlas.regions().len(), 3);
    }

    #[test]
    fn test_grows_from_small_initial_size() {
        let atlas = AtlasBuilder::new(4, 1)
            .build_from_textures(vec![
                named("a", 64, 64, [255, 0, 0, 255]),
                named("b", 128, 128, [0, 255, 0, 255]),
                named("c", 32, 32, [0, 0, 255, 255]),
            ])
            .unwrap();
        // 130px padded rect cannot fit in 128
        assert_eq!(atlas.size(), 256);
        assert_eq!(atlas.pixels().len(), 256 * 256 * 4);
    }

    #[test]
    fn test_growth_is_power_of_two_multiple() {
        for initial in [3u32, 5, 48, 100] {
            let atlas = AtlasBuilder::new(initial, 2)
                .build_from_textures(vec![named("a", 90, 40, [1, 2, 3, 4])])
                .unwrap();
            let ratio = atlas.size() / initial;
            assert_eq!(atlas.size() % initial, 0);
            assert!(ratio.is_power_of_two());
            assert!(atlas.size() >= 94);
        }
    }

    #[test]
    fn test_zero_initial_size_still_grows() {
        let atlas = AtlasBuilder::new(0, 0)
            .build_from_textures(vec![named("a", 5, 5, [9, 9, 9, 9])])
            .unwrap();
        assert_eq!(atlas.size(), 8);
    }

    #[test]
    fn test_too_large_fails() {
        let result = AtlasBuilder::new(16, 0)
            .with_max_size(64)
            .build_from_textures(vec![named("big", 100, 10, [0, 0, 0, 255])]);
        match result {
            Err(PackerError::AtlasTooLarge { size, max }) => {
                assert_eq!(size, 128);
                assert_eq!(max, 64);
            }
            other => panic!("expected AtlasTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_unsatisfiable_packer_stops_at_ceiling() {
        let result = AtlasBuilder::new(1, 0)
            .with_packer(RefusingPacker)
            .build_from_textures(vec![named("a", 1, 1, [0, 0, 0, 0])]);
        assert!(matches!(result, Err(PackerError::AtlasTooLarge { .. })));
    }

    #[test]
    fn test_initial_size_above_ceiling() {
        let result = AtlasBuilder::new(256, 0).with_max_size(128).build_from_textures(Vec::new());
        assert!(matches!(result, Err(PackerError::AtlasTooLarge { size: 256, max: 128 })));
    }

    #[test]
    fn test_padding_does_not_change_region_size() {
        for padding in [0u32, 1, 3, 8] {
            let atlas = AtlasBuilder::new(64, padding)
                .build_from_textures(vec![
                    named("wide", 20, 5, [1, 1, 1, 255]),
                    named("tall", 6, 30, [2, 2, 2, 255]),
                ])
                .unwrap();
            let wide = atlas.region_for("wide").unwrap();
            let tall = atlas.region_for("tall").unwrap();
            assert_eq!((wide.width, wide.height), (20, 5));
            assert_eq!((tall.width, tall.height), (6, 30));
            assert!(wide.x >= padding && wide.y >= padding);
            assert!(!wide.overlaps(&tall));
        }
    }

    #[test]
    fn test_regions_keep_padding_apart() {
        let padding = 2;
        let atlas = AtlasBuilder::new(64, padding)
            .build_from_textures(vec![
                named("a", 10, 10, [1, 0, 0, 255]),
                named("b", 10, 10, [0, 1, 0, 255]),
            ])
            .unwrap();
        let grow = |r: Region| Region::new(r.x - padding, r.y - padding, r.width + padding * 2, r.height + padding * 2);
        let a = grow(atlas.region_for("a").unwrap());
        let b = grow(atlas.region_for("b").unwrap());
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_pixels_copied_into_region() {
        let mut gradient = Vec::new();
        for y in 0..3u8 {
            for x in 0..4u8 {
                gradient.extend_from_slice(&[x, y, 7, 255]);
            }
        }
        let atlas = AtlasBuilder::new(16, 1)
            .build_from_textures(vec![("g".to_string(), TextureData::new(4, 3, gradient))])
            .unwrap();

        let region = atlas.region_for("g").unwrap();
        let stride = atlas.size() as usize * 4;
        for y in 0..3u32 {
            for x in 0..4u32 {
                let idx = (region.y + y) as usize * stride + (region.x + x) as usize * 4;
                assert_eq!(&atlas.pixels()[idx..idx + 4], &[x as u8, y as u8, 7, 255]);
            }
        }
        // Padding stays transparent black
        let left = region.y as usize * stride + (region.x - 1) as usize * 4;
        assert_eq!(&atlas.pixels()[left..left + 4], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = AtlasBuilder::new(64, 0).build_from_textures(vec![
            named("same", 2, 2, [0, 0, 0, 255]),
            named("same", 3, 3, [0, 0, 0, 255]),
        ]);
        assert!(matches!(result, Err(PackerError::DuplicateName(name)) if name == "same"));
    }

    #[test]
    fn test_invalid_texture_rejected() {
        let bad = ("bad".to_string(), TextureData::new(4, 4, vec![0; 3]));
        let result = AtlasBuilder::new(64, 0).build_from_textures(vec![bad]);
        assert!(matches!(result, Err(PackerError::Format(_))));
    }

    #[test]
    fn test_shelf_packer_builds() {
        let atlas = AtlasBuilder::new(32, 1)
            .with_packer(ShelfPacker)
            .build_from_textures(vec![
                named("a", 30, 30, [1, 0, 0, 255]),
                named("b", 30, 30, [0, 1, 0, 255]),
            ])
            .unwrap();
        assert_eq!(atlas.size(), 64);
        assert!(!atlas.region_for("a").unwrap().overlaps(&atlas.region_for("b").unwrap()));
    }

    #[test]
    fn test_unpacked_rect_is_an_error() {
        let textures = vec![named("lost", 2, 2, [0, 0, 0, 255])];
        let rects = vec![PackRect::new(0, 2, 2)];
        let result = compose(8, 0, &rects, &textures);
        assert!(matches!(result, Err(PackerError::UnpackedRect(name)) if name == "lost"));
    }

    #[test]
    fn test_zero_area_texture_rejected() {
        for padding in [0u32, 2] {
            for initial in [2u32, 8] {
                let result = AtlasBuilder::new(initial, padding)
                    .build_from_textures(vec![("thin".to_string(), TextureData::new(0, 10, Vec::new()))]);
                assert!(matches!(result, Err(PackerError::Format(_))));
            }
        }
        let flat = ("flat".to_string(), TextureData::new(10, 0, Vec::new()));
        assert!(matches!(
            AtlasBuilder::new(8, 0).build_from_textures(vec![flat]),
            Err(PackerError::Format(_))
        ));
    }

    #[test]
    fn test_placement_outside_bin_is_an_error() {
        let corner = FixedPacker {
            offset_x: |bin| bin,
            offset_y: |bin| bin,
        };
        let result = AtlasBuilder::new(8, 0)
            .with_packer(corner)
            .build_from_textures(vec![named("a", 2, 2, [1, 1, 1, 255])]);
        assert!(matches!(
            result,
            Err(PackerError::MisplacedRect { ref name, x: 8, y: 8, size: 8 }) if name == "a"
        ));

        // Off the right edge would otherwise wrap into the next row
        let right_edge = FixedPacker {
            offset_x: |bin| bin - 1,
            offset_y: |_| 0,
        };
        let result = AtlasBuilder::new(8, 0)
            .with_packer(right_edge)
            .build_from_textures(vec![named("a", 2, 2, [1, 1, 1, 255])]);
        assert!(matches!(result, Err(PackerError::MisplacedRect { x: 7, y: 0, .. })));
    }

    #[test]
    fn test_placement_inside_bin_is_accepted() {
        let origin = FixedPacker {
            offset_x: |_| 0,
            offset_y: |_| 0,
        };
        let atlas = AtlasBuilder::new(8, 1)
            .with_packer(origin)
            .build_from_textures(vec![named("a", 6, 6, [1, 1, 1, 255])])
            .unwrap();
        assert_eq!(atlas.region_for("a").unwrap(), Region::new(1, 1, 6, 6));
    }

    #[test]
    fn test_regions_match_pixels_after_growth() {
        let padding = 3;
        let sources = vec![
            named("red", 40, 24, [255, 0, 0, 255]),
            named("green", 17, 33, [0, 255, 0, 255]),
            named("blue", 9, 9, [0, 0, 255, 200]),
            named("white", 60, 5, [255, 255, 255, 255]),
        ];
        let atlas = AtlasBuilder::new(4, padding).build_from_textures(sources.clone()).unwrap();
        assert!(atlas.size() > 4);

        let stride = atlas.size() as usize * 4;
        for (name, texture) in &sources {
            let region = atlas.region_for(name).unwrap();
            assert_eq!((region.width, region.height), (texture.width, texture.height));
            assert!(region.x >= padding && region.y >= padding);
            assert!(region.right() + padding <= atlas.size());
            assert!(region.bottom() + padding <= atlas.size());
            assert_eq!(&atlas.extract(name).unwrap(), texture);

            // The padding frame around the region stays transparent black
            for y in region.y - padding..region.bottom() + padding {
                for x in region.x - padding..region.right() + padding {
                    let inside = x >= region.x && x < region.right() && y >= region.y && y < region.bottom();
                    if !inside {
                        let idx = y as usize * stride + x as usize * 4;
                        assert_eq!(&atlas.pixels()[idx..idx + 4], &[0, 0, 0, 0], "{} frame at ({}, {})", name, x, y);
                    }
                }
            }
        }
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let result = AtlasBuilder::default().build(&["/nonexistent/a.png"]);
        match result {
            Err(PackerError::Load { path, .. }) => assert_eq!(path, Path::new("/nonexistent/a.png")),
            other => panic!("expected Load error, got {:?}", other),
        }
    }
}
