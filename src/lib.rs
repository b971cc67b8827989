//! # imgpacker
//!
//! A Rust library for packing many small images into one texture atlas.
//!
//! ## Overview
//!
//! Source images are decoded to RGBA8, padded, and packed into a square
//! atlas. When they do not fit, the atlas side length doubles and packing
//! starts over. The finished atlas keeps a name→region table and can be
//! stored in a compact binary format (`TXAT`, version 2) or exported as PNG.
//!
//! ## Quick Start
//!
//! ```ignore
//! use imgpacker::Atlas;
//!
//! // Build a fresh atlas
//! let mut atlas = Atlas::create_empty(512, 1);
//! atlas.build(&["textures/icon.png", "textures/hero.png"])?;
//! atlas.export_binary("texture_atlas.bin")?;
//!
//! // Later: reload it and look up a sprite
//! let atlas = Atlas::open_existing("texture_atlas.bin")?;
//! let hero = atlas.region_for("textures/hero.png")?;
//! atlas.export_png("atlas.png")?;
//! ```
//!
//! ## Custom collaborators
//!
//! Image decoding, rectangle packing and payload compression sit behind the
//! [`ImageCodec`], [`RectPacker`] and [`Compressor`] traits:
//!
//! ```ignore
//! use imgpacker::{AtlasBuilder, AtlasConfig, ShelfPacker};
//!
//! let builder = AtlasBuilder::from_config(AtlasConfig::default().with_padding(2))
//!     .with_packer(ShelfPacker);
//! let atlas = builder.build(&paths)?;
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod texture;
pub mod packer;
pub mod compress;
pub mod atlas;
pub mod codec;
pub mod export;

// Re-export main types for convenience
pub use error::{PackerError, Result};
pub use types::{PackRect, Region, UvRect};
pub use config::{AtlasConfig, MAX_ATLAS_SIZE};
pub use texture::{ImageCodec, PngCodec, TextureData};
pub use packer::{RectPacker, ShelfPacker, SkylinePacker};
pub use compress::{Compressor, Lz4Compressor};
pub use atlas::{Atlas, AtlasBuilder};
pub use codec::{AtlasCodec, FORMAT_VERSION, MAGIC};
pub use export::{export_manifest, AtlasManifest};

