//! Binary atlas format.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! magic          4 bytes  "TXAT"
//! version        u8       FORMAT_VERSION
//! atlas size     i32
//! region count   u32
//! regions        count x { u16 name_len, name bytes, i32 x, y, width, height }
//! payload len    u64
//! payload        compressed size*size*4 RGBA8 pixels
//! ```
//!
//! Regions are written in name order, so the same atlas always encodes to
//! the same bytes.

mod reader;
mod writer;

pub use reader::AtlasReader;
pub use writer::AtlasWriter;

use crate::atlas::Atlas;
use crate::compress::{Compressor, Lz4Compressor};
use crate::error::{PackerError, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// File magic.
pub const MAGIC: [u8; 4] = *b"TXAT";

/// Version written by this crate and the only one it reads.
pub const FORMAT_VERSION: u8 = 2;

/// Serializes atlases to and from the binary format.
pub struct AtlasCodec {
    compressor: Box<dyn Compressor>,
}

impl Default for AtlasCodec {
    fn default() -> Self {
        Self::new(Lz4Compressor)
    }
}

impl AtlasCodec {
    /// Create a codec that compresses pixels with `compressor`.
    pub fn new(compressor: impl Compressor + 'static) -> Self {
        Self {
            compressor: Box::new(compressor),
        }
    }

    /// Encode an atlas into a new buffer.
    pub fn serialize(&self, atlas: &Atlas) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(atlas, &mut bytes)?;
        Ok(bytes)
    }

    /// Encode an atlas into `writer`.
    pub fn write_to<W: Write>(&self, atlas: &Atlas, writer: W) -> Result<()> {
        AtlasWriter::new(writer, self.compressor.as_ref()).write_atlas(atlas)
    }

    /// Decode an atlas from a buffer.
    pub fn deserialize(&self, bytes: &[u8]) -> Result<Atlas> {
        self.read_from(bytes)
    }

    /// Decode an atlas from `reader`, dispatching on the stored version.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Atlas> {
        let mut reader = AtlasReader::new(reader, self.compressor.as_ref());
        reader.read_magic()?;

        match reader.read_version()? {
            FORMAT_VERSION => reader.read_v2(),
            other => Err(PackerError::UnsupportedVersion(other)),
        }
    }

    /// Write an atlas file.
    pub fn write_file<P: AsRef<Path>>(&self, atlas: &Atlas, path: P) -> Result<()> {
        let path = path.as_ref();
        if atlas.is_empty() {
            return Err(PackerError::EmptyAtlas);
        }

        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(atlas, &mut writer)?;
        writer.flush()?;

        info!(
            "Wrote {}x{} atlas with {} regions to {}",
            atlas.size(),
            atlas.size(),
            atlas.regions().len(),
            path.display()
        );
        Ok(())
    }

    /// Read an atlas file.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Atlas> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let atlas = self.read_from(BufReader::new(file))?;
        debug!("Read {}x{} atlas from {}", atlas.size(), atlas.size(), path.display());
        Ok(atlas)
    }
}
