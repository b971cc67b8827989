//! Binary atlas writer

use super::{FORMAT_VERSION, MAGIC};
use crate::atlas::Atlas;
use crate::compress::Compressor;
use crate::error::{PackerError, Result};
use crate::types::Region;
use byteorder::{LittleEndian, WriteBytesExt};
use log::debug;
use std::io::Write;

/// Writer for the binary atlas format
pub struct AtlasWriter<'a, W: Write> {
    writer: W,
    compressor: &'a dyn Compressor,
}

impl<'a, W: Write> AtlasWriter<'a, W> {
    pub fn new(writer: W, compressor: &'a dyn Compressor) -> Self {
        Self { writer, compressor }
    }

    /// Write a complete atlas to the output
    pub fn write_atlas(&mut self, atlas: &Atlas) -> Result<()> {
        if atlas.is_empty() {
            return Err(PackerError::EmptyAtlas);
        }

        self.write_header(atlas.size())?;

        let count = u32::try_from(atlas.regions().len())
            .map_err(|_| PackerError::Format("too many regions".to_string()))?;
        self.writer.write_u32::<LittleEndian>(count)?;
        for (name, region) in atlas.regions() {
            self.write_region(name, region)?;
        }

        self.write_pixels(atlas.pixels())
    }

    /// Magic, version and atlas size
    fn write_header(&mut self, size: u32) -> Result<()> {
        self.writer.write_all(&MAGIC)?;
        self.writer.write_u8(FORMAT_VERSION)?;
        self.writer.write_i32::<LittleEndian>(to_i32(size, "atlas size")?)?;
        Ok(())
    }

    fn write_region(&mut self, name: &str, region: &Region) -> Result<()> {
        let len = u16::try_from(name.len())
            .map_err(|_| PackerError::Format(format!("region name is {} bytes, limit is {}", name.len(), u16::MAX)))?;
        self.writer.write_u16::<LittleEndian>(len)?;
        self.writer.write_all(name.as_bytes())?;

        for value in [region.x, region.y, region.width, region.height] {
            self.writer.write_i32::<LittleEndian>(to_i32(value, name)?)?;
        }
        Ok(())
    }

    /// Compressed pixel payload, prefixed by its length
    fn write_pixels(&mut self, pixels: &[u8]) -> Result<()> {
        let compressed = self.compressor.compress(pixels)?;
        debug!("Compressed {} pixel bytes to {}", pixels.len(), compressed.len());

        self.writer.write_u64::<LittleEndian>(compressed.len() as u64)?;
        self.writer.write_all(&compressed)?;
        Ok(())
    }
}

fn to_i32(value: u32, what: &str) -> Result<i32> {
    i32::try_from(value).map_err(|_| PackerError::Format(format!("{} value {} does not fit in i32", what, value)))
}
