//! Binary atlas reader

use super::MAGIC;
use crate::atlas::Atlas;
use crate::compress::Compressor;
use crate::error::{PackerError, Result};
use crate::types::Region;
use byteorder::{LittleEndian, ReadBytesExt};
use std::collections::BTreeMap;
use std::io::Read;

/// Reader for the binary atlas format
pub struct AtlasReader<'a, R: Read> {
    reader: R,
    compressor: &'a dyn Compressor,
}

impl<'a, R: Read> AtlasReader<'a, R> {
    pub fn new(reader: R, compressor: &'a dyn Compressor) -> Self {
        Self { reader, compressor }
    }

    /// Read and check the 4-byte magic
    pub fn read_magic(&mut self) -> Result<()> {
        let mut magic = [0u8; 4];
        self.reader
            .read_exact(&mut magic)
            .map_err(|e| PackerError::from_read(e, "magic"))?;

        if magic != MAGIC {
            return Err(PackerError::Format(format!(
                "unrecognized magic {:?}",
                String::from_utf8_lossy(&magic)
            )));
        }
        Ok(())
    }

    pub fn read_version(&mut self) -> Result<u8> {
        self.reader
            .read_u8()
            .map_err(|e| PackerError::from_read(e, "version"))
    }

    /// Read everything after the version byte of a version 2 file
    pub fn read_v2(&mut self) -> Result<Atlas> {
        let size = self.read_i32("atlas size")?;
        let size = u32::try_from(size)
            .map_err(|_| PackerError::Format(format!("negative atlas size {}", size)))?;

        let count = self
            .reader
            .read_u32::<LittleEndian>()
            .map_err(|e| PackerError::from_read(e, "region count"))?;

        let mut regions = BTreeMap::new();
        for _ in 0..count {
            let (name, region) = self.read_region(size)?;
            if regions.contains_key(&name) {
                return Err(PackerError::Format(format!("duplicate region {}", name)));
            }
            regions.insert(name, region);
        }

        let pixels = self.read_pixels(size)?;

        // Padding is already baked into the stored regions
        Ok(Atlas::from_parts(size, 0, pixels, regions))
    }

    fn read_region(&mut self, atlas_size: u32) -> Result<(String, Region)> {
        let len = self
            .reader
            .read_u16::<LittleEndian>()
            .map_err(|e| PackerError::from_read(e, "region name length"))?;

        let mut bytes = vec![0u8; len as usize];
        self.reader
            .read_exact(&mut bytes)
            .map_err(|e| PackerError::from_read(e, "region name"))?;
        let name = String::from_utf8(bytes)
            .map_err(|_| PackerError::Format("region name is not valid UTF-8".to_string()))?;

        let mut fields = [0u32; 4];
        for field in fields.iter_mut() {
            let value = self.read_i32(&name)?;
            *field = u32::try_from(value)
                .map_err(|_| PackerError::Format(format!("negative value {} in region {}", value, name)))?;
        }
        let region = Region::new(fields[0], fields[1], fields[2], fields[3]);

        if region.x as u64 + region.width as u64 > atlas_size as u64
            || region.y as u64 + region.height as u64 > atlas_size as u64
        {
            return Err(PackerError::Format(format!(
                "region {} lies outside the {}x{} atlas",
                name, atlas_size, atlas_size
            )));
        }

        Ok((name, region))
    }

    /// Read and decompress the pixel payload
    fn read_pixels(&mut self, size: u32) -> Result<Vec<u8>> {
        let len = self
            .reader
            .read_u64::<LittleEndian>()
            .map_err(|e| PackerError::from_read(e, "payload length"))?;

        let mut compressed = Vec::new();
        (&mut self.reader).take(len).read_to_end(&mut compressed)?;
        if (compressed.len() as u64) < len {
            return Err(PackerError::Format("truncated pixel payload".to_string()));
        }

        let pixels = self.compressor.decompress(&compressed)?;

        let expected = size as u64 * size as u64 * 4;
        if pixels.len() as u64 != expected {
            return Err(PackerError::Format(format!(
                "pixel payload is {} bytes, expected {}",
                pixels.len(),
                expected
            )));
        }

        Ok(pixels)
    }

    fn read_i32(&mut self, what: &str) -> Result<i32> {
        self.reader
            .read_i32::<LittleEndian>()
            .map_err(|e| PackerError::from_read(e, what))
    }
}
