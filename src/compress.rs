//! Pixel payload compression.

use crate::error::{PackerError, Result};
use lz4_flex::{compress_prepend_size, decompress_size_prepended};

/// Lossless compression of an opaque byte buffer.
pub trait Compressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// LZ4 block compression with the uncompressed size prepended.
///
/// The prefix is a `u32`, so a block holds at most `u32::MAX` bytes. That is
/// a 32767x32767 RGBA8 atlas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Compressor;

impl Compressor for Lz4Compressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        check_block_len(data.len())?;
        Ok(compress_prepend_size(data))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        decompress_size_prepended(data)
            .map_err(|e| PackerError::Format(format!("corrupt pixel payload: {}", e)))
    }
}

fn check_block_len(len: usize) -> Result<()> {
    if u32::try_from(len).is_err() {
        return Err(PackerError::Format(format!(
            "pixel payload of {} bytes exceeds the LZ4 block limit of {} bytes",
            len,
            u32::MAX
        )));
    }
    Ok(())
}
