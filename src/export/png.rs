//! PNG export of the composed atlas.

use crate::atlas::Atlas;
use crate::error::{PackerError, Result};
use crate::texture::{encode_png, ImageCodec, PngCodec};
use log::info;
use std::path::Path;

/// Encode the atlas pixels as PNG bytes.
pub fn to_png(atlas: &Atlas) -> Result<Vec<u8>> {
    if atlas.is_empty() {
        return Err(PackerError::EmptyAtlas);
    }
    Ok(encode_png(atlas.pixels(), atlas.size(), atlas.size())?)
}

/// Write the atlas as a PNG file.
pub fn export_png<P: AsRef<Path>>(atlas: &Atlas, path: P) -> Result<()> {
    export_png_with(atlas, &PngCodec, path)
}

/// Write the atlas through a custom image codec.
pub fn export_png_with<P: AsRef<Path>>(atlas: &Atlas, codec: &dyn ImageCodec, path: P) -> Result<()> {
    let path = path.as_ref();
    if atlas.is_empty() {
        return Err(PackerError::EmptyAtlas);
    }

    codec
        .encode(path, atlas.size(), atlas.size(), atlas.pixels())
        .map_err(|e| PackerError::Io(std::io::Error::other(e)))?;

    info!("Exported {}x{} PNG to {}", atlas.size(), atlas.size(), path.display());
    Ok(())
}
