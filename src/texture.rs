//! Source image loading and the image codec seam.

use crate::error::CodecError;
use image::ImageEncoder;
use std::path::Path;

/// Raw RGBA8 image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Create a new texture from RGBA data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a texture filled with one color.
    pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = (0..width as usize * height as usize)
            .flat_map(|_| color)
            .collect();
        Self::new(width, height, pixels)
    }

    /// Bytes in one row of pixels.
    pub fn row_stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Check that the buffer length matches the dimensions.
    pub fn is_valid(&self) -> bool {
        self.pixels.len() == self.row_stride() * self.height as usize
    }
}

/// Decodes source images and writes finished ones.
///
/// The atlas pipeline only relies on the RGBA8 contract; how files are
/// parsed is up to the implementation.
pub trait ImageCodec {
    /// Decode the file at `path` into RGBA8.
    fn decode(&self, path: &Path) -> Result<TextureData, CodecError>;

    /// Write an RGBA8 buffer of `width`x`height` to `path`.
    fn encode(&self, path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<(), CodecError>;
}

/// PNG codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn decode(&self, path: &Path) -> Result<TextureData, CodecError> {
        let data = std::fs::read(path)?;
        Ok(load_texture_from_bytes(&data)?)
    }

    fn encode(&self, path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<(), CodecError> {
        let bytes = encode_png(pixels, width, height)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Load a texture from encoded image bytes, converting to RGBA8.
pub fn load_texture_from_bytes(data: &[u8]) -> Result<TextureData, image::ImageError> {
    let img = image::load_from_memory(data)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureData::new(width, height, rgba.into_raw()))
}

/// Encode an RGBA8 buffer as PNG bytes.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    let cursor = std::io::Cursor::new(&mut bytes);
    let encoder = image::codecs::png::PngEncoder::new(cursor);

    encoder.write_image(pixels, width, height, image::ExtendedColorType::Rgba8)?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_bytes_decode_back() {
        let tex = TextureData::solid(3, 2, [10, 20, 30, 40]);
        let png = encode_png(&tex.pixels, tex.width, tex.height).unwrap();
        let decoded = load_texture_from_bytes(&png).unwrap();
        assert_eq!(decoded, tex);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(load_texture_from_bytes(b"not an image").is_err());
    }

    #[test]
    fn test_codec_missing_file() {
        let codec = PngCodec;
        assert!(codec.decode(Path::new("/nonexistent/missing.png")).is_err());
    }
}
