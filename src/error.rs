//! Error types for the image packer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using PackerError.
pub type Result<T> = std::result::Result<T, PackerError>;

/// Opaque error produced by an [`ImageCodec`](crate::texture::ImageCodec).
pub type CodecError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for atlas building and serialization.
#[derive(Error, Debug)]
pub enum PackerError {
    /// A source image could not be read or decoded.
    #[error("Failed to load image {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    /// Growth went past the size ceiling without fitting every rectangle.
    #[error("Atlas too large: {size}x{size} exceeds the maximum of {max}")]
    AtlasTooLarge { size: u64, max: u32 },

    /// Export attempted before any build produced pixels.
    #[error("Atlas is empty, call build() first")]
    EmptyAtlas,

    /// Malformed or truncated atlas data.
    #[error("Invalid atlas format: {0}")]
    Format(String),

    /// The atlas file was written with a different format version.
    #[error("Unsupported atlas format version: {0}")]
    UnsupportedVersion(u8),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No region with the given name.
    #[error("Region not found: {0}")]
    NotFound(String),

    /// Two inputs resolved to the same region name.
    #[error("Duplicate region name: {0}")]
    DuplicateName(String),

    /// Composition reached a rectangle the packer never placed.
    #[error("Rectangle for {0} was not packed")]
    UnpackedRect(String),

    /// A packer placed a rectangle partly outside the bin.
    #[error("Rectangle for {name} at ({x}, {y}) lies outside the {size}x{size} atlas")]
    MisplacedRect { name: String, x: u32, y: u32, size: u32 },

    /// Failed to encode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to read or write JSON (configuration, manifest).
    #[error("JSON error: {0}")]
    Config(#[from] serde_json::Error),
}

impl PackerError {
    /// Map a read failure, treating a short read as a truncated file.
    pub(crate) fn from_read(err: std::io::Error, what: &str) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            PackerError::Format(format!("truncated while reading {}", what))
        } else {
            PackerError::Io(err)
        }
    }
}
