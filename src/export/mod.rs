//! Atlas export formats.
//!
//! This module provides exporters for debugging and for engines that want
//! the region table in a text format.

pub mod manifest;
pub mod png;

pub use manifest::{export_manifest, AtlasManifest, ManifestRegion};
pub use png::{export_png, export_png_with, to_png};
