//! Shared types used throughout the library.

mod rect;

pub use rect::PackRect;

use serde::{Deserialize, Serialize};

/// Where one source image lives inside the atlas, in pixels.
///
/// The bounds are the image's own footprint; padding has already been
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Region of a packed rectangle with `padding` stripped from each side.
    pub fn from_packed(rect: &PackRect, padding: u32) -> Self {
        Self {
            x: rect.x + padding,
            y: rect.y + padding,
            width: rect.width - padding * 2,
            height: rect.height - padding * 2,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Check whether two regions share any pixel.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Normalized texture coordinates of this region in an atlas of `atlas_size`.
    pub fn uv(&self, atlas_size: u32) -> UvRect {
        let size = atlas_size.max(1) as f32;
        UvRect {
            u_min: self.x as f32 / size,
            v_min: self.y as f32 / size,
            u_max: self.right() as f32 / size,
            v_max: self.bottom() as f32 / size,
        }
    }
}

/// A region expressed in UV space (0-1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    /// U coordinate of the left edge.
    pub u_min: f32,
    /// V coordinate of the top edge.
    pub v_min: f32,
    /// U coordinate of the right edge.
    pub u_max: f32,
    /// V coordinate of the bottom edge.
    pub v_max: f32,
}

impl UvRect {
    /// Get the width of this region in UV space.
    pub fn width(&self) -> f32 {
        self.u_max - self.u_min
    }

    /// Get the height of this region in UV space.
    pub fn height(&self) -> f32 {
        self.v_max - self.v_min
    }

    /// Transform a local UV coordinate (0-1) to atlas coordinate.
    pub fn transform_uv(&self, u: f32, v: f32) -> [f32; 2] {
        [
            self.u_min + u * self.width(),
            self.v_min + v * self.height(),
        ]
    }
}
