//! Packer-facing rectangles.

/// A padded rectangle handed to a [`RectPacker`](crate::packer::RectPacker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackRect {
    /// Index of the source image this rectangle stands for.
    pub id: usize,
    /// Padded width.
    pub width: u32,
    /// Padded height.
    pub height: u32,
    pub x: u32,
    pub y: u32,
    /// Set by the packer when a position was found.
    pub packed: bool,
}

impl PackRect {
    pub fn new(id: usize, width: u32, height: u32) -> Self {
        Self {
            id,
            width,
            height,
            x: 0,
            y: 0,
            packed: false,
        }
    }

    /// Clear the placement before another packing attempt.
    pub fn reset(&mut self) {
        self.x = 0;
        self.y = 0;
        self.packed = false;
    }

    /// Mark this rectangle as placed at `(x, y)`.
    pub fn place(&mut self, x: u32, y: u32) {
        self.x = x;
        self.y = y;
        self.packed = true;
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
