//! Shelf packer using simple row packing.

use super::{tallest_first, RectPacker};
use crate::types::PackRect;

/// Places rectangles left to right in rows, tallest first. Each row is as
/// tall as its first (tallest) rectangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShelfPacker;

impl RectPacker for ShelfPacker {
    fn pack(&self, rects: &mut [PackRect], bin_size: u32) {
        let mut current_x = 0u32;
        let mut current_y = 0u32;
        let mut row_height = 0u32;

        for idx in tallest_first(rects) {
            let rect = &mut rects[idx];

            if rect.width > bin_size || rect.height > bin_size {
                continue;
            }

            // Check if we need to start a new row
            if current_x + rect.width > bin_size {
                current_x = 0;
                current_y += row_height;
                row_height = 0;
            }

            // Out of vertical space; a shorter rect may still fit this row
            if current_y + rect.height > bin_size {
                continue;
            }

            rect.place(current_x, current_y);

            current_x += rect.width;
            row_height = row_height.max(rect.height);
        }
    }

    fn name(&self) -> &'static str {
        "shelf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::all_packed;
    use crate::packer::test_support::{assert_valid_layout, rects};

    #[test]
    fn test_rows_wrap() {
        let mut r = rects(&[(20, 10), (20, 10), (20, 10)]);
        ShelfPacker.pack(&mut r, 40);
        assert!(all_packed(&r));
        assert_valid_layout(&r, 40);
        assert_eq!((r[2].x, r[2].y), (0, 10));
    }

    #[test]
    fn test_out_of_space() {
        let mut r = rects(&[(16, 16); 5]);
        ShelfPacker.pack(&mut r, 32);
        assert!(!all_packed(&r));
        assert_valid_layout(&r, 32);
    }

    #[test]
    fn test_mixed_sizes_no_overlap() {
        let mut r = rects(&[(66, 66), (130, 130), (34, 34), (10, 50)]);
        ShelfPacker.pack(&mut r, 256);
        assert!(all_packed(&r));
        assert_valid_layout(&r, 256);
    }
}
