//! Rectangle packing.
//!
//! A packer places padded rectangles inside a square bin without overlap.
//! The atlas builder only relies on the [`RectPacker`] contract: after a
//! call every rectangle is either marked packed with a position inside the
//! bin, or left unpacked. Layouts may differ between bin sizes.

mod shelf;
mod skyline;

pub use shelf::ShelfPacker;
pub use skyline::SkylinePacker;

use crate::types::PackRect;

/// A bin-packing algorithm.
pub trait RectPacker {
    /// Try to place every rectangle inside a `bin_size`x`bin_size` bin.
    ///
    /// Rectangles arrive reset to `(0, 0)` and unpacked. Implementations
    /// allocate their own scratch state per call.
    fn pack(&self, rects: &mut [PackRect], bin_size: u32);

    /// Short name used in logs and the CLI.
    fn name(&self) -> &'static str;
}

/// Check whether every rectangle was placed.
pub fn all_packed(rects: &[PackRect]) -> bool {
    rects.iter().all(|r| r.packed)
}

/// Indices of `rects` sorted tallest first, then widest, then by id.
fn tallest_first(rects: &[PackRect]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rects.len()).collect();
    order.sort_by(|&a, &b| {
        let (ra, rb) = (&rects[a], &rects[b]);
        rb.height
            .cmp(&ra.height)
            .then(rb.width.cmp(&ra.width))
            .then(ra.id.cmp(&rb.id))
    });
    order
}
