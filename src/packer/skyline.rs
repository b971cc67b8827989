//! Skyline bottom-left packer.

use super::{tallest_first, RectPacker};
use crate::types::PackRect;

/// One horizontal step of the skyline.
#[derive(Debug, Clone, Copy)]
struct Segment {
    x: u32,
    y: u32,
    width: u32,
}

/// Packs rectangles along a skyline, choosing the lowest position that fits
/// and the leftmost one among equals.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkylinePacker;

impl RectPacker for SkylinePacker {
    fn pack(&self, rects: &mut [PackRect], bin_size: u32) {
        if bin_size == 0 {
            return;
        }

        let mut skyline = vec![Segment {
            x: 0,
            y: 0,
            width: bin_size,
        }];

        for idx in tallest_first(rects) {
            let rect = &mut rects[idx];

            if rect.width > bin_size || rect.height > bin_size {
                continue;
            }
            if rect.width == 0 || rect.height == 0 {
                rect.place(0, 0);
                continue;
            }

            if let Some((segment, x, y)) = find_position(&skyline, rect.width, rect.height, bin_size) {
                add_level(&mut skyline, segment, x, y + rect.height, rect.width);
                rect.place(x, y);
            }
        }
    }

    fn name(&self) -> &'static str {
        "skyline"
    }
}

/// Find the lowest (then leftmost) spot for a `width`x`height` rectangle.
///
/// Returns the starting segment index and the position.
fn find_position(skyline: &[Segment], width: u32, height: u32, bin_size: u32) -> Option<(usize, u32, u32)> {
    let mut best: Option<(usize, u32, u32)> = None;

    for (i, start) in skyline.iter().enumerate() {
        if start.x + width > bin_size {
            break;
        }

        // Resting height is the tallest segment under the span
        let mut y = 0;
        let mut remaining = width;
        for segment in &skyline[i..] {
            if remaining == 0 {
                break;
            }
            y = y.max(segment.y);
            remaining -= segment.width.min(remaining);
        }

        if y + height > bin_size {
            continue;
        }

        if best.map_or(true, |(_, _, best_y)| y < best_y) {
            best = Some((i, start.x, y));
        }
    }

    best
}

/// Raise the skyline over `[x, x + width)` to `top`.
fn add_level(skyline: &mut Vec<Segment>, index: usize, x: u32, top: u32, width: u32) {
    let end = x + width;
    skyline.insert(index, Segment { x, y: top, width });

    // Trim segments now covered by the new one
    let next = index + 1;
    while next < skyline.len() {
        let segment = skyline[next];
        if segment.x >= end {
            break;
        }
        let segment_end = segment.x + segment.width;
        if segment_end <= end {
            skyline.remove(next);
        } else {
            skyline[next].x = end;
            skyline[next].width = segment_end - end;
            break;
        }
    }

    // Merge neighbours at the same height
    let mut i = 0;
    while i + 1 < skyline.len() {
        if skyline[i].y == skyline[i + 1].y {
            skyline[i].width += skyline[i + 1].width;
            skyline.remove(i + 1);
        } else {
            i += 1;
        }
    }
}
