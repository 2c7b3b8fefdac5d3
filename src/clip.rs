//! Tight bounding of ink: trims blank rows and columns from a view.

use crate::profile::{column_ink_count, row_ink_count};
use crate::raster::Raster;

/// Drops blank rows above the first and below the last inked row.
///
/// A view with no ink at all collapses to the empty range `[b, b)` where
/// `b` is the bottom of its bounds.
pub fn clip_vertical<R: Raster>(img: &R) -> R {
    let bounds = img.bounds();
    let (lo, hi) = (bounds.min.y, bounds.max.y);
    let top = (lo..hi)
        .find(|&y| row_ink_count(img, y) != 0)
        .unwrap_or(hi);
    let bottom = (top..hi)
        .rev()
        .find(|&y| row_ink_count(img, y) != 0)
        .map_or(top, |y| y + 1);
    img.sub_image(bounds.with_rows(top, bottom))
}

/// Column-wise analogue of [`clip_vertical`].
pub fn clip_horizontal<R: Raster>(img: &R) -> R {
    let bounds = img.bounds();
    let (lo, hi) = (bounds.min.x, bounds.max.x);
    let left = (lo..hi)
        .find(|&x| column_ink_count(img, x) != 0)
        .unwrap_or(hi);
    let right = (left..hi)
        .rev()
        .find(|&x| column_ink_count(img, x) != 0)
        .map_or(left, |x| x + 1);
    img.sub_image(bounds.with_columns(left, right))
}
