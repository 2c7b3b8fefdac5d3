//! Ink density profiles: foreground pixel counts per row and per column.

use std::ops::Range;

use crate::raster::Raster;

/// Number of ink pixels in row `y` across the full width of the bounds.
pub fn row_ink_count<R: Raster>(img: &R, y: u32) -> u32 {
    let b = img.bounds();
    (b.min.x..b.max.x).filter(|&x| img.is_ink(x, y)).count() as u32
}

/// Number of ink pixels in column `x` across the full height of the bounds.
pub fn column_ink_count<R: Raster>(img: &R, x: u32) -> u32 {
    let b = img.bounds();
    (b.min.y..b.max.y).filter(|&y| img.is_ink(x, y)).count() as u32
}

/// Row ink counts for every row in `rows`, in order.
pub fn row_profile<R: Raster>(img: &R, rows: Range<u32>) -> Vec<u32> {
    rows.map(|y| row_ink_count(img, y)).collect()
}
