//! Splitting a page into horizontal text-line bands.
//!
//! The page is first clipped to its inked rows. Lines are then cut one at a
//! time from the top: each cut is placed at the emptiest row in a window that
//! opens two thirds of an expected line height below the current line's first
//! inked row and closes two line heights below it. The expected line height is
//! the remaining clipped height divided evenly among the remaining lines.

use crate::clip::{clip_horizontal, clip_vertical};
use crate::geometry::Rect;
use crate::profile::row_profile;
use crate::raster::Raster;

/// Search window opens at `WINDOW_START_NUM / WINDOW_START_DEN` of a line height.
pub const WINDOW_START_NUM: u32 = 2;
pub const WINDOW_START_DEN: u32 = 3;

/// Search window closes this many line heights below the line's start.
pub const WINDOW_END_LINES: u32 = 2;

/// The minimum search stops at the first row denser than this multiple of
/// the best row seen so far.
pub const EARLY_EXIT_FACTOR: u32 = 10;

/// One line's worth of a segmented page.
pub enum LineCut<R> {
    /// The horizontally clipped snippet for the line.
    Snippet(R),
    /// The band for this line had zero height.
    Empty,
}

/// Index of the lowest count in `profile`, preferring the earliest on ties.
///
/// The scan is greedy: it stops at the first count exceeding
/// [`EARLY_EXIT_FACTOR`] times the current minimum, so a lower count further
/// along may be missed. An empty profile yields 0.
pub fn find_cut(profile: &[u32]) -> usize {
    let Some((&first, rest)) = profile.split_first() else {
        return 0;
    };
    let mut min = first;
    let mut best = 0;
    for (i, &count) in rest.iter().enumerate() {
        if count < min {
            min = count;
            best = i + 1;
        }
        if count > min.saturating_mul(EARLY_EXIT_FACTOR) {
            break;
        }
    }
    best
}

/// Splits `page` into `n` ordered, non-overlapping bands spanning its
/// vertically clipped extent. Bands may be empty when the page is too short
/// for the requested number of lines.
pub fn segment<R: Raster>(page: &R, n: usize) -> Vec<Rect> {
    if n == 0 {
        return Vec::new();
    }

    let clipped = clip_vertical(page);
    let bounds = clipped.bounds();
    let (top, bottom) = (bounds.min.y, bounds.max.y);
    let profile = row_profile(&clipped, top..bottom);
    let at = |y: u32| (y - top) as usize;

    let mut bands = Vec::with_capacity(n);
    let mut from = top;
    for i in 0..n {
        while from < bottom && profile[at(from)] == 0 {
            from += 1;
        }

        let to = if i == n - 1 {
            bottom
        } else {
            let remaining = u32::try_from(n - i).unwrap_or(u32::MAX);
            let lh = (bottom - from) / remaining;
            let start = from + WINDOW_START_NUM * lh / WINDOW_START_DEN;
            let end = from + WINDOW_END_LINES * lh;
            start + find_cut(&profile[at(start)..at(end)]) as u32
        };

        bands.push(bounds.with_rows(from, to));
        from = to;
    }
    bands
}

/// Segments `page` into `n` lines and crops each non-empty band to the
/// horizontal extent of its ink.
pub fn cut_lines<R: Raster>(page: &R, n: usize) -> Vec<LineCut<R>> {
    segment(page, n)
        .into_iter()
        .map(|band| {
            if band.is_empty() {
                LineCut::Empty
            } else {
                LineCut::Snippet(clip_horizontal(&page.sub_image(band)))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PageView;
    use image::{GrayImage, Luma};

    /// White page with full-rows-of-ink bands spanning columns `[x0, x1)`.
    fn striped(width: u32, height: u32, x0: u32, x1: u32, bands: &[(u32, u32)]) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            let inked = x >= x0 && x < x1 && bands.iter().any(|&(s, e)| y >= s && y < e);
            if inked { Luma([0]) } else { Luma([255]) }
        })
    }

    #[test]
    fn find_cut_prefers_earliest_minimum() {
        assert_eq!(find_cut(&[2, 2, 1, 1]), 2);
        assert_eq!(find_cut(&[0, 0, 0]), 0);
        assert_eq!(find_cut(&[7]), 0);
    }

    #[test]
    fn find_cut_stops_early() {
        // 60 > 10 * 3 ends the scan before the zero is reached.
        assert_eq!(find_cut(&[5, 3, 60, 0]), 1);
        assert_eq!(find_cut(&[5, 3, 30, 0]), 3);
    }

    #[test]
    fn find_cut_on_empty_window() {
        assert_eq!(find_cut(&[]), 0);
    }

    #[test]
    fn three_bands() {
        let img = striped(100, 90, 5, 95, &[(10, 20), (40, 50), (70, 80)]);
        let view = PageView::new(&img);
        assert_eq!(
            segment(&view, 3),
            vec![
                Rect::new(0, 10, 100, 25),
                Rect::new(0, 40, 100, 53),
                Rect::new(0, 70, 100, 80),
            ]
        );

        let cuts = cut_lines(&view, 3);
        let bounds: Vec<Rect> = cuts
            .iter()
            .map(|cut| match cut {
                LineCut::Snippet(s) => s.bounds(),
                LineCut::Empty => panic!("no band should be empty"),
            })
            .collect();
        assert_eq!(
            bounds,
            vec![
                Rect::new(5, 10, 95, 25),
                Rect::new(5, 40, 95, 53),
                Rect::new(5, 70, 95, 80),
            ]
        );
    }

    #[test]
    fn zero_lines_is_a_no_op() {
        let img = striped(10, 10, 0, 10, &[(2, 4)]);
        assert!(segment(&PageView::new(&img), 0).is_empty());
        assert!(cut_lines(&PageView::new(&img), 0).is_empty());
    }

    #[test]
    fn one_line_spans_clipped_page() {
        let img = striped(30, 40, 3, 20, &[(5, 9), (20, 31)]);
        let view = PageView::new(&img);
        assert_eq!(segment(&view, 1), vec![Rect::new(0, 5, 30, 31)]);
    }

    #[test]
    fn short_page_yields_empty_bands() {
        let img = striped(10, 10, 0, 10, &[(4, 5)]);
        let cuts = cut_lines(&PageView::new(&img), 3);
        assert_eq!(cuts.len(), 3);
        assert!(matches!(cuts[0], LineCut::Empty));
        assert!(matches!(cuts[1], LineCut::Empty));
        match &cuts[2] {
            LineCut::Snippet(s) => assert_eq!(s.bounds(), Rect::new(0, 4, 10, 5)),
            LineCut::Empty => panic!("last line should keep the remaining ink"),
        }
    }

    #[test]
    fn blank_page_yields_only_empty_bands() {
        let img = GrayImage::from_pixel(10, 10, Luma([255]));
        let cuts = cut_lines(&PageView::new(&img), 2);
        assert!(cuts.iter().all(|cut| matches!(cut, LineCut::Empty)));
    }

    #[test]
    fn evenly_spaced_bands_are_each_contained() {
        for k in 1..=6u32 {
            for height in [3, 8, 15] {
                for gap in [1, 4, 12] {
                    let margin = 7;
                    let ink: Vec<(u32, u32)> = (0..k)
                        .map(|j| {
                            let s = margin + j * (height + gap);
                            (s, s + height)
                        })
                        .collect();
                    let page_height = margin * 2 + k * (height + gap);
                    let img = striped(40, page_height, 2, 38, &ink);
                    let bands = segment(&PageView::new(&img), k as usize);

                    assert_eq!(bands.len(), k as usize);
                    for (band, &(s, e)) in bands.iter().zip(&ink) {
                        assert!(
                            band.min.y <= s && band.max.y >= e,
                            "k={k} h={height} g={gap}: {band:?} misses ink [{s}, {e})"
                        );
                    }
                    for pair in bands.windows(2) {
                        assert!(pair[0].max.y <= pair[1].min.y);
                    }
                    assert_eq!(bands[0].min.y, ink[0].0);
                    assert_eq!(bands[bands.len() - 1].max.y, ink[ink.len() - 1].1);
                }
            }
        }
    }
}
