//! Slices scanned page images into per-line snippets paired with their
//! ground-truth text, producing OCR training data.

pub mod clip;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod profile;
pub mod raster;
pub mod region;
pub mod segment;

pub use driver::{Driver, Outcome, SkipReason, Summary};
pub use error::{Error, Result};
pub use geometry::Rect;
pub use raster::{Page, PageView, Raster};
pub use region::Region;
