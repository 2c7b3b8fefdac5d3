//! Bounded, read-only views over decoded page bitmaps.
//!
//! Every decoded page is held in its native color model and compared
//! pixel-for-pixel against that model's black. Views never copy pixels;
//! cropping only narrows the bounds.

use std::path::Path;

use image::{DynamicImage, ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba};

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// A pixel type with a fixed foreground ("ink") value.
pub trait Ink: Pixel + PartialEq + 'static {
    /// Black, as represented in this color model.
    fn ink() -> Self;

    fn into_dynamic(buffer: ImageBuffer<Self, Vec<Self::Subpixel>>) -> DynamicImage;
}

macro_rules! impl_ink {
    ($pixel:ty, $value:expr, $variant:ident) => {
        impl Ink for $pixel {
            fn ink() -> Self {
                $value
            }

            fn into_dynamic(buffer: ImageBuffer<Self, Vec<Self::Subpixel>>) -> DynamicImage {
                DynamicImage::$variant(buffer)
            }
        }
    };
}

impl_ink!(Luma<u8>, Luma([0]), ImageLuma8);
impl_ink!(LumaA<u8>, LumaA([0, u8::MAX]), ImageLumaA8);
impl_ink!(Rgb<u8>, Rgb([0, 0, 0]), ImageRgb8);
impl_ink!(Rgba<u8>, Rgba([0, 0, 0, u8::MAX]), ImageRgba8);
impl_ink!(Luma<u16>, Luma([0]), ImageLuma16);
impl_ink!(LumaA<u16>, LumaA([0, u16::MAX]), ImageLumaA16);
impl_ink!(Rgb<u16>, Rgb([0, 0, 0]), ImageRgb16);
impl_ink!(Rgba<u16>, Rgba([0, 0, 0, u16::MAX]), ImageRgba16);

/// An image that knows its bounds, can answer whether a pixel is ink, and
/// can be narrowed to a sub-rectangle sharing the same pixels.
pub trait Raster: Sized {
    fn bounds(&self) -> Rect;

    /// Whether `(x, y)` holds the foreground color. Coordinates outside
    /// [`Raster::bounds`] are never ink.
    fn is_ink(&self, x: u32, y: u32) -> bool;

    /// The view restricted to `rect` intersected with the current bounds.
    fn sub_image(&self, rect: Rect) -> Self;
}

/// A rectangular window onto a borrowed pixel buffer.
pub struct PageView<'a, P: Ink> {
    pixels: &'a ImageBuffer<P, Vec<P::Subpixel>>,
    bounds: Rect,
}

impl<P: Ink> Clone for PageView<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Ink> Copy for PageView<'_, P> {}

impl<'a, P: Ink> PageView<'a, P> {
    /// A view covering the whole buffer.
    pub fn new(pixels: &'a ImageBuffer<P, Vec<P::Subpixel>>) -> Self {
        let (width, height) = pixels.dimensions();
        Self {
            pixels,
            bounds: Rect::from_size(width, height),
        }
    }

    /// Copies the viewed pixels into an owned buffer.
    pub fn to_image(&self) -> ImageBuffer<P, Vec<P::Subpixel>> {
        let b = self.bounds;
        ImageBuffer::from_fn(b.width(), b.height(), |x, y| {
            *self.pixels.get_pixel(b.min.x + x, b.min.y + y)
        })
    }

    /// Writes the viewed pixels as a PNG file.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        P::into_dynamic(self.to_image())
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| Error::Encode {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl<P: Ink> Raster for PageView<'_, P> {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_ink(&self, x: u32, y: u32) -> bool {
        let b = self.bounds;
        if x < b.min.x || x >= b.max.x || y < b.min.y || y >= b.max.y {
            return false;
        }
        *self.pixels.get_pixel(x, y) == P::ink()
    }

    fn sub_image(&self, rect: Rect) -> Self {
        Self {
            pixels: self.pixels,
            bounds: self.bounds.intersect(rect),
        }
    }
}

/// Receives a [`PageView`] in whatever pixel type the page was decoded to.
pub trait PageVisitor {
    type Output;

    fn visit<P: Ink>(self, view: PageView<'_, P>) -> Self::Output;
}

/// A decoded page in one of the color models that can be segmented and
/// written back as PNG.
pub enum Page {
    Luma8(ImageBuffer<Luma<u8>, Vec<u8>>),
    LumaA8(ImageBuffer<LumaA<u8>, Vec<u8>>),
    Rgb8(ImageBuffer<Rgb<u8>, Vec<u8>>),
    Rgba8(ImageBuffer<Rgba<u8>, Vec<u8>>),
    Luma16(ImageBuffer<Luma<u16>, Vec<u16>>),
    LumaA16(ImageBuffer<LumaA<u16>, Vec<u16>>),
    Rgb16(ImageBuffer<Rgb<u16>, Vec<u16>>),
    Rgba16(ImageBuffer<Rgba<u16>, Vec<u16>>),
}

impl Page {
    /// Decodes the image at `path`, keeping its native color model.
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let color = img.color();
        Self::from_dynamic(img).ok_or_else(|| Error::UnsupportedColor {
            path: path.to_path_buf(),
            color,
        })
    }

    /// Wraps a decoded image; float color models have no PNG encoding and
    /// yield `None`.
    pub fn from_dynamic(img: DynamicImage) -> Option<Self> {
        let page = match img {
            DynamicImage::ImageLuma8(b) => Page::Luma8(b),
            DynamicImage::ImageLumaA8(b) => Page::LumaA8(b),
            DynamicImage::ImageRgb8(b) => Page::Rgb8(b),
            DynamicImage::ImageRgba8(b) => Page::Rgba8(b),
            DynamicImage::ImageLuma16(b) => Page::Luma16(b),
            DynamicImage::ImageLumaA16(b) => Page::LumaA16(b),
            DynamicImage::ImageRgb16(b) => Page::Rgb16(b),
            DynamicImage::ImageRgba16(b) => Page::Rgba16(b),
            _ => return None,
        };
        Some(page)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Page::Luma8(b) => b.dimensions(),
            Page::LumaA8(b) => b.dimensions(),
            Page::Rgb8(b) => b.dimensions(),
            Page::Rgba8(b) => b.dimensions(),
            Page::Luma16(b) => b.dimensions(),
            Page::LumaA16(b) => b.dimensions(),
            Page::Rgb16(b) => b.dimensions(),
            Page::Rgba16(b) => b.dimensions(),
        }
    }

    pub fn visit<V: PageVisitor>(&self, visitor: V) -> V::Output {
        match self {
            Page::Luma8(b) => visitor.visit(PageView::new(b)),
            Page::LumaA8(b) => visitor.visit(PageView::new(b)),
            Page::Rgb8(b) => visitor.visit(PageView::new(b)),
            Page::Rgba8(b) => visitor.visit(PageView::new(b)),
            Page::Luma16(b) => visitor.visit(PageView::new(b)),
            Page::LumaA16(b) => visitor.visit(PageView::new(b)),
            Page::Rgb16(b) => visitor.visit(PageView::new(b)),
            Page::Rgba16(b) => visitor.visit(PageView::new(b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Rgb32FImage, RgbaImage};

    #[test]
    fn only_black_is_ink() {
        let mut img = GrayImage::from_pixel(3, 1, Luma([255]));
        img.put_pixel(0, 0, Luma([0]));
        img.put_pixel(1, 0, Luma([1]));
        let view = PageView::new(&img);
        assert!(view.is_ink(0, 0));
        assert!(!view.is_ink(1, 0));
        assert!(!view.is_ink(2, 0));
    }

    #[test]
    fn transparent_black_is_not_ink() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        let view = PageView::new(&img);
        assert!(view.is_ink(0, 0));
        assert!(!view.is_ink(1, 0));
    }

    #[test]
    fn sub_image_hides_pixels_outside_bounds() {
        let img = GrayImage::from_pixel(4, 4, Luma([0]));
        let view = PageView::new(&img).sub_image(Rect::new(1, 1, 3, 3));
        assert_eq!(view.bounds(), Rect::new(1, 1, 3, 3));
        assert!(view.is_ink(1, 1));
        assert!(!view.is_ink(0, 0));
        assert!(!view.is_ink(3, 3));
        assert_eq!(view.to_image().dimensions(), (2, 2));
    }

    #[test]
    fn float_pages_are_rejected() {
        let img = DynamicImage::ImageRgb32F(Rgb32FImage::new(2, 2));
        assert!(Page::from_dynamic(img).is_none());
    }

    #[test]
    fn visitor_sees_native_pixels() {
        struct Width;
        impl PageVisitor for Width {
            type Output = u32;
            fn visit<P: Ink>(self, view: PageView<'_, P>) -> u32 {
                view.bounds().width()
            }
        }

        let page = Page::from_dynamic(DynamicImage::new_luma16(7, 2))
            .expect("16-bit gray should be supported");
        assert_eq!(page.visit(Width), 7);
        assert_eq!(page.dimensions(), (7, 2));
    }
}
