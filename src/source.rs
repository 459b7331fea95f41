use image::{GenericImageView, Rgba};

/// Axis-aligned crop rectangle in source pixel space.
///
/// Coordinates are real-valued. A tile at a deep zoom level of an image whose
/// size is not a multiple of `2^zoom` starts and ends between pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        SourceRect { x, y, width, height }
    }
}

/// A decoded raster which tiles are cut from.
pub trait SourceImage {
    fn dimensions(&self) -> (u32, u32);

    /// RGBA value of the pixel at `(x, y)`. Callers stay within `dimensions()`.
    fn pixel(&self, x: u32, y: u32) -> Rgba<u8>;

    fn crop(&self, rect: SourceRect) -> RasterPatch<'_, Self>
    where
        Self: Sized,
    {
        RasterPatch { image: self, rect }
    }
}

impl<I> SourceImage for I
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        self.get_pixel(x, y)
    }
}

/// A rectangular region of a `SourceImage`, waiting to be drawn onto a `RenderTarget`.
///
/// The region may reach past the image bounds, the uncovered part is drawn
/// as background.
#[derive(Debug)]
pub struct RasterPatch<'a, I: SourceImage> {
    image: &'a I,
    rect: SourceRect,
}

impl<'a, I: SourceImage> RasterPatch<'a, I> {
    pub fn image(&self) -> &'a I {
        self.image
    }

    pub fn rect(&self) -> SourceRect {
        self.rect
    }
}
