use image::{Rgba, RgbaImage};

use crate::source::{RasterPatch, SourceImage};

/// Scratch drawing surface of one generation run.
///
/// Every tile is drawn into the same buffer, which is cleared to the
/// background colour first. Patches are stretched with an area-weighted box
/// filter, so fractional source rectangles and both up- and downscaling are
/// handled by the same code path.
pub struct RenderTarget {
    buffer: RgbaImage,
    background: Rgba<u8>,
}

impl RenderTarget {
    pub fn new(size: u32, background: Rgba<u8>) -> Self {
        RenderTarget {
            buffer: RgbaImage::from_pixel(size, size, opaque(background)),
            background: opaque(background),
        }
    }

    pub fn size(&self) -> u32 {
        self.buffer.width()
    }

    pub fn clear(&mut self) {
        let background = self.background;
        self.buffer
            .pixels_mut()
            .for_each(|pixel| *pixel = background);
    }

    /// Clears the surface and draws `patch` stretched over all of it.
    pub fn draw<I: SourceImage>(&mut self, patch: &RasterPatch<I>) -> &RgbaImage {
        self.clear();

        let size = self.size();
        let rect = patch.rect();
        let step_x = rect.width / size as f64;
        let step_y = rect.height / size as f64;

        for dy in 0..size {
            let y0 = rect.y + dy as f64 * step_y;
            for dx in 0..size {
                let x0 = rect.x + dx as f64 * step_x;
                let pixel = self.average(patch.image(), x0, y0, x0 + step_x, y0 + step_y);
                self.buffer.put_pixel(dx, dy, pixel);
            }
        }

        &self.buffer
    }

    /// Coverage-weighted mean of the source area `[x0, x1) × [y0, y1)` composited
    /// over the background. Area outside the image counts as background.
    fn average<I: SourceImage>(&self, image: &I, x0: f64, y0: f64, x1: f64, y1: f64) -> Rgba<u8> {
        let area = (x1 - x0) * (y1 - y0);
        if area <= 0.0 {
            return self.background;
        }

        let (width, height) = image.dimensions();
        let bg = channels(self.background);
        let mut sum = [0f64; 3];
        let mut covered = 0f64;

        for py in span(y0, y1, height) {
            let wy = overlap(y0, y1, py);
            for px in span(x0, x1, width) {
                let weight = wy * overlap(x0, x1, px);
                if weight <= 0.0 {
                    continue;
                }

                let Rgba([r, g, b, a]) = image.pixel(px, py);
                let alpha = a as f64 / 255.0;
                for (acc, (c, bg_c)) in sum.iter_mut().zip([r, g, b].iter().zip(bg.iter())) {
                    *acc += weight * (*c as f64 * alpha + bg_c * (1.0 - alpha));
                }
                covered += weight;
            }
        }

        let uncovered = (area - covered).max(0.0);
        let mut out = [0u8; 4];
        for i in 0..3 {
            let value = (sum[i] + uncovered * bg[i]) / area;
            out[i] = value.round().clamp(0.0, 255.0) as u8;
        }
        out[3] = 255;

        Rgba(out)
    }
}

fn opaque(color: Rgba<u8>) -> Rgba<u8> {
    let Rgba([r, g, b, _]) = color;
    Rgba([r, g, b, 255])
}

fn channels(color: Rgba<u8>) -> [f64; 3] {
    [color[0] as f64, color[1] as f64, color[2] as f64]
}

/// Pixel indices in `0..limit` touched by `[from, to)`.
fn span(from: f64, to: f64, limit: u32) -> std::ops::Range<u32> {
    let start = from.floor().max(0.0).min(limit as f64) as u32;
    let end = to.ceil().max(0.0).min(limit as f64) as u32;
    start..end
}

fn overlap(from: f64, to: f64, pixel: u32) -> f64 {
    let lo = from.max(pixel as f64);
    let hi = to.min(pixel as f64 + 1.0);
    (hi - lo).max(0.0)
}
