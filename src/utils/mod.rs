mod tile_error;

use image::{codecs::png::PngEncoder, ColorType, RgbaImage};
use std::error::Error;

pub use tile_error::TileError;

pub const TILE_SIZE_IN_PX: u32 = 256;

/// Turns a rendered tile into the bytes that end up in a tile file.
pub trait TileEncoder {
    fn file_extension(&self) -> &str;
    fn encode(&self, tile: &RgbaImage) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>>;
}

pub struct PngTileEncoder {}

impl TileEncoder for PngTileEncoder {
    fn file_extension(&self) -> &str {
        "png"
    }

    fn encode(&self, tile: &RgbaImage) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        encode_png(tile)
    }
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);

    let (width, height) = img.dimensions();
    encoder.encode(img.as_raw(), width, height, ColorType::Rgba8)?;

    Ok(buf)
}
