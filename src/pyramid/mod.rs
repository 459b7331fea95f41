//! Quad-tree tile pyramid of a single raster image.
//!
//! Zoom level 0 shows the whole image in one tile, every following level
//! splits each tile into four. Tiles are addressed by `(zoom, x, y)` with
//! `x` and `y` counted from the top-left corner.

mod generator;
mod progress;

use std::fmt::{Display, Formatter, Result};

use image::Rgba;

use crate::source::SourceRect;
use crate::utils::TILE_SIZE_IN_PX;

#[allow(unused_imports)]
pub use generator::generate;
pub use generator::TilePyramidGenerator;
pub use progress::GenerationProgress;

#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Edge length of every produced tile in px.
    pub tile_size: u32,
    /// Fill for image areas that are transparent or not covered by the source.
    pub background: Rgba<u8>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            tile_size: TILE_SIZE_IN_PX,
            background: Rgba([255, 255, 255, 255]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileAddress {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileAddress {
    pub fn new(zoom: u8, x: u32, y: u32) -> Self {
        TileAddress { zoom, x, y }
    }
}

impl Display for TileAddress {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// One encoded tile. Immutable once produced.
#[derive(Debug, Clone)]
pub struct Tile {
    address: TileAddress,
    data: Vec<u8>,
}

impl Tile {
    pub(crate) fn new(address: TileAddress, data: Vec<u8>) -> Self {
        Tile { address, data }
    }

    pub fn address(&self) -> TileAddress {
        self.address
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// All tiles of zoom `0..=max_zoom`, ordered by zoom, then y, then x.
#[derive(Debug)]
pub struct TilePyramid {
    width: u32,
    height: u32,
    tile_size: u32,
    max_zoom: u8,
    file_extension: String,
    tiles: Vec<Tile>,
}

impl TilePyramid {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    /// Extension of the encoding every tile was written with, e.g. `png`.
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Tiles of a single zoom level, `None` past `max_zoom`.
    pub fn level(&self, zoom: u8) -> Option<&[Tile]> {
        if zoom > self.max_zoom {
            return None;
        }

        let start = level_offset(zoom) as usize;
        let end = start + tiles_at_level(zoom) as usize;
        self.tiles.get(start..end)
    }
}

/// Smallest zoom level at which the longer image side fits into `tile_size * 2^zoom`,
/// i.e. `ceil(log2(max(width, height) / tile_size))` floored at 0.
pub fn max_zoom(width: u32, height: u32, tile_size: u32) -> u8 {
    let longest = width.max(height) as u64;
    let tile_size = tile_size.max(1) as u64;

    let mut zoom = 0u8;
    while tile_size << zoom < longest {
        zoom += 1;
    }

    zoom
}

pub fn tiles_per_side(zoom: u8) -> u32 {
    1u32 << zoom
}

pub fn tiles_at_level(zoom: u8) -> u64 {
    4u64.pow(zoom as u32)
}

/// Number of tiles in levels `0..=max_zoom`: `(4^(max_zoom + 1) - 1) / 3`.
pub fn total_tiles(max_zoom: u8) -> u64 {
    (4u64.pow(max_zoom as u32 + 1) - 1) / 3
}

fn level_offset(zoom: u8) -> u64 {
    if zoom == 0 {
        0
    } else {
        total_tiles(zoom - 1)
    }
}

/// Region of a `width` × `height` image covered by tile `address`.
///
/// Each dimension is split independently, so tiles of non-square images
/// are stretched when drawn.
pub fn source_rect(width: u32, height: u32, address: TileAddress) -> SourceRect {
    let side = tiles_per_side(address.zoom) as f64;
    let (width, height) = (width as f64, height as f64);

    SourceRect::new(
        address.x as f64 * width / side,
        address.y as f64 * height / side,
        width / side,
        height / side,
    )
}
