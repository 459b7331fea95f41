use crate::error::GenerateError;
use crate::render::RenderTarget;
use crate::source::SourceImage;
use crate::utils::{PngTileEncoder, TileEncoder};

use super::{
    max_zoom, source_rect, tiles_per_side, total_tiles, GenerationProgress, GeneratorConfig, Tile,
    TileAddress, TilePyramid,
};

/// Cuts a loaded source image into a `TilePyramid`.
///
/// Tiles are produced one after another into a single render target. Loading
/// another image replaces the previous one, every run builds a fresh pyramid.
pub struct TilePyramidGenerator<I: SourceImage> {
    config: GeneratorConfig,
    encoder: Box<dyn TileEncoder>,
    image: Option<I>,
}

impl<I: SourceImage> TilePyramidGenerator<I> {
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_encoder(config, Box::new(PngTileEncoder {}))
    }

    pub fn with_encoder(config: GeneratorConfig, encoder: Box<dyn TileEncoder>) -> Self {
        TilePyramidGenerator {
            config,
            encoder,
            image: None,
        }
    }

    pub fn load(&mut self, image: I) {
        self.image = Some(image);
    }

    pub fn generate(
        &self,
        on_progress: impl FnMut(GenerationProgress),
    ) -> Result<TilePyramid, GenerateError> {
        self.generate_with(on_progress, || false)
    }

    /// Like `generate`, but asks `should_cancel` before every tile.
    pub fn generate_with(
        &self,
        mut on_progress: impl FnMut(GenerationProgress),
        should_cancel: impl Fn() -> bool,
    ) -> Result<TilePyramid, GenerateError> {
        let image = self.image.as_ref().ok_or(GenerateError::NoImageLoaded)?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(GenerateError::InvalidDimensions { width, height });
        }
        if self.config.tile_size == 0 {
            return Err(GenerateError::InvalidTileSize(self.config.tile_size));
        }

        let max_zoom = max_zoom(width, height, self.config.tile_size);
        let total = total_tiles(max_zoom);

        let mut target = RenderTarget::new(self.config.tile_size, self.config.background);
        let mut tiles = Vec::with_capacity(total as usize);

        for zoom in 0..=max_zoom {
            let side = tiles_per_side(zoom);
            for y in 0..side {
                for x in 0..side {
                    if should_cancel() {
                        return Err(GenerateError::Cancelled {
                            produced: tiles.len() as u64,
                            total,
                        });
                    }

                    let address = TileAddress::new(zoom, x, y);
                    let patch = image.crop(source_rect(width, height, address));
                    let rendered = target.draw(&patch);

                    let data = self
                        .encoder
                        .encode(rendered)
                        .map_err(|source| GenerateError::EncodingFailure { address, source })?;
                    tiles.push(Tile::new(address, data));

                    on_progress(GenerationProgress {
                        last: address,
                        produced: tiles.len() as u64,
                        total,
                    });
                }
            }
        }

        Ok(TilePyramid {
            width,
            height,
            tile_size: self.config.tile_size,
            max_zoom,
            file_extension: self.encoder.file_extension().to_string(),
            tiles,
        })
    }
}

/// One-shot generation of `image` without keeping a generator around.
#[allow(dead_code)]
pub fn generate<I: SourceImage>(
    image: I,
    config: GeneratorConfig,
    on_progress: impl FnMut(GenerationProgress),
) -> Result<TilePyramid, GenerateError> {
    let mut generator = TilePyramidGenerator::new(config);
    generator.load(image);
    generator.generate(on_progress)
}
