use thiserror::Error;

use crate::pyramid::TileAddress;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Nothing to tile yet. Callers treat this as a no-op.
    #[error("No source image loaded")]
    NoImageLoaded,

    #[error("Invalid image dimensions {width}x{height}, both sides must be at least 1px")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid tile size {0}, must be at least 1px")]
    InvalidTileSize(u32),

    #[error("Failed to encode tile {address}: {source}")]
    EncodingFailure {
        address: TileAddress,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Generation cancelled after {produced} of {total} tiles")]
    Cancelled { produced: u64, total: u64 },
}

impl GenerateError {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GenerateError::NoImageLoaded)
    }
}
