use std::error::Error;
use std::fmt::{Display, Formatter, Result};

use crate::pyramid::TileAddress;

type Underlying = Box<dyn Error + Send + Sync>;

#[derive(Debug)]
pub struct TileError {
    address: TileAddress,
    original_error: Underlying,
}

impl TileError {
    pub fn new(address: TileAddress, original_error: impl Into<Underlying>) -> Self {
        TileError {
            address,
            original_error: original_error.into(),
        }
    }
}

impl Display for TileError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "Tile {}: {}", self.address, self.original_error)
    }
}

impl Error for TileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.original_error)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io::ErrorKind;

    use super::TileError;
    use crate::pyramid::TileAddress;

    #[test]
    fn display_names_tile_and_cause() {
        let err = TileError::new(
            TileAddress::new(2, 3, 1),
            std::io::Error::new(ErrorKind::Other, "disk full"),
        );

        assert_eq!("Tile 2/3/1: disk full", err.to_string());
        assert!(err.source().is_some());
    }
}
