use super::TileAddress;

/// Progress of a generation run, reported after every produced tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationProgress {
    /// The tile that was just produced.
    pub last: TileAddress,
    pub produced: u64,
    pub total: u64,
}

impl GenerationProgress {
    /// `round(produced / total * 100)`, between 0 and 100.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }

        ((self.produced as f64 / self.total as f64) * 100.0).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.produced == self.total
    }

    /// True when `last` is the final tile of its zoom level.
    pub fn finishes_level(&self) -> bool {
        let last_index = (1u32 << self.last.zoom) - 1;
        self.last.x == last_index && self.last.y == last_index
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::GenerationProgress;
    use crate::pyramid::TileAddress;

    fn progress(produced: u64, total: u64) -> GenerationProgress {
        GenerationProgress {
            last: TileAddress::new(0, 0, 0),
            produced,
            total,
        }
    }

    #[rstest]
    #[case(1, 21, 5)]
    #[case(2, 21, 10)]
    #[case(11, 21, 52)]
    #[case(21, 21, 100)]
    #[case(1, 1, 100)]
    #[case(0, 5, 0)]
    fn percent_is_rounded(#[case] produced: u64, #[case] total: u64, #[case] expected: u8) {
        assert_eq!(expected, progress(produced, total).percent());
    }

    #[test]
    fn complete_only_at_last_tile() {
        assert!(!progress(20, 21).is_complete());
        assert!(progress(21, 21).is_complete());
    }

    #[test]
    fn level_ends_at_bottom_right_tile() {
        let mut p = progress(5, 21);
        p.last = TileAddress::new(1, 1, 1);
        assert!(p.finishes_level());

        p.last = TileAddress::new(1, 1, 0);
        assert!(!p.finishes_level());

        p.last = TileAddress::new(0, 0, 0);
        assert!(p.finishes_level());
    }
}
