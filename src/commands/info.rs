use std::path::Path;

use crate::commands::{TileCommand, TileOptions};
use crate::pyramid::{max_zoom, tiles_at_level, tiles_per_side, total_tiles};

#[cfg(test)]
#[allow(unused_must_use)]
mod tests {
    use image::{Rgba, RgbaImage};

    use crate::commands::info::Info;
    use crate::commands::{TileCommand, TileOptions};
    use crate::test::with_input_and_output_paths;

    #[test]
    fn info_does_not_need_output() {
        assert!(!(Info {}).requires_output());
    }

    #[test]
    fn exec_bails_if_input_is_not_an_image() {
        with_input_and_output_paths(|input_path, _| {
            std::fs::write(input_path.join("map.png"), "foo").unwrap();
            assert!((Info {}).exec(&input_path.join("map.png"), None, &TileOptions::default()).is_err());
        });
    }

    #[test]
    fn exec_reads_image_dimensions() {
        with_input_and_output_paths(|input_path, _| {
            let img_path = input_path.join("map.png");
            RgbaImage::from_pixel(300, 20, Rgba([0, 0, 0, 255])).save(&img_path).unwrap();

            assert!((Info {}).exec(&img_path, None, &TileOptions::default()).is_ok());
        });
    }
}

pub struct Info {}

impl TileCommand for Info {
    fn get_description(&self) -> &'static str {
        "Print the zoom levels and tile counts an image would produce."
    }

    fn requires_output(&self) -> bool {
        false
    }

    fn exec(&self, input_path: &Path, _: Option<&Path>, options: &TileOptions) -> anyhow::Result<()> {
        let (width, height) = image::image_dimensions(input_path)?;
        let tile_size = options.config.tile_size;
        let max_zoom = max_zoom(width, height, tile_size);

        println!("ℹ️  Image size: {}x{}", width, height);
        println!("ℹ️  Tile size: {}px", tile_size);
        println!("ℹ️  Max zoom: {}", max_zoom);
        for zoom in 0..=max_zoom {
            let side = tiles_per_side(zoom);
            println!(
                "    zoom {}: {}x{} = {} tiles",
                zoom,
                side,
                side,
                tiles_at_level(zoom)
            );
        }
        println!("ℹ️  Total tiles: {}", total_tiles(max_zoom));

        Ok(())
    }
}
