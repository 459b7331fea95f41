use anyhow::{anyhow, bail};

use image::io::Reader as ImageReader;
use std::path::Path;

use std::time::Instant;

use crate::commands::{TileCommand, TileOptions};
use crate::export::{write_description, write_tiles, STRUCTURE_FILE_NAME};
use crate::pyramid::TilePyramidGenerator;


pub struct Tiles {}

impl TileCommand for Tiles {
    fn get_description(&self) -> &'static str {
        "Slice an image into a quad-tree tile pyramid."
    }

    fn exec(&self, input_path: &Path, output_path: Option<&Path>, options: &TileOptions) -> anyhow::Result<()> {
        let start = Instant::now();

        let output_path = match output_path {
            Some(path) if path.is_dir() => path,
            _ => bail!("Output path is not a directory"),
        };

        let now = Instant::now();
        println!("▶️  Loading image");
        let img = ImageReader::open(input_path)?.decode()?;
        let (width, height) = image::GenericImageView::dimensions(&img);
        println!("✔️  Loaded {}x{} image in {}ms", width, height, now.elapsed().as_millis());

        let mut generator = TilePyramidGenerator::new(options.config);
        generator.load(img);

        let now = Instant::now();
        let mut level_start = Instant::now();
        let mut last_percent = None;
        println!("▶️  Building tiles");
        let result = generator.generate(|progress| {
            let percent = progress.percent();
            if last_percent != Some(percent) {
                println!("    ℹ️  {}% ({}/{} tiles)", percent, progress.produced, progress.total);
                last_percent = Some(percent);
            }

            if progress.finishes_level() {
                println!(
                    "    ✔️  Finished tiles for zoom {} in {}ms",
                    progress.last.zoom,
                    level_start.elapsed().as_millis()
                );
                level_start = Instant::now();
            }

            if progress.is_complete() {
                println!("    ✔️  Rendered all {} tiles", progress.total);
            }
        });
        let pyramid = match result {
            Err(e) if !e.is_fatal() => {
                println!("ℹ️  {}, nothing to do", e);
                return Ok(());
            }
            other => other?,
        };
        println!(
            "✔️  Built {} tiles up to zoom {} in {}ms",
            pyramid.len(),
            pyramid.max_zoom(),
            now.elapsed().as_millis()
        );

        let now = Instant::now();
        println!("▶️  Writing tiles");
        write_tiles(output_path, &pyramid, options.layout).map_err(|e| anyhow!("{}", e))?;
        println!("✔️  Wrote tiles in {}ms", now.elapsed().as_millis());

        let now = Instant::now();
        println!("▶️  Creating {} and tile.json", STRUCTURE_FILE_NAME);
        write_description(output_path, &pyramid, options.layout)?;
        let name = input_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Raster");
        let url_template = options.layout.url_template(pyramid.file_extension());
        crate::tilejson::write(output_path, name, &pyramid, &url_template)?;
        println!(
            "✔️  Created {} and tile.json in {}ms",
            STRUCTURE_FILE_NAME,
            now.elapsed().as_millis()
        );

        println!("\n    🎉  Finished in {}ms", start.elapsed().as_millis());

        Ok(())
    }
}
