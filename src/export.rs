use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::{Error, ErrorKind, Write};
use std::path::{Path, PathBuf};

use rayon::iter::{IntoParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::pyramid::{TileAddress, TilePyramid};
use crate::utils::TileError;

pub const STRUCTURE_FILE_NAME: &str = "tile_structure.txt";

/// How tile files are named on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileLayout {
    /// `tiles/{z}/{x}/{y}.{ext}`, the layout map viewers request.
    Nested,
    /// `tile_{z}_{x}_{y}.{ext}`, all tiles in one directory.
    Flat,
}

impl Default for TileLayout {
    fn default() -> Self {
        TileLayout::Nested
    }
}

impl TileLayout {
    pub fn url_template(&self, extension: &str) -> String {
        match self {
            TileLayout::Nested => format!("tiles/{{z}}/{{x}}/{{y}}.{}", extension),
            TileLayout::Flat => format!("tile_{{z}}_{{x}}_{{y}}.{}", extension),
        }
    }

    pub fn path(&self, address: TileAddress, extension: &str) -> String {
        self.url_template(extension)
            .replace("{z}", &address.zoom.to_string())
            .replace("{x}", &address.x.to_string())
            .replace("{y}", &address.y.to_string())
    }
}

#[derive(Debug)]
pub struct TileFile<'a> {
    pub address: TileAddress,
    pub path: String,
    pub data: &'a [u8],
}

/// Every tile of `pyramid` paired with its relative file path, in generation order.
pub fn tile_files(pyramid: &TilePyramid, layout: TileLayout) -> Vec<TileFile<'_>> {
    pyramid
        .tiles()
        .iter()
        .map(|tile| TileFile {
            address: tile.address(),
            path: layout.path(tile.address(), pyramid.file_extension()),
            data: tile.data(),
        })
        .collect()
}

/// Writes all tiles below `base_path`, creating directories as needed.
pub fn write_tiles(
    base_path: &Path,
    pyramid: &TilePyramid,
    layout: TileLayout,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = tile_files(pyramid, layout);

    let mut dirs: Vec<PathBuf> = files
        .iter()
        .filter_map(|f| base_path.join(&f.path).parent().map(Path::to_path_buf))
        .collect();
    dirs.sort();
    dirs.dedup();

    dirs.into_par_iter()
        .map(|dir| create_dir_all(&dir))
        .collect::<Result<Vec<_>, _>>()?;

    let results: Vec<_> = files
        .par_iter()
        .map(|file| -> Result<(), TileError> {
            write_file(&base_path.join(&file.path), file.data)
                .map_err(|e| TileError::new(file.address, e))
        })
        .collect();

    let errors: Vec<_> = results.into_iter().filter_map(Result::err).collect();

    if !errors.is_empty() {
        let mut error_string: Vec<String> = errors
            .iter()
            .take(10)
            .map(|e| -> String { format!("\t{}", e) })
            .collect();

        if errors.len() > 10 {
            error_string.push(format!("\t... and {} more Tiles", errors.len() - 10))
        }

        return Err(Box::new(Error::new(
            ErrorKind::Other,
            format!(
                "Failed to write (multiple) tile(s):\n{}",
                error_string.join("\n")
            ),
        )));
    }

    Ok(())
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), Error> {
    let mut file = File::create(path)?;
    file.write_all(data)
}

/// Human readable folder structure plus a matching Leaflet tile layer snippet.
pub fn describe(pyramid: &TilePyramid, layout: TileLayout) -> String {
    let extension = pyramid.file_extension();
    let mut out = format!("Tiles Generated: {}\n\nFolder Structure:\n", pyramid.len());

    match layout {
        TileLayout::Nested => {
            out.push_str("tiles/\n");
            for zoom in 0..=pyramid.max_zoom() {
                out.push_str(&format!("  {}/\n", zoom));

                let mut columns: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
                for tile in pyramid.level(zoom).unwrap_or_default() {
                    columns.entry(tile.address().x).or_default().push(tile.address().y);
                }
                for (x, rows) in columns {
                    out.push_str(&format!("    {}/\n", x));
                    for y in rows {
                        out.push_str(&format!("      {}.{}\n", y, extension));
                    }
                }
            }
        }
        TileLayout::Flat => {
            for tile in pyramid.tiles() {
                out.push_str(&format!("  {}\n", layout.path(tile.address(), extension)));
            }
        }
    }

    out.push_str(&format!(
        "\nLeaflet Configuration:\n\
         L.tileLayer('{}', {{\n  \
         minZoom: 0,\n  \
         maxZoom: {},\n  \
         noWrap: true,\n  \
         bounds: [[0, 0], [{}, {}]]\n\
         }}).addTo(map);\n",
        layout.url_template(extension),
        pyramid.max_zoom(),
        pyramid.height(),
        pyramid.width()
    ));

    out
}

pub fn write_description(dir: &Path, pyramid: &TilePyramid, layout: TileLayout) -> Result<(), Error> {
    let mut file = File::create(dir.join(STRUCTURE_FILE_NAME))?;
    file.write_all(describe(pyramid, layout).as_bytes())
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::{describe, tile_files, write_description, write_tiles, TileLayout, STRUCTURE_FILE_NAME};
    use crate::pyramid::{generate, GeneratorConfig, TileAddress, TilePyramid};
    use crate::test::with_input_and_output_paths;

    fn pyramid(width: u32, height: u32) -> TilePyramid {
        let config = GeneratorConfig {
            tile_size: 4,
            ..GeneratorConfig::default()
        };
        generate(RgbaImage::from_pixel(width, height, Rgba([9, 9, 9, 255])), config, |_| {}).unwrap()
    }

    #[test]
    fn layouts_fill_path_template() {
        let address = TileAddress::new(3, 5, 7);
        assert_eq!("tiles/3/5/7.png", TileLayout::Nested.path(address, "png"));
        assert_eq!("tile_3_5_7.webp", TileLayout::Flat.path(address, "webp"));
        assert_eq!("tile_{z}_{x}_{y}.png", TileLayout::Flat.url_template("png"));
    }

    #[test]
    fn tile_files_enumerates_every_tile_in_order() {
        let pyramid = pyramid(8, 8);

        let paths: Vec<_> = tile_files(&pyramid, TileLayout::default())
            .into_iter()
            .map(|f| f.path)
            .collect();

        assert_eq!(
            vec![
                "tiles/0/0/0.png",
                "tiles/1/0/0.png",
                "tiles/1/1/0.png",
                "tiles/1/0/1.png",
                "tiles/1/1/1.png",
            ],
            paths
        );
    }

    #[test]
    fn describe_lists_structure_and_leaflet_config() {
        let text = describe(&pyramid(8, 6), TileLayout::Nested);

        assert!(text.starts_with("Tiles Generated: 5\n"));
        assert!(text.contains("tiles/\n  0/\n    0/\n      0.png\n  1/\n    0/\n      0.png\n      1.png\n    1/\n"));
        assert!(text.contains("L.tileLayer('tiles/{z}/{x}/{y}.png', {"));
        assert!(text.contains("  minZoom: 0,\n  maxZoom: 1,\n  noWrap: true,\n"));
        assert!(text.contains("  bounds: [[0, 0], [6, 8]]\n}).addTo(map);"));
    }

    #[test]
    fn describe_flat_layout_lists_files() {
        let text = describe(&pyramid(4, 4), TileLayout::Flat);

        assert!(text.contains("Folder Structure:\n  tile_0_0_0.png\n"));
        assert!(text.contains("L.tileLayer('tile_{z}_{x}_{y}.png', {"));
        assert!(!text.contains("tiles/{z}"));
    }

    #[test]
    fn write_tiles_creates_nested_files() {
        with_input_and_output_paths(|_, output_path| {
            let pyramid = pyramid(8, 8);

            write_tiles(&output_path, &pyramid, TileLayout::Nested).unwrap();
            write_description(&output_path, &pyramid, TileLayout::Nested).unwrap();

            for tile in pyramid.tiles() {
                let path = output_path.join(TileLayout::Nested.path(tile.address(), "png"));
                assert_eq!(tile.data(), std::fs::read(path).unwrap().as_slice());
            }
            assert!(output_path.join(STRUCTURE_FILE_NAME).is_file());
        })
        .unwrap();
    }

    #[test]
    fn write_tiles_reports_failed_tiles() {
        with_input_and_output_paths(|_, output_path| {
            let pyramid = pyramid(4, 4);
            std::fs::create_dir_all(output_path.join("tiles/0/0/0.png")).unwrap();

            let err = write_tiles(&output_path, &pyramid, TileLayout::Nested).unwrap_err();

            assert!(err.to_string().contains("Tile 0/0/0"));
        })
        .unwrap();
    }
}
