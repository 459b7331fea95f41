use serde::Serialize;

use std::{fs::File, path::Path};

use serde_json::to_string_pretty;

use std::io::{Error, Write};

use crate::pyramid::TilePyramid;

pub const TILE_JSON_FILE_NAME: &str = "tile.json";

#[derive(Debug, Serialize)]
pub struct TileJSON {
    #[serde(rename = "tilejson")]
    pub tile_json: String,
    pub name: String,
    pub description: String,
    pub scheme: String,
    pub tiles: Vec<String>,
    #[serde(rename = "minzoom")]
    pub min_zoom: u8,
    #[serde(rename = "maxzoom")]
    pub max_zoom: u8,
}

impl TileJSON {
    pub fn new(name: &str, pyramid: &TilePyramid, url_template: &str) -> Self {
        TileJSON {
            tile_json: String::from("2.2.0"),
            name: name.to_string(),
            description: format!(
                "{} Tiles of a {}x{} image, {}px per tile, pixel space not geo-referenced",
                name,
                pyramid.width(),
                pyramid.height(),
                pyramid.tile_size()
            ),
            scheme: String::from("xyz"),
            tiles: vec![url_template.to_string()],
            min_zoom: 0,
            max_zoom: pyramid.max_zoom(),
        }
    }
}

pub fn write(dir: &Path, name: &str, pyramid: &TilePyramid, url_template: &str) -> Result<(), Error> {
    let tile_json = TileJSON::new(name, pyramid, url_template);

    let mut file = File::create(dir.join(TILE_JSON_FILE_NAME))?;
    let json = to_string_pretty(&tile_json)?;

    file.write_all(json.as_bytes())
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use serde_json::Value;

    use super::{write, TILE_JSON_FILE_NAME};
    use crate::pyramid::{generate, GeneratorConfig};
    use crate::test::with_input_and_output_paths;

    #[test]
    fn writes_xyz_tile_json() {
        with_input_and_output_paths(|_, output_path| {
            let config = GeneratorConfig {
                tile_size: 4,
                ..GeneratorConfig::default()
            };
            let pyramid = generate(RgbaImage::from_pixel(8, 6, Rgba([0, 0, 0, 255])), config, |_| {}).unwrap();

            write(&output_path, "map", &pyramid, "tiles/{z}/{x}/{y}.png").unwrap();

            let text = std::fs::read_to_string(output_path.join(TILE_JSON_FILE_NAME)).unwrap();
            let json: Value = serde_json::from_str(&text).unwrap();
            assert_eq!("2.2.0", json["tilejson"]);
            assert_eq!("xyz", json["scheme"]);
            assert_eq!(0, json["minzoom"]);
            assert_eq!(1, json["maxzoom"]);
            assert_eq!("tiles/{z}/{x}/{y}.png", json["tiles"][0]);
            assert_eq!("map Tiles of a 8x6 image, 4px per tile, pixel space not geo-referenced", json["description"]);
            for key in ["min_zoom", "max_zoom", "tile_json", "bounds", "tilesize"] {
                assert!(json.get(key).is_none(), "unexpected key {}", key);
            }
        })
        .unwrap();
    }
}
