use anyhow::{bail, Context};
use clap::{arg, App, Arg};
use image::Rgba;
use std::path::{Path, PathBuf};

use crate::commands::{TileCommand, TileOptions};
use crate::export::TileLayout;
use crate::pyramid::GeneratorConfig;


pub struct ClapCommand {
    pub identifier: String,
    pub exec: Box<dyn TileCommand>,
}

impl ClapCommand {
    pub fn new(identifier: &str, exec: Box<dyn TileCommand>) -> Self {
        ClapCommand { identifier: identifier.to_string(), exec }
    }

    pub fn register(&self) -> App<'static> {
        let app = App::new(&self.identifier)
            .about(self.exec.get_description());

        app
            .arg(arg!(-i --input <INPUT_IMAGE> "Path to the source image"))
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("OUTPUT_DIR")
                    .takes_value(true)
                    .required(self.exec.requires_output())
                    .help("Path to output directory"),
            )
            .arg(
                Arg::new("tile-size")
                    .long("tile-size")
                    .value_name("PX")
                    .takes_value(true)
                    .default_value("256")
                    .help("Edge length of every tile in px"),
            )
            .arg(
                Arg::new("background")
                    .long("background")
                    .value_name("COLOR")
                    .takes_value(true)
                    .default_value("#ffffff")
                    .help("Hex color for transparent and uncovered areas"),
            )
            .arg(arg!(--flat "Write all tiles into one directory as tile_{z}_{x}_{y}.png"))
    }

    pub fn run(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
        let (input_path, output_path) = self.get_in_out_path_params(args);

        if !input_path.is_file() {
            bail!("Input path is not a file");
        }

        if self.exec.requires_output() {
            match &output_path {
                Some(path) if path.is_dir() => {}
                _ => bail!("Output path is not a directory"),
            }
        }

        let options = self.get_options(args)?;

        self.exec.exec(&input_path, output_path.as_deref(), &options)
    }

    fn get_in_out_path_params(&self, args: &clap::ArgMatches) -> (PathBuf, Option<PathBuf>) {
        let input_path_str = args.value_of("input").unwrap_or_default();
        let output_path = args.value_of("output").map(|s| Path::new(s).to_path_buf());

        (Path::new(input_path_str).to_path_buf(), output_path)
    }

    fn get_options(&self, args: &clap::ArgMatches) -> anyhow::Result<TileOptions> {
        let tile_size_str = args.value_of("tile-size").unwrap_or_default();
        let tile_size = match tile_size_str.parse::<u32>() {
            Ok(size) if size > 0 => size,
            _ => bail!("Tile size must be a positive integer, got '{}'", tile_size_str),
        };

        let background_str = args.value_of("background").unwrap_or("#ffffff");
        let background = parse_color(background_str)
            .with_context(|| format!("Invalid background color '{}'", background_str))?;

        let layout = if args.is_present("flat") {
            TileLayout::Flat
        } else {
            TileLayout::Nested
        };

        Ok(TileOptions {
            config: GeneratorConfig { tile_size, background },
            layout,
        })
    }
}

/// Parses `#rgb` or `#rrggbb` (the `#` is optional) into an opaque color.
pub fn parse_color(input: &str) -> Option<Rgba<u8>> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    let [r, g, b] = match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                rgb[i] = channel(&c.to_string())? * 17;
            }
            rgb
        }
        6 => [channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?],
        _ => return None,
    };

    Some(Rgba([r, g, b, 255]))
}
