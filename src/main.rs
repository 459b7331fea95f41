use clap::{app_from_crate, AppSettings};
use crate::commands::{ClapCommand, Info, Tiles};


mod commands;
mod error;
mod export;
mod pyramid;
mod render;
mod source;
mod tilejson;
mod utils;

#[cfg(test)]
mod test;

fn main() {
    let args: Vec<_> = std::env::args().collect();

    if let Err(e) = execute(&args) {
        println!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(input: &[String]) -> anyhow::Result<()> {
    let commands: Vec<ClapCommand> = vec![
        ClapCommand::new("tiles", Box::new(Tiles {})),
        ClapCommand::new("info", Box::new(Info {})),
        // Add commands here
    ];

    let mut app = app_from_crate!()
        .global_setting(AppSettings::PropagateVersion)
        .global_setting(AppSettings::UseLongFormatForHelpSubcommand)
        .setting(AppSettings::SubcommandRequiredElseHelp);

    app = commands.iter().fold(app, |a, c| a.subcommand(c.register()));

    let matches = app.get_matches_from(input);

    match matches.subcommand() {
        Some((name, sub_matches)) => match commands.iter().find(|c| c.identifier == name) {
            Some(command) => command.run(sub_matches),
            _ => unreachable!(),
        },
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::execute;
    use crate::test::with_input_and_output_paths;
    use image::{Rgba, RgbaImage};

    #[test]
    fn execute_runs_tiles_subcommand() {
        with_input_and_output_paths(|input_path, output_path| {
            let img_path = input_path.join("map.png");
            RgbaImage::from_pixel(20, 20, Rgba([1, 2, 3, 255])).save(&img_path).unwrap();

            let args: Vec<String> = vec![
                "raster-tiler".to_string(),
                "tiles".to_string(),
                "-i".to_string(),
                img_path.to_str().unwrap_or("").to_string(),
                "-o".to_string(),
                output_path.to_str().unwrap_or("").to_string(),
                "--tile-size".to_string(),
                "10".to_string(),
            ];

            assert!(execute(&args).is_ok());
            assert!(output_path.join("tiles/1/1/1.png").is_file());
        })
        .unwrap();
    }
}
