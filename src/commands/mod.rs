mod clap_command;
mod info;
mod tiles;

use std::path::Path;

use crate::export::TileLayout;
use crate::pyramid::GeneratorConfig;

pub use clap_command::ClapCommand;
pub use info::Info;
pub use tiles::Tiles;

/// Settings collected from the command line, shared by all commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileOptions {
    pub config: GeneratorConfig,
    pub layout: TileLayout,
}

pub trait TileCommand {
    fn get_description(&self) -> &'static str;

    fn requires_output(&self) -> bool {
        true
    }

    fn exec(
        &self,
        input_path: &Path,
        output_path: Option<&Path>,
        options: &TileOptions,
    ) -> anyhow::Result<()>;
}

#[cfg(test)]
pub struct DummyTileCommand {}

#[cfg(test)]
impl TileCommand for DummyTileCommand {
    fn get_description(&self) -> &'static str {
        "dummy"
    }

    fn exec(&self, _: &Path, _: Option<&Path>, _: &TileOptions) -> anyhow::Result<()> {
        Ok(())
    }
}
