use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Packs images and glyph rectangles into texture atlases")]
pub struct Options {
    #[structopt(flatten)]
    pub global: GlobalOptions,

    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub struct GlobalOptions {
    /// Overrides the maximum atlas width from the config or layout file.
    #[structopt(long, global = true)]
    pub max_width: Option<u32>,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack the images described by an atlaspack.toml file into an atlas
    /// image, along with a JSON manifest describing where each image landed.
    Pack(PackOptions),

    /// Pack a list of plain rectangles from a layout file and print where each
    /// one landed, without touching any images.
    Plan(PlanOptions),
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// The path to an atlaspack.toml file, or a folder containing one.
    /// Defaults to the current working directory.
    pub config_path: Option<PathBuf>,

    /// Write the atlas even if the manifest says it hasn't changed.
    #[structopt(long)]
    pub force: bool,
}

#[derive(Debug, StructOpt)]
pub struct PlanOptions {
    /// The path to a TOML file listing the rectangles to pack.
    pub layout_path: PathBuf,

    /// Where to write the resulting JSON. Defaults to stdout.
    #[structopt(long)]
    pub output: Option<PathBuf>,
}
