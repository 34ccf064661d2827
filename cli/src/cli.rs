use std::path::PathBuf;

/// Lake shoreline ring reconstruction CLI
#[derive(clap::Parser, Debug)]
#[command(name = "lakeshore", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Stitch a shoreline layer into closed rings and write boundary + polygon GeoJSON
    Stitch(StitchArgs),

    /// Report fragment counts for a shoreline layer without writing anything
    Inspect(InspectArgs),
}

/// Flags shared by every command that classifies fragments.
#[derive(clap::Args, Debug)]
pub struct StitchOptions {
    /// Start/end gap (degrees) below which a fragment counts as already closed [default: 0.0003]
    #[arg(long)]
    pub closure_threshold: Option<f64>,

    /// Minimum coordinates for a fragment to be kept and for a ring to become a polygon [default: 4]
    #[arg(long)]
    pub min_coords: Option<usize>,

    /// Source CRS as a PROJ.4 string, overriding the .prj file
    #[arg(long)]
    pub src_proj: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct StitchArgs {
    /// Input shoreline layer (.shp or .geojson)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output root directory, defaults to "./geojson"
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Output file name (without extension), defaults to the input file stem
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite existing output files
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub options: StitchOptions,
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Input shoreline layer (.shp or .geojson)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub options: StitchOptions,
}
