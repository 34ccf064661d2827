use anyhow::Result;
use lakeshore::{write_shoreline, ShorelineLayer};

use super::{source_crs, stitch_config};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::StitchArgs) -> Result<()> {
    let out_dir = &args.output.clone().unwrap_or("./geojson".into());
    let config = stitch_config(&args.options);

    let layer = ShorelineLayer::from_path(&args.input, source_crs(&args.options), cli.verbose)?;
    let name = args.name.clone().unwrap_or_else(|| layer.name().to_string());

    let shoreline = layer.stitch(&config, cli.verbose)?;
    let paths = write_shoreline(&shoreline, out_dir, &name, args.force, cli.verbose)?;

    println!(
        "{}: {} rings, {} polygons -> {}, {}",
        name,
        shoreline.boundary.0.len(),
        shoreline.polygons.len(),
        paths.boundary.display(),
        paths.polygons.display(),
    );

    Ok(())
}
