use anyhow::{Context, Result};
use lakeshore::ShorelineLayer;

use super::{source_crs, stitch_config};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::InspectArgs) -> Result<()> {
    let config = stitch_config(&args.options);
    let layer = ShorelineLayer::from_path(&args.input, source_crs(&args.options), cli.verbose)?;
    let summary = layer.summary(&config);

    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{json}");
        return Ok(());
    }

    println!("Layer: {}", summary.name);
    println!("Fragments: {} ({} coordinates)", summary.fragments, summary.coordinates);
    println!("  - discarded (< {} coords): {}", config.min_fragment_coords, summary.discarded);
    println!("  - self-closed (gap < {}): {}", config.closure_threshold, summary.self_closed);
    println!("  - open: {}", summary.open);
    match summary.bounds {
        Some([min_lon, min_lat, max_lon, max_lat]) => {
            println!("Bounds: [{min_lon}, {min_lat}] - [{max_lon}, {max_lat}]");
        }
        None => println!("Bounds: (empty)"),
    }

    Ok(())
}
