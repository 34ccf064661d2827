pub mod inspect;
pub mod stitch;

use lakeshore::{SourceCrs, StitchConfig};

use crate::cli::StitchOptions;

/// Build the pipeline configuration from shared flags, keeping defaults for unset ones.
pub(crate) fn stitch_config(options: &StitchOptions) -> StitchConfig {
    let mut config = StitchConfig::default();
    if let Some(threshold) = options.closure_threshold {
        config = config.with_closure_threshold(threshold);
    }
    if let Some(min_coords) = options.min_coords {
        config = config.with_min_fragment_coords(min_coords).with_min_ring_coords(min_coords);
    }
    config
}

/// Explicit source CRS, if one was given.
pub(crate) fn source_crs(options: &StitchOptions) -> Option<SourceCrs> {
    options.src_proj.clone().map(SourceCrs::Proj4)
}
