use geo::{MultiLineString, Polygon};

use crate::{assemble_rings, classify, close_chain, derive_polygons, stitch_open, Fragment, StitchConfig, StitchError};

/// Counts collected while running the pipeline on one layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StitchStats {
    pub input_fragments: usize,
    pub discarded: usize,
    pub self_closed: usize,
    pub open: usize,
    /// Coordinates in the stitched ring, closing coordinate included. Zero if nothing was stitched.
    pub stitched_coords: usize,
    pub polygons: usize,
}

/// Reconstructed shoreline for one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Shoreline {
    /// Stitched ring first (if any), then self-closed rings.
    pub boundary: MultiLineString<f64>,
    /// Polygons for every ring in `boundary` that is closed and long enough.
    pub polygons: Vec<Polygon<f64>>,
    pub stats: StitchStats,
}

/// Run classify, stitch, close, assemble and derive on one layer's fragments.
pub fn stitch_shoreline(fragments: Vec<Fragment>, config: &StitchConfig) -> Result<Shoreline, StitchError> {
    let input_fragments = fragments.len();
    let classified = classify(fragments, config);

    let mut stats = StitchStats {
        input_fragments,
        discarded: classified.discarded,
        self_closed: classified.self_closed.len(),
        open: classified.open.len(),
        ..Default::default()
    };

    let stitched = close_chain(stitch_open(classified.open)?);
    stats.stitched_coords = stitched.as_ref().map_or(0, |ring| ring.0.len());

    let boundary = assemble_rings(stitched, classified.self_closed);
    let polygons = derive_polygons(&boundary, config);
    stats.polygons = polygons.len();

    Ok(Shoreline { boundary, polygons, stats })
}
