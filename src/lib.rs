#![doc = "Lakeshore public API"]
mod common;
mod geom;
mod layer;

#[doc(inline)]
pub use layer::{write_shoreline, LayerSummary, ShorelineLayer, ShorelinePaths};

#[doc(inline)]
pub use geom::{Datum, Reprojector, SourceCrs};

#[doc(inline)]
pub use common::{
    boundary_to_geojson, fragments_from_geojson, polygons_to_geojson,
    read_geojson_fragments, read_shapefile_fragments,
};

#[doc(inline)]
pub use ringstitch::{Fragment, Shoreline, StitchConfig, StitchStats};
