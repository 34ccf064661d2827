mod geojson;
mod shp;

pub use geojson::*;
pub use shp::*;
