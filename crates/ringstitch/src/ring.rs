use geo::{Coord, LineString, MultiLineString, Polygon};

use crate::{Fragment, StitchConfig};

/// Combine the stitched ring (if any) with the self-closed fragments.
///
/// The stitched ring comes first, followed by self-closed fragments in discovery
/// order. Self-closed coordinates are used verbatim; they are not re-closed.
pub fn assemble_rings(stitched: Option<LineString<f64>>, self_closed: Vec<Fragment>) -> MultiLineString<f64> {
    let rings = stitched.into_iter()
        .chain(self_closed.into_iter().map(LineString::new))
        .collect();
    MultiLineString::new(rings)
}

/// True when a ring has at least `min_coords` coordinates and its first and
/// last coordinates are identical.
pub fn is_closed_ring(ring: &[Coord<f64>], min_coords: usize) -> bool {
    !ring.is_empty() && ring.len() >= min_coords && ring.first() == ring.last()
}

/// Build one single-exterior polygon per qualifying ring, preserving order.
/// Rings that fail [`is_closed_ring`] are skipped.
pub fn derive_polygons(boundary: &MultiLineString<f64>, config: &StitchConfig) -> Vec<Polygon<f64>> {
    boundary.0.iter()
        .filter(|ring| is_closed_ring(&ring.0, config.min_ring_coords))
        .map(|ring| Polygon::new(ring.clone(), vec![]))
        .collect()
}
