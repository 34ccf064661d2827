use std::path::Path;

use anyhow::{bail, Context, Result};
use geo::Coord;
use ringstitch::Fragment;
use shapefile::{Shape, ShapeReader};

/// Read every line part of a `.shp` file as a fragment, in file order.
///
/// Only geometry is read, so the `.dbf` sidecar is optional. Each part of a
/// polyline becomes one fragment; polygon rings are accepted too, one fragment
/// per ring. Null shapes are skipped.
pub fn read_shapefile_fragments(path: &Path) -> Result<Vec<Fragment>> {
    let reader = ShapeReader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;
    let shapes = reader.read()
        .with_context(|| format!("Error reading shapes from {}", path.display()))?;

    let mut fragments = Vec::with_capacity(shapes.len());
    for (idx, shape) in shapes.into_iter().enumerate() {
        shape_to_fragments(shape, &mut fragments)
            .with_context(|| format!("record {idx} in {}", path.display()))?;
    }
    Ok(fragments)
}

/// Append the fragments of one shape record to `out`.
fn shape_to_fragments(shape: Shape, out: &mut Vec<Fragment>) -> Result<()> {
    #[inline] fn coord(x: f64, y: f64) -> Coord<f64> { Coord { x, y } }

    match shape {
        Shape::NullShape => {}
        Shape::Polyline(line) => out.extend(
            line.parts().iter().map(|part| part.iter().map(|p| coord(p.x, p.y)).collect::<Fragment>())
        ),
        Shape::PolylineM(line) => out.extend(
            line.parts().iter().map(|part| part.iter().map(|p| coord(p.x, p.y)).collect::<Fragment>())
        ),
        Shape::PolylineZ(line) => out.extend(
            line.parts().iter().map(|part| part.iter().map(|p| coord(p.x, p.y)).collect::<Fragment>())
        ),
        Shape::Polygon(polygon) => out.extend(
            polygon.rings().iter().map(|ring| ring.points().iter().map(|p| coord(p.x, p.y)).collect::<Fragment>())
        ),
        Shape::PolygonM(polygon) => out.extend(
            polygon.rings().iter().map(|ring| ring.points().iter().map(|p| coord(p.x, p.y)).collect::<Fragment>())
        ),
        Shape::PolygonZ(polygon) => out.extend(
            polygon.rings().iter().map(|ring| ring.points().iter().map(|p| coord(p.x, p.y)).collect::<Fragment>())
        ),
        other => bail!("found non-line shape in shoreline layer: {:?}", other.shapetype()),
    }
    Ok(())
}
