use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiLineString, Polygon};
use ringstitch::Fragment;
use serde_json::{json, Value};

/// Convert a ring's coordinates to GeoJSON positions.
fn positions(ring: &LineString<f64>) -> Vec<[f64; 2]> {
    ring.coords().map(|c| [c.x, c.y]).collect()
}

/// Boundary FeatureCollection: one feature holding every ring as a MultiLineString.
pub fn boundary_to_geojson(boundary: &MultiLineString<f64>) -> Value {
    let lines: Vec<Vec<[f64; 2]>> = boundary.0.iter().map(positions).collect();

    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "ID": 1 },
            "geometry": {
                "type": "MultiLineString",
                "coordinates": lines,
            },
        }],
    })
}

/// Polygon FeatureCollection: one feature per polygon, exterior ring only.
pub fn polygons_to_geojson(polygons: &[Polygon<f64>]) -> Value {
    let features: Vec<Value> = polygons.iter().map(|polygon| json!({
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "Polygon",
            "coordinates": [positions(polygon.exterior())],
        },
    })).collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Read line fragments from a GeoJSON file.
pub fn read_geojson_fragments(path: &Path) -> Result<Vec<Fragment>> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read GeoJSON file: {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse GeoJSON: {}", path.display()))?;
    fragments_from_geojson(&value)
        .with_context(|| format!("Invalid GeoJSON geometry in {}", path.display()))
}

/// Collect fragments from a FeatureCollection, a Feature, or a bare geometry.
///
/// LineStrings give one fragment, MultiLineStrings one per line, and polygon
/// types one per ring. Null geometries are skipped.
pub fn fragments_from_geojson(value: &Value) -> Result<Vec<Fragment>> {
    let mut fragments = Vec::new();
    match value["type"].as_str() {
        Some("FeatureCollection") => {
            let features = value["features"].as_array()
                .ok_or_else(|| anyhow!("FeatureCollection is missing a features array"))?;
            for (idx, feature) in features.iter().enumerate() {
                geometry_to_fragments(&feature["geometry"], &mut fragments)
                    .with_context(|| format!("feature {idx}"))?;
            }
        }
        Some("Feature") => geometry_to_fragments(&value["geometry"], &mut fragments)?,
        Some(_) => geometry_to_fragments(value, &mut fragments)?,
        None => bail!("GeoJSON object has no type"),
    }
    Ok(fragments)
}

fn geometry_to_fragments(geometry: &Value, out: &mut Vec<Fragment>) -> Result<()> {
    if geometry.is_null() {
        return Ok(());
    }
    let coords = &geometry["coordinates"];

    match geometry["type"].as_str() {
        Some("LineString") => out.push(parse_line(coords)?),
        Some("MultiLineString") | Some("Polygon") => {
            for line in as_array(coords)? {
                out.push(parse_line(line)?);
            }
        }
        Some("MultiPolygon") => {
            for polygon in as_array(coords)? {
                for ring in as_array(polygon)? {
                    out.push(parse_line(ring)?);
                }
            }
        }
        Some("GeometryCollection") => {
            for member in as_array(&geometry["geometries"])? {
                geometry_to_fragments(member, out)?;
            }
        }
        Some(other) => bail!("found non-line geometry in shoreline layer: {other}"),
        None => bail!("geometry has no type"),
    }
    Ok(())
}

fn as_array(value: &Value) -> Result<&Vec<Value>> {
    value.as_array().ok_or_else(|| anyhow!("expected an array, found {value}"))
}

/// Parse `[[x, y], [x, y], ...]`; extra dimensions are ignored.
fn parse_line(value: &Value) -> Result<Fragment> {
    as_array(value)?.iter()
        .map(|position| {
            let position = as_array(position)?;
            let x = position.first().and_then(Value::as_f64)
                .ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
            let y = position.get(1).and_then(Value::as_f64)
                .ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
            Ok(Coord { x, y })
        })
        .collect()
}
