use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use geo::{BoundingRect, LineString, MultiLineString};
use ringstitch::{classify, stitch_shoreline, Fragment, Shoreline, StitchConfig};
use serde::Serialize;

use crate::common;
use crate::geom::{Reprojector, SourceCrs};

/// All fragments of one input file, in EPSG:4326.
#[derive(Debug, Clone)]
pub struct ShorelineLayer {
    name: String,
    fragments: Vec<Fragment>,
}

/// Fragment statistics for a layer, as printed by `inspect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSummary {
    pub name: String,
    pub fragments: usize,
    pub coordinates: usize,
    pub discarded: usize,
    pub self_closed: usize,
    pub open: usize,
    /// `[min_lon, min_lat, max_lon, max_lat]`
    pub bounds: Option<[f64; 4]>,
}

/// Paths written by [`write_shoreline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorelinePaths {
    pub boundary: PathBuf,
    pub polygons: PathBuf,
}

impl ShorelineLayer {
    pub fn new(name: impl Into<String>, fragments: Vec<Fragment>) -> Self {
        Self { name: name.into(), fragments }
    }

    /// Read a layer from a `.shp` or `.geojson`/`.json` file and reproject it to EPSG:4326.
    ///
    /// `src_crs` overrides CRS detection. Without it, shapefiles use their `.prj`
    /// (WGS84 if absent) and GeoJSON is taken as WGS84.
    pub fn from_path(path: &Path, src_crs: Option<SourceCrs>, verbose: u8) -> Result<Self> {
        common::require_file_exists(path)?;

        let name = path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .with_context(|| format!("Cannot derive a layer name from {}", path.display()))?;

        let extension = path.extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        let (fragments, detected) = match extension.as_str() {
            "shp" => {
                let fragments = common::read_shapefile_fragments(path)?;
                let detected = match &src_crs {
                    Some(_) => None,
                    None => SourceCrs::from_prj_file(path)?,
                };
                if src_crs.is_none() && detected.is_none() && verbose > 0 {
                    eprintln!("[proj] no .prj next to {}, assuming WGS84", path.display());
                }
                (fragments, detected)
            }
            "geojson" | "json" => (common::read_geojson_fragments(path)?, None),
            other => bail!("unsupported input type {:?} (expected .shp or .geojson): {}", other, path.display()),
        };

        if verbose > 0 {
            eprintln!("[read] {} -> {} fragments", path.display(), fragments.len());
        }

        let crs = src_crs.or(detected).unwrap_or_default();
        let reprojector = Reprojector::new(&crs)?;
        if verbose > 0 && !reprojector.is_identity() {
            eprintln!("[proj] {:?} -> EPSG:4326", crs);
        }
        let fragments = reprojector.reproject(fragments)
            .with_context(|| format!("Failed to reproject {}", path.display()))?;

        Ok(Self::new(name, fragments))
    }

    #[inline] pub fn name(&self) -> &str { &self.name }

    #[inline] pub fn fragments(&self) -> &[Fragment] { &self.fragments }

    /// Run the ring stitching pipeline over this layer.
    pub fn stitch(&self, config: &StitchConfig, verbose: u8) -> Result<Shoreline> {
        let shoreline = stitch_shoreline(self.fragments.clone(), config)
            .with_context(|| format!("Failed to stitch layer {}", self.name))?;

        if verbose > 0 {
            let stats = &shoreline.stats;
            eprintln!(
                "[stitch] {}: {} fragments ({} discarded, {} self-closed, {} open) -> {} rings, {} polygons",
                self.name, stats.input_fragments, stats.discarded, stats.self_closed, stats.open,
                shoreline.boundary.0.len(), stats.polygons,
            );
        }
        if verbose > 1 && shoreline.stats.stitched_coords > 0 {
            eprintln!("[stitch] {}: stitched ring has {} coordinates", self.name, shoreline.stats.stitched_coords);
        }

        Ok(shoreline)
    }

    /// Classify the layer without stitching and report counts and extent.
    pub fn summary(&self, config: &StitchConfig) -> LayerSummary {
        let classified = classify(self.fragments.clone(), config);

        let lines = MultiLineString::new(self.fragments.iter().cloned().map(LineString::new).collect());
        let bounds = lines.bounding_rect()
            .map(|rect| [rect.min().x, rect.min().y, rect.max().x, rect.max().y]);

        LayerSummary {
            name: self.name.clone(),
            fragments: self.fragments.len(),
            coordinates: self.fragments.iter().map(Vec::len).sum(),
            discarded: classified.discarded,
            self_closed: classified.self_closed.len(),
            open: classified.open.len(),
            bounds,
        }
    }
}

/// Write `<out_dir>/multi_line_string/<name>.geojson` and `<out_dir>/polygon/<name>.geojson`.
///
/// Neither file is touched unless both can be written in full.
pub fn write_shoreline(shoreline: &Shoreline, out_dir: &Path, name: &str, force: bool, verbose: u8) -> Result<ShorelinePaths> {
    let file_name = format!("{name}.geojson");
    let paths = ShorelinePaths {
        boundary: out_dir.join("multi_line_string").join(&file_name),
        polygons: out_dir.join("polygon").join(&file_name),
    };

    let boundary = serde_json::to_vec(&common::boundary_to_geojson(&shoreline.boundary))
        .context("Failed to serialize boundary GeoJSON")?;
    let polygons = serde_json::to_vec(&common::polygons_to_geojson(&shoreline.polygons))
        .context("Failed to serialize polygon GeoJSON")?;

    let files = [
        (paths.boundary.as_path(), boundary.as_slice()),
        (paths.polygons.as_path(), polygons.as_slice()),
    ];
    common::write_all_atomic(&files, force)?;
    if verbose > 0 {
        eprintln!("[write] {}", paths.boundary.display());
        eprintln!("[write] {}", paths.polygons.display());
    }

    Ok(paths)
}
