use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use geo::Coord;
use proj4rs::{proj::Proj as Proj4, transform::transform};
use regex::Regex;
use ringstitch::Fragment;

/// PROJ.4 string for the output CRS (EPSG:4326).
const WGS84_PROJ4: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

/// Japan Plane Rectangular CS origins, zones I..XIX: (lat_0, lon_0 degrees, lon_0 minutes).
const JPR_ORIGINS: [(f64, f64, f64); 19] = [
    (33.0, 129.0, 30.0),
    (33.0, 131.0, 0.0),
    (36.0, 132.0, 10.0),
    (33.0, 133.0, 30.0),
    (36.0, 134.0, 20.0),
    (36.0, 136.0, 0.0),
    (36.0, 137.0, 10.0),
    (36.0, 138.0, 30.0),
    (36.0, 139.0, 50.0),
    (40.0, 140.0, 50.0),
    (44.0, 140.0, 15.0),
    (44.0, 142.0, 15.0),
    (44.0, 144.0, 15.0),
    (26.0, 142.0, 0.0),
    (26.0, 127.0, 30.0),
    (26.0, 124.0, 0.0),
    (26.0, 131.0, 0.0),
    (20.0, 136.0, 0.0),
    (26.0, 154.0, 0.0),
];

/// Geodetic datums found in lake shoreline data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datum {
    Wgs84,
    Jgd2000,
    Jgd2011,
    Tokyo,
}

impl Datum {
    /// Ellipsoid and shift-to-WGS84 parameters.
    #[inline]
    fn proj4_params(self) -> &'static str {
        match self {
            Datum::Wgs84 => "+datum=WGS84",
            Datum::Jgd2000 | Datum::Jgd2011 => "+ellps=GRS80 +towgs84=0,0,0,0,0,0,0",
            Datum::Tokyo => "+ellps=bessel +towgs84=-146.414,507.337,680.507,0,0,0,0",
        }
    }
}

/// Coordinate reference system of an input layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceCrs {
    /// Longitude/latitude in degrees.
    Geographic(Datum),
    /// Japan Plane Rectangular CS, zone 1..=19, metres (x = easting).
    JapanPlaneRectangular { datum: Datum, zone: u8 },
    /// Any CRS given directly as a PROJ.4 string.
    Proj4(String),
}

impl Default for SourceCrs {
    fn default() -> Self { SourceCrs::Geographic(Datum::Wgs84) }
}

impl SourceCrs {
    /// Detect the CRS from the `.prj` sidecar of a shapefile.
    /// Returns `Ok(None)` when there is no `.prj` file.
    pub fn from_prj_file(shp_path: &Path) -> Result<Option<Self>> {
        let prj_path = shp_path.with_extension("prj");
        if !prj_path.exists() {
            return Ok(None);
        }
        let wkt = fs::read_to_string(&prj_path)
            .with_context(|| format!("Failed to read projection file: {}", prj_path.display()))?;
        Self::from_wkt(&wkt)
            .with_context(|| format!("Unrecognized CRS in {} (supply a PROJ.4 string instead)", prj_path.display()))
            .map(Some)
    }

    /// Detect a supported CRS from ESRI or OGC WKT.
    pub fn from_wkt(wkt: &str) -> Result<Self> {
        let wkt = wkt.trim_start_matches('\u{feff}');
        let datum = detect_datum(wkt)?
            .ok_or_else(|| anyhow!("unknown datum in WKT: {}", wkt.trim()))?;

        let projected = Regex::new(r"^\s*PROJ(?:CS|CRS)\[")?.is_match(wkt);
        if !projected {
            return Ok(SourceCrs::Geographic(datum));
        }

        let zone_re = Regex::new(r"(?i)(?:plane[ _]rectangular[ _]cs|japan[ _]zone)[ _]([ivx]+|\d{1,2})\b")?;
        let zone = zone_re.captures(wkt)
            .and_then(|caps| parse_zone(&caps[1]))
            .ok_or_else(|| anyhow!("unsupported projected CRS: {}", wkt.trim()))?;

        Ok(SourceCrs::JapanPlaneRectangular { datum, zone })
    }

    /// True when input coordinates are angles rather than metres.
    fn is_geographic(&self) -> Result<bool> {
        Ok(match self {
            SourceCrs::Geographic(_) => true,
            SourceCrs::JapanPlaneRectangular { .. } => false,
            SourceCrs::Proj4(proj_string) => {
                Regex::new(r"\+proj=(?:longlat|latlong|lonlat|latlon)\b")?.is_match(proj_string)
            }
        })
    }

    /// Build the PROJ.4 string for this CRS.
    pub fn proj4(&self) -> Result<String> {
        Ok(match self {
            SourceCrs::Geographic(datum) => {
                format!("+proj=longlat {} +no_defs +type=crs", datum.proj4_params())
            }
            SourceCrs::JapanPlaneRectangular { datum, zone } => {
                let (lat_0, lon_deg, lon_min) = *JPR_ORIGINS.get((*zone as usize).wrapping_sub(1))
                    .ok_or_else(|| anyhow!("Japan Plane Rectangular zone out of range: {zone}"))?;
                let lon_0 = lon_deg + lon_min / 60.0;
                format!(
                    "+proj=tmerc +lat_0={lat_0} +lon_0={lon_0} +k=0.9999 +x_0=0 +y_0=0 {} +units=m +no_defs +type=crs",
                    datum.proj4_params()
                )
            }
            SourceCrs::Proj4(proj_string) => proj_string.clone(),
        })
    }
}

/// Find the datum named in a WKT string, most specific first.
///
/// Only the quoted names of `DATUM[...]` and geographic CRS nodes are searched, so a
/// `TOWGS84[...]` shift on some other datum is not mistaken for WGS84.
fn detect_datum(wkt: &str) -> Result<Option<Datum>> {
    let name_re = Regex::new(r#"(?i)\b(?:DATUM|GEOGCS|GEOGCRS|BASEGEOGCRS|GEODCRS)\s*\[\s*"([^"]*)""#)?;
    let names: Vec<&str> = name_re.captures_iter(wkt)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .collect();

    let patterns = [
        (r"(?i)JGD[ _]?2011|Japanese[ _]Geodetic[ _]Datum[ _]2011", Datum::Jgd2011),
        (r"(?i)JGD[ _]?2000|Japanese[ _]Geodetic[ _]Datum[ _]2000", Datum::Jgd2000),
        (r"(?i)tokyo", Datum::Tokyo),
        (r"(?i)WGS[ _]?(?:19)?84", Datum::Wgs84),
    ];
    for (pattern, datum) in patterns {
        let re = Regex::new(pattern)?;
        if names.iter().any(|name| re.is_match(name)) {
            return Ok(Some(datum));
        }
    }
    Ok(None)
}

/// Parse a zone label: arabic digits or a roman numeral, 1..=19.
fn parse_zone(label: &str) -> Option<u8> {
    let zone = match label.parse::<u8>() {
        Ok(n) => n,
        Err(_) => {
            let values: Vec<u8> = label.chars()
                .map(|ch| match ch.to_ascii_uppercase() {
                    'I' => Some(1),
                    'V' => Some(5),
                    'X' => Some(10),
                    _ => None,
                })
                .collect::<Option<_>>()?;
            let mut total = 0i32;
            for (i, &v) in values.iter().enumerate() {
                match values.get(i + 1) {
                    Some(&next) if next > v => total -= v as i32,
                    _ => total += v as i32,
                }
            }
            u8::try_from(total).ok()?
        }
    };
    (1..=19).contains(&zone).then_some(zone)
}

/// Maps fragments from a source CRS into WGS84 lon/lat degrees.
pub struct Reprojector {
    /// `None` when the source is already WGS84 lon/lat.
    from: Option<Proj4>,
    to: Proj4,
    source_is_geographic: bool,
}

impl Reprojector {
    pub fn new(src: &SourceCrs) -> Result<Self> {
        let to = Proj4::from_proj_string(WGS84_PROJ4)
            .with_context(|| anyhow!("failed to build target PROJ.4: {WGS84_PROJ4}"))?;

        let from = if *src == SourceCrs::Geographic(Datum::Wgs84) {
            None
        } else {
            let proj_string = src.proj4()?;
            Some(Proj4::from_proj_string(&proj_string)
                .with_context(|| anyhow!("failed to build source PROJ.4: {proj_string}"))?)
        };

        Ok(Self { from, to, source_is_geographic: src.is_geographic()? })
    }

    /// True when coordinates pass through unchanged.
    #[inline] pub fn is_identity(&self) -> bool { self.from.is_none() }

    /// Transform a single coordinate to lon/lat degrees.
    pub fn reproject_coord(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        let Some(from) = &self.from else {
            return Ok(coord);
        };

        // Angles in radians on both sides of proj4rs, metres for projected input.
        let mut point = if self.source_is_geographic {
            (coord.x.to_radians(), coord.y.to_radians(), 0.0)
        } else {
            (coord.x, coord.y, 0.0)
        };
        transform(from, &self.to, &mut point)
            .with_context(|| format!("CRS transform failed at ({}, {})", coord.x, coord.y))?;

        Ok(Coord { x: point.0.to_degrees(), y: point.1.to_degrees() })
    }

    /// Transform every coordinate of every fragment.
    pub fn reproject(&self, fragments: Vec<Fragment>) -> Result<Vec<Fragment>> {
        if self.is_identity() {
            return Ok(fragments);
        }
        fragments.into_iter()
            .map(|fragment| fragment.into_iter().map(|coord| self.reproject_coord(coord)).collect::<Result<Fragment>>())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JGD2011_ZONE_IX_ESRI: &str = r#"PROJCS["JGD_2011_Japan_Zone_9",GEOGCS["GCS_JGD_2011",DATUM["D_JGD_2011",SPHEROID["GRS_1980",6378137.0,298.257222101]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Transverse_Mercator"],PARAMETER["False_Easting",0.0],PARAMETER["False_Northing",0.0],PARAMETER["Central_Meridian",139.8333333333333],PARAMETER["Scale_Factor",0.9999],PARAMETER["Latitude_Of_Origin",36.0],UNIT["Meter",1.0]]"#;
    const JGD2000_GEOGCS: &str = r#"GEOGCS["GCS_JGD_2000",DATUM["D_JGD_2000",SPHEROID["GRS_1980",6378137.0,298.257222101]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#;
    const WGS84_GEOGCS: &str = r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#;

    #[test]
    fn detects_esri_plane_rectangular_zone() {
        let crs = SourceCrs::from_wkt(JGD2011_ZONE_IX_ESRI).unwrap();
        assert_eq!(crs, SourceCrs::JapanPlaneRectangular { datum: Datum::Jgd2011, zone: 9 });
    }

    #[test]
    fn detects_epsg_roman_zone_names() {
        let wkt = r#"PROJCS["JGD2000 / Japan Plane Rectangular CS XIV",GEOGCS["JGD2000"]]"#;
        let crs = SourceCrs::from_wkt(wkt).unwrap();
        assert_eq!(crs, SourceCrs::JapanPlaneRectangular { datum: Datum::Jgd2000, zone: 14 });
    }

    #[test]
    fn detects_geographic_datums() {
        assert_eq!(SourceCrs::from_wkt(JGD2000_GEOGCS).unwrap(), SourceCrs::Geographic(Datum::Jgd2000));
        assert_eq!(SourceCrs::from_wkt(WGS84_GEOGCS).unwrap(), SourceCrs::Geographic(Datum::Wgs84));
    }

    #[test]
    fn unknown_wkt_is_an_error() {
        assert!(SourceCrs::from_wkt(r#"GEOGCS["GCS_North_American_1983"]"#).is_err());
        assert!(SourceCrs::from_wkt(r#"PROJCS["WGS_1984_UTM_Zone_54N",GEOGCS["GCS_WGS_1984"]]"#).is_err());
    }

    #[test]
    fn towgs84_shift_is_not_a_wgs84_datum() {
        let ed50 = r#"GEOGCS["ED50",DATUM["European_Datum_1950",SPHEROID["International 1924",6378388,297],TOWGS84[-87,-98,-121,0,0,0,0]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]]"#;
        assert!(SourceCrs::from_wkt(ed50).is_err());

        let tokyo = r#"GEOGCS["Tokyo",DATUM["Tokyo",SPHEROID["Bessel 1841",6377397.155,299.1528128],TOWGS84[-146.414,507.337,680.507,0,0,0,0]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]]"#;
        assert_eq!(SourceCrs::from_wkt(tokyo).unwrap(), SourceCrs::Geographic(Datum::Tokyo));
    }

    #[test]
    fn epsg_datum_names() {
        let wkt = r#"PROJCS["JGD2011 / Japan Plane Rectangular CS IX",GEOGCS["JGD2011",DATUM["Japanese_Geodetic_Datum_2011",SPHEROID["GRS 1980",6378137,298.257222101]]]]"#;
        let crs = SourceCrs::from_wkt(wkt).unwrap();
        assert_eq!(crs, SourceCrs::JapanPlaneRectangular { datum: Datum::Jgd2011, zone: 9 });
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let wkt = format!("\u{feff}{JGD2011_ZONE_IX_ESRI}");
        let crs = SourceCrs::from_wkt(&wkt).unwrap();
        assert_eq!(crs, SourceCrs::JapanPlaneRectangular { datum: Datum::Jgd2011, zone: 9 });
    }

    #[test]
    fn zone_labels() {
        assert_eq!(parse_zone("IX"), Some(9));
        assert_eq!(parse_zone("xix"), Some(19));
        assert_eq!(parse_zone("IV"), Some(4));
        assert_eq!(parse_zone("7"), Some(7));
        assert_eq!(parse_zone("20"), None);
        assert_eq!(parse_zone("0"), None);
        assert_eq!(parse_zone("XX"), None);
    }

    #[test]
    fn wgs84_is_identity() {
        let reprojector = Reprojector::new(&SourceCrs::default()).unwrap();
        assert!(reprojector.is_identity());
        let fragments = vec![vec![Coord { x: 139.7, y: 35.6 }]];
        assert_eq!(reprojector.reproject(fragments.clone()).unwrap(), fragments);
    }

    #[test]
    fn plane_rectangular_origin_maps_to_zone_origin() {
        let crs = SourceCrs::JapanPlaneRectangular { datum: Datum::Jgd2011, zone: 9 };
        let reprojector = Reprojector::new(&crs).unwrap();

        let origin = reprojector.reproject_coord(Coord { x: 0.0, y: 0.0 }).unwrap();
        assert!((origin.x - (139.0 + 50.0 / 60.0)).abs() < 1e-6, "lon {}", origin.x);
        assert!((origin.y - 36.0).abs() < 1e-6, "lat {}", origin.y);

        // 1 km east of the origin
        let east = reprojector.reproject_coord(Coord { x: 1000.0, y: 0.0 }).unwrap();
        assert!(east.x > origin.x + 0.01 && east.x < origin.x + 0.012, "lon {}", east.x);
        assert!((east.y - 36.0).abs() < 1e-3, "lat {}", east.y);
    }

    #[test]
    fn jgd2011_geographic_is_nearly_wgs84() {
        let reprojector = Reprojector::new(&SourceCrs::Geographic(Datum::Jgd2011)).unwrap();
        assert!(!reprojector.is_identity());

        let out = reprojector.reproject_coord(Coord { x: 136.1, y: 35.3 }).unwrap();
        assert!((out.x - 136.1).abs() < 1e-6);
        assert!((out.y - 35.3).abs() < 1e-6);
    }

    #[test]
    fn explicit_proj4_geographic_flag() {
        let crs = SourceCrs::Proj4("+proj=longlat +ellps=GRS80 +no_defs".to_string());
        assert!(crs.is_geographic().unwrap());
        let crs = SourceCrs::Proj4("+proj=utm +zone=54 +datum=WGS84".to_string());
        assert!(!crs.is_geographic().unwrap());
    }

    #[test]
    fn missing_prj_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SourceCrs::from_prj_file(&dir.path().join("lake.shp")).unwrap(), None);

        fs::write(dir.path().join("lake.prj"), JGD2000_GEOGCS).unwrap();
        assert_eq!(
            SourceCrs::from_prj_file(&dir.path().join("lake.shp")).unwrap(),
            Some(SourceCrs::Geographic(Datum::Jgd2000))
        );
    }
}
