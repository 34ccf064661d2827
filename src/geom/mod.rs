mod proj;

pub use proj::{Datum, Reprojector, SourceCrs};
