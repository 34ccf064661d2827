//! Reconstruct closed shoreline rings from disjoint polyline fragments.
//!
//! The pipeline is four pure stages, each usable on its own:
//! [`classify`] -> [`stitch_open`] -> [`close_chain`] / [`assemble_rings`] -> [`derive_polygons`].
//! [`stitch_shoreline`] runs all of them.

pub mod classify;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod ring;
pub mod stitch;

use geo::Coord;

/// One input polyline, in native coordinate order.
pub type Fragment = Vec<Coord<f64>>;

/// The in-progress concatenation of open fragments.
pub type Chain = Vec<Coord<f64>>;

pub use classify::{classify, closure_distance, Classified};
pub use config::{StitchConfig, CLOSURE_THRESHOLD, MIN_FRAGMENT_COORDS, MIN_RING_COORDS};
pub use error::StitchError;
pub use pipeline::{stitch_shoreline, Shoreline, StitchStats};
pub use ring::{assemble_rings, derive_polygons, is_closed_ring};
pub use stitch::{close_chain, nearest_endpoint, stitch_open, Endpoint};
