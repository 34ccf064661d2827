/// Start/end distance (in coordinate units, degrees for EPSG:4326) below which a
/// fragment is treated as already closed.
pub const CLOSURE_THRESHOLD: f64 = 0.0003;

/// Fragments with fewer coordinates than this are discarded before classification.
pub const MIN_FRAGMENT_COORDS: usize = 4;

/// Rings need at least this many coordinates to become a polygon.
pub const MIN_RING_COORDS: usize = 4;

/// Tunable constants for the stitching pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StitchConfig {
    /// Closure distance strictly below this marks a fragment as self-closed.
    pub closure_threshold: f64,
    /// Minimum coordinate count for a fragment to be kept.
    pub min_fragment_coords: usize,
    /// Minimum coordinate count for a closed ring to yield a polygon.
    pub min_ring_coords: usize,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            closure_threshold: CLOSURE_THRESHOLD,
            min_fragment_coords: MIN_FRAGMENT_COORDS,
            min_ring_coords: MIN_RING_COORDS,
        }
    }
}

impl StitchConfig {
    pub fn with_closure_threshold(mut self, closure_threshold: f64) -> Self {
        self.closure_threshold = closure_threshold;
        self
    }

    pub fn with_min_fragment_coords(mut self, min_fragment_coords: usize) -> Self {
        self.min_fragment_coords = min_fragment_coords;
        self
    }

    pub fn with_min_ring_coords(mut self, min_ring_coords: usize) -> Self {
        self.min_ring_coords = min_ring_coords;
        self
    }
}
