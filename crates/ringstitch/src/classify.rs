use geo::Coord;

use crate::{Fragment, StitchConfig};

/// Fragments partitioned by closure, each set in original relative order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classified {
    pub self_closed: Vec<Fragment>,
    pub open: Vec<Fragment>,
    /// Number of fragments dropped for being shorter than the minimum.
    pub discarded: usize,
}

/// Straight-line distance between a fragment's first and last coordinate.
/// Returns `None` for an empty fragment.
pub fn closure_distance(fragment: &[Coord<f64>]) -> Option<f64> {
    let (first, last) = (fragment.first()?, fragment.last()?);
    let delta = *last - *first;
    Some(delta.x.hypot(delta.y))
}

/// Split fragments into self-closed and open sets, discarding short ones first.
pub fn classify(fragments: Vec<Fragment>, config: &StitchConfig) -> Classified {
    let mut classified = Classified::default();

    for fragment in fragments {
        if fragment.len() < config.min_fragment_coords {
            classified.discarded += 1;
            continue;
        }
        match closure_distance(&fragment) {
            Some(distance) if distance < config.closure_threshold => classified.self_closed.push(fragment),
            Some(_) => classified.open.push(fragment),
            // only reachable when min_fragment_coords is 0
            None => classified.discarded += 1,
        }
    }

    classified
}
