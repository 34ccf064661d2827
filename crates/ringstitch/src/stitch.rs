use geo::{Coord, LineString};

use crate::{Chain, Fragment, StitchError};

/// Which end of a fragment matched the chain tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

#[inline]
fn squared_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let d = a - b;
    let dist_sq = d.x * d.x + d.y * d.y;
    // NaN never wins a comparison
    if dist_sq.is_nan() { f64::INFINITY } else { dist_sq }
}

/// Find the fragment endpoint closest to `tail`.
///
/// Scans fragments in order and, within a fragment, its start before its end.
/// Only a strictly smaller distance replaces the current best, so ties go to
/// the first candidate encountered. Empty fragments are skipped.
pub fn nearest_endpoint(tail: Coord<f64>, remaining: &[Fragment]) -> Option<(usize, Endpoint)> {
    let mut best: Option<(usize, Endpoint, f64)> = None;

    for (idx, fragment) in remaining.iter().enumerate() {
        let (Some(&start), Some(&end)) = (fragment.first(), fragment.last()) else {
            continue;
        };
        for (endpoint, coord) in [(Endpoint::Start, start), (Endpoint::End, end)] {
            let dist_sq = squared_distance(tail, coord);
            match best {
                Some((_, _, best_sq)) if dist_sq >= best_sq => {}
                _ => best = Some((idx, endpoint, dist_sq)),
            }
        }
    }

    best.map(|(idx, endpoint, _)| (idx, endpoint))
}

/// Greedily concatenate open fragments into one chain.
///
/// The first fragment seeds the chain unmodified. Each following step appends the
/// remaining fragment whose start or end lies nearest the current tail, reversed
/// when its end matched. Every fragment is consumed exactly once; the result is
/// not closed (see [`close_chain`]).
pub fn stitch_open(open: Vec<Fragment>) -> Result<Chain, StitchError> {
    let mut remaining: Vec<Fragment> = open.into_iter().filter(|f| !f.is_empty()).collect();
    if remaining.is_empty() {
        return Ok(Chain::new());
    }

    let total: usize = remaining.iter().map(Vec::len).sum();
    let mut chain = Chain::with_capacity(total + 1);
    chain.extend(remaining.remove(0));

    while !remaining.is_empty() {
        let Some(&tail) = chain.last() else {
            return Err(StitchError::OpenSetExhausted { remaining_expected: remaining.len() });
        };
        let (idx, endpoint) = nearest_endpoint(tail, &remaining)
            .ok_or(StitchError::OpenSetExhausted { remaining_expected: remaining.len() })?;

        let next = remaining.remove(idx);
        match endpoint {
            Endpoint::Start => chain.extend(next),
            Endpoint::End => chain.extend(next.into_iter().rev()),
        }
    }

    Ok(chain)
}

/// Close a chain by re-appending its first coordinate. `None` for an empty chain.
pub fn close_chain(mut chain: Chain) -> Option<LineString<f64>> {
    let first = *chain.first()?;
    chain.push(first);
    Some(LineString::new(chain))
}
