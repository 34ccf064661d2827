// Integration tests for fragment classification:
//   length filter, closure threshold, order preservation.

use geo::Coord;
use ringstitch::{classify, closure_distance, Fragment, StitchConfig};

fn frag(points: &[(f64, f64)]) -> Fragment {
    points.iter().map(|&(x, y)| Coord { x, y }).collect()
}

#[test]
fn closure_distance_is_endpoint_gap() {
    let f = frag(&[(0.0, 0.0), (5.0, 5.0), (3.0, 4.0)]);
    assert_eq!(closure_distance(&f), Some(5.0));
    assert_eq!(closure_distance(&[]), None);
}

#[test]
fn short_fragments_are_discarded() {
    let fragments = vec![
        frag(&[(0.0, 0.0)]),
        frag(&[(0.0, 0.0), (1.0, 0.0)]),
        frag(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]),
        frag(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
    ];
    let classified = classify(fragments, &StitchConfig::default());
    assert_eq!(classified.discarded, 3);
    assert_eq!(classified.open.len(), 1);
    assert!(classified.self_closed.is_empty());
}

#[test]
fn threshold_is_strict() {
    let config = StitchConfig::default().with_closure_threshold(0.5);
    let below = frag(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 0.4)]);
    let at = frag(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 0.5)]);
    let classified = classify(vec![below.clone(), at.clone()], &config);
    assert_eq!(classified.self_closed, vec![below]);
    assert_eq!(classified.open, vec![at]);
}

#[test]
fn default_threshold_separates_near_closed_loops() {
    let nearly = frag(&[(135.0, 35.0), (135.01, 35.0), (135.01, 35.01), (135.0001, 35.0001)]);
    let gap = frag(&[(135.0, 35.0), (135.01, 35.0), (135.01, 35.01), (135.0, 35.001)]);
    let classified = classify(vec![gap.clone(), nearly.clone()], &StitchConfig::default());
    assert_eq!(classified.self_closed, vec![nearly]);
    assert_eq!(classified.open, vec![gap]);
}

#[test]
fn relative_order_is_preserved() {
    let closed_a = frag(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
    let open_a = frag(&[(5.0, 0.0), (6.0, 0.0), (6.0, 1.0), (5.0, 1.0)]);
    let closed_b = frag(&[(2.0, 0.0), (3.0, 0.0), (3.0, 1.0), (2.0, 0.0)]);
    let open_b = frag(&[(7.0, 0.0), (8.0, 0.0), (8.0, 1.0), (7.0, 1.0)]);

    let classified = classify(
        vec![closed_a.clone(), open_a.clone(), closed_b.clone(), open_b.clone()],
        &StitchConfig::default(),
    );
    assert_eq!(classified.self_closed, vec![closed_a, closed_b]);
    assert_eq!(classified.open, vec![open_a, open_b]);
    assert_eq!(classified.discarded, 0);
}

#[test]
fn min_fragment_coords_is_configurable() {
    let config = StitchConfig::default().with_min_fragment_coords(2);
    let classified = classify(vec![frag(&[(0.0, 0.0), (1.0, 0.0)])], &config);
    assert_eq!(classified.open.len(), 1);
    assert_eq!(classified.discarded, 0);
}
