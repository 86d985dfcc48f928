use std::collections::BTreeSet;

use wam_earcut::{extract_range, nearest_edge, signed_area, Edge, Error};

const UNIT_SQUARE: [f64; 8] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];

fn vertices(coords: &[i64]) -> BTreeSet<(i64, i64)> {
    coords.chunks_exact(2).map(|p| (p[0], p[1])).collect()
}

#[test]
fn point_below_unit_square_picks_bottom_edge() {
    let edge = nearest_edge(&UNIT_SQUARE, [0.5, -1.0]).unwrap();
    assert_eq!(edge, Some(Edge { start: 0, end: 1 }));
}

#[test]
fn closing_edge_wraps_to_first_vertex() {
    let edge = nearest_edge(&UNIT_SQUARE, [-0.5, 0.5]).unwrap();
    assert_eq!(edge, Some(Edge { start: 3, end: 0 }));
}

#[test]
fn odd_buffers_are_rejected() {
    assert_eq!(
        nearest_edge(&UNIT_SQUARE[..7], [0.0, 0.0]),
        Err(Error::LengthMismatch { len: 7, dim: 2 })
    );
    assert!(extract_range(&UNIT_SQUARE[..5], 0, 1).is_err());
}

#[test]
fn extract_range_forward_and_wrapping() {
    let ring: Vec<i64> = (0..6).flat_map(|k| [k, 10 * k]).collect();
    assert_eq!(extract_range(&ring, 1, 3).unwrap(), [1, 10, 2, 20, 3, 30]);
    assert_eq!(
        extract_range(&ring, 4, 1).unwrap(),
        [4, 40, 5, 50, 0, 0, 1, 10]
    );
    assert_eq!(extract_range(&ring, 5, 5).unwrap(), [5, 50]);
}

#[test]
fn opposite_ranges_cover_the_ring() {
    let ring: Vec<i64> = (0..7).flat_map(|k| [k, k * k]).collect();
    let all = vertices(&ring);
    for i in 0..7 {
        for j in 0..7 {
            if i == j {
                continue;
            }
            let mut joined = extract_range(&ring, i, j).unwrap();
            joined.extend(extract_range(&ring, j, i).unwrap());
            assert_eq!(vertices(&joined), all, "({i}, {j})");
        }
    }
}

#[test]
fn signed_area_of_reversed_ring_flips_sign() {
    assert_eq!(signed_area(&UNIT_SQUARE), Ok(1.0));
    let reversed: Vec<f64> = UNIT_SQUARE
        .chunks_exact(2)
        .rev()
        .flatten()
        .copied()
        .collect();
    assert_eq!(signed_area(&reversed), Ok(-1.0));
}
