//! Read-only queries over a closed ring given as a flat `x, y, x, y, ...` buffer.
//!
//! These back interactive boundary editing: finding where a new point belongs in a ring and
//! copying out the stretch of a ring between two of its vertices. None of them mutate the
//! ring; the caller applies the result to its own vertex sequence.

use alloc::vec::Vec;
use num_traits::float::Float;

use crate::error::{Error, Result};
use crate::predicates::ring_area_x2;

/// An edge of a closed ring of `n` vertices: `end == (start + 1) % n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

/// Number of vertices in a flat 2-D ring buffer.
fn vertex_count<T>(ring: &[T]) -> Result<usize> {
    if ring.len() % 2 != 0 {
        return Err(Error::LengthMismatch {
            len: ring.len(),
            dim: 2,
        });
    }
    Ok(ring.len() / 2)
}

/// Finds the ring edge closest to `target`.
///
/// Each edge is measured by the distance from `target` to its nearest point on the segment.
/// Zero-length edges are skipped and the earliest edge wins ties. Returns `None` when the
/// ring has no edge of non-zero length.
///
/// ```
/// use wam_earcut::{nearest_edge, Edge};
///
/// let square = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
/// let edge = nearest_edge(&square, [0.5, -1.0]).unwrap();
/// assert_eq!(edge, Some(Edge { start: 0, end: 1 }));
/// ```
pub fn nearest_edge<T: Float>(ring: &[T], target: [T; 2]) -> Result<Option<Edge>> {
    let n = vertex_count(ring)?;
    let [tx, ty] = target;
    let mut best: Option<(T, Edge)> = None;

    for start in 0..n {
        let end = (start + 1) % n;
        let (ax, ay) = (ring[2 * start], ring[2 * start + 1]);
        let (dx, dy) = (ring[2 * end] - ax, ring[2 * end + 1] - ay);
        let len_sq = dx * dx + dy * dy;
        if len_sq == T::zero() {
            continue;
        }

        let t = (((tx - ax) * dx + (ty - ay) * dy) / len_sq)
            .max(T::zero())
            .min(T::one());
        let distance = (tx - (ax + t * dx)).hypot(ty - (ay + t * dy));

        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, Edge { start, end }));
        }
    }
    Ok(best.map(|(_, edge)| edge))
}

/// Copies the coordinates of the vertices from `start` to `end`, both inclusive.
///
/// When `end < start` the range wraps: vertices `start..n` followed by `0..=end`.
/// When `start == end` only that vertex is returned.
pub fn extract_range<T: Copy>(ring: &[T], start: usize, end: usize) -> Result<Vec<T>> {
    let n = vertex_count(ring)?;
    for index in [start, end] {
        if index >= n {
            return Err(Error::VertexOutOfRange { index, len: n });
        }
    }

    let out = if start <= end {
        ring[2 * start..2 * end + 2].to_vec()
    } else {
        let mut out = Vec::with_capacity(ring.len() - 2 * start + 2 * end + 2);
        out.extend_from_slice(&ring[2 * start..]);
        out.extend_from_slice(&ring[..2 * end + 2]);
        out
    };
    Ok(out)
}

/// Shoelace area of the ring; positive when counter-clockwise with y pointing up.
pub fn signed_area<T: Float>(ring: &[T]) -> Result<T> {
    vertex_count(ring)?;
    let points = ring
        .chunks_exact(2)
        .map(|p| [p[0], p[1]])
        .collect::<Vec<_>>();
    let two = T::one() + T::one();
    Ok(ring_area_x2(&points) / two)
}
