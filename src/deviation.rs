use alloc::vec::Vec;
use num_traits::float::Float;

use crate::earcut::validate;
use crate::error::{Error, Result};
use crate::predicates::ring_area_x2;
use crate::Index;

/// Relative difference between the polygon's area and the area covered by `triangles`.
///
/// The polygon area is the outer ring's area minus the area of every hole with at least three
/// vertices. Returns zero when both areas are zero; used to verify a triangulation.
pub fn deviation<T: Float, N: Index>(
    coords: &[T],
    hole_indices: &[N],
    dim: usize,
    triangles: &[N],
) -> Result<T> {
    let vertices = validate::<T, N>(coords, hole_indices, dim)?;
    let point = |k: usize| -> Result<[T; 2]> {
        if k >= vertices {
            return Err(Error::VertexOutOfRange {
                index: k,
                len: vertices,
            });
        }
        Ok([coords[k * dim], coords[k * dim + 1]])
    };

    let ring_area = |start: usize, end: usize| -> Result<T> {
        let ring = (start..end).map(point).collect::<Result<Vec<_>>>()?;
        Ok(ring_area_x2(&ring).abs())
    };

    let mut polygon_area = T::zero();
    if vertices >= 3 {
        let outer_len = hole_indices.first().map_or(vertices, |h| h.into_usize());
        polygon_area = ring_area(0, outer_len)?;
        let ends = hole_indices
            .iter()
            .skip(1)
            .map(|h| h.into_usize())
            .chain([vertices]);
        for (start, end) in hole_indices.iter().map(|h| h.into_usize()).zip(ends) {
            if end - start >= 3 {
                polygon_area = polygon_area - ring_area(start, end)?;
            }
        }
    }

    let mut triangles_area = T::zero();
    for tri in triangles.chunks_exact(3) {
        let a = point(tri[0].into_usize())?;
        let b = point(tri[1].into_usize())?;
        let c = point(tri[2].into_usize())?;
        let doubled = (a[0] - c[0]) * (b[1] - a[1]) - (a[0] - b[0]) * (c[1] - a[1]);
        triangles_area = triangles_area + doubled.abs();
    }

    if polygon_area == T::zero() && triangles_area == T::zero() {
        return Ok(T::zero());
    }
    Ok(((polygon_area - triangles_area) / polygon_area).abs())
}
