//! Polygon geometry for the filled areas of War Animation Maker.
//!
//! [`Earcut`] triangulates a polygon with holes, given as a flat coordinate buffer, using
//! ear clipping with z-order hashing (a descendant of [Earcut](https://github.com/mapbox/earcut)).
//! The [`boundary`] module answers edit-time questions about a closed ring: which edge is
//! nearest to a point, and which coordinates lie between two of its vertices.
//!
//! ```
//! use wam_earcut::{deviation, triangulate};
//!
//! // 10x10 square with a 2x2 hole in the middle
//! let coords = [
//!     0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0,
//!     4.0, 4.0, 6.0, 4.0, 6.0, 6.0, 4.0, 6.0,
//! ];
//! let holes = [4u32];
//! let triangles = triangulate(&coords, &holes, 2).unwrap();
//! assert_eq!(triangles.len(), 8 * 3);
//! assert!(deviation(&coords, &holes, 2, &triangles).unwrap() < 1e-12);
//! ```

#![no_std]

extern crate alloc;

mod arena;
pub mod boundary;
mod config;
mod deviation;
mod earcut;
mod error;
mod holes;
mod predicates;
mod zorder;

use alloc::vec::Vec;
use num_traits::float::Float;

pub use boundary::{extract_range, nearest_edge, signed_area, Edge};
pub use config::Options;
pub use deviation::deviation;
pub use earcut::Earcut;
pub use error::{Error, Result};

/// Index of a vertex
pub trait Index: Copy {
    /// Largest vertex count whose indices all fit in this type.
    const MAX_VERTICES: usize;

    fn into_usize(self) -> usize;
    fn from_usize(v: usize) -> Self;
}

macro_rules! impl_index {
    ($($ty:ty),*) => {$(
        impl Index for $ty {
            const MAX_VERTICES: usize = (<$ty>::MAX as usize).saturating_add(1);

            #[inline]
            fn into_usize(self) -> usize {
                self as usize
            }
            #[inline]
            fn from_usize(v: usize) -> Self {
                v as Self
            }
        }
    )*};
}

impl_index!(u16, u32, usize);

/// Triangulates with a fresh [`Earcut`] instance and default [`Options`].
///
/// Prefer keeping an [`Earcut`] around when triangulating every frame.
pub fn triangulate<T: Float, N: Index>(
    coords: &[T],
    hole_indices: &[N],
    dim: usize,
) -> Result<Vec<N>> {
    let mut triangles = Vec::new();
    Earcut::new().earcut(coords, hole_indices, dim, &mut triangles)?;
    Ok(triangles)
}
