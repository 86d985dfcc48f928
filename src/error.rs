/// Reasons a call is rejected before any geometry runs.
///
/// Besides malformed buffers and hole lists, a NaN or infinite x/y component
/// is rejected up front ([`Error::NonFiniteCoordinate`]), since no orientation
/// test is meaningful on it.
///
/// Degenerate geometry (self-intersections, duplicate points, zero-area rings)
/// is never reported here; it degrades to a best-effort or empty triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Fewer than two components per vertex.
    #[error("vertex dimension must be at least 2, got {0}")]
    InvalidDimension(usize),

    /// The coordinate buffer does not split evenly into vertices.
    #[error("buffer of {len} coordinates is not a multiple of dimension {dim}")]
    LengthMismatch { len: usize, dim: usize },

    /// A hole start is zero, out of order, or past the last vertex.
    #[error("hole start {index} at position {position} must be ascending within 1..={vertices}")]
    InvalidHoleIndex {
        position: usize,
        index: usize,
        vertices: usize,
    },

    /// A vertex has a NaN or infinite x/y component.
    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteCoordinate(usize),

    /// The output index type (or the node arena) cannot address every vertex.
    #[error("{vertices} vertices exceed the addressable maximum of {max}")]
    IndexOverflow { vertices: usize, max: usize },

    /// A vertex index does not name a vertex of the ring.
    #[error("vertex {index} is out of range for {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
