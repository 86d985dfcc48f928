/// Tuning knobs for [`Earcut`](crate::Earcut).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Options {
    /// Polygons with more vertices than this are ear-tested through a z-order index.
    pub hash_threshold: usize,
    /// How deeply diagonal splits may nest before the rest of a stuck ring is abandoned.
    ///
    /// `None` splits until every sub-ring is exhausted.
    pub max_split_depth: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hash_threshold: 80,
            max_split_depth: None,
        }
    }
}

impl Options {
    /// Sets the vertex count above which ears are found through the z-order index.
    pub fn with_hash_threshold(mut self, vertices: usize) -> Self {
        self.hash_threshold = vertices;
        self
    }

    /// Sets the nesting limit for diagonal splits; `None` removes it.
    pub fn with_max_split_depth(mut self, depth: Option<usize>) -> Self {
        self.max_split_depth = depth;
        self
    }
}
