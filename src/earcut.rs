use alloc::vec::Vec;
use num_traits::float::Float;

use crate::arena::{NodeArena, NodeIndex, MAX_VERTICES};
use crate::config::Options;
use crate::error::{Error, Result};
use crate::holes::{eliminate_hole, get_leftmost};
use crate::predicates::{
    area, equals, intersects, is_valid_diagonal, locally_inside, point_in_triangle, ring_area_x2,
};
use crate::zorder::{index_curve, ZIndex};
use crate::Index;

/// Instance of the ear-clipping triangulator.
///
/// The instance owns the node pool and scratch buffers. Reuse one instance across frames to
/// avoid reallocating them; `&mut self` keeps every pool confined to one call at a time.
pub struct Earcut<T: Float> {
    data: Vec<[T; 2]>,
    nodes: NodeArena<T>,
    queue: Vec<NodeIndex>,
    options: Options,
}

impl<T: Float> Default for Earcut<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Earcut<T> {
    /// Creates a triangulator with default [`Options`].
    ///
    /// Reusing the instance across calls avoids reallocating its buffers.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Creates a triangulator with the given tuning.
    pub fn with_options(options: Options) -> Self {
        Self {
            data: Vec::new(),
            nodes: NodeArena::new(),
            queue: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Triangulates a polygon given as a flat coordinate buffer.
    ///
    /// `coords` holds `dim` components per vertex; only the first two are used. `hole_indices`
    /// are the vertex offsets where each hole ring begins. On success `triangles_out` holds
    /// vertex indices, three per counter-clockwise triangle; a polygon that collapses to a
    /// line or point yields no triangles. On error `triangles_out` is left empty.
    pub fn earcut<N: Index>(
        &mut self,
        coords: &[T],
        hole_indices: &[N],
        dim: usize,
        triangles_out: &mut Vec<N>,
    ) -> Result<()> {
        triangles_out.clear();
        let vertices = validate::<T, N>(coords, hole_indices, dim)?;

        self.data.clear();
        self.data
            .extend(coords.chunks_exact(dim).map(|v| [v[0], v[1]]));
        if vertices < 3 {
            return Ok(());
        }

        triangles_out.reserve(vertices * 3);
        self.nodes.reset(vertices + vertices / 2);

        let outer_len = hole_indices.first().map_or(vertices, |h| h.into_usize());

        let Some(mut outer) = self.linked_list(0, outer_len, true) else {
            return Ok(());
        };
        if self.nodes[outer].next == self.nodes[outer].prev {
            return Ok(());
        }
        if !hole_indices.is_empty() {
            outer = self.eliminate_holes(hole_indices, outer);
        }

        let grid = if vertices > self.options.hash_threshold {
            ZIndex::covering(&self.data[..outer_len])
        } else {
            None
        };
        if grid.is_some() {
            log::trace!("ear-testing {vertices} vertices through a z-order index");
        }

        let mut clipper = Clipper {
            nodes: &mut self.nodes,
            triangles: triangles_out,
            grid,
            max_split_depth: self.options.max_split_depth,
        };
        clipper.earcut_linked(outer, Pass::Initial, 0);
        Ok(())
    }

    /// Builds a circular list from vertices `start..end`.
    ///
    /// The outer ring keeps positive-area (counter-clockwise) order and holes get the opposite.
    fn linked_list(&mut self, start: usize, end: usize, outer: bool) -> Option<NodeIndex> {
        let ring = &self.data[start..end];
        let forward = outer == (ring_area_x2(ring) > T::zero());

        let mut last = None;
        let mut push = |offset: usize, &[x, y]: &[T; 2]| {
            last = Some(self.nodes.insert((start + offset) as u32, x, y, last));
        };
        if forward {
            ring.iter().enumerate().for_each(|(k, v)| push(k, v));
        } else {
            ring.iter().enumerate().rev().for_each(|(k, v)| push(k, v));
        }

        let last = last?;
        let next = self.nodes[last].next;
        if equals(&self.nodes[last], &self.nodes[next]) {
            let (_, next) = self.nodes.remove(last);
            return Some(next);
        }
        Some(last)
    }

    /// Links every hole into the outer ring, producing a single ring.
    fn eliminate_holes<N: Index>(&mut self, hole_indices: &[N], mut outer: NodeIndex) -> NodeIndex {
        self.queue.clear();
        let ends = hole_indices
            .iter()
            .skip(1)
            .map(|h| h.into_usize())
            .chain([self.data.len()]);
        for (start, end) in hole_indices.iter().map(|h| h.into_usize()).zip(ends) {
            if let Some(list) = self.linked_list(start, end, false) {
                if self.nodes[list].next == list {
                    self.nodes[list].steiner = true;
                }
                self.queue.push(get_leftmost(&self.nodes, list));
            }
        }

        let nodes = &self.nodes;
        self.queue.sort_unstable_by(|&a, &b| {
            let (a, b) = (&nodes[a], &nodes[b]);
            a.x.partial_cmp(&b.x)
                .unwrap_or(core::cmp::Ordering::Equal)
                .then(a.y.partial_cmp(&b.y).unwrap_or(core::cmp::Ordering::Equal))
        });
        log::trace!("bridging {} holes into the outer ring", self.queue.len());

        // left to right, so each hole bridges to the nearest already-merged ring
        for &hole in &self.queue {
            outer = eliminate_hole(&mut self.nodes, hole, outer);
        }
        outer
    }
}

/// Checks the call contract and returns the vertex count.
pub(crate) fn validate<T: Float, N: Index>(
    coords: &[T],
    hole_indices: &[N],
    dim: usize,
) -> Result<usize> {
    if dim < 2 {
        return Err(Error::InvalidDimension(dim));
    }
    if coords.len() % dim != 0 {
        return Err(Error::LengthMismatch {
            len: coords.len(),
            dim,
        });
    }
    let vertices = coords.len() / dim;

    let mut floor = 0;
    for (position, h) in hole_indices.iter().enumerate() {
        let index = h.into_usize();
        if index <= floor || index > vertices {
            return Err(Error::InvalidHoleIndex {
                position,
                index,
                vertices,
            });
        }
        floor = index;
    }

    if let Some(bad) = coords
        .chunks_exact(dim)
        .position(|v| !(v[0].is_finite() && v[1].is_finite()))
    {
        return Err(Error::NonFiniteCoordinate(bad));
    }

    let max = N::MAX_VERTICES.min(MAX_VERTICES);
    if vertices > max {
        return Err(Error::IndexOverflow { vertices, max });
    }
    Ok(vertices)
}

/// What has already been tried on the ring being clipped.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Pass {
    Initial,
    Filtered,
    Cured,
}

/// State shared by the clipping passes of one triangulation.
struct Clipper<'a, T: Float, N> {
    nodes: &'a mut NodeArena<T>,
    triangles: &'a mut Vec<N>,
    grid: Option<ZIndex<T>>,
    max_split_depth: Option<usize>,
}

impl<T: Float, N: Index> Clipper<'_, T, N> {
    fn emit(&mut self, a: NodeIndex, b: NodeIndex, c: NodeIndex) {
        for p in [a, b, c] {
            self.triangles
                .push(N::from_usize(self.nodes[p].i as usize));
        }
    }

    /// Main ear-slicing loop over the ring containing `ear`.
    fn earcut_linked(&mut self, mut ear: NodeIndex, pass: Pass, depth: usize) {
        if pass == Pass::Initial {
            if let Some(grid) = &self.grid {
                index_curve(self.nodes, ear, grid);
            }
        }

        let mut stop = ear;
        while self.nodes[ear].prev != self.nodes[ear].next {
            let prev = self.nodes[ear].prev;
            let next = self.nodes[ear].next;

            let is_ear = match &self.grid {
                Some(grid) => is_ear_hashed(self.nodes, ear, grid),
                None => is_ear(self.nodes, ear),
            };
            if is_ear {
                self.emit(prev, ear, next);
                self.nodes.remove(ear);

                // skipping the next vertex leads to fewer sliver triangles
                ear = self.nodes[next].next;
                stop = ear;
                continue;
            }

            ear = next;
            if ear == stop {
                match pass {
                    Pass::Initial => {
                        log::debug!("no ear found; filtering degenerate points and retrying");
                        let ear = filter_points(self.nodes, ear, None);
                        self.earcut_linked(ear, Pass::Filtered, depth);
                    }
                    Pass::Filtered => {
                        log::debug!("no ear found; curing local self-intersections");
                        let ear = filter_points(self.nodes, ear, None);
                        let ear = self.cure_local_intersections(ear);
                        self.earcut_linked(ear, Pass::Cured, depth);
                    }
                    Pass::Cured => {
                        log::debug!("no ear found; splitting the ring along a diagonal");
                        self.split_earcut(ear, depth);
                    }
                }
                return;
            }
        }
    }

    /// Clips pairs of crossing edges `a-p` / `p.next-b` into a triangle `a p b`.
    fn cure_local_intersections(&mut self, mut start: NodeIndex) -> NodeIndex {
        let mut p = start;
        loop {
            let p_next = self.nodes[p].next;
            let a = self.nodes[p].prev;
            let b = self.nodes[p_next].next;
            let nodes = &*self.nodes;

            if !equals(&nodes[a], &nodes[b])
                && intersects(&nodes[a], &nodes[p], &nodes[p_next], &nodes[b])
                && locally_inside(nodes, a, b)
                && locally_inside(nodes, b, a)
            {
                self.emit(a, p, b);
                self.nodes.remove(p);
                self.nodes.remove(p_next);
                p = b;
                start = b;
            }

            p = self.nodes[p].next;
            if p == start {
                return filter_points(self.nodes, p, None);
            }
        }
    }

    /// Splits the ring along the first valid diagonal and clips both halves.
    fn split_earcut(&mut self, start: NodeIndex, depth: usize) {
        if self.max_split_depth.is_some_and(|max| depth >= max) {
            log::warn!("split depth {depth} exhausted; leaving the remaining ring untriangulated");
            return;
        }

        let mut a = start;
        loop {
            let a_prev = self.nodes[a].prev;
            let mut b = self.nodes[self.nodes[a].next].next;
            while b != a_prev {
                if self.nodes[a].i != self.nodes[b].i && is_valid_diagonal(self.nodes, a, b) {
                    let c = self.nodes.split(a, b);

                    // drop collinear points around the cut
                    let end = self.nodes[a].next;
                    let a = filter_points(self.nodes, a, Some(end));
                    let end = self.nodes[c].next;
                    let c = filter_points(self.nodes, c, Some(end));

                    self.earcut_linked(a, Pass::Initial, depth + 1);
                    self.earcut_linked(c, Pass::Initial, depth + 1);
                    return;
                }
                b = self.nodes[b].next;
            }

            a = self.nodes[a].next;
            if a == start {
                return;
            }
        }
    }
}

/// Removes duplicate and collinear nodes between `start` and `end` (the whole ring by default).
pub(crate) fn filter_points<T: Float>(
    nodes: &mut NodeArena<T>,
    start: NodeIndex,
    end: Option<NodeIndex>,
) -> NodeIndex {
    let mut end = end.unwrap_or(start);
    let mut p = start;
    loop {
        let node = nodes[p];
        let next = &nodes[node.next];
        if !node.steiner && (equals(&node, next) || area(&nodes[node.prev], &node, next) == T::zero())
        {
            let (prev, next) = nodes.remove(p);
            p = prev;
            end = prev;
            if p == next {
                return end;
            }
        } else {
            p = node.next;
            if p == end {
                return end;
            }
        }
    }
}

/// Bounding box of triangle `abc` as `[min_x, min_y, max_x, max_y]`.
fn triangle_bbox<T: Float>(a: [T; 2], b: [T; 2], c: [T; 2]) -> [T; 4] {
    [
        a[0].min(b[0].min(c[0])),
        a[1].min(b[1].min(c[1])),
        a[0].max(b[0].max(c[0])),
        a[1].max(b[1].max(c[1])),
    ]
}

/// Whether node `p` lies in the candidate ear `abc` and is itself convex-or-flat,
/// which blocks the ear.
fn blocks_ear<T: Float>(
    nodes: &NodeArena<T>,
    p: NodeIndex,
    [a, b, c]: [[T; 2]; 3],
    [x0, y0, x1, y1]: [T; 4],
) -> bool {
    let node = &nodes[p];
    node.x >= x0
        && node.x <= x1
        && node.y >= y0
        && node.y <= y1
        && point_in_triangle(a, b, c, [node.x, node.y])
        && area(&nodes[node.prev], node, &nodes[node.next]) >= T::zero()
}

/// Whether `ear` forms a valid ear with its neighbours, scanning the whole ring.
fn is_ear<T: Float>(nodes: &NodeArena<T>, ear: NodeIndex) -> bool {
    let b = &nodes[ear];
    let (a_i, c_i) = (b.prev, b.next);
    let (a, c) = (&nodes[a_i], &nodes[c_i]);

    if area(a, b, c) >= T::zero() {
        // reflex
        return false;
    }

    let tri = [[a.x, a.y], [b.x, b.y], [c.x, c.y]];
    let bbox = triangle_bbox(tri[0], tri[1], tri[2]);

    let mut p = c.next;
    while p != a_i {
        if blocks_ear(nodes, p, tri, bbox) {
            return false;
        }
        p = nodes[p].next;
    }
    true
}

/// Like [`is_ear`], but only visits nodes whose z-order key falls in the triangle's key range.
fn is_ear_hashed<T: Float>(nodes: &NodeArena<T>, ear: NodeIndex, grid: &ZIndex<T>) -> bool {
    let b = &nodes[ear];
    let (a_i, c_i) = (b.prev, b.next);
    let (a, c) = (&nodes[a_i], &nodes[c_i]);

    if area(a, b, c) >= T::zero() {
        return false;
    }

    let tri = [[a.x, a.y], [b.x, b.y], [c.x, c.y]];
    let bbox = triangle_bbox(tri[0], tri[1], tri[2]);
    let min_z = grid.key(bbox[0], bbox[1]);
    let max_z = grid.key(bbox[2], bbox[3]);

    let blocks = |p: NodeIndex| p != a_i && p != c_i && blocks_ear(nodes, p, tri, bbox);

    let mut down = b.prev_z.filter(|&p| nodes[p].z >= min_z);
    let mut up = b.next_z.filter(|&n| nodes[n].z <= max_z);

    // walk both directions at once, then drain whichever side remains
    while let (Some(p), Some(n)) = (down, up) {
        if blocks(p) || blocks(n) {
            return false;
        }
        down = nodes[p].prev_z.filter(|&p| nodes[p].z >= min_z);
        up = nodes[n].next_z.filter(|&n| nodes[n].z <= max_z);
    }
    while let Some(p) = down {
        if blocks(p) {
            return false;
        }
        down = nodes[p].prev_z.filter(|&p| nodes[p].z >= min_z);
    }
    while let Some(n) = up {
        if blocks(n) {
            return false;
        }
        up = nodes[n].next_z.filter(|&n| nodes[n].z <= max_z);
    }
    true
}
