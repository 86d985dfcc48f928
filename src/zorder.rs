//! Z-order (Morton) indexing of ring nodes.
//!
//! Positions are quantised into a 15-bit grid over the outer ring's bounding box and
//! bit-interleaved into one key, so nodes that are close in the plane tend to be close on
//! the `prev_z`/`next_z` chain. Ear tests then only walk the chain between the keys of the
//! candidate triangle's bounding-box corners.

use num_traits::float::Float;

use crate::arena::{NodeArena, NodeIndex};

const GRID_MAX: u32 = 32767;

/// Maps coordinates onto the quantisation grid.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ZIndex<T> {
    min_x: T,
    min_y: T,
    inv_size: T,
    limit: T,
}

impl<T: Float> ZIndex<T> {
    /// Grid spanning `points`; `None` if they are empty or have no extent.
    pub fn covering(points: &[[T; 2]]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let (min, max) = rest.iter().fold((first, first), |(min, max), &[x, y]| {
            ([min[0].min(x), min[1].min(y)], [max[0].max(x), max[1].max(y)])
        });
        let size = (max[0] - min[0]).max(max[1] - min[1]);
        if size == T::zero() {
            return None;
        }
        let limit = T::from(GRID_MAX)?;
        Some(Self {
            min_x: min[0],
            min_y: min[1],
            inv_size: limit / size,
            limit,
        })
    }

    /// Morton key of a position; positions outside the grid are clamped onto its border.
    pub fn key(&self, x: T, y: T) -> i32 {
        let x = self.quantise(x - self.min_x);
        let y = self.quantise(y - self.min_y);
        (spread_bits(x) | spread_bits(y) << 1) as i32
    }

    fn quantise(&self, offset: T) -> u32 {
        (offset * self.inv_size)
            .max(T::zero())
            .min(self.limit)
            .to_u32()
            .unwrap_or(0)
    }
}

/// Moves the low 16 bits of `v` to the even bit positions.
fn spread_bits(mut v: u32) -> u32 {
    v = (v | (v << 8)) & 0x00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333;
    v = (v | (v << 1)) & 0x5555_5555;
    v
}

/// Assigns keys to every node of the ring at `start` and links them into a sorted z-chain.
pub(crate) fn index_curve<T: Float>(nodes: &mut NodeArena<T>, start: NodeIndex, grid: &ZIndex<T>) {
    let mut p = start;
    loop {
        let node = &mut nodes[p];
        if node.z == 0 {
            node.z = grid.key(node.x, node.y);
        }
        node.prev_z = Some(node.prev);
        node.next_z = Some(node.next);
        p = node.next;
        if p == start {
            break;
        }
    }

    // open the chain before sorting it
    if let Some(tail) = nodes[start].prev_z.take() {
        nodes[tail].next_z = None;
    }
    sort_linked(nodes, start);
}

/// Simon Tatham's bottom-up merge sort over the z-chain starting at `head`.
/// <http://www.chiark.greenend.org.uk/~sgtatham/algorithms/listsort.html>
fn sort_linked<T: Float>(nodes: &mut NodeArena<T>, head: NodeIndex) {
    let mut list = Some(head);
    let mut in_size = 1;

    loop {
        let mut p = list.take();
        let mut tail: Option<NodeIndex> = None;
        let mut num_merges = 0;

        while let Some(p_start) = p {
            num_merges += 1;

            let mut q = Some(p_start);
            let mut p_size = 0;
            for _ in 0..in_size {
                p_size += 1;
                q = q.and_then(|q| nodes[q].next_z);
                if q.is_none() {
                    break;
                }
            }
            let mut q_size = in_size;

            while p_size > 0 || (q_size > 0 && q.is_some()) {
                let e = match (p, q) {
                    (Some(pi), Some(qi))
                        if p_size > 0 && q_size > 0 && nodes[pi].z > nodes[qi].z =>
                    {
                        q = nodes[qi].next_z;
                        q_size -= 1;
                        qi
                    }
                    (Some(pi), _) if p_size > 0 => {
                        p = nodes[pi].next_z;
                        p_size -= 1;
                        pi
                    }
                    (_, Some(qi)) => {
                        q = nodes[qi].next_z;
                        q_size -= 1;
                        qi
                    }
                    _ => break,
                };

                match tail {
                    Some(t) => nodes[t].next_z = Some(e),
                    None => list = Some(e),
                }
                nodes[e].prev_z = tail;
                tail = Some(e);
            }

            p = q;
        }

        if let Some(t) = tail {
            nodes[t].next_z = None;
        }
        if num_merges <= 1 {
            return;
        }
        in_size *= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn keys_interleave_x_into_even_bits() {
        assert_eq!(spread_bits(0b1011), 0b1000101);
        let grid = ZIndex {
            min_x: 0.0,
            min_y: 0.0,
            inv_size: 1.0,
            limit: 32767.0,
        };
        assert_eq!(grid.key(1.0, 0.0), 1);
        assert_eq!(grid.key(0.0, 1.0), 2);
        assert_eq!(grid.key(1.0, 1.0), 3);
        assert_eq!(grid.key(2.0, 0.0), 4);
    }

    #[test]
    fn grid_spans_bounding_box_and_clamps() {
        let grid = ZIndex::covering(&[[10.0, 10.0], [18.0, 14.0], [14.0, 18.0]]).unwrap();
        assert_eq!(grid.key(10.0, 10.0), 0);
        assert_eq!(grid.key(18.0, 18.0), 0x3FFF_FFFF);
        assert_eq!(grid.key(-50.0, 5.0), 0);
        assert_eq!(grid.key(500.0, 500.0), 0x3FFF_FFFF);
        assert!(ZIndex::covering(&[[1.0, 1.0], [1.0, 1.0]]).is_none());
        assert!(ZIndex::<f64>::covering(&[]).is_none());
    }

    #[test]
    fn index_curve_sorts_ring_by_key() {
        let mut nodes = NodeArena::new();
        let points = [[3., 3.], [0., 0.], [3., 0.], [1., 2.], [0., 3.], [2., 1.]];
        let mut last = None;
        for (i, &[x, y]) in points.iter().enumerate() {
            last = Some(nodes.insert(i as u32, x, y, last));
        }
        let start = nodes[last.unwrap()].next;
        let grid = ZIndex::covering(&points).unwrap();
        index_curve(&mut nodes, start, &grid);

        // find the chain head from any node
        let mut head = start;
        while let Some(prev) = nodes[head].prev_z {
            head = prev;
        }
        let mut keys = Vec::new();
        let mut p = Some(head);
        while let Some(i) = p {
            keys.push(nodes[i].z);
            if let Some(n) = nodes[i].next_z {
                assert_eq!(nodes[n].prev_z, Some(i));
            }
            p = nodes[i].next_z;
        }
        assert_eq!(keys.len(), points.len());
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }
}
