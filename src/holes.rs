use num_traits::float::Float;

use crate::arena::{Node, NodeArena, NodeIndex};
use crate::earcut::filter_points;
use crate::predicates::{equals, locally_inside, point_in_triangle, sector_contains_sector};

/// Leftmost node of a ring, lowest y breaking ties.
pub(crate) fn get_leftmost<T: Float>(nodes: &NodeArena<T>, start: NodeIndex) -> NodeIndex {
    let mut leftmost = start;
    let mut p = start;
    loop {
        let (node, best) = (&nodes[p], &nodes[leftmost]);
        if node.x < best.x || (node.x == best.x && node.y < best.y) {
            leftmost = p;
        }
        p = node.next;
        if p == start {
            return leftmost;
        }
    }
}

/// Splices the hole whose leftmost node is `hole` into the ring at `outer`.
///
/// Returns a node of the merged ring, or `outer` unchanged when no bridge is visible.
pub(crate) fn eliminate_hole<T: Float>(
    nodes: &mut NodeArena<T>,
    hole: NodeIndex,
    outer: NodeIndex,
) -> NodeIndex {
    let Some(bridge) = find_hole_bridge(nodes, hole, outer) else {
        return outer;
    };
    let bridge_reverse = nodes.split(bridge, hole);

    // drop collinear points the cut may have produced
    let end = nodes[bridge_reverse].next;
    filter_points(nodes, bridge_reverse, Some(end));
    let end = nodes[bridge].next;
    filter_points(nodes, bridge, Some(end))
}

/// David Eberly's search for an outer node visible from the hole's leftmost node.
///
/// A ray is cast from the hole point towards -x. The nearest outer segment it hits gives a
/// candidate endpoint. Reflex outer nodes inside the triangle formed by the hole point, the
/// hit and that endpoint may block it; the one with the smallest angle to the ray wins.
fn find_hole_bridge<T: Float>(
    nodes: &NodeArena<T>,
    hole: NodeIndex,
    outer: NodeIndex,
) -> Option<NodeIndex> {
    let h = nodes[hole];
    let (hx, hy) = (h.x, h.y);
    let mut qx = T::neg_infinity();
    let mut candidate = None;

    let mut p = outer;
    if equals(&h, &nodes[p]) {
        return Some(p);
    }
    loop {
        let node = &nodes[p];
        let next = &nodes[node.next];
        if equals(&h, next) {
            return Some(node.next);
        }
        if hy <= node.y && hy >= next.y && next.y != node.y {
            let x = node.x + (hy - node.y) * (next.x - node.x) / (next.y - node.y);
            if x <= hx && x > qx {
                qx = x;
                let endpoint = if node.x < next.x { p } else { node.next };
                if x == hx {
                    // hole touches the segment
                    return Some(endpoint);
                }
                candidate = Some(endpoint);
            }
        }
        p = node.next;
        if p == outer {
            break;
        }
    }

    let mut m = candidate?;
    let Node { x: mx, y: my, .. } = nodes[m];
    let (tri_a, tri_c) = if hy < my {
        ([hx, hy], [qx, hy])
    } else {
        ([qx, hy], [hx, hy])
    };
    let mut tan_min = T::infinity();

    let stop = m;
    p = m;
    loop {
        let node = &nodes[p];
        if hx >= node.x
            && node.x >= mx
            && hx != node.x
            && point_in_triangle(tri_a, [mx, my], tri_c, [node.x, node.y])
        {
            let tan = (hy - node.y).abs() / (hx - node.x);
            let best = &nodes[m];
            if locally_inside(nodes, p, hole)
                && (tan < tan_min
                    || (tan == tan_min
                        && (node.x > best.x
                            || (node.x == best.x && sector_contains_sector(nodes, m, p)))))
            {
                m = p;
                tan_min = tan;
            }
        }
        p = node.next;
        if p == stop {
            return Some(m);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(nodes: &mut NodeArena<f64>, first: u32, points: &[[f64; 2]]) -> NodeIndex {
        let mut last = None;
        for (k, &[x, y]) in points.iter().enumerate() {
            last = Some(nodes.insert(first + k as u32, x, y, last));
        }
        last.unwrap()
    }

    #[test]
    fn leftmost_prefers_lower_y_on_ties() {
        let mut nodes = NodeArena::new();
        let start = ring(&mut nodes, 0, &[[2., 2.], [1., 5.], [1., 1.], [4., 0.]]);
        assert_eq!(nodes[get_leftmost(&nodes, start)].i, 2);
    }

    #[test]
    fn bridge_connects_to_visible_outer_vertex() {
        let mut nodes = NodeArena::new();
        // outer counter-clockwise, hole clockwise
        let outer = ring(&mut nodes, 0, &[[0., 0.], [10., 0.], [10., 10.], [0., 10.]]);
        let hole = ring(&mut nodes, 4, &[[4., 4.], [4., 6.], [6., 6.], [6., 4.]]);
        let leftmost = get_leftmost(&nodes, hole);
        assert_eq!(nodes[leftmost].i, 4);

        let bridge = find_hole_bridge(&nodes, leftmost, outer).unwrap();
        assert_eq!(nodes[bridge].x, 0.);

        let merged = eliminate_hole(&mut nodes, leftmost, outer);
        let mut count = 0;
        let mut p = merged;
        loop {
            count += 1;
            p = nodes[p].next;
            if p == merged {
                break;
            }
        }
        // 4 outer + 4 hole + 2 bridge duplicates
        assert_eq!(count, 10);
    }
}
