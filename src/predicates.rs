//! Orientation and visibility tests shared by ring construction, hole bridging and clipping.
//!
//! `area` follows the ring convention used throughout the engine: it is negative for a
//! counter-clockwise (y-up) turn, so convex corners of the outer ring have negative area.

use num_traits::float::Float;

use crate::arena::{Node, NodeArena, NodeIndex};

/// Twice the signed area of triangle `pqr`, negative for a counter-clockwise turn.
#[inline]
pub(crate) fn area<T: Float>(p: &Node<T>, q: &Node<T>, r: &Node<T>) -> T {
    (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)
}

#[inline]
pub(crate) fn equals<T: Float>(p: &Node<T>, q: &Node<T>) -> bool {
    p.x == q.x && p.y == q.y
}

/// Whether `p` lies inside or on triangle `abc` (given in ring order).
#[inline]
pub(crate) fn point_in_triangle<T: Float>(a: [T; 2], b: [T; 2], c: [T; 2], p: [T; 2]) -> bool {
    let [px, py] = p;
    (c[0] - px) * (a[1] - py) >= (a[0] - px) * (c[1] - py)
        && (a[0] - px) * (b[1] - py) >= (b[0] - px) * (a[1] - py)
        && (b[0] - px) * (c[1] - py) >= (c[0] - px) * (b[1] - py)
}

/// Twice the shoelace sum of a ring slice; positive when the ring is counter-clockwise (y-up).
pub(crate) fn ring_area_x2<T: Float>(ring: &[[T; 2]]) -> T {
    let Some(&[mut bx, mut by]) = ring.last() else {
        return T::zero();
    };
    let mut sum = T::zero();
    for &[ax, ay] in ring {
        sum = sum + (bx - ax) * (ay + by);
        (bx, by) = (ax, ay);
    }
    sum
}

fn sign<T: Float>(v: T) -> i8 {
    (v > T::zero()) as i8 - (v < T::zero()) as i8
}

/// For collinear `p`, `q`, `r`: whether `q` lies on segment `pr`.
fn on_segment<T: Float>(p: &Node<T>, q: &Node<T>, r: &Node<T>) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether segments `p1q1` and `p2q2` intersect, touching included.
pub(crate) fn intersects<T: Float>(p1: &Node<T>, q1: &Node<T>, p2: &Node<T>, q2: &Node<T>) -> bool {
    let o1 = sign(area(p1, q1, p2));
    let o2 = sign(area(p1, q1, q2));
    let o3 = sign(area(p2, q2, p1));
    let o4 = sign(area(p2, q2, q1));

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && on_segment(p1, p2, q1))
        || (o2 == 0 && on_segment(p1, q2, q1))
        || (o3 == 0 && on_segment(p2, p1, q2))
        || (o4 == 0 && on_segment(p2, q1, q2))
}

/// Whether diagonal `ab` leaves `a` into the ring's interior.
pub(crate) fn locally_inside<T: Float>(nodes: &NodeArena<T>, a: NodeIndex, b: NodeIndex) -> bool {
    let (a_node, b_node) = (&nodes[a], &nodes[b]);
    let prev = &nodes[a_node.prev];
    let next = &nodes[a_node.next];
    if area(prev, a_node, next) < T::zero() {
        area(a_node, b_node, next) >= T::zero() && area(a_node, prev, b_node) >= T::zero()
    } else {
        area(a_node, b_node, prev) < T::zero() || area(a_node, next, b_node) < T::zero()
    }
}

/// Even-odd test of the midpoint of diagonal `ab` against the ring containing `a`.
pub(crate) fn middle_inside<T: Float>(nodes: &NodeArena<T>, a: NodeIndex, b: NodeIndex) -> bool {
    let two = T::one() + T::one();
    let px = (nodes[a].x + nodes[b].x) / two;
    let py = (nodes[a].y + nodes[b].y) / two;

    let mut inside = false;
    let mut p = a;
    loop {
        let node = &nodes[p];
        let next = &nodes[node.next];
        if (node.y > py) != (next.y > py)
            && next.y != node.y
            && px < (next.x - node.x) * (py - node.y) / (next.y - node.y) + node.x
        {
            inside = !inside;
        }
        p = node.next;
        if p == a {
            return inside;
        }
    }
}

/// Whether diagonal `ab` crosses any ring edge not incident to `a` or `b`.
pub(crate) fn intersects_polygon<T: Float>(
    nodes: &NodeArena<T>,
    a: NodeIndex,
    b: NodeIndex,
) -> bool {
    let (a_node, b_node) = (&nodes[a], &nodes[b]);
    let mut p = a;
    loop {
        let node = &nodes[p];
        let next = &nodes[node.next];
        if node.i != a_node.i
            && next.i != a_node.i
            && node.i != b_node.i
            && next.i != b_node.i
            && intersects(node, next, a_node, b_node)
        {
            return true;
        }
        p = node.next;
        if p == a {
            return false;
        }
    }
}

/// Whether `ab` is a diagonal that can split the ring into two valid rings.
pub(crate) fn is_valid_diagonal<T: Float>(
    nodes: &NodeArena<T>,
    a: NodeIndex,
    b: NodeIndex,
) -> bool {
    let (a_node, b_node) = (&nodes[a], &nodes[b]);
    let (a_prev, a_next) = (&nodes[a_node.prev], &nodes[a_node.next]);
    let (b_prev, b_next) = (&nodes[b_node.prev], &nodes[b_node.next]);

    if a_next.i == b_node.i || a_prev.i == b_node.i || intersects_polygon(nodes, a, b) {
        return false;
    }

    let visible = locally_inside(nodes, a, b)
        && locally_inside(nodes, b, a)
        && middle_inside(nodes, a, b)
        // no opposite-facing sectors
        && (area(a_prev, a_node, b_prev) != T::zero() || area(a_node, b_prev, b_node) != T::zero());

    // coincident endpoints joining two convex corners
    let zero_length = equals(a_node, b_node)
        && area(a_prev, a_node, a_next) > T::zero()
        && area(b_prev, b_node, b_next) > T::zero();

    visible || zero_length
}

/// Whether the sector at `m` contains the sector at `p`, both sharing the same position.
pub(crate) fn sector_contains_sector<T: Float>(
    nodes: &NodeArena<T>,
    m: NodeIndex,
    p: NodeIndex,
) -> bool {
    let (m_node, p_node) = (&nodes[m], &nodes[p]);
    area(&nodes[m_node.prev], m_node, &nodes[p_node.prev]) < T::zero()
        && area(&nodes[p_node.next], m_node, &nodes[m_node.next]) < T::zero()
}
