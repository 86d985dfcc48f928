use alloc::vec::Vec;
use core::num::NonZeroU32;
use core::ops::{Index, IndexMut};
use num_traits::float::Float;

/// Slot of a node in a [`NodeArena`]. Slot zero is the sentinel, so `Option<NodeIndex>` stays 4 bytes.
pub(crate) type NodeIndex = NonZeroU32;

/// Largest vertex count the arena accepts; bridges and splits append up to two nodes per vertex.
pub(crate) const MAX_VERTICES: usize = (u32::MAX / 4) as usize;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Node<T> {
    /// vertex index in the caller's buffer
    pub i: u32,
    /// z-order key, zero until the ring is indexed
    pub z: i32,
    pub x: T,
    pub y: T,
    pub prev: NodeIndex,
    pub next: NodeIndex,
    pub prev_z: Option<NodeIndex>,
    pub next_z: Option<NodeIndex>,
    /// survives point filtering even when collinear or duplicated
    pub steiner: bool,
}

impl<T: Float> Node<T> {
    fn new(i: u32, x: T, y: T) -> Self {
        Self {
            i,
            z: 0,
            x,
            y,
            prev: NodeIndex::MIN,
            next: NodeIndex::MIN,
            prev_z: None,
            next_z: None,
            steiner: false,
        }
    }
}

/// Append-only pool of ring nodes, reset at the start of every triangulation.
///
/// Removing a node only unlinks it; its slot is reclaimed by the next [`NodeArena::reset`].
pub(crate) struct NodeArena<T> {
    nodes: Vec<Node<T>>,
}

impl<T: Float> NodeArena<T> {
    pub fn new() -> Self {
        let mut arena = Self { nodes: Vec::new() };
        arena.reset(0);
        arena
    }

    pub fn reset(&mut self, capacity: usize) {
        self.nodes.clear();
        self.nodes.reserve(capacity + 1);
        self.nodes
            .push(Node::new(0, T::infinity(), T::infinity()));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    fn push(&mut self, node: Node<T>) -> NodeIndex {
        debug_assert!(!self.nodes.is_empty());
        let slot = NodeIndex::MIN.saturating_add(self.nodes.len() as u32 - 1);
        self.nodes.push(node);
        slot
    }

    /// Creates a node and links it after `last` in a circular ring, or as a ring of one.
    pub fn insert(&mut self, i: u32, x: T, y: T, last: Option<NodeIndex>) -> NodeIndex {
        let mut node = Node::new(i, x, y);
        let slot = self.push(node);
        match last {
            Some(last) => {
                let after = self[last].next;
                node.prev = last;
                node.next = after;
                self[last].next = slot;
                self[after].prev = slot;
            }
            None => {
                node.prev = slot;
                node.next = slot;
            }
        }
        self[slot].prev = node.prev;
        self[slot].next = node.next;
        slot
    }

    /// Unlinks a node from its ring and z-chain, returning its former `(prev, next)`.
    pub fn remove(&mut self, p: NodeIndex) -> (NodeIndex, NodeIndex) {
        let Node {
            prev,
            next,
            prev_z,
            next_z,
            ..
        } = self[p];

        self[next].prev = prev;
        self[prev].next = next;

        if let Some(pz) = prev_z {
            self[pz].next_z = next_z;
        }
        if let Some(nz) = next_z {
            self[nz].prev_z = prev_z;
        }
        (prev, next)
    }

    /// Connects `a` and `b` with a two-way bridge.
    ///
    /// Within one ring this splits it in two; between the outer ring and a hole it merges them.
    /// Returns the duplicate of `b`, which sits on the ring that does not contain `a`.
    pub fn split(&mut self, a: NodeIndex, b: NodeIndex) -> NodeIndex {
        let Node { i, x, y, .. } = self[a];
        let a2 = self.push(Node::new(i, x, y));
        let Node { i, x, y, .. } = self[b];
        let b2 = self.push(Node::new(i, x, y));

        let a_next = self[a].next;
        let b_prev = self[b].prev;

        self[a].next = b;
        self[b].prev = a;

        self[a2].next = a_next;
        self[a_next].prev = a2;

        self[a2].prev = b2;
        self[b2].next = a2;

        self[b2].prev = b_prev;
        self[b_prev].next = b2;

        b2
    }
}

impl<T> Index<NodeIndex> for NodeArena<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, slot: NodeIndex) -> &Node<T> {
        &self.nodes[slot.get() as usize]
    }
}

impl<T> IndexMut<NodeIndex> for NodeArena<T> {
    #[inline]
    fn index_mut(&mut self, slot: NodeIndex) -> &mut Node<T> {
        &mut self.nodes[slot.get() as usize]
    }
}
