use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use id_arena::Arena;

use crate::{
    edge::{Edge, EdgeId},
    node::{Node, NodeId},
    point::IntPoint,
};

/// Ids which resolve to an item stored in a [`Geometry`].
pub trait GeometricId: Copy {
    type Item;

    fn get(self, geometry: &Geometry) -> &Self::Item;
}

/// Which boolean operand an edge was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    A,
    B,
}

/// A directed graph of edges between points. Each point has at most one
/// node, so edges from both operands meet wherever they share a point.
#[derive(Default)]
pub struct Geometry {
    nodes: Arena<Node>,
    edges: Arena<Edge>,
    lookup: HashMap<IntPoint, NodeId>,
}

impl Index<NodeId> for Geometry {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

impl Index<EdgeId> for Geometry {
    type Output = Edge;

    #[inline]
    fn index(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }
}

impl IndexMut<EdgeId> for Geometry {
    #[inline]
    fn index_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id]
    }
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node at `point`, created if there is none yet.
    pub fn node_at(&mut self, point: IntPoint) -> NodeId {
        if let Some(&id) = self.lookup.get(&point) {
            return id;
        }
        let id = self.nodes.alloc_with_id(|id| Node::new(point, id));
        self.lookup.insert(point, id);
        id
    }

    #[inline]
    pub fn find_node(&self, point: IntPoint) -> Option<NodeId> {
        self.lookup.get(&point).copied()
    }

    pub fn new_edge(
        &mut self,
        source: IntPoint,
        target: IntPoint,
        origin: Origin,
    ) -> EdgeId {
        let (s, t) = (self.node_at(source), self.node_at(target));
        let id = self.edges.alloc_with_id(|id| Edge::new(id, s, t, origin));
        self.nodes[s].add_out_edge(id);
        id
    }

    #[inline]
    pub fn len_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn len_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().map(|(_, e)| e)
    }

    /// Outgoing edges of `node` not yet walked.
    pub fn unused_out_edges(
        &self,
        node: NodeId,
    ) -> impl Iterator<Item = EdgeId> + '_ {
        self.nodes[node]
            .out_edges()
            .iter()
            .copied()
            .filter(|&e| !self.edges[e].is_used())
    }

    #[inline]
    pub fn point(&self, node: NodeId) -> IntPoint {
        self.nodes[node].point
    }
}
