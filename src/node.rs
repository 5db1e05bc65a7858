use id_arena::Id;
use std::fmt::Debug;

use itertools::Itertools;

use crate::{
    edge::EdgeId,
    geometry::{GeometricId, Geometry},
    point::IntPoint,
};

pub type NodeId = Id<Node>;
impl GeometricId for NodeId {
    type Item = Node;

    #[inline]
    fn get(self, geometry: &Geometry) -> &Node {
        &geometry[self]
    }
}

/// A point shared by every edge which starts or ends there.
#[derive(Clone)]
pub struct Node {
    pub id: NodeId,
    pub point: IntPoint,
    out_edges: Vec<EdgeId>,
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Node[{}]({}->out({}))",
            self.id.index(),
            self.point,
            self.out_edges.iter().map(|e| e.index()).join(",")
        )
    }
}

impl Node {
    pub fn new(point: IntPoint, id: NodeId) -> Self {
        Self {
            id,
            point,
            out_edges: Vec::new(),
        }
    }

    #[inline]
    pub fn add_out_edge(&mut self, out: EdgeId) {
        debug_assert!(!self.out_edges.contains(&out));
        self.out_edges.push(out);
    }

    #[inline]
    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }
}
