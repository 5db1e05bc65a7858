use std::fmt::Debug;

use id_arena::Id;

use crate::{
    geometry::{GeometricId, Geometry, Origin},
    line::IntLine,
    node::{Node, NodeId},
};

pub type EdgeId = Id<Edge>;
impl GeometricId for EdgeId {
    type Item = Edge;

    #[inline]
    fn get(self, geometry: &Geometry) -> &Edge {
        &geometry[self]
    }
}

/// An edge from source to target, remembering which operand it came from.
#[derive(Clone, Copy)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub origin: Origin,
    used: bool,
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Edge[{}](src({})->tgt({}), {:?}{})",
            self.id.index(),
            self.source.index(),
            self.target.index(),
            self.origin,
            if self.used { ", used" } else { "" }
        )
    }
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, origin: Origin) -> Self {
        Self {
            id,
            source,
            target,
            origin,
            used: false,
        }
    }

    #[inline]
    pub fn is_used(&self) -> bool {
        self.used
    }

    #[inline]
    pub fn mark_used(&mut self) {
        debug_assert!(!self.used);
        self.used = true;
    }

    #[inline]
    pub fn source<'a>(&self, geometry: &'a Geometry) -> &'a Node {
        &geometry[self.source]
    }

    #[inline]
    pub fn target<'a>(&self, geometry: &'a Geometry) -> &'a Node {
        &geometry[self.target]
    }

    #[inline]
    pub fn to_line(&self, geometry: &Geometry) -> IntLine {
        IntLine::new(self.source(geometry).point, self.target(geometry).point)
    }
}
