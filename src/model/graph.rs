//! Schema-shaped record graph and its builder.
//!
//! The marshaller materializes one graph per record: a single product root,
//! entity nodes below it, attribute leaves below those. Node identifiers are
//! assigned in one pass when the builder freezes, so a graph's ids are dense
//! and deterministic for a given build order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::Value;

/// Dense node handle, valid only within its owning [`RecordGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// The product root, exactly one per graph.
    Root,
    /// An entity node, named after its schema entity.
    Entity,
    /// An attribute leaf carrying a value.
    Attribute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    /// Set on attribute leaves, [`Value::Null`] elsewhere.
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub parent: NodeId,
    pub child: NodeId,
}

/// A frozen record graph. Edges are parent-before-child in build order,
/// which makes a plain iteration a valid topological walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl RecordGraph {
    pub fn builder(root_name: impl Into<String>) -> GraphBuilder {
        GraphBuilder::new(root_name)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().filter(move |e| e.parent == id).map(|e| e.child)
    }

    /// Entity children of `id` with the given name.
    pub fn entities_named<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id).filter(move |&c| {
            self.nodes[c.index()].kind == NodeKind::Entity && self.nodes[c.index()].name == name
        })
    }

    /// Value of the attribute leaf named `field` directly under `id`.
    pub fn attribute(&self, id: NodeId, field: &str) -> Option<&Value> {
        self.children(id).find_map(|c| {
            let n = &self.nodes[c.index()];
            (n.kind == NodeKind::Attribute && n.name == field).then_some(&n.value)
        })
    }
}

// ============================================================================
// Builder
// ============================================================================

#[derive(Debug)]
struct PendingNode {
    kind: NodeKind,
    name: String,
    value: Value,
    children: SmallVec<[usize; 8]>,
}

/// Build-then-freeze constructor for [`RecordGraph`]. Nodes are staged in a
/// tree of pending slots; [`GraphBuilder::finish`] walks the tree depth-first
/// and assigns the final dense ids.
#[derive(Debug)]
pub struct GraphBuilder {
    slots: Vec<PendingNode>,
}

/// Handle to a staged node, valid only for the builder that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotId(usize);

impl GraphBuilder {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            slots: vec![PendingNode {
                kind: NodeKind::Root,
                name: root_name.into(),
                value: Value::Null,
                children: SmallVec::new(),
            }],
        }
    }

    pub fn root(&self) -> SlotId {
        SlotId(0)
    }

    pub fn add_entity(&mut self, parent: SlotId, name: impl Into<String>) -> SlotId {
        self.add(parent, NodeKind::Entity, name.into(), Value::Null)
    }

    pub fn add_attribute(
        &mut self,
        parent: SlotId,
        name: impl Into<String>,
        value: Value,
    ) -> SlotId {
        self.add(parent, NodeKind::Attribute, name.into(), value)
    }

    fn add(&mut self, parent: SlotId, kind: NodeKind, name: String, value: Value) -> SlotId {
        let id = SlotId(self.slots.len());
        self.slots.push(PendingNode { kind, name, value, children: SmallVec::new() });
        self.slots[parent.0].children.push(id.0);
        id
    }

    /// Drop a staged entity subtree. Used when an entity turns out to have
    /// no attributes and no surviving descendants.
    pub fn prune(&mut self, parent: SlotId, child: SlotId) {
        self.slots[parent.0].children.retain(|c| *c != child.0);
    }

    pub fn child_count(&self, slot: SlotId) -> usize {
        self.slots[slot.0].children.len()
    }

    /// Freeze into an immutable graph, assigning ids depth-first from the
    /// root so the output is stable for a given staging order.
    pub fn finish(self) -> RecordGraph {
        let mut nodes = Vec::with_capacity(self.slots.len());
        let mut edges = Vec::with_capacity(self.slots.len().saturating_sub(1));
        let mut assigned = vec![None::<NodeId>; self.slots.len()];
        let mut stack = vec![0usize];
        while let Some(slot) = stack.pop() {
            let id = NodeId(nodes.len() as u32);
            assigned[slot] = Some(id);
            let pending = &self.slots[slot];
            nodes.push(GraphNode {
                id,
                kind: pending.kind,
                name: pending.name.clone(),
                value: pending.value.clone(),
            });
            // Reverse so children freeze in staging order.
            for &child in pending.children.iter().rev() {
                stack.push(child);
            }
        }
        for (slot, pending) in self.slots.iter().enumerate() {
            if let Some(parent) = assigned[slot] {
                for &child in &pending.children {
                    if let Some(child) = assigned[child] {
                        edges.push(GraphEdge { parent, child });
                    }
                }
            }
        }
        edges.sort_unstable_by_key(|e| (e.parent, e.child));
        RecordGraph { nodes, edges }
    }
}
