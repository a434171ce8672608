//! The AST node model (spec §3.3): a typed, ownership-clear tree.
//!
//! Nodes live in an [`Arena`] and refer to each other by [`NodeId`] — a plain
//! copyable index, never a pointer. This realizes the design note "tree
//! ownership is exclusive; parent links are non-owning" directly: a child's
//! `NodeId` inside its parent's `children` vector is the one owning edge (the
//! arena frees all nodes together at the end of a compilation), while a
//! node's own `parent: Option<NodeId>` field is a non-owning back-reference
//! that can never dangle, because it is just an index, not a live pointer.

mod node;
mod visitor;

pub use node::*;
pub use visitor::*;

use crate::parse_util::ParseSourceSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Owns every node allocated while parsing and resolving one file.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn new() -> Self {
        Arena::default()
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    pub fn try_get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append `child` to `parent`'s children and set the child's back-reference.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.get_mut(child).parent = Some(parent);
        self.get_mut(parent).children.push(child);
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: ParseSourceSpan,
    pub name: String,
    pub content: String,
    pub attributes: indexmap::IndexMap<String, String>,
    pub metadata: indexmap::IndexMap<String, String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind, span: ParseSourceSpan) -> Self {
        Node {
            kind,
            span,
            name: String::new(),
            content: String::new(),
            attributes: indexmap::IndexMap::new(),
            metadata: indexmap::IndexMap::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
