//! Tree traversal over an [`Arena`], in the teacher's combined-visitor idiom:
//! one trait with a default no-op per node kind, plus a free `walk` function
//! callers invoke from inside their own override to recurse into children.

use super::{Arena, NodeId, NodeKind};

pub trait Visitor {
    /// Called for every node before its kind-specific `visit_*` method.
    /// Override this to observe the whole tree uniformly; override a
    /// specific `visit_*` to change traversal for just that kind.
    fn visit_any(&mut self, _arena: &Arena, _id: NodeId) {}

    fn visit_root(&mut self, arena: &Arena, id: NodeId) {
        walk(self, arena, id);
    }

    fn visit_element(&mut self, arena: &Arena, id: NodeId) {
        walk(self, arena, id);
    }

    fn visit_text(&mut self, _arena: &Arena, _id: NodeId) {}

    fn visit_style(&mut self, arena: &Arena, id: NodeId) {
        walk(self, arena, id);
    }

    fn visit_style_rule(&mut self, arena: &Arena, id: NodeId) {
        walk(self, arena, id);
    }

    fn visit_script(&mut self, _arena: &Arena, _id: NodeId) {}

    fn visit_template_decl(&mut self, arena: &Arena, id: NodeId) {
        walk(self, arena, id);
    }

    fn visit_origin(&mut self, _arena: &Arena, _id: NodeId) {}

    fn visit_import(&mut self, _arena: &Arena, _id: NodeId) {}

    fn visit_configuration_decl(&mut self, _arena: &Arena, _id: NodeId) {}

    fn visit_namespace(&mut self, arena: &Arena, id: NodeId) {
        walk(self, arena, id);
    }

    fn visit_delete(&mut self, _arena: &Arena, _id: NodeId) {}

    fn visit_insert(&mut self, arena: &Arena, id: NodeId) {
        walk(self, arena, id);
    }

    fn visit_index_access(&mut self, arena: &Arena, id: NodeId) {
        walk(self, arena, id);
    }

    fn visit_no_value_style(&mut self, _arena: &Arena, _id: NodeId) {}

    fn visit_inherit(&mut self, _arena: &Arena, _id: NodeId) {}

    fn visit_use(&mut self, _arena: &Arena, _id: NodeId) {}

    fn visit_except(&mut self, _arena: &Arena, _id: NodeId) {}

    fn visit_generator_comment(&mut self, _arena: &Arena, _id: NodeId) {}
}

/// Dispatches `id` to `visit_any`, then to the matching `visit_*` method.
pub fn dispatch<V: Visitor + ?Sized>(visitor: &mut V, arena: &Arena, id: NodeId) {
    visitor.visit_any(arena, id);
    match &arena.get(id).kind {
        NodeKind::Root => visitor.visit_root(arena, id),
        NodeKind::Element { .. } => visitor.visit_element(arena, id),
        NodeKind::Text { .. } => visitor.visit_text(arena, id),
        NodeKind::Style { .. } => visitor.visit_style(arena, id),
        NodeKind::StyleRule { .. } => visitor.visit_style_rule(arena, id),
        NodeKind::Script { .. } => visitor.visit_script(arena, id),
        NodeKind::TemplateDecl { .. } => visitor.visit_template_decl(arena, id),
        NodeKind::Origin { .. } => visitor.visit_origin(arena, id),
        NodeKind::Import { .. } => visitor.visit_import(arena, id),
        NodeKind::ConfigurationDecl { .. } => visitor.visit_configuration_decl(arena, id),
        NodeKind::Namespace { .. } => visitor.visit_namespace(arena, id),
        NodeKind::Delete { .. } => visitor.visit_delete(arena, id),
        NodeKind::Insert { .. } => visitor.visit_insert(arena, id),
        NodeKind::IndexAccess { .. } => visitor.visit_index_access(arena, id),
        NodeKind::NoValueStyle { .. } => visitor.visit_no_value_style(arena, id),
        NodeKind::Inherit(_) => visitor.visit_inherit(arena, id),
        NodeKind::Use { .. } => visitor.visit_use(arena, id),
        NodeKind::Except { .. } => visitor.visit_except(arena, id),
        NodeKind::GeneratorComment => visitor.visit_generator_comment(arena, id),
    }
}

/// Recurses into `id`'s children, dispatching each through `visitor`.
/// Call this from inside an override to get "visit this node, then its
/// subtree" behavior instead of replacing traversal entirely.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, arena: &Arena, id: NodeId) {
    for &child in &arena.get(id).children {
        dispatch(visitor, arena, child);
    }
}

/// Counts nodes of a given label in a subtree; mainly useful for tests.
pub struct NodeCounter {
    pub label: &'static str,
    pub count: usize,
}

impl Visitor for NodeCounter {
    fn visit_any(&mut self, arena: &Arena, id: NodeId) {
        if arena.get(id).kind.label() == self.label {
            self.count += 1;
        }
    }
}
