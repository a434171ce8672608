//! Constraint engine (spec §4.8): `except` statements register disallow
//! rules scoped to the enclosing element or namespace, inclusive of
//! descendants. This module is the only pass that currently enforces them:
//! it walks the fully resolved tree post-parse, pushing each scope's own
//! `except` targets onto a local stack and popping them back off on the way
//! out, so inherited elements and index-access insertions — content
//! inheritance and selector automation introduce after parsing — are
//! constrained too, not just what the parser itself saw. `state.rs`'s
//! `ConstraintRule`/`is_blocked` model a parse-time rejection stack per spec
//! §4.2 but nothing in `parser/mod.rs` populates or consults it yet; that
//! half of spec §4.8 is not implemented. Grounded on `CHTLState.cpp`'s
//! `ConstraintRule` stack.

use crate::ast::{Arena, ExceptTarget, NodeId, NodeKind, OriginTypeTag};
use crate::diagnostics::{Diagnostic, DiagnosticSink, SemanticError};

/// Runs the constraint post-pass over `root`'s subtree, reporting every
/// construct forbidden by a governing `except` statement.
pub fn validate(arena: &Arena, root: NodeId, sink: &mut DiagnosticSink) {
    let mut active: Vec<ExceptTarget> = Vec::new();
    walk(arena, root, &mut active, sink);
}

fn walk(arena: &Arena, id: NodeId, active: &mut Vec<ExceptTarget>, sink: &mut DiagnosticSink) {
    let mark = active.len();
    active.extend(own_except_targets(arena, id));

    for &child in &arena.get(id).children {
        check_node(arena, child, active, sink);
        walk(arena, child, active, sink);
    }

    active.truncate(mark);
}

/// Collects the targets of every `except` statement declared directly
/// inside `id`'s body (not nested scopes — those collect their own).
fn own_except_targets(arena: &Arena, id: NodeId) -> Vec<ExceptTarget> {
    arena
        .get(id)
        .children
        .iter()
        .filter_map(|&child| match &arena.get(child).kind {
            NodeKind::Except { targets } => Some(targets.clone()),
            _ => None,
        })
        .flatten()
        .collect()
}

fn is_globally_blocked(active: &[ExceptTarget]) -> bool {
    active.iter().any(|t| matches!(t, ExceptTarget::Global))
}

fn blocks_element(active: &[ExceptTarget], tag: &str) -> bool {
    is_globally_blocked(active) || active.iter().any(|t| matches!(t, ExceptTarget::ElementName(n) if n == tag))
}

fn blocks_type(active: &[ExceptTarget], type_tag: &str) -> bool {
    is_globally_blocked(active) || active.iter().any(|t| matches!(t, ExceptTarget::Type(tt) if tt == type_tag))
}

fn blocks_symbol(active: &[ExceptTarget], type_tag: &str, name: &str) -> bool {
    is_globally_blocked(active)
        || active.iter().any(|t| matches!(t, ExceptTarget::Symbol { type_tag: tt, name: n } if tt == type_tag && n == name))
}

fn origin_type_label(type_tag: &OriginTypeTag) -> &str {
    match type_tag {
        OriginTypeTag::Html => "Html",
        OriginTypeTag::Style => "Style",
        OriginTypeTag::JavaScript => "JavaScript",
        OriginTypeTag::Custom(name) => name,
    }
}

fn check_node(arena: &Arena, id: NodeId, active: &[ExceptTarget], sink: &mut DiagnosticSink) {
    let node = arena.get(id);
    match &node.kind {
        NodeKind::Element { tag, .. } => {
            if blocks_element(active, tag) {
                report(sink, node, format!("element `{tag}`"));
            }
        }
        NodeKind::TemplateDecl { is_custom, variety, .. } => {
            let kind_label = if *is_custom { "Custom" } else { "Template" };
            let type_tag = variety.at_type();
            if blocks_type(active, type_tag) || blocks_symbol(active, type_tag, &node.name) {
                report(sink, node, format!("[{kind_label}] @{type_tag} {}", node.name));
            }
        }
        NodeKind::Origin { type_tag, .. } => {
            let label = origin_type_label(type_tag);
            if blocks_type(active, label) {
                report(sink, node, format!("[Origin] @{label}"));
            }
        }
        _ => {}
    }
}

fn report(sink: &mut DiagnosticSink, node: &crate::ast::Node, construct: String) {
    sink.push(Diagnostic::error(
        SemanticError::ConstraintViolation { construct, reason: "forbidden by an enclosing `except` statement".to_string() },
        node.span.clone(),
    ));
}
