//! The inheritance / specialization engine (spec §4.6): for every Template or
//! Custom declaration, merges each parent's already-resolved property map (or
//! child list) in declaration order, overlays the node's own content, then
//! applies its `delete`/`insert`/index-access specializations. Runs after
//! symbol collection and import resolution, so every `inherit` reference can
//! be looked up in the populated [`GlobalMap`].
//!
//! Grounded on `InheritanceManager.h`'s node/property-table split, translated
//! here into one [`EffectiveNode`] per declaration keyed by its arena
//! [`NodeId`] rather than by name in a side table, since the declaration's
//! own content already lives in the arena.

use indexmap::IndexMap;

use crate::ast::{Arena, DeleteTarget, InsertPosition, NodeId, NodeKind, ParentRef, TargetSelector};
use crate::diagnostics::{Diagnostic, DiagnosticSink, SemanticError};
use crate::registry::GlobalMap;
use crate::symbol::SymbolKind;

/// One property's resolved value, the declaration it came from, and a
/// monotonically increasing precedence used to break merge-order ties (spec
/// §4.6 step 4: "later parent wins over earlier; node's own wins over any
/// parent").
#[derive(Debug, Clone)]
pub struct PropertyInfo {
    /// `None` for a [`NoValueStyle`](NodeKind::NoValueStyle) entry that has
    /// not yet been supplied a value by a consumer.
    pub value: Option<String>,
    pub origin: String,
    pub precedence: usize,
}

#[derive(Debug, Clone, Default)]
pub struct EffectiveNode {
    pub properties: IndexMap<String, PropertyInfo>,
    /// Resolved child elements, in order, for `@Element` groups. Empty for
    /// `@Style`/`@Var` groups.
    pub children: Vec<NodeId>,
}

struct ResolvedParent {
    node_id: NodeId,
    /// Set when a `delete @Type Name;` / `delete [Template|Custom] @Type
    /// Name;` specialization on this node names this exact parent.
    excluded: bool,
}

struct DeclInfo {
    qualified_name: String,
    specializations: Vec<NodeId>,
    resolved_parents: Vec<ResolvedParent>,
}

/// Resolves every Template/Custom declaration reachable through `global` into
/// an [`EffectiveNode`], applying specializations along the way. Index-access
/// specializations (`tag[N] { body }`) mutate `arena` directly, attaching
/// their payload as extra children of the target.
pub fn resolve_all(arena: &mut Arena, global: &GlobalMap, sink: &mut DiagnosticSink) -> IndexMap<NodeId, EffectiveNode> {
    let decls = collect_decls(arena, global, sink);
    let order = topological_order(&decls, sink);

    let mut effective: IndexMap<NodeId, EffectiveNode> = IndexMap::new();
    for node_id in order {
        let node = build_effective_node(node_id, arena, &decls, &effective, sink);
        effective.insert(node_id, node);
    }
    effective
}

fn is_template_kind(kind: SymbolKind) -> bool {
    matches!(
        kind,
        SymbolKind::TemplateStyle
            | SymbolKind::TemplateElement
            | SymbolKind::TemplateVar
            | SymbolKind::CustomStyle
            | SymbolKind::CustomElement
            | SymbolKind::CustomVar
    )
}

fn variety_kinds(type_tag: &str) -> [SymbolKind; 2] {
    match type_tag {
        "Element" => [SymbolKind::TemplateElement, SymbolKind::CustomElement],
        "Var" => [SymbolKind::TemplateVar, SymbolKind::CustomVar],
        _ => [SymbolKind::TemplateStyle, SymbolKind::CustomStyle],
    }
}

/// Resolves one `inherit @Type Name;` reference to the declaring node, per
/// the spec §4.4 lookup order, filtered to symbol kinds matching `type_tag`.
fn resolve_parent_ref(parent: &ParentRef, namespace: &str, global: &GlobalMap, sink: &mut DiagnosticSink) -> Option<NodeId> {
    let candidates: Vec<_> =
        global.lookup_all(&parent.name, namespace).into_iter().filter(|s| variety_kinds(&parent.type_tag).contains(&s.kind)).collect();
    match candidates.len() {
        0 => {
            sink.push(Diagnostic::error_without_span(SemanticError::UnresolvedInheritance(parent.name.clone())));
            None
        }
        1 => candidates[0].node,
        _ => {
            sink.push(Diagnostic::error_without_span(SemanticError::AmbiguousSymbol(parent.name.clone())));
            candidates[0].node
        }
    }
}

fn excludes_parent(specializations: &[NodeId], arena: &Arena, parent_is_custom: bool, parent_type_tag: &str, parent_name: &str) -> bool {
    specializations.iter().any(|&id| match &arena.get(id).kind {
        NodeKind::Delete { target: DeleteTarget::Inheritance { type_tag, name } } => type_tag == parent_type_tag && name == parent_name,
        NodeKind::Delete { target: DeleteTarget::QualifiedTemplate { is_custom, type_tag, name } } => {
            *is_custom == parent_is_custom && type_tag == parent_type_tag && name == parent_name
        }
        _ => false,
    })
}

fn collect_decls(arena: &Arena, global: &GlobalMap, sink: &mut DiagnosticSink) -> IndexMap<NodeId, DeclInfo> {
    let mut decls = IndexMap::new();
    for symbol in global.symbols() {
        if !is_template_kind(symbol.kind) || symbol.is_imported {
            continue;
        }
        let Some(node_id) = symbol.node else { continue };
        let NodeKind::TemplateDecl { parents, specializations, .. } = &arena.get(node_id).kind else { continue };

        let mut resolved_parents = Vec::with_capacity(parents.len());
        for parent in parents {
            let Some(parent_id) = resolve_parent_ref(parent, &symbol.namespace_path, global, sink) else { continue };
            let parent_is_custom = matches!(&arena.get(parent_id).kind, NodeKind::TemplateDecl { is_custom: true, .. });
            let excluded = excludes_parent(specializations, arena, parent_is_custom, &parent.type_tag, &parent.name);
            resolved_parents.push(ResolvedParent { node_id: parent_id, excluded });
        }

        decls.insert(
            node_id,
            DeclInfo { qualified_name: symbol.qualified_name(), specializations: specializations.clone(), resolved_parents },
        );
    }
    decls
}

/// Post-order DFS over the parent graph (spec §4.6 step 1). A back-edge
/// (a parent already on the current path) is a cycle: it is reported and
/// simply not recursed into, so the offending node still resolves using its
/// other, non-circular parents.
fn topological_order(decls: &IndexMap<NodeId, DeclInfo>, sink: &mut DiagnosticSink) -> Vec<NodeId> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        White,
        Gray,
        Black,
    }

    fn visit(
        id: NodeId,
        decls: &IndexMap<NodeId, DeclInfo>,
        marks: &mut IndexMap<NodeId, Mark>,
        order: &mut Vec<NodeId>,
        sink: &mut DiagnosticSink,
    ) {
        match marks.get(&id).copied().unwrap_or(Mark::White) {
            Mark::Black => return,
            Mark::Gray => {
                if let Some(decl) = decls.get(&id) {
                    sink.push(Diagnostic::error_without_span(SemanticError::UnresolvedInheritance(decl.qualified_name.clone())));
                }
                return;
            }
            Mark::White => {}
        }
        marks.insert(id, Mark::Gray);
        if let Some(decl) = decls.get(&id) {
            for parent in &decl.resolved_parents {
                if !parent.excluded {
                    visit(parent.node_id, decls, marks, order, sink);
                }
            }
        }
        marks.insert(id, Mark::Black);
        order.push(id);
    }

    let mut marks: IndexMap<NodeId, Mark> = IndexMap::new();
    let mut order = Vec::with_capacity(decls.len());
    for &id in decls.keys() {
        visit(id, decls, &mut marks, &mut order, sink);
    }
    order
}

fn own_properties(node_id: NodeId, arena: &Arena, qualified_name: &str, precedence: &mut usize) -> IndexMap<String, PropertyInfo> {
    let node = arena.get(node_id);
    let mut properties = IndexMap::new();
    for (key, value) in &node.attributes {
        *precedence += 1;
        properties.insert(key.clone(), PropertyInfo { value: Some(value.clone()), origin: qualified_name.to_string(), precedence: *precedence });
    }
    for &child_id in &node.children {
        if let NodeKind::NoValueStyle { properties: names } = &arena.get(child_id).kind {
            for name in names {
                *precedence += 1;
                properties
                    .entry(name.clone())
                    .or_insert(PropertyInfo { value: None, origin: qualified_name.to_string(), precedence: *precedence });
            }
        }
    }
    properties
}

fn own_children(node_id: NodeId, arena: &Arena) -> Vec<NodeId> {
    arena.get(node_id).children.iter().copied().filter(|&id| matches!(arena.get(id).kind, NodeKind::Element { .. })).collect()
}

fn tag_of(id: NodeId, arena: &Arena) -> &str {
    &arena.get(id).name
}

fn find_nth(children: &[NodeId], tag: &str, index: Option<usize>, arena: &Arena) -> Option<usize> {
    let mut seen = 0usize;
    for (pos, &id) in children.iter().enumerate() {
        if tag_of(id, arena) == tag {
            match index {
                Some(n) if seen == n => return Some(pos),
                None => return Some(pos),
                _ => {}
            }
            seen += 1;
        }
    }
    None
}

fn build_effective_node(
    node_id: NodeId,
    arena: &mut Arena,
    decls: &IndexMap<NodeId, DeclInfo>,
    effective: &IndexMap<NodeId, EffectiveNode>,
    sink: &mut DiagnosticSink,
) -> EffectiveNode {
    let Some(decl) = decls.get(&node_id) else { return EffectiveNode::default() };
    let mut result = EffectiveNode::default();
    let mut precedence = 0usize;

    for parent in &decl.resolved_parents {
        if parent.excluded {
            continue;
        }
        if let Some(parent_effective) = effective.get(&parent.node_id) {
            for (key, info) in &parent_effective.properties {
                precedence += 1;
                result.properties.insert(key.clone(), PropertyInfo { precedence, ..info.clone() });
            }
            result.children.extend(parent_effective.children.iter().copied());
        }
    }

    for (key, info) in own_properties(node_id, arena, &decl.qualified_name, &mut precedence) {
        result.properties.insert(key, info);
    }
    result.children.extend(own_children(node_id, arena));

    for &spec_id in &decl.specializations {
        apply_specialization(spec_id, arena, &mut result, sink);
    }

    result
}

fn apply_specialization(spec_id: NodeId, arena: &mut Arena, result: &mut EffectiveNode, sink: &mut DiagnosticSink) {
    let kind = arena.get(spec_id).kind.clone();
    match kind {
        NodeKind::Delete { target: DeleteTarget::Properties(names) } => {
            for name in names {
                result.properties.shift_remove(&name);
            }
        }
        NodeKind::Delete { target: DeleteTarget::Element { tag, index } } => {
            if let Some(pos) = find_nth(&result.children, &tag, index, arena) {
                result.children.remove(pos);
            }
        }
        // `delete @Type Name;` / `delete [Template|Custom] @Type Name;` were
        // already applied during the inheritance merge (the parent's
        // contribution was simply never folded in).
        NodeKind::Delete { target: DeleteTarget::Inheritance { .. } | DeleteTarget::QualifiedTemplate { .. } } => {}
        NodeKind::Insert { position, target, payload } => {
            apply_insert(position, target.as_ref(), &payload, arena, result);
        }
        NodeKind::IndexAccess { tag, index, payload } => {
            if let Some(pos) = find_nth(&result.children, &tag, Some(index), arena) {
                let target_id = result.children[pos];
                for &child in &payload {
                    arena.attach(target_id, child);
                }
            } else {
                let count = result.children.iter().filter(|&&id| tag_of(id, arena) == tag).count();
                sink.push(Diagnostic::error_without_span(SemanticError::IndexOutOfRange { tag, index, count }));
            }
        }
        _ => {}
    }
}

fn apply_insert(position: InsertPosition, target: Option<&TargetSelector>, payload: &[NodeId], arena: &Arena, result: &mut EffectiveNode) {
    match position {
        InsertPosition::AtTop => {
            for (offset, &id) in payload.iter().enumerate() {
                result.children.insert(offset, id);
            }
        }
        InsertPosition::AtBottom => {
            result.children.extend(payload.iter().copied());
        }
        InsertPosition::After | InsertPosition::Before | InsertPosition::Replace => {
            let Some(target) = target else { return };
            let Some(pos) = find_nth(&result.children, &target.tag, target.index, arena) else { return };
            match position {
                InsertPosition::After => {
                    for (offset, &id) in payload.iter().enumerate() {
                        result.children.insert(pos + 1 + offset, id);
                    }
                }
                InsertPosition::Before => {
                    for (offset, &id) in payload.iter().enumerate() {
                        result.children.insert(pos + offset, id);
                    }
                }
                InsertPosition::Replace => {
                    result.children.remove(pos);
                    for (offset, &id) in payload.iter().enumerate() {
                        result.children.insert(pos + offset, id);
                    }
                }
                InsertPosition::AtTop | InsertPosition::AtBottom => unreachable!(),
            }
        }
    }
}
