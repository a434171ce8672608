//! The compilation driver (spec §3.1 pipeline, §4.5 cross-file resolution):
//! owns the per-run [`GlobalMap`] and wires lexer → parser → symbol
//! collection → import resolution → inheritance → selector automation →
//! constraint validation. Grounded loosely on the teacher's `compiler.rs`
//! facade module (a thin orchestration surface re-exporting the real
//! pipeline stages) and on `CHTLManage/CompileManager.h`'s single entry
//! point driving one shared global map across a file and everything it
//! imports.
//!
//! Every parsed file owns its own [`Arena`]; [`NodeId`]s are bare indices
//! with no arena identity, so a declaration imported from another file is
//! *grafted* — deep-copied with its internal `NodeId`s remapped — into the
//! importing file's arena before symbols are collected for it. That keeps
//! every [`Symbol::node`](crate::symbol::Symbol::node) registered by
//! [`collect_symbols`] pointing into the one arena [`inheritance::resolve_all`]
//! actually walks.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use indexmap::IndexMap;
use rayon::prelude::*;

use crate::ast::{Arena, ImportKind, Node, NodeId, NodeKind};
use crate::config::Configuration;
use crate::constraint;
use crate::diagnostics::{DiagnosticSink, ResolutionError};
use crate::import_resolver::{self, SearchConfig};
use crate::inheritance::{self, EffectiveNode};
use crate::parser::parse_source;
use crate::registry::{self, GlobalMap};
use crate::selector_automation;

/// Everything one `compile_*` call produces: the resolved tree (now
/// including every imported declaration it transitively grafted in), the
/// populated global map, the inheritance side-table, and whatever
/// diagnostics accumulated along the way.
pub struct CompileOutcome {
    pub arena: Arena,
    pub root: NodeId,
    pub global: GlobalMap,
    pub effective: IndexMap<NodeId, EffectiveNode>,
    pub diagnostics: DiagnosticSink,
}

/// Compiles one in-memory source string through the full pipeline.
/// `file_name` identifies it for diagnostics, symbol provenance, and
/// relative-import resolution.
pub fn compile_source(source: &str, file_name: &str, search: &SearchConfig) -> CompileOutcome {
    let mut sink = DiagnosticSink::new();
    let outcome = parse_source(source, file_name, &mut sink);
    let mut arena = outcome.arena;
    let root = outcome.root;
    let config = outcome.registry.active().into_owned();

    let mut global = GlobalMap::new();
    global.add_configuration(None, config.clone());

    global.push_loading(file_name);
    registry::collect_symbols(&arena, root, file_name, &config, &mut global, &mut sink);
    resolve_imports_recursively(&mut arena, root, file_name, search, &mut global, &mut sink);
    global.pop_loading();

    let effective = inheritance::resolve_all(&mut arena, &global, &mut sink);
    selector_automation::run(&mut arena, root, &config);
    constraint::validate(&arena, root, &mut sink);

    CompileOutcome { arena, root, global, effective, diagnostics: sink }
}

/// Reads and compiles one file from disk.
pub fn compile_file(path: &Path, search: &SearchConfig) -> anyhow::Result<CompileOutcome> {
    let source = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file_name = path.to_string_lossy().to_string();
    Ok(compile_source(&source, &file_name, search))
}

/// Compiles a batch of independent root files in parallel; each gets its
/// own [`GlobalMap`] and arena, since CHTL files are only related through
/// explicit `[Import]`s, never implicit cross-file state.
pub fn compile_files(paths: &[PathBuf], search: &SearchConfig) -> Vec<anyhow::Result<CompileOutcome>> {
    paths.par_iter().map(|path| compile_file(path, search)).collect()
}

/// Finds every `[Import]` node anywhere in the tree — imports can appear at
/// top level or nested inside a `[Namespace]` block.
fn collect_import_nodes(arena: &Arena, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    collect_import_nodes_into(arena, id, &mut out);
    out
}

fn collect_import_nodes_into(arena: &Arena, id: NodeId, out: &mut Vec<NodeId>) {
    for &child in &arena.get(id).children {
        if matches!(arena.get(child).kind, NodeKind::Import { .. }) {
            out.push(child);
        }
        collect_import_nodes_into(arena, child, out);
    }
}

/// Resolves and, for declaration-bearing imports, recursively compiles and
/// grafts every `[Import]` reachable from `root` (spec §4.5).
fn resolve_imports_recursively(
    arena: &mut Arena,
    root: NodeId,
    file_path: &str,
    search: &SearchConfig,
    global: &mut GlobalMap,
    sink: &mut DiagnosticSink,
) {
    let current_dir = Path::new(file_path).parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));

    for import_id in collect_import_nodes(arena, root) {
        let (kind, raw_path, alias, excludes) = {
            let NodeKind::Import { kind, raw_path, alias, excludes, .. } = &arena.get(import_id).kind else { continue };
            (kind.clone(), raw_path.clone(), alias.clone(), excludes.clone())
        };
        let span = arena.get(import_id).span.clone();

        let Some(resolved) = import_resolver::resolve_import(
            file_path,
            &current_dir,
            &raw_path,
            &kind,
            alias.clone(),
            excludes.clone(),
            search,
            global,
            sink,
            &span,
        ) else {
            continue;
        };

        // HTML/CSS/JS/CJmod imports carry no declarations for the symbol
        // table or the inheritance engine to see; recording the
        // `ImportRecord` above is all they need.
        if !matches!(kind, ImportKind::Chtl | ImportKind::Template(_) | ImportKind::Custom(_) | ImportKind::Origin(_) | ImportKind::Config) {
            continue;
        }

        for file in &resolved.files {
            graft_imported_file(arena, root, file, file_path, &resolved.alias, &resolved.excludes, search, global, sink, &span);
        }
    }
}

/// Parses, recursively flattens, and grafts one imported `.chtl` file's
/// top-level declarations into `dst_arena` (spec §4.5 step 6), then runs
/// symbol collection over the grafted copies so every registered symbol's
/// `node` points into `dst_arena`.
#[allow(clippy::too_many_arguments)]
fn graft_imported_file(
    dst_arena: &mut Arena,
    dst_root: NodeId,
    file: &Path,
    importer_file: &str,
    alias: &Option<String>,
    excludes: &[String],
    search: &SearchConfig,
    global: &mut GlobalMap,
    sink: &mut DiagnosticSink,
    span: &crate::parse_util::ParseSourceSpan,
) {
    let resolved_str = file.to_string_lossy().to_string();
    if global.is_loading(&resolved_str) {
        // `resolve_import` already reported the cycle.
        return;
    }

    let Ok(source) = std::fs::read_to_string(file) else {
        sink.error(ResolutionError::FileNotFound(resolved_str), span.clone());
        return;
    };

    global.push_loading(resolved_str.clone());

    let parsed = parse_source(&source, resolved_str.clone(), sink);
    let mut src_arena = parsed.arena;
    let src_root = parsed.root;
    let src_config = parsed.registry.active().into_owned();

    // Flatten this file's own imports into its own arena first, so a
    // transitively imported declaration is already grafted in by the time
    // we graft *this* file's top level into the importer.
    resolve_imports_recursively(&mut src_arena, src_root, &resolved_str, search, global, sink);

    let mut map: HashMap<NodeId, NodeId> = HashMap::new();
    for &decl_id in &src_arena.get(src_root).children.clone() {
        let name = declaration_name(&src_arena, decl_id);
        if let Some(name) = name {
            if excludes.iter().any(|ex| ex == name) {
                continue;
            }
        }
        let grafted = graft(dst_arena, &src_arena, decl_id, &mut map);
        dst_arena.attach(dst_root, grafted);
        registry::collect_symbols(dst_arena, grafted, &resolved_str, &src_config, global, sink);

        if let (Some(alias), Some(name)) = (alias, name) {
            let stem = std::path::Path::new(&resolved_str).file_stem().and_then(|s| s.to_str()).unwrap_or(&resolved_str);
            global.add_alias(alias.clone(), format!("{stem}.{name}"));
        }
    }

    global.mark_imported(&resolved_str, importer_file);
    global.pop_loading();
}

/// The name an `except`-on-import exclusion or an `as` alias would refer
/// to, for the declaration kinds an `[Import]` can actually bring in.
fn declaration_name(arena: &Arena, id: NodeId) -> Option<&str> {
    let node = arena.get(id);
    match &node.kind {
        NodeKind::TemplateDecl { .. } => Some(node.name.as_str()),
        NodeKind::Origin { alias: Some(alias), .. } => Some(alias.as_str()),
        NodeKind::Namespace { path, .. } => Some(path.as_str()),
        NodeKind::ConfigurationDecl { .. } => Some(node.name.as_str()),
        _ => None,
    }
}

/// Deep-copies `src_id` and its whole subtree (plus, for `Insert`/
/// `IndexAccess` nodes, their unattached `payload` lists) from `src` into
/// `dst`, rewriting every `NodeId` the copied nodes carry via `map`.
/// Returns the new, `dst`-relative id.
fn graft(dst: &mut Arena, src: &Arena, src_id: NodeId, map: &mut HashMap<NodeId, NodeId>) -> NodeId {
    if let Some(&existing) = map.get(&src_id) {
        return existing;
    }

    let node = src.get(src_id);
    for &child in &node.children {
        graft(dst, src, child, map);
    }
    for &floating in &floating_refs(&node.kind) {
        graft(dst, src, floating, map);
    }

    let new_kind = remap_kind(&node.kind, map);
    let mut new_node = Node::new(new_kind, node.span.clone());
    new_node.name = node.name.clone();
    new_node.content = node.content.clone();
    new_node.attributes = node.attributes.clone();
    new_node.metadata = node.metadata.clone();
    let new_id = dst.alloc(new_node);
    map.insert(src_id, new_id);

    for &child in &node.children {
        dst.attach(new_id, map[&child]);
    }
    new_id
}

/// `NodeId`s a node carries outside its own `children` list — currently
/// just `Insert`/`IndexAccess` payload bodies, which the parser leaves
/// unattached (see `parser::parse_insert`/`parse_index_access`).
fn floating_refs(kind: &NodeKind) -> Vec<NodeId> {
    match kind {
        NodeKind::Insert { payload, .. } => payload.clone(),
        NodeKind::IndexAccess { payload, .. } => payload.clone(),
        _ => Vec::new(),
    }
}

/// Rewrites every `NodeId`-bearing field of `kind` through `map`; every
/// other variant is cloned as-is.
fn remap_kind(kind: &NodeKind, map: &HashMap<NodeId, NodeId>) -> NodeKind {
    match kind {
        NodeKind::Element { tag, classes, id, style_children, script_children, text_children, flags, is_auto_tag } => {
            NodeKind::Element {
                tag: tag.clone(),
                classes: classes.clone(),
                id: id.clone(),
                style_children: style_children.iter().map(|n| map[n]).collect(),
                script_children: script_children.iter().map(|n| map[n]).collect(),
                text_children: text_children.iter().map(|n| map[n]).collect(),
                flags: *flags,
                is_auto_tag: *is_auto_tag,
            }
        }
        NodeKind::TemplateDecl { is_custom, variety, parents, specializations } => NodeKind::TemplateDecl {
            is_custom: *is_custom,
            variety: *variety,
            parents: parents.clone(),
            specializations: specializations.iter().map(|n| map[n]).collect(),
        },
        NodeKind::Insert { position, target, payload } => {
            NodeKind::Insert { position: *position, target: target.clone(), payload: payload.iter().map(|n| map[n]).collect() }
        }
        NodeKind::IndexAccess { tag, index, payload } => {
            NodeKind::IndexAccess { tag: tag.clone(), index: *index, payload: payload.iter().map(|n| map[n]).collect() }
        }
        other => other.clone(),
    }
}
