//! The global symbol/namespace registry (spec §3.5, §4.4): one `GlobalMap`
//! per compilation run, populated by walking each file's parsed tree with
//! [`SymbolCollector`]. Grounded on `CHTLGlobalMap` (symbol/import/usage
//! tables) and `NamespaceManager` (namespace tree, aliasing, lookup order)
//! from the original implementation.

use indexmap::{IndexMap, IndexSet};

use crate::ast::{dispatch, walk, Arena, Node, NodeId, NodeKind, Visitor};
use crate::config::Configuration;
use crate::diagnostics::{DiagnosticSink, SemanticError};
use crate::symbol::{Symbol, SymbolKind};

/// One entry in the namespace tree (spec §3.5: "path → {parent, children,
/// contained symbols, isMerged, isImplicit}").
#[derive(Debug, Default, Clone)]
pub struct NamespaceNode {
    pub parent: Option<String>,
    pub children: IndexSet<String>,
    pub symbols: Vec<usize>,
    pub is_merged: bool,
    pub is_implicit: bool,
    pub source_files: IndexSet<String>,
}

/// One resolved or pending `[Import]` declaration, recorded for cycle
/// detection and the inverted imported-file → importers index.
#[derive(Debug, Clone)]
pub struct ImportRecord {
    pub importer_file: String,
    pub raw_path: String,
    pub resolved_path: Option<String>,
    pub alias: Option<String>,
    pub excludes: Vec<String>,
}

#[derive(Debug, Default)]
pub struct GlobalMap {
    symbols: Vec<Symbol>,
    per_file: IndexMap<String, Vec<usize>>,
    namespaces: IndexMap<String, NamespaceNode>,
    imports: Vec<ImportRecord>,
    imported_by: IndexMap<String, IndexSet<String>>,
    aliases: IndexMap<String, String>,
    configurations: IndexMap<String, Configuration>,
    active_configuration: Option<String>,
    class_usage: IndexMap<String, usize>,
    id_usage: IndexMap<String, usize>,
    loading_stack: Vec<String>,
}

impl GlobalMap {
    pub fn new() -> Self {
        GlobalMap::default()
    }

    // --- symbols -----------------------------------------------------------

    /// Registers `symbol`, reporting a [`SemanticError::DuplicateSymbol`]
    /// when an existing symbol in the same namespace shares its name with a
    /// conflicting kind (spec §3.5 invariant).
    pub fn add_symbol(&mut self, symbol: Symbol, sink: &mut DiagnosticSink) -> usize {
        if let Some(existing) = self.conflicting_symbol(&symbol) {
            if !(existing.kind == symbol.kind && existing.kind.is_mergeable()) {
                sink.error(SemanticError::DuplicateSymbol(symbol.qualified_name()), symbol.span.clone());
            }
        }
        let idx = self.symbols.len();
        self.per_file.entry(symbol.source_path.clone()).or_default().push(idx);
        self.namespaces.entry(symbol.namespace_path.clone()).or_default().symbols.push(idx);
        self.symbols.push(symbol);
        idx
    }

    fn conflicting_symbol(&self, symbol: &Symbol) -> Option<&Symbol> {
        self.namespaces.get(&symbol.namespace_path)?.symbols.iter().map(|&idx| &self.symbols[idx]).find(|s| s.name == symbol.name)
    }

    pub fn symbol(&self, idx: usize) -> &Symbol {
        &self.symbols[idx]
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbols_in_file(&self, file: &str) -> impl Iterator<Item = &Symbol> {
        self.per_file.get(file).into_iter().flatten().map(move |&idx| &self.symbols[idx])
    }

    /// Marks every symbol declared by `file` as imported into `into_file`;
    /// used once per successful import resolution (spec §4.5 step 6).
    pub fn mark_imported(&mut self, file: &str, into_file: &str) {
        let indices: Vec<usize> = self.per_file.get(file).cloned().unwrap_or_default();
        for idx in indices {
            let mut copy = self.symbols[idx].clone();
            copy.is_imported = true;
            copy.source_path = into_file.to_string();
            let new_idx = self.symbols.len();
            self.per_file.entry(into_file.to_string()).or_default().push(new_idx);
            self.namespaces.entry(copy.namespace_path.clone()).or_default().symbols.push(new_idx);
            self.symbols.push(copy);
        }
    }

    // --- namespaces ----------------------------------------------------------

    /// Creates or merges the namespace at `full_path`. Returns `true` if this
    /// call merged into an already-existing namespace (spec §4.4 "Merging").
    pub fn register_namespace(&mut self, full_path: &str, parent_path: &str, source_file: &str, is_implicit: bool) -> bool {
        let merged = self.namespaces.contains_key(full_path);
        let entry = self.namespaces.entry(full_path.to_string()).or_default();
        if merged {
            entry.is_merged = true;
        } else {
            entry.parent = if parent_path.is_empty() { None } else { Some(parent_path.to_string()) };
            entry.is_implicit = is_implicit;
        }
        entry.source_files.insert(source_file.to_string());
        if !parent_path.is_empty() {
            self.namespaces.entry(parent_path.to_string()).or_default().children.insert(full_path.to_string());
        }
        merged
    }

    pub fn namespace(&self, path: &str) -> Option<&NamespaceNode> {
        self.namespaces.get(path)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &NamespaceNode)> {
        self.namespaces.iter().map(|(k, v)| (k.as_str(), v))
    }

    // --- lookup ----------------------------------------------------------------

    /// Resolves `name` starting at `current_namespace` per spec §4.4: exact
    /// namespace, then ancestors, then imported symbols in declaration order,
    /// then the alias table. Returns every match so callers can treat more
    /// than one as ambiguous.
    pub fn lookup_all(&self, name: &str, current_namespace: &str) -> Vec<&Symbol> {
        let segments: Vec<&str> = current_namespace.split('.').filter(|s| !s.is_empty()).collect();
        for end in (0..=segments.len()).rev() {
            let candidate = segments[..end].join(".");
            if let Some(ns) = self.namespaces.get(candidate.as_str()) {
                let found: Vec<&Symbol> = ns.symbols.iter().map(|&idx| &self.symbols[idx]).filter(|s| s.name == name).collect();
                if !found.is_empty() {
                    return found;
                }
            }
        }
        let imported: Vec<&Symbol> = self.symbols.iter().filter(|s| s.is_imported && s.name == name).collect();
        if !imported.is_empty() {
            return imported;
        }
        if let Some(real) = self.aliases.get(name) {
            return self.symbols.iter().filter(|s| s.qualified_name() == *real).collect();
        }
        Vec::new()
    }

    pub fn lookup(&self, name: &str, current_namespace: &str) -> Option<&Symbol> {
        let mut matches = self.lookup_all(name, current_namespace);
        if matches.len() == 1 {
            Some(matches.remove(0))
        } else {
            None
        }
    }

    pub fn find(&self, kind: SymbolKind, name: &str, namespace: &str) -> Option<&Symbol> {
        self.lookup_all(name, namespace).into_iter().find(|s| s.kind == kind)
    }

    // --- imports -----------------------------------------------------------------

    pub fn add_import(&mut self, record: ImportRecord) {
        if let Some(resolved) = record.resolved_path.clone() {
            self.imported_by.entry(resolved).or_default().insert(record.importer_file.clone());
        }
        self.imports.push(record);
    }

    pub fn imports(&self) -> &[ImportRecord] {
        &self.imports
    }

    pub fn importers_of(&self, file: &str) -> impl Iterator<Item = &str> {
        self.imported_by.get(file).into_iter().flatten().map(String::as_str)
    }

    pub fn is_loading(&self, path: &str) -> bool {
        self.loading_stack.iter().any(|p| p == path)
    }

    pub fn push_loading(&mut self, path: impl Into<String>) {
        self.loading_stack.push(path.into());
    }

    pub fn pop_loading(&mut self) {
        self.loading_stack.pop();
    }

    pub fn loading_stack(&self) -> &[String] {
        &self.loading_stack
    }

    // --- aliases -------------------------------------------------------------------

    pub fn add_alias(&mut self, alias: impl Into<String>, real_qualified_name: impl Into<String>) {
        self.aliases.insert(alias.into(), real_qualified_name.into());
    }

    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    // --- configurations ------------------------------------------------------------

    pub fn add_configuration(&mut self, name: Option<String>, config: Configuration) {
        match name {
            Some(name) => {
                if self.active_configuration.is_none() {
                    self.active_configuration = Some(name.clone());
                }
                self.configurations.insert(name, config);
            }
            None => {
                self.configurations.entry("".to_string()).or_insert(config);
                if self.active_configuration.is_none() {
                    self.active_configuration = Some("".to_string());
                }
            }
        }
    }

    pub fn active_configuration(&self) -> Option<&Configuration> {
        self.active_configuration.as_ref().and_then(|name| self.configurations.get(name))
    }

    // --- selector usage --------------------------------------------------------------

    pub fn register_class_usage(&mut self, name: &str) {
        *self.class_usage.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn register_id_usage(&mut self, name: &str) {
        *self.id_usage.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn class_usage_count(&self, name: &str) -> usize {
        self.class_usage.get(name).copied().unwrap_or(0)
    }

    pub fn id_usage_count(&self, name: &str) -> usize {
        self.id_usage.get(name).copied().unwrap_or(0)
    }

    pub fn most_used_class(&self) -> Option<&str> {
        self.class_usage.iter().max_by_key(|(_, count)| **count).map(|(name, _)| name.as_str())
    }

    pub fn most_used_id(&self) -> Option<&str> {
        self.id_usage.iter().max_by_key(|(_, count)| **count).map(|(name, _)| name.as_str())
    }
}

/// Walks one file's parsed tree, registering its declarations into `global`
/// (spec §4.4). Files with no explicit `[Namespace]` are wrapped in an
/// implicit namespace derived from their stem unless the active
/// configuration disables default namespacing.
pub fn collect_symbols(
    arena: &Arena,
    root: NodeId,
    file_path: &str,
    config: &Configuration,
    global: &mut GlobalMap,
    sink: &mut DiagnosticSink,
) {
    let mut namespace_stack = Vec::new();
    if !config.is_default_namespace_disabled() {
        let stem = std::path::Path::new(file_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_path)
            .to_string();
        global.register_namespace(&stem, "", file_path, true);
        namespace_stack.push(stem);
    }
    let mut collector = SymbolCollector { global, sink, file_path: file_path.to_string(), namespace_stack };
    dispatch(&mut collector, arena, root);
}

struct SymbolCollector<'a> {
    global: &'a mut GlobalMap,
    sink: &'a mut DiagnosticSink,
    file_path: String,
    namespace_stack: Vec<String>,
}

impl SymbolCollector<'_> {
    fn current_namespace(&self) -> String {
        self.namespace_stack.join(".")
    }

    fn symbol_node(&self, arena: &Arena, id: NodeId) -> &Node {
        arena.get(id)
    }
}

impl Visitor for SymbolCollector<'_> {
    fn visit_element(&mut self, arena: &Arena, id: NodeId) {
        if let NodeKind::Element { classes, id: elem_id, .. } = &arena.get(id).kind {
            for class in classes {
                self.global.register_class_usage(class);
            }
            if let Some(elem_id) = elem_id {
                self.global.register_id_usage(elem_id);
            }
        }
        walk(self, arena, id);
    }

    fn visit_template_decl(&mut self, arena: &Arena, id: NodeId) {
        let node = self.symbol_node(arena, id);
        if let NodeKind::TemplateDecl { is_custom, variety, .. } = &node.kind {
            let symbol = Symbol::new(
                SymbolKind::for_template(*is_custom, *variety),
                node.name.clone(),
                self.current_namespace(),
                self.file_path.clone(),
                node.span.clone(),
                Some(id),
            );
            self.global.add_symbol(symbol, self.sink);
        }
    }

    fn visit_origin(&mut self, arena: &Arena, id: NodeId) {
        let node = self.symbol_node(arena, id);
        if let NodeKind::Origin { alias: Some(alias), .. } = &node.kind {
            let symbol = Symbol::new(
                SymbolKind::Origin,
                alias.clone(),
                self.current_namespace(),
                self.file_path.clone(),
                node.span.clone(),
                Some(id),
            );
            self.global.add_symbol(symbol, self.sink);
        }
    }

    fn visit_configuration_decl(&mut self, arena: &Arena, id: NodeId) {
        let node = self.symbol_node(arena, id);
        if let NodeKind::ConfigurationDecl { config } = &node.kind {
            let name = config.name.clone().unwrap_or_else(|| "default".to_string());
            let symbol = Symbol::new(
                SymbolKind::Config,
                name,
                self.current_namespace(),
                self.file_path.clone(),
                node.span.clone(),
                Some(id),
            );
            self.global.add_symbol(symbol, self.sink);
            self.global.add_configuration(config.name.clone(), (**config).clone());
        }
    }

    fn visit_namespace(&mut self, arena: &Arena, id: NodeId) {
        let node = self.symbol_node(arena, id);
        let NodeKind::Namespace { path, .. } = &node.kind else { return };
        let parent_path = self.current_namespace();
        self.namespace_stack.push(path.clone());
        let full_path = self.current_namespace();
        self.global.register_namespace(&full_path, &parent_path, &self.file_path, false);
        let symbol =
            Symbol::new(SymbolKind::Namespace, path.clone(), parent_path, self.file_path.clone(), node.span.clone(), Some(id));
        self.global.add_symbol(symbol, self.sink);
        walk(self, arena, id);
        self.namespace_stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_util::{ParseLocation, ParseSourceFile, ParseSourceSpan, Position};
    use crate::parser::parse_source;

    fn span() -> ParseSourceSpan {
        let file = ParseSourceFile { content: "x".into(), url: "t.chtl".into() };
        let loc = ParseLocation { file, position: Position::start() };
        ParseSourceSpan::point(loc)
    }

    #[test]
    fn registers_and_looks_up_a_namespaced_template() {
        let mut global = GlobalMap::new();
        let symbol = Symbol::new(SymbolKind::TemplateStyle, "Base", "utils", "a.chtl", span(), None);
        let mut sink = DiagnosticSink::new();
        global.add_symbol(symbol, &mut sink);
        assert!(!sink.has_errors());
        assert!(global.lookup("Base", "utils").is_some());
        assert!(global.lookup("Base", "utils.widgets").is_some(), "ancestor walk should find it");
        assert!(global.lookup("Base", "other").is_none());
    }

    #[test]
    fn conflicting_non_mergeable_kinds_are_reported() {
        let mut global = GlobalMap::new();
        let mut sink = DiagnosticSink::new();
        global.add_symbol(Symbol::new(SymbolKind::TemplateElement, "Row", "", "a.chtl", span(), None), &mut sink);
        global.add_symbol(Symbol::new(SymbolKind::CustomElement, "Row", "", "b.chtl", span(), None), &mut sink);
        assert!(sink.has_errors());
    }

    #[test]
    fn mergeable_var_groups_do_not_conflict() {
        let mut global = GlobalMap::new();
        let mut sink = DiagnosticSink::new();
        global.add_symbol(Symbol::new(SymbolKind::TemplateVar, "Palette", "", "a.chtl", span(), None), &mut sink);
        global.add_symbol(Symbol::new(SymbolKind::TemplateVar, "Palette", "", "b.chtl", span(), None), &mut sink);
        assert!(!sink.has_errors());
    }

    #[test]
    fn namespace_registered_twice_is_marked_merged() {
        let mut global = GlobalMap::new();
        assert!(!global.register_namespace("utils", "", "a.chtl", false));
        assert!(global.register_namespace("utils", "", "b.chtl", false));
        let ns = global.namespace("utils").unwrap();
        assert!(ns.is_merged);
        assert_eq!(ns.source_files.len(), 2);
    }

    #[test]
    fn collect_symbols_finds_template_and_class_usage() {
        let mut sink = DiagnosticSink::new();
        let outcome = parse_source(
            "[Namespace] Widgets { [Template] @Style Card { color: red; } }\ndiv { class: \"card\"; }",
            "page.chtl",
            &mut sink,
        );
        assert!(!sink.has_errors());
        let mut global = GlobalMap::new();
        let config = Configuration::default();
        collect_symbols(&outcome.arena, outcome.root, "page.chtl", &config, &mut global, &mut sink);
        assert!(!sink.has_errors());
        assert!(global.lookup("Card", "page.Widgets").is_some());
        assert_eq!(global.class_usage_count("card"), 1);
    }
}
