//! The `Symbol` model produced by [`crate::registry::collect_symbols`] (spec
//! §3.4): one entry per named declaration a file contributes to the global
//! map, grounded on the original `SymbolInfo` (`CHTLGlobalMap.h`) and
//! `NamespaceSymbol` (`NamespaceManager.h`) structs.

use crate::ast::{NodeId, Variety};
use crate::parse_util::ParseSourceSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    TemplateStyle,
    TemplateElement,
    TemplateVar,
    CustomStyle,
    CustomElement,
    CustomVar,
    Origin,
    Namespace,
    Config,
    ClassName,
    IdName,
    Import,
}

impl SymbolKind {
    /// Style and Var groups may be declared again under the same namespace
    /// and name without conflict (spec §4.4: "Variable groups and style
    /// groups are mergeable; element groups and configurations are not").
    pub fn is_mergeable(self) -> bool {
        matches!(
            self,
            SymbolKind::TemplateStyle | SymbolKind::CustomStyle | SymbolKind::TemplateVar | SymbolKind::CustomVar
        )
    }

    pub fn for_template(is_custom: bool, variety: Variety) -> Self {
        match (is_custom, variety) {
            (false, Variety::Style) => SymbolKind::TemplateStyle,
            (false, Variety::Element) => SymbolKind::TemplateElement,
            (false, Variety::Var) => SymbolKind::TemplateVar,
            (true, Variety::Style) => SymbolKind::CustomStyle,
            (true, Variety::Element) => SymbolKind::CustomElement,
            (true, Variety::Var) => SymbolKind::CustomVar,
        }
    }
}

/// `(kind, name, namespace-path, source-path, position, payload-reference)`.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    /// Dot-separated namespace path, empty string for the global namespace.
    pub namespace_path: String,
    pub source_path: String,
    pub span: ParseSourceSpan,
    /// The declaration node this symbol refers to, when one exists (class/id
    /// usage symbols have no owning node).
    pub node: Option<NodeId>,
    /// Set once this symbol is re-registered into an importing file by the
    /// import resolver (spec §3.4: "imported iff its owning file differs
    /// from the file where it was first registered").
    pub is_imported: bool,
}

impl Symbol {
    pub fn new(
        kind: SymbolKind,
        name: impl Into<String>,
        namespace_path: impl Into<String>,
        source_path: impl Into<String>,
        span: ParseSourceSpan,
        node: Option<NodeId>,
    ) -> Self {
        Symbol {
            kind,
            name: name.into(),
            namespace_path: namespace_path.into(),
            source_path: source_path.into(),
            span,
            node,
            is_imported: false,
        }
    }

    pub fn qualified_name(&self) -> String {
        if self.namespace_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace_path, self.name)
        }
    }
}
