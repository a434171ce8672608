//! Concrete node kinds the parser emits (spec §3.3 table).

use bitflags::bitflags;
use smallvec::SmallVec;

use super::NodeId;
use crate::config::Configuration;

bitflags! {
    /// Auto-class/auto-id bookkeeping for an [`Element`](NodeKind::Element),
    /// set by the selector automation engine (spec §4.7).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ElementFlags: u8 {
        const AUTO_CLASS = 0b0001;
        const AUTO_ID    = 0b0010;
    }
}

/// Which of the three template/custom varieties a declaration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variety {
    Style,
    Element,
    Var,
}

impl Variety {
    pub fn at_type(self) -> &'static str {
        match self {
            Variety::Style => "Style",
            Variety::Element => "Element",
            Variety::Var => "Var",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextType {
    Quoted,
    Unquoted,
    /// A bare `text { ... }` literal block.
    Inline,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginTypeTag {
    Html,
    Style,
    JavaScript,
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    Html,
    Style,
    JavaScript,
    Chtl,
    CJmod,
    Config,
    /// `[Origin] @Name` or `[Template]`/`[Custom]` import targets.
    Origin(String),
    Template(Option<Variety>),
    Custom(Option<Variety>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    After,
    Before,
    Replace,
    AtTop,
    AtBottom,
}

/// `tag[N]` — a possibly-indexed reference to a sibling element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSelector {
    pub tag: String,
    pub index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// Bare CSS property names inside a style context.
    Properties(Vec<String>),
    /// `delete @Type Name;` — remove one inheritance path.
    Inheritance { type_tag: String, name: String },
    /// `delete tag[N];` — remove the N-th occurrence of `tag` among children.
    Element { tag: String, index: Option<usize> },
    /// `delete [Template] @Type Name;` / `delete [Custom] @Type Name;`
    QualifiedTemplate { is_custom: bool, type_tag: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseKind {
    Html5,
    Config(String),
}

/// One `inherit @Type Name;` statement inside a Template/Custom body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub type_tag: String,
    pub name: String,
}

/// A single `except` target (spec §4.8 Constraint Engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExceptTarget {
    ElementName(String),
    Type(String),
    Symbol { type_tag: String, name: String },
    Global,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The whole-file node; its children are the top-level declarations.
    Root,

    Element {
        tag: String,
        classes: indexmap::IndexSet<String>,
        id: Option<String>,
        style_children: SmallVec<[NodeId; 2]>,
        script_children: SmallVec<[NodeId; 2]>,
        text_children: SmallVec<[NodeId; 2]>,
        flags: ElementFlags,
        is_auto_tag: bool,
    },

    Text {
        text_type: TextType,
        preserve_whitespace: bool,
    },

    Style {
        /// Structured child rules (selector blocks) live in `Node::children`;
        /// `raw` retains the literal source text for diagnostics/pass-through.
        raw: String,
    },

    /// One structured rule inside a `style { ... }` block, e.g. `.box { ... }`
    /// or `&:hover { ... }`. Declared properties are literal `attributes`
    /// entries on this node (property name -> value); `name` carries the
    /// selector text as written, before automation rewrites it.
    StyleRule {
        selector: String,
    },

    Script {
        raw: String,
    },

    TemplateDecl {
        is_custom: bool,
        variety: Variety,
        parents: Vec<ParentRef>,
        /// Specialization statements (Delete/Insert/IndexAccess nodes) and,
        /// for Var groups, literal key/value pairs captured in `attributes`.
        specializations: Vec<NodeId>,
    },

    Origin {
        type_tag: OriginTypeTag,
        alias: Option<String>,
    },

    Import {
        kind: ImportKind,
        raw_path: String,
        resolved_path: Option<String>,
        alias: Option<String>,
        excludes: Vec<String>,
        is_wildcard: bool,
        is_recursive_wildcard: bool,
    },

    ConfigurationDecl {
        config: Box<Configuration>,
    },

    Namespace {
        path: String,
        merge: bool,
    },

    Delete {
        target: DeleteTarget,
    },

    Insert {
        position: InsertPosition,
        target: Option<TargetSelector>,
        /// Owned payload: the body's parsed children.
        payload: Vec<NodeId>,
    },

    IndexAccess {
        tag: String,
        index: usize,
        payload: Vec<NodeId>,
    },

    NoValueStyle {
        properties: Vec<String>,
    },

    Inherit(ParentRef),

    Use {
        kind: UseKind,
    },

    Except {
        targets: Vec<ExceptTarget>,
    },

    /// A generator comment (`-- ...`): the only comment flavor that survives
    /// into the resolved tree (spec §4.1, Design Notes).
    GeneratorComment,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Element { .. } => "Element",
            NodeKind::Text { .. } => "Text",
            NodeKind::Style { .. } => "Style",
            NodeKind::StyleRule { .. } => "StyleRule",
            NodeKind::Script { .. } => "Script",
            NodeKind::TemplateDecl { is_custom: true, .. } => "Custom",
            NodeKind::TemplateDecl { is_custom: false, .. } => "Template",
            NodeKind::Origin { .. } => "Origin",
            NodeKind::Import { .. } => "Import",
            NodeKind::ConfigurationDecl { .. } => "Configuration",
            NodeKind::Namespace { .. } => "Namespace",
            NodeKind::Delete { .. } => "Delete",
            NodeKind::Insert { .. } => "Insert",
            NodeKind::IndexAccess { .. } => "IndexAccess",
            NodeKind::NoValueStyle { .. } => "NoValueStyle",
            NodeKind::Inherit(_) => "Inherit",
            NodeKind::Use { .. } => "Use",
            NodeKind::Except { .. } => "Except",
            NodeKind::GeneratorComment => "GeneratorComment",
        }
    }
}
