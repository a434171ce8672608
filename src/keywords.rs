//! Keyword recognition, reconfigurable per active [`Configuration`] (spec §4.1:
//! "the lexer's keyword table [is] a function of compile-time configuration, not
//! a compile-time constant"). Classification always consults the active
//! configuration's `[Name]` remap first, then falls back to the builtin table.

use crate::config::Configuration;

/// Canonical identity of a recognized `@Type` tag, independent of spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtTypeKeyword {
    Style,
    Element,
    Var,
    Html,
    JavaScript,
    Chtl,
    CJmod,
    Config,
    /// A user-declared origin type registered via `[OriginType]`, or an
    /// unrecognized `@Name` the parser treats as a generic identifier tag.
    Custom(String),
}

/// Canonical bare-word keywords that appear outside `@`/`[...]` prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BareKeyword {
    Use,
    Html5,
    Inherit,
    Delete,
    Insert,
    Except,
    From,
    As,
    After,
    Before,
    Replace,
    At,
    Top,
    Bottom,
}

impl BareKeyword {
    fn builtin_spelling(self) -> &'static str {
        match self {
            BareKeyword::Use => "use",
            BareKeyword::Html5 => "html5",
            BareKeyword::Inherit => "inherit",
            BareKeyword::Delete => "delete",
            BareKeyword::Insert => "insert",
            BareKeyword::Except => "except",
            BareKeyword::From => "from",
            BareKeyword::As => "as",
            BareKeyword::After => "after",
            BareKeyword::Before => "before",
            BareKeyword::Replace => "replace",
            BareKeyword::At => "at",
            BareKeyword::Top => "top",
            BareKeyword::Bottom => "bottom",
        }
    }

    /// The `[Name]` configuration key this keyword is remapped under, if any.
    /// Only a subset of bare keywords are remappable in the original design
    /// (structural keywords like `from`/`as` are not).
    fn name_key(self) -> Option<&'static str> {
        match self {
            BareKeyword::Inherit => Some("KEYWORD_INHERIT"),
            BareKeyword::Delete => Some("KEYWORD_DELETE"),
            BareKeyword::Insert => Some("KEYWORD_INSERT"),
            BareKeyword::Except => Some("KEYWORD_EXCEPT"),
            _ => None,
        }
    }

    const ALL: &'static [BareKeyword] = &[
        BareKeyword::Use,
        BareKeyword::Html5,
        BareKeyword::Inherit,
        BareKeyword::Delete,
        BareKeyword::Insert,
        BareKeyword::Except,
        BareKeyword::From,
        BareKeyword::As,
        BareKeyword::After,
        BareKeyword::Before,
        BareKeyword::Replace,
        BareKeyword::At,
        BareKeyword::Top,
        BareKeyword::Bottom,
    ];

    pub fn classify(lexeme: &str, config: &Configuration) -> Option<BareKeyword> {
        for &kw in BareKeyword::ALL {
            if let Some(key) = kw.name_key() {
                if config.is_valid_keyword(lexeme, key) {
                    return Some(kw);
                }
            }
        }
        BareKeyword::ALL.iter().copied().find(|kw| kw.builtin_spelling() == lexeme)
    }
}

/// Built-in spellings for each `@Type` keyword, used when the active
/// configuration has no `[Name]` override (or remapping is disabled).
fn builtin_at_type(lexeme: &str) -> Option<AtTypeKeyword> {
    Some(match lexeme {
        "Style" => AtTypeKeyword::Style,
        "Element" => AtTypeKeyword::Element,
        "Var" => AtTypeKeyword::Var,
        "Html" => AtTypeKeyword::Html,
        "JavaScript" => AtTypeKeyword::JavaScript,
        "Chtl" => AtTypeKeyword::Chtl,
        "CJmod" => AtTypeKeyword::CJmod,
        "Config" => AtTypeKeyword::Config,
        _ => return None,
    })
}

/// The `[Name]` configuration key each builtin `@Type` is filed under.
fn name_key_for(kind: &AtTypeKeyword) -> Option<&'static str> {
    match kind {
        AtTypeKeyword::Style => Some("CUSTOM_STYLE"),
        AtTypeKeyword::Element => Some("CUSTOM_ELEMENT"),
        AtTypeKeyword::Var => Some("CUSTOM_VAR"),
        AtTypeKeyword::Html => Some("ORIGIN_HTML"),
        AtTypeKeyword::JavaScript => Some("ORIGIN_JAVASCRIPT"),
        AtTypeKeyword::Chtl => None,
        AtTypeKeyword::CJmod => None,
        AtTypeKeyword::Config => None,
        AtTypeKeyword::Custom(_) => None,
    }
}

/// Classify the identifier following `@` against the active configuration's
/// `[Name]` remap first, then the builtin table, then fall back to a
/// `[OriginType]`-registered user type, and finally a generic custom tag.
pub fn classify_at_type(lexeme: &str, config: &Configuration) -> AtTypeKeyword {
    for candidate in [
        AtTypeKeyword::Style,
        AtTypeKeyword::Element,
        AtTypeKeyword::Var,
        AtTypeKeyword::Html,
        AtTypeKeyword::JavaScript,
    ] {
        if let Some(key) = name_key_for(&candidate) {
            if config.is_valid_keyword(lexeme, key) {
                return candidate;
            }
        }
    }
    if let Some(kind) = builtin_at_type(lexeme) {
        return kind;
    }
    if config.is_known_origin_type(lexeme) {
        return AtTypeKeyword::Custom(lexeme.to_string());
    }
    AtTypeKeyword::Custom(lexeme.to_string())
}
