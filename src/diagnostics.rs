//! Diagnostics: the typed error/warning model threaded through every pipeline
//! stage instead of Rust-level exceptions (spec §7 — "no exceptions for control
//! flow: every fallible operation returns an explicit outcome").

use thiserror::Error;

use crate::parse_util::ParseSourceSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Lexical errors (spec §7): unterminated string, unterminated prefix, unknown byte.
#[derive(Debug, Clone, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated `{prefix}` prefix")]
    UnterminatedPrefix { prefix: &'static str },
    #[error("unknown keyword `[{0}]`")]
    UnknownKeyword(String),
    #[error("unknown byte {0:#04x}")]
    UnknownByte(u8),
}

/// Syntactic errors: unexpected token, missing separator, unbalanced braces.
#[derive(Debug, Clone, Error)]
pub enum SyntaxError {
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("missing `{0}`")]
    MissingSeparator(&'static str),
    #[error("unbalanced `{0}`")]
    UnbalancedDelimiter(char),
    #[error("illegal state transition: `{construct}` is not legal inside {context}")]
    IllegalTransition { construct: &'static str, context: &'static str },
    #[error("`as` alias on a wildcard import is not supported")]
    AliasOnWildcardImport,
    #[error("{0}")]
    Other(String),
}

/// Semantic errors: undefined symbol, duplicate symbol, constraint violation,
/// invalid specialization target, unresolved inheritance, unvalued property.
#[derive(Debug, Clone, Error)]
pub enum SemanticError {
    #[error("undefined symbol `{0}`")]
    UndefinedSymbol(String),
    #[error("duplicate symbol `{0}` with conflicting kind")]
    DuplicateSymbol(String),
    #[error("ambiguous reference to `{0}`")]
    AmbiguousSymbol(String),
    #[error("`{construct}` is not allowed here: {reason}")]
    ConstraintViolation { construct: String, reason: String },
    #[error("invalid specialization target `{0}`")]
    InvalidSpecializationTarget(String),
    #[error("cannot resolve inheritance for `{0}`")]
    UnresolvedInheritance(String),
    #[error("property `{property}` on `{owner}` has no value at emission")]
    UnvaluedProperty { owner: String, property: String },
    #[error("index [{index}] out of range for `{tag}` ({count} matching children)")]
    IndexOutOfRange { tag: String, index: usize, count: usize },
}

/// Resolution errors: file not found, ambiguous import, circular import, zero
/// wildcard matches.
#[derive(Debug, Clone, Error)]
pub enum ResolutionError {
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("ambiguous import of `{0}`")]
    AmbiguousImport(String),
    #[error("circular import: {0}")]
    CircularImport(String),
    #[error("wildcard `{0}` matched zero files")]
    WildcardMatchedNothing(String),
    #[error("import `{0}` excludes unknown name `{1}`")]
    UnknownExclude(String, String),
}

/// Configuration errors: invalid option value, conflicting default configurations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for option `{option}`")]
    InvalidOptionValue { option: String, value: String },
    #[error("two anonymous `[Configuration]` blocks in one compilation")]
    ConflictingDefaults,
    #[error("unknown configuration option `{0}`")]
    UnknownOption(String),
    #[error("too many alternatives for `[Name]` entry `{key}` (limit {limit})")]
    TooManyAlternatives { key: String, limit: usize },
}

#[derive(Debug, Clone, Error)]
pub enum DiagnosticKind {
    #[error(transparent)]
    Lexical(#[from] LexError),
    #[error(transparent)]
    Syntactic(#[from] SyntaxError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

/// One reported problem: a severity, a typed kind, and (usually) a source span.
///
/// `span` is `None` only for diagnostics with no single source location, such as
/// a circular-import report that names two files rather than one point.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub span: Option<ParseSourceSpan>,
}

impl Diagnostic {
    pub fn new(severity: Severity, kind: impl Into<DiagnosticKind>, span: Option<ParseSourceSpan>) -> Self {
        Diagnostic { severity, kind: kind.into(), span }
    }

    pub fn error(kind: impl Into<DiagnosticKind>, span: ParseSourceSpan) -> Self {
        Diagnostic::new(Severity::Error, kind, Some(span))
    }

    pub fn warning(kind: impl Into<DiagnosticKind>, span: ParseSourceSpan) -> Self {
        Diagnostic::new(Severity::Warning, kind, Some(span))
    }

    pub fn error_without_span(kind: impl Into<DiagnosticKind>) -> Self {
        Diagnostic::new(Severity::Error, kind, None)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.span {
            Some(span) => write!(f, "{}: {}: {}", span, self.severity, self.kind),
            None => write!(f, "{}: {}", self.severity, self.kind),
        }
    }
}

/// Accumulates diagnostics across a compilation. Every fallible stage takes a
/// `&mut DiagnosticSink` and keeps going after pushing an error, matching spec
/// §7's best-effort recovery model: the final result is marked invalid by
/// [`DiagnosticSink::has_errors`], not by aborting the pipeline.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        DiagnosticSink::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, kind: impl Into<DiagnosticKind>, span: ParseSourceSpan) {
        self.push(Diagnostic::error(kind, span));
    }

    pub fn warning(&mut self, kind: impl Into<DiagnosticKind>, span: ParseSourceSpan) {
        self.push(Diagnostic::warning(kind, span));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn extend(&mut self, other: DiagnosticSink) {
        self.diagnostics.extend(other.diagnostics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_util::{ParseLocation, ParseSourceFile, Position};

    fn span() -> ParseSourceSpan {
        let file = ParseSourceFile::new("div {}", "t.chtl");
        ParseSourceSpan::point(ParseLocation::new(file, Position::new(1, 1, 0)))
    }

    #[test]
    fn display_matches_file_line_column_level_message_contract() {
        let d = Diagnostic::error(SemanticError::UndefinedSymbol("Box".into()), span());
        let rendered = format!("{}", d);
        assert_eq!(rendered, "t.chtl:1:1: error: undefined symbol `Box`");
    }

    #[test]
    fn sink_has_errors_only_when_an_error_severity_diagnostic_was_pushed() {
        let mut sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        sink.warning(ConfigError::UnknownOption("FOO".into()), span());
        assert!(!sink.has_errors());
        sink.error(SemanticError::UndefinedSymbol("x".into()), span());
        assert!(sink.has_errors());
        assert_eq!(sink.len(), 2);
    }
}
