//! Source positions and spans shared by the lexer, parser, and diagnostics.

use serde::{Deserialize, Serialize};

use crate::chars;

/// A `(line, column, byte-offset)` triple stamped on every token and node.
///
/// Invariant: for any tree produced directly by the parser, an in-order traversal
/// yields non-decreasing byte offsets. A node synthesized during resolution (e.g. a
/// specialization's inserted child) inherits its position from its synthesis
/// source instead, so the invariant can be violated only across such synthesized
/// subtrees, never within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Position { line, column, offset }
    }

    /// The position before any character has been consumed.
    pub const fn start() -> Self {
        Position::new(1, 0, 0)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The file an error, token, or node came from, shared by reference-counted clones
/// so a large source string is not copied per-token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseSourceFile {
    pub content: std::sync::Arc<str>,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: impl Into<std::sync::Arc<str>>, url: impl Into<String>) -> Self {
        ParseSourceFile { content: content.into(), url: url.into() }
    }
}

/// A single point in a specific file: a [`Position`] plus the file it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseLocation {
    pub file: ParseSourceFile,
    pub position: Position,
}

impl ParseLocation {
    pub fn new(file: ParseSourceFile, position: Position) -> Self {
        ParseLocation { file, position }
    }

    /// Return up to `max_chars` of source on each side of this location, stopping
    /// early after `max_lines` newlines in either direction. Used to build
    /// human-readable diagnostic context.
    pub fn get_context(&self, max_chars: usize, max_lines: usize) -> Option<(String, String)> {
        let content = &self.file.content;
        let offset = self.position.offset.min(content.len());

        let mut start = offset;
        let mut chars_seen = 0;
        let mut lines_seen = 0;
        while chars_seen < max_chars && start > 0 {
            start -= 1;
            chars_seen += 1;
            if content.as_bytes()[start] == chars::NEWLINE as u8 {
                lines_seen += 1;
                if lines_seen >= max_lines {
                    break;
                }
            }
        }

        let mut end = offset;
        chars_seen = 0;
        lines_seen = 0;
        while chars_seen < max_chars && end < content.len() {
            if content.as_bytes()[end] == chars::NEWLINE as u8 {
                lines_seen += 1;
                if lines_seen >= max_lines {
                    end += 1;
                    break;
                }
            }
            end += 1;
            chars_seen += 1;
        }

        Some((content[start..offset].to_string(), content[offset..end].to_string()))
    }
}

impl std::fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.url, self.position)
    }
}

/// A half-open `[start, end)` range within one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end }
    }

    /// A zero-width span at a single location, used for EOF and synthesized nodes.
    pub fn point(location: ParseLocation) -> Self {
        ParseSourceSpan { end: location.clone(), start: location }
    }

    pub fn text(&self) -> &str {
        let content = &self.start.file.content;
        let start = self.start.position.offset.min(content.len());
        let end = self.end.position.offset.clamp(start, content.len());
        &content[start..end]
    }

    pub fn file_url(&self) -> &str {
        &self.start.file.url
    }
}

impl std::fmt::Display for ParseSourceSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start)
    }
}
