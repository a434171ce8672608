//! Source text → token stream (spec §4.1).
//!
//! Single-pass scan with small lookahead. Keyword classification pulls the
//! active [`Configuration`]'s `[Name]` remap on every call instead of mutating
//! a global keyword table, so the lexer stays pure per invocation (spec §9,
//! "Dynamic keyword remapping").

use std::sync::Arc;

use crate::chars;
use crate::config::Configuration;
use crate::diagnostics::LexError;
use crate::keywords::{self, AtTypeKeyword};
use crate::parse_util::{ParseLocation, ParseSourceFile, ParseSourceSpan, Position};
use crate::token::{BracketKeyword, Token, TokenKind};

pub struct Lexer {
    chars: Vec<(usize, char)>,
    len: usize,
    pos: usize,
    line: usize,
    column: usize,
    file: ParseSourceFile,
    config: Arc<Configuration>,
    css_mode: bool,
}

impl Lexer {
    pub fn new(source: &str, file_name: impl Into<String>, config: Arc<Configuration>) -> Self {
        let chars: Vec<(usize, char)> = source.char_indices().collect();
        let len = chars.len();
        Lexer {
            chars,
            len,
            pos: 0,
            line: 1,
            column: 1,
            file: ParseSourceFile::new(source, file_name),
            config,
            css_mode: false,
        }
    }

    pub fn set_css_mode(&mut self, enabled: bool) {
        self.css_mode = enabled;
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Swap in a newly-activated configuration, e.g. after the parser finishes
    /// a `[Configuration]` block or sees `use @Config Name;` (spec §9:
    /// "dynamic keyword remapping... pulling the active configuration's token
    /// map just before classifying each identifier").
    pub fn set_config(&mut self, config: Arc<Configuration>) {
        self.config = config;
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.len
    }

    /// Peek the character `offset` positions ahead of the cursor (peek-by-offset).
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|(_, c)| *c)
    }

    fn byte_offset(&self) -> usize {
        self.chars.get(self.pos).map(|(b, _)| *b).unwrap_or(self.file.content.len())
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column, self.byte_offset())
    }

    fn location(&self) -> ParseLocation {
        ParseLocation::new(self.file.clone(), self.position())
    }

    fn advance(&mut self) -> Option<char> {
        let (_, c) = *self.chars.get(self.pos)?;
        self.pos += 1;
        if c == chars::NEWLINE {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_insignificant_whitespace(&mut self) {
        loop {
            match self.peek(0) {
                Some(c) if c == chars::NEWLINE && self.css_mode => break,
                Some(c) if chars::is_whitespace(c) => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    fn make_span(&self, start: ParseLocation) -> ParseSourceSpan {
        ParseSourceSpan::new(start, self.location())
    }

    /// Produce the next token. Called repeatedly to form a lazy token
    /// sequence; returns `TokenKind::Eof` forever once the source is
    /// exhausted.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_insignificant_whitespace();
            let start = self.location();

            if self.css_mode {
                if let Some(c) = self.peek(0) {
                    if c == chars::NEWLINE {
                        self.advance();
                        return Token::new(TokenKind::Newline, "\n", self.make_span(start));
                    }
                }
            }

            let Some(c) = self.peek(0) else {
                return Token::new(TokenKind::Eof, "", self.make_span(start));
            };

            // `//` and `/* */` comments are consumed here and never surfaced;
            // only the generator comment (`-- ...`) becomes a real token
            // (spec §4.1: "only the generator comment is surfaced as an
            // AST-bearing token").
            if c == '/' && self.peek(1) == Some('/') {
                self.scan_line_comment(start);
                continue;
            }
            if c == '/' && self.peek(1) == Some('*') {
                self.scan_block_comment(start);
                continue;
            }

            return match c {
                '{' => self.single(start, TokenKind::LBrace),
                '}' => self.single(start, TokenKind::RBrace),
                '(' => self.single(start, TokenKind::LParen),
                ')' => self.single(start, TokenKind::RParen),
                '[' if self.peek(1).is_some_and(chars::is_ascii_letter) => self.scan_bracket_keyword(start),
                '[' => self.single(start, TokenKind::LBracket),
                ']' => self.single(start, TokenKind::RBracket),
                ';' => self.single(start, TokenKind::Semicolon),
                ':' if self.peek(1) == Some(':') => {
                    self.advance();
                    self.advance();
                    self.finish(start, TokenKind::DoubleColon)
                }
                ':' => self.single(start, TokenKind::Colon),
                '=' => self.single(start, TokenKind::Equals),
                ',' => self.single(start, TokenKind::Comma),
                '.' if self.peek(1).is_some_and(chars::is_ascii_letter) => self.scan_selector(start, '.'),
                '.' if self.peek(1).is_some_and(chars::is_digit) => self.scan_number(start),
                '.' => self.single(start, TokenKind::Dot),
                '#' if self.peek(1).is_some_and(chars::is_ascii_letter) => self.scan_selector(start, '#'),
                '&' => self.single(start, TokenKind::Ampersand),
                '*' if self.peek(1) == Some('*') => {
                    self.advance();
                    self.advance();
                    self.finish(start, TokenKind::DoubleStar)
                }
                '*' => self.single(start, TokenKind::Star),
                '/' => self.single(start, TokenKind::Slash),
                '-' if self.peek(1) == Some('-') => self.scan_generator_comment(start),
                '-' if self.peek(1) == Some('>') => {
                    self.advance();
                    self.advance();
                    self.finish(start, TokenKind::Arrow)
                }
                '-' if self.peek(1).is_some_and(chars::is_unquoted_literal_start) => {
                    self.scan_unquoted_literal(start)
                }
                '-' => {
                    self.advance();
                    self.finish(start, TokenKind::Identifier("-".to_string()))
                }
                '@' => self.scan_at_type(start),
                '"' | '\'' => self.scan_string(start, c),
                c if chars::is_digit(c) => self.scan_number(start),
                c if chars::is_identifier_start(c) => self.scan_identifier(start),
                other => {
                    self.advance();
                    Token::new(TokenKind::Error(LexError::UnknownByte(other as u8).to_string()), other.to_string(), self.make_span(start))
                }
            };
        }
    }

    fn single(&mut self, start: ParseLocation, kind: TokenKind) -> Token {
        self.advance();
        self.finish(start, kind)
    }

    fn finish(&self, start: ParseLocation, kind: TokenKind) -> Token {
        let span = self.make_span(start);
        let lexeme = span.text().to_string();
        Token::new(kind, lexeme, span)
    }

    fn scan_bracket_keyword(&mut self, start: ParseLocation) -> Token {
        self.advance(); // '['
        let mut keyword = String::new();
        while let Some(c) = self.peek(0) {
            if c == ']' {
                break;
            }
            keyword.push(c);
            self.advance();
        }
        if self.peek(0) != Some(']') {
            let span = self.make_span(start);
            return Token::new(
                TokenKind::Error(LexError::UnterminatedPrefix { prefix: "[" }.to_string()),
                format!("[{keyword}"),
                span,
            );
        }
        self.advance(); // ']'
        match BracketKeyword::from_str(&keyword) {
            Some(kw) => self.finish(start, TokenKind::BracketKeyword(kw)),
            None => {
                let span = self.make_span(start);
                Token::new(TokenKind::Error(LexError::UnknownKeyword(keyword.clone()).to_string()), format!("[{keyword}]"), span)
            }
        }
    }

    fn scan_line_comment(&mut self, start: ParseLocation) -> Token {
        self.advance();
        self.advance();
        let mut value = String::new();
        while let Some(c) = self.peek(0) {
            if c == chars::NEWLINE {
                break;
            }
            value.push(c);
            self.advance();
        }
        self.finish(start, TokenKind::LineComment(value))
    }

    fn scan_block_comment(&mut self, start: ParseLocation) -> Token {
        self.advance();
        self.advance();
        let mut value = String::new();
        loop {
            match (self.peek(0), self.peek(1)) {
                (Some('*'), Some('/')) => {
                    self.advance();
                    self.advance();
                    return self.finish(start, TokenKind::BlockComment(value));
                }
                (Some(c), _) => {
                    value.push(c);
                    self.advance();
                }
                (None, _) => {
                    let span = self.make_span(start);
                    return Token::new(TokenKind::Error(LexError::UnterminatedPrefix { prefix: "/*" }.to_string()), value, span);
                }
            }
        }
    }

    fn scan_generator_comment(&mut self, start: ParseLocation) -> Token {
        self.advance();
        self.advance();
        let mut value = String::new();
        while let Some(c) = self.peek(0) {
            if c == chars::NEWLINE {
                break;
            }
            value.push(c);
            self.advance();
        }
        self.finish(start, TokenKind::GeneratorComment(value))
    }

    fn scan_string(&mut self, start: ParseLocation, quote: char) -> Token {
        self.advance();
        let mut value = String::new();
        loop {
            match self.peek(0) {
                Some(c) if c == quote => {
                    self.advance();
                    return self.finish(start, TokenKind::QuotedString(value));
                }
                Some('\\') => {
                    self.advance();
                    match self.advance() {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('r') => value.push('\r'),
                        Some('\\') => value.push('\\'),
                        Some('\'') => value.push('\''),
                        Some('"') => value.push('"'),
                        Some(other) => {
                            value.push('\\');
                            value.push(other);
                        }
                        None => break,
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => break,
            }
        }
        let span = self.make_span(start);
        Token::new(TokenKind::Error(LexError::UnterminatedString.to_string()), value, span)
    }

    fn scan_unquoted_literal(&mut self, start: ParseLocation) -> Token {
        while let Some(c) = self.peek(0) {
            if chars::is_unquoted_literal_part(c) {
                self.advance();
            } else {
                break;
            }
        }
        let span = self.make_span(start);
        let text = span.text().to_string();
        Token::new(TokenKind::UnquotedLiteral(text.clone()), text, span)
    }

    fn scan_number(&mut self, start: ParseLocation) -> Token {
        while self.peek(0).is_some_and(chars::is_digit) {
            self.advance();
        }
        if self.peek(0) == Some('.') && self.peek(1).is_some_and(chars::is_digit) {
            self.advance();
            while self.peek(0).is_some_and(chars::is_digit) {
                self.advance();
            }
        }
        let span = self.make_span(start);
        let text = span.text().to_string();
        Token::new(TokenKind::Number(text.clone()), text, span)
    }

    fn scan_identifier(&mut self, start: ParseLocation) -> Token {
        while let Some(c) = self.peek(0) {
            if chars::is_identifier_part(c) || c == '-' {
                self.advance();
            } else {
                break;
            }
        }
        let span = self.make_span(start);
        let text = span.text().to_string();
        Token::new(TokenKind::Identifier(text.clone()), text, span)
    }

    fn scan_selector(&mut self, start: ParseLocation, sigil: char) -> Token {
        self.advance(); // sigil
        let mut name = String::new();
        while let Some(c) = self.peek(0) {
            if chars::is_identifier_part(c) || c == '-' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let span = self.make_span(start);
        let kind = if sigil == '.' { TokenKind::ClassSelector(name) } else { TokenKind::IdSelector(name) };
        let lexeme = span.text().to_string();
        Token::new(kind, lexeme, span)
    }

    fn scan_at_type(&mut self, start: ParseLocation) -> Token {
        self.advance(); // '@'
        let mut name = String::new();
        while let Some(c) = self.peek(0) {
            if chars::is_ascii_letter(c) || chars::is_digit(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = match keywords::classify_at_type(&name, &self.config) {
            AtTypeKeyword::Style => TokenKind::AtType("Style".to_string()),
            AtTypeKeyword::Element => TokenKind::AtType("Element".to_string()),
            AtTypeKeyword::Var => TokenKind::AtType("Var".to_string()),
            AtTypeKeyword::Html => TokenKind::AtType("Html".to_string()),
            AtTypeKeyword::JavaScript => TokenKind::AtType("JavaScript".to_string()),
            AtTypeKeyword::Chtl => TokenKind::AtType("Chtl".to_string()),
            AtTypeKeyword::CJmod => TokenKind::AtType("CJmod".to_string()),
            AtTypeKeyword::Config => TokenKind::AtType("Config".to_string()),
            AtTypeKeyword::Custom(name) => TokenKind::AtType(name),
        };
        self.finish(start, kind)
    }
}
