//! Recursive-descent parser (spec §4.3): one-token lookahead, driven by the
//! [`ParserState`] machine for context-sensitive productions. Grounded
//! directly on the original `CHTLParser::Parser` — same per-production method
//! split (`parse_element`, `parse_template_or_custom`, `parse_import`, ...),
//! same synchronization-token recovery — translated into `Option<NodeId>`
//! instead of `nullptr`-returning raw pointers, and pushing [`Diagnostic`]s
//! into a sink instead of accumulating a private error list.

mod html_tags;

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

use crate::ast::{
    Arena, DeleteTarget, ElementFlags, ExceptTarget, ImportKind, InsertPosition, Node, NodeId,
    NodeKind, OriginTypeTag, ParentRef, TargetSelector, TextType, UseKind, Variety,
};
use crate::config::{Configuration, ConfigurationRegistry, OptionValue};
use crate::diagnostics::{ConfigError, DiagnosticSink, SyntaxError};
use crate::keywords::BareKeyword;
use crate::lexer::Lexer;
use crate::parse_util::ParseSourceSpan;
use crate::state::{DepthKind, ParseState, ParserState};
use crate::token::{BracketKeyword, Token, TokenKind};

/// Everything a single-file parse produces, handed off to later pipeline
/// stages (symbol collection, import resolution, ...).
pub struct ParseOutcome {
    pub arena: Arena,
    pub root: NodeId,
    pub registry: ConfigurationRegistry,
}

pub struct Parser {
    lexer: Lexer,
    current: Token,
    lookahead: Option<Token>,
    previous_span: ParseSourceSpan,
    arena: Arena,
    state: ParserState,
    config: Configuration,
    registry: ConfigurationRegistry,
}

impl Parser {
    pub fn new(source: &str, file_name: impl Into<String>) -> Self {
        let config = Configuration::default();
        let mut lexer = Lexer::new(source, file_name, Arc::new(config.clone()));
        let current = lexer.next_token();
        let previous_span = current.span.clone();
        Parser {
            lexer,
            current,
            lookahead: None,
            previous_span,
            arena: Arena::new(),
            state: ParserState::new(),
            config,
            registry: ConfigurationRegistry::new(),
        }
    }

    pub fn parse(mut self, sink: &mut DiagnosticSink) -> ParseOutcome {
        let start_span = self.current.span.clone();
        let root = self.arena.alloc(Node::new(NodeKind::Root, start_span));
        while !self.is_at_end() {
            if let Some(child) = self.parse_statement(sink) {
                self.arena.attach(root, child);
            } else if !self.is_at_end() {
                self.recover(sink);
            }
        }
        ParseOutcome { arena: self.arena, root, registry: self.registry }
    }

    // --- token-stream plumbing -------------------------------------------------

    fn peek_kind(&mut self) -> &TokenKind {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.lexer.next_token());
        }
        &self.lookahead.as_ref().unwrap().kind
    }

    fn advance(&mut self) -> Token {
        self.previous_span = self.current.span.clone();
        let next = self.lookahead.take().unwrap_or_else(|| self.lexer.next_token());
        std::mem::replace(&mut self.current, next)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn expect(&mut self, kind: TokenKind, sink: &mut DiagnosticSink) -> bool {
        if self.current.kind == kind {
            self.advance();
            true
        } else {
            sink.error(
                SyntaxError::UnexpectedToken {
                    expected: describe_kind(&kind),
                    found: describe_kind(&self.current.kind),
                },
                self.current.span.clone(),
            );
            false
        }
    }

    fn skip_semicolon(&mut self) {
        if self.at(TokenKind::Semicolon) {
            self.advance();
        }
    }

    fn current_identifier(&self) -> Option<String> {
        match &self.current.kind {
            TokenKind::Identifier(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn expect_identifier(&mut self, sink: &mut DiagnosticSink) -> Option<String> {
        if let TokenKind::Identifier(name) = self.current.kind.clone() {
            self.advance();
            Some(name)
        } else {
            sink.error(
                SyntaxError::UnexpectedToken {
                    expected: "an identifier".to_string(),
                    found: describe_kind(&self.current.kind),
                },
                self.current.span.clone(),
            );
            None
        }
    }

    fn expect_at_type(&mut self, sink: &mut DiagnosticSink) -> Option<String> {
        if let TokenKind::AtType(name) = self.current.kind.clone() {
            self.advance();
            Some(name)
        } else {
            sink.error(
                SyntaxError::UnexpectedToken {
                    expected: "an `@Type` tag".to_string(),
                    found: describe_kind(&self.current.kind),
                },
                self.current.span.clone(),
            );
            None
        }
    }

    fn bare_keyword(&self) -> Option<BareKeyword> {
        match &self.current.kind {
            TokenKind::Identifier(lexeme) => BareKeyword::classify(lexeme, &self.config),
            _ => None,
        }
    }

    /// Text of the current literal-ish token (quoted string content or raw
    /// lexeme), used where the grammar accepts any of quoted/unquoted/number.
    fn current_literal_text(&self) -> String {
        match &self.current.kind {
            TokenKind::QuotedString(s) => s.clone(),
            TokenKind::UnquotedLiteral(s) | TokenKind::Number(s) | TokenKind::Identifier(s) => s.clone(),
            // Already `@`-stripped by the lexer (`scan_at_type`); keep alternative
            // lists comparing the same bare spelling `classify_at_type` looks up.
            TokenKind::AtType(s) => s.clone(),
            _ => self.current.lexeme.clone(),
        }
    }

    fn span_since(&self, start: &ParseSourceSpan) -> ParseSourceSpan {
        ParseSourceSpan::new(start.start.clone(), self.previous_span.end.clone())
    }

    fn activate_config(&mut self, config: Configuration) {
        self.lexer.set_config(Arc::new(config.clone()));
        self.config = config;
    }

    /// Skip to the next synchronization token (spec §7 recovery): closing
    /// brace, semicolon, or the start of a top-level declaration.
    fn recover(&mut self, _sink: &mut DiagnosticSink) {
        loop {
            match &self.current.kind {
                TokenKind::RBrace | TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::Eof | TokenKind::BracketKeyword(_) => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // --- statement dispatch -----------------------------------------------------

    fn parse_statement(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        match self.current.kind.clone() {
            TokenKind::GeneratorComment(_) => Some(self.parse_generator_comment()),
            TokenKind::BracketKeyword(kw) => match kw {
                BracketKeyword::Template => self.parse_template_or_custom(false, sink),
                BracketKeyword::Custom => self.parse_template_or_custom(true, sink),
                BracketKeyword::Origin => self.parse_origin(sink),
                BracketKeyword::Import => self.parse_import(sink),
                BracketKeyword::Configuration => self.parse_configuration(sink),
                BracketKeyword::Namespace => self.parse_namespace(sink),
                BracketKeyword::Name | BracketKeyword::OriginType | BracketKeyword::Info | BracketKeyword::Export => {
                    sink.error(
                        SyntaxError::IllegalTransition { construct: "a configuration sub-block", context: "top level" },
                        self.current.span.clone(),
                    );
                    self.advance();
                    None
                }
            },
            TokenKind::Identifier(lexeme) => {
                if let Some(bare) = BareKeyword::classify(&lexeme, &self.config) {
                    match bare {
                        BareKeyword::Use => self.parse_use(sink),
                        BareKeyword::Inherit => self.parse_inherit(sink),
                        BareKeyword::Delete => self.parse_delete(sink),
                        BareKeyword::Insert => self.parse_insert(sink),
                        BareKeyword::Except => self.parse_except(sink),
                        _ => self.parse_element(sink),
                    }
                } else if lexeme == "text" && self.state.is_in(ParseState::ParsingElement) {
                    self.parse_text(sink)
                } else if lexeme == "style" && self.state.is_in(ParseState::ParsingElement) {
                    self.parse_style(sink)
                } else if lexeme == "script" && self.state.is_in(ParseState::ParsingElement) {
                    self.parse_script(sink)
                } else {
                    self.parse_element(sink)
                }
            }
            TokenKind::Eof => None,
            other => {
                sink.error(
                    SyntaxError::UnexpectedToken { expected: "a statement".to_string(), found: describe_kind(&other) },
                    self.current.span.clone(),
                );
                None
            }
        }
    }

    // --- elements ----------------------------------------------------------------

    fn is_attribute_start(&mut self) -> bool {
        matches!(self.current.kind, TokenKind::Identifier(_))
            && matches!(self.peek_kind(), TokenKind::Colon | TokenKind::Equals)
    }

    fn parse_one_attribute(
        &mut self,
        sink: &mut DiagnosticSink,
        classes: &mut IndexSet<String>,
        id: &mut Option<String>,
        attributes: &mut IndexMap<String, String>,
    ) {
        let name = self.current_identifier().unwrap_or_default();
        self.advance();
        if self.at(TokenKind::Colon) || self.at(TokenKind::Equals) {
            self.advance();
        } else {
            sink.error(SyntaxError::MissingSeparator(":"), self.current.span.clone());
        }
        let value = self.current_literal_text();
        self.advance();
        self.skip_semicolon();

        if name == "class" {
            for cls in value.split_whitespace() {
                classes.insert(cls.to_string());
            }
        } else if name == "id" {
            *id = Some(value.clone());
        }
        attributes.insert(name, value);
    }

    fn parse_element(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        let tag = self.current_identifier()?;
        self.advance();

        let _guard = self.state.enter(ParseState::ParsingElement);
        let mut classes: IndexSet<String> = IndexSet::new();
        let mut id: Option<String> = None;
        let mut attributes: IndexMap<String, String> = IndexMap::new();
        let mut style_children: SmallVec<[NodeId; 2]> = SmallVec::new();
        let mut script_children: SmallVec<[NodeId; 2]> = SmallVec::new();
        let mut text_children: SmallVec<[NodeId; 2]> = SmallVec::new();
        let mut children: Vec<NodeId> = Vec::new();

        if self.at(TokenKind::LBrace) {
            self.advance();
            let _brace = self.state.enter_depth(DepthKind::Brace);
            while !self.at(TokenKind::RBrace) && !self.is_at_end() {
                if self.is_attribute_start() {
                    self.parse_one_attribute(sink, &mut classes, &mut id, &mut attributes);
                } else if let Some(child) = self.parse_statement(sink) {
                    match &self.arena.get(child).kind {
                        NodeKind::Style { .. } => style_children.push(child),
                        NodeKind::Script { .. } => script_children.push(child),
                        NodeKind::Text { .. } => text_children.push(child),
                        _ => {}
                    }
                    children.push(child);
                } else if !self.is_at_end() {
                    self.recover(sink);
                }
            }
            self.expect(TokenKind::RBrace, sink);
        }

        if !classes.is_empty() {
            attributes.insert("class".to_string(), classes.iter().cloned().collect::<Vec<_>>().join(" "));
        }
        if let Some(id_value) = &id {
            attributes.insert("id".to_string(), id_value.clone());
        }

        let span = self.span_since(&start);
        let is_auto_tag = !html_tags::is_known_html_tag(&tag);
        let mut node = Node::new(
            NodeKind::Element {
                tag: tag.clone(),
                classes,
                id,
                style_children,
                script_children,
                text_children,
                flags: ElementFlags::empty(),
                is_auto_tag,
            },
            span,
        )
        .with_name(tag);
        node.attributes = attributes;
        let node_id = self.arena.alloc(node);
        for child in children {
            self.arena.attach(node_id, child);
        }
        Some(node_id)
    }

    // --- text / style / script -----------------------------------------------------

    fn parse_text(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // 'text'
        let _guard = self.state.enter(ParseState::ParsingTextBlock);
        self.expect(TokenKind::LBrace, sink);
        let (content, text_type) = self.parse_text_body(sink);
        self.expect(TokenKind::RBrace, sink);
        let span = self.span_since(&start);
        let mut node = Node::new(
            NodeKind::Text { text_type, preserve_whitespace: matches!(text_type, TextType::Quoted) },
            span,
        );
        node.content = content;
        Some(self.arena.alloc(node))
    }

    fn parse_text_body(&mut self, sink: &mut DiagnosticSink) -> (String, TextType) {
        let first_is_quoted = matches!(self.current.kind, TokenKind::QuotedString(_));
        let is_literal = matches!(
            self.current.kind,
            TokenKind::QuotedString(_) | TokenKind::UnquotedLiteral(_) | TokenKind::Number(_) | TokenKind::Identifier(_)
        );
        if !is_literal {
            sink.error(SyntaxError::Other("expected a text literal".to_string()), self.current.span.clone());
            return (String::new(), TextType::Unquoted);
        }
        let mut raw = self.current_literal_text();
        self.advance();
        if self.at(TokenKind::RBrace) {
            return (raw, if first_is_quoted { TextType::Quoted } else { TextType::Unquoted });
        }
        while !self.at(TokenKind::RBrace) && !self.is_at_end() {
            raw.push(' ');
            raw.push_str(&self.current_literal_text());
            self.advance();
        }
        (raw, TextType::Block)
    }

    fn parse_style(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // 'style'
        let _guard = self.state.enter(ParseState::ParsingStyleBlock);
        self.expect(TokenKind::LBrace, sink);
        self.lexer.set_css_mode(true);

        let mut raw = String::new();
        let mut declarations: IndexMap<String, String> = IndexMap::new();
        let mut children: Vec<NodeId> = Vec::new();

        loop {
            while self.at(TokenKind::Newline) {
                self.advance();
            }
            if self.at(TokenKind::RBrace) || self.is_at_end() {
                break;
            }
            if matches!(self.current.kind, TokenKind::ClassSelector(_) | TokenKind::IdSelector(_) | TokenKind::Ampersand) {
                if let Some(rule) = self.parse_style_rule(sink) {
                    children.push(rule);
                }
            } else if matches!(self.current.kind, TokenKind::Identifier(_))
                && matches!(self.peek_kind(), TokenKind::Colon | TokenKind::Equals)
            {
                let name = self.current_identifier().unwrap_or_default();
                self.advance();
                self.advance(); // ':' or '='
                let value = self.current_literal_text();
                self.advance();
                self.skip_semicolon();
                declarations.insert(name, value);
            } else if matches!(self.current.kind, TokenKind::Identifier(_))
                && matches!(self.peek_kind(), TokenKind::Comma | TokenKind::Semicolon)
            {
                let mut properties = Vec::new();
                loop {
                    let Some(name) = self.current_identifier() else { break };
                    self.advance();
                    properties.push(name);
                    if self.at(TokenKind::Comma) {
                        self.advance();
                        continue;
                    }
                    break;
                }
                self.skip_semicolon();
                let span = self.current.span.clone();
                children.push(self.arena.alloc(Node::new(NodeKind::NoValueStyle { properties }, span)));
            } else {
                raw.push_str(&self.current_literal_text());
                raw.push(' ');
                self.advance();
            }
        }

        self.lexer.set_css_mode(false);
        self.expect(TokenKind::RBrace, sink);

        let span = self.span_since(&start);
        let mut node = Node::new(NodeKind::Style { raw: raw.trim().to_string() }, span);
        node.attributes = declarations;
        let node_id = self.arena.alloc(node);
        for child in children {
            self.arena.attach(node_id, child);
        }
        Some(node_id)
    }

    fn current_selector_text(&self) -> String {
        match &self.current.kind {
            TokenKind::ClassSelector(name) => format!(".{name}"),
            TokenKind::IdSelector(name) => format!("#{name}"),
            TokenKind::Ampersand => "&".to_string(),
            _ => String::new(),
        }
    }

    fn parse_style_rule(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        let mut selector = self.current_selector_text();
        self.advance();
        while self.at(TokenKind::Colon) || self.at(TokenKind::DoubleColon) {
            selector.push_str(if self.at(TokenKind::DoubleColon) { "::" } else { ":" });
            self.advance();
            if let Some(name) = self.current_identifier() {
                selector.push_str(&name);
                self.advance();
            }
        }
        self.expect(TokenKind::LBrace, sink);
        let mut node = Node::new(NodeKind::StyleRule { selector: selector.clone() }, start.clone()).with_name(selector);
        while !self.at(TokenKind::RBrace) && !self.is_at_end() {
            while self.at(TokenKind::Newline) {
                self.advance();
            }
            if self.at(TokenKind::RBrace) || self.is_at_end() {
                break;
            }
            if matches!(self.current.kind, TokenKind::Identifier(_))
                && matches!(self.peek_kind(), TokenKind::Colon | TokenKind::Equals)
            {
                let name = self.current_identifier().unwrap_or_default();
                self.advance();
                self.advance();
                let value = self.current_literal_text();
                self.advance();
                self.skip_semicolon();
                node.attributes.insert(name, value);
            } else {
                self.advance();
            }
        }
        self.expect(TokenKind::RBrace, sink);
        node.span = self.span_since(&start);
        Some(self.arena.alloc(node))
    }

    fn parse_script(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // 'script'
        let _guard = self.state.enter(ParseState::ParsingScriptBlock);
        self.expect(TokenKind::LBrace, sink);
        let raw = self.scan_opaque_body();
        self.expect(TokenKind::RBrace, sink);
        let span = self.span_since(&start);
        let trimmed = raw.trim().to_string();
        let mut node = Node::new(NodeKind::Script { raw: trimmed.clone() }, span);
        node.content = trimmed;
        Some(self.arena.alloc(node))
    }

    /// Scans an opaque brace-balanced body, stopping right before the final
    /// unmatched `}`, without interpreting its contents (spec §4.3: script
    /// bodies are "opaque to CHTL semantics beyond embedded references").
    fn scan_opaque_body(&mut self) -> String {
        let mut depth = 1usize;
        let mut raw = String::new();
        loop {
            match &self.current.kind {
                TokenKind::LBrace => {
                    depth += 1;
                    raw.push('{');
                    self.advance();
                }
                TokenKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    raw.push('}');
                    self.advance();
                }
                TokenKind::Eof => break,
                _ => {
                    raw.push_str(&self.current_literal_text());
                    raw.push(' ');
                    self.advance();
                }
            }
        }
        raw
    }

    // --- template / custom -----------------------------------------------------------

    fn parse_variety(&mut self, sink: &mut DiagnosticSink) -> Option<Variety> {
        match self.current.kind.clone() {
            TokenKind::AtType(t) if t == "Style" => {
                self.advance();
                Some(Variety::Style)
            }
            TokenKind::AtType(t) if t == "Element" => {
                self.advance();
                Some(Variety::Element)
            }
            TokenKind::AtType(t) if t == "Var" => {
                self.advance();
                Some(Variety::Var)
            }
            other => {
                sink.error(
                    SyntaxError::UnexpectedToken {
                        expected: "`@Style`, `@Element`, or `@Var`".to_string(),
                        found: describe_kind(&other),
                    },
                    self.current.span.clone(),
                );
                None
            }
        }
    }

    fn is_index_access_start(&mut self) -> bool {
        matches!(self.current.kind, TokenKind::Identifier(_)) && matches!(self.peek_kind(), TokenKind::LBracket)
    }

    fn is_var_entry_start(&mut self) -> bool {
        matches!(self.current.kind, TokenKind::Identifier(_))
            && matches!(self.peek_kind(), TokenKind::Colon | TokenKind::Equals)
    }

    fn parse_var_entry(&mut self, var_entries: &mut IndexMap<String, String>) {
        let name = self.current_identifier().unwrap_or_default();
        self.advance();
        if self.at(TokenKind::Colon) || self.at(TokenKind::Equals) {
            self.advance();
        }
        let value = self.current_literal_text();
        self.advance();
        self.skip_semicolon();
        var_entries.insert(name, value);
    }

    fn is_no_value_style_start(&mut self) -> bool {
        matches!(self.current.kind, TokenKind::Identifier(_)) && matches!(self.peek_kind(), TokenKind::Comma | TokenKind::Semicolon)
    }

    /// A bare comma-separated property-name list (spec §4.3 "no-value style
    /// production"), reused verbatim from the local `style { ... }` block
    /// grammar for `[Template]`/`[Custom] @Style` bodies.
    fn parse_no_value_style(&mut self) -> NodeId {
        let start = self.current.span.clone();
        let mut properties = Vec::new();
        loop {
            let Some(name) = self.current_identifier() else { break };
            self.advance();
            properties.push(name);
            if self.at(TokenKind::Comma) {
                self.advance();
                continue;
            }
            break;
        }
        self.skip_semicolon();
        let span = self.span_since(&start);
        self.arena.alloc(Node::new(NodeKind::NoValueStyle { properties }, span))
    }

    fn parse_index_number(&mut self, sink: &mut DiagnosticSink) -> usize {
        if let TokenKind::Number(text) = self.current.kind.clone() {
            self.advance();
            text.parse().unwrap_or(0)
        } else {
            sink.error(
                SyntaxError::UnexpectedToken { expected: "an index number".to_string(), found: describe_kind(&self.current.kind) },
                self.current.span.clone(),
            );
            0
        }
    }

    fn parse_index_access(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        let tag = self.expect_identifier(sink)?;
        self.expect(TokenKind::LBracket, sink);
        let index = self.parse_index_number(sink);
        self.expect(TokenKind::RBracket, sink);
        self.expect(TokenKind::LBrace, sink);
        let mut payload = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(n) = self.parse_statement(sink) {
                payload.push(n);
            } else if !self.is_at_end() {
                self.recover(sink);
            }
        }
        self.expect(TokenKind::RBrace, sink);
        let span = self.span_since(&start);
        Some(self.arena.alloc(Node::new(NodeKind::IndexAccess { tag, index, payload }, span)))
    }

    fn parse_template_or_custom(&mut self, is_custom: bool, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // '[Template]' or '[Custom]'
        let variety = self.parse_variety(sink)?;
        let name = self.expect_identifier(sink)?;
        let _guard = self.state.enter(if is_custom { ParseState::ParsingCustom } else { ParseState::ParsingTemplate });
        self.expect(TokenKind::LBrace, sink);

        let mut parents = Vec::new();
        let mut var_entries: IndexMap<String, String> = IndexMap::new();
        let mut body_children: Vec<NodeId> = Vec::new();

        while !self.at(TokenKind::RBrace) && !self.is_at_end() {
            // Var groups declare `name: value;` entries; Style groups declare CSS
            // properties in the same shape. Element groups never do, so their
            // bodies fall straight through to nested-element parsing below.
            if matches!(variety, Variety::Var | Variety::Style) && self.is_var_entry_start() {
                self.parse_var_entry(&mut var_entries);
                continue;
            }
            if variety == Variety::Style && self.is_no_value_style_start() {
                body_children.push(self.parse_no_value_style());
                continue;
            }
            if self.is_index_access_start() {
                if let Some(n) = self.parse_index_access(sink) {
                    body_children.push(n);
                } else if !self.is_at_end() {
                    self.recover(sink);
                }
                continue;
            }
            if let Some(n) = self.parse_statement(sink) {
                if let NodeKind::Inherit(parent_ref) = &self.arena.get(n).kind {
                    parents.push(parent_ref.clone());
                }
                body_children.push(n);
            } else if !self.is_at_end() {
                self.recover(sink);
            }
        }
        self.expect(TokenKind::RBrace, sink);

        let specializations: Vec<NodeId> = body_children
            .iter()
            .copied()
            .filter(|id| {
                matches!(self.arena.get(*id).kind, NodeKind::Delete { .. } | NodeKind::Insert { .. } | NodeKind::IndexAccess { .. })
            })
            .collect();

        let span = self.span_since(&start);
        let mut node = Node::new(NodeKind::TemplateDecl { is_custom, variety, parents, specializations }, span).with_name(name);
        node.attributes = var_entries;
        let node_id = self.arena.alloc(node);
        for child in body_children {
            self.arena.attach(node_id, child);
        }
        Some(node_id)
    }

    // --- specialization statements --------------------------------------------------

    fn parse_inherit(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // 'inherit'
        let type_tag = self.expect_at_type(sink)?;
        let name = self.expect_identifier(sink)?;
        self.skip_semicolon();
        let span = self.span_since(&start);
        Some(self.arena.alloc(Node::new(NodeKind::Inherit(ParentRef { type_tag, name }), span)))
    }

    fn parse_delete(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // 'delete'

        if let TokenKind::BracketKeyword(kw @ (BracketKeyword::Template | BracketKeyword::Custom)) = self.current.kind.clone() {
            let is_custom = kw == BracketKeyword::Custom;
            self.advance();
            let type_tag = self.expect_at_type(sink)?;
            let name = self.expect_identifier(sink)?;
            self.skip_semicolon();
            let span = self.span_since(&start);
            return Some(self.arena.alloc(Node::new(
                NodeKind::Delete { target: DeleteTarget::QualifiedTemplate { is_custom, type_tag, name } },
                span,
            )));
        }

        if matches!(self.current.kind, TokenKind::AtType(_)) {
            let type_tag = self.expect_at_type(sink)?;
            let name = self.expect_identifier(sink)?;
            self.skip_semicolon();
            let span = self.span_since(&start);
            return Some(
                self.arena.alloc(Node::new(NodeKind::Delete { target: DeleteTarget::Inheritance { type_tag, name } }, span)),
            );
        }

        let mut targets: Vec<String> = Vec::new();
        loop {
            let Some(name) = self.current_identifier() else { break };
            self.advance();
            if self.at(TokenKind::LBracket) {
                self.advance();
                let index = self.parse_index_number(sink);
                self.expect(TokenKind::RBracket, sink);
                self.skip_semicolon();
                let span = self.span_since(&start);
                return Some(self.arena.alloc(Node::new(
                    NodeKind::Delete { target: DeleteTarget::Element { tag: name, index: Some(index) } },
                    span,
                )));
            }
            targets.push(name);
            if self.at(TokenKind::Comma) {
                self.advance();
                continue;
            }
            break;
        }
        self.skip_semicolon();
        let span = self.span_since(&start);

        if targets.len() == 1 && html_tags::is_known_html_tag(&targets[0]) {
            Some(self.arena.alloc(Node::new(
                NodeKind::Delete { target: DeleteTarget::Element { tag: targets.remove(0), index: None } },
                span,
            )))
        } else {
            Some(self.arena.alloc(Node::new(NodeKind::Delete { target: DeleteTarget::Properties(targets) }, span)))
        }
    }

    fn parse_insert(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // 'insert'

        let position = match self.bare_keyword() {
            Some(BareKeyword::After) => {
                self.advance();
                InsertPosition::After
            }
            Some(BareKeyword::Before) => {
                self.advance();
                InsertPosition::Before
            }
            Some(BareKeyword::Replace) => {
                self.advance();
                InsertPosition::Replace
            }
            Some(BareKeyword::At) => {
                self.advance();
                match self.bare_keyword() {
                    Some(BareKeyword::Top) => {
                        self.advance();
                        InsertPosition::AtTop
                    }
                    Some(BareKeyword::Bottom) => {
                        self.advance();
                        InsertPosition::AtBottom
                    }
                    _ => {
                        sink.error(SyntaxError::Other("expected `top` or `bottom` after `at`".to_string()), self.current.span.clone());
                        InsertPosition::AtTop
                    }
                }
            }
            _ => {
                sink.error(
                    SyntaxError::Other("expected `after`, `before`, `replace`, or `at`".to_string()),
                    self.current.span.clone(),
                );
                InsertPosition::After
            }
        };

        let target = if !self.at(TokenKind::LBrace) {
            self.expect_identifier(sink).map(|tag| {
                let index = if self.at(TokenKind::LBracket) {
                    self.advance();
                    let i = self.parse_index_number(sink);
                    self.expect(TokenKind::RBracket, sink);
                    Some(i)
                } else {
                    None
                };
                TargetSelector { tag, index }
            })
        } else {
            None
        };

        self.expect(TokenKind::LBrace, sink);
        let mut payload = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(n) = self.parse_statement(sink) {
                payload.push(n);
            } else if !self.is_at_end() {
                self.recover(sink);
            }
        }
        self.expect(TokenKind::RBrace, sink);
        let span = self.span_since(&start);
        Some(self.arena.alloc(Node::new(NodeKind::Insert { position, target, payload }, span)))
    }

    fn parse_except(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // 'except'
        let mut targets = Vec::new();

        if self.at(TokenKind::Semicolon) {
            targets.push(ExceptTarget::Global);
        } else {
            loop {
                match self.current.kind.clone() {
                    TokenKind::BracketKeyword(BracketKeyword::Template | BracketKeyword::Custom) => {
                        self.advance();
                        if let Some(type_tag) = self.expect_at_type(sink) {
                            if let Some(name) = self.current_identifier() {
                                self.advance();
                                targets.push(ExceptTarget::Symbol { type_tag, name });
                            } else {
                                targets.push(ExceptTarget::Type(type_tag));
                            }
                        }
                    }
                    TokenKind::AtType(t) => {
                        self.advance();
                        targets.push(ExceptTarget::Type(t));
                    }
                    TokenKind::Identifier(name) => {
                        self.advance();
                        targets.push(ExceptTarget::ElementName(name));
                    }
                    _ => break,
                }
                if self.at(TokenKind::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.skip_semicolon();
        let span = self.span_since(&start);
        Some(self.arena.alloc(Node::new(NodeKind::Except { targets }, span)))
    }

    fn parse_use(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // 'use'
        let kind = if let Some(BareKeyword::Html5) = self.bare_keyword() {
            self.advance();
            UseKind::Html5
        } else if matches!(&self.current.kind, TokenKind::AtType(t) if t == "Config") {
            self.advance();
            let Some(name) = self.expect_identifier(sink) else {
                self.skip_semicolon();
                return None;
            };
            if let Some(cfg) = self.registry.get(&name).cloned() {
                self.activate_config(cfg);
            }
            self.registry.activate(&name);
            UseKind::Config(name)
        } else {
            sink.error(SyntaxError::Other("expected `html5` or `@Config Name` after `use`".to_string()), self.current.span.clone());
            UseKind::Html5
        };
        self.skip_semicolon();
        let span = self.span_since(&start);
        Some(self.arena.alloc(Node::new(NodeKind::Use { kind }, span)))
    }

    // --- namespace / origin / import -------------------------------------------------

    fn parse_namespace(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // '[Namespace]'
        let path = self.expect_identifier(sink)?;
        let _guard = self.state.enter(ParseState::ParsingNamespace);
        self.expect(TokenKind::LBrace, sink);
        let mut children = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(n) = self.parse_statement(sink) {
                children.push(n);
            } else if !self.is_at_end() {
                self.recover(sink);
            }
        }
        self.expect(TokenKind::RBrace, sink);
        let span = self.span_since(&start);
        let node_id = self.arena.alloc(Node::new(NodeKind::Namespace { path, merge: false }, span));
        for child in children {
            self.arena.attach(node_id, child);
        }
        Some(node_id)
    }

    fn parse_origin(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // '[Origin]'
        let type_tag = match self.current.kind.clone() {
            TokenKind::AtType(t) => {
                self.advance();
                match t.as_str() {
                    "Html" => OriginTypeTag::Html,
                    "Style" => OriginTypeTag::Style,
                    "JavaScript" => OriginTypeTag::JavaScript,
                    other => OriginTypeTag::Custom(other.to_string()),
                }
            }
            other => {
                sink.error(
                    SyntaxError::UnexpectedToken { expected: "an origin type (`@Html`, `@Style`, `@JavaScript`, or a user type)".to_string(), found: describe_kind(&other) },
                    self.current.span.clone(),
                );
                return None;
            }
        };
        let alias = if let Some(name) = self.current_identifier() {
            self.advance();
            Some(name)
        } else {
            None
        };
        let _guard = self.state.enter(ParseState::ParsingOrigin);
        self.expect(TokenKind::LBrace, sink);
        let raw = self.scan_opaque_body();
        self.expect(TokenKind::RBrace, sink);
        let span = self.span_since(&start);
        let mut node = Node::new(NodeKind::Origin { type_tag, alias }, span);
        node.content = raw.trim().to_string();
        Some(self.arena.alloc(node))
    }

    fn parse_path_literal(&mut self, sink: &mut DiagnosticSink) -> String {
        match self.current.kind.clone() {
            TokenKind::QuotedString(s) => {
                self.advance();
                s
            }
            TokenKind::UnquotedLiteral(s) | TokenKind::Identifier(s) => {
                self.advance();
                s
            }
            other => {
                sink.error(
                    SyntaxError::UnexpectedToken { expected: "an import path literal".to_string(), found: describe_kind(&other) },
                    self.current.span.clone(),
                );
                String::new()
            }
        }
    }

    fn parse_import(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // '[Import]'
        let _guard = self.state.enter(ParseState::ParsingImport);

        let kind = match self.current.kind.clone() {
            TokenKind::AtType(t) => {
                self.advance();
                match t.as_str() {
                    "Html" => ImportKind::Html,
                    "Style" => ImportKind::Style,
                    "JavaScript" => ImportKind::JavaScript,
                    "Chtl" => ImportKind::Chtl,
                    "CJmod" => ImportKind::CJmod,
                    "Config" => ImportKind::Config,
                    other => ImportKind::Origin(other.to_string()),
                }
            }
            TokenKind::BracketKeyword(BracketKeyword::Origin) => {
                self.advance();
                match self.current.kind.clone() {
                    TokenKind::AtType(t) => {
                        self.advance();
                        ImportKind::Origin(t)
                    }
                    other => {
                        sink.error(
                            SyntaxError::UnexpectedToken { expected: "an origin type after `[Origin]`".to_string(), found: describe_kind(&other) },
                            self.current.span.clone(),
                        );
                        return None;
                    }
                }
            }
            TokenKind::BracketKeyword(kw @ (BracketKeyword::Template | BracketKeyword::Custom)) => {
                self.advance();
                let variety = if matches!(self.current.kind, TokenKind::AtType(_)) { self.parse_variety(sink) } else { None };
                if kw == BracketKeyword::Template {
                    ImportKind::Template(variety)
                } else {
                    ImportKind::Custom(variety)
                }
            }
            other => {
                sink.error(
                    SyntaxError::UnexpectedToken { expected: "an import kind".to_string(), found: describe_kind(&other) },
                    self.current.span.clone(),
                );
                return None;
            }
        };

        let mut alias = None;
        if let Some(BareKeyword::As) = self.bare_keyword() {
            self.advance();
            alias = self.expect_identifier(sink);
        }

        if self.bare_keyword() == Some(BareKeyword::From) {
            self.advance();
        } else {
            sink.error(SyntaxError::Other("expected `from`".to_string()), self.current.span.clone());
        }

        let raw_path = self.parse_path_literal(sink);
        let is_wildcard = raw_path.contains('*');
        let is_recursive_wildcard = raw_path.contains("**");
        if is_wildcard && alias.is_some() {
            sink.error(SyntaxError::AliasOnWildcardImport, self.previous_span.clone());
        }

        let mut excludes = Vec::new();
        if let Some(BareKeyword::Except) = self.bare_keyword() {
            self.advance();
            loop {
                let Some(name) = self.expect_identifier(sink) else { break };
                excludes.push(name);
                if self.at(TokenKind::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.skip_semicolon();
        let span = self.span_since(&start);
        Some(self.arena.alloc(Node::new(
            NodeKind::Import { kind, raw_path, resolved_path: None, alias, excludes, is_wildcard, is_recursive_wildcard },
            span,
        )))
    }

    // --- configuration ----------------------------------------------------------------

    fn parse_name_block(&mut self, config: &mut Configuration, sink: &mut DiagnosticSink) {
        self.expect(TokenKind::LBrace, sink);
        while !self.at(TokenKind::RBrace) && !self.is_at_end() {
            let Some(key) = self.expect_identifier(sink) else {
                self.recover(sink);
                continue;
            };
            if self.at(TokenKind::Equals) || self.at(TokenKind::Colon) {
                self.advance();
            }
            let alternatives = self.parse_alternative_list();
            if let Err(e) = config.set_name_alternatives(&key, alternatives) {
                sink.error(e, self.previous_span.clone());
            }
            self.skip_semicolon();
        }
        self.expect(TokenKind::RBrace, sink);
    }

    fn parse_alternative_list(&mut self) -> Vec<String> {
        if self.at(TokenKind::LBracket) {
            self.advance();
            let mut items = Vec::new();
            while !self.at(TokenKind::RBracket) && !self.is_at_end() {
                items.push(self.current_literal_text());
                self.advance();
                if self.at(TokenKind::Comma) {
                    self.advance();
                }
            }
            if self.at(TokenKind::RBracket) {
                self.advance();
            }
            items
        } else {
            let item = self.current_literal_text();
            self.advance();
            vec![item]
        }
    }

    fn parse_origin_type_block(&mut self, config: &mut Configuration, sink: &mut DiagnosticSink) {
        self.expect(TokenKind::LBrace, sink);
        while !self.at(TokenKind::RBrace) && !self.is_at_end() {
            let Some(key) = self.expect_identifier(sink) else {
                self.recover(sink);
                continue;
            };
            if self.at(TokenKind::Equals) || self.at(TokenKind::Colon) {
                self.advance();
            }
            if let TokenKind::AtType(t) = self.current.kind.clone() {
                config.register_origin_type(&key, &t);
                self.advance();
            } else {
                sink.error(SyntaxError::Other("expected an `@Type` value".to_string()), self.current.span.clone());
            }
            self.skip_semicolon();
        }
        self.expect(TokenKind::RBrace, sink);
    }

    fn parse_configuration(&mut self, sink: &mut DiagnosticSink) -> Option<NodeId> {
        let start = self.current.span.clone();
        self.advance(); // '[Configuration]'
        let mut name = None;
        if matches!(&self.current.kind, TokenKind::AtType(t) if t == "Config") {
            self.advance();
            name = self.expect_identifier(sink);
        }
        let is_default = name.is_none();
        let mut config = Configuration::new(name, is_default);
        let _guard = self.state.enter(ParseState::ParsingConfig);
        self.expect(TokenKind::LBrace, sink);

        while !self.at(TokenKind::RBrace) && !self.is_at_end() {
            match self.current.kind.clone() {
                TokenKind::BracketKeyword(BracketKeyword::Name) => {
                    self.advance();
                    self.parse_name_block(&mut config, sink);
                }
                TokenKind::BracketKeyword(BracketKeyword::OriginType) => {
                    self.advance();
                    self.parse_origin_type_block(&mut config, sink);
                }
                TokenKind::Identifier(key) => {
                    self.advance();
                    if self.at(TokenKind::Equals) || self.at(TokenKind::Colon) {
                        self.advance();
                    }
                    let value_text = self.current_literal_text();
                    self.advance();
                    self.skip_semicolon();
                    if let Err(e) = set_typed_option(&mut config, &key, &value_text) {
                        sink.error(e, self.previous_span.clone());
                    }
                }
                _ => self.recover(sink),
            }
        }
        self.expect(TokenKind::RBrace, sink);
        let span = self.span_since(&start);

        let config_for_node = config.clone();
        if let Err(e) = self.registry.add(config) {
            sink.error(e, span.clone());
        }
        let active = self.registry.active().into_owned();
        self.activate_config(active);

        Some(self.arena.alloc(Node::new(NodeKind::ConfigurationDecl { config: Box::new(config_for_node) }, span)))
    }

    fn parse_generator_comment(&mut self) -> NodeId {
        let start = self.current.span.clone();
        let text = match &self.current.kind {
            TokenKind::GeneratorComment(s) => s.clone(),
            _ => String::new(),
        };
        self.advance();
        let span = self.span_since(&start);
        let mut node = Node::new(NodeKind::GeneratorComment, span);
        node.content = text;
        self.arena.alloc(node)
    }
}

fn set_typed_option(config: &mut Configuration, key: &str, value: &str) -> Result<(), ConfigError> {
    let option = if let Ok(n) = value.parse::<i64>() {
        OptionValue::Int(n)
    } else if value.eq_ignore_ascii_case("true") {
        OptionValue::Bool(true)
    } else if value.eq_ignore_ascii_case("false") {
        OptionValue::Bool(false)
    } else {
        OptionValue::Str(value.to_string())
    };
    config.set_option(key, option)
}

fn describe_kind(kind: &TokenKind) -> String {
    match kind {
        TokenKind::LBrace => "`{`".to_string(),
        TokenKind::RBrace => "`}`".to_string(),
        TokenKind::LBracket => "`[`".to_string(),
        TokenKind::RBracket => "`]`".to_string(),
        TokenKind::LParen => "`(`".to_string(),
        TokenKind::RParen => "`)`".to_string(),
        TokenKind::Semicolon => "`;`".to_string(),
        TokenKind::Comma => "`,`".to_string(),
        TokenKind::Colon => "`:`".to_string(),
        TokenKind::Equals => "`=`".to_string(),
        TokenKind::Identifier(s) => format!("identifier `{s}`"),
        TokenKind::AtType(s) => format!("`@{s}`"),
        TokenKind::Eof => "end of input".to_string(),
        other => format!("{other:?}"),
    }
}

/// Convenience entry point: parse one in-memory source string end to end.
pub fn parse_source(source: &str, file_name: impl Into<String>, sink: &mut DiagnosticSink) -> ParseOutcome {
    Parser::new(source, file_name).parse(sink)
}
