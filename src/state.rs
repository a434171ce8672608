//! The parse-state machine (spec §4.2): a stack of parse contexts plus
//! bracket-depth counters and a small set of boolean flags, entered and left
//! with RAII guards so a parser function can never forget to pop what it
//! pushed, even on an early `?` return.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
    Initial,
    ParsingElement,
    ParsingAttributes,
    ParsingTextBlock,
    ParsingStyleBlock,
    ParsingScriptBlock,
    ParsingTemplate,
    ParsingCustom,
    ParsingOrigin,
    ParsingImport,
    ParsingConfig,
    ParsingNamespace,
    ParsingUse,
    ParsingExcept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    Element,
    Template,
    Custom,
    Type,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintRule {
    pub kind: ConstraintType,
    pub target: String,
    pub context: String,
    pub is_global: bool,
}

impl ConstraintRule {
    pub fn new(kind: ConstraintType, target: impl Into<String>) -> Self {
        ConstraintRule { kind, target: target.into(), context: String::new(), is_global: false }
    }

    pub fn global(kind: ConstraintType, target: impl Into<String>) -> Self {
        ConstraintRule { kind, target: target.into(), context: String::new(), is_global: true }
    }

    pub fn in_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthKind {
    Brace,
    Bracket,
    Paren,
}

/// Tracks the parser's nested context: which grammar production it is inside,
/// how deep its bracket nesting runs, and the ambient flags/constraints that
/// production carries (spec §4.2's "constraint and context stacks").
///
/// `constraints`/`add_constraint`/`is_blocked` model the parse-time half of
/// spec §4.8's constraint engine, but `parser/mod.rs` doesn't populate or
/// consult them yet — `except` rejection currently happens only in
/// `constraint.rs`'s post-parse pass. The fields stay here, exercised by
/// this module's own tests, as the scaffolding a parse-time pass would use.
#[derive(Debug, Default)]
pub struct ParserState {
    stack: Vec<ParseState>,
    constraints: Vec<ConstraintRule>,
    flags: HashSet<&'static str>,
    brace_depth: usize,
    bracket_depth: usize,
    paren_depth: usize,
}

impl ParserState {
    pub fn new() -> Self {
        ParserState::default()
    }

    pub fn current(&self) -> ParseState {
        self.stack.last().copied().unwrap_or(ParseState::Initial)
    }

    pub fn previous(&self) -> Option<ParseState> {
        let len = self.stack.len();
        if len < 2 {
            None
        } else {
            Some(self.stack[len - 2])
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_in(&self, state: ParseState) -> bool {
        self.stack.contains(&state)
    }

    pub fn is_initial(&self) -> bool {
        self.stack.is_empty()
    }

    fn push(&mut self, state: ParseState) {
        self.stack.push(state);
    }

    fn pop(&mut self) {
        self.stack.pop();
    }

    /// Enter `state` for the lifetime of the returned guard.
    pub fn enter(&mut self, state: ParseState) -> StateGuard<'_> {
        self.push(state);
        StateGuard { state: self }
    }

    pub fn enter_depth(&mut self, kind: DepthKind) -> DepthGuard<'_> {
        match kind {
            DepthKind::Brace => self.brace_depth += 1,
            DepthKind::Bracket => self.bracket_depth += 1,
            DepthKind::Paren => self.paren_depth += 1,
        }
        DepthGuard { state: self, kind }
    }

    pub fn brace_depth(&self) -> usize {
        self.brace_depth
    }

    pub fn bracket_depth(&self) -> usize {
        self.bracket_depth
    }

    pub fn paren_depth(&self) -> usize {
        self.paren_depth
    }

    pub fn add_constraint(&mut self, rule: ConstraintRule) {
        self.constraints.push(rule);
    }

    pub fn remove_constraint(&mut self, target: &str) {
        self.constraints.retain(|rule| rule.target != target);
    }

    pub fn constraints(&self) -> &[ConstraintRule] {
        &self.constraints
    }

    pub fn clear_constraints(&mut self) {
        self.constraints.clear();
    }

    /// A name is blocked if any non-global constraint matching `kind` names it
    /// and we are inside that constraint's context, or any global constraint
    /// names it regardless of context.
    pub fn is_blocked(&self, kind: ConstraintType, name: &str, context: &str) -> bool {
        self.constraints.iter().any(|rule| {
            rule.kind == kind
                && rule.target == name
                && (rule.is_global || rule.context == context)
        })
    }

    pub fn set_flag(&mut self, flag: &'static str) {
        self.flags.insert(flag);
    }

    pub fn clear_flag(&mut self, flag: &str) {
        self.flags.remove(flag);
    }

    pub fn flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn clear_all_flags(&mut self) {
        self.flags.clear();
    }

    pub fn is_in_local_style_block(&self) -> bool {
        self.flag("in_local_style")
    }

    pub fn is_in_local_script_block(&self) -> bool {
        self.flag("in_local_script")
    }

    pub fn is_in_template_block(&self) -> bool {
        self.flag("in_template")
    }

    pub fn is_in_custom_block(&self) -> bool {
        self.flag("in_custom")
    }

    pub fn reset(&mut self) {
        *self = ParserState::new();
    }
}

/// Pops the state pushed by [`ParserState::enter`] when dropped, including on
/// an early return from a failing parse function.
pub struct StateGuard<'a> {
    state: &'a mut ParserState,
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        self.state.pop();
    }
}

/// Decrements the matching depth counter pushed by
/// [`ParserState::enter_depth`] when dropped.
pub struct DepthGuard<'a> {
    state: &'a mut ParserState,
    kind: DepthKind,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        let counter = match self.kind {
            DepthKind::Brace => &mut self.state.brace_depth,
            DepthKind::Bracket => &mut self.state.bracket_depth,
            DepthKind::Paren => &mut self.state.paren_depth,
        };
        *counter = counter.saturating_sub(1);
    }
}
