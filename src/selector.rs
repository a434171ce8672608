//! CSS selector parsing for local `style { ... }` rules (spec §4.7).
//!
//! A [`StyleRule`](crate::ast::NodeKind::StyleRule)'s selector text is one
//! compound selector: an optional leading `&` (reference to the enclosing
//! element), an optional tag name, any number of `.class`/`#id` parts in
//! the order written, and a trailing pseudo-class/attribute tail carried
//! through unparsed for re-emission. Grounded on the teacher's
//! `directive_matching.rs` (`CssSelector`, `SELECTOR_REGEXP`), narrowed to
//! the single-compound-selector shape CHTL style rules actually use (no
//! combinators, no comma groups, no `:not()`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one `.class`, `#id`, or bare tag-name part, in order, anchored at
/// the start of the remaining input.
static PART_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([.#]?)([-\w]+)").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssSelector {
    /// `true` when the selector text started with `&` (spec §4.3 "reference
    /// productions inside local style blocks").
    pub is_reference: bool,
    pub element: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Everything after the last recognized `.class`/`#id`/tag part
    /// (pseudo-classes, attribute selectors, combinators) kept verbatim so
    /// it survives re-emission untouched.
    pub tail: String,
}

/// The standard (inline, id, class, element) specificity 4-tuple (spec
/// §4.7 "Selector specificity is computed in the standard ... manner").
/// `inline` is always `0` for a selector parsed from source text; callers
/// producing specificity for an inline `style="..."` attribute construct it
/// directly instead of through [`CssSelector::specificity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32, pub u32, pub u32, pub u32);

impl CssSelector {
    pub fn parse(selector: &str) -> Result<CssSelector, String> {
        let mut rest = selector.trim();
        let mut result = CssSelector::default();

        if let Some(stripped) = rest.strip_prefix('&') {
            result.is_reference = true;
            rest = stripped;
        }

        loop {
            let Some(caps) = PART_REGEXP.captures(rest) else { break };
            let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let name = caps.get(2).unwrap().as_str();
            match prefix {
                "#" => {
                    if result.id.is_some() {
                        return Err(format!("multiple id selectors in `{selector}`"));
                    }
                    result.id = Some(name.to_string());
                }
                "." => result.classes.push(name.to_string()),
                _ => {
                    if result.element.is_some() {
                        return Err(format!("multiple tag names in `{selector}`"));
                    }
                    result.element = Some(name.to_string());
                }
            }
            rest = &rest[caps.get(0).unwrap().end()..];
        }

        result.tail = rest.to_string();
        Ok(result)
    }

    /// The element-or-`&` selector's first declared class, i.e. the
    /// "primary" selector spec §4.7 step 3 rewrites `&` to.
    pub fn primary_class(&self) -> Option<&str> {
        self.classes.first().map(String::as_str)
    }

    /// Renders the primary selector text: the first class (preferring
    /// class over id per spec §4.7 step 3) or the id, as a selector
    /// fragment (`.name` / `#name`).
    pub fn primary_selector_text(classes: &[String], id: Option<&str>) -> Option<String> {
        if let Some(first) = classes.first() {
            Some(format!(".{first}"))
        } else {
            id.map(|i| format!("#{i}"))
        }
    }

    /// Rewrites a leading `&` to the given primary selector text, leaving
    /// the rest of the selector (pseudo-classes, attributes) untouched.
    pub fn rewrite_reference(selector_text: &str, primary: &str) -> String {
        if let Some(rest) = selector_text.strip_prefix('&') {
            format!("{primary}{rest}")
        } else {
            selector_text.to_string()
        }
    }

    pub fn specificity(&self) -> Specificity {
        let id = if self.id.is_some() { 1 } else { 0 };
        let class = self.classes.len() as u32 + count_pseudo_and_attrs(&self.tail);
        let element = if self.element.is_some() { 1 } else { 0 };
        Specificity(0, id, class, element)
    }
}

/// Pseudo-classes (`:hover`) and attribute selectors (`[disabled]`) count
/// toward the "class" specificity column alongside literal classes.
fn count_pseudo_and_attrs(tail: &str) -> u32 {
    tail.matches(':').count() as u32 + tail.matches('[').count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_class_and_id_parts() {
        let sel = CssSelector::parse(".box#main").unwrap();
        assert_eq!(sel.classes, vec!["box".to_string()]);
        assert_eq!(sel.id.as_deref(), Some("main"));
        assert!(!sel.is_reference);
    }

    #[test]
    fn parses_element_with_pseudo_tail() {
        let sel = CssSelector::parse("div:hover").unwrap();
        assert_eq!(sel.element.as_deref(), Some("div"));
        assert_eq!(sel.tail, ":hover");
    }

    #[test]
    fn recognizes_ampersand_reference() {
        let sel = CssSelector::parse("&:hover").unwrap();
        assert!(sel.is_reference);
        assert_eq!(sel.tail, ":hover");
    }

    #[test]
    fn rewrites_ampersand_to_primary_class() {
        let primary = CssSelector::primary_selector_text(&["box".to_string()], None).unwrap();
        assert_eq!(CssSelector::rewrite_reference("&:hover", &primary), ".box:hover");
    }

    #[test]
    fn rewrites_ampersand_to_id_when_no_class() {
        let primary = CssSelector::primary_selector_text(&[], Some("main")).unwrap();
        assert_eq!(CssSelector::rewrite_reference("&", &primary), "#main");
    }

    #[test]
    fn specificity_orders_id_over_class_over_element() {
        let id_sel = CssSelector::parse("#main").unwrap().specificity();
        let class_sel = CssSelector::parse(".box").unwrap().specificity();
        let el_sel = CssSelector::parse("div").unwrap().specificity();
        assert!(id_sel > class_sel);
        assert!(class_sel > el_sel);
    }

    #[test]
    fn descendant_combinator_is_kept_verbatim_in_tail() {
        // CHTL style rules are single compound selectors; anything after a
        // descendant space is foreign syntax this layer doesn't interpret.
        let sel = CssSelector::parse("div span").unwrap();
        assert_eq!(sel.element.as_deref(), Some("div"));
        assert_eq!(sel.tail, " span");
    }
}
