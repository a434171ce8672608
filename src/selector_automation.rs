//! Selector automation engine (spec §4.7): the last middle-end pass, run
//! once inheritance resolution has produced the final child/property sets.
//! For every element, infers missing `class`/`id` attributes from the
//! selectors used in its local `style` block and rewrites `&` references to
//! the element's primary selector; local `script` blocks get the same
//! class/id inference (but never `&` rewriting, since their body is raw
//! text, not a structured selector) under the symmetric `DISABLE_SCRIPT_*`
//! toggles. Grounded on `CHTLManage/SelectorManager.h`
//! (`SelectorAutoRule`, `autoGenerateSelectors`, `resolveAmpersandReference`)
//! and the teacher's `shadow_css.rs` host-selector-rewrite idiom (mutating a
//! selector string in place based on a computed host selector).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Arena, NodeId, NodeKind};
use crate::config::Configuration;
use crate::selector::CssSelector;

/// A lightweight scan for `.class`/`#id` tokens inside a local `script`
/// block's raw text. A full JavaScript parser is explicitly out of scope
/// (spec §1 Non-goals), so script selector references are recognized the
/// same way the original's `SelectorManager` consumes a pre-extracted
/// selector list rather than re-parsing the script body.
static SCRIPT_SELECTOR_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.#])([A-Za-z_][-\w]*)").unwrap());

/// Runs selector automation over every element in `root`'s subtree.
pub fn run(arena: &mut Arena, root: NodeId, config: &Configuration) {
    automate_subtree(arena, root, config);
}

fn automate_subtree(arena: &mut Arena, id: NodeId, config: &Configuration) {
    if matches!(arena.get(id).kind, NodeKind::Element { .. }) {
        automate_element(arena, id, config);
    }
    let children = arena.get(id).children.clone();
    for child in children {
        automate_subtree(arena, child, config);
    }
}

fn automate_element(arena: &mut Arena, id: NodeId, config: &Configuration) {
    let (style_children, script_children, mut classes, mut elem_id) = {
        let NodeKind::Element { style_children, script_children, classes, id: elem_id, .. } = &arena.get(id).kind else {
            unreachable!("automate_element called on a non-element node")
        };
        (style_children.to_vec(), script_children.to_vec(), classes.clone(), elem_id.clone())
    };

    let style_rules = collect_style_rules(arena, &style_children);

    if !config.is_style_auto_add_class_disabled() {
        for (_, selector) in &style_rules {
            for class in &selector.classes {
                classes.insert(class.clone());
            }
        }
    }
    if !config.is_style_auto_add_id_disabled() && elem_id.is_none() {
        elem_id = style_rules.iter().find_map(|(_, s)| s.id.clone());
    }

    if !config.is_script_auto_add_class_disabled() || !config.is_script_auto_add_id_disabled() {
        for &script_id in &script_children {
            let NodeKind::Script { raw } = &arena.get(script_id).kind else { continue };
            for cap in SCRIPT_SELECTOR_REGEXP.captures_iter(raw) {
                let prefix = &cap[1];
                let name = &cap[2];
                if prefix == "." && !config.is_script_auto_add_class_disabled() {
                    classes.insert(name.to_string());
                } else if prefix == "#" && !config.is_script_auto_add_id_disabled() && elem_id.is_none() {
                    elem_id = Some(name.to_string());
                }
            }
        }
    }

    let primary = CssSelector::primary_selector_text(&classes.iter().cloned().collect::<Vec<_>>(), elem_id.as_deref());
    if let Some(primary) = &primary {
        for (rule_id, selector) in &style_rules {
            if selector.is_reference {
                let NodeKind::StyleRule { selector: text } = &arena.get(*rule_id).kind else { continue };
                let rewritten = CssSelector::rewrite_reference(text, primary);
                let NodeKind::StyleRule { selector } = &mut arena.get_mut(*rule_id).kind else { unreachable!() };
                *selector = rewritten;
            }
        }
    }

    write_back(arena, id, classes, elem_id);
}

fn collect_style_rules(arena: &Arena, style_children: &[NodeId]) -> Vec<(NodeId, CssSelector)> {
    let mut rules = Vec::new();
    for &style_id in style_children {
        for &rule_id in &arena.get(style_id).children {
            let NodeKind::StyleRule { selector } = &arena.get(rule_id).kind else { continue };
            if let Ok(parsed) = CssSelector::parse(selector) {
                rules.push((rule_id, parsed));
            }
        }
    }
    rules
}

fn write_back(arena: &mut Arena, id: NodeId, classes: indexmap::IndexSet<String>, elem_id: Option<String>) {
    let node = arena.get_mut(id);
    if !classes.is_empty() {
        node.attributes.insert("class".to_string(), classes.iter().cloned().collect::<Vec<_>>().join(" "));
    }
    if let Some(value) = &elem_id {
        node.attributes.insert("id".to_string(), value.clone());
    }
    let NodeKind::Element { classes: node_classes, id: node_id, .. } = &mut node.kind else {
        unreachable!("automate_element called on a non-element node")
    };
    *node_classes = classes;
    *node_id = elem_id;
}
