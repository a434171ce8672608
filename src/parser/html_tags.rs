//! The set of recognized HTML5 element names, used only to flag whether an
//! [`Element`](crate::ast::NodeKind::Element) tag is a known HTML tag or a
//! user/custom one (spec §4.3: "unknown tags are still accepted and flagged
//! only by the constraint engine").

use once_cell::sync::Lazy;
use std::collections::HashSet;

static HTML_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "html", "head", "body", "title", "meta", "link", "style", "script", "base",
        "div", "span", "p", "a", "img", "ul", "ol", "li", "table", "thead", "tbody",
        "tfoot", "tr", "td", "th", "form", "input", "button", "select", "option",
        "textarea", "label", "fieldset", "legend", "h1", "h2", "h3", "h4", "h5", "h6",
        "header", "footer", "nav", "main", "section", "article", "aside", "figure",
        "figcaption", "video", "audio", "source", "canvas", "svg", "iframe", "embed",
        "object", "param", "br", "hr", "pre", "code", "blockquote", "cite", "em",
        "strong", "small", "s", "u", "b", "i", "mark", "sub", "sup", "abbr", "address",
        "time", "progress", "meter", "details", "summary", "dialog", "template",
        "slot", "picture", "track", "map", "area", "colgroup", "col", "datalist",
        "optgroup", "output", "ruby", "rt", "rp", "wbr", "noscript", "dl", "dt", "dd",
    ])
});

pub fn is_known_html_tag(tag: &str) -> bool {
    HTML_TAGS.contains(tag)
}
