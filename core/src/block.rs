//! Declarative markup blocks.
//!
//! A [`Block`] is a plain-data tree describing HTML: elements with ordered
//! attributes and children, escaped text leaves, and tagless fragments. The
//! same tree type describes full pages and the fragments returned by actions,
//! so both paths render through one serializer.
//!
//! Blocks hold no request or session state. They can be cloned, compared,
//! serialized with `serde`, and rendered any number of times with identical
//! output.
//!
//! # Example
//!
//! ```
//! use guiapi_core::block::{self, class, Block};
//!
//! let view: Block = block::div(
//!     class("ui form"),
//!     vec![
//!         block::label(None, vec!["Code".into()]),
//!         block::input(block::type_("text").name("Code").value("X1")),
//!     ],
//! );
//!
//! assert_eq!(
//!     view.render(),
//!     r#"<div class="ui form"><label>Code</label><input type="text" name="Code" value="X1"/></div>"#
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Elements that never carry children and always render self-closing.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Returns `true` if `tag` is a void element.
#[must_use]
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

/// Returns `true` if `tag` can be written as an element name: an ASCII
/// letter followed by ASCII letters, digits or `-`.
#[must_use]
pub fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Returns `true` if `key` can be written as an attribute name.
///
/// Rejects the empty string, whitespace, control characters and the
/// characters `"`, `'`, `<`, `>`, `/` and `=`.
#[must_use]
pub fn is_valid_attr_key(key: &str) -> bool {
    !key.is_empty()
        && !key.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

/// Value of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Rendered as `key="value"`.
    Str(String),
    /// Rendered as a bare `key` when `true`, omitted when `false`.
    Flag(bool),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Ordered attribute list.
///
/// Insertion order is preserved on render. Setting a key that already exists
/// replaces its value and keeps its original position. Values are escaped;
/// keys are not, so keys failing [`is_valid_attr_key`] are dropped on render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(Vec<(String, AttrValue)>);

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Return the list with `key` set to `value`.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
        self
    }

    /// Set the `class` attribute.
    #[must_use]
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value.into())
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn id(self, value: impl Into<String>) -> Self {
        self.attr("id", value.into())
    }

    /// Set the `name` attribute.
    #[must_use]
    pub fn name(self, value: impl Into<String>) -> Self {
        self.attr("name", value.into())
    }

    /// Set the `type` attribute.
    #[must_use]
    pub fn type_(self, value: impl Into<String>) -> Self {
        self.attr("type", value.into())
    }

    /// Set the `value` attribute.
    #[must_use]
    pub fn value(self, value: impl Into<String>) -> Self {
        self.attr("value", value.into())
    }

    /// Set the `href` attribute.
    #[must_use]
    pub fn href(self, value: impl Into<String>) -> Self {
        self.attr("href", value.into())
    }

    /// Set the `src` attribute.
    #[must_use]
    pub fn src(self, value: impl Into<String>) -> Self {
        self.attr("src", value.into())
    }

    /// Set the `rel` attribute.
    #[must_use]
    pub fn rel(self, value: impl Into<String>) -> Self {
        self.attr("rel", value.into())
    }

    /// Set the `onclick` attribute.
    #[must_use]
    pub fn onclick(self, value: impl Into<String>) -> Self {
        self.attr("onclick", value.into())
    }

    /// Set the `disabled` flag.
    #[must_use]
    pub fn disabled(self, disabled: bool) -> Self {
        self.attr("disabled", disabled)
    }

    /// Look up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Iterate attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn render_into(&self, out: &mut String) {
        for (key, value) in &self.0 {
            if !is_valid_attr_key(key) {
                tracing::warn!(key = %key, "Dropping attribute with invalid name");
                continue;
            }
            match value {
                AttrValue::Str(value) => {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    escape_attr_into(value, out);
                    out.push('"');
                }
                AttrValue::Flag(true) => {
                    out.push(' ');
                    out.push_str(key);
                }
                AttrValue::Flag(false) => {}
            }
        }
    }
}

/// Start an attribute list with an arbitrary key.
#[must_use]
pub fn attr(key: impl Into<String>, value: impl Into<AttrValue>) -> Attributes {
    Attributes::new().attr(key, value)
}

/// Start an attribute list with `class`.
#[must_use]
pub fn class(value: impl Into<String>) -> Attributes {
    Attributes::new().class(value)
}

/// Start an attribute list with `id`.
#[must_use]
pub fn id(value: impl Into<String>) -> Attributes {
    Attributes::new().id(value)
}

/// Start an attribute list with `name`.
#[must_use]
pub fn name(value: impl Into<String>) -> Attributes {
    Attributes::new().name(value)
}

/// Start an attribute list with `type`.
#[must_use]
pub fn type_(value: impl Into<String>) -> Attributes {
    Attributes::new().type_(value)
}

/// Start an attribute list with `href`.
#[must_use]
pub fn href(value: impl Into<String>) -> Attributes {
    Attributes::new().href(value)
}

/// Start an attribute list with `src`.
#[must_use]
pub fn src(value: impl Into<String>) -> Attributes {
    Attributes::new().src(value)
}

/// A node of the markup tree.
///
/// Text and attribute values are escaped on render. Tag and attribute names
/// are written verbatim, so an element whose tag fails [`is_valid_tag`]
/// renders only its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum Block {
    /// A tagged element.
    Element {
        /// Tag name, rendered verbatim when valid.
        tag: String,
        /// Ordered attributes.
        attributes: Attributes,
        /// Ordered children. Ignored for void elements.
        children: Vec<Block>,
    },
    /// Escaped text.
    Text {
        /// Unescaped content.
        content: String,
    },
    /// Siblings without a wrapping tag.
    Fragment {
        /// Ordered children.
        children: Vec<Block>,
    },
}

impl Block {
    /// Build an element.
    #[must_use]
    pub fn element(
        tag: impl Into<String>,
        attributes: impl Into<Option<Attributes>>,
        children: Vec<Block>,
    ) -> Self {
        Self::Element {
            tag: tag.into(),
            attributes: attributes.into().unwrap_or_default(),
            children,
        }
    }

    /// Build a text leaf.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Build a fragment.
    #[must_use]
    pub const fn fragment(children: Vec<Block>) -> Self {
        Self::Fragment { children }
    }

    /// The empty fragment; renders as nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Fragment {
            children: Vec::new(),
        }
    }

    /// Serialize the tree to markup.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    /// Serialize the tree, appending to `out`.
    pub fn render_into(&self, out: &mut String) {
        match self {
            Self::Element {
                tag,
                attributes,
                children,
            } => {
                if !is_valid_tag(tag) {
                    tracing::warn!(tag = %tag, "Unwrapping element with invalid tag");
                    for child in children {
                        child.render_into(out);
                    }
                    return;
                }
                out.push('<');
                out.push_str(tag);
                attributes.render_into(out);
                if is_void(tag) {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for child in children {
                    child.render_into(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            Self::Text { content } => escape_text_into(content, out),
            Self::Fragment { children } => {
                for child in children {
                    child.render_into(out);
                }
            }
        }
    }

    /// Concatenated text content of the tree, unescaped.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { content } => out.push_str(content),
            Self::Element { children, .. } | Self::Fragment { children } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Block {
    fn from(content: &str) -> Self {
        Self::text(content)
    }
}

impl From<String> for Block {
    fn from(content: String) -> Self {
        Self::text(content)
    }
}

impl From<Vec<Block>> for Block {
    fn from(children: Vec<Block>) -> Self {
        Self::fragment(children)
    }
}

/// Build an element; shorthand for [`Block::element`].
#[must_use]
pub fn elem(
    tag: impl Into<String>,
    attributes: impl Into<Option<Attributes>>,
    children: Vec<Block>,
) -> Block {
    Block::element(tag, attributes, children)
}

/// Build a text leaf.
#[must_use]
pub fn text(content: impl Into<String>) -> Block {
    Block::text(content)
}

/// Build a fragment.
#[must_use]
pub const fn fragment(children: Vec<Block>) -> Block {
    Block::fragment(children)
}

macro_rules! container_elements {
    ($($(#[$meta:meta])* $fn_name:ident => $tag:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[must_use]
            pub fn $fn_name(
                attributes: impl Into<Option<Attributes>>,
                children: Vec<Block>,
            ) -> Block {
                Block::element($tag, attributes, children)
            }
        )*
    };
}

container_elements! {
    /// `<html>`
    html => "html",
    /// `<head>`
    head => "head",
    /// `<body>`
    body => "body",
    /// `<title>`
    title => "title",
    /// `<script>`
    script => "script",
    /// `<div>`
    div => "div",
    /// `<span>`
    span => "span",
    /// `<a>`
    a => "a",
    /// `<button>`
    button => "button",
    /// `<label>`
    label => "label",
    /// `<h1>`
    h1 => "h1",
    /// `<h2>`
    h2 => "h2",
    /// `<p>`
    p => "p",
    /// `<table>`
    table => "table",
    /// `<thead>`
    thead => "thead",
    /// `<tbody>`
    tbody => "tbody",
    /// `<tr>`
    tr => "tr",
    /// `<th>`
    th => "th",
    /// `<td>`
    td => "td",
    /// `<ul>`
    ul => "ul",
    /// `<li>`
    li => "li",
}

/// `<input/>`
#[must_use]
pub fn input(attributes: impl Into<Option<Attributes>>) -> Block {
    Block::element("input", attributes, Vec::new())
}

/// `<link/>`
#[must_use]
pub fn link(attributes: impl Into<Option<Attributes>>) -> Block {
    Block::element("link", attributes, Vec::new())
}

/// `<meta/>`
#[must_use]
pub fn meta(attributes: impl Into<Option<Attributes>>) -> Block {
    Block::element("meta", attributes, Vec::new())
}

fn escape_text_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Escape `value` for use as text content.
#[must_use]
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    escape_text_into(value, &mut out);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn input_renders_self_closing_in_insertion_order() {
        let block = input(attr("Name", "Code").attr("Value", "X1"));
        assert_eq!(block.render(), r#"<input Name="Code" Value="X1"/>"#);
    }

    #[test]
    fn element_without_attributes_has_no_attribute_list() {
        assert_eq!(div(None, vec![]).render(), "<div></div>");
        assert_eq!(div(Attributes::new(), vec![]).render(), "<div></div>");
    }

    #[test]
    fn empty_fragment_renders_nothing() {
        assert_eq!(Block::empty().render(), "");
        assert_eq!(div(None, vec![Block::empty()]).render(), "<div></div>");
    }

    #[test]
    fn fragment_renders_siblings_without_wrapper() {
        let block = fragment(vec![text("a"), span(None, vec!["b".into()]), text("c")]);
        assert_eq!(block.render(), "a<span>b</span>c");
    }

    #[test]
    fn flags_render_bare_or_not_at_all() {
        let enabled = input(type_("text").disabled(true));
        assert_eq!(enabled.render(), r#"<input type="text" disabled/>"#);

        let disabled = input(type_("text").disabled(false));
        assert_eq!(disabled.render(), r#"<input type="text"/>"#);
    }

    #[test]
    fn resetting_attribute_keeps_position() {
        let attrs = class("a").id("main").class("b");
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["class", "id"]);
        assert_eq!(attrs.get("class"), Some(&AttrValue::Str("b".to_string())));
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let block = a(
            href("/search?a=1&b=\"2\""),
            vec![text("<script>alert('x')</script> & more")],
        );
        assert_eq!(
            block.render(),
            "<a href=\"/search?a=1&amp;b=&quot;2&quot;\">&lt;script&gt;alert('x')&lt;/script&gt; &amp; more</a>"
        );
    }

    #[test]
    fn void_elements_drop_children() {
        let block = Block::element("br", None, vec![text("ignored")]);
        assert_eq!(block.render(), "<br/>");
    }

    #[test]
    fn invalid_attribute_names_are_dropped() {
        let block = div(
            attr("onclick\" x=\"1", "a")
                .attr("data-ok", "b")
                .attr("a b", "c")
                .attr("", "d")
                .attr("x>", true),
            vec![],
        );
        assert_eq!(block.render(), r#"<div data-ok="b"></div>"#);
    }

    #[test]
    fn invalid_tag_renders_children_only() {
        let block = Block::element("div><script", class("x"), vec![text("<hi>")]);
        assert_eq!(block.render(), "&lt;hi&gt;");

        let block = Block::element("", None, vec![span(None, vec![])]);
        assert_eq!(block.render(), "<span></span>");
    }

    #[test]
    fn name_validation() {
        assert!(is_valid_tag("h1"));
        assert!(is_valid_tag("my-widget"));
        assert!(!is_valid_tag("1h"));
        assert!(!is_valid_tag("di v"));
        assert!(is_valid_attr_key("data-error"));
        assert!(is_valid_attr_key("aria:label"));
        assert!(!is_valid_attr_key("a=b"));
        assert!(!is_valid_attr_key("a\tb"));
    }

    #[test]
    fn void_lookup_is_case_insensitive() {
        assert!(is_void("INPUT"));
        assert!(!is_void("div"));
    }

    #[test]
    fn nested_tree_renders_depth_first() {
        let block = table(
            class("ui celled table"),
            vec![tbody(
                None,
                vec![tr(None, vec![td(None, vec!["Code".into()]), td(None, vec!["C1".into()])])],
            )],
        );
        assert_eq!(
            block.render(),
            r#"<table class="ui celled table"><tbody><tr><td>Code</td><td>C1</td></tr></tbody></table>"#
        );
    }

    #[test]
    fn text_content_collects_leaves() {
        let block = div(None, vec![h1(None, vec!["C1".into()]), p(None, vec!["L1".into()])]);
        assert_eq!(block.text_content(), "C1L1");
    }

    #[test]
    fn display_matches_render() {
        let block = div(id("container"), vec!["x".into()]);
        assert_eq!(block.to_string(), block.render());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn blocks_survive_serde() {
        let block = div(class("field").disabled(true), vec![text("Code")]);
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
