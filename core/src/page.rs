//! Full-page rendering.
//!
//! Plain navigation requests get a complete HTML document: a layout block
//! (usually built with [`Shell`]) with the page content nested at its
//! insertion point, the element whose `id` is [`SLOT_ID`]. Actions later patch
//! that same element with `#container` replace results, so a freshly loaded
//! page and a patched one share their markup.
//!
//! ```
//! use guiapi_core::block::text;
//! use guiapi_core::page::{render_page, Shell};
//!
//! let layout = Shell::new("Inventory").script("/js/guiapi.js").build();
//! let html = render_page(layout, text("hello"));
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! assert!(html.contains(r#"<div id="container">hello</div>"#));
//! ```

use crate::block::{self, is_void, Attributes, AttrValue, Block};

/// `id` of the element that receives page content.
pub const SLOT_ID: &str = "container";

/// CSS selector of the insertion point, used as the target of replace results.
pub const SLOT_SELECTOR: &str = "#container";

const DOCTYPE: &str = "<!DOCTYPE html>";

/// Nest `content` into `layout` and serialize the document.
#[must_use]
pub fn render_page(layout: Block, content: Block) -> String {
    let page = compose(layout, content);
    let mut out = String::from(DOCTYPE);
    page.render_into(&mut out);
    out
}

/// Nest `content` into `layout` at the insertion point.
///
/// The insertion point is the first non-void element, in depth-first order,
/// whose `id` is [`SLOT_ID`]; the content is appended to its children.
/// Without one, the content is appended to the outermost element, or placed
/// after the layout when the layout is text, a fragment or a void element.
#[must_use]
pub fn compose(mut layout: Block, content: Block) -> Block {
    let mut pending = Some(content);
    fill_slot(&mut layout, &mut pending);
    let Some(content) = pending else {
        return layout;
    };

    match layout {
        Block::Element {
            tag,
            attributes,
            mut children,
        } if !is_void(&tag) => {
            children.push(content);
            Block::Element {
                tag,
                attributes,
                children,
            }
        }
        other => Block::fragment(vec![other, content]),
    }
}

fn fill_slot(block: &mut Block, pending: &mut Option<Block>) -> bool {
    match block {
        Block::Element {
            tag,
            attributes,
            children,
        } => {
            if is_slot(attributes) && !is_void(tag) {
                if let Some(content) = pending.take() {
                    children.push(content);
                }
                return true;
            }
            children.iter_mut().any(|child| fill_slot(child, pending))
        }
        Block::Fragment { children } => children.iter_mut().any(|child| fill_slot(child, pending)),
        Block::Text { .. } => false,
    }
}

fn is_slot(attributes: &Attributes) -> bool {
    matches!(attributes.get("id"), Some(AttrValue::Str(id)) if id == SLOT_ID)
}

/// Builder for a standard document scaffold.
///
/// Produces `html > (head, body)` where `head` carries the charset, title,
/// stylesheets and scripts in insertion order, and `body` holds a single
/// insertion-point `div` with the configured class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    title: String,
    stylesheets: Vec<String>,
    scripts: Vec<String>,
    container_class: Option<String>,
}

impl Shell {
    /// Start a shell with the document title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            stylesheets: Vec::new(),
            scripts: Vec::new(),
            container_class: None,
        }
    }

    /// Add a stylesheet link.
    #[must_use]
    pub fn stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheets.push(href.into());
        self
    }

    /// Add a script include.
    #[must_use]
    pub fn script(mut self, src: impl Into<String>) -> Self {
        self.scripts.push(src.into());
        self
    }

    /// Set the `class` of the insertion-point element.
    #[must_use]
    pub fn container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = Some(class.into());
        self
    }

    /// Build the layout block.
    #[must_use]
    pub fn build(self) -> Block {
        let mut head = vec![
            block::meta(block::attr("charset", "utf-8")),
            block::meta(
                block::name("viewport").attr("content", "width=device-width, initial-scale=1"),
            ),
            block::title(None, vec![block::text(self.title)]),
        ];
        head.extend(
            self.stylesheets
                .into_iter()
                .map(|href| block::link(block::attr("rel", "stylesheet").href(href))),
        );
        head.extend(
            self.scripts
                .into_iter()
                .map(|src| block::script(block::src(src), Vec::new())),
        );

        let mut container = block::id(SLOT_ID);
        if let Some(class) = self.container_class {
            container = container.class(class);
        }

        block::html(
            None,
            vec![
                block::head(None, head),
                block::body(None, vec![block::div(container, Vec::new())]),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{div, h1, id, input, span, text};

    #[test]
    fn content_lands_in_slot() {
        let layout = div(None, vec![span(None, vec!["nav".into()]), div(id(SLOT_ID), vec![])]);
        let html = render_page(layout, h1(None, vec!["Parts".into()]));
        assert_eq!(
            html,
            r#"<!DOCTYPE html><div><span>nav</span><div id="container"><h1>Parts</h1></div></div>"#
        );
    }

    #[test]
    fn only_first_slot_is_filled() {
        let layout = div(None, vec![div(id(SLOT_ID), vec![]), div(id(SLOT_ID), vec![])]);
        let page = compose(layout, text("x"));
        assert_eq!(
            page.render(),
            r#"<div><div id="container">x</div><div id="container"></div></div>"#
        );
    }

    #[test]
    fn void_element_is_never_a_slot() {
        let layout = div(None, vec![input(id(SLOT_ID)), div(id(SLOT_ID), vec![])]);
        let page = compose(layout, text("x"));
        assert_eq!(
            page.render(),
            r#"<div><input id="container"/><div id="container">x</div></div>"#
        );

        let page = compose(div(None, vec![input(id(SLOT_ID))]), text("x"));
        assert_eq!(page.render(), r#"<div><input id="container"/>x</div>"#);

        let page = compose(input(id(SLOT_ID)), text("x"));
        assert_eq!(page.render(), r#"<input id="container"/>x"#);
    }

    #[test]
    fn missing_slot_appends_to_root() {
        let page = compose(div(None, vec![text("a")]), text("b"));
        assert_eq!(page.render(), "<div>ab</div>");

        let page = compose(text("a"), text("b"));
        assert_eq!(page.render(), "ab");
    }

    #[test]
    fn shell_is_deterministic() {
        let build = || {
            Shell::new("Inventory")
                .stylesheet("/css/a.css")
                .script("/js/a.js")
                .script("/js/b.js")
                .container_class("ui container")
                .build()
        };
        let first = render_page(build(), text("same"));
        let second = render_page(build(), text("same"));
        assert_eq!(first, second);
        assert_eq!(
            first,
            concat!(
                "<!DOCTYPE html><html><head>",
                r#"<meta charset="utf-8"/>"#,
                r#"<meta name="viewport" content="width=device-width, initial-scale=1"/>"#,
                "<title>Inventory</title>",
                r#"<link rel="stylesheet" href="/css/a.css"/>"#,
                r#"<script src="/js/a.js"></script>"#,
                r#"<script src="/js/b.js"></script>"#,
                r#"</head><body><div id="container" class="ui container">same</div></body></html>"#,
            )
        );
    }
}
