//! The document every inventory page is rendered into.

use guiapi_core::{Block, Shell};

/// Semantic UI stylesheet used by all pages.
pub const STYLESHEET: &str =
    "https://cdn.jsdelivr.net/npm/semantic-ui@2.4.2/dist/semantic.min.css";

/// Client script that sends actions and applies their results.
pub const CLIENT_SCRIPT: &str = "/js/guiapi.js";

/// Application layout with an empty `#container`.
#[must_use]
pub fn main_layout() -> Block {
    Shell::new("Inventory")
        .stylesheet(STYLESHEET)
        .script(CLIENT_SCRIPT)
        .container_class("ui container")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use guiapi_core::block::text;
    use guiapi_core::render_page;

    #[test]
    fn layout_loads_client_and_styles() {
        let html = render_page(main_layout(), text("hello"));
        assert!(html.contains(r#"<script src="/js/guiapi.js"></script>"#));
        assert!(html.contains(STYLESHEET));
        assert!(html.contains(r#"<div id="container" class="ui container">hello</div>"#));
    }
}
