//! Property tests for block rendering and replace envelopes.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use guiapi_core::block::{self, Block};
use guiapi_core::{ActionResult, Envelope};
use guiapi_testing::properties::{arb_block, arb_text};
use proptest::prelude::*;

proptest! {
    #[test]
    fn rendering_is_deterministic(tree in arb_block()) {
        let first = tree.render();
        let second = tree.clone().render();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn text_never_leaks_markup(content in arb_text()) {
        let html = Block::text(content.clone()).render();
        prop_assert!(!html.contains('<'));
        prop_assert!(!html.contains('>'));
        prop_assert_eq!(html.is_empty(), content.is_empty());
    }

    #[test]
    fn wrapped_text_round_trips_through_content(content in arb_text()) {
        let tree = block::div(None, vec![Block::text(content.clone())]);
        prop_assert_eq!(tree.text_content(), content);
    }

    #[test]
    fn replace_envelope_matches_render(tree in arb_block()) {
        let html = tree.render();
        let outcome = ActionResult::replace("#container", tree)
            .unwrap()
            .into_envelope();
        if html.is_empty() {
            prop_assert!(outcome.is_err());
        } else {
            prop_assert_eq!(
                outcome.unwrap(),
                Envelope::Replace { target: "#container".to_string(), html }
            );
        }
    }
}
