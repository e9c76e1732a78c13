//! Helpers for driving a `VirtualDom` in tests.

use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;

/// Run tasks and re-render until `span` of (tokio) time has passed.
pub(crate) async fn settle(dom: &mut VirtualDom, span: Duration) {
    let deadline = tokio::time::Instant::now() + span;
    while tokio::time::Instant::now() < deadline {
        let _ = tokio::time::timeout_at(deadline, dom.wait_for_work()).await;
        dom.render_immediate(&mut NoOpMutations);
    }
}
