use dioxus::prelude::*;

use crate::icons::FaHeart;
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Public landing page.
#[component]
pub fn LandingView(on_enter: EventHandler<()>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "landing",
            div {
                class: "landing-heart",
                Icon { icon: FaHeart, width: 48, height: 48 }
            }
            h1 { class: "landing-title", "Memory Vault" }
            p {
                class: "landing-tagline",
                "Our milestones, photos, notes, letters and songs. Just for the two of us."
            }
            button {
                class: "btn btn-primary landing-enter",
                onclick: move |_| on_enter.call(()),
                "Enter our vault"
            }
        }
    }
}
