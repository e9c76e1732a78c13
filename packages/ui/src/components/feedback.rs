use dioxus::prelude::*;

/// Placeholder shown when a list has nothing to show.
#[component]
pub fn EmptyState(title: String, #[props(default)] hint: String) -> Element {
    rsx! {
        div {
            class: "empty-state",
            h2 { "{title}" }
            if !hint.is_empty() {
                p { "{hint}" }
            }
        }
    }
}

#[component]
pub fn LoadingSpinner(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "loading",
            div { class: "spinner" }
            span { "{label}" }
        }
    }
}
