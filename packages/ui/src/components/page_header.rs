use dioxus::prelude::*;

#[component]
pub fn PageHeader(title: String, #[props(default)] subtitle: String) -> Element {
    rsx! {
        header {
            class: "page-header",
            h1 { "{title}" }
            if !subtitle.is_empty() {
                p { class: "page-subtitle", "{subtitle}" }
            }
        }
    }
}
