use dioxus::prelude::*;

use crate::toast::{Toast, ToastLevel, ToastQueue};

const TOAST_CSS: Asset = asset!("/assets/styling/toast.css");

#[component]
pub fn ToastHost() -> Element {
    let mut queue = use_context::<Signal<ToastQueue>>();
    let entries = queue().entries.clone();

    rsx! {
        document::Stylesheet { href: TOAST_CSS }

        div {
            class: "toast-stack",
            for Toast { id, level, message } in entries {
                div {
                    key: "{id}",
                    class: match level {
                        ToastLevel::Error => "toast error",
                        ToastLevel::Warning => "toast warning",
                        ToastLevel::Success => "toast success",
                        ToastLevel::Info => "toast info",
                    },
                    onclick: move |_| queue.write().dismiss(id),
                    "{message}"
                }
            }
        }
    }
}
