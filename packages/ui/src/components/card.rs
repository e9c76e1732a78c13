use dioxus::prelude::*;

/// A content card. With `on_delete` set, a delete button is shown in the corner.
#[component]
pub fn Card(
    #[props(default)] class: String,
    #[props(default)] onclick: Option<EventHandler<()>>,
    #[props(default)] on_delete: Option<EventHandler<()>>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "card {class}",
            onclick: move |_| {
                if let Some(handler) = onclick {
                    handler.call(());
                }
            },
            if let Some(on_delete) = on_delete {
                button {
                    class: "card-delete",
                    title: "Delete",
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        on_delete.call(());
                    },
                    crate::Icon { icon: crate::icons::FaTrashCan, width: 14, height: 14 }
                }
            }
            {children}
        }
    }
}
