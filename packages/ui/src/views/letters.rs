use dioxus::prelude::*;
use store::{Draft, Letter, NewLetter};

use crate::components::{Card, EmptyState, LoadingSpinner, Modal, PageHeader};
use crate::icons::FaEnvelope;
use crate::{use_collection, use_toasts, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Open-when letters. Only titles are listed; a letter's body shows once it
/// is opened.
#[component]
pub fn LettersView() -> Element {
    let letters = use_collection(api::list_letters, "Fetching our sealed letters...");
    let toasts = use_toasts();

    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut opened = use_signal(|| Option::<Letter>::None);

    let handle_add = move |evt: FormEvent| async move {
        evt.prevent_default();
        let draft = NewLetter {
            title: title().trim().to_string(),
            content: content().trim().to_string(),
            user_id: None,
        };
        if let Err(e) = draft.validate() {
            toasts.error(e.to_string());
            return;
        }

        saving.set(true);
        if letters.create(api::create_letter(draft)).await {
            title.set(String::new());
            content.set(String::new());
            toasts.success("Letter sealed");
        }
        saving.set(false);
    };

    let list = letters.list();
    let items = list().items().to_vec();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            PageHeader { title: "Open When...", subtitle: "Letters for the moments that need them" }

            form {
                class: "entry-form",
                onsubmit: handle_add,
                input {
                    class: "input",
                    placeholder: "Open when...",
                    value: title(),
                    oninput: move |evt: FormEvent| title.set(evt.value()),
                }
                textarea {
                    class: "input letter-body",
                    placeholder: "Your letter",
                    value: content(),
                    oninput: move |evt: FormEvent| content.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: saving(),
                    "Seal letter"
                }
            }

            if !list().is_loaded() {
                LoadingSpinner {}
            } else if items.is_empty() {
                EmptyState { title: "No letters yet", hint: "Write one for a rainy day." }
            } else {
                div {
                    class: "card-grid",
                    for letter in items {
                        LetterCard {
                            key: "{letter.id}",
                            letter: letter.clone(),
                            on_open: move |letter: Letter| opened.set(Some(letter)),
                            on_delete: move |id: String| async move {
                                letters.delete(id.clone(), api::delete_letter(id)).await;
                            },
                        }
                    }
                }
            }
        }

        if let Some(letter) = opened() {
            Modal {
                title: letter.title.clone(),
                on_close: move |_| opened.set(None),
                div { class: "letter-content", "{letter.content}" }
            }
        }
    }
}

#[component]
fn LetterCard(letter: Letter, on_open: EventHandler<Letter>, on_delete: EventHandler<String>) -> Element {
    let id = letter.id.clone();
    let sealed = letter.is_locked.unwrap_or(false);

    rsx! {
        Card {
            class: if sealed { "letter-card sealed" } else { "letter-card" },
            onclick: {
                let letter = letter.clone();
                move |_| on_open.call(letter.clone())
            },
            on_delete: move |_| on_delete.call(id.clone()),
            Icon { icon: FaEnvelope, width: 20, height: 20 }
            h3 { "{letter.title}" }
        }
    }
}
