use std::time::Duration;

use dioxus::prelude::*;
use store::samples::{pick, NOTE_SUGGESTIONS};
use store::{Draft, NewNote, Note};

use crate::components::{Card, EmptyState, LoadingSpinner, PageHeader};
use crate::icons::FaWandMagicSparkles;
use crate::timer::{seed, sleep};
use crate::views::created_label;
use crate::{use_collection, use_toasts, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

const SUGGESTION_DELAY: Duration = Duration::from_millis(800);

/// Short love notes, newest first.
#[component]
pub fn NotesView() -> Element {
    let notes = use_collection(api::list_notes, "Gathering our little notes...");
    let toasts = use_toasts();

    let mut content = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut suggesting = use_signal(|| false);

    let handle_add = move |evt: FormEvent| async move {
        evt.prevent_default();
        let draft = NewNote {
            content: content().trim().to_string(),
            user_id: None,
        };
        if let Err(e) = draft.validate() {
            toasts.error(e.to_string());
            return;
        }

        saving.set(true);
        if notes.create(api::create_note(draft)).await {
            content.set(String::new());
            toasts.success("Note saved");
        }
        saving.set(false);
    };

    let handle_suggest = move |_| async move {
        suggesting.set(true);
        sleep(SUGGESTION_DELAY).await;
        content.set(pick(NOTE_SUGGESTIONS, seed()).to_string());
        suggesting.set(false);
    };

    let list = notes.list();
    let items = list().items().to_vec();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            PageHeader { title: "Love Notes", subtitle: "Little things we want to say" }

            form {
                class: "entry-form",
                onsubmit: handle_add,
                textarea {
                    class: "input",
                    placeholder: "Write something sweet...",
                    value: content(),
                    oninput: move |evt: FormEvent| content.set(evt.value()),
                }
                div {
                    class: "form-actions",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        disabled: suggesting(),
                        onclick: handle_suggest,
                        Icon { icon: FaWandMagicSparkles, width: 14, height: 14 }
                        if suggesting() { " Thinking..." } else { " Suggest" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        "Save note"
                    }
                }
            }

            if !list().is_loaded() {
                LoadingSpinner {}
            } else if items.is_empty() {
                EmptyState { title: "No notes yet", hint: "Leave the first one." }
            } else {
                div {
                    class: "card-grid",
                    for note in items {
                        NoteCard {
                            key: "{note.id}",
                            note: note.clone(),
                            on_delete: move |id: String| async move {
                                notes.delete(id.clone(), api::delete_note(id)).await;
                            },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NoteCard(note: Note, on_delete: EventHandler<String>) -> Element {
    let id = note.id.clone();
    let when = created_label(note.created_at);

    rsx! {
        Card {
            class: "note-card",
            on_delete: move |_| on_delete.call(id.clone()),
            p { class: "note-content", "{note.content}" }
            span { class: "view-muted", "{when}" }
        }
    }
}
