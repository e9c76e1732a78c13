use std::time::Duration;

use dioxus::html::FileData;
use dioxus::prelude::*;
use store::samples::{pick, CAPTION_SUGGESTIONS};
use store::Memory;

use crate::components::{Card, EmptyState, LoadingSpinner, Modal, PageHeader};
use crate::icons::FaWandMagicSparkles;
use crate::timer::{seed, sleep};
use crate::views::created_label;
use crate::{use_collection, use_toasts, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

const SUGGESTION_DELAY: Duration = Duration::from_millis(1200);

/// The photo chosen in the picker. `generation` keys the file input, so
/// clearing the choice also remounts the input empty.
#[derive(Clone, Default, PartialEq)]
struct PickerState {
    file: Option<FileData>,
    generation: u32,
}

impl PickerState {
    fn clear(&mut self) {
        self.file = None;
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Photo memories, newest first.
#[component]
pub fn GalleryView() -> Element {
    let memories = use_collection(api::list_memories, "Developing our photos...");
    let toasts = use_toasts();

    let mut picker = use_signal(PickerState::default);
    let mut caption = use_signal(String::new);
    let mut uploading = use_signal(|| false);
    let mut suggesting = use_signal(|| false);
    let mut confirming = use_signal(|| Option::<Memory>::None);

    let handle_pick = move |evt: FormEvent| {
        let file = evt.files().into_iter().next();
        if let Some(file) = &file {
            if file.size() > api::MAX_IMAGE_BYTES as u64 {
                toasts.error("That photo is larger than 20 MB");
                picker.write().clear();
                return;
            }
        }
        picker.write().file = file;
    };

    let handle_upload = move |evt: FormEvent| async move {
        evt.prevent_default();
        let Some(image) = picker().file else {
            toasts.error("Choose a photo first");
            return;
        };

        uploading.set(true);
        let upload = api::upload_memory(caption().trim().to_string(), api::FileStream::from(image));
        if memories.create(upload).await {
            picker.write().clear();
            caption.set(String::new());
            toasts.success("Memory saved");
        }
        uploading.set(false);
    };

    let handle_suggest = move |_| async move {
        suggesting.set(true);
        sleep(SUGGESTION_DELAY).await;
        caption.set(pick(CAPTION_SUGGESTIONS, seed()).to_string());
        suggesting.set(false);
    };

    let list = memories.list();
    let items = list().items().to_vec();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            PageHeader { title: "Our Gallery", subtitle: "Moments worth keeping" }

            form {
                class: "entry-form",
                onsubmit: handle_upload,
                for generation in std::iter::once(picker().generation) {
                    input {
                        key: "{generation}",
                        class: "input",
                        r#type: "file",
                        accept: "image/*",
                        onchange: handle_pick,
                    }
                }
                if let Some(image) = picker().file {
                    span { class: "view-muted", {image.name()} }
                }
                input {
                    class: "input",
                    placeholder: "Caption (optional)",
                    value: caption(),
                    oninput: move |evt: FormEvent| caption.set(evt.value()),
                }
                div {
                    class: "form-actions",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        disabled: suggesting(),
                        onclick: handle_suggest,
                        Icon { icon: FaWandMagicSparkles, width: 14, height: 14 }
                        if suggesting() { " Thinking..." } else { " Suggest caption" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: uploading(),
                        if uploading() { "Uploading..." } else { "Save memory" }
                    }
                }
            }

            if !list().is_loaded() {
                LoadingSpinner {}
            } else if items.is_empty() {
                EmptyState { title: "No photos yet", hint: "Upload our first memory." }
            } else {
                div {
                    class: "photo-grid",
                    for memory in items {
                        MemoryCard {
                            key: "{memory.id}",
                            memory: memory.clone(),
                            on_delete: move |memory: Memory| confirming.set(Some(memory)),
                        }
                    }
                }
            }
        }

        if let Some(memory) = confirming() {
            RemovalPrompt {
                memory,
                on_cancel: move |_| confirming.set(None),
                on_confirm: move |memory: Memory| async move {
                    confirming.set(None);
                    memories
                        .delete(memory.id.clone(), api::delete_memory(memory.id, memory.image_url))
                        .await;
                },
            }
        }
    }
}

/// Asks before a memory and its photo are deleted.
#[component]
fn RemovalPrompt(memory: Memory, on_cancel: EventHandler<()>, on_confirm: EventHandler<Memory>) -> Element {
    rsx! {
        Modal {
            title: "Remove this memory?",
            on_close: move |_| on_cancel.call(()),
            if !memory.caption.is_empty() {
                p { class: "photo-caption", "{memory.caption}" }
            }
            p { "The photo will be deleted for both of us." }
            div {
                class: "form-actions",
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-danger",
                    onclick: {
                        let memory = memory.clone();
                        move |_| on_confirm.call(memory.clone())
                    },
                    "Remove"
                }
            }
        }
    }
}

#[component]
fn MemoryCard(memory: Memory, on_delete: EventHandler<Memory>) -> Element {
    let when = created_label(memory.created_at);

    rsx! {
        Card {
            class: "photo-card",
            on_delete: {
                let memory = memory.clone();
                move |_| on_delete.call(memory.clone())
            },
            img { src: "{memory.image_url}", alt: "{memory.caption}", loading: "lazy" }
            if !memory.caption.is_empty() {
                p { class: "photo-caption", "{memory.caption}" }
            }
            span { class: "view-muted", "{when}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clearing_picker_bumps_generation() {
        let mut picker = PickerState::default();
        picker.clear();
        assert!(picker.file.is_none());
        assert_eq!(picker.generation, 1);

        picker.clear();
        assert_eq!(picker.generation, 2);
    }

    fn prompt_app(memory: Memory) -> Element {
        rsx! {
            RemovalPrompt {
                memory,
                on_cancel: |_| {},
                on_confirm: |_| {},
            }
        }
    }

    #[test]
    fn test_removal_prompt_offers_cancel_and_remove() {
        let memory = Memory {
            id: "7".to_string(),
            image_url: "https://vault.example/storage/v1/object/public/memories/1-abc.jpg".to_string(),
            caption: "Beach day".to_string(),
            user_id: None,
            created_at: None,
        };
        let mut dom = VirtualDom::new_with_props(prompt_app, memory);
        dom.rebuild_in_place();
        let html = dioxus::ssr::render(&dom);

        assert!(html.contains("Remove this memory?"));
        assert!(html.contains("Beach day"));
        assert!(html.contains(">Cancel</button>"));
        assert!(html.contains(">Remove</button>"));
    }
}
