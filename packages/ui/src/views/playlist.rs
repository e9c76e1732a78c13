use dioxus::prelude::*;
use store::{Draft, NewSong, Song};

use crate::components::{Card, EmptyState, LoadingSpinner, PageHeader};
use crate::icons::FaMusic;
use crate::{use_collection, use_toasts, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Our shared playlist, newest first.
#[component]
pub fn PlaylistView() -> Element {
    let songs = use_collection(api::list_songs, "Tuning into our playlist...");
    let toasts = use_toasts();

    let mut song_title = use_signal(String::new);
    let mut link = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let handle_add = move |evt: FormEvent| async move {
        evt.prevent_default();
        let draft = NewSong::from_form(&song_title(), &link());
        if let Err(e) = draft.validate() {
            toasts.error(e.to_string());
            return;
        }

        saving.set(true);
        if songs.create(api::create_song(draft)).await {
            song_title.set(String::new());
            link.set(String::new());
            toasts.success("Song added");
        }
        saving.set(false);
    };

    let list = songs.list();
    let items = list().items().to_vec();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            PageHeader { title: "Our Playlist", subtitle: "The songs that remind us of us" }

            form {
                class: "entry-form",
                onsubmit: handle_add,
                input {
                    class: "input",
                    placeholder: "Song title",
                    value: song_title(),
                    oninput: move |evt: FormEvent| song_title.set(evt.value()),
                }
                input {
                    class: "input",
                    r#type: "url",
                    placeholder: "Link (optional)",
                    value: link(),
                    oninput: move |evt: FormEvent| link.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: saving(),
                    "Add song"
                }
            }

            if !list().is_loaded() {
                LoadingSpinner {}
            } else if items.is_empty() {
                EmptyState { title: "No songs yet", hint: "Which one is ours?" }
            } else {
                ul {
                    class: "song-list",
                    for song in items {
                        SongRow {
                            key: "{song.id}",
                            song: song.clone(),
                            on_delete: move |id: String| async move {
                                songs.delete(id.clone(), api::delete_song(id)).await;
                            },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SongRow(song: Song, on_delete: EventHandler<String>) -> Element {
    let id = song.id.clone();

    rsx! {
        li {
            Card {
                class: "song-card",
                on_delete: move |_| on_delete.call(id.clone()),
                Icon { icon: FaMusic, width: 16, height: 16 }
                span { class: "song-title", "{song.song_title}" }
                if let Some(link) = song.link.clone() {
                    a {
                        class: "song-link",
                        href: "{link}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        "Listen"
                    }
                }
            }
        }
    }
}
