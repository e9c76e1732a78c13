//! Route components: thin wrappers that wire the shared views to the router.

use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Landing() -> Element {
    let nav = use_navigator();
    rsx! {
        ui::views::LandingView {
            on_enter: move |_| {
                nav.push(Route::Login {});
            },
        }
    }
}

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();
    rsx! {
        ui::views::LoginView {
            on_signed_in: move |_| {
                nav.replace(Route::Timeline {});
            },
        }
    }
}

#[component]
pub fn Timeline() -> Element {
    rsx! { ui::views::TimelineView {} }
}

#[component]
pub fn Gallery() -> Element {
    rsx! { ui::views::GalleryView {} }
}

#[component]
pub fn Notes() -> Element {
    rsx! { ui::views::NotesView {} }
}

#[component]
pub fn Letters() -> Element {
    rsx! { ui::views::LettersView {} }
}

#[component]
pub fn Playlist() -> Element {
    rsx! { ui::views::PlaylistView {} }
}
