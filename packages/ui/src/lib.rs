//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

mod timer;

#[cfg(test)]
mod testing;

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, SignOutButton};

pub mod toast;
pub use toast::{use_toasts, ToastLevel, ToastProvider, Toasts};

mod toast_host;
pub use toast_host::ToastHost;

mod collection;
pub use collection::{use_collection, Collection};

mod countdown;
pub use countdown::Countdown;

mod navbar;
pub use navbar::{shows_nav, BottomNav, DESTINATIONS};
