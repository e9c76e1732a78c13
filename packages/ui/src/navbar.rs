use dioxus::prelude::*;

use crate::icons::{FaCalendarDays, FaEnvelope, FaImage, FaMusic, FaNoteSticky};
use crate::{Icon, SignOutButton};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Bottom-bar destinations in display order: (path, label).
pub const DESTINATIONS: [(&str, &str); 5] = [
    ("/timeline", "Timeline"),
    ("/gallery", "Gallery"),
    ("/notes", "Notes"),
    ("/letters", "Letters"),
    ("/playlist", "Playlist"),
];

/// Whether the bottom bar is shown on `path`. Hidden on the public pages.
pub fn shows_nav(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path);
    !matches!(path, "" | "/" | "/login")
}

fn is_active(current: &str, target: &str) -> bool {
    let current = current.split('?').next().unwrap_or(current);
    current.trim_end_matches('/') == target
}

#[component]
fn NavIcon(path: &'static str) -> Element {
    match path {
        "/timeline" => rsx! { Icon { icon: FaCalendarDays, width: 18, height: 18 } },
        "/gallery" => rsx! { Icon { icon: FaImage, width: 18, height: 18 } },
        "/notes" => rsx! { Icon { icon: FaNoteSticky, width: 18, height: 18 } },
        "/letters" => rsx! { Icon { icon: FaEnvelope, width: 18, height: 18 } },
        _ => rsx! { Icon { icon: FaMusic, width: 18, height: 18 } },
    }
}

/// Fixed bottom navigation with the five journal sections and sign-out.
#[component]
pub fn BottomNav(
    /// Path of the current page, used to highlight the active entry.
    current_path: String,
    on_navigate: EventHandler<&'static str>,
    on_signed_out: EventHandler<()>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "bottom-nav",
            for (path, label) in DESTINATIONS {
                button {
                    key: "{path}",
                    class: if is_active(&current_path, path) { "nav-item active" } else { "nav-item" },
                    onclick: move |_| on_navigate.call(path),
                    NavIcon { path }
                    span { "{label}" }
                }
            }
            SignOutButton {
                class: "nav-item sign-out",
                on_signed_out: on_signed_out,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_hidden_on_public_pages() {
        assert!(!shows_nav("/"));
        assert!(!shows_nav("/login"));
        assert!(!shows_nav("/login?next=/notes"));
        assert!(shows_nav("/timeline"));
        assert!(shows_nav("/playlist"));
    }

    #[test]
    fn test_active_entry() {
        assert!(is_active("/gallery", "/gallery"));
        assert!(is_active("/gallery/", "/gallery"));
        assert!(!is_active("/gallery", "/notes"));
        let active: Vec<_> = DESTINATIONS
            .iter()
            .filter(|(path, _)| is_active("/letters", path))
            .collect();
        assert_eq!(active.len(), 1);
    }
}
