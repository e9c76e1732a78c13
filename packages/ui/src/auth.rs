//! Authentication context and hooks for the UI.

use api::UserInfo;
use dioxus::prelude::*;

use crate::{use_toasts, Icon};
use crate::icons::FaRightFromBracket;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current user on mount
    let _ = use_resource(move || async move {
        let user = match api::get_current_user().await {
            Ok(user) => user,
            Err(e) => {
                // Fails closed: an unknown session counts as signed out.
                tracing::warn!("Failed to load current user: {}", e);
                None
            }
        };
        auth_state.set(AuthState {
            user,
            loading: false,
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button that signs the current user out.
///
/// `on_signed_out` runs after the server session is cleared.
#[component]
pub fn SignOutButton(
    on_signed_out: EventHandler<()>,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let toasts = use_toasts();

    let onclick = move |_| async move {
        match api::sign_out().await {
            Ok(()) => {
                auth_state.set(AuthState {
                    user: None,
                    loading: false,
                });
                toasts.info("Signed out. See you soon");
                on_signed_out.call(());
            }
            Err(e) => {
                tracing::error!("Sign-out failed: {}", e);
                toasts.error(format!("Could not sign out: {e}"));
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            title: "Sign out",
            onclick: onclick,
            Icon { icon: FaRightFromBracket, width: 18, height: 18 }
        }
    }
}
