use dioxus::prelude::*;

use crate::{use_auth, use_toasts, AuthState};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Email and password sign-in. `on_signed_in` runs after a successful sign-in.
#[component]
pub fn LoginView(on_signed_in: EventHandler<()>) -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);
    let mut auth_state = use_auth();
    let toasts = use_toasts();

    let handle_submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        if submitting() {
            return;
        }
        submitting.set(true);

        match api::sign_in(email(), password()).await {
            Ok(user) => {
                toasts.success("Welcome back");
                auth_state.set(AuthState {
                    user: Some(user),
                    loading: false,
                });
                password.set(String::new());
                on_signed_in.call(());
            }
            Err(e) => {
                tracing::info!("Sign-in failed: {}", e);
                let message = e.to_string();
                toasts.error(if message.is_empty() {
                    "Could not sign in".to_string()
                } else {
                    message
                });
            }
        }
        submitting.set(false);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "login",
            h1 { class: "login-title", "Welcome back" }
            p { class: "view-muted", "Sign in to open our vault." }

            form {
                class: "login-form",
                onsubmit: handle_submit,
                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    class: "input",
                    r#type: "email",
                    autocomplete: "email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    class: "input",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
