use std::str::FromStr;

use dioxus::prelude::*;

use api::gate::{decide, GateDecision, SessionState};
use ui::{use_auth, AuthProvider, BottomNav, ToastProvider};
use views::{Gallery, Landing, Letters, Login, Notes, Playlist, Timeline};

#[cfg(feature = "server")]
mod gate;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppShell)]
        #[route("/")]
        Landing {},
        #[route("/login")]
        Login {},
        #[route("/timeline")]
        Timeline {},
        #[route("/gallery")]
        Gallery {},
        #[route("/notes")]
        Notes {},
        #[route("/letters")]
        Letters {},
        #[route("/playlist")]
        Playlist {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start tokio runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower::ServiceBuilder;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Fail fast on a missing backend endpoint or key
    let backend = api::backend::get_backend()
        .await
        .expect("Failed to configure backend");
    tracing::info!(url = %backend.config().url, bucket = %backend.config().bucket, "backend configured");

    let secure = std::env::var("SESSION_SECURE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    // Session layer configuration
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * 7)
                .try_into()
                .expect("session expiry fits"),
        )); // 7 days

    // Session layer outermost so the gate can read the session
    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(
            ServiceBuilder::new()
                .layer(session_layer)
                .layer(axum::middleware::from_fn(gate::session_gate)),
        );

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, router.into_make_service()).await {
        tracing::error!("Server error: {}", e);
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }

        ToastProvider {
            AuthProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Client-side gate and navigation shell around every page.
#[component]
fn AppShell() -> Element {
    let route = use_route::<Route>();
    let nav = use_navigator();
    let auth = use_auth();
    let path = route.to_string();

    if auth().loading {
        return rsx! {};
    }

    let session = SessionState::from(auth().signed_in());
    if let GateDecision::Redirect(to) = decide(&path, session) {
        if let Ok(target) = Route::from_str(to) {
            nav.replace(target);
        }
        return rsx! {};
    }

    rsx! {
        Outlet::<Route> {}
        if ui::shows_nav(&path) {
            BottomNav {
                current_path: path.clone(),
                on_navigate: move |to: &'static str| {
                    if let Ok(target) = Route::from_str(to) {
                        nav.push(target);
                    }
                },
                on_signed_out: move |_| {
                    nav.replace(Route::Landing {});
                },
            }
        }
    }
}
