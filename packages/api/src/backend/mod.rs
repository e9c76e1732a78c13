//! # Backend module — the hosted database, storage and auth service
//!
//! Everything the app persists goes through one [`BackendClient`]: REST table
//! access for the five record kinds, one object-storage bucket for uploaded
//! images, and password authentication. The module is compiled only with the
//! `server` feature, so the public key and user tokens never reach the
//! browser bundle.
//!
//! ## Design
//!
//! The client is a **lazy, process-wide singleton** backed by a
//! [`tokio::sync::OnceCell`]. The first call to [`get_backend`] reads the
//! endpoint and key from the environment (via `dotenvy`) and caches the
//! client for all subsequent callers. The web binary calls it once at
//! startup so a missing variable fails before the server starts listening.
//!
//! ## Re-exports
//!
//! - [`get_backend`]: returns `&'static BackendClient`, initialising it on first use.
//! - [`BackendConfig`], [`BackendError`], [`BackendClient`].

mod client;
mod config;
mod error;
mod handle;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::BackendError;
pub use handle::get_backend;
