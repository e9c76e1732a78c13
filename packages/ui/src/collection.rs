//! # `use_collection` — the list behind every feature view
//!
//! One hook, instantiated once per record kind. It owns a
//! [`RecordList`] signal and knows how to fill and mutate it:
//!
//! - **Load**: on mount the kind's list server function runs once. A failed
//!   fetch swaps in the fixed sample set and raises an informational toast
//!   instead of an error.
//! - **Create**: the server function's returned record is inserted at its
//!   sorted position. On failure an error toast is raised and `false` is
//!   returned so the view keeps its form input.
//! - **Delete**: the record is removed locally whatever the remote outcome;
//!   a failed remote delete only raises a warning toast.

use std::future::Future;

use dioxus::prelude::*;
use store::{Record, RecordList};

use crate::toast::{use_toasts, Toasts};

pub struct Collection<R: Record> {
    list: Signal<RecordList<R>>,
    toasts: Toasts,
}

impl<R: Record> Clone for Collection<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Record> Copy for Collection<R> {}

impl<R: Record> Collection<R> {
    pub fn list(&self) -> Signal<RecordList<R>> {
        self.list
    }

    /// Insert the created record, or report the failure. Returns whether
    /// the record was created.
    pub async fn create<F>(&self, create: F) -> bool
    where
        F: Future<Output = Result<R, ServerFnError>>,
    {
        let mut list = self.list;
        match create.await {
            Ok(record) => {
                list.write().insert(record);
                true
            }
            Err(e) => {
                tracing::error!(table = R::TABLE, "create failed: {}", e);
                self.toasts.error(format!("Could not save: {e}"));
                false
            }
        }
    }

    /// Remove `id` locally after asking the server to delete it.
    pub async fn delete<F>(&self, id: String, delete: F)
    where
        F: Future<Output = Result<(), ServerFnError>>,
    {
        let mut list = self.list;
        if let Err(e) = delete.await {
            tracing::warn!(table = R::TABLE, id = %id, "remote delete failed: {}", e);
            self.toasts.warning("Removed here, but the server could not delete it");
        }
        list.write().remove(&id);
    }
}

/// Own a record list loaded once by `fetch`.
///
/// `loading_message` is shown as an informational toast when the fetch fails
/// and the samples are shown instead.
pub fn use_collection<R, F, Fut>(fetch: F, loading_message: &'static str) -> Collection<R>
where
    R: Record,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<Vec<R>, ServerFnError>> + 'static,
{
    let mut list = use_signal(RecordList::<R>::new);
    let toasts = use_toasts();

    use_hook(move || {
        spawn(async move {
            let result = fetch().await;
            let failed = list.write().load(result);
            if let Some(e) = failed {
                tracing::warn!(table = R::TABLE, "list failed, showing samples: {}", e);
                toasts.info(loading_message);
            }
        })
    });

    Collection { list, toasts }
}
