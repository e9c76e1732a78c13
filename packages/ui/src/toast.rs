use std::time::Duration;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::timer::sleep;
use crate::toast_host::ToastHost;

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    pub entries: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn push(&mut self, level: ToastLevel, message: &str) -> u64 {
        self.next_id += 1;
        self.entries.push(Toast {
            id: self.next_id,
            level,
            message: message.to_string(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|t| t.id != id);
    }
}

/// Handle for raising toasts from any component under [`ToastProvider`].
#[derive(Clone, Copy)]
pub struct Toasts {
    queue: Signal<ToastQueue>,
}

impl Toasts {
    /// Queue a toast. It is dismissed after [`TOAST_TTL`] even if the
    /// calling component has unmounted by then.
    pub fn show(&self, level: ToastLevel, message: impl AsRef<str>) {
        let mut queue = self.queue;
        let id = queue.write().push(level, message.as_ref());
        spawn_forever(async move {
            sleep(TOAST_TTL).await;
            queue.write().dismiss(id);
        });
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.show(ToastLevel::Info, message);
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.show(ToastLevel::Success, message);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.show(ToastLevel::Warning, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.show(ToastLevel::Error, message);
    }
}

pub fn use_toasts() -> Toasts {
    Toasts {
        queue: use_context::<Signal<ToastQueue>>(),
    }
}

/// Provides the toast queue to its children and renders the toast stack.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(ToastQueue::default()));

    rsx! {
        {children}
        ToastHost {}
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::testing::settle;

    /// Number of toasts on screen, as last rendered.
    #[derive(Clone, Default)]
    struct Visible(Rc<Cell<usize>>);

    #[component]
    fn Observer() -> Element {
        let queue = use_context::<Signal<ToastQueue>>();
        let visible = use_context::<Visible>();
        visible.0.set(queue.read().entries.len());
        rsx! {}
    }

    #[component]
    fn Greeter() -> Element {
        let toasts = use_toasts();
        use_hook(move || spawn(async move { toasts.success("Welcome back") }));
        rsx! { "signed in" }
    }

    fn greeting_app(visible: Visible) -> Element {
        use_context_provider(|| visible.clone());
        let mut greeting = use_signal(|| true);
        use_hook(move || {
            spawn(async move {
                sleep(Duration::from_millis(100)).await;
                greeting.set(false);
            })
        });

        rsx! {
            ToastProvider {
                if greeting() {
                    Greeter {}
                }
                Observer {}
            }
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_toast_dismissed_after_raising_component_unmounts() {
        let visible = Visible::default();
        let mut dom = VirtualDom::new_with_props(greeting_app, visible.clone());
        dom.rebuild_in_place();

        settle(&mut dom, Duration::from_secs(1)).await;
        assert_eq!(visible.0.get(), 1);

        settle(&mut dom, Duration::from_secs(30)).await;
        assert_eq!(visible.0.get(), 0);
    }

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastLevel::Info, "Connecting to our journey...");
        let second = queue.push(ToastLevel::Error, "Could not save");
        assert_ne!(first, second);
        assert_eq!(queue.entries.len(), 2);

        queue.dismiss(first);
        assert_eq!(queue.entries.len(), 1);
        assert_eq!(queue.entries[0].message, "Could not save");

        queue.dismiss(first);
        assert_eq!(queue.entries.len(), 1);
    }
}
