use chrono::NaiveDate;
use dioxus::prelude::*;
use store::{Draft, JournalConfig, Milestone, NewMilestone};

use crate::components::{Card, EmptyState, LoadingSpinner, PageHeader};
use crate::{use_collection, use_toasts, Countdown};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Milestones in date order, under the anniversary countdown.
#[component]
pub fn TimelineView() -> Element {
    let milestones = use_collection(api::list_milestones, "Connecting to our journey...");
    let toasts = use_toasts();

    let config = use_resource(|| async move {
        api::get_journal_config().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load journal config: {}", e);
            JournalConfig::default()
        })
    });

    let mut title = use_signal(String::new);
    let mut date = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let handle_add = move |evt: FormEvent| async move {
        evt.prevent_default();
        let draft = NewMilestone {
            title: title().trim().to_string(),
            date: NaiveDate::parse_from_str(&date(), "%Y-%m-%d").ok(),
            description: description().trim().to_string(),
            user_id: None,
        };
        if let Err(e) = draft.validate() {
            toasts.error(e.to_string());
            return;
        }

        saving.set(true);
        if milestones.create(api::create_milestone(draft)).await {
            title.set(String::new());
            date.set(String::new());
            description.set(String::new());
            toasts.success("Milestone added");
        }
        saving.set(false);
    };

    let list = milestones.list();
    let items = list().items().to_vec();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            PageHeader { title: "Our Timeline", subtitle: "Every step of our journey" }

            if let Some(config) = config() {
                Countdown { config: config.countdown }
            }

            form {
                class: "entry-form",
                onsubmit: handle_add,
                input {
                    class: "input",
                    placeholder: "What happened?",
                    value: title(),
                    oninput: move |evt: FormEvent| title.set(evt.value()),
                }
                input {
                    class: "input",
                    r#type: "date",
                    value: date(),
                    oninput: move |evt: FormEvent| date.set(evt.value()),
                }
                textarea {
                    class: "input",
                    placeholder: "Tell the story (optional)",
                    value: description(),
                    oninput: move |evt: FormEvent| description.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: saving(),
                    "Add milestone"
                }
            }

            if !list().is_loaded() {
                LoadingSpinner {}
            } else if items.is_empty() {
                EmptyState { title: "No milestones yet", hint: "Add the first one above." }
            } else {
                ol {
                    class: "timeline",
                    for milestone in items {
                        MilestoneItem {
                            key: "{milestone.id}",
                            milestone: milestone.clone(),
                            on_delete: move |id: String| async move {
                                milestones.delete(id.clone(), api::delete_milestone(id)).await;
                            },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MilestoneItem(milestone: Milestone, on_delete: EventHandler<String>) -> Element {
    let id = milestone.id.clone();
    let when = milestone.date.format("%B %-d, %Y").to_string();

    rsx! {
        li {
            class: "timeline-item",
            Card {
                on_delete: move |_| on_delete.call(id.clone()),
                span { class: "timeline-date", "{when}" }
                h3 { "{milestone.title}" }
                if !milestone.description.is_empty() {
                    p { "{milestone.description}" }
                }
            }
        }
    }
}
