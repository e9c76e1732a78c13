use dioxus::prelude::*;
use store::{CountdownConfig, TimeLeft};

use crate::timer::sleep;

fn now_local() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Live countdown to the configured anniversary.
///
/// Recomputes once per precision tick in a task that is cancelled when the
/// widget unmounts.
#[component]
pub fn Countdown(config: CountdownConfig) -> Element {
    let target = config.target;
    let precision = config.precision;
    let mut left = use_signal(move || TimeLeft::until_with(target, now_local(), precision));

    let ticker = use_hook(move || {
        spawn(async move {
            loop {
                sleep(precision.tick()).await;
                let next = TimeLeft::until_with(target, now_local(), precision);
                left.set(next);
                if next.is_zero() {
                    break;
                }
            }
        })
    });
    use_drop(move || ticker.cancel());

    rsx! {
        section {
            class: "countdown",
            h2 { class: "countdown-label", "{config.label}" }
            div {
                class: "countdown-fields",
                for (unit, value) in left().fields(precision) {
                    div {
                        key: "{unit}",
                        class: "countdown-field",
                        span { class: "countdown-value", "{value}" }
                        span { class: "countdown-unit", "{unit}" }
                    }
                }
            }
        }
    }
}
