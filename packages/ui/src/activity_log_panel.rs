use dioxus::prelude::*;
use store::{recent_activity, ActivityEntry};

/// The user's most recent activity, newest first.
#[component]
pub fn ActivityLogPanel(entries: Vec<ActivityEntry>, #[props(default = 20)] limit: usize) -> Element {
    let recent: Vec<(String, ActivityEntry)> = recent_activity(&entries, limit)
        .into_iter()
        .map(|e| (e.timestamp.format("%d/%m/%Y %H:%M").to_string(), e))
        .collect();

    rsx! {
        section {
            class: "activity-log-panel",
            h3 { "Actividad reciente" }
            if recent.is_empty() {
                p { class: "muted", "Sin actividad todavía." }
            }
            ul {
                class: "activity-log-entries",
                for (when, entry) in recent {
                    li {
                        class: "activity-log-entry activity-{entry.kind}",
                        span { class: "activity-log-time", "{when}" }
                        span { " {entry.message}" }
                    }
                }
            }
        }
    }
}
