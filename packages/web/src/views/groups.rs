use dioxus::prelude::*;
use store::{join_locally, Group, GroupDraft, Submission};
use ui::components::{Button, ButtonVariant, Input};
use ui::{alert, use_auth, use_backend};

use crate::Route;

#[component]
pub fn Groups() -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let nav = use_navigator();
    let mut groups = use_signal(Vec::<Group>::new);
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);

    let repo = backend.repo.clone();
    let _loader = use_resource(move || {
        let repo = repo.clone();
        async move {
            match repo.list_groups().await {
                Ok(list) => groups.set(list),
                Err(e) => tracing::error!("Failed to load groups: {e}"),
            }
        }
    });

    let handle_create = {
        let repo = backend.repo.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let repo = repo.clone();
            let actor = auth().actor();
            let draft = GroupDraft {
                name: name(),
                description: description(),
            };
            async move {
                let result = Submission::new()
                    .run(
                        &draft,
                        actor.as_ref(),
                        &repo,
                        |id| {
                            nav.push(Route::GroupDetail { id: id.to_string() });
                        },
                        || {
                            name.set(String::new());
                            description.set(String::new());
                        },
                    )
                    .await;
                if let Err(err) = result {
                    if let Some(message) = err.alert() {
                        alert(message);
                    }
                }
            }
        }
    };

    // The member is appended locally before the write; a failed write is only logged.
    let handle_join = EventHandler::new(move |group_id: String| {
        let repo = backend.repo.clone();
        let Some(actor) = auth().actor() else {
            return;
        };
        if !join_locally(&mut groups.write(), &group_id, &actor.uid) {
            return;
        }
        spawn(async move {
            if let Err(e) = repo.join_group(&actor, &group_id).await {
                tracing::warn!("Failed to join group {group_id}: {e}");
            }
        });
    });

    let viewer = auth().uid();

    rsx! {
        h2 { "Grupos" }

        form {
            class: "group-form",
            onsubmit: handle_create,
            Input {
                placeholder: "Nombre del grupo",
                value: name(),
                required: true,
                oninput: move |evt: FormEvent| name.set(evt.value()),
            }
            Input {
                placeholder: "Descripción",
                value: description(),
                oninput: move |evt: FormEvent| description.set(evt.value()),
            }
            Button { variant: ButtonVariant::Primary, r#type: "submit", "Crear grupo" }
        }

        ul {
            class: "group-list",
            for group in groups() {
                li {
                    key: "{group.id}",
                    class: "group-item",
                    Link { to: Route::GroupDetail { id: group.id.clone() }, "{group.name}" }
                    div { "{group.description}" }
                    div {
                        class: "muted",
                        {member_line(&group)}
                    }
                    if let Some(uid) = viewer.as_deref() {
                        if group.is_member(uid) {
                            span { class: "member-badge", "Ya eres miembro" }
                        } else {
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: {
                                    let id = group.id.clone();
                                    move |_| handle_join.call(id.clone())
                                },
                                "Unirse"
                            }
                        }
                    }
                }
            }
        }
    }
}

fn member_line(group: &Group) -> String {
    match group.created_at {
        Some(created) => format!("Miembros: {} · {}", group.members.len(), created.format("%d/%m/%Y")),
        None => format!("Miembros: {}", group.members.len()),
    }
}
