use dioxus::prelude::*;
use store::filter::{CATEGORY_OPTIONS, TAG_OPTIONS, TECHNOLOGY_OPTIONS};
use store::{Asset, Project, ProjectDraft, Submission};

use crate::auth::use_auth;
use crate::backend::use_backend;
use crate::chips_input::ChipsInput;
use crate::components::{Button, ButtonVariant, Input, Label, Textarea};
use crate::dialog::alert;

/// Create a project, or edit `existing` when given.
///
/// `on_saved` receives the project id, then `on_close` fires.
#[component]
pub fn ProjectForm(
    existing: Option<Project>,
    on_saved: EventHandler<String>,
    on_close: EventHandler<()>,
) -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let mut draft = use_signal(|| {
        existing
            .as_ref()
            .map(ProjectDraft::from_project)
            .unwrap_or_default()
    });
    let mut busy = use_signal(|| false);

    let editing = draft.read().is_edit();
    let attached = draft.read().image.as_ref().map(|a| a.name.clone());

    let on_file = move |evt: FormEvent| async move {
        let Some(file) = evt.files().into_iter().next() else {
            return;
        };
        let name = file.name();
        match file.read_bytes().await {
            Ok(bytes) => {
                draft.write().image = Some(Asset {
                    name,
                    bytes: bytes.to_vec(),
                });
            }
            Err(e) => tracing::error!("Failed to read {name}: {e}"),
        }
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let repo = backend.repo.clone();
        let actor = auth().actor();
        let current = draft();
        async move {
            if busy() {
                return;
            }
            busy.set(true);
            let result = Submission::new()
                .run(
                    &current,
                    actor.as_ref(),
                    &repo,
                    |id| on_saved.call(id.to_string()),
                    || on_close.call(()),
                )
                .await;
            busy.set(false);
            if let Err(err) = result {
                if let Some(message) = err.alert() {
                    alert(message);
                }
            }
        }
    };

    rsx! {
        form {
            class: "project-form",
            onsubmit: on_submit,
            h2 { if editing { "Editar proyecto" } else { "Nuevo proyecto" } }

            div {
                class: "field",
                Label { html_for: "project-title", "Título" }
                Input {
                    id: "project-title",
                    value: draft.read().title.clone(),
                    required: true,
                    oninput: move |evt: FormEvent| draft.write().title = evt.value(),
                }
            }
            div {
                class: "field",
                Label { html_for: "project-description", "Descripción" }
                Textarea {
                    id: "project-description",
                    rows: 4,
                    value: draft.read().description.clone(),
                    oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                }
            }
            div {
                class: "field",
                Label { html_for: "project-github", "GitHub" }
                Input {
                    id: "project-github",
                    r#type: "url",
                    placeholder: "https://github.com/...",
                    value: draft.read().github_link.clone(),
                    oninput: move |evt: FormEvent| draft.write().github_link = evt.value(),
                }
            }
            div {
                class: "field",
                Label { html_for: "project-demo", "Demo" }
                Input {
                    id: "project-demo",
                    r#type: "url",
                    placeholder: "https://...",
                    value: draft.read().demo_link.clone(),
                    oninput: move |evt: FormEvent| draft.write().demo_link = evt.value(),
                }
            }
            div {
                class: "field",
                Label { html_for: "project-categories", "Categorías" }
                ChipsInput {
                    id: "project-categories",
                    placeholder: CATEGORY_OPTIONS.join(", "),
                    values: draft.read().categories.clone(),
                    onchange: move |chips| draft.write().categories = chips,
                }
            }
            div {
                class: "field",
                Label { html_for: "project-technologies", "Tecnologías" }
                ChipsInput {
                    id: "project-technologies",
                    placeholder: TECHNOLOGY_OPTIONS.join(", "),
                    values: draft.read().technologies.clone(),
                    onchange: move |chips| draft.write().technologies = chips,
                }
            }
            div {
                class: "field",
                Label { html_for: "project-labels", "Etiquetas" }
                ChipsInput {
                    id: "project-labels",
                    placeholder: TAG_OPTIONS.join(", "),
                    values: draft.read().labels.clone(),
                    onchange: move |chips| draft.write().labels = chips,
                }
            }
            div {
                class: "field",
                Label { html_for: "project-image", "Imagen" }
                input {
                    id: "project-image",
                    r#type: "file",
                    accept: "image/*",
                    onchange: on_file,
                }
                if let Some(name) = attached {
                    span { class: "field-hint", "{name}" }
                }
            }

            div {
                class: "form-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: busy(),
                    if editing { "Guardar cambios" } else { "Publicar" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_close.call(()),
                    "Cancelar"
                }
            }
        }
    }
}
