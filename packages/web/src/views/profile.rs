//! The signed-in user's own page: projects, favorites, portfolio and activity.

use dioxus::prelude::*;
use store::{Education, Experience, PortfolioDraft, Project, Submission};
use ui::components::{Button, ButtonVariant, Input, Label};
use ui::{
    alert, confirm, use_auth, use_backend, ActivityLogPanel, ChipsInput, ModalOverlay,
    ProjectCard, ProjectForm,
};

use super::use_viewer_profile;
use crate::Route;

const DELETE_CONFIRM: &str = "¿Estás seguro de eliminar este proyecto?";

/// Which project the form modal is open for.
#[derive(Clone, PartialEq)]
enum Editing {
    Closed,
    New,
    Existing(Project),
}

#[component]
pub fn Profile() -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let nav = use_navigator();
    let mut viewer = use_viewer_profile();
    let mut editing = use_signal(|| Editing::Closed);
    let visible_entries = backend.repo.config().activity.visible_entries;

    let uid = auth().uid();
    let mut own_projects = {
        let repo = backend.repo.clone();
        use_resource(move || {
            let repo = repo.clone();
            let uid = auth().uid();
            async move {
                let Some(uid) = uid else {
                    return Vec::new();
                };
                repo.projects_by_owner(&uid).await.unwrap_or_else(|e| {
                    tracing::error!("Failed to load own projects: {e}");
                    Vec::new()
                })
            }
        })
    };

    let favorite_ids = viewer()
        .flatten()
        .map(|p| p.favorites)
        .unwrap_or_default();

    let favorite_projects = {
        let repo = backend.repo.clone();
        use_resource(move || {
            let repo = repo.clone();
            let ids = viewer()
                .flatten()
                .map(|p| p.favorites)
                .unwrap_or_default();
            async move {
                repo.projects_by_ids(&ids).await.unwrap_or_else(|e| {
                    tracing::error!("Failed to load favorites: {e}");
                    Vec::new()
                })
            }
        })
    };

    let on_delete = EventHandler::new(move |id: String| {
        let repo = backend.repo.clone();
        let actor = auth().actor();
        spawn(async move {
            let Some(actor) = actor else {
                return;
            };
            if !confirm(DELETE_CONFIRM) {
                return;
            }
            match repo.delete_project(&actor, &id).await {
                Ok(()) => own_projects.restart(),
                Err(e) => {
                    tracing::error!("Failed to delete project {id}: {e}");
                    alert("Error al eliminar el proyecto.");
                }
            }
        });
    });

    let profile = viewer().flatten();
    let email = auth().user.map(|u| u.email).unwrap_or_default();

    rsx! {
        div {
            class: "profile-header",
            h2 { "Mi Perfil" }
            span { class: "muted", "{email}" }
        }

        section {
            class: "section",
            div {
                class: "section-header",
                h3 { "Mis Proyectos" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| editing.set(Editing::New),
                    "Nuevo proyecto"
                }
            }
            div {
                class: "project-grid",
                for project in own_projects().unwrap_or_default() {
                    ProjectCard {
                        key: "{project.id}",
                        project: project.clone(),
                        favorites: favorite_ids.clone(),
                        on_open: move |id: String| {
                            nav.push(Route::ProjectDetail { id });
                        },
                        on_edit: move |p: Project| editing.set(Editing::Existing(p)),
                        on_delete,
                    }
                }
            }
        }

        section {
            class: "section",
            h3 { "Favoritos" }
            if favorite_projects().is_none_or(|list| list.is_empty()) {
                p { class: "muted", "Todavía no tienes favoritos." }
            }
            div {
                class: "project-grid",
                for project in favorite_projects().unwrap_or_default() {
                    ProjectCard {
                        key: "fav-{project.id}",
                        project: project.clone(),
                        favorites: favorite_ids.clone(),
                        on_open: move |id: String| {
                            nav.push(Route::ProjectDetail { id });
                        },
                    }
                }
            }
        }

        if let Some(profile) = profile.clone() {
            PortfolioEditor {
                draft: PortfolioDraft::from_profile(&profile),
                on_saved: move |_| viewer.restart(),
            }
            ActivityLogPanel { entries: profile.activity_log.clone(), limit: visible_entries }
        } else if uid.is_some() {
            PortfolioEditor {
                draft: PortfolioDraft::default(),
                on_saved: move |_| viewer.restart(),
            }
        }

        match editing() {
            Editing::Closed => rsx! {},
            mode => {
                let existing = match mode {
                    Editing::Existing(p) => Some(p),
                    _ => None,
                };
                rsx! {
                    ModalOverlay {
                        on_close: move |_| editing.set(Editing::Closed),
                        ProjectForm {
                            existing,
                            on_saved: move |_| own_projects.restart(),
                            on_close: move |_| editing.set(Editing::Closed),
                        }
                    }
                }
            }
        }
    }
}

/// Skills, stack, LinkedIn, experience and education.
#[component]
fn PortfolioEditor(draft: PortfolioDraft, on_saved: EventHandler<()>) -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let mut form = use_signal(|| draft.clone());
    let mut saved_from = use_signal(|| draft.clone());
    let mut experience = use_signal(Experience::default);
    let mut education = use_signal(Education::default);
    let mut saved = use_signal(|| false);

    if *saved_from.peek() != draft {
        saved_from.set(draft.clone());
        form.set(draft.clone());
    }

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let repo = backend.repo.clone();
        let actor = auth().actor();
        let current = form();
        async move {
            saved.set(false);
            let result = Submission::new()
                .run(&current, actor.as_ref(), &repo, |_| saved.set(true), || on_saved.call(()))
                .await;
            if let Err(err) = result {
                if let Some(message) = err.alert() {
                    alert(message);
                }
            }
        }
    };

    let add_experience = move |_: MouseEvent| {
        let entry = experience();
        if entry.role.trim().is_empty() && entry.company.trim().is_empty() {
            return;
        }
        form.write().experience.push(entry);
        experience.set(Experience::default());
    };

    let add_education = move |_: MouseEvent| {
        let entry = education();
        if entry.title.trim().is_empty() && entry.institution.trim().is_empty() {
            return;
        }
        form.write().education.push(entry);
        education.set(Education::default());
    };

    rsx! {
        section {
            class: "section",
            h3 { "Portafolio" }
            form {
                onsubmit: on_submit,
                div {
                    class: "field",
                    Label { html_for: "portfolio-skills", "Habilidades" }
                    ChipsInput {
                        id: "portfolio-skills",
                        values: form.read().skills.clone(),
                        onchange: move |chips| form.write().skills = chips,
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "portfolio-stack", "Stack" }
                    ChipsInput {
                        id: "portfolio-stack",
                        values: form.read().stack.clone(),
                        onchange: move |chips| form.write().stack = chips,
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "portfolio-linkedin", "LinkedIn" }
                    Input {
                        id: "portfolio-linkedin",
                        r#type: "url",
                        placeholder: "https://www.linkedin.com/in/...",
                        value: form.read().linkedin.clone(),
                        oninput: move |evt: FormEvent| form.write().linkedin = evt.value(),
                    }
                }

                h4 { "Experiencia" }
                ul {
                    class: "portfolio-list",
                    for (idx, e) in form().experience.into_iter().enumerate() {
                        li {
                            key: "exp-{idx}",
                            "{e.role} · {e.company} ({e.from} - {e.to}) "
                            button {
                                class: "chip-remove",
                                r#type: "button",
                                onclick: move |_| {
                                    form.write().experience.remove(idx);
                                },
                                "×"
                            }
                        }
                    }
                }
                div {
                    class: "post-form",
                    Input {
                        placeholder: "Rol",
                        value: experience.read().role.clone(),
                        oninput: move |evt: FormEvent| experience.write().role = evt.value(),
                    }
                    Input {
                        placeholder: "Empresa",
                        value: experience.read().company.clone(),
                        oninput: move |evt: FormEvent| experience.write().company = evt.value(),
                    }
                    Input {
                        placeholder: "Desde",
                        value: experience.read().from.clone(),
                        oninput: move |evt: FormEvent| experience.write().from = evt.value(),
                    }
                    Input {
                        placeholder: "Hasta",
                        value: experience.read().to.clone(),
                        oninput: move |evt: FormEvent| experience.write().to = evt.value(),
                    }
                    Button { variant: ButtonVariant::Outline, onclick: add_experience, "Añadir" }
                }

                h4 { "Educación" }
                ul {
                    class: "portfolio-list",
                    for (idx, e) in form().education.into_iter().enumerate() {
                        li {
                            key: "edu-{idx}",
                            "{e.title} · {e.institution} ({e.from} - {e.to}) "
                            button {
                                class: "chip-remove",
                                r#type: "button",
                                onclick: move |_| {
                                    form.write().education.remove(idx);
                                },
                                "×"
                            }
                        }
                    }
                }
                div {
                    class: "post-form",
                    Input {
                        placeholder: "Título",
                        value: education.read().title.clone(),
                        oninput: move |evt: FormEvent| education.write().title = evt.value(),
                    }
                    Input {
                        placeholder: "Institución",
                        value: education.read().institution.clone(),
                        oninput: move |evt: FormEvent| education.write().institution = evt.value(),
                    }
                    Input {
                        placeholder: "Desde",
                        value: education.read().from.clone(),
                        oninput: move |evt: FormEvent| education.write().from = evt.value(),
                    }
                    Input {
                        placeholder: "Hasta",
                        value: education.read().to.clone(),
                        oninput: move |evt: FormEvent| education.write().to = evt.value(),
                    }
                    Button { variant: ButtonVariant::Outline, onclick: add_education, "Añadir" }
                }

                div {
                    class: "form-actions",
                    Button { variant: ButtonVariant::Primary, r#type: "submit", "Guardar perfil" }
                    if saved() {
                        span { class: "form-success", "Perfil guardado." }
                    }
                }
            }
        }
    }
}
