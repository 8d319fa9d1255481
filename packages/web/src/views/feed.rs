use dioxus::prelude::*;
use ui::{use_backend, ProjectCard};

use super::use_viewer_profile;
use crate::Route;

/// Projects published by the users the viewer follows, newest first per batch.
#[component]
pub fn Feed() -> Element {
    let backend = use_backend();
    let nav = use_navigator();
    let viewer = use_viewer_profile();

    let projects = use_resource(move || {
        let repo = backend.repo.clone();
        let following = viewer().flatten().map(|p| p.following);
        async move {
            let following = following?;
            match repo.projects_by_owners(&following).await {
                Ok(list) => Some(list),
                Err(e) => {
                    tracing::error!("Failed to load feed: {e}");
                    Some(Vec::new())
                }
            }
        }
    });

    let favorites = viewer()
        .flatten()
        .map(|p| p.favorites)
        .unwrap_or_default();

    rsx! {
        h2 { "Feed personalizado" }
        match projects() {
            Some(Some(list)) if !list.is_empty() => rsx! {
                div {
                    class: "project-grid",
                    for project in list {
                        ProjectCard {
                            key: "{project.id}",
                            project: project.clone(),
                            favorites: favorites.clone(),
                            on_open: move |id: String| {
                                nav.push(Route::ProjectDetail { id });
                            },
                        }
                    }
                }
            },
            Some(_) => rsx! { p { class: "muted", "No hay proyectos recientes de usuarios que sigues." } },
            None => rsx! { p { class: "muted", "Cargando..." } },
        }
    }
}
