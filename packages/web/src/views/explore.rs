use dioxus::prelude::*;
use store::ProjectFilters;
use ui::{use_backend, Filters, ProjectCard, SearchBar};

use super::use_viewer_profile;
use crate::Route;

/// Public project list with search and tag filters.
#[component]
pub fn Explore() -> Element {
    let backend = use_backend();
    let nav = use_navigator();
    let filters = use_signal(ProjectFilters::default);
    let viewer = use_viewer_profile();

    let projects = use_resource(move || {
        let repo = backend.repo.clone();
        async move { repo.list_projects().await }
    });

    let favorites = viewer()
        .flatten()
        .map(|p| p.favorites)
        .unwrap_or_default();

    rsx! {
        h2 { "Proyectos Públicos" }
        SearchBar { filters }
        Filters { filters }

        match &*projects.read() {
            None => rsx! { p { class: "muted", "Cargando proyectos..." } },
            Some(Err(e)) => {
                tracing::error!("Failed to load projects: {e}");
                rsx! { p { class: "muted", "No hay proyectos disponibles." } }
            }
            Some(Ok(list)) => {
                let visible = filters.read().apply(list).into_iter().cloned().collect::<Vec<_>>();
                if visible.is_empty() {
                    rsx! { p { class: "muted", "No hay proyectos disponibles." } }
                } else {
                    rsx! {
                        div {
                            class: "project-grid",
                            for project in visible {
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
                    }
                }
            }
        }
    }
}
