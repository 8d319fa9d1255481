use dioxus::prelude::*;
use ui::{use_backend, Comments, FavoriteButton, LikeButton};

use super::use_viewer_profile;
use crate::Route;

#[component]
pub fn ProjectDetail(id: String) -> Element {
    let backend = use_backend();
    let viewer = use_viewer_profile();
    let mut project_id = use_signal(|| id.clone());
    if *project_id.peek() != id {
        project_id.set(id.clone());
    }

    let project = use_resource(move || {
        let repo = backend.repo.clone();
        let id = project_id();
        async move {
            repo.get_project(&id).await.unwrap_or_else(|e| {
                tracing::error!("Failed to load project {id}: {e}");
                None
            })
        }
    });

    let favorites = viewer()
        .flatten()
        .map(|p| p.favorites)
        .unwrap_or_default();

    let Some(loaded) = project() else {
        return rsx! { p { class: "muted", "Cargando proyecto..." } };
    };
    let Some(project) = loaded else {
        return rsx! { p { class: "muted", "Proyecto no encontrado." } };
    };

    let tags: Vec<String> = project
        .categories
        .iter()
        .chain(&project.technologies)
        .chain(&project.labels)
        .cloned()
        .collect();

    rsx! {
        article {
            class: "project-detail",
            if let Some(src) = project.image() {
                img { class: "project-card-image", src: "{src}", alt: "{project.title}" }
            }
            h2 { "{project.title}" }
            p {
                class: "muted",
                "por "
                if project.uid.is_empty() {
                    "{project.display_author()}"
                } else {
                    Link { to: Route::UserProfile { id: project.uid.clone() }, "{project.display_author()}" }
                }
            }
            p { "{project.description}" }
            if !tags.is_empty() {
                div {
                    class: "tags",
                    for tag in tags {
                        span { class: "tag", "{tag}" }
                    }
                }
            }
            div {
                class: "project-card-links",
                if let Some(href) = project.github() {
                    a { href: "{href}", target: "_blank", rel: "noopener noreferrer", "GitHub" }
                }
                if let Some(href) = project.demo() {
                    a { href: "{href}", target: "_blank", rel: "noopener noreferrer", "Demo" }
                }
            }
            div {
                class: "project-card-actions",
                LikeButton { project_id: project.id.clone(), liked_by: project.liked_by.clone() }
                FavoriteButton { project_id: project.id.clone(), favorites }
            }
        }

        Comments { key: "{project.id}", project_id: project.id.clone() }
    }
}
