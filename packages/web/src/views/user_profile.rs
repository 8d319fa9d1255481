use dioxus::prelude::*;
use ui::{use_backend, FollowButton, ProjectCard};

use super::use_viewer_profile;
use crate::Route;

/// Another user's public profile.
#[component]
pub fn UserProfile(id: String) -> Element {
    let backend = use_backend();
    let nav = use_navigator();
    let viewer = use_viewer_profile();
    let mut target_id = use_signal(|| id.clone());
    let mut follower_shift = use_signal(|| 0_i64);
    if *target_id.peek() != id {
        target_id.set(id.clone());
        follower_shift.set(0);
    }

    let profile = {
        let repo = backend.repo.clone();
        use_resource(move || {
            let repo = repo.clone();
            let uid = target_id();
            async move {
                repo.get_user(&uid).await.unwrap_or_else(|e| {
                    tracing::error!("Failed to load user {uid}: {e}");
                    None
                })
            }
        })
    };

    let projects = {
        let repo = backend.repo.clone();
        use_resource(move || {
            let repo = repo.clone();
            let uid = target_id();
            async move { repo.projects_by_owner(&uid).await.unwrap_or_default() }
        })
    };

    let viewer_profile = viewer().flatten();
    let following = viewer_profile
        .as_ref()
        .map(|p| p.following.clone())
        .unwrap_or_default();
    let favorites = viewer_profile.map(|p| p.favorites).unwrap_or_default();

    let Some(loaded) = profile() else {
        return rsx! { p { class: "muted", "Cargando perfil..." } };
    };
    let Some(user) = loaded else {
        return rsx! { p { class: "muted", "No se encontró el usuario." } };
    };
    let followers = user.followers.len() as i64 + follower_shift();

    rsx! {
        div {
            class: "profile-header",
            h2 { "{user.email}" }
            FollowButton {
                target_id: id.clone(),
                following,
                on_toggled: move |active: bool| {
                    follower_shift += if active { 1 } else { -1 };
                },
            }
        }
        p { class: "muted", "Seguidores: {followers}" }
        if let Some(linkedin) = user.linkedin() {
            p {
                a { href: "{linkedin}", target: "_blank", rel: "noopener noreferrer", "LinkedIn" }
            }
        }
        if !user.stack.is_empty() {
            h4 { "Stack" }
            div {
                class: "tags",
                for tech in user.stack.iter() {
                    span { class: "tag", "{tech}" }
                }
            }
        }
        if !user.skills.is_empty() {
            h4 { "Habilidades" }
            div {
                class: "tags",
                for skill in user.skills.iter() {
                    span { class: "tag", "{skill}" }
                }
            }
        }

        h3 { "Proyectos" }
        div {
            class: "project-grid",
            for project in projects().unwrap_or_default() {
                ProjectCard {
                    key: "{project.id}",
                    project: project.clone(),
                    favorites: favorites.clone(),
                    on_open: move |pid: String| {
                        nav.push(Route::ProjectDetail { id: pid });
                    },
                }
            }
        }
    }
}
