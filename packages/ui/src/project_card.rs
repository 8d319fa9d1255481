use dioxus::prelude::*;
use store::Project;

use crate::auth::use_auth;
use crate::components::{Button, ButtonVariant};
use crate::icons::{FaCode, FaUpRightFromSquare};
use crate::toggle_buttons::{FavoriteButton, LikeButton};
use crate::Icon;

/// Summary card for a project.
///
/// Like/Favorite buttons show for signed-in viewers. `favorites` is the
/// viewer's favorites set. Edit and delete show only when the matching
/// handler is given and the viewer owns the project.
#[component]
pub fn ProjectCard(
    project: Project,
    #[props(default)] favorites: Vec<String>,
    on_open: Option<EventHandler<String>>,
    on_edit: Option<EventHandler<Project>>,
    on_delete: Option<EventHandler<String>>,
) -> Element {
    let auth = use_auth();
    let owned = auth()
        .uid()
        .is_some_and(|uid| project.is_owned_by(&uid));

    let id = project.id.clone();
    let image = project.image().map(str::to_string);
    let github = project.github().map(str::to_string);
    let demo = project.demo().map(str::to_string);
    let tags: Vec<String> = project
        .categories
        .iter()
        .chain(&project.technologies)
        .chain(&project.labels)
        .cloned()
        .collect();

    rsx! {
        article {
            class: "project-card",
            if let Some(src) = image {
                img { class: "project-card-image", src: "{src}", alt: "{project.title}" }
            }
            div {
                class: "project-card-body",
                h3 {
                    class: "project-card-title",
                    onclick: {
                        let id = id.clone();
                        move |_| {
                            if let Some(handler) = on_open {
                                handler.call(id.clone());
                            }
                        }
                    },
                    "{project.title}"
                }
                p { class: "project-card-author", "por {project.display_author()}" }
                p { class: "project-card-description", "{project.description}" }
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
                    if let Some(href) = github {
                        a { href: "{href}", target: "_blank", rel: "noopener noreferrer",
                            Icon { icon: FaCode, width: 14, height: 14 }
                            " GitHub"
                        }
                    }
                    if let Some(href) = demo {
                        a { href: "{href}", target: "_blank", rel: "noopener noreferrer",
                            Icon { icon: FaUpRightFromSquare, width: 14, height: 14 }
                            " Demo"
                        }
                    }
                }
                div {
                    class: "project-card-actions",
                    LikeButton { project_id: id.clone(), liked_by: project.liked_by.clone() }
                    FavoriteButton { project_id: id.clone(), favorites }
                    if owned {
                        if let Some(handler) = on_edit {
                            Button {
                                variant: ButtonVariant::Ghost,
                                onclick: {
                                    let project = project.clone();
                                    move |_| handler.call(project.clone())
                                },
                                "Editar"
                            }
                        }
                        if let Some(handler) = on_delete {
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: {
                                    let id = id.clone();
                                    move |_| handler.call(id.clone())
                                },
                                "Eliminar"
                            }
                        }
                    }
                }
            }
        }
    }
}
