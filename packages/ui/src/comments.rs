use dioxus::prelude::*;
use store::{Comment, CommentDraft, Submission};

use crate::auth::use_auth;
use crate::backend::use_backend;
use crate::components::{Button, ButtonVariant, Textarea};
use crate::dialog::{alert, confirm};

const DELETE_CONFIRM: &str = "¿Eliminar comentario?";

/// Live comment thread of a project.
#[component]
pub fn Comments(project_id: String) -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let mut comments = use_signal(Vec::<Comment>::new);
    let mut content = use_signal(String::new);

    // One subscription per mounted thread; it is dropped with the task.
    let watched = project_id.clone();
    let repo = backend.repo.clone();
    use_future(move || {
        let mut subscription = repo.watch_comments(&watched);
        async move {
            while let Some(snapshot) = subscription.next().await {
                match snapshot {
                    Ok(list) => comments.set(list),
                    Err(e) => tracing::error!("Failed to load comments: {e}"),
                }
            }
        }
    });

    let viewer = auth().uid();
    let signed_in = viewer.is_some();

    let on_submit = {
        let repo = backend.repo.clone();
        let project_id = project_id.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let repo = repo.clone();
            let actor = auth().actor();
            let draft = CommentDraft {
                project_id: project_id.clone(),
                content: content(),
            };
            async move {
                let result = Submission::new()
                    .run(&draft, actor.as_ref(), &repo, |_| {}, || content.set(String::new()))
                    .await;
                if let Err(err) = result {
                    if let Some(message) = err.alert() {
                        alert(message);
                    }
                }
            }
        }
    };

    rsx! {
        section {
            class: "comments",
            h3 { "Comentarios" }
            if comments.read().is_empty() {
                p { class: "muted", "Sin comentarios todavía." }
            }
            ul {
                for comment in comments() {
                    CommentItem {
                        key: "{comment.id}",
                        can_delete: viewer.as_deref() == Some(comment.author_id.as_str()),
                        project_id: project_id.clone(),
                        comment: comment.clone(),
                    }
                }
            }
            if signed_in {
                form {
                    class: "comment-form",
                    onsubmit: on_submit,
                    Textarea {
                        placeholder: "Escribe un comentario...",
                        value: content(),
                        oninput: move |evt: FormEvent| content.set(evt.value()),
                    }
                    Button { r#type: "submit", "Comentar" }
                }
            }
        }
    }
}

#[component]
fn CommentItem(project_id: String, comment: Comment, can_delete: bool) -> Element {
    let backend = use_backend();
    let auth = use_auth();

    let when = comment
        .created_at
        .map(|t| t.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default();

    let on_delete = {
        let comment_id = comment.id.clone();
        move |_: MouseEvent| {
            let repo = backend.repo.clone();
            let actor = auth().actor();
            let project_id = project_id.clone();
            let comment_id = comment_id.clone();
            async move {
                let Some(actor) = actor else {
                    return;
                };
                if !confirm(DELETE_CONFIRM) {
                    return;
                }
                if let Err(e) = repo.delete_comment(&actor, &project_id, &comment_id).await {
                    tracing::error!("Failed to delete comment: {e}");
                }
            }
        }
    };

    rsx! {
        li {
            class: "comment",
            div {
                class: "comment-meta",
                strong { "{comment.author_name}" }
                span { class: "muted", " {when}" }
            }
            p { "{comment.content}" }
            if can_delete {
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: on_delete,
                    "Eliminar"
                }
            }
        }
    }
}
