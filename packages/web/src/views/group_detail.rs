use dioxus::prelude::*;
use store::{Post, PostDraft, Submission};
use ui::components::{Button, ButtonVariant, Textarea};
use ui::{alert, use_auth, use_backend};

#[component]
pub fn GroupDetail(id: String) -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let mut group_id = use_signal(|| id.clone());
    if *group_id.peek() != id {
        group_id.set(id.clone());
    }

    let mut group_doc = {
        let repo = backend.repo.clone();
        use_resource(move || {
            let repo = repo.clone();
            let id = group_id();
            async move {
                repo.get_group(&id).await.unwrap_or_else(|e| {
                    tracing::error!("Failed to load group {id}: {e}");
                    None
                })
            }
        })
    };

    let handle_join = move |_: MouseEvent| {
        let repo = backend.repo.clone();
        let actor = auth().actor();
        let id = group_id();
        async move {
            let Some(actor) = actor else {
                return;
            };
            match repo.join_group(&actor, &id).await {
                Ok(()) => group_doc.restart(),
                Err(e) => tracing::error!("Failed to join group {id}: {e}"),
            }
        }
    };

    let Some(loaded) = group_doc() else {
        return rsx! { p { class: "muted", "Cargando..." } };
    };
    let Some(group) = loaded else {
        return rsx! { p { class: "muted", "Grupo no encontrado." } };
    };
    let is_member = auth().uid().is_some_and(|uid| group.is_member(&uid));
    let members = group.members.len();

    rsx! {
        h2 { "{group.name}" }
        p { "{group.description}" }
        p { class: "muted", "Miembros: {members}" }

        if is_member {
            Forum { key: "{group.id}", group_id: group.id.clone() }
        } else {
            p { class: "form-error", "Debes unirte al grupo para ver y participar en el foro." }
            Button {
                variant: ButtonVariant::Primary,
                onclick: handle_join,
                "Unirse"
            }
        }
    }
}

/// Live posts of a group plus the composer. Mounted only for members.
#[component]
fn Forum(group_id: String) -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let mut posts = use_signal(Vec::<Post>::new);
    let mut content = use_signal(String::new);

    let watched = group_id.clone();
    let repo = backend.repo.clone();
    use_future(move || {
        let mut subscription = repo.watch_posts(&watched);
        async move {
            while let Some(snapshot) = subscription.next().await {
                match snapshot {
                    Ok(list) => posts.set(list),
                    Err(e) => tracing::error!("Failed to load posts: {e}"),
                }
            }
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let repo = backend.repo.clone();
        let actor = auth().actor();
        let draft = PostDraft {
            group_id: group_id.clone(),
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
    };

    rsx! {
        section {
            class: "posts",
            form {
                class: "post-form",
                onsubmit: on_submit,
                Textarea {
                    placeholder: "Escribe un mensaje...",
                    value: content(),
                    oninput: move |evt: FormEvent| content.set(evt.value()),
                }
                Button { variant: ButtonVariant::Primary, r#type: "submit", "Publicar" }
            }
            ul {
                for post in posts() {
                    li {
                        key: "{post.id}",
                        class: "post",
                        strong { "{post.author_name}" }
                        p { "{post.content}" }
                    }
                }
            }
        }
    }
}
