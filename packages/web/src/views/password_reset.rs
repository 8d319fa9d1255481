use api::{Screen, RESET_SENT_MESSAGE};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input};
use ui::use_backend;

#[component]
pub fn PasswordReset() -> Element {
    let backend = use_backend();
    let mut email = use_signal(String::new);
    let mut sent = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let provider = backend.auth.clone();
        async move {
            error.set(None);
            match api::accounts::reset_password(&provider, &email()).await {
                Ok(()) => sent.set(true),
                Err(e) => error.set(Some(e.message(Screen::PasswordReset))),
            }
        }
    };

    rsx! {
        div {
            class: "auth-container",
            h2 { "Recuperar Contraseña" }
            if sent() {
                p { class: "form-success", "{RESET_SENT_MESSAGE}" }
            } else {
                form {
                    class: "auth-form",
                    onsubmit: handle_submit,
                    Input {
                        r#type: "email",
                        placeholder: "Correo",
                        value: email(),
                        required: true,
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    if let Some(err) = error() {
                        p { class: "form-error", "{err}" }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        "Enviar enlace"
                    }
                }
            }
        }
    }
}
