//! Registration page view with email/password form.

use api::Screen;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input, Label};
use ui::use_backend;

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let backend = use_backend();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let provider = backend.auth.clone();
        let repo = backend.repo.clone();
        async move {
            error.set(None);
            loading.set(true);
            let result = api::accounts::register(
                &provider,
                &repo,
                &email(),
                &password(),
                &confirm_password(),
            )
            .await;
            loading.set(false);
            match result {
                Ok(_) => {
                    nav.push(Route::Profile {});
                }
                Err(e) => {
                    tracing::warn!("Registration failed: {e}");
                    error.set(Some(e.message(Screen::Register)));
                }
            }
        }
    };

    rsx! {
        div {
            class: "auth-container",
            h2 { "Crear Cuenta" }

            form {
                class: "auth-form",
                onsubmit: handle_register,

                div {
                    class: "field",
                    Label { html_for: "register-email", "Correo electrónico" }
                    Input {
                        id: "register-email",
                        r#type: "email",
                        value: email(),
                        required: true,
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "register-password", "Contraseña" }
                    Input {
                        id: "register-password",
                        r#type: "password",
                        value: password(),
                        required: true,
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "register-confirm", "Confirmar contraseña" }
                    Input {
                        id: "register-confirm",
                        r#type: "password",
                        value: confirm_password(),
                        required: true,
                        oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                    }
                }

                if let Some(err) = error() {
                    p { class: "form-error", "{err}" }
                }

                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: loading(),
                    "Registrarse"
                }
            }

            p {
                class: "auth-links",
                "¿Ya tienes cuenta? "
                Link { to: Route::Login {}, "Inicia sesión aquí" }
            }
        }
    }
}
