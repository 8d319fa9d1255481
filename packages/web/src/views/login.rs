//! Login page view with the email/password form.

use api::Screen;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input, Label};
use ui::{use_auth, use_backend};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go to the profile
    if !auth().loading && auth().user.is_some() && !loading() {
        nav.replace(Route::Profile {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let provider = backend.auth.clone();
        async move {
            error.set(None);
            loading.set(true);
            let result = api::accounts::login(&provider, &email(), &password()).await;
            loading.set(false);
            match result {
                Ok(_) => {
                    nav.push(Route::Profile {});
                }
                Err(e) => {
                    tracing::warn!("Login failed: {e}");
                    error.set(Some(e.message(Screen::Login)));
                }
            }
        }
    };

    rsx! {
        div {
            class: "auth-container",
            h2 { "Iniciar Sesión" }

            form {
                class: "auth-form",
                onsubmit: handle_login,

                div {
                    class: "field",
                    Label { html_for: "login-email", "Correo electrónico" }
                    Input {
                        id: "login-email",
                        r#type: "email",
                        value: email(),
                        required: true,
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "login-password", "Contraseña" }
                    Input {
                        id: "login-password",
                        r#type: "password",
                        value: password(),
                        required: true,
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }

                if let Some(err) = error() {
                    p { class: "form-error", "{err}" }
                }

                Button {
                    variant: ButtonVariant::Primary,
                    r#type: "submit",
                    disabled: loading(),
                    "Iniciar sesión"
                }
            }

            p {
                class: "auth-links",
                Link { to: Route::PasswordReset {}, "¿Olvidaste tu contraseña?" }
            }
            p {
                class: "auth-links",
                "¿No tienes cuenta? "
                Link { to: Route::Register {}, "Regístrate aquí" }
            }
        }
    }
}
