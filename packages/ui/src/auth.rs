//! Authentication context and hooks for the UI.

use api::{Session, UserInfo};
use dioxus::prelude::*;
use store::Actor;

use crate::backend::use_backend;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    /// True until the first auth state has arrived.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn actor(&self) -> Option<Actor> {
        self.user.as_ref().map(UserInfo::actor)
    }

    pub fn uid(&self) -> Option<String> {
        self.user.as_ref().map(|u| u.id.clone())
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that tracks the auth session.
/// Wrap your app with this component, inside the backend provider.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let backend = use_backend();
    let mut auth_state = use_signal(AuthState::default);

    // The session lives inside this task; unmounting the provider drops both.
    use_future(move || {
        let auth = backend.auth.clone();
        async move {
            let mut session = Session::subscribe(&auth);
            while let Some(user) = session.next().await {
                tracing::debug!(signed_in = user.is_some(), "auth state changed");
                auth_state.set(AuthState {
                    user,
                    loading: false,
                });
            }
            session.teardown();
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Cerrar sesión".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logout: EventHandler<()>,
) -> Element {
    let backend = use_backend();

    let onclick = move |_| {
        let auth = backend.auth.clone();
        async move {
            match api::accounts::logout(&auth).await {
                Ok(()) => on_logout.call(()),
                Err(e) => tracing::error!("Failed to log out: {e}"),
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
