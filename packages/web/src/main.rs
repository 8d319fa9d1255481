use dioxus::prelude::*;

use store::OpenLabConfig;
use ui::{use_auth, use_backend_provider, use_theme_provider, AuthProvider, LogoutButton, Navbar};
use views::{
    Explore, Feed, GroupDetail, Groups, Login, PasswordReset, Profile, ProjectDetail, Register,
    UserProfile,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Explore {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/password-reset")]
        PasswordReset {},
        #[route("/project/:id")]
        ProjectDetail { id: String },
        #[layout(AuthGuard)]
            #[route("/profile")]
            Profile {},
            #[route("/feed")]
            Feed {},
            #[route("/user/:id")]
            UserProfile { id: String },
            #[route("/groups")]
            Groups {},
            #[route("/groups/:id")]
            GroupDetail { id: String },
        #[end_layout]
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// Routes that redirect to `/login` when nobody is signed in.
    fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Profile {}
                | Route::Feed {}
                | Route::UserProfile { .. }
                | Route::Groups {}
                | Route::GroupDetail { .. }
        )
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const CONFIG_TOML: &str = include_str!("../openlab.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

fn load_config() -> OpenLabConfig {
    match OpenLabConfig::from_toml(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}, using defaults: {e}", OpenLabConfig::filename());
            OpenLabConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    use_backend_provider(load_config);
    use_theme_provider();

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::OPENLAB_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Navbar plus the active page.
#[component]
fn Shell() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let signed_in = auth().user.is_some();

    rsx! {
        Navbar {
            Link { to: Route::Explore {}, "Explorar" }
            if signed_in {
                Link { to: Route::Feed {}, "Feed" }
                Link { to: Route::Profile {}, "Perfil" }
                Link { to: Route::Groups {}, "Grupos" }
                LogoutButton {
                    on_logout: move |_| {
                        nav.push(Route::Login {});
                    },
                }
            } else {
                Link { to: Route::Login {}, "Login" }
                Link { to: Route::Register {}, "Registro" }
            }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}

/// Renders guarded pages only for a signed-in user.
#[component]
fn AuthGuard() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();
    let state = auth();

    if state.loading {
        return rsx! {
            p { class: "muted", "Cargando..." }
        };
    }
    if state.user.is_none() && route.requires_auth() {
        tracing::debug!(?route, "not signed in, redirecting to login");
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        Outlet::<Route> {}
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "page",
            h2 { "Página no encontrada" }
            p { class: "muted", "/{path}" }
            Link { to: Route::Explore {}, "Volver a Explorar" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_guarded_routes() {
        for path in ["/profile", "/feed", "/user/u1", "/groups", "/groups/g1"] {
            let route = Route::from_str(path).unwrap();
            assert!(route.requires_auth(), "{path} should be guarded");
        }
        for path in ["/", "/login", "/register", "/password-reset", "/project/p1"] {
            let route = Route::from_str(path).unwrap();
            assert!(!route.requires_auth(), "{path} should be public");
        }
    }

    #[test]
    fn test_route_params() {
        assert_eq!(
            Route::from_str("/project/abc").unwrap(),
            Route::ProjectDetail { id: "abc".into() }
        );
        assert_eq!(Route::GroupDetail { id: "g1".into() }.to_string(), "/groups/g1");
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = OpenLabConfig::from_toml(CONFIG_TOML).unwrap();
        assert_eq!(config.batch_limit(), 10);
    }
}
