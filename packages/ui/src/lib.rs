//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const OPENLAB_CSS: Asset = asset!("/assets/styling/openlab.css");

mod backend;
pub use backend::{use_backend, use_backend_provider, AppRepository, Backend};

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod theme;
pub use theme::{apply_theme, load_theme_from_storage, use_theme_provider, Theme, ThemeSignal, ThemeToggle};

mod dialog;
pub use dialog::{alert, confirm, ModalOverlay};

mod navbar;
pub use navbar::Navbar;

mod toggle_buttons;
pub use toggle_buttons::{FavoriteButton, FollowButton, LikeButton};

mod chips_input;
pub use chips_input::{add_chip, ChipsInput};

mod project_card;
pub use project_card::ProjectCard;

mod project_form;
pub use project_form::ProjectForm;

mod comments;
pub use comments::Comments;

mod filters;
pub use filters::{Filters, SearchBar};

mod activity_log_panel;
pub use activity_log_panel::ActivityLogPanel;
