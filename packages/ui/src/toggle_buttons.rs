//! Like / Favorite / Follow buttons.
//!
//! Each button keeps a [`MembershipMirror`] of the set it toggles. The mirror is
//! re-synced whenever the parent passes a different set, flipped locally on
//! click, and the remote write runs in a spawned task. A failed write is logged
//! by [`store::PendingToggle::commit`] and the local flip stays.

use dioxus::prelude::*;
use store::{MembershipMirror, ToggleTarget};

use crate::auth::use_auth;
use crate::backend::use_backend;
use crate::components::{Button, ButtonVariant};

#[component]
fn MembershipButton(
    target: ToggleTarget,
    members: Vec<String>,
    #[props(default)] show_count: bool,
    on_toggled: Option<EventHandler<bool>>,
) -> Element {
    let backend = use_backend();
    let mut mirror = use_signal(|| MembershipMirror::new(members.clone()));
    let mut last_external = use_signal(|| members.clone());

    // Re-sync when the parent passes a new set.
    if *last_external.peek() != members {
        last_external.set(members.clone());
        mirror.write().sync(members.clone());
    }

    let active = mirror.read().contains(target.member());
    let count = mirror.read().members().len();
    let label = target.label(active);
    let variant = if active {
        ButtonVariant::Primary
    } else {
        ButtonVariant::Outline
    };

    let onclick = move |_: MouseEvent| {
        let pending = mirror.write().begin(target.clone());
        let activate = pending.activate();
        let repo = backend.repo.clone();
        spawn(async move {
            // Errors are already logged by `commit`.
            let _ = pending.commit(&repo).await;
        });
        if let Some(handler) = on_toggled {
            handler.call(activate);
        }
    };

    rsx! {
        Button {
            variant,
            class: "toggle-button",
            onclick,
            "{label}"
            if show_count {
                span { class: "toggle-count", " {count}" }
            }
        }
    }
}

/// Like button for a project. Hidden when nobody is signed in.
#[component]
pub fn LikeButton(project_id: String, liked_by: Vec<String>) -> Element {
    let auth = use_auth();
    let Some(uid) = auth().uid() else {
        return rsx! {};
    };

    rsx! {
        MembershipButton {
            target: ToggleTarget::Like {
                project_id,
                user_id: uid,
            },
            members: liked_by,
            show_count: true,
        }
    }
}

/// Favorite button for a project, against the viewer's `favorites`.
#[component]
pub fn FavoriteButton(project_id: String, favorites: Vec<String>) -> Element {
    let auth = use_auth();
    let Some(uid) = auth().uid() else {
        return rsx! {};
    };

    rsx! {
        MembershipButton {
            target: ToggleTarget::Favorite {
                user_id: uid,
                project_id,
            },
            members: favorites,
        }
    }
}

/// Follow button against the viewer's `following`. Hidden on the viewer's own profile.
#[component]
pub fn FollowButton(
    target_id: String,
    following: Vec<String>,
    on_toggled: Option<EventHandler<bool>>,
) -> Element {
    let auth = use_auth();
    let Some(uid) = auth().uid() else {
        return rsx! {};
    };
    if !follow_visible(&uid, &target_id) {
        return rsx! {};
    }

    rsx! {
        MembershipButton {
            target: ToggleTarget::Follow {
                user_id: uid,
                target_id,
            },
            members: following,
            on_toggled,
        }
    }
}

/// Whether `viewer` gets a follow button on `target`'s profile.
fn follow_visible(viewer: &str, target: &str) -> bool {
    viewer != target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_hidden_on_own_profile() {
        assert!(!follow_visible("u1", "u1"));
        assert!(follow_visible("u1", "u2"));
    }
}
