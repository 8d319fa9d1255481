use dioxus::prelude::*;
use ui::{use_auth, use_backend};

mod explore;
pub use explore::Explore;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod password_reset;
pub use password_reset::PasswordReset;

mod profile;
pub use profile::Profile;

mod feed;
pub use feed::Feed;

mod user_profile;
pub use user_profile::UserProfile;

mod project_detail;
pub use project_detail::ProjectDetail;

mod groups;
pub use groups::Groups;

mod group_detail;
pub use group_detail::GroupDetail;

/// The signed-in user's profile document, reloaded when the user changes.
/// `None` when signed out or when the document does not exist yet.
pub(crate) fn use_viewer_profile() -> Resource<Option<store::UserProfile>> {
    let backend = use_backend();
    let auth = use_auth();

    use_resource(move || {
        let repo = backend.repo.clone();
        let uid = auth().uid();
        async move {
            let uid = uid?;
            match repo.get_user(&uid).await {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::error!("Failed to load profile {uid}: {e}");
                    None
                }
            }
        }
    })
}
