//! # Membership toggles — likes, favorites, follows
//!
//! A toggle button owns a [`MembershipMirror`]: a local copy of a remote
//! set-valued field (`likedBy`, `favorites`, `following`). Clicking calls
//! [`MembershipMirror::begin`], which flips the local state immediately and
//! returns a [`PendingToggle`] to be committed against the [`Repository`].
//!
//! Reconciliation rules:
//!
//! - [`MembershipMirror::sync`] overwrites the mirror with an externally
//!   fetched set whenever the parent re-fetches. Whichever of sync and local
//!   toggle runs last wins; there is no merge.
//! - A failed commit is logged and the local change stays. The mirror and the
//!   remote set may diverge until the next sync.
//! - Two clicks before the first commit completes race; the last network
//!   response to land decides the remote state.
//!
//! Favorites are the one case with a fallback: when the user's profile
//! document does not exist yet, it is created with the intended set.

use crate::activity::ActivityKind;
use crate::document::Updates;
use crate::error::Result;
use crate::repo::{DocumentStore, Repository, PROJECTS, USERS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleTarget {
    /// `user_id` in `proyectos/{project_id}.likedBy`.
    Like { project_id: String, user_id: String },
    /// `project_id` in `users/{user_id}.favorites`.
    Favorite { user_id: String, project_id: String },
    /// `target_id` in `users/{user_id}.following`, mirrored into the target's `followers`.
    Follow { user_id: String, target_id: String },
}

impl ToggleTarget {
    /// The identifier stored in the membership set.
    pub fn member(&self) -> &str {
        match self {
            Self::Like { user_id, .. } => user_id,
            Self::Favorite { project_id, .. } => project_id,
            Self::Follow { target_id, .. } => target_id,
        }
    }

    /// Button label given the current state.
    pub fn label(&self, active: bool) -> &'static str {
        match (self, active) {
            (Self::Like { .. }, false) => "Like",
            (Self::Like { .. }, true) => "Quitar Like",
            (Self::Favorite { .. }, false) => "Favorito",
            (Self::Favorite { .. }, true) => "Quitar Favorito",
            (Self::Follow { .. }, false) => "Seguir",
            (Self::Follow { .. }, true) => "Dejar de seguir",
        }
    }
}

/// Local mirror of a remote membership set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MembershipMirror {
    members: Vec<String>,
}

impl MembershipMirror {
    pub fn new(members: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut mirror = Self::default();
        mirror.sync(members);
        mirror
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }

    /// Replace the local state with an externally supplied set.
    pub fn sync(&mut self, external: impl IntoIterator<Item = impl Into<String>>) {
        self.members.clear();
        for id in external {
            let id = id.into();
            if !self.contains(&id) {
                self.members.push(id);
            }
        }
    }

    /// Add or remove `id` locally.
    pub fn apply(&mut self, id: &str, active: bool) {
        if active {
            if !self.contains(id) {
                self.members.push(id.to_string());
            }
        } else {
            self.members.retain(|m| m != id);
        }
    }

    /// Flip `target` locally and return the remote write to perform.
    pub fn begin(&mut self, target: ToggleTarget) -> PendingToggle {
        let activate = !self.contains(target.member());
        self.apply(target.member(), activate);
        PendingToggle { target, activate }
    }
}

/// A toggle already applied locally, waiting to be written remotely.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "a pending toggle does nothing until committed"]
pub struct PendingToggle {
    target: ToggleTarget,
    activate: bool,
}

impl PendingToggle {
    pub fn target(&self) -> &ToggleTarget {
        &self.target
    }

    /// Whether the member is being added (`true`) or removed.
    pub fn activate(&self) -> bool {
        self.activate
    }

    /// Write the toggle. Failures are logged and returned; the local mirror is left as is.
    pub async fn commit<S: DocumentStore>(self, repo: &Repository<S>) -> Result<()> {
        let result = match &self.target {
            ToggleTarget::Like {
                project_id,
                user_id,
            } => repo.set_like(project_id, user_id, self.activate).await,
            ToggleTarget::Favorite {
                user_id,
                project_id,
            } => repo.set_favorite(user_id, project_id, self.activate).await,
            ToggleTarget::Follow { user_id, target_id } => {
                repo.set_following(user_id, target_id, self.activate).await
            }
        };
        if let Err(err) = &result {
            tracing::warn!(toggle = ?self.target, activate = self.activate, "toggle failed: {err}");
        }
        result
    }
}

fn membership(field: &str, id: &str, active: bool) -> Updates {
    if active {
        Updates::new().array_union(field, [id])
    } else {
        Updates::new().array_remove(field, [id])
    }
}

impl<S: DocumentStore> Repository<S> {
    pub async fn set_like(&self, project_id: &str, user_id: &str, active: bool) -> Result<()> {
        self.store()
            .update(PROJECTS, project_id, membership("likedBy", user_id, active))
            .await?;
        let (kind, message) = if active {
            (ActivityKind::Like, "Te gustó un proyecto")
        } else {
            (ActivityKind::Unlike, "Quitaste tu like de un proyecto")
        };
        self.log_activity(user_id, kind, message).await;
        Ok(())
    }

    pub async fn set_favorite(&self, user_id: &str, project_id: &str, active: bool) -> Result<()> {
        let updates = membership("favorites", project_id, active);
        match self.store().update(USERS, user_id, updates).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                tracing::debug!(%user_id, "profile missing, creating it with favorites");
                let favorites: Vec<&str> = if active { vec![project_id] } else { Vec::new() };
                self.store()
                    .merge(USERS, user_id, Updates::new().set("favorites", favorites))
                    .await?;
            }
            Err(err) => return Err(err),
        }
        let (kind, message) = if active {
            (ActivityKind::Favorite, "Agregaste un proyecto a favoritos")
        } else {
            (ActivityKind::Unfavorite, "Quitaste un proyecto de favoritos")
        };
        self.log_activity(user_id, kind, message).await;
        Ok(())
    }

    /// Update `following` on the follower and `followers` on the target.
    pub async fn set_following(&self, user_id: &str, target_id: &str, active: bool) -> Result<()> {
        self.store()
            .update(USERS, user_id, membership("following", target_id, active))
            .await?;
        // No rollback: a missing target leaves `following` written and fails here.
        self.store()
            .update(USERS, target_id, membership("followers", user_id, active))
            .await?;
        let (kind, message) = if active {
            (ActivityKind::Follow, format!("Comenzaste a seguir a {target_id}"))
        } else {
            (ActivityKind::Unfollow, format!("Dejaste de seguir a {target_id}"))
        };
        self.log_activity(user_id, kind, message).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{to_fields, Fields};
    use crate::memory::MemoryStore;
    use crate::models::Project;

    async fn repo_with_project() -> Repository<MemoryStore> {
        let store = MemoryStore::new();
        let project = Project {
            title: "Lab".into(),
            uid: "owner".into(),
            ..Default::default()
        };
        store
            .set(PROJECTS, "p1", to_fields(&project).unwrap())
            .await
            .unwrap();
        Repository::new(store)
    }

    fn like() -> ToggleTarget {
        ToggleTarget::Like {
            project_id: "p1".into(),
            user_id: "u1".into(),
        }
    }

    #[tokio::test]
    async fn test_like_label_follows_click() {
        let repo = repo_with_project().await;
        let mut mirror = MembershipMirror::default();
        assert_eq!(like().label(mirror.contains("u1")), "Like");

        let pending = mirror.begin(like());
        assert!(pending.activate());
        assert_eq!(like().label(mirror.contains("u1")), "Quitar Like");
        pending.commit(&repo).await.unwrap();

        let project = repo.get_project("p1").await.unwrap().unwrap();
        assert_eq!(project.liked_by, vec!["u1".to_string()]);

        mirror.begin(like()).commit(&repo).await.unwrap();
        assert_eq!(like().label(mirror.contains("u1")), "Like");
        let project = repo.get_project("p1").await.unwrap().unwrap();
        assert!(project.liked_by.is_empty());
    }

    #[tokio::test]
    async fn test_double_toggle_restores_remote_set() {
        let repo = repo_with_project().await;
        repo.set_like("p1", "u0", true).await.unwrap();

        let mut mirror = MembershipMirror::new(["u0"]);
        mirror.begin(like()).commit(&repo).await.unwrap();
        mirror.begin(like()).commit(&repo).await.unwrap();

        let project = repo.get_project("p1").await.unwrap().unwrap();
        assert_eq!(project.liked_by, vec!["u0".to_string()]);
        assert_eq!(mirror.members(), ["u0".to_string()]);
    }

    #[tokio::test]
    async fn test_favorite_creates_missing_profile() {
        let repo = Repository::new(MemoryStore::new());
        let target = ToggleTarget::Favorite {
            user_id: "u1".into(),
            project_id: "p9".into(),
        };

        let mut mirror = MembershipMirror::default();
        mirror.begin(target.clone()).commit(&repo).await.unwrap();

        let user = repo.get_user("u1").await.unwrap().unwrap();
        assert_eq!(user.favorites, vec!["p9".to_string()]);
        assert_eq!(target.label(mirror.contains("p9")), "Quitar Favorito");
    }

    #[tokio::test]
    async fn test_unfavorite_creates_missing_profile_empty() {
        let repo = Repository::new(MemoryStore::new());
        let target = ToggleTarget::Favorite {
            user_id: "u1".into(),
            project_id: "p9".into(),
        };

        let mut mirror = MembershipMirror::new(["p9"]);
        let pending = mirror.begin(target.clone());
        assert!(!pending.activate());
        pending.commit(&repo).await.unwrap();

        let user = repo.get_user("u1").await.unwrap().unwrap();
        assert!(user.favorites.is_empty());
        assert_eq!(user.activity_log.len(), 1);
        assert_eq!(user.activity_log[0].kind, "unfavorite");
        assert_eq!(target.label(mirror.contains("p9")), "Favorito");
    }

    #[tokio::test]
    async fn test_failed_commit_keeps_local_change() {
        let repo = Repository::new(MemoryStore::new());
        let mut mirror = MembershipMirror::default();

        let err = mirror.begin(like()).commit(&repo).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(mirror.contains("u1"));
    }

    #[tokio::test]
    async fn test_follow_updates_both_profiles() {
        let repo = Repository::new(MemoryStore::new());
        for uid in ["u1", "u2"] {
            repo.store().set(USERS, uid, Fields::new()).await.unwrap();
        }

        repo.set_following("u1", "u2", true).await.unwrap();
        let me = repo.get_user("u1").await.unwrap().unwrap();
        let them = repo.get_user("u2").await.unwrap().unwrap();
        assert_eq!(me.following, vec!["u2".to_string()]);
        assert_eq!(them.followers, vec!["u1".to_string()]);

        repo.set_following("u1", "u2", false).await.unwrap();
        let me = repo.get_user("u1").await.unwrap().unwrap();
        let them = repo.get_user("u2").await.unwrap().unwrap();
        assert!(me.following.is_empty());
        assert!(them.followers.is_empty());
    }

    #[tokio::test]
    async fn test_follow_missing_target_keeps_following() {
        let repo = Repository::new(MemoryStore::new());
        repo.store().set(USERS, "u1", Fields::new()).await.unwrap();

        let err = repo.set_following("u1", "ghost", true).await.unwrap_err();
        assert!(err.is_not_found());
        let me = repo.get_user("u1").await.unwrap().unwrap();
        assert_eq!(me.following, vec!["ghost".to_string()]);
    }

    #[test]
    fn test_sync_overwrites_local_state() {
        let mut mirror = MembershipMirror::new(["a", "b"]);
        let _ = mirror.begin(ToggleTarget::Follow {
            user_id: "me".into(),
            target_id: "c".into(),
        });
        assert!(mirror.contains("c"));

        mirror.sync(["a", "a", "d"]);
        assert_eq!(mirror.members(), ["a".to_string(), "d".to_string()]);
    }
}
