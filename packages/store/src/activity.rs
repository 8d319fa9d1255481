//! User activity log.
//!
//! Each mutating action appends an [`ActivityEntry`] to `users/{uid}.activityLog`
//! and stamps `lastActivity`, in a single merge write so a missing profile
//! document is created on the way.

use chrono::{DateTime, Utc};

use crate::document::Updates;
use crate::error::Result;
use crate::models::ActivityEntry;
use crate::repo::{DocumentStore, Repository, USERS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityKind {
    ProjectCreated,
    ProjectUpdated,
    ProjectDeleted,
    Like,
    Unlike,
    Favorite,
    Unfavorite,
    Follow,
    Unfollow,
    Comment,
    CommentDeleted,
    GroupCreated,
    GroupJoined,
    Post,
    ProfileUpdated,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectCreated => "project_created",
            Self::ProjectUpdated => "project_updated",
            Self::ProjectDeleted => "project_deleted",
            Self::Like => "like",
            Self::Unlike => "unlike",
            Self::Favorite => "favorite",
            Self::Unfavorite => "unfavorite",
            Self::Follow => "follow",
            Self::Unfollow => "unfollow",
            Self::Comment => "comment",
            Self::CommentDeleted => "comment_deleted",
            Self::GroupCreated => "group_created",
            Self::GroupJoined => "group_joined",
            Self::Post => "post",
            Self::ProfileUpdated => "profile_updated",
        }
    }
}

/// The `limit` most recent entries, newest first.
pub fn recent_activity(entries: &[ActivityEntry], limit: usize) -> Vec<ActivityEntry> {
    let mut entries = entries.to_vec();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries.truncate(limit);
    entries
}

impl<S: DocumentStore> Repository<S> {
    pub async fn record_activity(
        &self,
        uid: &str,
        kind: ActivityKind,
        message: impl Into<String>,
    ) -> Result<()> {
        self.record_activity_at(uid, kind, message, Utc::now()).await
    }

    pub async fn record_activity_at(
        &self,
        uid: &str,
        kind: ActivityKind,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let entry = ActivityEntry {
            kind: kind.as_str().to_string(),
            message: message.into(),
            timestamp,
        };
        let updates = Updates::new()
            .set("lastActivity", serde_json::to_value(timestamp)?)
            .array_union("activityLog", [serde_json::to_value(&entry)?]);
        self.store().merge(USERS, uid, updates).await
    }

    /// Record activity without failing the caller.
    pub(crate) async fn log_activity(&self, uid: &str, kind: ActivityKind, message: impl Into<String>) {
        if let Err(err) = self.record_activity(uid, kind, message).await {
            tracing::warn!(%uid, kind = kind.as_str(), "failed to record activity: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[tokio::test]
    async fn test_record_creates_profile_and_stamps_last_activity() {
        let repo = Repository::new(MemoryStore::new());
        repo.record_activity_at("u1", ActivityKind::Follow, "Seguiste a u2", at(5))
            .await
            .unwrap();
        repo.record_activity_at("u1", ActivityKind::Like, "Te gustó un proyecto", at(9))
            .await
            .unwrap();

        let user = repo.get_user("u1").await.unwrap().unwrap();
        assert_eq!(user.last_activity, Some(at(9)));
        assert_eq!(user.activity_log.len(), 2);
        assert_eq!(user.activity_log[0].kind, "follow");
        assert_eq!(user.activity_log[1].message, "Te gustó un proyecto");
    }

    #[tokio::test]
    async fn test_offline_recording_is_swallowed() {
        let store = MemoryStore::new();
        let repo = Repository::new(store.clone());
        store.set_offline(true);
        repo.log_activity("u1", ActivityKind::Post, "x").await;
        store.set_offline(false);
        assert!(repo.get_user("u1").await.unwrap().is_none());
    }

    #[test]
    fn test_recent_activity_keeps_newest() {
        let entries: Vec<ActivityEntry> = (0..30)
            .map(|i| ActivityEntry {
                kind: "like".into(),
                message: format!("m{i}"),
                timestamp: at(i),
            })
            .collect();

        let recent = recent_activity(&entries, 20);
        assert_eq!(recent.len(), 20);
        assert_eq!(recent[0].message, "m29");
        assert_eq!(recent[19].message, "m10");
    }
}
