//! Chunked `in` reads.
//!
//! The store refuses `in` filters over [`MAX_IN_VALUES`] values, so reads keyed by
//! a list of uids or project ids are split into batches and the results
//! concatenated in batch order.

use std::future::Future;

use crate::document::{Direction, Filter, Query, DOCUMENT_ID, MAX_IN_VALUES};
use crate::error::Result;
use crate::models::Project;
use crate::repo::{DocumentStore, Repository, PROJECTS};

/// Split `keys` into consecutive batches of at most `size` (clamped to `1..=10`).
pub fn batches<K>(keys: &[K], size: usize) -> impl Iterator<Item = &[K]> {
    keys.chunks(size.clamp(1, MAX_IN_VALUES))
}

/// Run `fetch` once per batch and concatenate the results.
///
/// An empty key list returns immediately without calling `fetch`.
pub async fn fetch_in_batches<K, T, F, Fut>(keys: &[K], size: usize, mut fetch: F) -> Result<Vec<T>>
where
    K: Clone,
    F: FnMut(Vec<K>) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut out = Vec::new();
    for batch in batches(keys, size) {
        out.extend(fetch(batch.to_vec()).await?);
    }
    Ok(out)
}

impl<S: DocumentStore> Repository<S> {
    /// Projects owned by any of `uids`, newest first within each batch.
    pub async fn projects_by_owners(&self, uids: &[String]) -> Result<Vec<Project>> {
        let size = self.config().batch_limit();
        let projects = fetch_in_batches(uids, size, |batch| async move {
            let query = Query::new(PROJECTS)
                .filter(Filter::is_in("uid", batch))
                .order_by("createdAt", Direction::Descending);
            self.fetch(&query).await
        })
        .await?;
        tracing::debug!(owners = uids.len(), found = projects.len(), "feed loaded");
        Ok(projects)
    }

    /// Projects whose id is in `ids`. Missing ids are skipped.
    pub async fn projects_by_ids(&self, ids: &[String]) -> Result<Vec<Project>> {
        let size = self.config().batch_limit();
        fetch_in_batches(ids, size, |batch| async move {
            self.fetch(&Query::new(PROJECTS).filter(Filter::is_in(DOCUMENT_ID, batch)))
                .await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::to_fields;
    use crate::memory::MemoryStore;
    use crate::OpenLabConfig;
    use chrono::{TimeZone, Utc};

    async fn seed(store: &MemoryStore, owners: usize) -> Vec<String> {
        let mut uids = Vec::new();
        for i in 0..owners {
            let uid = format!("u{i:02}");
            let project = Project {
                title: format!("p{i}"),
                uid: uid.clone(),
                created_at: Some(Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap()),
                ..Default::default()
            };
            store
                .set(PROJECTS, &format!("p{i}"), to_fields(&project).unwrap())
                .await
                .unwrap();
            uids.push(uid);
        }
        uids
    }

    #[test]
    fn test_batch_sizes() {
        let keys: Vec<u32> = (0..23).collect();
        let sizes: Vec<usize> = batches(&keys, 10).map(<[u32]>::len).collect();
        assert_eq!(sizes, [10, 10, 3]);

        let sizes: Vec<usize> = batches(&keys, 40).map(<[u32]>::len).collect();
        assert_eq!(sizes, [10, 10, 3]);

        assert_eq!(batches(&keys, 0).count(), 23);
        assert_eq!(batches::<u32>(&[], 10).count(), 0);
    }

    #[tokio::test]
    async fn test_feed_of_23_followed_uses_3_queries() {
        let store = MemoryStore::new();
        let uids = seed(&store, 23).await;
        let repo = Repository::new(store.clone());

        let projects = repo.projects_by_owners(&uids).await.unwrap();
        assert_eq!(projects.len(), 23);
        assert_eq!(store.query_count(), 3);

        // Newest first inside the first batch (u00..u09).
        assert_eq!(projects[0].title, "p9");
        assert_eq!(projects[9].title, "p0");
        assert_eq!(projects[20].title, "p22");
    }

    #[tokio::test]
    async fn test_empty_keys_issue_no_query() {
        let store = MemoryStore::new();
        let repo = Repository::new(store.clone());

        assert!(repo.projects_by_owners(&[]).await.unwrap().is_empty());
        assert!(repo.projects_by_ids(&[]).await.unwrap().is_empty());
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn test_favorites_by_id_respect_configured_batch() {
        let store = MemoryStore::new();
        seed(&store, 7).await;
        let repo = Repository::new(store.clone())
            .with_config(OpenLabConfig::default().with_batch_limit(3));

        let ids: Vec<String> = ["p0", "p4", "p6", "gone"].iter().map(|s| s.to_string()).collect();
        let projects = repo.projects_by_ids(&ids).await.unwrap();
        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["p0", "p4", "p6"]);
        assert_eq!(store.query_count(), 2);
    }
}
