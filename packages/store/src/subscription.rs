//! Live query results.
//!
//! A [`Subscription`] yields the full, ordered result of its [`Query`] once on
//! the first [`Subscription::next`] call, then again after every write to the
//! query's collection. Each snapshot replaces the previous one; consumers never
//! merge. Dropping the subscription (or calling [`Subscription::cancel`])
//! stops it.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::document::{Document, Query};
use crate::error::Result;
use crate::repo::{DocumentStore, Repository};

pub struct Subscription<S, T> {
    store: S,
    query: Query,
    changes: broadcast::Receiver<String>,
    primed: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<S: DocumentStore, T: DeserializeOwned> Subscription<S, T> {
    pub fn new(store: S, query: Query) -> Self {
        // Subscribe before the first read so no write slips in between.
        let changes = store.changes();
        Self {
            store,
            query,
            changes,
            primed: false,
            _marker: PhantomData,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Wait for the next snapshot. `None` once the store has shut down.
    pub async fn next(&mut self) -> Option<Result<Vec<T>>> {
        if self.primed {
            loop {
                match self.changes.recv().await {
                    Ok(collection) if collection == self.query.collection => break,
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, collection = %self.query.collection, "subscription lagged, re-reading");
                        break;
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        }
        self.primed = true;
        Some(self.snapshot().await)
    }

    async fn snapshot(&self) -> Result<Vec<T>> {
        self.store
            .query(&self.query)
            .await?
            .iter()
            .map(Document::decode)
            .collect()
    }

    pub fn cancel(self) {
        tracing::debug!(collection = %self.query.collection, "subscription cancelled");
    }
}

impl<S: DocumentStore + Clone> Repository<S> {
    /// Live results of an arbitrary query.
    pub fn subscribe<T: DeserializeOwned>(&self, query: Query) -> Subscription<S, T> {
        Subscription::new(self.store().clone(), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::{Actor, Comment, Group};
    use std::time::Duration;

    #[tokio::test]
    async fn test_snapshots_follow_writes() {
        let repo = Repository::new(MemoryStore::new());
        let ana = Actor::new("u1", "ana@lab.dev");
        repo.add_comment(&ana, "p1", "primero").await.unwrap();

        let mut comments = repo.watch_comments("p1");
        let first: Vec<Comment> = comments.next().await.unwrap().unwrap();
        assert_eq!(first.len(), 1);

        repo.add_comment(&ana, "p1", "segundo").await.unwrap();
        let second = comments.next().await.unwrap().unwrap();
        let contents: Vec<&str> = second.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["primero", "segundo"]);

        let id = second[0].id.clone();
        repo.delete_comment(&ana, "p1", &id).await.unwrap();
        let third = comments.next().await.unwrap().unwrap();
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].content, "segundo");

        comments.cancel();
    }

    #[tokio::test]
    async fn test_other_collections_do_not_wake() {
        let repo = Repository::new(MemoryStore::new());
        let ana = Actor::new("u1", "ana@lab.dev");

        let mut groups = repo.subscribe::<Group>(Query::new(crate::repo::GROUPS));
        assert!(groups.next().await.unwrap().unwrap().is_empty());

        repo.add_comment(&ana, "p1", "hola").await.unwrap();
        let woke = tokio::time::timeout(Duration::from_millis(50), groups.next()).await;
        assert!(woke.is_err());
    }
}
