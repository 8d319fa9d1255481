use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::blob::{BlobHandle, BlobStore};
use crate::document::{Document, Fields, Query, Updates};
use crate::error::{Result, StoreError};
use crate::repo::DocumentStore;

type Collections = HashMap<String, Vec<(String, Fields)>>;

const CHANGE_CAPACITY: usize = 64;

/// In-memory document and blob store, used by tests and the offline web build.
///
/// Clones share state. Documents keep insertion order within a collection.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    collections: Arc<Mutex<Collections>>,
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    changes: broadcast::Sender<String>,
    queries: Arc<AtomicUsize>,
    offline: Arc<AtomicBool>,
    base_url: String,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            collections: Arc::default(),
            blobs: Arc::default(),
            changes,
            queries: Arc::default(),
            offline: Arc::default(),
            base_url: "memory://blobs".to_string(),
        }
    }

    /// Prefix for URLs returned by [`BlobStore::public_url`].
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Number of `query` calls served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Simulate a lost connection: every operation fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store is offline".into()))
        } else {
            Ok(())
        }
    }

    fn collections(&self) -> MutexGuard<'_, Collections> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, collection: &str) {
        // No receivers is fine.
        let _ = self.changes.send(collection.to_string());
    }

    fn write(&self, collection: &str, id: &str, fields: Fields) {
        let mut collections = self.collections();
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            Some((_, existing)) => *existing = fields,
            None => docs.push((id.to_string(), fields)),
        }
    }

    fn apply(&self, collection: &str, id: &str, updates: &Updates, create: bool) -> Result<()> {
        let mut collections = self.collections();
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            Some((_, fields)) => updates.apply(fields),
            None if create => {
                let mut fields = Fields::new();
                updates.apply(&mut fields);
                docs.push((id.to_string(), fields));
            }
            None => return Err(StoreError::not_found(collection, id)),
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.check_online()?;
        Ok(self.collections().get(collection).and_then(|docs| {
            docs.iter()
                .find(|(doc_id, _)| doc_id == id)
                .map(|(doc_id, fields)| Document::new(doc_id.clone(), fields.clone()))
        }))
    }

    async fn query(&self, query: &Query) -> Result<Vec<Document>> {
        self.check_online()?;
        query.validate()?;
        self.queries.fetch_add(1, Ordering::SeqCst);

        let docs: Vec<Document> = self
            .collections()
            .get(&query.collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(query.apply(docs))
    }

    async fn create(&self, collection: &str, fields: Fields) -> Result<String> {
        self.check_online()?;
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.write(collection, &id, fields);
        self.notify(collection);
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        self.check_online()?;
        self.write(collection, id, fields);
        self.notify(collection);
        Ok(())
    }

    async fn merge(&self, collection: &str, id: &str, updates: Updates) -> Result<()> {
        self.check_online()?;
        self.apply(collection, id, &updates, true)?;
        self.notify(collection);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, updates: Updates) -> Result<()> {
        self.check_online()?;
        self.apply(collection, id, &updates, false)?;
        self.notify(collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.check_online()?;
        let removed = match self.collections().get_mut(collection) {
            Some(docs) => {
                let before = docs.len();
                docs.retain(|(doc_id, _)| doc_id != id);
                docs.len() != before
            }
            None => false,
        };
        if removed {
            self.notify(collection);
        }
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<String> {
        self.changes.subscribe()
    }
}

impl BlobStore for MemoryStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<BlobHandle> {
        self.check_online()?;
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), bytes);
        Ok(BlobHandle {
            path: path.to_string(),
        })
    }

    async fn public_url(&self, handle: &BlobHandle) -> Result<String> {
        self.check_online()?;
        let exists = self
            .blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&handle.path);
        if !exists {
            return Err(StoreError::BlobNotFound(handle.path.clone()));
        }
        Ok(format!("{}/{}", self.base_url, handle.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Direction, Filter};
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(f) => f,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_create_get_delete() {
        let store = MemoryStore::new();
        let id = store
            .create("proyectos", fields(json!({ "titulo": "Lab" })))
            .await
            .unwrap();

        let doc = store.get("proyectos", &id).await.unwrap().unwrap();
        assert_eq!(doc.fields["titulo"], json!("Lab"));
        assert!(store.get("users", &id).await.unwrap().is_none());

        store.delete("proyectos", &id).await.unwrap();
        assert!(store.get("proyectos", &id).await.unwrap().is_none());
        // Deleting twice is fine.
        store.delete("proyectos", &id).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_requires_document_merge_creates_it() {
        let store = MemoryStore::new();
        let updates = Updates::new().array_union("favorites", ["p1"]);

        let err = store.update("users", "u1", updates.clone()).await.unwrap_err();
        assert!(err.is_not_found());

        store.merge("users", "u1", updates).await.unwrap();
        let doc = store.get("users", "u1").await.unwrap().unwrap();
        assert_eq!(doc.fields["favorites"], json!(["p1"]));
    }

    #[tokio::test]
    async fn test_query_filters_orders_and_counts() {
        let store = MemoryStore::new();
        store
            .set("proyectos", "a", fields(json!({ "uid": "u1", "createdAt": "2024-01-01T00:00:00Z" })))
            .await
            .unwrap();
        store
            .set("proyectos", "b", fields(json!({ "uid": "u2", "createdAt": "2024-03-01T00:00:00Z" })))
            .await
            .unwrap();
        store
            .set("proyectos", "c", fields(json!({ "uid": "u3", "createdAt": "2024-02-01T00:00:00Z" })))
            .await
            .unwrap();

        let query = Query::new("proyectos")
            .filter(Filter::is_in("uid", ["u1", "u2"]))
            .order_by("createdAt", Direction::Descending);
        let docs = store.query(&query).await.unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(store.query_count(), 1);

        let too_many: Vec<String> = (0..11).map(|i| i.to_string()).collect();
        let err = store
            .query(&Query::new("proyectos").filter(Filter::is_in("uid", too_many)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::TooManyValues { .. }));
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn test_writes_are_broadcast() {
        let store = MemoryStore::new();
        let mut changes = store.changes();

        store.set("groups", "g1", Fields::new()).await.unwrap();
        assert_eq!(changes.recv().await.unwrap(), "groups");

        store.delete("groups", "missing").await.unwrap();
        store.delete("groups", "g1").await.unwrap();
        assert_eq!(changes.recv().await.unwrap(), "groups");
        assert!(changes.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_offline_fails_everything() {
        let store = MemoryStore::new();
        store.set_offline(true);
        assert!(matches!(
            store.get("users", "u1").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.upload("a", vec![1]).await.is_err());

        store.set_offline(false);
        assert!(store.get("users", "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blob_urls() {
        let store = MemoryStore::new().with_base_url("https://cdn.test/");
        let handle = store.upload("proyectos/u1/1-a.png", vec![0xff]).await.unwrap();
        assert_eq!(
            store.public_url(&handle).await.unwrap(),
            "https://cdn.test/proyectos/u1/1-a.png"
        );

        let missing = BlobHandle { path: "nope".into() };
        assert!(matches!(
            store.public_url(&missing).await,
            Err(StoreError::BlobNotFound(_))
        ));
    }
}
