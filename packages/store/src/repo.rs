//! # Repository — typed access to the document store
//!
//! [`Repository`] wraps any [`DocumentStore`] and exposes the reads and writes
//! the views need, in terms of the models from [`crate::models`]. The same code
//! runs against the in-memory backend ([`crate::MemoryStore`]) and any hosted
//! implementation of the trait.
//!
//! ## [`DocumentStore`] trait
//!
//! | Method | Semantics |
//! |--------|-----------|
//! | `get` | One document by collection path and id, `None` when absent. |
//! | `query` | Filtered, ordered read of one collection. Rejects `in` filters over 10 values. |
//! | `create` | Insert with a generated id. |
//! | `set` | Overwrite (or create) a document. |
//! | `merge` | Apply [`Updates`], creating the document when missing. |
//! | `update` | Apply [`Updates`]; fails with [`StoreError::NotFound`] when missing. |
//! | `delete` | Remove a document; deleting a missing document is not an error. |
//! | `changes` | Broadcast of collection paths touched by writes, feeding [`Subscription`]s. |
//!
//! ## Activity
//!
//! Every mutating method records an entry in the actor's activity log
//! (see [`crate::activity`]). Recording is best-effort and never fails the write.
//!
//! Membership toggles live in [`crate::toggle`], chunked `in` reads in
//! [`crate::batch`].

use std::future::Future;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::activity::ActivityKind;
use crate::blob::BlobStore;
use crate::config::OpenLabConfig;
use crate::document::{to_fields, Direction, Document, Fields, Filter, Query, Updates};
use crate::error::Result;
use crate::form::{PortfolioDraft, ProjectDraft};
use crate::models::{Actor, Comment, Group, Post, Project, UserProfile};
use crate::subscription::Subscription;

pub const PROJECTS: &str = "proyectos";
pub const USERS: &str = "users";
pub const GROUPS: &str = "groups";

/// Collection path of a project's comments.
pub fn comments_collection(project_id: &str) -> String {
    format!("{PROJECTS}/{project_id}/comments")
}

/// Collection path of a group's posts.
pub fn posts_collection(group_id: &str) -> String {
    format!("{GROUPS}/{group_id}/posts")
}

/// Async interface to a document database.
pub trait DocumentStore {
    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<Document>>>;
    fn query(&self, query: &Query) -> impl Future<Output = Result<Vec<Document>>>;
    fn create(
        &self,
        collection: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<String>>;
    fn set(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<()>>;
    fn merge(
        &self,
        collection: &str,
        id: &str,
        updates: Updates,
    ) -> impl Future<Output = Result<()>>;
    fn update(
        &self,
        collection: &str,
        id: &str,
        updates: Updates,
    ) -> impl Future<Output = Result<()>>;
    fn delete(&self, collection: &str, id: &str) -> impl Future<Output = Result<()>>;
    fn changes(&self) -> broadcast::Receiver<String>;
}

/// Typed facade over a [`DocumentStore`].
#[derive(Clone, Debug)]
pub struct Repository<S> {
    store: S,
    config: OpenLabConfig,
}

impl<S: DocumentStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: OpenLabConfig::default(),
        }
    }

    pub fn with_config(mut self, config: OpenLabConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &OpenLabConfig {
        &self.config
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>> {
        self.store
            .query(query)
            .await?
            .iter()
            .map(Document::decode)
            .collect()
    }

    async fn fetch_one<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>> {
        self.store
            .get(collection, id)
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    // ---- projects ----

    /// Every project, in store order.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.fetch(&Query::new(PROJECTS)).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Option<Project>> {
        self.fetch_one(PROJECTS, id).await
    }

    pub async fn projects_by_owner(&self, uid: &str) -> Result<Vec<Project>> {
        self.fetch(&Query::new(PROJECTS).filter(Filter::eq("uid", uid)))
            .await
    }

    /// Create a project owned by `actor`.
    pub async fn create_project(
        &self,
        actor: &Actor,
        draft: &ProjectDraft,
        image_url: Option<String>,
    ) -> Result<String> {
        let project = Project {
            id: String::new(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            author: actor.name.clone(),
            uid: actor.uid.clone(),
            image_url: image_url.filter(|url| !url.is_empty()),
            github_link: Some(draft.github_link.clone()).filter(|l| !l.is_empty()),
            demo_link: Some(draft.demo_link.clone()).filter(|l| !l.is_empty()),
            categories: draft.categories.clone(),
            technologies: draft.technologies.clone(),
            labels: draft.labels.clone(),
            liked_by: Vec::new(),
            created_at: Some(Utc::now()),
        };

        let id = self.store.create(PROJECTS, to_fields(&project)?).await?;
        tracing::info!(%id, owner = %actor.uid, "project created");
        self.log_activity(
            &actor.uid,
            ActivityKind::ProjectCreated,
            format!("Creaste el proyecto \"{}\"", draft.title),
        )
        .await;
        Ok(id)
    }

    /// Overwrite the editable fields of a project. Owner and likes are untouched.
    pub async fn update_project(
        &self,
        actor: &Actor,
        id: &str,
        draft: &ProjectDraft,
        image_url: Option<String>,
    ) -> Result<()> {
        let updates = Updates::new()
            .set("titulo", draft.title.clone())
            .set("descripcion", draft.description.clone())
            .set("autor", actor.name.clone())
            .set("imageUrl", image_url.unwrap_or_default())
            .set("githubLink", draft.github_link.clone())
            .set("demoLink", draft.demo_link.clone())
            .set("categorias", draft.categories.clone())
            .set("tecnologias", draft.technologies.clone())
            .set("etiquetas", draft.labels.clone());

        self.store.update(PROJECTS, id, updates).await?;
        tracing::info!(%id, "project updated");
        self.log_activity(
            &actor.uid,
            ActivityKind::ProjectUpdated,
            format!("Editaste el proyecto \"{}\"", draft.title),
        )
        .await;
        Ok(())
    }

    pub async fn delete_project(&self, actor: &Actor, id: &str) -> Result<()> {
        self.store.delete(PROJECTS, id).await?;
        tracing::info!(%id, "project deleted");
        self.log_activity(&actor.uid, ActivityKind::ProjectDeleted, "Eliminaste un proyecto")
            .await;
        Ok(())
    }

    // ---- users ----

    pub async fn get_user(&self, uid: &str) -> Result<Option<UserProfile>> {
        self.fetch_one(USERS, uid).await
    }

    /// Initial profile document written right after sign-up.
    pub async fn create_user_profile(&self, uid: &str, email: &str) -> Result<()> {
        let mut fields = Fields::new();
        fields.insert("email".into(), Value::from(email));
        fields.insert("favorites".into(), Value::Array(Vec::new()));
        fields.insert("following".into(), Value::Array(Vec::new()));
        fields.insert("badges".into(), Value::Array(Vec::new()));
        fields.insert("points".into(), Value::from(0));

        self.store.set(USERS, uid, fields).await?;
        tracing::info!(%uid, "user profile created");
        Ok(())
    }

    /// Merge-write the portfolio fields; unrelated profile fields survive.
    pub async fn update_portfolio(&self, uid: &str, draft: &PortfolioDraft) -> Result<()> {
        let updates = Updates::new()
            .set("habilidades", draft.skills.clone())
            .set("stack", draft.stack.clone())
            .set("experiencia", serde_json::to_value(&draft.experience)?)
            .set("educacion", serde_json::to_value(&draft.education)?)
            .set("linkedin", draft.linkedin.clone());

        self.store.merge(USERS, uid, updates).await?;
        self.log_activity(uid, ActivityKind::ProfileUpdated, "Actualizaste tu portafolio")
            .await;
        Ok(())
    }

    // ---- comments ----

    fn comments_query(project_id: &str) -> Query {
        Query::new(comments_collection(project_id)).order_by("createdAt", Direction::Ascending)
    }

    /// Comments of a project, oldest first.
    pub async fn list_comments(&self, project_id: &str) -> Result<Vec<Comment>> {
        self.fetch(&Self::comments_query(project_id)).await
    }

    pub async fn add_comment(&self, actor: &Actor, project_id: &str, content: &str) -> Result<String> {
        let comment = Comment {
            id: String::new(),
            author_id: actor.uid.clone(),
            author_name: actor.name.clone(),
            content: content.to_string(),
            created_at: Some(Utc::now()),
        };
        let id = self
            .store
            .create(&comments_collection(project_id), to_fields(&comment)?)
            .await?;
        self.log_activity(&actor.uid, ActivityKind::Comment, "Comentaste un proyecto")
            .await;
        Ok(id)
    }

    pub async fn delete_comment(&self, actor: &Actor, project_id: &str, comment_id: &str) -> Result<()> {
        self.store
            .delete(&comments_collection(project_id), comment_id)
            .await?;
        self.log_activity(&actor.uid, ActivityKind::CommentDeleted, "Eliminaste un comentario")
            .await;
        Ok(())
    }

    // ---- groups ----

    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        self.fetch(&Query::new(GROUPS)).await
    }

    pub async fn get_group(&self, id: &str) -> Result<Option<Group>> {
        self.fetch_one(GROUPS, id).await
    }

    /// Create a group whose only member is its creator.
    pub async fn create_group(&self, actor: &Actor, name: &str, description: &str) -> Result<String> {
        let group = Group {
            id: String::new(),
            name: name.to_string(),
            description: description.to_string(),
            members: vec![actor.uid.clone()],
            created_at: Some(Utc::now()),
        };
        let id = self.store.create(GROUPS, to_fields(&group)?).await?;
        tracing::info!(%id, "group created");
        self.log_activity(
            &actor.uid,
            ActivityKind::GroupCreated,
            format!("Creaste el grupo \"{name}\""),
        )
        .await;
        Ok(id)
    }

    pub async fn join_group(&self, actor: &Actor, group_id: &str) -> Result<()> {
        self.store
            .update(
                GROUPS,
                group_id,
                Updates::new().array_union("members", [actor.uid.as_str()]),
            )
            .await?;
        self.log_activity(&actor.uid, ActivityKind::GroupJoined, "Te uniste a un grupo")
            .await;
        Ok(())
    }

    fn posts_query(group_id: &str) -> Query {
        Query::new(posts_collection(group_id)).order_by("createdAt", Direction::Ascending)
    }

    pub async fn list_posts(&self, group_id: &str) -> Result<Vec<Post>> {
        self.fetch(&Self::posts_query(group_id)).await
    }

    pub async fn add_post(&self, actor: &Actor, group_id: &str, content: &str) -> Result<String> {
        let post = Post {
            id: String::new(),
            author_id: actor.uid.clone(),
            author_name: actor.name.clone(),
            content: content.to_string(),
            created_at: Some(Utc::now()),
        };
        let id = self
            .store
            .create(&posts_collection(group_id), to_fields(&post)?)
            .await?;
        self.log_activity(&actor.uid, ActivityKind::Post, "Publicaste en un grupo")
            .await;
        Ok(id)
    }
}

impl<S: DocumentStore + Clone> Repository<S> {
    /// Live comment list of a project, oldest first.
    pub fn watch_comments(&self, project_id: &str) -> Subscription<S, Comment> {
        Subscription::new(self.store.clone(), Self::comments_query(project_id))
    }

    /// Live post list of a group, oldest first.
    pub fn watch_posts(&self, group_id: &str) -> Subscription<S, Post> {
        Subscription::new(self.store.clone(), Self::posts_query(group_id))
    }
}

impl<S: DocumentStore + BlobStore> Repository<S> {
    /// Upload bytes and return their public URL.
    pub async fn upload_asset(&self, path: &str, bytes: Vec<u8>) -> Result<String> {
        let handle = self.store.upload(path, bytes).await?;
        let url = self.store.public_url(&handle).await?;
        tracing::debug!(%path, %url, "asset uploaded");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::StoreError;

    fn actor() -> Actor {
        Actor::new("u1", "ana@lab.dev")
    }

    fn draft(title: &str) -> ProjectDraft {
        ProjectDraft {
            title: title.into(),
            description: "Descripción".into(),
            categories: vec!["Web".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_project_crud() {
        let repo = Repository::new(MemoryStore::new());

        let id = repo.create_project(&actor(), &draft("Lab"), None).await.unwrap();
        let project = repo.get_project(&id).await.unwrap().unwrap();
        assert_eq!(project.title, "Lab");
        assert_eq!(project.uid, "u1");
        assert_eq!(project.author, "ana@lab.dev");
        assert!(project.created_at.is_some());
        assert!(project.liked_by.is_empty());

        let mut edited = draft("Lab 2");
        edited.github_link = "https://github.com/ana/lab".into();
        repo.update_project(&actor(), &id, &edited, Some("https://img".into()))
            .await
            .unwrap();
        let project = repo.get_project(&id).await.unwrap().unwrap();
        assert_eq!(project.title, "Lab 2");
        assert_eq!(project.uid, "u1");
        assert_eq!(project.github(), Some("https://github.com/ana/lab"));
        assert_eq!(project.image(), Some("https://img"));

        assert_eq!(repo.projects_by_owner("u1").await.unwrap().len(), 1);
        assert!(repo.projects_by_owner("u2").await.unwrap().is_empty());

        repo.delete_project(&actor(), &id).await.unwrap();
        assert!(repo.get_project(&id).await.unwrap().is_none());
        assert!(repo.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_project_fails() {
        let repo = Repository::new(MemoryStore::new());
        let err = repo
            .update_project(&actor(), "nope", &draft("x"), None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mutations_record_activity() {
        let repo = Repository::new(MemoryStore::new());
        repo.create_user_profile("u1", "ana@lab.dev").await.unwrap();
        repo.create_project(&actor(), &draft("Lab"), None).await.unwrap();

        let user = repo.get_user("u1").await.unwrap().unwrap();
        assert_eq!(user.email, "ana@lab.dev");
        assert_eq!(user.activity_log.len(), 1);
        assert_eq!(user.activity_log[0].kind, "project_created");
        assert_eq!(user.last_activity, Some(user.activity_log[0].timestamp));
    }

    #[tokio::test]
    async fn test_portfolio_merge_keeps_other_fields() {
        let repo = Repository::new(MemoryStore::new());
        repo.create_user_profile("u1", "ana@lab.dev").await.unwrap();

        let portfolio = PortfolioDraft {
            skills: vec!["Rust".into()],
            linkedin: "https://linkedin.com/in/ana".into(),
            ..Default::default()
        };
        repo.update_portfolio("u1", &portfolio).await.unwrap();

        let user = repo.get_user("u1").await.unwrap().unwrap();
        assert_eq!(user.email, "ana@lab.dev");
        assert_eq!(user.skills, vec!["Rust".to_string()]);
        assert_eq!(user.linkedin(), Some("https://linkedin.com/in/ana"));
    }

    #[tokio::test]
    async fn test_comments_are_ordered_oldest_first() {
        let repo = Repository::new(MemoryStore::new());
        let first = repo.add_comment(&actor(), "p1", "primero").await.unwrap();
        repo.add_comment(&actor(), "p1", "segundo").await.unwrap();
        repo.add_comment(&actor(), "p2", "otro proyecto").await.unwrap();

        let comments = repo.list_comments("p1").await.unwrap();
        let contents: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["primero", "segundo"]);

        repo.delete_comment(&actor(), "p1", &first).await.unwrap();
        assert_eq!(repo.list_comments("p1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_groups() {
        let repo = Repository::new(MemoryStore::new());
        let id = repo.create_group(&actor(), "Rustaceans", "Foro").await.unwrap();

        let group = repo.get_group(&id).await.unwrap().unwrap();
        assert_eq!(group.members, vec!["u1".to_string()]);

        let bob = Actor::new("u2", "bob@lab.dev");
        repo.join_group(&bob, &id).await.unwrap();
        repo.join_group(&bob, &id).await.unwrap();
        let group = repo.get_group(&id).await.unwrap().unwrap();
        assert_eq!(group.members, vec!["u1".to_string(), "u2".to_string()]);
        assert!(group.is_member("u2"));

        repo.add_post(&bob, &id, "Hola").await.unwrap();
        let posts = repo.list_posts(&id).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author_name, "bob@lab.dev");

        assert!(matches!(
            repo.join_group(&bob, "missing").await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_upload_asset() {
        let store = MemoryStore::new().with_base_url("https://cdn.test");
        let repo = Repository::new(store);
        let url = repo
            .upload_asset("proyectos/u1/1-logo.png", vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(url, "https://cdn.test/proyectos/u1/1-logo.png");
    }
}
