//! Shared backend handle for all views.
//!
//! [`Backend`] bundles the document/blob repository and the auth provider. The
//! app shell creates it once with [`use_backend_provider`] and every component
//! reaches it through [`use_backend`]. Clones share the same state.

use api::MemoryAuth;
use dioxus::prelude::*;
use store::{MemoryStore, OpenLabConfig, Repository};

pub type AppRepository = Repository<MemoryStore>;

#[derive(Clone, Debug)]
pub struct Backend {
    pub repo: AppRepository,
    pub auth: MemoryAuth,
}

impl Backend {
    /// In-memory backend configured from `config`.
    pub fn new(config: OpenLabConfig) -> Self {
        let store = MemoryStore::new().with_base_url(config.backend.storage_base_url.clone());
        tracing::info!(project = %config.backend.project_id, "backend ready");
        Self {
            repo: Repository::new(store).with_config(config),
            auth: MemoryAuth::new(),
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new(OpenLabConfig::default())
    }
}

/// Install the backend for the subtree. Call once, in the app root.
pub fn use_backend_provider(config: impl FnOnce() -> OpenLabConfig) -> Backend {
    use_context_provider(|| Backend::new(config()))
}

pub fn use_backend() -> Backend {
    use_context::<Backend>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{Actor, ProjectDraft};

    #[tokio::test]
    async fn test_clones_share_state() {
        let config = OpenLabConfig::default()
            .with_batch_limit(3)
            .with_storage_base_url("https://cdn.lab.dev/");
        let backend = Backend::new(config);
        let other = backend.clone();

        let draft = ProjectDraft {
            title: "Atlas".into(),
            description: "Mapas".into(),
            ..Default::default()
        };
        let id = backend
            .repo
            .create_project(&Actor::new("u1", "ana@lab.dev"), &draft, None)
            .await
            .unwrap();

        let project = other.repo.get_project(&id).await.unwrap().unwrap();
        assert_eq!(project.title, "Atlas");
        assert_eq!(other.repo.config().batch_limit(), 3);

        let url = other.repo.upload_asset("proyectos/u1/1-a.png", vec![1]).await.unwrap();
        assert_eq!(url, "https://cdn.lab.dev/proyectos/u1/1-a.png");
    }
}
