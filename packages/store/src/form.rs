//! # Form submission
//!
//! Every form (project, comment, group, post, portfolio) goes through the same
//! flow, driven by [`Submission::run`]:
//!
//! ```text
//! Idle → Validating → (UploadingAsset)? → Persisting → Done
//!            │               │                 │
//!            └───────────────┴─────────────────┴──→ Failed
//! ```
//!
//! - Validation rejects an unauthenticated actor or blank required fields
//!   before anything is written.
//! - An attached [`Asset`] is uploaded first, under
//!   `proyectos/{uid}/{millis}-{filename}`. An upload failure aborts the
//!   submission; nothing is persisted.
//! - On success `on_saved` receives the document id, then `on_close` fires.
//! - Failures map to one alert per form ([`SubmissionError::alert`]). Nothing
//!   is retried.

use std::future::Future;

use chrono::Utc;
use thiserror::Error;

use crate::blob::BlobStore;
use crate::error::{Result, StoreError};
use crate::models::{Actor, Education, Experience, Project, UserProfile};
use crate::repo::{DocumentStore, Repository};

pub const UNAUTHENTICATED_ALERT: &str = "Debes iniciar sesión para crear o editar proyectos.";
pub const UPLOAD_ALERT: &str = "Error al subir la imagen. Intenta de nuevo.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    UploadingAsset,
    Persisting,
    Done,
    Failed,
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("required fields are blank")]
    Incomplete,

    #[error("asset upload failed: {0}")]
    Upload(#[source] StoreError),

    #[error("could not save: {source}")]
    Persist {
        alert: &'static str,
        #[source]
        source: StoreError,
    },
}

impl SubmissionError {
    /// Text for a blocking alert. Blank fields are not alerted.
    pub fn alert(&self) -> Option<&'static str> {
        match self {
            Self::Unauthenticated => Some(UNAUTHENTICATED_ALERT),
            Self::Incomplete => None,
            Self::Upload(_) => Some(UPLOAD_ALERT),
            Self::Persist { alert, .. } => Some(*alert),
        }
    }
}

/// A file picked in a form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Blob path for an asset uploaded by `uid`.
pub fn asset_path(uid: &str, millis: i64, name: &str) -> String {
    format!("proyectos/{uid}/{millis}-{name}")
}

/// The content of one form.
pub trait FormDraft {
    /// Alert shown when persisting fails.
    const FAILURE_ALERT: &'static str;

    /// Whether every required field is filled in.
    fn is_complete(&self) -> bool;

    fn asset(&self) -> Option<&Asset> {
        None
    }

    /// Write the document and return its id.
    fn persist<S: DocumentStore>(
        &self,
        repo: &Repository<S>,
        actor: &Actor,
        asset_url: Option<String>,
    ) -> impl Future<Output = Result<String>>;
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Create or edit a project.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectDraft {
    /// Set when editing.
    pub existing_id: Option<String>,
    pub title: String,
    pub description: String,
    pub github_link: String,
    pub demo_link: String,
    pub categories: Vec<String>,
    pub technologies: Vec<String>,
    pub labels: Vec<String>,
    /// Current image, kept when no new file is attached.
    pub image_url: Option<String>,
    pub image: Option<Asset>,
}

impl ProjectDraft {
    /// Prefill from an existing project for editing.
    pub fn from_project(project: &Project) -> Self {
        Self {
            existing_id: Some(project.id.clone()),
            title: project.title.clone(),
            description: project.description.clone(),
            github_link: project.github().unwrap_or_default().to_string(),
            demo_link: project.demo().unwrap_or_default().to_string(),
            categories: project.categories.clone(),
            technologies: project.technologies.clone(),
            labels: project.labels.clone(),
            image_url: project.image().map(str::to_string),
            image: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.existing_id.is_some()
    }
}

impl FormDraft for ProjectDraft {
    const FAILURE_ALERT: &'static str = "Error al guardar el proyecto.";

    fn is_complete(&self) -> bool {
        filled(&self.title) && filled(&self.description)
    }

    fn asset(&self) -> Option<&Asset> {
        self.image.as_ref()
    }

    async fn persist<S: DocumentStore>(
        &self,
        repo: &Repository<S>,
        actor: &Actor,
        asset_url: Option<String>,
    ) -> Result<String> {
        let image_url = asset_url.or_else(|| self.image_url.clone());
        match &self.existing_id {
            Some(id) => {
                repo.update_project(actor, id, self, image_url).await?;
                Ok(id.clone())
            }
            None => repo.create_project(actor, self, image_url).await,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentDraft {
    pub project_id: String,
    pub content: String,
}

impl FormDraft for CommentDraft {
    const FAILURE_ALERT: &'static str = "Error al publicar el comentario.";

    fn is_complete(&self) -> bool {
        filled(&self.content)
    }

    async fn persist<S: DocumentStore>(
        &self,
        repo: &Repository<S>,
        actor: &Actor,
        _asset_url: Option<String>,
    ) -> Result<String> {
        repo.add_comment(actor, &self.project_id, self.content.trim())
            .await
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupDraft {
    pub name: String,
    pub description: String,
}

impl FormDraft for GroupDraft {
    const FAILURE_ALERT: &'static str = "Error al crear el grupo.";

    fn is_complete(&self) -> bool {
        filled(&self.name)
    }

    async fn persist<S: DocumentStore>(
        &self,
        repo: &Repository<S>,
        actor: &Actor,
        _asset_url: Option<String>,
    ) -> Result<String> {
        repo.create_group(actor, self.name.trim(), self.description.trim())
            .await
    }
}

/// A forum post. Only members of the group may post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub group_id: String,
    pub content: String,
}

impl FormDraft for PostDraft {
    const FAILURE_ALERT: &'static str = "Error al publicar el mensaje.";

    fn is_complete(&self) -> bool {
        filled(&self.content)
    }

    async fn persist<S: DocumentStore>(
        &self,
        repo: &Repository<S>,
        actor: &Actor,
        _asset_url: Option<String>,
    ) -> Result<String> {
        let group = repo
            .get_group(&self.group_id)
            .await?
            .ok_or_else(|| StoreError::not_found(crate::repo::GROUPS, &self.group_id))?;
        if !group.is_member(&actor.uid) {
            return Err(StoreError::PermissionDenied(format!(
                "{} is not a member of {}",
                actor.uid, group.id
            )));
        }
        repo.add_post(actor, &self.group_id, self.content.trim())
            .await
    }
}

/// Portfolio section of the signed-in user's profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PortfolioDraft {
    pub skills: Vec<String>,
    pub stack: Vec<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub linkedin: String,
}

impl PortfolioDraft {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            skills: profile.skills.clone(),
            stack: profile.stack.clone(),
            experience: profile.experience.clone(),
            education: profile.education.clone(),
            linkedin: profile.linkedin().unwrap_or_default().to_string(),
        }
    }
}

impl FormDraft for PortfolioDraft {
    const FAILURE_ALERT: &'static str = "Error al guardar el perfil.";

    fn is_complete(&self) -> bool {
        true
    }

    async fn persist<S: DocumentStore>(
        &self,
        repo: &Repository<S>,
        actor: &Actor,
        _asset_url: Option<String>,
    ) -> Result<String> {
        repo.update_portfolio(&actor.uid, self).await?;
        Ok(actor.uid.clone())
    }
}

/// Tracks one form's submission.
#[derive(Clone, Debug, Default)]
pub struct Submission {
    state: SubmissionState,
    history: Vec<SubmissionState>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// States entered since creation, in order.
    pub fn history(&self) -> &[SubmissionState] {
        &self.history
    }

    fn enter(&mut self, state: SubmissionState) {
        tracing::debug!(from = ?self.state, to = ?state, "submission");
        self.state = state;
        self.history.push(state);
    }

    fn fail(&mut self, err: SubmissionError) -> std::result::Result<String, SubmissionError> {
        tracing::warn!("submission failed: {err}");
        self.enter(SubmissionState::Failed);
        Err(err)
    }

    pub async fn run<D, S>(
        &mut self,
        draft: &D,
        actor: Option<&Actor>,
        repo: &Repository<S>,
        on_saved: impl FnOnce(&str),
        on_close: impl FnOnce(),
    ) -> std::result::Result<String, SubmissionError>
    where
        D: FormDraft,
        S: DocumentStore + BlobStore,
    {
        self.enter(SubmissionState::Validating);
        let Some(actor) = actor else {
            return self.fail(SubmissionError::Unauthenticated);
        };
        if !draft.is_complete() {
            return self.fail(SubmissionError::Incomplete);
        }

        let mut asset_url = None;
        if let Some(asset) = draft.asset() {
            self.enter(SubmissionState::UploadingAsset);
            let path = asset_path(&actor.uid, Utc::now().timestamp_millis(), &asset.name);
            match repo.upload_asset(&path, asset.bytes.clone()).await {
                Ok(url) => asset_url = Some(url),
                Err(err) => return self.fail(SubmissionError::Upload(err)),
            }
        }

        self.enter(SubmissionState::Persisting);
        match draft.persist(repo, actor, asset_url).await {
            Ok(id) => {
                self.enter(SubmissionState::Done);
                on_saved(&id);
                on_close();
                Ok(id)
            }
            Err(source) => self.fail(SubmissionError::Persist {
                alert: D::FAILURE_ALERT,
                source,
            }),
        }
    }
}
