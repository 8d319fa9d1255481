pub mod activity;
pub mod batch;
pub mod blob;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod form;
pub mod models;
pub mod repo;
pub mod subscription;
pub mod toggle;

mod memory;
pub use memory::MemoryStore;

pub use activity::{recent_activity, ActivityKind};
pub use blob::{BlobHandle, BlobStore};
pub use config::OpenLabConfig;
pub use document::{Direction, Document, Fields, Filter, Query, Updates};
pub use error::{Result, StoreError};
pub use filter::ProjectFilters;
pub use form::{
    Asset, CommentDraft, FormDraft, GroupDraft, PortfolioDraft, PostDraft, ProjectDraft,
    Submission, SubmissionError, SubmissionState,
};
pub use models::{
    join_locally, ActivityEntry, Actor, Comment, Education, Experience, Group, Post, Project, UserProfile,
};
pub use repo::{DocumentStore, Repository};
pub use subscription::Subscription;
pub use toggle::{MembershipMirror, PendingToggle, ToggleTarget};
