//! # API crate — authentication for Mi OpenLab
//!
//! Everything the frontends need to know about who is signed in.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`AuthProvider`] capability, the in-memory [`MemoryAuth`] provider (Argon2id password hashes), [`Session`] auth-state subscription |
//! | [`accounts`] | Register / login / logout / password-reset flows used by the auth screens |
//! | [`error`] | Provider error codes and their user-facing messages |
//! | [`models`] | [`UserInfo`], the signed-in user |

pub mod accounts;
pub mod auth;
pub mod error;
pub mod models;

pub use accounts::{AccountError, ValidationError, RESET_SENT_MESSAGE};
pub use auth::{AuthProvider, MemoryAuth, Session};
pub use error::{AuthError, Screen};
pub use models::UserInfo;
