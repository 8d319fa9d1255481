//! # Account flows
//!
//! What the login, register and password-reset screens run on submit.
//! Registration validates the form locally before calling the provider, then
//! writes the initial `users/{uid}` profile document.

use std::sync::LazyLock;

use regex::Regex;
use store::{DocumentStore, Repository, StoreError};
use thiserror::Error;

use crate::auth::{AuthProvider, MIN_PASSWORD_LEN};
use crate::error::{AuthError, Screen};
use crate::models::UserInfo;

/// Shown after a reset email has been sent.
pub const RESET_SENT_MESSAGE: &str = "Revisa tu correo para restaurar la contraseña.";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("EMAIL_REGEX: invalid regex pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Register form problems caught before any provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Correo inválido")]
    InvalidEmail,
    #[error("La contraseña debe tener al menos 6 caracteres")]
    PasswordTooShort,
    #[error("Las contraseñas no coinciden")]
    PasswordMismatch,
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("auth provider: {0}")]
    Auth(#[from] AuthError),
    #[error("could not create the profile document: {0}")]
    Profile(#[from] StoreError),
}

impl AccountError {
    /// Text shown under the form on `screen`.
    pub fn message(&self, screen: Screen) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Auth(err) => err.message(screen).to_string(),
            Self::Profile(_) => screen.generic_message().to_string(),
        }
    }
}

pub fn validate_registration(
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), ValidationError> {
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Validate, create the account, then write its profile document.
pub async fn register<P, S>(
    auth: &P,
    repo: &Repository<S>,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<UserInfo, AccountError>
where
    P: AuthProvider,
    S: DocumentStore,
{
    validate_registration(email, password, confirm)?;
    let user = auth.sign_up(email, password).await?;
    repo.create_user_profile(&user.id, &user.email).await?;
    Ok(user)
}

pub async fn login<P: AuthProvider>(
    auth: &P,
    email: &str,
    password: &str,
) -> Result<UserInfo, AccountError> {
    Ok(auth.sign_in(email, password).await?)
}

pub async fn logout<P: AuthProvider>(auth: &P) -> Result<(), AccountError> {
    Ok(auth.sign_out().await?)
}

pub async fn reset_password<P: AuthProvider>(auth: &P, email: &str) -> Result<(), AccountError> {
    auth.send_password_reset(email).await?;
    tracing::info!("password reset email sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryAuth;
    use store::MemoryStore;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("ana@lab.dev"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("ana@lab"));
        assert!(!is_valid_email("ana lab.dev"));
        assert!(!is_valid_email("@."));
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(
            validate_registration("nope", "x", "y"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_registration("ana@lab.dev", "12345", "12345"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_registration("ana@lab.dev", "123456", "654321"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(validate_registration("ana@lab.dev", "123456", "123456").is_ok());
    }

    #[tokio::test]
    async fn test_register_creates_profile() {
        let auth = MemoryAuth::new();
        let store = MemoryStore::new();
        let repo = Repository::new(store);

        let user = register(&auth, &repo, "ana@lab.dev", "secreto", "secreto")
            .await
            .unwrap();

        let profile = repo.get_user(&user.id).await.unwrap().unwrap();
        assert_eq!(profile.email, "ana@lab.dev");
        assert!(profile.favorites.is_empty());
        assert!(profile.following.is_empty());
        assert_eq!(profile.points, 0);
        assert_eq!(auth.current_user(), Some(user));
    }

    #[tokio::test]
    async fn test_register_rejects_before_provider_call() {
        let auth = MemoryAuth::new();
        let repo = Repository::new(MemoryStore::new());

        let err = register(&auth, &repo, "ana@lab.dev", "secreto", "secretO")
            .await
            .unwrap_err();
        assert_eq!(err.message(Screen::Register), "Las contraseñas no coinciden");
        assert!(auth.current_user().is_none());
        assert_eq!(
            login(&auth, "ana@lab.dev", "secreto")
                .await
                .unwrap_err()
                .message(Screen::Login),
            "Usuario no encontrado"
        );
    }

    #[tokio::test]
    async fn test_reset_messages() {
        let auth = MemoryAuth::new();
        let repo = Repository::new(MemoryStore::new());
        register(&auth, &repo, "ana@lab.dev", "secreto", "secreto")
            .await
            .unwrap();
        logout(&auth).await.unwrap();

        reset_password(&auth, "ana@lab.dev").await.unwrap();
        let err = reset_password(&auth, "bob@lab.dev").await.unwrap_err();
        assert_eq!(err.message(Screen::PasswordReset), "Usuario no encontrado");
    }
}
