use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use super::password::{hash_password, verify_password};
use super::provider::AuthProvider;
use crate::error::AuthError;
use crate::models::UserInfo;

/// Minimum password length accepted by the provider.
pub const MIN_PASSWORD_LEN: usize = 6;

const PROVIDER: &str = "password";

#[derive(Debug, Clone)]
struct Account {
    id: String,
    email: String,
    password_hash: String,
}

impl Account {
    fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone(),
            name: None,
            avatar_url: None,
            provider: PROVIDER.to_string(),
        }
    }
}

/// In-memory auth provider. Clones share accounts and session.
#[derive(Clone, Debug)]
pub struct MemoryAuth {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    session: Arc<watch::Sender<Option<UserInfo>>>,
    outbox: Arc<Mutex<Vec<String>>>,
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuth {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: Arc::default(),
            session: Arc::new(session),
            outbox: Arc::default(),
        }
    }

    fn accounts(&self) -> MutexGuard<'_, HashMap<String, Account>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Addresses a password reset email was sent to, oldest first.
    pub fn sent_resets(&self) -> Vec<String> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn normalize(email: &str) -> Result<String, AuthError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }
        Ok(email)
    }

    fn set_session(&self, user: Option<UserInfo>) {
        self.session.send_replace(user);
    }
}

impl AuthProvider for MemoryAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserInfo, AuthError> {
        let email = Self::normalize(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        if self.accounts().contains_key(&email) {
            return Err(AuthError::EmailAlreadyInUse);
        }

        let account = Account {
            id: uuid::Uuid::new_v4().simple().to_string(),
            email: email.clone(),
            password_hash: hash_password(password)?,
        };
        let info = account.info();
        {
            let mut accounts = self.accounts();
            if accounts.contains_key(&email) {
                return Err(AuthError::EmailAlreadyInUse);
            }
            accounts.insert(email, account);
        }

        tracing::info!(uid = %info.id, "account created");
        self.set_session(Some(info.clone()));
        Ok(info)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserInfo, AuthError> {
        let email = Self::normalize(email)?;
        let account = self
            .accounts()
            .get(&email)
            .cloned()
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(password, &account.password_hash)? {
            return Err(AuthError::WrongPassword);
        }

        let info = account.info();
        tracing::info!(uid = %info.id, "signed in");
        self.set_session(Some(info.clone()));
        Ok(info)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(user) = self.current_user() {
            tracing::info!(uid = %user.id, "signed out");
        }
        self.set_session(None);
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let email = Self::normalize(email)?;
        if !self.accounts().contains_key(&email) {
            return Err(AuthError::UserNotFound);
        }
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email);
        Ok(())
    }

    fn current_user(&self) -> Option<UserInfo> {
        self.session.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserInfo>> {
        self.session.subscribe()
    }
}
