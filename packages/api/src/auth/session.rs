//! Session tracking on top of an [`AuthProvider`].

use tokio::sync::watch;

use super::provider::AuthProvider;
use crate::models::UserInfo;

/// Auth-state subscription held by the app shell for its whole lifetime.
///
/// The first [`Session::next`] resolves immediately with the current user;
/// that is the moment the app leaves its loading state. Later calls resolve on
/// each sign-in or sign-out.
#[derive(Debug)]
pub struct Session {
    receiver: watch::Receiver<Option<UserInfo>>,
    primed: bool,
}

impl Session {
    pub fn subscribe<P: AuthProvider>(provider: &P) -> Self {
        Self {
            receiver: provider.subscribe(),
            primed: false,
        }
    }

    pub fn current(&self) -> Option<UserInfo> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next auth state. `None` once the provider is gone.
    pub async fn next(&mut self) -> Option<Option<UserInfo>> {
        if self.primed {
            self.receiver.changed().await.ok()?;
        }
        self.primed = true;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Stop listening for auth changes.
    pub fn teardown(self) {
        tracing::debug!("auth session torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryAuth;

    #[tokio::test]
    async fn test_session_follows_provider() {
        let auth = MemoryAuth::new();
        let mut session = Session::subscribe(&auth);

        assert_eq!(session.next().await, Some(None));

        let user = auth.sign_up("ana@lab.dev", "secreto").await.unwrap();
        assert_eq!(session.next().await, Some(Some(user.clone())));
        assert_eq!(session.current(), Some(user));

        auth.sign_out().await.unwrap();
        assert_eq!(session.next().await, Some(None));

        session.teardown();
    }
}
