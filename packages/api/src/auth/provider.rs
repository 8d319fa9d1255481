//! The authentication capability.

use std::future::Future;

use tokio::sync::watch;

use crate::error::AuthError;
use crate::models::UserInfo;

/// Email + password authentication with an observable session.
///
/// `subscribe` hands out a receiver whose value is the signed-in user (or
/// `None`), updated on every sign-in, sign-up and sign-out.
pub trait AuthProvider {
    /// Create an account and sign it in.
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<UserInfo, AuthError>>;

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<UserInfo, AuthError>>;

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>>;

    fn send_password_reset(&self, email: &str) -> impl Future<Output = Result<(), AuthError>>;

    fn current_user(&self) -> Option<UserInfo>;

    fn subscribe(&self) -> watch::Receiver<Option<UserInfo>>;
}
