//! # Signed-in user
//!
//! [`UserInfo`] is what the auth provider reports for the current session: the
//! uid (also the id of the `users/{uid}` profile document), the email and an
//! optional display name. [`UserInfo::actor`] turns it into the
//! [`store::Actor`] stamped on every write.

use serde::{Deserialize, Serialize};

/// Shown when a user has neither a display name nor an email.
pub const ANONYMOUS_NAME: &str = "Anónimo";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub provider: String,
}

impl UserInfo {
    /// Display name, falling back to the email, then to [`ANONYMOUS_NAME`].
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ if !self.email.is_empty() => &self.email,
            _ => ANONYMOUS_NAME,
        }
    }

    pub fn actor(&self) -> store::Actor {
        store::Actor::new(self.id.clone(), self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: Option<&str>, email: &str) -> UserInfo {
        UserInfo {
            id: "u1".into(),
            email: email.into(),
            name: name.map(str::to_string),
            avatar_url: None,
            provider: "password".into(),
        }
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(user(Some("Ana"), "ana@lab.dev").display_name(), "Ana");
        assert_eq!(user(Some(" "), "ana@lab.dev").display_name(), "ana@lab.dev");
        assert_eq!(user(None, "").display_name(), ANONYMOUS_NAME);

        let actor = user(None, "ana@lab.dev").actor();
        assert_eq!(actor.uid, "u1");
        assert_eq!(actor.name, "ana@lab.dev");
    }
}
