//! # Authentication errors
//!
//! [`AuthError`] mirrors the provider's error codes (`auth/user-not-found`, ...).
//! Each [`Screen`] maps the codes it can produce to a fixed user-facing
//! message; every other code is shown as that screen's generic message.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("auth/user-not-found")]
    UserNotFound,
    #[error("auth/wrong-password")]
    WrongPassword,
    #[error("auth/invalid-email")]
    InvalidEmail,
    #[error("auth/email-already-in-use")]
    EmailAlreadyInUse,
    #[error("auth/weak-password")]
    WeakPassword,
    /// Any other provider failure, with its code or description.
    #[error("{0}")]
    Other(String),
}

/// Screen an auth error is shown on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    PasswordReset,
}

impl Screen {
    pub fn generic_message(self) -> &'static str {
        match self {
            Self::Login => "Error al iniciar sesión",
            Self::Register => "Error al crear la cuenta",
            Self::PasswordReset => "Correo no registrado o error al enviar email",
        }
    }
}

impl AuthError {
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/user-not-found" => Self::UserNotFound,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/invalid-email" => Self::InvalidEmail,
            "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "auth/weak-password" => Self::WeakPassword,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::InvalidEmail => "auth/invalid-email",
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::WeakPassword => "auth/weak-password",
            Self::Other(code) => code,
        }
    }

    /// User-facing message on `screen`.
    pub fn message(&self, screen: Screen) -> &'static str {
        use Screen::*;
        match (screen, self) {
            (Login | PasswordReset, Self::UserNotFound) => "Usuario no encontrado",
            (Login, Self::WrongPassword) => "Contraseña incorrecta",
            (_, Self::InvalidEmail) => "Correo inválido",
            (Register, Self::EmailAlreadyInUse) => "El correo ya está registrado",
            (Register, Self::WeakPassword) => "Contraseña demasiado débil",
            _ => screen.generic_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_roundtrip() {
        for code in [
            "auth/user-not-found",
            "auth/wrong-password",
            "auth/invalid-email",
            "auth/email-already-in-use",
            "auth/weak-password",
        ] {
            let err = AuthError::from_code(code);
            assert!(!matches!(err, AuthError::Other(_)));
            assert_eq!(err.code(), code);
            assert_eq!(err.to_string(), code);
        }
    }

    #[test]
    fn test_unknown_codes_use_screen_message() {
        let err = AuthError::from_code("auth/network-request-failed");
        assert_eq!(err.message(Screen::Login), "Error al iniciar sesión");
        assert_eq!(err.message(Screen::Register), "Error al crear la cuenta");
        assert_eq!(
            err.message(Screen::PasswordReset),
            "Correo no registrado o error al enviar email"
        );
        assert_eq!(
            AuthError::WrongPassword.message(Screen::Login),
            "Contraseña incorrecta"
        );
    }

    #[test]
    fn test_codes_outside_screen_use_generic_message() {
        assert_eq!(
            AuthError::EmailAlreadyInUse.message(Screen::Login),
            "Error al iniciar sesión"
        );
        assert_eq!(
            AuthError::WeakPassword.message(Screen::Login),
            "Error al iniciar sesión"
        );
        assert_eq!(
            AuthError::WrongPassword.message(Screen::Register),
            "Error al crear la cuenta"
        );
        assert_eq!(
            AuthError::UserNotFound.message(Screen::Register),
            "Error al crear la cuenta"
        );
        assert_eq!(
            AuthError::EmailAlreadyInUse.message(Screen::Register),
            "El correo ya está registrado"
        );
        assert_eq!(AuthError::InvalidEmail.message(Screen::Login), "Correo inválido");
    }
}
