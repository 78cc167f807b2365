//! Types for authentication and account management

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};

/// The authenticated account as reported by the auth backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Response of `login` and `signup`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: AuthUser,

    /// Absent after signup when the account still needs email confirmation
    #[serde(default)]
    pub session: Option<SessionTokens>,
}

/// Tokens issued by the auth backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,

    /// Unix timestamp of expiry
    #[serde(default)]
    pub expires_at: Option<i64>,
}

/// `POST /api/v1/auth/login`
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Podaj poprawny adres email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Hasło jest wymagane"))]
    pub password: String,
}

impl LoginForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }
}

/// `POST /api/v1/auth/signup`
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SignupForm {
    #[validate(email(message = "Podaj poprawny adres email"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Hasło musi mieć od 8 do 72 znaków"))]
    pub password: String,

    #[serde(skip)]
    pub confirm_password: String,
}

impl SignupForm {
    pub fn new(email: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    /// Field rules plus the password confirmation check
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if self.password != self.confirm_password {
            return Err(Error::validation("Hasła muszą być identyczne"));
        }
        Ok(())
    }
}

/// `PATCH /api/v1/profile/password`
#[derive(Debug, Clone, Serialize, Validate)]
pub struct PasswordChange {
    #[validate(length(min = 1, message = "Podaj obecne hasło"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 72, message = "Nowe hasło musi mieć od 8 do 72 znaków"))]
    pub new_password: String,

    #[serde(skip)]
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if self.new_password != self.confirm_password {
            return Err(Error::validation("Hasła muszą być identyczne"));
        }
        if self.new_password == self.current_password {
            return Err(Error::validation("Nowe hasło musi różnić się od obecnego"));
        }
        Ok(())
    }
}
