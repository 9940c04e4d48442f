//! Identity provider abstraction.
//!
//! The external identity provider owns accounts, credentials, password
//! resets, and token lifetimes. This module defines the boundary trait, the
//! provider error-code mapping, and the HTTP implementation.

pub mod http;

pub use http::HttpIdentityProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Classified authentication failures, mapped from the provider's raw error
/// code strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    InvalidEmail,
    UserDisabled,
    UserNotFound,
    WrongPassword,
    EmailInUse,
    WeakPassword,
    TooManyRequests,
    Unknown,
}

impl AuthErrorKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/invalid-email" => AuthErrorKind::InvalidEmail,
            "auth/user-disabled" => AuthErrorKind::UserDisabled,
            "auth/user-not-found" => AuthErrorKind::UserNotFound,
            "auth/wrong-password" => AuthErrorKind::WrongPassword,
            "auth/email-already-in-use" => AuthErrorKind::EmailInUse,
            "auth/weak-password" => AuthErrorKind::WeakPassword,
            "auth/too-many-requests" => AuthErrorKind::TooManyRequests,
            _ => AuthErrorKind::Unknown,
        }
    }

    /// The message shown to the user for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            AuthErrorKind::InvalidEmail => "Invalid email address",
            AuthErrorKind::UserDisabled => "This account has been disabled",
            AuthErrorKind::UserNotFound => "No account found with this email",
            AuthErrorKind::WrongPassword => "Incorrect password",
            AuthErrorKind::EmailInUse => "An account with this email already exists",
            AuthErrorKind::WeakPassword => "Password should be at least 6 characters",
            AuthErrorKind::TooManyRequests => {
                "Too many unsuccessful login attempts. Please try again later"
            }
            AuthErrorKind::Unknown => "An error occurred. Please try again",
        }
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("{}", .0.message())]
    Auth(AuthErrorKind),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed provider response: {0}")]
    Decode(String),
}

impl IdentityError {
    /// Inline message for the auth pages. Authentication failures keep their
    /// specific text; transport and decode failures collapse to the generic
    /// fallback so provider internals never reach the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            IdentityError::Auth(kind) => kind.message(),
            _ => AuthErrorKind::Unknown.message(),
        }
    }
}

/// An authenticated session as established by the provider.
#[derive(Debug, Clone)]
pub struct ProviderSession {
    pub user_id: String,
    pub email: String,
    pub id_token: String,
    pub refresh_token: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate an existing account.
    async fn sign_in(&self, email: &str, password: &str)
        -> Result<ProviderSession, IdentityError>;

    /// Create a new account. The provider signs the account in as part of
    /// creation.
    async fn sign_up(&self, email: &str, password: &str)
        -> Result<ProviderSession, IdentityError>;

    /// Trigger the provider's out-of-band password reset email.
    async fn send_password_reset(&self, email: &str) -> Result<(), IdentityError>;

    /// Revoke the refresh token. Callers treat failures as best-effort:
    /// local session teardown proceeds regardless.
    async fn sign_out(&self, refresh_token: &str) -> Result<(), IdentityError>;
}
