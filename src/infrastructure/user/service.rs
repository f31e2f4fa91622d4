//! Account service - signup, login and profile orchestration

use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use crate::domain::user::{
    validate_email, validate_introduction, validate_nickname, validate_password, NewUser,
    ProfileUpdate, User, UserId, UserRepository, UserValidationError,
};
use crate::domain::DomainError;

/// Signup data as collected from the caller
#[derive(Debug, Clone)]
pub struct SignUpData {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Account-level failures, distinguishable by kind
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("{0}")]
    Validation(#[from] UserValidationError),

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("email already registered")]
    DuplicateEmail,

    /// Unknown email and wrong password are deliberately indistinguishable
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("user not found")]
    NotFound,

    /// Collaborator failure; detail goes to the log, not the caller
    #[error("system error")]
    System,
}

/// Stateless orchestrator over the credential store gateway
#[derive(Debug)]
pub struct AccountService {
    repository: Arc<dyn UserRepository>,
}

impl AccountService {
    /// Create a new account service
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Register a new account
    ///
    /// Validation order: email shape, password confirmation, password
    /// complexity. A confirmation mismatch aborts before any store call.
    pub async fn sign_up(&self, data: SignUpData) -> Result<(), AccountError> {
        validate_email(&data.email)?;

        if data.password != data.confirm_password {
            return Err(AccountError::PasswordMismatch);
        }

        validate_password(&data.password)?;

        let user = NewUser {
            email: data.email,
            password: data.password,
        };

        match self.repository.create(user).await {
            Ok(_) => Ok(()),
            Err(DomainError::Conflict { .. }) => Err(AccountError::DuplicateEmail),
            Err(err) => {
                error!(error = %err, "account creation failed");
                Err(AccountError::System)
            }
        }
    }

    /// Authenticate by email and password
    ///
    /// The caller is responsible for establishing a session from the
    /// returned record. A store failure short-circuits before any session
    /// can be written.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let user = match self.repository.find_by_email(email).await {
            Ok(user) => user,
            Err(err) => {
                error!(error = %err, "credential lookup failed");
                return Err(AccountError::System);
            }
        };

        // Passwords are compared as opaque values
        match user {
            Some(user) if user.password() == password => Ok(user),
            _ => Err(AccountError::InvalidCredentials),
        }
    }

    /// Update the mutable profile attributes of an authenticated user
    ///
    /// Length limits are checked before any store call.
    pub async fn update_profile(
        &self,
        id: UserId,
        profile: ProfileUpdate,
    ) -> Result<User, AccountError> {
        validate_nickname(&profile.nickname)?;
        validate_introduction(&profile.introduction)?;

        let mut user = match self.repository.find_by_id(id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                // A gated request carries a store-issued id
                error!(user_id = %id, "profile update for unknown user");
                return Err(AccountError::System);
            }
            Err(err) => {
                error!(error = %err, "profile lookup failed");
                return Err(AccountError::System);
            }
        };

        user.apply_profile(profile);

        match self.repository.update(&user).await {
            Ok(user) => Ok(user),
            Err(err) => {
                error!(error = %err, "profile update failed");
                Err(AccountError::System)
            }
        }
    }

    /// Fetch the profile of a user by id
    pub async fn profile(&self, id: UserId) -> Result<User, AccountError> {
        match self.repository.find_by_id(id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(AccountError::NotFound),
            Err(err) => {
                error!(error = %err, "profile lookup failed");
                Err(AccountError::System)
            }
        }
    }
}
