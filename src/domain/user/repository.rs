//! Credential store gateway trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Gateway to the store holding user records
///
/// Email uniqueness is enforced by the store: `create` reports a duplicate
/// email as [`DomainError::Conflict`], which callers translate into their own
/// duplicate outcome.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Create a new account; the store assigns the id
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Look up a user by email (the login key)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Look up a user by id
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Persist updated profile attributes
    async fn update(&self, user: &User) -> Result<User, DomainError>;
}
