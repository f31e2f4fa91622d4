//! In-memory credential store implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of the credential store gateway
///
/// Ids come from a monotonically increasing counter; email uniqueness is
/// enforced through a secondary index. The email is the immutable login key,
/// so `update` never touches the index.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    /// Index for email -> user id lookup
    email_index: Arc<RwLock<HashMap<String, i64>>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        if email_index.contains_key(&user.email) {
            return Err(DomainError::conflict(format!(
                "email '{}' already registered",
                user.email
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = User::new(UserId::new(id), user.email, user.password);

        email_index.insert(record.email().to_string(), id);
        users.insert(id, record.clone());

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email_index = self.email_index.read().await;

        if let Some(id) = email_index.get(email) {
            let users = self.users.read().await;
            return Ok(users.get(id).cloned());
        }

        Ok(None)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id.as_i64()).cloned())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let id = user.id().as_i64();

        if !users.contains_key(&id) {
            return Err(DomainError::not_found(format!("user '{}' not found", id)));
        }

        users.insert(id, user.clone());
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::ProfileUpdate;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: "Abc12345!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_email() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(new_user("a@b.com")).await.unwrap();

        let found = repo.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found.id(), created.id());
        assert_eq!(found.email(), "a@b.com");
    }

    #[tokio::test]
    async fn test_ids_are_distinct() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(new_user("a@b.com")).await.unwrap();
        let second = repo.create(new_user("c@d.com")).await.unwrap();

        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();

        repo.create(new_user("a@b.com")).await.unwrap();

        let result = repo.create(new_user("a@b.com")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_find_by_unknown_email() {
        let repo = InMemoryUserRepository::new();

        let found = repo.find_by_email("nobody@x.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_by_unknown_id() {
        let repo = InMemoryUserRepository::new();

        let found = repo.find_by_id(UserId::new(99)).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_update_roundtrip() {
        let repo = InMemoryUserRepository::new();

        let mut user = repo.create(new_user("a@b.com")).await.unwrap();
        user.apply_profile(ProfileUpdate {
            nickname: "nick".to_string(),
            ..ProfileUpdate::default()
        });

        repo.update(&user).await.unwrap();

        let found = repo.find_by_id(user.id()).await.unwrap().unwrap();
        assert_eq!(found.nickname(), "nick");
    }

    #[tokio::test]
    async fn test_update_unknown_user() {
        let repo = InMemoryUserRepository::new();
        let user = User::new(UserId::new(99), "a@b.com", "Abc12345!");

        let result = repo.update(&user).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
