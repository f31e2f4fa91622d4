//! Session store abstraction
//!
//! Sessions map an opaque client-held token to a small attribute set. The
//! only attribute this service cares about is the authenticated user id,
//! stored under [`USER_ID_KEY`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Session attribute key under which the authenticated user id is stored
pub const USER_ID_KEY: &str = "user_id";

/// Opaque per-client session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Mint a fresh random token
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value held by a session attribute
///
/// Reads are schema-checked: accessors fail closed on a type mismatch
/// instead of trusting the stored shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionValue {
    Integer(i64),
    Text(String),
}

impl SessionValue {
    /// Interpret the value as an authenticated user id
    ///
    /// Anything but an integer is treated as absent.
    pub fn as_user_id(&self) -> Option<UserId> {
        match self {
            Self::Integer(id) => Some(UserId::new(*id)),
            Self::Text(_) => None,
        }
    }
}

/// Store holding per-session attribute sets, keyed by session token
#[async_trait]
pub trait SessionStore: Send + Sync + Debug {
    /// Read one attribute of the session identified by `token`
    async fn get(
        &self,
        token: &SessionToken,
        key: &str,
    ) -> Result<Option<SessionValue>, DomainError>;

    /// Write one attribute of the session identified by `token`
    async fn set(
        &self,
        token: &SessionToken,
        key: &str,
        value: SessionValue,
    ) -> Result<(), DomainError>;

    /// Flush pending writes for the session to the backing medium
    async fn save(&self, token: &SessionToken) -> Result<(), DomainError>;
}
