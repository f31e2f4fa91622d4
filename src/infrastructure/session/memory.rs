//! In-memory session store implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::session::{SessionStore, SessionToken, SessionValue};
use crate::domain::DomainError;

/// In-memory implementation of the session store
///
/// Writes are visible immediately; `save` succeeds as a no-op since there is
/// no backing medium to flush to.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, HashMap<String, SessionValue>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(
        &self,
        token: &SessionToken,
        key: &str,
    ) -> Result<Option<SessionValue>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(token.as_str())
            .and_then(|attrs| attrs.get(key))
            .cloned())
    }

    async fn set(
        &self,
        token: &SessionToken,
        key: &str,
        value: SessionValue,
    ) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(token.as_str().to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn save(&self, _token: &SessionToken) -> Result<(), DomainError> {
        Ok(())
    }
}
