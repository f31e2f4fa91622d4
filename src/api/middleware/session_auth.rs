//! Session authentication gate
//!
//! Every request passes through the gate before any handler runs. Requests to
//! exempt paths go through untouched; everything else needs a session whose
//! user-id attribute is a well-typed integer. Anything less is rejected with
//! an unauthorized response and the downstream handler never runs.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::session::{SessionStore, SessionToken, USER_ID_KEY};
use crate::domain::user::UserId;

/// Cookie carrying the session token
pub const SESSION_COOKIE: &str = "session_id";

/// Accumulator for the exempt-path set
///
/// Paths are registered one at a time; registering the same path twice has no
/// additional effect. `build` freezes the set - no paths can be added after
/// that.
#[derive(Debug, Default)]
pub struct ExemptPathsBuilder {
    paths: HashSet<String>,
}

impl ExemptPathsBuilder {
    /// Register a path to be served without a session
    pub fn ignore(mut self, path: impl Into<String>) -> Self {
        self.paths.insert(path.into());
        self
    }

    /// Freeze the set
    pub fn build(self) -> ExemptPaths {
        ExemptPaths {
            paths: Arc::new(self.paths),
        }
    }
}

/// Frozen set of route paths that skip session validation
#[derive(Debug, Clone)]
pub struct ExemptPaths {
    paths: Arc<HashSet<String>>,
}

impl ExemptPaths {
    pub fn builder() -> ExemptPathsBuilder {
        ExemptPathsBuilder::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Outcome of the per-request gate decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Path is exempt; the session is not consulted
    Exempt,
    /// A valid session carried an integer user id
    Authenticated(UserId),
    /// No usable session; the request must not reach a handler
    Rejected,
}

/// Decide whether a request may proceed
///
/// A session-store failure rejects the request: the gate fails closed.
pub async fn evaluate(
    exempt: &ExemptPaths,
    sessions: &dyn SessionStore,
    path: &str,
    token: Option<&SessionToken>,
) -> GateDecision {
    if exempt.contains(path) {
        return GateDecision::Exempt;
    }

    let Some(token) = token else {
        return GateDecision::Rejected;
    };

    match sessions.get(token, USER_ID_KEY).await {
        Ok(Some(value)) => match value.as_user_id() {
            Some(id) => GateDecision::Authenticated(id),
            // Stored attribute has the wrong type
            None => GateDecision::Rejected,
        },
        Ok(None) => GateDecision::Rejected,
        Err(err) => {
            warn!(%path, error = %err, "session lookup failed, rejecting request");
            GateDecision::Rejected
        }
    }
}

/// Identity the gate attaches to authenticated requests
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized("authentication required"))
    }
}

/// Middleware applying the gate decision to each request
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let token = session_token(request.headers());

    match evaluate(
        &state.exempt_paths,
        state.sessions.as_ref(),
        &path,
        token.as_ref(),
    )
    .await
    {
        GateDecision::Exempt => next.run(request).await,
        GateDecision::Authenticated(id) => {
            debug!(user_id = %id, %path, "session authenticated");
            request.extensions_mut().insert(CurrentUser(id));
            next.run(request).await
        }
        GateDecision::Rejected => {
            ApiError::unauthorized("authentication required").into_response()
        }
    }
}

/// Extract the session token from the request's `Cookie` header
pub fn session_token(headers: &HeaderMap) -> Option<SessionToken> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| SessionToken::new(value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::SessionValue;
    use crate::infrastructure::session::InMemorySessionStore;

    fn exempt_paths() -> ExemptPaths {
        ExemptPaths::builder()
            .ignore("/users/signup")
            .ignore("/users/login")
            .build()
    }

    #[test]
    fn test_builder_is_idempotent() {
        let exempt = ExemptPaths::builder()
            .ignore("/users/signup")
            .ignore("/users/signup")
            .build();

        assert_eq!(exempt.len(), 1);
        assert!(exempt.contains("/users/signup"));
    }

    #[test]
    fn test_empty_set_exempts_nothing() {
        let exempt = ExemptPaths::builder().build();

        assert!(exempt.is_empty());
        assert!(!exempt.contains("/users/profile"));
    }

    #[tokio::test]
    async fn test_exempt_path_skips_the_session() {
        let sessions = InMemorySessionStore::new();

        let decision = evaluate(&exempt_paths(), &sessions, "/users/signup", None).await;
        assert_eq!(decision, GateDecision::Exempt);
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let sessions = InMemorySessionStore::new();

        let decision = evaluate(&exempt_paths(), &sessions, "/users/profile", None).await;
        assert_eq!(decision, GateDecision::Rejected);
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let sessions = InMemorySessionStore::new();
        let token = SessionToken::generate();

        let decision =
            evaluate(&exempt_paths(), &sessions, "/users/profile", Some(&token)).await;
        assert_eq!(decision, GateDecision::Rejected);
    }

    #[tokio::test]
    async fn test_valid_session_is_authenticated() {
        let sessions = InMemorySessionStore::new();
        let token = SessionToken::generate();
        sessions
            .set(&token, USER_ID_KEY, SessionValue::Integer(7))
            .await
            .unwrap();

        let decision =
            evaluate(&exempt_paths(), &sessions, "/users/profile", Some(&token)).await;
        assert_eq!(decision, GateDecision::Authenticated(UserId::new(7)));
    }

    #[tokio::test]
    async fn test_mistyped_session_value_is_rejected() {
        let sessions = InMemorySessionStore::new();
        let token = SessionToken::generate();
        sessions
            .set(&token, USER_ID_KEY, SessionValue::Text("7".to_string()))
            .await
            .unwrap();

        let decision =
            evaluate(&exempt_paths(), &sessions, "/users/profile", Some(&token)).await;
        assert_eq!(decision, GateDecision::Rejected);
    }

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "session_id=abc123".parse().unwrap());

        let token = session_token(&headers).unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn test_session_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; session_id=abc123; lang=en".parse().unwrap(),
        );

        let token = session_token(&headers).unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn test_session_token_missing() {
        let headers = HeaderMap::new();
        assert!(session_token(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "theme=dark".parse().unwrap());
        assert!(session_token(&headers).is_none());
    }

    #[test]
    fn test_empty_session_token_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "session_id=".parse().unwrap());

        assert!(session_token(&headers).is_none());
    }
}
