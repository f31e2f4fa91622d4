//! Application state for shared services

use std::sync::Arc;

use crate::api::middleware::ExemptPaths;
use crate::domain::session::SessionStore;
use crate::infrastructure::user::AccountService;

/// Application state shared by handlers and the auth gate
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub sessions: Arc<dyn SessionStore>,
    pub exempt_paths: ExemptPaths,
}
