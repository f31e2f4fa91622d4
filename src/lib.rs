//! Account API
//!
//! Registration, login and profile management behind a session-based
//! authentication gate. Persistence and session state sit behind narrow
//! trait boundaries with in-memory implementations.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::middleware::ExemptPaths;
use api::state::AppState;
use infrastructure::session::InMemorySessionStore;
use infrastructure::user::{AccountService, InMemoryUserRepository};

/// Paths served without a session
fn exempt_paths() -> ExemptPaths {
    ExemptPaths::builder()
        .ignore("/users/signup")
        .ignore("/users/login")
        .ignore("/health")
        .build()
}

/// Create the application state with all services initialized
pub fn create_app_state() -> AppState {
    let repository = Arc::new(InMemoryUserRepository::new());
    let accounts = Arc::new(AccountService::new(repository));
    let sessions = Arc::new(InMemorySessionStore::new());

    AppState {
        accounts,
        sessions,
        exempt_paths: exempt_paths(),
    }
}
