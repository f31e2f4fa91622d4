//! API middleware components

pub mod session_auth;

pub use session_auth::{CurrentUser, ExemptPaths, GateDecision, SESSION_COOKIE};
