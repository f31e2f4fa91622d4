//! User infrastructure module
//!
//! In-memory credential store and the account service orchestrating it.

mod repository;
mod service;

pub use repository::InMemoryUserRepository;
pub use service::{AccountError, AccountService, SignUpData};
