//! Session domain
//!
//! Opaque session tokens, schema-checked attribute values and the store
//! trait behind which session state lives.

mod store;

pub use store::{SessionStore, SessionToken, SessionValue, USER_ID_KEY};
