//! User domain
//!
//! This module provides the user entity, credential validation and the
//! gateway trait to the store holding user records.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, ProfileUpdate, User, UserId};
pub use repository::UserRepository;
pub use validation::{
    validate_email, validate_introduction, validate_nickname, validate_password,
    UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
