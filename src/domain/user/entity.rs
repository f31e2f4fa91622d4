//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifier, assigned by the credential store on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw numeric identifier
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creation record handed to the credential store; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

/// Mutable profile attributes
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub nickname: String,
    pub birthday: String,
    pub introduction: String,
    pub avatar: String,
}

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, immutable after creation
    id: UserId,
    /// Login key, unique across all users
    email: String,
    /// Stored credential secret - never exposed in serialization
    #[serde(skip_serializing)]
    password: String,
    nickname: String,
    birthday: String,
    introduction: String,
    avatar: String,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an empty profile
    pub fn new(id: UserId, email: impl Into<String>, password: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id,
            email: email.into(),
            password: password.into(),
            nickname: String::new(),
            birthday: String::new(),
            introduction: String::new(),
            avatar: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn birthday(&self) -> &str {
        &self.birthday
    }

    pub fn introduction(&self) -> &str {
        &self.introduction
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Replace the mutable profile attributes
    pub fn apply_profile(&mut self, profile: ProfileUpdate) {
        self.nickname = profile.nickname;
        self.birthday = profile.birthday;
        self.introduction = profile.introduction;
        self.avatar = profile.avatar;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
