//! Credential and profile-field validation

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("invalid email format")]
    InvalidEmailFormat,

    #[error(
        "password must be at least 8 characters and contain a letter, a digit and a special character"
    )]
    WeakPassword,

    #[error("nickname must be shorter than {0} characters")]
    NicknameTooLong(usize),

    #[error("introduction must be shorter than {0} characters")]
    IntroductionTooLong(usize),
}

const MAX_NICKNAME_CHARS: usize = 12;
const MAX_INTRODUCTION_CHARS: usize = 200;

/// Special characters a password may (and must) draw from
const PASSWORD_SYMBOLS: &str = "$@!%*#?&";

/// local@domain.tld shape: word-character labels with optional separators
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+([-+.]\w+)*@\w+([-.]\w+)*\.\w+([-.]\w+)*$").unwrap());

// Charset and minimum length only; the letter/digit/symbol requirements are
// checked separately since the engine has no lookahead.
static PASSWORD_SHAPE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\d$@!%*#?&]{8,}$").unwrap());

/// Validate the shape of an email address
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(UserValidationError::InvalidEmailFormat)
    }
}

/// Validate password complexity
///
/// Rules:
/// - Minimum 8 characters
/// - Only letters, digits and the characters `$@!%*#?&`
/// - At least one letter, one digit and one special character
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    let shape_ok = PASSWORD_SHAPE_PATTERN.is_match(password);
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if shape_ok && has_letter && has_digit && has_symbol {
        Ok(())
    } else {
        Err(UserValidationError::WeakPassword)
    }
}

/// Validate the nickname length limit
pub fn validate_nickname(nickname: &str) -> Result<(), UserValidationError> {
    if nickname.chars().count() >= MAX_NICKNAME_CHARS {
        return Err(UserValidationError::NicknameTooLong(MAX_NICKNAME_CHARS));
    }

    Ok(())
}

/// Validate the introduction length limit
pub fn validate_introduction(introduction: &str) -> Result<(), UserValidationError> {
    if introduction.chars().count() >= MAX_INTRODUCTION_CHARS {
        return Err(UserValidationError::IntroductionTooLong(
            MAX_INTRODUCTION_CHARS,
        ));
    }

    Ok(())
}
