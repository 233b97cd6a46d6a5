//! Input shape checks. The first failing field is reported.
use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 50;
pub const EMAIL_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 50;
pub const CONTENT_MAX: usize = 1000;

pub fn required(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(field, format!("{field} is required")));
    }
    Ok(())
}

pub fn length(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min {
        return Err(AppError::validation(
            field,
            format!("{field} must be at least {min} characters"),
        ));
    }
    if len > max {
        return Err(AppError::validation(
            field,
            format!("{field} must be at most {max} characters"),
        ));
    }
    Ok(())
}

pub fn name(field: &'static str, value: &str) -> Result<(), AppError> {
    required(field, value)?;
    length(field, value, NAME_MIN, NAME_MAX)
}

pub fn email(value: &str) -> Result<(), AppError> {
    required("email", value)?;
    length("email", value, 3, EMAIL_MAX)?;
    if !EMAIL_RE.is_match(value) {
        return Err(AppError::validation("email", "invalid email format"));
    }
    Ok(())
}

pub fn username(value: &str) -> Result<(), AppError> {
    name("username", value)?;
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::validation(
            "username",
            "username must be alphanumeric",
        ));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(AppError::validation("password", "password is required"));
    }
    length("password", value, PASSWORD_MIN, PASSWORD_MAX)
}

pub fn content(value: &str) -> Result<(), AppError> {
    required("content", value)?;
    length("content", value.trim(), 1, CONTENT_MAX)
}
