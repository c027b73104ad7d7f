use axum::extract::{FromRequest, rejection::JsonRejection};

use crate::error::{AppError, AppResult};

pub mod auth;
pub mod session;
pub mod teacher;
pub mod user;

/// 解析失败时返回 [`AppError::BadRequest`] 的 `Json`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// 路径中的ID必须是整数
pub(crate) fn parse_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid id: {raw}")))
}

pub(crate) fn require_not_blank(field: &str, value: Option<&str>, max: usize) -> AppResult<String> {
    let value = value.unwrap_or_default();
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be blank")));
    }
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(value.to_string())
}

pub(crate) fn require_length(field: &str, value: &str, min: usize, max: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::BadRequest(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
