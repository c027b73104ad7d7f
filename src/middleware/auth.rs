use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::{AppState, database::UserEntity, error::AppError};

/// 已认证用户，由中间件写入请求扩展
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub admin: bool,
}

impl From<UserEntity> for AuthUser {
    fn from(user: UserEntity) -> Self {
        Self {
            id: user.id,
            email: user.email,
            admin: user.admin,
        }
    }
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // 只接受 Bearer 方案，其余一律视为未认证
    let token = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_owned())
        .ok_or_else(AppError::unauthenticated)?;

    let user = state.auth_service().authenticate(&token).await?;
    tracing::debug!(user_id = user.id, "Authenticated request");

    request.extensions_mut().insert(AuthUser::from(user));

    Ok(next.run(request).await)
}
