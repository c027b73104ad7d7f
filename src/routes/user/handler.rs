use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::{AppState, error::AppResult, middleware::AuthUser, routes::parse_id};

use super::model::UserDto;

#[axum::debug_handler]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserDto>> {
    let user = state.user_service().find_by_id(parse_id(&id)?).await?;
    Ok(Json(user.into()))
}

#[axum::debug_handler]
pub async fn delete(
    Extension(auth): Extension<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<()> {
    state
        .user_service()
        .delete(parse_id(&id)?, &auth.email)
        .await
}
