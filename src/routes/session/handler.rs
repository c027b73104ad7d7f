use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    AppState,
    error::AppResult,
    routes::{AppJson, parse_id},
};

use super::model::SessionDto;

#[axum::debug_handler]
pub async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<SessionDto>>> {
    let sessions = state.session_service().find_all().await?;
    Ok(Json(sessions.into_iter().map(SessionDto::from).collect()))
}

#[axum::debug_handler]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SessionDto>> {
    let session = state.session_service().find_by_id(parse_id(&id)?).await?;
    Ok(Json(session.into()))
}

#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    AppJson(dto): AppJson<SessionDto>,
) -> AppResult<Json<SessionDto>> {
    let session = state
        .session_service()
        .create(dto.into_new_session()?)
        .await?;
    Ok(Json(session.into()))
}

#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<SessionDto>,
) -> AppResult<Json<SessionDto>> {
    let id = parse_id(&id)?;
    let session = state
        .session_service()
        .update(id, dto.into_new_session()?)
        .await?;
    Ok(Json(session.into()))
}

#[axum::debug_handler]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<()> {
    state.session_service().delete(parse_id(&id)?).await
}

#[axum::debug_handler]
pub async fn participate(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> AppResult<()> {
    let (id, user_id) = (parse_id(&id)?, parse_id(&user_id)?);
    state.session_service().participate(id, user_id).await
}

#[axum::debug_handler]
pub async fn no_longer_participate(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> AppResult<()> {
    let (id, user_id) = (parse_id(&id)?, parse_id(&user_id)?);
    state
        .session_service()
        .no_longer_participate(id, user_id)
        .await
}
