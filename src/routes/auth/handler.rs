use axum::{Json, extract::State};

use crate::{AppState, error::AppResult, result::MessageResponse, routes::AppJson};

use super::model::{JwtResponse, LoginRequest, SignupRequest};

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<JwtResponse>> {
    req.validate()?;

    let (user, token) = state.auth_service().login(&req.email, &req.password).await?;
    Ok(Json(JwtResponse::new(user, token)))
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignupRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = req.into_new_user()?;

    state.auth_service().register(user).await?;
    Ok(Json(MessageResponse::new("User registered successfully!")))
}
