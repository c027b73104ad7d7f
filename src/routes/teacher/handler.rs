use axum::{
    Json,
    extract::{Path, State},
};

use crate::{AppState, error::AppResult, routes::parse_id};

use super::model::TeacherDto;

#[axum::debug_handler]
pub async fn find_all(State(state): State<AppState>) -> AppResult<Json<Vec<TeacherDto>>> {
    let teachers = state.teacher_service().find_all().await?;
    Ok(Json(teachers.into_iter().map(TeacherDto::from).collect()))
}

#[axum::debug_handler]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TeacherDto>> {
    let teacher = state.teacher_service().find_by_id(parse_id(&id)?).await?;
    Ok(Json(teacher.into()))
}
