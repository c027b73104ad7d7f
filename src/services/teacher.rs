use std::sync::Arc;

use crate::database::{TeacherEntity, TeacherRepository};
use crate::error::{AppError, AppResult};

pub struct TeacherService {
    teachers: Arc<dyn TeacherRepository>,
}

impl TeacherService {
    pub fn new(teachers: Arc<dyn TeacherRepository>) -> Self {
        Self { teachers }
    }

    pub async fn find_all(&self) -> AppResult<Vec<TeacherEntity>> {
        Ok(self.teachers.find_all().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<TeacherEntity> {
        self.teachers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Teacher", id))
    }
}
