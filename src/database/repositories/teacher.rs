use async_trait::async_trait;
use sqlx::{Error as SqlxError, PgPool};

use crate::database::models::TeacherEntity;

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<TeacherEntity>, SqlxError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<TeacherEntity>, SqlxError>;
}

pub struct PgTeacherRepository {
    db: PgPool,
}

impl PgTeacherRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeacherRepository for PgTeacherRepository {
    async fn find_all(&self) -> Result<Vec<TeacherEntity>, SqlxError> {
        sqlx::query_as::<_, TeacherEntity>(
            "SELECT id, first_name, last_name, created_at, updated_at FROM teachers ORDER BY id",
        )
        .fetch_all(&self.db)
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TeacherEntity>, SqlxError> {
        sqlx::query_as::<_, TeacherEntity>(
            "SELECT id, first_name, last_name, created_at, updated_at FROM teachers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }
}
