use async_trait::async_trait;
use sqlx::{Error as SqlxError, PgPool};

use crate::database::models::{NewUser, UserEntity};

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, password, admin, created_at, updated_at";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, SqlxError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, SqlxError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, SqlxError>;

    async fn insert(&self, user: NewUser) -> Result<UserEntity, SqlxError>;

    /// 返回是否确实删除了记录
    async fn delete(&self, id: i64) -> Result<bool, SqlxError>;
}

/// 用户存储库，基于 PostgreSQL
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, SqlxError> {
        sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, SqlxError> {
        sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, SqlxError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.db)
            .await
    }

    async fn insert(&self, user: NewUser) -> Result<UserEntity, SqlxError> {
        sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            INSERT INTO users (email, first_name, last_name, password, admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.email)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.password)
        .bind(user.admin)
        .fetch_one(&self.db)
        .await
    }

    async fn delete(&self, id: i64) -> Result<bool, SqlxError> {
        // participate 表通过外键级联删除
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
