use async_trait::async_trait;
use sqlx::{Error as SqlxError, PgConnection, PgPool};

use crate::database::models::{NewSession, SessionEntity};

/// 课程连同参与者列表一起查询，参与者按加入顺序聚合
const SESSION_SELECT: &str = r#"
    SELECT
        s.id, s.name, s.date, s.description, s.teacher_id, s.created_at, s.updated_at,
        COALESCE(
            ARRAY_AGG(p.user_id ORDER BY p.position) FILTER (WHERE p.user_id IS NOT NULL),
            '{}'::BIGINT[]
        ) AS users
    FROM sessions s
    LEFT JOIN participate p ON p.session_id = s.id
"#;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<SessionEntity>, SqlxError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<SessionEntity>, SqlxError>;

    async fn insert(&self, session: NewSession) -> Result<SessionEntity, SqlxError>;

    /// 覆盖课程字段和完整的参与者列表，课程不存在时返回 `None`
    async fn update(&self, session: &SessionEntity) -> Result<Option<SessionEntity>, SqlxError>;

    async fn delete(&self, id: i64) -> Result<bool, SqlxError>;
}

pub struct PgSessionRepository {
    db: PgPool,
}

impl PgSessionRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

async fn fetch_session(
    conn: &mut PgConnection,
    id: i64,
) -> Result<Option<SessionEntity>, SqlxError> {
    sqlx::query_as::<_, SessionEntity>(&format!(
        "{SESSION_SELECT} WHERE s.id = $1 GROUP BY s.id"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

async fn replace_participants(
    conn: &mut PgConnection,
    session_id: i64,
    users: &[i64],
) -> Result<(), SqlxError> {
    sqlx::query("DELETE FROM participate WHERE session_id = $1")
        .bind(session_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO participate (session_id, user_id, position)
        SELECT $1, t.user_id, t.position
        FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS t(user_id, position)
        "#,
    )
    .bind(session_id)
    .bind(users)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn find_all(&self) -> Result<Vec<SessionEntity>, SqlxError> {
        sqlx::query_as::<_, SessionEntity>(&format!(
            "{SESSION_SELECT} GROUP BY s.id ORDER BY s.id"
        ))
        .fetch_all(&self.db)
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SessionEntity>, SqlxError> {
        let mut conn = self.db.acquire().await?;
        fetch_session(&mut conn, id).await
    }

    async fn insert(&self, session: NewSession) -> Result<SessionEntity, SqlxError> {
        let mut tx = self.db.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO sessions (name, date, description, teacher_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(&session.name)
        .bind(session.date)
        .bind(&session.description)
        .bind(session.teacher_id)
        .fetch_one(&mut *tx)
        .await?;

        replace_participants(&mut tx, id, &session.users).await?;
        let created = fetch_session(&mut tx, id)
            .await?
            .ok_or(SqlxError::RowNotFound)?;

        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, session: &SessionEntity) -> Result<Option<SessionEntity>, SqlxError> {
        let mut tx = self.db.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE sessions
            SET name = $2, date = $3, description = $4, teacher_id = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(session.id)
        .bind(&session.name)
        .bind(session.date)
        .bind(&session.description)
        .bind(session.teacher_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        replace_participants(&mut tx, session.id, &session.users).await?;
        let saved = fetch_session(&mut tx, session.id).await?;

        tx.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<bool, SqlxError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
