use std::sync::Arc;

use crate::database::{
    NewSession, SessionEntity, SessionRepository, TeacherRepository, UserRepository,
};
use crate::error::{AppError, AppResult};

/// 课程增删改查及参与规则
///
/// 重复参加或取消未参加的课程都属于客户端错误。查询与写入是两次独立调用，
/// 同一课程的并发 `participate` 可能交错；PostgreSQL 上 `participate` 主键仍保证不重复。
pub struct SessionService {
    sessions: Arc<dyn SessionRepository>,
    users: Arc<dyn UserRepository>,
    teachers: Arc<dyn TeacherRepository>,
}

impl SessionService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        teachers: Arc<dyn TeacherRepository>,
    ) -> Self {
        Self {
            sessions,
            users,
            teachers,
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<SessionEntity>> {
        Ok(self.sessions.find_all().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<SessionEntity> {
        self.sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Session", id))
    }

    pub async fn create(&self, session: NewSession) -> AppResult<SessionEntity> {
        let session = self.resolve_references(session).await?;
        let created = self.sessions.insert(session).await?;
        tracing::info!(session_id = created.id, "Session created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, session: NewSession) -> AppResult<SessionEntity> {
        let existing = self.find_by_id(id).await?;
        let session = self.resolve_references(session).await?;

        let replacement = SessionEntity {
            name: session.name,
            date: session.date,
            description: session.description,
            teacher_id: session.teacher_id,
            users: session.users,
            ..existing
        };

        let updated = self
            .sessions
            .update(&replacement)
            .await?
            .ok_or_else(|| AppError::not_found("Session", id))?;
        tracing::info!(session_id = id, "Session updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.sessions.delete(id).await? {
            return Err(AppError::not_found("Session", id));
        }
        tracing::info!(session_id = id, "Session deleted");
        Ok(())
    }

    pub async fn participate(&self, id: i64, user_id: i64) -> AppResult<()> {
        let mut session = self.find_by_id(id).await?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found("User", user_id));
        }

        if session.has_participant(user_id) {
            tracing::debug!(session_id = id, user_id, "User already participates");
            return Err(AppError::BadRequest(format!(
                "User {user_id} already participates in session {id}"
            )));
        }

        session.users.push(user_id);
        self.save(&session).await?;

        tracing::info!(session_id = id, user_id, "User joined session");
        Ok(())
    }

    pub async fn no_longer_participate(&self, id: i64, user_id: i64) -> AppResult<()> {
        let mut session = self.find_by_id(id).await?;

        if !session.has_participant(user_id) {
            tracing::debug!(session_id = id, user_id, "User does not participate");
            return Err(AppError::BadRequest(format!(
                "User {user_id} does not participate in session {id}"
            )));
        }

        session.users.retain(|participant| *participant != user_id);
        self.save(&session).await?;

        tracing::info!(session_id = id, user_id, "User left session");
        Ok(())
    }

    async fn save(&self, session: &SessionEntity) -> AppResult<SessionEntity> {
        self.sessions
            .update(session)
            .await?
            .ok_or_else(|| AppError::not_found("Session", session.id))
    }

    /// 未知教师置空；未知或重复的用户ID被丢弃
    async fn resolve_references(&self, mut session: NewSession) -> AppResult<NewSession> {
        if let Some(teacher_id) = session.teacher_id {
            if self.teachers.find_by_id(teacher_id).await?.is_none() {
                tracing::warn!(teacher_id, "Unknown teacher, session stored without one");
                session.teacher_id = None;
            }
        }

        let mut users = Vec::with_capacity(session.users.len());
        for user_id in session.users {
            if users.contains(&user_id) {
                continue;
            }
            if self.users.find_by_id(user_id).await?.is_some() {
                users.push(user_id);
            } else {
                tracing::warn!(user_id, "Unknown participant dropped");
            }
        }
        session.users = users;

        Ok(session)
    }
}
