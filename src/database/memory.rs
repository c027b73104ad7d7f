//! 内存存储，实现全部存储库接口
//!
//! 未配置 `DATABASE_URL` 时以及集成测试中使用。行为与 PostgreSQL 保持一致：
//! 按表自增ID，列表按ID排序，邮箱唯一，删除用户时同时移出所有课程。

use std::borrow::Cow;
use std::error::Error as StdError;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use sqlx::Error as SqlxError;
use sqlx::error::{DatabaseError, ErrorKind};

use crate::database::models::{NewSession, NewUser, SessionEntity, TeacherEntity, UserEntity};
use crate::database::repositories::{SessionRepository, TeacherRepository, UserRepository};
use crate::utils::hash_password;

pub struct MemoryStore {
    users: DashMap<i64, UserEntity>,
    teachers: DashMap<i64, TeacherEntity>,
    sessions: DashMap<i64, SessionEntity>,
    user_seq: AtomicI64,
    teacher_seq: AtomicI64,
    session_seq: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            teachers: DashMap::new(),
            sessions: DashMap::new(),
            user_seq: AtomicI64::new(1),
            teacher_seq: AtomicI64::new(1),
            session_seq: AtomicI64::new(1),
        }
    }

    /// 与初始迁移中的种子数据相同
    pub fn with_demo_data() -> Result<Self, bcrypt::BcryptError> {
        let store = Self::new();
        store.insert_teacher("Margot", "DELAHAYE");
        store.insert_teacher("Hélène", "THIERCELIN");
        store.insert_user_row(NewUser {
            email: "yoga@studio.com".into(),
            first_name: "Admin".into(),
            last_name: "Admin".into(),
            password: hash_password("test!1234")?,
            admin: true,
        });
        Ok(store)
    }

    pub fn insert_teacher(&self, first_name: &str, last_name: &str) -> TeacherEntity {
        let now = Utc::now();
        let teacher = TeacherEntity {
            id: self.teacher_seq.fetch_add(1, Ordering::SeqCst),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.teachers.insert(teacher.id, teacher.clone());
        teacher
    }

    fn insert_user_row(&self, user: NewUser) -> UserEntity {
        let now = Utc::now();
        let entity = UserEntity {
            id: self.user_seq.fetch_add(1, Ordering::SeqCst),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password: user.password,
            admin: user.admin,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(entity.id, entity.clone());
        entity
    }

    fn email_taken(&self, email: &str) -> bool {
        self.users.iter().any(|entry| entry.email == email)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_by_id<T: Clone>(map: &DashMap<i64, T>) -> Vec<T> {
    let mut rows: Vec<(i64, T)> = map
        .iter()
        .map(|entry| (*entry.key(), entry.value().clone()))
        .collect();
    rows.sort_by_key(|(id, _)| *id);
    rows.into_iter().map(|(_, row)| row).collect()
}

fn dedup_in_order(users: &[i64]) -> Vec<i64> {
    let mut unique = Vec::with_capacity(users.len());
    for id in users {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    unique
}

/// 对应 PostgreSQL 的 `uq_users_email` 唯一约束冲突
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
struct EmailTaken {
    message: String,
}

impl EmailTaken {
    fn new(email: &str) -> Self {
        Self {
            message: format!(
                "duplicate key value violates unique constraint \"uq_users_email\": {email}"
            ),
        }
    }
}

impl DatabaseError for EmailTaken {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23505"))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some("uq_users_email")
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, SqlxError> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, SqlxError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, SqlxError> {
        Ok(self.email_taken(email))
    }

    async fn insert(&self, user: NewUser) -> Result<UserEntity, SqlxError> {
        if self.email_taken(&user.email) {
            return Err(SqlxError::Database(Box::new(EmailTaken::new(&user.email))));
        }
        Ok(self.insert_user_row(user))
    }

    async fn delete(&self, id: i64) -> Result<bool, SqlxError> {
        if self.users.remove(&id).is_none() {
            return Ok(false);
        }

        // 与外键级联一致
        for mut session in self.sessions.iter_mut() {
            session.users.retain(|user_id| *user_id != id);
        }
        Ok(true)
    }
}

#[async_trait]
impl TeacherRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<TeacherEntity>, SqlxError> {
        Ok(sorted_by_id(&self.teachers))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TeacherEntity>, SqlxError> {
        Ok(self.teachers.get(&id).map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<SessionEntity>, SqlxError> {
        Ok(sorted_by_id(&self.sessions))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SessionEntity>, SqlxError> {
        Ok(self.sessions.get(&id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, session: NewSession) -> Result<SessionEntity, SqlxError> {
        let now = Utc::now();
        let entity = SessionEntity {
            id: self.session_seq.fetch_add(1, Ordering::SeqCst),
            name: session.name,
            date: session.date,
            description: session.description,
            teacher_id: session.teacher_id,
            users: dedup_in_order(&session.users),
            created_at: now,
            updated_at: now,
        };
        self.sessions.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, session: &SessionEntity) -> Result<Option<SessionEntity>, SqlxError> {
        let Some(mut stored) = self.sessions.get_mut(&session.id) else {
            return Ok(None);
        };

        stored.name = session.name.clone();
        stored.date = session.date;
        stored.description = session.description.clone();
        stored.teacher_id = session.teacher_id;
        stored.users = dedup_in_order(&session.users);
        stored.updated_at = Utc::now();

        Ok(Some(stored.value().clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, SqlxError> {
        Ok(self.sessions.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_session(users: Vec<i64>) -> NewSession {
        NewSession {
            name: "Morning flow".into(),
            date: Utc.with_ymd_and_hms(2025, 5, 14, 10, 0, 0).unwrap(),
            description: "Vinyasa for early birds".into(),
            teacher_id: None,
            users,
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            first_name: "john".into(),
            last_name: "doe".into(),
            password: "hash".into(),
            admin: false,
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids_and_lists_in_order() {
        let store = MemoryStore::new();
        let first = SessionRepository::insert(&store, new_session(vec![])).await.unwrap();
        let second = SessionRepository::insert(&store, new_session(vec![])).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let ids: Vec<i64> = SessionRepository::find_all(&store)
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let store = MemoryStore::new();
        UserRepository::insert(&store, new_user("john.doe@example.com"))
            .await
            .unwrap();

        let err = UserRepository::insert(&store, new_user("john.doe@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, SqlxError::Database(db) if db.is_unique_violation()));
        assert!(store.exists_by_email("john.doe@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn deleting_user_removes_participations() {
        let store = MemoryStore::new();
        let user = UserRepository::insert(&store, new_user("john.doe@example.com"))
            .await
            .unwrap();
        let session = SessionRepository::insert(&store, new_session(vec![user.id]))
            .await
            .unwrap();

        assert!(UserRepository::delete(&store, user.id).await.unwrap());

        let session = SessionRepository::find_by_id(&store, session.id)
            .await
            .unwrap()
            .unwrap();
        assert!(session.users.is_empty());
    }

    #[tokio::test]
    async fn update_of_missing_session_returns_none() {
        let store = MemoryStore::new();
        let mut session = SessionRepository::insert(&store, new_session(vec![]))
            .await
            .unwrap();
        session.id = 42;

        assert!(store.update(&session).await.unwrap().is_none());
    }

    #[test]
    fn demo_data_seeds_teachers_and_admin() {
        let store = MemoryStore::with_demo_data().unwrap();

        assert_eq!(store.teachers.len(), 2);
        let admin = store.users.get(&1).unwrap();
        assert_eq!(admin.email, "yoga@studio.com");
        assert!(admin.admin);
    }
}
