use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 课程数据库实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SessionEntity {
    pub id: i64,
    pub name: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub teacher_id: Option<i64>,
    /// 参与者用户ID，按加入顺序，不重复
    pub users: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionEntity {
    pub fn has_participant(&self, user_id: i64) -> bool {
        self.users.contains(&user_id)
    }
}

/// 待插入的课程
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    pub name: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub teacher_id: Option<i64>,
    pub users: Vec<i64>,
}
