use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 教师数据库实体，只读，由迁移脚本写入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TeacherEntity {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
