use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::UserEntity;

/// 对外展示的用户信息，不含密码
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for UserDto {
    fn from(user: UserEntity) -> Self {
        Self {
            id: user.id,
            email: user.email,
            last_name: user.last_name,
            first_name: user.first_name,
            admin: user.admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
