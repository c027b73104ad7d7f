use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::TeacherEntity;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDto {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TeacherEntity> for TeacherDto {
    fn from(teacher: TeacherEntity) -> Self {
        Self {
            id: teacher.id,
            last_name: teacher.last_name,
            first_name: teacher.first_name,
            created_at: teacher.created_at,
            updated_at: teacher.updated_at,
        }
    }
}
