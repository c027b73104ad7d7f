use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error};

use crate::database::{NewSession, SessionEntity};
use crate::error::{AppError, AppResult};
use crate::routes::require_not_blank;

/// 课程的请求与响应格式，`teacher_id` 保持下划线命名
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, rename = "teacher_id")]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub users: Option<Vec<i64>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SessionDto {
    /// 校验客户端提交的字段；`id` 与时间戳由服务端决定，忽略之
    pub fn into_new_session(self) -> AppResult<NewSession> {
        let name = require_not_blank("name", self.name.as_deref(), 50)?;
        let description = require_not_blank("description", self.description.as_deref(), 2500)?;
        let date = self
            .date
            .ok_or_else(|| AppError::BadRequest("date must not be null".into()))?;
        let teacher_id = self
            .teacher_id
            .ok_or_else(|| AppError::BadRequest("teacher_id must not be null".into()))?;

        Ok(NewSession {
            name,
            date,
            description,
            teacher_id: Some(teacher_id),
            users: self.users.unwrap_or_default(),
        })
    }
}

/// RFC 3339 时间戳，或表单提交的 `yyyy-MM-dd`（按 UTC 零点）
pub(crate) fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_date(raw.trim())
        .map(Some)
        .ok_or_else(|| Error::custom(format!("invalid date: {raw}")))
}

impl From<SessionEntity> for SessionDto {
    fn from(session: SessionEntity) -> Self {
        Self {
            id: Some(session.id),
            name: Some(session.name),
            date: Some(session.date),
            teacher_id: session.teacher_id,
            users: Some(session.users),
            description: Some(session.description),
            created_at: Some(session.created_at),
            updated_at: Some(session.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid_dto() -> SessionDto {
        SessionDto {
            name: Some("New Session".into()),
            description: Some("New description".into()),
            teacher_id: Some(1),
            date: Some(Utc.with_ymd_and_hms(2025, 4, 11, 9, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_dto_maps_to_new_session() {
        let session = valid_dto().into_new_session().unwrap();

        assert_eq!(session.name, "New Session");
        assert_eq!(session.teacher_id, Some(1));
        assert!(session.users.is_empty());
    }

    #[test]
    fn missing_fields_are_bad_requests() {
        let cases = [
            SessionDto { description: None, ..valid_dto() },
            SessionDto { name: Some(" ".into()), ..valid_dto() },
            SessionDto { date: None, ..valid_dto() },
            SessionDto { teacher_id: None, ..valid_dto() },
            SessionDto { name: Some("n".repeat(51)), ..valid_dto() },
        ];

        for dto in cases {
            assert!(matches!(
                dto.into_new_session().unwrap_err(),
                AppError::BadRequest(_)
            ));
        }
    }

    #[test]
    fn entity_serializes_with_wire_names() {
        let now = Utc::now();
        let dto = SessionDto::from(SessionEntity {
            id: 3,
            name: "Session Test".into(),
            date: now,
            description: "Session Test".into(),
            teacher_id: None,
            users: vec![1, 2],
            created_at: now,
            updated_at: now,
        });

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["id"], 3);
        assert!(json["teacher_id"].is_null());
        assert_eq!(json["users"], serde_json::json!([1, 2]));
        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_string());
    }

    #[test]
    fn date_accepts_timestamp_or_plain_day() {
        assert_eq!(
            parse_date("2025-05-14T10:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2025, 5, 14, 8, 0, 0).unwrap())
        );
        assert_eq!(
            parse_date("2025-03-01"),
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_date("01/03/2025"), None);

        let dto: SessionDto =
            serde_json::from_value(serde_json::json!({ "date": "2025-03-01" })).unwrap();
        assert_eq!(dto.date, parse_date("2025-03-01"));
        assert!(serde_json::from_value::<SessionDto>(serde_json::json!({ "date": "soon" })).is_err());
    }

    #[test]
    fn accepts_null_users_list() {
        let dto: SessionDto = serde_json::from_value(serde_json::json!({
            "name": "Session",
            "description": "desc",
            "teacher_id": 1,
            "date": "2025-05-14T10:00:00Z",
            "users": null
        }))
        .unwrap();

        assert!(dto.into_new_session().unwrap().users.is_empty());
    }
}
