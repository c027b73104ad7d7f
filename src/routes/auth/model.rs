use serde::{Deserialize, Serialize};

use crate::database::{NewUser, UserEntity};
use crate::error::{AppError, AppResult};
use crate::routes::{is_valid_email, require_length, require_not_blank};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_not_blank("email", Some(self.email.as_str()), usize::MAX)?;
        require_not_blank("password", Some(self.password.as_str()), usize::MAX)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

impl SignupRequest {
    /// 校验通过后转换为待注册用户，密码仍为明文
    pub fn into_new_user(self) -> AppResult<NewUser> {
        require_not_blank("email", Some(self.email.as_str()), 50)?;
        if !is_valid_email(&self.email) {
            return Err(AppError::BadRequest("email must be a valid address".into()));
        }
        require_length("firstName", &self.first_name, 3, 20)?;
        require_length("lastName", &self.last_name, 3, 20)?;
        require_length("password", &self.password, 6, 40)?;

        Ok(NewUser {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password: self.password,
            admin: false,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

impl JwtResponse {
    pub fn new(user: UserEntity, token: String) -> Self {
        Self {
            token,
            token_type: "Bearer".into(),
            id: user.id,
            username: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            admin: user.admin,
        }
    }
}
