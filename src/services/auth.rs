use std::sync::Arc;

use sqlx::Error as SqlxError;

use crate::database::{NewUser, UserEntity, UserRepository};
use crate::error::{AppError, AppResult};
use crate::utils::{JwtUtils, hash_password, verify_password};

pub const EMAIL_TAKEN_MESSAGE: &str = "Error: Email is already taken!";

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: Arc<JwtUtils>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: Arc<JwtUtils>) -> Self {
        Self { users, jwt }
    }

    /// 校验凭据，并以用户邮箱签发令牌
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(UserEntity, String)> {
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::debug!("Login attempt for unknown email");
            return Err(AppError::Unauthorized("Bad credentials".into()));
        };

        if !verify_password(password, &user.password)? {
            tracing::debug!(user_id = user.id, "Login attempt with wrong password");
            return Err(AppError::Unauthorized("Bad credentials".into()));
        }

        let token = self.jwt.issue(&user.email)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok((user, token))
    }

    /// `user.password` 为明文密码，入库前哈希
    pub async fn register(&self, mut user: NewUser) -> AppResult<UserEntity> {
        if self.users.exists_by_email(&user.email).await? {
            return Err(AppError::BadRequest(EMAIL_TAKEN_MESSAGE.into()));
        }

        user.password = hash_password(&user.password)?;
        user.admin = false;

        // 并发注册时唯一约束兜底
        let created = match self.users.insert(user).await {
            Ok(created) => created,
            Err(SqlxError::Database(err)) if err.is_unique_violation() => {
                tracing::debug!("Concurrent registration lost on unique email");
                return Err(AppError::BadRequest(EMAIL_TAKEN_MESSAGE.into()));
            }
            Err(err) => return Err(err.into()),
        };
        tracing::info!(user_id = created.id, "User registered");
        Ok(created)
    }

    /// 根据 Bearer 令牌找到对应用户
    ///
    /// 令牌过期、格式错误或账号不存在，统一返回未认证错误
    pub async fn authenticate(&self, token: &str) -> AppResult<UserEntity> {
        if !self.jwt.validate(token) {
            return Err(AppError::unauthenticated());
        }

        let email = self
            .jwt
            .extract_subject(token)
            .map_err(|_| AppError::unauthenticated())?;

        self.users
            .find_by_email(&email)
            .await?
            .ok_or_else(AppError::unauthenticated)
    }
}
