use std::sync::Arc;

use crate::database::{UserEntity, UserRepository};
use crate::error::{AppError, AppResult};

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<UserEntity> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))
    }

    /// 只能删除自己的账号
    pub async fn delete(&self, id: i64, requester_email: &str) -> AppResult<()> {
        let user = self.find_by_id(id).await?;

        if user.email != requester_email {
            tracing::warn!(
                user_id = id,
                "Refused to delete another user's account"
            );
            return Err(AppError::Unauthorized(
                "You can only delete your own account".into(),
            ));
        }

        if !self.users.delete(id).await? {
            return Err(AppError::not_found("User", id));
        }
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
