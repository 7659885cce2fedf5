//! Identity port - existence checks against the user directory

use async_trait::async_trait;

use crate::value_objects::UserId;

use super::RepoResult;

#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Check whether a user account exists
    async fn user_exists(&self, user_id: UserId) -> RepoResult<bool>;
}
