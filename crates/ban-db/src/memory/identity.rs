//! In-memory identity directory

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;

use ban_core::traits::{IdentityService, RepoResult};
use ban_core::value_objects::UserId;

/// Set of known user ids
#[derive(Debug, Default)]
pub struct MemoryIdentityService {
    users: RwLock<HashSet<UserId>>,
}

impl MemoryIdentityService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with the given users
    pub fn with_users<I>(users: I) -> Self
    where
        I: IntoIterator<Item = UserId>,
    {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }

    pub fn add_user(&self, user_id: UserId) {
        self.users.write().insert(user_id);
    }

    pub fn remove_user(&self, user_id: UserId) {
        self.users.write().remove(&user_id);
    }
}

#[async_trait]
impl IdentityService for MemoryIdentityService {
    async fn user_exists(&self, user_id: UserId) -> RepoResult<bool> {
        Ok(user_id.is_valid() && self.users.read().contains(&user_id))
    }
}
