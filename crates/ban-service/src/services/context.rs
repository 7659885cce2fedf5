//! Service context - dependency container for services
//!
//! Holds the storage, identity and clock collaborators the ban services are
//! built against. Nothing here is global; every service receives its context
//! explicitly.

use std::sync::Arc;

use ban_core::traits::{BanRepository, Clock, IdentityService};
use ban_core::SystemClock;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    ban_repo: Arc<dyn BanRepository>,
    identity: Arc<dyn IdentityService>,
    clock: Arc<dyn Clock>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        ban_repo: Arc<dyn BanRepository>,
        identity: Arc<dyn IdentityService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ban_repo,
            identity,
            clock,
        }
    }

    /// Start a builder
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the ban repository
    pub fn ban_repo(&self) -> &dyn BanRepository {
        self.ban_repo.as_ref()
    }

    /// Get the identity service
    pub fn identity(&self) -> &dyn IdentityService {
        self.identity.as_ref()
    }

    /// Get the clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("ban_repo", &"dyn BanRepository")
            .field("identity", &"dyn IdentityService")
            .field("clock", &"dyn Clock")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    ban_repo: Option<Arc<dyn BanRepository>>,
    identity: Option<Arc<dyn IdentityService>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ban_repo(mut self, repo: Arc<dyn BanRepository>) -> Self {
        self.ban_repo = Some(repo);
        self
    }

    pub fn identity(mut self, identity: Arc<dyn IdentityService>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Defaults to the system clock when not set
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.ban_repo
                .ok_or_else(|| ServiceError::validation("ban_repo is required"))?,
            self.identity
                .ok_or_else(|| ServiceError::validation("identity is required"))?,
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        ))
    }
}
