//! Application services
//!
//! - [`ValidationGate`]: rejects records that must not be enforced
//! - [`BanStore`]: keyed lookups and the validated write path
//! - [`BanResolver`]: effective ban decision with user-over-IP precedence
//! - [`BanService`]: moderation actions and enforcement checks

pub mod ban;
pub mod context;
pub mod error;
pub mod resolver;
pub mod store;
pub mod validation;

pub use ban::BanService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use resolver::BanResolver;
pub use store::BanStore;
pub use validation::ValidationGate;
