//! # ban-service
//!
//! Application layer: validation, storage, resolution and lifecycle of ban
//! records, plus the request and response DTOs.
//!
//! ```rust,ignore
//! use ban_service::{BanService, CreateBanRequest};
//!
//! let ctx = ban_service::init_from_env().await?;
//! let bans = BanService::new(&ctx);
//! bans.create(moderator, CreateBanRequest::for_ip("203.0.113.9")).await?;
//! let decision = bans.check_combined(Some(user_id), Some(remote_ip)).await?;
//! ```

pub mod bootstrap;
pub mod dto;
pub mod services;

pub use bootstrap::{create_service_context, init_from_env};
pub use dto::{
    BanCheckResponse, BanResponse, CreateBanRequest, LiftBanRequest, PublicBanResponse,
    UpdateBanRequest,
};
pub use services::{
    BanResolver, BanService, BanStore, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, ValidationGate,
};
