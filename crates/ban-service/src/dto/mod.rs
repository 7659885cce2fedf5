//! Data transfer objects for ban requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for moderation inputs
//! - Response DTOs for serializing ban records and check outcomes
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateBanRequest, LiftBanRequest, UpdateBanRequest};
pub use responses::{ApiResponse, BanCheckResponse, BanResponse, PublicBanResponse};
