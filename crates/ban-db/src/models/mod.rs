//! Database models - SQLx-compatible structs for PostgreSQL tables

mod ban;

pub use ban::BanModel;
