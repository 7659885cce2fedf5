//! Entity to model mappers
//!
//! - `From<BanModel> for BanRecord`: convert database rows to domain objects
//! - `BanWrite`: prepare entity data for insert/update statements

mod ban;

pub use ban::BanWrite;
