//! Repository implementations
//!
//! PostgreSQL implementations of the ports defined in ban-core.

mod ban;
mod error;
mod identity;

pub use ban::PgBanRepository;
pub use error::map_db_error;
pub use identity::PgIdentityRepository;
