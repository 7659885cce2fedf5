//! # ban-core
//!
//! Domain layer for ban enforcement: the ban record entity, identifier and
//! metadata value objects, and the ports (storage, identity, clock) the
//! application layer is built against.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{BanDecision, BanKey, BanLookup, BanRecord, MAX_IP_LENGTH};
pub use error::DomainError;
pub use traits::{
    BanRepository, Clock, FixedClock, IdentityService, LookupMode, RepoResult, SystemClock,
};
pub use value_objects::{BanId, IdParseError, Metadata, UserId};
