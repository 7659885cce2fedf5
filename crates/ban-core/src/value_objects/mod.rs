//! Value objects - immutable types that represent domain concepts

mod ids;
pub mod metadata;

pub use ids::{BanId, IdParseError, UserId};
pub use metadata::Metadata;
