//! Ports - interfaces the domain needs from the outside world

mod clock;
mod identity;
mod repositories;

pub use clock::{Clock, FixedClock, SystemClock};
pub use identity::IdentityService;
pub use repositories::{BanRepository, LookupMode, RepoResult};
