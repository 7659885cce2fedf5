//! In-process adapters for the ban-core ports

mod ban;
mod identity;

pub use ban::MemoryBanRepository;
pub use identity::MemoryIdentityService;
