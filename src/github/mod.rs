pub mod client;
pub mod rate_limit;
pub mod status;
mod wire;

pub use client::{GitHubClient, MAX_PAGE_ITEMS};
pub use rate_limit::RateLimitSnapshot;
pub use status::Resource;
