pub mod user;
pub mod repository;
pub mod activity;
pub mod insights;

pub use user::*;
pub use repository::*;
pub use activity::*;
pub use insights::*;
