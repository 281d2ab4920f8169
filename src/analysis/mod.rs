pub mod heatmap;
pub mod languages;
pub mod quality;
pub mod loader;

pub use heatmap::render_heatmap;
pub use languages::language_distribution;
pub use quality::{assess_quality, top_repositories};
pub use loader::{Dashboard, DashboardLoader};
