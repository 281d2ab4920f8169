//! Reconstruction of a dense contribution timeline from public events.

pub mod dates;
pub mod events;

pub use dates::{calendar_date, date_of, today_utc};
pub use events::{fold_events, reconstruct};
