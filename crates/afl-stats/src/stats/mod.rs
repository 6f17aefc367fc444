// Stat table pipeline: load, clean, filter, rank, write.

pub mod clean;
pub mod error;
pub mod filter;
pub mod loader;
pub mod record;
pub mod summary;
pub mod writer;

pub use error::StatsError;
pub use filter::GameFilter;
pub use record::{Metric, PlayerStat, TextField};
