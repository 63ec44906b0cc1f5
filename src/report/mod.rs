//! Report module - human-facing statistics, correlation and relationship views

pub mod correlation_table;
pub mod plots;
pub mod summary;

pub use correlation_table::*;
pub use plots::*;
pub use summary::*;
